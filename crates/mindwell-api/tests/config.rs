use std::collections::HashMap;

use jiff::SignedDuration;

use mindwell_api::config::ApiConfig;

fn load(pairs: &[(&str, &str)]) -> eyre::Result<ApiConfig> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    ApiConfig::from_lookup(|key| vars.get(key).cloned())
}

#[test]
fn defaults_apply_when_only_secret_is_set() {
    let config = load(&[("JWT_SECRET", "s3cret")]).unwrap();
    assert_eq!(config.database, "mindwell.db");
    assert_eq!(config.listen_addr(), "0.0.0.0:8080");
    assert_eq!(config.token_ttl, SignedDuration::from_hours(24));
    assert!(config.bootstrap_admin.is_none());
}

#[test]
fn secret_is_required() {
    assert!(load(&[]).is_err());
    assert!(load(&[("JWT_SECRET", "  ")]).is_err());
}

#[test]
fn overrides_are_parsed() {
    let config = load(&[
        ("JWT_SECRET", "s3cret"),
        ("PORT", "9000"),
        ("MINDWELL_BIND", "127.0.0.1"),
        ("TOKEN_TTL_HOURS", "2"),
    ])
    .unwrap();
    assert_eq!(config.listen_addr(), "127.0.0.1:9000");
    assert_eq!(config.token_ttl, SignedDuration::from_hours(2));
}

#[test]
fn bad_numbers_are_rejected() {
    assert!(load(&[("JWT_SECRET", "s"), ("PORT", "eighty")]).is_err());
    assert!(load(&[("JWT_SECRET", "s"), ("TOKEN_TTL_HOURS", "0")]).is_err());
}

#[test]
fn bootstrap_admin_needs_both_fields() {
    let half = load(&[("JWT_SECRET", "s"), ("BOOTSTRAP_ADMIN_EMAIL", "root@clinic.org")]);
    assert!(half.is_err());

    let config = load(&[
        ("JWT_SECRET", "s"),
        ("BOOTSTRAP_ADMIN_EMAIL", "root@clinic.org"),
        ("BOOTSTRAP_ADMIN_PASSWORD", "Secret#123"),
    ])
    .unwrap();
    assert_eq!(config.bootstrap_admin.unwrap().email, "root@clinic.org");
}
