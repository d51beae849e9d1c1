//! Process configuration, read once from the environment at startup.

use std::env;

use eyre::{bail, WrapErr};
use jiff::SignedDuration;

const DEFAULT_DATABASE: &str = "mindwell.db";
const DEFAULT_BIND: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8080;
const DEFAULT_TOKEN_TTL_HOURS: i64 = 24;

#[derive(Clone)]
pub struct BootstrapAdmin {
    pub email: String,
    pub password: String,
}

#[derive(Clone)]
pub struct ApiConfig {
    /// SQLite path; `:memory:` for a throwaway store.
    pub database: String,
    pub bind: String,
    pub port: u16,
    pub jwt_secret: String,
    pub token_ttl: SignedDuration,
    pub bootstrap_admin: Option<BootstrapAdmin>,
}

impl ApiConfig {
    pub fn from_env() -> eyre::Result<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup. Unset and empty values count as missing.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> eyre::Result<Self> {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let Some(jwt_secret) = get("JWT_SECRET") else {
            bail!("JWT_SECRET must be set");
        };

        let port = match get("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .wrap_err_with(|| format!("invalid PORT: {raw}"))?,
            None => DEFAULT_PORT,
        };

        let ttl_hours = match get("TOKEN_TTL_HOURS") {
            Some(raw) => raw
                .trim()
                .parse::<i64>()
                .wrap_err_with(|| format!("invalid TOKEN_TTL_HOURS: {raw}"))?,
            None => DEFAULT_TOKEN_TTL_HOURS,
        };
        if ttl_hours <= 0 {
            bail!("TOKEN_TTL_HOURS must be positive, got {ttl_hours}");
        }

        let bootstrap_admin = match (get("BOOTSTRAP_ADMIN_EMAIL"), get("BOOTSTRAP_ADMIN_PASSWORD")) {
            (Some(email), Some(password)) => Some(BootstrapAdmin { email, password }),
            (None, None) => None,
            _ => bail!("BOOTSTRAP_ADMIN_EMAIL and BOOTSTRAP_ADMIN_PASSWORD must be set together"),
        };

        Ok(Self {
            database: get("MINDWELL_DATABASE").unwrap_or_else(|| DEFAULT_DATABASE.to_string()),
            bind: get("MINDWELL_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string()),
            port,
            jwt_secret,
            token_ttl: SignedDuration::from_hours(ttl_hours),
            bootstrap_admin,
        })
    }

    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind, self.port)
    }
}
