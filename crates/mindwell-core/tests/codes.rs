use mindwell_core::codes::{
    department_prefix, employee_id, looks_like_employee_id, patient_code, session_code,
};

fn suffix_of(code: &str) -> u32 {
    code.rsplit('-').next().unwrap().parse().unwrap()
}

#[test]
fn prefix_is_first_three_upper_cased() {
    assert_eq!(department_prefix(Some("Depression")), "DEP");
    assert_eq!(department_prefix(Some("psychiatry")), "PSY");
}

#[test]
fn short_names_are_used_whole() {
    assert_eq!(department_prefix(Some("ed")), "ED");
}

#[test]
fn missing_or_blank_department_falls_back() {
    assert_eq!(department_prefix(None), "GEN");
    assert_eq!(department_prefix(Some("   ")), "GEN");
}

#[test]
fn code_shapes() {
    let patient = patient_code(Some("Depression"));
    assert!(patient.starts_with("DEP-"));
    assert!((1000..10000).contains(&suffix_of(&patient)));

    let session = session_code(Some("Depression"));
    assert!(session.starts_with("DEP-S-"));
    assert!((1000..10000).contains(&suffix_of(&session)));

    let employee = employee_id(Some("Addiction Services"));
    assert!(employee.starts_with("ADD-EMP-"));
    assert!(looks_like_employee_id(&employee));
    assert!(!looks_like_employee_id("jane.doe@example.com"));
}
