use cerebra_core::models::patient::{Age, Gender, PatientDetails};
use cerebra_export::render::{render_template, synthesize_report};
use jiff::civil::date;

fn jane() -> PatientDetails {
    PatientDetails {
        patient_id: "P1".to_string(),
        patient_name: "Jane Doe".to_string(),
        age: Age::try_from(45_i64).unwrap(),
        gender: Gender::Female,
    }
}

#[test]
fn header_carries_patient_fields() {
    let report = synthesize_report(&jane(), date(2026, 3, 5)).unwrap();

    assert!(report.starts_with("PATIENT MEDICAL REPORT\n"));
    assert!(report.contains("Patient ID      : P1\n"));
    assert!(report.contains("Patient Name    : Jane Doe\n"));
    assert!(report.contains("Age             : 45 Years\n"));
    assert!(report.contains("Gender          : Female\n"));
    assert!(report.contains("Report Date     : 05 March 2026\n"));
}

#[test]
fn diagnosis_is_fixed() {
    let report = synthesize_report(&jane(), date(2026, 3, 5)).unwrap();

    assert!(report.contains("there is a high likelihood of a Glioma brain tumor."));
    assert!(report.contains("Risk Level : High"));
    assert!(report.contains("• Immediate consultation with a Neurologist\n"));
    assert!(report.contains("• Avoid delay in medical evaluation\n\nDISCLAIMER\n"));
    assert!(report.ends_with("It does not replace professional medical diagnosis.\n"));
}

#[test]
fn diagnostic_section_does_not_vary_with_patient() {
    let other = PatientDetails {
        patient_id: "X-99".to_string(),
        patient_name: "Sam Roe".to_string(),
        age: Age::try_from(7_i64).unwrap(),
        gender: Gender::Other,
    };

    let a = synthesize_report(&jane(), date(2026, 3, 5)).unwrap();
    let b = synthesize_report(&other, date(2027, 11, 30)).unwrap();

    let body = |r: &str| r.split_once("MRI SCAN FINDINGS").unwrap().1.to_string();
    assert_eq!(body(&a), body(&b));
    assert!(b.contains("Gender          : Other\n"));
}

#[test]
fn names_are_not_html_escaped() {
    let mut patient = jane();
    patient.patient_name = "Smith & <Jones>".to_string();

    let report = synthesize_report(&patient, date(2026, 3, 5)).unwrap();
    assert!(report.contains("Patient Name    : Smith & <Jones>\n"));
}

#[test]
fn broken_template_is_a_parse_error() {
    let err = render_template("bad.txt", "{% for %}", &serde_json::json!({})).unwrap_err();
    assert!(err.to_string().starts_with("template parse error"));
}
