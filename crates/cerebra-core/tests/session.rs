use cerebra_core::error::CoreError;
use cerebra_core::models::notice::Notice;
use cerebra_core::models::patient::{Age, Gender, PatientDetails};
use cerebra_core::session::SessionState;
use jiff::civil::{Date, date};

fn jane() -> PatientDetails {
    PatientDetails {
        patient_id: "P1".to_string(),
        patient_name: "Jane Doe".to_string(),
        age: Age::try_from(45_i64).unwrap(),
        gender: Gender::Female,
    }
}

fn fixed_report(patient: &PatientDetails, day: Date) -> Result<String, CoreError> {
    Ok(format!("report for {} on {day}", patient.patient_id))
}

#[test]
fn blank_symptoms_leave_analysis_pending() {
    let state = SessionState::new();

    let err = state.analyze_symptoms("   \n\t").unwrap_err();
    assert_eq!(err, CoreError::EmptySymptoms);
    assert!(err.is_warning());
    assert_eq!(err.to_string(), "Please enter symptoms");
    assert!(!state.analysis_done());
}

#[test]
fn symptoms_mark_analysis_done() {
    let state = SessionState::new();
    let next = state.analyze_symptoms("persistent headaches").unwrap();

    assert!(next.analysis_done());
    // The previous turn's state is untouched.
    assert!(!state.analysis_done());
}

#[test]
fn report_refused_before_analysis() {
    let state = SessionState::new();

    let err = state
        .generate_report(jane(), date(2026, 3, 5), fixed_report)
        .unwrap_err();
    assert_eq!(err, CoreError::AnalysisPending);
    assert_eq!(err.to_string(), "Perform analysis before generating report");
    assert!(state.history().is_empty());
    assert!(state.latest_report().is_none());
}

#[test]
fn report_refused_without_identity() {
    let state = SessionState::new().analyze_symptoms("dizziness").unwrap();

    let mut no_id = jane();
    no_id.patient_id.clear();
    let mut no_name = jane();
    no_name.patient_name.clear();

    for patient in [no_id, no_name] {
        let err = state
            .generate_report(patient, date(2026, 3, 5), fixed_report)
            .unwrap_err();
        assert_eq!(err, CoreError::MissingPatientIdentity);
    }
    assert!(state.history().is_empty());
}

#[test]
fn identity_is_checked_before_analysis() {
    let mut patient = jane();
    patient.patient_name.clear();

    let err = SessionState::new().authorize_report(patient).unwrap_err();
    assert_eq!(err, CoreError::MissingPatientIdentity);
}

#[test]
fn synthesizer_not_called_when_refused() {
    let mut called = false;
    let result = SessionState::new().generate_report(jane(), date(2026, 3, 5), |_, _| {
        called = true;
        Ok::<_, CoreError>(String::new())
    });

    assert!(result.is_err());
    assert!(!called);
}

#[test]
fn generated_report_is_recorded() {
    let state = SessionState::new()
        .analyze_symptoms("vision problems")
        .unwrap()
        .generate_report(jane(), date(2026, 3, 5), fixed_report)
        .unwrap();

    let record = state.latest_record().unwrap();
    assert_eq!(record.id(), "P1");
    assert_eq!(record.name(), "Jane Doe");
    assert_eq!(record.date(), "05-03-2026");
    assert_eq!(record.report(), "report for P1 on 2026-03-05");
    assert_eq!(state.latest_report(), Some(record.report()));
    assert_eq!(record.label(1), "1. Jane Doe (05-03-2026)");
}

#[test]
fn history_keeps_call_order_without_dedup() {
    let mut state = SessionState::new().analyze_symptoms("memory issues").unwrap();

    let days = [date(2026, 1, 1), date(2026, 1, 2), date(2026, 1, 2)];
    for day in days {
        state = state.generate_report(jane(), day, fixed_report).unwrap();
    }

    let dates: Vec<&str> = state.history().iter().map(|r| r.date()).collect();
    assert_eq!(dates, ["01-01-2026", "02-01-2026", "02-01-2026"]);
    assert_eq!(state.record(1).unwrap().date(), "01-01-2026");
    assert_eq!(state.record(3).unwrap().date(), "02-01-2026");
    assert!(state.record(0).is_none());
    assert!(state.record(4).is_none());
}

#[test]
fn failed_synthesis_keeps_state() {
    let state = SessionState::new().analyze_symptoms("nausea").unwrap();

    let result = state.generate_report(jane(), date(2026, 3, 5), |_, _| {
        Err::<String, _>(CoreError::AnalysisPending)
    });

    assert!(result.is_err());
    assert!(state.history().is_empty());
}

#[test]
fn notice_is_taken_once() {
    let state = SessionState::new().with_notice(Notice::Success("done".to_string()));
    assert!(state.notice().is_some());

    let (state, notice) = state.take_notice();
    assert_eq!(notice, Some(Notice::Success("done".to_string())));

    let (_, notice) = state.take_notice();
    assert!(notice.is_none());
}

#[test]
fn history_serializes_in_order() {
    let state = SessionState::new()
        .analyze_symptoms("seizures")
        .unwrap()
        .generate_report(jane(), date(2026, 3, 5), fixed_report)
        .unwrap();

    let json = serde_json::to_value(state.history()).unwrap();
    assert_eq!(json[0]["id"], "P1");
    assert_eq!(json[0]["name"], "Jane Doe");
    assert_eq!(json[0]["date"], "05-03-2026");
}
