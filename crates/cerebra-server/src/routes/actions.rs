//! Form actions. Each handler runs only for its own button, applies one
//! transition to the session, and redirects back to the page.

use axum::Form;
use axum::extract::{Multipart, State};
use axum::response::Redirect;
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use cerebra_core::error::CoreError;
use cerebra_core::models::form::FormInputs;
use cerebra_core::models::notice::Notice;
use cerebra_core::models::scan::ScanUpload;
use cerebra_core::session::SessionState;
use cerebra_export::error::ExportError;
use cerebra_export::render::synthesize_report;

use crate::error::ApiError;
use crate::state::AppState;

pub const ANALYZED: &str = "Symptoms analyzed successfully";
pub const REPORT_SAVED: &str = "Full medical report generated and saved successfully";
pub const SCAN_FIELD: &str = "scan";

/// Raw widget values as posted by the patient form.
#[derive(Debug, Deserialize)]
pub struct PatientForm {
    #[serde(default)]
    pub patient_id: String,
    #[serde(default)]
    pub patient_name: String,
    #[serde(default)]
    pub age: String,
    #[serde(default)]
    pub gender: String,
    #[serde(default)]
    pub symptoms: String,
    /// Checkboxes are only posted when ticked.
    #[serde(default)]
    pub show_confidence: Option<String>,
}

impl PatientForm {
    pub fn into_inputs(self) -> Result<FormInputs, CoreError> {
        Ok(FormInputs {
            age: self.age.parse()?,
            gender: self.gender.parse()?,
            patient_id: self.patient_id,
            patient_name: self.patient_name,
            symptoms: self.symptoms,
            show_confidence: self.show_confidence.is_some(),
        })
    }
}

/// Turn a refused transition into a warning on the unchanged state.
/// Anything that is not a user-fixable refusal is a bad request.
fn settle(
    current: &SessionState,
    outcome: Result<SessionState, CoreError>,
    success: &str,
) -> Result<SessionState, ApiError> {
    match outcome {
        Ok(next) => Ok(next.with_notice(Notice::Success(success.to_string()))),
        Err(e) => refuse(current, e),
    }
}

/// Store a refusal as a warning, or fail for anything else.
fn refuse(current: &SessionState, error: CoreError) -> Result<SessionState, ApiError> {
    if error.is_warning() {
        Ok(current.with_notice(Notice::Warning(error.to_string())))
    } else {
        Err(error.into())
    }
}

pub async fn analyze_symptoms(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PatientForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let (jar, session_id) = state.sessions.identify(jar);
    let inputs = form.into_inputs();

    let analyzed = state
        .sessions
        .update(session_id, |current| -> Result<_, ApiError> {
            let current = match inputs {
                Ok(inputs) => current.with_form(inputs),
                Err(e) => return Ok((refuse(current, e)?, false)),
            };
            let outcome = current.analyze_symptoms(&current.form().symptoms);
            let analyzed = outcome.is_ok();
            Ok((settle(&current, outcome, ANALYZED)?, analyzed))
        })
        .await?;

    tracing::info!(session = %session_id, analyzed, "symptom analysis requested");
    Ok((jar, Redirect::to("/")))
}

pub async fn generate_report(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<PatientForm>,
) -> Result<(CookieJar, Redirect), ApiError> {
    let (jar, session_id) = state.sessions.identify(jar);
    let inputs = form.into_inputs();
    let today = jiff::Zoned::now().date();

    let history_len = state
        .sessions
        .update(session_id, |current| -> Result<_, ApiError> {
            let current = match inputs {
                Ok(inputs) => current.with_form(inputs),
                Err(e) => {
                    let next = refuse(current, e)?;
                    let len = next.history().len();
                    return Ok((next, len));
                }
            };
            let patient = current.form().patient();
            let outcome = match current.generate_report(patient, today, synthesize_report) {
                Ok(next) => Ok(next),
                Err(ExportError::Core(e)) => Err(e),
                Err(e) => return Err(e.into()),
            };
            let next = settle(&current, outcome, REPORT_SAVED)?;
            let len = next.history().len();
            Ok((next, len))
        })
        .await?;

    tracing::info!(session = %session_id, history_len, "report generation requested");
    Ok((jar, Redirect::to("/")))
}

/// Accept an MRI image. Only its metadata is kept; the bytes are counted as
/// they stream in and discarded. The body is read in full before the session
/// is touched.
pub async fn upload_scan(
    State(state): State<AppState>,
    jar: CookieJar,
    mut multipart: Multipart,
) -> Result<(CookieJar, Redirect), ApiError> {
    let (jar, session_id) = state.sessions.identify(jar);

    let mut upload = None;
    while let Some(mut field) = multipart.next_field().await? {
        if field.name() != Some(SCAN_FIELD) {
            continue;
        }
        let file_name = field.file_name().unwrap_or_default().to_string();
        let content_type = field.content_type().map(str::to_string);
        let mut size_bytes = 0u64;
        while let Some(chunk) = field.chunk().await? {
            size_bytes += chunk.len() as u64;
        }
        if !file_name.is_empty() {
            upload = Some(ScanUpload::new(file_name, content_type, size_bytes));
        }
    }

    if let Some(Ok(scan)) = &upload {
        tracing::info!(session = %session_id, size_bytes = scan.size_bytes, "scan uploaded");
    }
    state
        .sessions
        .update(session_id, |current| {
            let next = match upload {
                Some(Ok(scan)) => {
                    let message = format!("MRI scan {} received", scan.file_name);
                    current.with_scan(scan).with_notice(Notice::Info(message))
                }
                Some(Err(e)) => current.with_notice(Notice::Warning(e.to_string())),
                None => current.with_notice(Notice::Warning(
                    "Please choose an MRI scan to upload".to_string(),
                )),
            };
            Ok::<_, ApiError>((next, ()))
        })
        .await?;

    Ok((jar, Redirect::to("/")))
}
