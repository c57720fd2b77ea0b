use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use axum_extra::extract::cookie::CookieJar;

use cerebra_export::stage::{self, DocumentFormat};
use cerebra_export::styles::DocumentStyles;

use crate::error::ApiError;
use crate::state::AppState;

/// Download the most recently generated report.
pub async fn download_latest(
    State(state): State<AppState>,
    jar: CookieJar,
    Path(format): Path<DocumentFormat>,
) -> Result<Response, ApiError> {
    let (jar, session_id) = state.sessions.identify(jar);
    let session = state.sessions.snapshot(session_id).await;

    let record = session
        .latest_record()
        .ok_or_else(|| ApiError::NotFound("no report generated yet".to_string()))?;

    let document = export(
        record.report().to_string(),
        record.name().to_string(),
        format,
        state.styles.clone(),
    )
    .await?;
    Ok((jar, document).into_response())
}

/// Download the history record at 1-based `position`.
pub async fn download_record(
    State(state): State<AppState>,
    jar: CookieJar,
    Path((position, format)): Path<(usize, DocumentFormat)>,
) -> Result<Response, ApiError> {
    let (jar, session_id) = state.sessions.identify(jar);
    let session = state.sessions.snapshot(session_id).await;

    let record = session
        .record(position)
        .ok_or_else(|| ApiError::NotFound(format!("no history entry at position {position}")))?;

    let document = export(
        record.report().to_string(),
        record.name().to_string(),
        format,
        state.styles.clone(),
    )
    .await?;
    Ok((jar, document).into_response())
}

/// Stage the document on a blocking thread, read it back, and let the
/// staged temp file drop before the response is built.
async fn export(
    report: String,
    patient_name: String,
    format: DocumentFormat,
    styles: Arc<DocumentStyles>,
) -> Result<Response, ApiError> {
    let (file_name, bytes) = tokio::task::spawn_blocking(move || {
        let staged = stage::stage(&report, &patient_name, format, &styles)?;
        let bytes = staged.bytes()?;
        Ok::<_, ApiError>((staged.file_name().to_string(), bytes))
    })
    .await??;

    tracing::info!(format = format.extension(), size_bytes = bytes.len(), "report exported");

    let disposition = format!("attachment; filename=\"{}\"", header_safe(&file_name));
    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        bytes,
    )
        .into_response())
}

/// Patient names go into a quoted header parameter; anything outside
/// printable ASCII, and the quote and backslash themselves, become `_`.
fn header_safe(file_name: &str) -> String {
    file_name
        .chars()
        .map(|c| match c {
            '"' | '\\' => '_',
            ' '..='~' => c,
            _ => '_',
        })
        .collect()
}
