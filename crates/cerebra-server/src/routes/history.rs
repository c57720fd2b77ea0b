use axum::Json;
use axum::extract::State;
use axum_extra::extract::cookie::CookieJar;

use cerebra_core::models::record::PatientRecord;

use crate::state::AppState;

/// The session's records in insertion order.
pub async fn list_history(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<Vec<PatientRecord>>) {
    let (jar, session_id) = state.sessions.identify(jar);
    let session = state.sessions.snapshot(session_id).await;
    (jar, Json(session.history().to_vec()))
}
