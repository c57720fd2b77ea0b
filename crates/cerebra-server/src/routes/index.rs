use axum::extract::State;
use axum::response::Html;
use axum_extra::extract::cookie::CookieJar;

use crate::error::ApiError;
use crate::page;
use crate::state::AppState;

/// Render the page. The pending notice is shown once and dropped.
pub async fn show_page(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Html<String>), ApiError> {
    let (jar, session_id) = state.sessions.identify(jar);
    let (current, notice) = state
        .sessions
        .update(session_id, |current| {
            let (next, notice) = current.take_notice();
            Ok::<_, ApiError>((next.clone(), (next, notice)))
        })
        .await?;

    let html = page::render(&state.templates, &current, notice.as_ref())?;
    Ok((jar, Html(html)))
}
