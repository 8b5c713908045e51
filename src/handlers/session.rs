//! Session cookie extraction and session-scoped rendering.

use askama::Template;
use axum::extract::FromRequestParts;
use axum::http::request::Parts;
use axum::response::{Html, IntoResponse, Response};
use axum_extra::extract::CookieJar;

use super::SESSION_ERROR_HTML;
use crate::config::SESSION_COOKIE_NAME;
use crate::player::LessonPlayer;
use crate::state::AppState;

/// Session id from the `sv_session` cookie, if any.
///
/// Never rejects: handlers decide how to treat a missing session.
pub struct LessonSession(pub Option<String>);

impl FromRequestParts<AppState> for LessonSession {
  type Rejection = std::convert::Infallible;

  async fn from_request_parts(
    parts: &mut Parts,
    state: &AppState,
  ) -> Result<Self, Self::Rejection> {
    let jar = CookieJar::from_request_parts(parts, state).await?;
    Ok(LessonSession(
      jar.get(SESSION_COOKIE_NAME).map(|c| c.value().to_string()),
    ))
  }
}

/// Partial shown when the session is missing or has expired.
#[derive(Template)]
#[template(path = "session_expired.html")]
pub struct SessionExpiredTemplate {}

pub fn expired_response() -> Response {
  Html(SessionExpiredTemplate {}.render().unwrap_or_default()).into_response()
}

/// Run `f` against the session's player and return the HTML it renders.
///
/// The store lock is held only while `f` runs; nothing awaits inside.
pub fn in_session(
  state: &AppState,
  session: LessonSession,
  f: impl FnOnce(&mut LessonPlayer) -> String,
) -> Response {
  let Some(session_id) = session.0 else {
    return expired_response();
  };

  match state.sessions.with_player(&session_id, f) {
    Ok(Some(html)) => Html(html).into_response(),
    Ok(None) => expired_response(),
    Err(e) => {
      tracing::error!("{}", e);
      Html(SESSION_ERROR_HTML.to_string()).into_response()
    }
  }
}
