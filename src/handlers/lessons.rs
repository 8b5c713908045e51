//! Lesson handlers: starting a lesson, moving between moments, guides.

use askama::Template;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Json, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use serde::Deserialize;

use super::exercises::render_fill_sentence;
use super::session::{in_session, LessonSession};
use super::{LogOnError, SESSION_ERROR_HTML};
use crate::config::SESSION_COOKIE_NAME;
use crate::content::LessonMoment;
use crate::filters;
use crate::player::{Advance, LessonPlayer};
use crate::state::AppState;

/// Full lesson page wrapping the current moment.
#[derive(Template)]
#[template(path = "lesson.html")]
pub struct LessonPageTemplate {
  pub lesson_id: String,
  pub lesson_title: String,
  pub moment_html: String,
}

/// HTMX partial for a reading moment.
#[derive(Template)]
#[template(path = "exercises/reading.html")]
pub struct ReadingTemplate {
  pub title: String,
  pub paragraphs: Vec<String>,
  pub position: usize,
  pub moment_count: usize,
  pub guide_text: String,
  pub guide_visible: bool,
}

/// HTMX partial shown after the last moment.
#[derive(Template)]
#[template(path = "exercises/lesson_complete.html")]
pub struct LessonCompleteTemplate {
  pub lesson_title: String,
  pub exercise_count: usize,
}

/// Render whatever the player is currently on.
pub fn render_moment(player: &LessonPlayer) -> String {
  match (player.current_moment(), player.engine()) {
    (Some(LessonMoment::FillSentence(moment)), Some(engine)) => {
      render_fill_sentence(player, moment, engine)
    }
    (Some(LessonMoment::Reading(moment)), _) => ReadingTemplate {
      title: moment.title.clone(),
      paragraphs: moment
        .body
        .split("\n\n")
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .map(str::to_string)
        .collect(),
      position: player.index() + 1,
      moment_count: player.moment_count(),
      guide_text: player.guide().text().unwrap_or_default().to_string(),
      guide_visible: player.guide().is_visible(),
    }
    .render()
    .unwrap_or_default(),
    _ => LessonCompleteTemplate {
      lesson_title: player.lesson().title.clone(),
      exercise_count: player.lesson().exercise_count(),
    }
    .render()
    .unwrap_or_default(),
  }
}

/// Start (or restart) a lesson in a fresh session.
pub async fn lesson_start(
  State(state): State<AppState>,
  session: LessonSession,
  jar: CookieJar,
  Path(lesson_id): Path<String>,
) -> Response {
  let Some(lesson) = state.library.get(&lesson_id) else {
    tracing::debug!("Unknown lesson {}", lesson_id);
    return Redirect::to("/").into_response();
  };

  // Restarting discards the previous session outright
  if let Some(old) = session.0 {
    state.sessions.remove(&old).log_warn("Failed to drop previous session");
  }

  let player = LessonPlayer::new(lesson.clone());
  let moment_html = render_moment(&player);

  let session_id = match state.sessions.create(player) {
    Ok(id) => id,
    Err(e) => {
      tracing::error!("{}", e);
      return Html(SESSION_ERROR_HTML.to_string()).into_response();
    }
  };
  tracing::info!(lesson = %lesson.id, "Lesson started");

  let cookie = Cookie::build((SESSION_COOKIE_NAME, session_id))
    .path("/")
    .http_only(true)
    .same_site(SameSite::Lax)
    .max_age(time::Duration::minutes(state.sessions.expiry_minutes()));

  let template = LessonPageTemplate {
    lesson_id: lesson.id.clone(),
    lesson_title: lesson.title.clone(),
    moment_html,
  };

  (jar.add(cookie), Html(template.render().unwrap_or_default())).into_response()
}

/// Lesson definition as JSON, for the offline exercise module.
pub async fn lesson_content(
  State(state): State<AppState>,
  Path(lesson_id): Path<String>,
) -> Response {
  match state.library.get(&lesson_id) {
    Some(lesson) => Json(lesson.as_ref().clone()).into_response(),
    None => (StatusCode::NOT_FOUND, "Lesson not found").into_response(),
  }
}

/// The learner pressed "continue".
pub async fn next_moment(State(state): State<AppState>, session: LessonSession) -> Response {
  in_session(&state, session, |player| {
    let advance = player.next();
    if advance == Advance::Blocked {
      tracing::debug!(lesson = %player.lesson().id, "Continue pressed before moment was done");
    }
    render_moment(player)
  })
}

/// Form data for showing or hiding the guide.
#[derive(Deserialize)]
pub struct GuideForm {
  pub visible: bool,
}

pub async fn toggle_guide(
  State(state): State<AppState>,
  session: LessonSession,
  Form(form): Form<GuideForm>,
) -> Response {
  in_session(&state, session, |player| {
    if form.visible {
      player.guide_mut().show();
    } else {
      player.guide_mut().hide();
    }
    render_moment(player)
  })
}
