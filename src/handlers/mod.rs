pub mod exercises;
pub mod lessons;
pub mod session;

use askama::Template;
use axum::extract::State;
use axum::response::Html;

use crate::filters;
use crate::state::AppState;

/// Shown when the session store lock is poisoned
pub const SESSION_ERROR_HTML: &str =
  "<div class=\"error\" data-testid=\"session-error\">Something went wrong. Please reload the lesson.</div>";

/// Log-and-continue helpers for results the handlers can survive without.
pub trait LogOnError<T> {
  /// Log the error at warn level and return None
  fn log_warn(self, context: &str) -> Option<T>;
  /// Log the error at warn level and return the default
  fn log_warn_default(self, context: &str) -> T
  where
    T: Default;
}

impl<T, E: std::fmt::Display> LogOnError<T> for std::result::Result<T, E> {
  fn log_warn(self, context: &str) -> Option<T> {
    match self {
      Ok(v) => Some(v),
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        None
      }
    }
  }

  fn log_warn_default(self, context: &str) -> T
  where
    T: Default,
  {
    match self {
      Ok(v) => v,
      Err(e) => {
        tracing::warn!("{}: {}", context, e);
        T::default()
      }
    }
  }
}

/// Summary of a lesson for the index page.
pub struct LessonSummary {
  pub id: String,
  pub number: u8,
  pub title: String,
  pub description: String,
  pub moment_count: usize,
  pub exercise_count: usize,
}

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate {
  pub lessons: Vec<LessonSummary>,
}

/// List all lessons.
pub async fn index(State(state): State<AppState>) -> Html<String> {
  let lessons = state
    .library
    .lessons()
    .iter()
    .map(|lesson| LessonSummary {
      id: lesson.id.clone(),
      number: lesson.number,
      title: lesson.title.clone(),
      description: lesson.description.clone().unwrap_or_default(),
      moment_count: lesson.moments.len(),
      exercise_count: lesson.exercise_count(),
    })
    .collect();

  Html(IndexTemplate { lessons }.render().unwrap_or_default())
}

/// Liveness probe.
pub async fn health() -> &'static str {
  "ok"
}

pub use exercises::{begin_drag, drop_on_blank, drop_on_pool, end_drag, hover, place, remove};
pub use lessons::{lesson_content, lesson_start, next_moment, toggle_guide};
