//! Shared fixtures for HTTP tests.

use std::fs;
use std::path::Path;

use axum_test::TestServer;
use tempfile::TempDir;

use sv_notebook::content::load_lessons;
use sv_notebook::router::build_router;
use sv_notebook::session::SessionStore;
use sv_notebook::state::AppState;

/// Reading moment, then one deferred-feedback exercise.
pub const ADJECTIVE_LESSON: &str = r#"{
  "id": "adjektiv-1",
  "title": "Adjektiv",
  "description": "Bestämd form",
  "moments": [
    {
      "type": "reading",
      "title": "Den stora hunden",
      "body": "En stor hund.\n\nDen stora hunden.",
      "guide": "Titta på ordet före substantivet."
    },
    {
      "type": "fill_sentence",
      "instructions": "Dra rätt ord till luckan.",
      "exercise": {
        "sentences": [
          {"id": "s1", "raw_text": "Den [stora] hunden sprang"},
          {"id": "s2", "raw_text": "Det [lilla] huset"}
        ],
        "distractors": ["stor"]
      }
    }
  ]
}"#;

/// A single exercise with immediate feedback.
pub const VERB_LESSON: &str = r#"{
  "id": "verb-1",
  "title": "Verb",
  "moments": [
    {
      "type": "fill_sentence",
      "exercise": {
        "sentences": [
          {"id": "v1", "raw_text": "Hon [springer] hem"},
          {"id": "v2", "raw_text": "Han [äter] lunch"}
        ],
        "distractors": ["sprang"],
        "show_immediate_feedback": true
      }
    }
  ]
}"#;

/// Lesson directory plus a server built from it.
///
/// The directory is kept alive for as long as the environment is.
pub struct TestEnv {
  pub temp: TempDir,
  pub server: TestServer,
}

impl TestEnv {
  pub fn new() -> Self {
    let temp = TempDir::new().unwrap();
    write_lesson(temp.path(), "lesson_01.json", ADJECTIVE_LESSON);
    write_lesson(temp.path(), "lesson_02.json", VERB_LESSON);

    let library = load_lessons(temp.path()).unwrap();
    let state = AppState::new(library, SessionStore::new(60));
    let server = TestServer::builder()
      .save_cookies()
      .build(build_router(state))
      .unwrap();

    Self { temp, server }
  }
}

fn write_lesson(dir: &Path, name: &str, json: &str) {
  fs::write(dir.join(name), json).unwrap();
}

/// Count rendered blanks in a given state.
pub fn blanks_in_state(html: &str, state: &str) -> usize {
  html.matches(&format!("data-state=\"{}\"", state)).count()
}
