//! Application state shared by all handlers.

use std::sync::Arc;

use crate::content::LessonLibrary;
use crate::session::SessionStore;

/// Application state passed to all handlers
#[derive(Clone)]
pub struct AppState {
  /// Lessons loaded at startup (read-only)
  pub library: Arc<LessonLibrary>,

  /// Live lesson sessions
  pub sessions: SessionStore,
}

impl AppState {
  pub fn new(library: LessonLibrary, sessions: SessionStore) -> Self {
    Self {
      library: Arc::new(library),
      sessions,
    }
  }
}
