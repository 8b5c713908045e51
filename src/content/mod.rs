//! Lesson content.
//!
//! # Layout
//!
//! - Lessons: `{content_dir}/lesson_01.json`, `lesson_02.json`, ...
//! - Each lesson holds ordered moments (`fill_sentence`, `reading`)
//!
//! Content is loaded once at startup, validated, and shared read-only
//! between sessions.

pub mod lessons;

pub use lessons::{
  load_lessons, ContentLoadError, FillSentenceMoment, Lesson, LessonLibrary, LessonMoment,
  ReadingMoment,
};
