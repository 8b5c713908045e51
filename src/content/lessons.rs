//! Lesson loading and types.
//!
//! Lessons are JSON files in the content directory, one lesson per file,
//! named `lesson_01.json`, `lesson_02.json`, etc. Each lesson is a list of
//! moments: exercises and reading passages played in order.

use fill_engine::{ConfigError, ExerciseConfig};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::Arc;
use unicode_normalization::UnicodeNormalization;

/// A fill-in-the-blank exercise moment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FillSentenceMoment {
  #[serde(default)]
  pub title: Option<String>,
  /// Short instruction shown above the sentences
  #[serde(default)]
  pub instructions: Option<String>,
  /// Longer explanation the learner can reopen at any time
  #[serde(default)]
  pub guide: Option<String>,
  pub exercise: ExerciseConfig,
}

/// A reading passage. Always allows the learner to continue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReadingMoment {
  pub title: String,
  pub body: String,
  #[serde(default)]
  pub guide: Option<String>,
}

/// One step of a lesson, keyed by `type` in JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LessonMoment {
  FillSentence(FillSentenceMoment),
  Reading(ReadingMoment),
}

impl LessonMoment {
  pub fn as_str(&self) -> &'static str {
    match self {
      Self::FillSentence(_) => "fill_sentence",
      Self::Reading(_) => "reading",
    }
  }

  pub fn guide(&self) -> Option<&str> {
    match self {
      Self::FillSentence(m) => m.guide.as_deref(),
      Self::Reading(m) => m.guide.as_deref(),
    }
  }
}

/// A lesson definition (from content JSON).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lesson {
  /// Unique lesson ID (e.g., "adjektiv-1")
  pub id: String,
  /// Lesson number, taken from the filename when absent
  #[serde(default)]
  pub number: u8,
  pub title: String,
  #[serde(default)]
  pub description: Option<String>,
  pub moments: Vec<LessonMoment>,
}

impl Lesson {
  pub fn exercise_count(&self) -> usize {
    self
      .moments
      .iter()
      .filter(|m| matches!(m, LessonMoment::FillSentence(_)))
      .count()
  }

  /// Rewrite every learner-visible string into Unicode NFC.
  ///
  /// Answers are matched byte-for-byte, so "å" typed as a+ring must
  /// compare equal to the precomposed form.
  pub fn normalize(&mut self) {
    nfc(&mut self.title);
    nfc_opt(&mut self.description);
    for moment in &mut self.moments {
      match moment {
        LessonMoment::FillSentence(m) => {
          nfc_opt(&mut m.title);
          nfc_opt(&mut m.instructions);
          nfc_opt(&mut m.guide);
          for sentence in &mut m.exercise.sentences {
            nfc(&mut sentence.raw_text);
          }
          m.exercise.distractors.iter_mut().for_each(nfc);
        }
        LessonMoment::Reading(m) => {
          nfc(&mut m.title);
          nfc(&mut m.body);
          nfc_opt(&mut m.guide);
        }
      }
    }
  }
}

fn nfc(s: &mut String) {
  *s = s.nfc().collect();
}

fn nfc_opt(s: &mut Option<String>) {
  if let Some(s) = s {
    nfc(s);
  }
}

/// Error loading lessons.
#[derive(Debug)]
pub enum ContentLoadError {
  IoError(String),
  ParseError(String),
  InvalidLesson(String),
}

impl std::fmt::Display for ContentLoadError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      ContentLoadError::IoError(e) => write!(f, "IO error: {}", e),
      ContentLoadError::ParseError(e) => write!(f, "Parse error: {}", e),
      ContentLoadError::InvalidLesson(e) => write!(f, "Invalid lesson: {}", e),
    }
  }
}

impl std::error::Error for ContentLoadError {}

/// All lessons available to learners, sorted by number.
#[derive(Debug, Clone, Default)]
pub struct LessonLibrary {
  lessons: Vec<Arc<Lesson>>,
}

impl LessonLibrary {
  /// Build a library, dropping lessons whose id was already seen.
  pub fn from_lessons(lessons: Vec<Lesson>) -> Self {
    let mut kept: Vec<Arc<Lesson>> = Vec::with_capacity(lessons.len());
    for lesson in lessons {
      if kept.iter().any(|l| l.id == lesson.id) {
        tracing::warn!("Skipping duplicate lesson id {}", lesson.id);
        continue;
      }
      kept.push(Arc::new(lesson));
    }
    kept.sort_by_key(|l| l.number);
    Self { lessons: kept }
  }

  pub fn get(&self, id: &str) -> Option<Arc<Lesson>> {
    self.lessons.iter().find(|l| l.id == id).cloned()
  }

  pub fn lessons(&self) -> &[Arc<Lesson>] {
    &self.lessons
  }

  pub fn len(&self) -> usize {
    self.lessons.len()
  }

  pub fn is_empty(&self) -> bool {
    self.lessons.is_empty()
  }
}

/// Load every lesson file in `dir`.
///
/// A missing directory yields an empty library. Files that fail to parse
/// or validate are logged and skipped so one bad lesson does not take the
/// rest down.
pub fn load_lessons(dir: &Path) -> Result<LessonLibrary, ContentLoadError> {
  if !dir.is_dir() {
    tracing::warn!("Lesson directory {} not found", dir.display());
    return Ok(LessonLibrary::default());
  }

  let entries = fs::read_dir(dir).map_err(|e| ContentLoadError::IoError(e.to_string()))?;

  let mut lessons = Vec::new();
  for entry in entries.flatten() {
    let path = entry.path();

    // Skip non-JSON files
    if path.extension().and_then(|e| e.to_str()) != Some("json") {
      continue;
    }

    let filename = path.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    let Some(num) = parse_lesson_number(filename) else {
      continue;
    };

    match load_lesson_file(&path) {
      Ok(mut lesson) => {
        if lesson.number == 0 {
          lesson.number = num;
        }
        lessons.push(lesson);
      }
      Err(e) => {
        tracing::warn!("Failed to load lesson from {}: {}", path.display(), e);
      }
    }
  }

  let library = LessonLibrary::from_lessons(lessons);
  tracing::info!("Loaded {} lessons from {}", library.len(), dir.display());
  Ok(library)
}

/// Parse lesson number from filename (e.g., "lesson_01" -> Some(1))
fn parse_lesson_number(filename: &str) -> Option<u8> {
  if let Some(num_str) = filename.strip_prefix("lesson_") {
    return num_str.parse().ok();
  }
  if let Some(num_str) = filename.strip_prefix("lesson") {
    return num_str.parse().ok();
  }
  None
}

/// Load, normalize, and validate a single lesson file.
fn load_lesson_file(path: &Path) -> Result<Lesson, ContentLoadError> {
  let content = fs::read_to_string(path).map_err(|e| ContentLoadError::IoError(e.to_string()))?;

  let mut lesson: Lesson = serde_json::from_str(&content)
    .map_err(|e| ContentLoadError::ParseError(format!("{}: {}", path.display(), e)))?;

  lesson.normalize();
  validate_lesson(&lesson)?;
  Ok(lesson)
}

/// Validate a lesson definition.
pub fn validate_lesson(lesson: &Lesson) -> Result<(), ContentLoadError> {
  if lesson.id.is_empty() {
    return Err(ContentLoadError::InvalidLesson("Lesson missing ID".to_string()));
  }
  if lesson.moments.is_empty() {
    return Err(ContentLoadError::InvalidLesson(format!(
      "Lesson {} has no moments",
      lesson.id
    )));
  }

  for (idx, moment) in lesson.moments.iter().enumerate() {
    if let LessonMoment::FillSentence(m) = moment {
      m.exercise
        .validate()
        .map_err(|e: ConfigError| {
          ContentLoadError::InvalidLesson(format!("Lesson {} moment {}: {}", lesson.id, idx + 1, e))
        })?;
    }
  }

  Ok(())
}
