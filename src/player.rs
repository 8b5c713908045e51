//! Lesson player: walks a lesson's moments in order.
//!
//! The player owns the engine for the current moment and rebuilds it from
//! scratch whenever the moment changes. Advancing is gated on the moment's
//! progression signal.

use std::sync::Arc;

use fill_engine::FillEngine;
use rand::SeedableRng;
use rand::rngs::StdRng;

use crate::content::{Lesson, LessonMoment};

/// Visibility of the current moment's guide.
///
/// Reopening the guide goes through the player that owns it instead of a
/// page-global callback.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GuideState {
  text: Option<String>,
  visible: bool,
}

impl GuideState {
  fn for_moment(moment: &LessonMoment) -> Self {
    let text = moment.guide().map(str::to_string);
    // Shown once on arrival; reopened on request
    let visible = text.is_some();
    Self { text, visible }
  }

  pub fn text(&self) -> Option<&str> {
    self.text.as_deref()
  }

  pub fn is_visible(&self) -> bool {
    self.visible && self.text.is_some()
  }

  pub fn show(&mut self) -> bool {
    self.visible = self.text.is_some();
    self.visible
  }

  pub fn hide(&mut self) {
    self.visible = false;
  }
}

/// Live state of the current moment.
#[derive(Debug)]
enum MomentState {
  Fill(FillEngine),
  Reading,
  Finished,
}

/// Result of asking the player to move on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
  /// The current moment does not allow progress yet
  Blocked,
  /// Moved to the next moment
  Moved,
  /// Passed the last moment
  Finished,
}

#[derive(Debug)]
pub struct LessonPlayer {
  lesson: Arc<Lesson>,
  index: usize,
  state: MomentState,
  guide: GuideState,
  rng: StdRng,
}

impl LessonPlayer {
  pub fn new(lesson: Arc<Lesson>) -> Self {
    Self::with_rng(lesson, StdRng::from_rng(&mut rand::rng()))
  }

  /// Create a player with a fixed RNG (pool shuffles become reproducible).
  pub fn with_rng(lesson: Arc<Lesson>, rng: StdRng) -> Self {
    let mut player = Self {
      lesson,
      index: 0,
      state: MomentState::Finished,
      guide: GuideState::default(),
      rng,
    };
    player.load_moment(0);
    player
  }

  pub fn seeded(lesson: Arc<Lesson>, seed: u64) -> Self {
    Self::with_rng(lesson, StdRng::seed_from_u64(seed))
  }

  pub fn lesson(&self) -> &Lesson {
    &self.lesson
  }

  /// Zero-based index of the current moment.
  pub fn index(&self) -> usize {
    self.index
  }

  pub fn moment_count(&self) -> usize {
    self.lesson.moments.len()
  }

  pub fn current_moment(&self) -> Option<&LessonMoment> {
    match self.state {
      MomentState::Finished => None,
      _ => self.lesson.moments.get(self.index),
    }
  }

  pub fn engine(&self) -> Option<&FillEngine> {
    match &self.state {
      MomentState::Fill(engine) => Some(engine),
      _ => None,
    }
  }

  pub fn engine_mut(&mut self) -> Option<&mut FillEngine> {
    match &mut self.state {
      MomentState::Fill(engine) => Some(engine),
      _ => None,
    }
  }

  pub fn is_finished(&self) -> bool {
    matches!(self.state, MomentState::Finished)
  }

  /// Whether the "continue" control should be offered.
  pub fn can_progress(&self) -> bool {
    match &self.state {
      MomentState::Fill(engine) => engine.can_progress(),
      MomentState::Reading => true,
      MomentState::Finished => false,
    }
  }

  /// The learner pressed "continue".
  pub fn next(&mut self) -> Advance {
    if !self.can_progress() {
      return Advance::Blocked;
    }

    let next = self.index + 1;
    self.load_moment(next);
    if self.is_finished() {
      tracing::debug!(lesson = %self.lesson.id, "lesson finished");
      Advance::Finished
    } else {
      Advance::Moved
    }
  }

  pub fn guide(&self) -> &GuideState {
    &self.guide
  }

  pub fn guide_mut(&mut self) -> &mut GuideState {
    &mut self.guide
  }

  /// Discard the current moment's state and build the one at `index`.
  fn load_moment(&mut self, index: usize) {
    let lesson = Arc::clone(&self.lesson);
    let moment = lesson.moments.get(index);
    self.index = index.min(lesson.moments.len());

    self.state = match moment {
      Some(LessonMoment::FillSentence(m)) => {
        MomentState::Fill(FillEngine::new(&m.exercise, &mut self.rng))
      }
      Some(LessonMoment::Reading(_)) => MomentState::Reading,
      None => MomentState::Finished,
    };
    self.guide = moment.map(GuideState::for_moment).unwrap_or_default();

    if let Some(moment) = moment {
      tracing::debug!(lesson = %lesson.id, index, kind = moment.as_str(), "moment loaded");
    }
  }
}
