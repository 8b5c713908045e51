//! Aggregate score and progression gating.

use serde::{Deserialize, Serialize};

use crate::config::EngineOptions;
use crate::sentence::Sentence;

/// Correct blanks out of all blanks.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub correct: usize,
    pub total: usize,
}

impl Score {
    pub fn percentage(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        ((self.correct * 100) / self.total) as u8
    }
}

/// Read-only aggregates derived from the sentence list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Completion {
    pub score: Score,
    pub all_complete: bool,
    pub all_correct: bool,
    /// The signal the lesson player watches to expose "continue"
    pub can_progress: bool,
}

/// Evaluate completion over every sentence.
///
/// An empty sentence list is an unconfigured exercise and never progresses.
pub fn evaluate(sentences: &[Sentence], options: &EngineOptions) -> Completion {
    let mut score = Score::default();
    for blank in sentences.iter().flat_map(Sentence::blanks) {
        score.total += 1;
        if blank.is_correct == Some(true) {
            score.correct += 1;
        }
    }

    let all_complete = sentences.iter().all(Sentence::is_complete);
    let all_correct = sentences.iter().all(Sentence::is_all_correct);

    let can_progress = !sentences.is_empty()
        && all_complete
        && (all_correct || !options.gate_on_all_correct);

    Completion {
        score,
        all_complete,
        all_correct,
        can_progress,
    }
}
