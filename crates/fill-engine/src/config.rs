//! Exercise configuration and boundary validation.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::template::parse_template;

/// One sentence template, e.g. `"Den [stora] hunden sprang"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceConfig {
    pub id: String,
    #[serde(alias = "rawText")]
    pub raw_text: String,
}

impl SentenceConfig {
    pub fn new(id: impl Into<String>, raw_text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            raw_text: raw_text.into(),
        }
    }
}

/// Behaviour switches shared by every blank-filling exercise variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineOptions {
    /// Dragging a placed word onto another filled blank swaps the two words.
    /// When off, the displaced word goes back to the pool instead.
    pub allow_swap: bool,
    /// Progression requires every blank to be correct, not just filled.
    pub gate_on_all_correct: bool,
}

impl Default for EngineOptions {
    fn default() -> Self {
        Self {
            allow_swap: true,
            gate_on_all_correct: true,
        }
    }
}

/// Input for one exercise instance. Immutable for the engine's lifetime.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseConfig {
    pub sentences: Vec<SentenceConfig>,
    #[serde(default)]
    pub distractors: Vec<String>,
    #[serde(default, alias = "showImmediateFeedback")]
    pub show_immediate_feedback: bool,
    #[serde(default)]
    pub options: EngineOptions,
}

/// Rejected exercise configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("exercise has no sentences")]
    NoSentences,
    #[error("sentence #{0} has an empty id")]
    EmptySentenceId(usize),
    #[error("duplicate sentence id '{0}'")]
    DuplicateSentenceId(String),
    #[error("sentence '{0}' has a blank with an empty answer")]
    EmptyAnswer(String),
    #[error("answer '{0}' is used by more than one blank")]
    RepeatedAnswer(String),
    #[error("distractor '{0}' is also a correct answer")]
    DistractorCollidesWithAnswer(String),
    #[error("distractor '{0}' is listed more than once")]
    DuplicateDistractor(String),
}

impl ExerciseConfig {
    pub fn new(sentences: Vec<SentenceConfig>, distractors: Vec<String>) -> Self {
        Self {
            sentences,
            distractors,
            ..Self::default()
        }
    }

    pub fn with_immediate_feedback(mut self, show: bool) -> Self {
        self.show_immediate_feedback = show;
        self
    }

    pub fn with_options(mut self, options: EngineOptions) -> Self {
        self.options = options;
        self
    }

    /// Check the configuration where it enters the system.
    ///
    /// The engine itself accepts anything; this catches content mistakes
    /// that would otherwise give ambiguous pools. The pool holds every
    /// answer once, so an answer shared by two blanks could never fill
    /// both and is rejected along with distractors that copy an answer.
    /// Every accepted config can be completed.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sentences.is_empty() {
            return Err(ConfigError::NoSentences);
        }

        let mut ids = HashSet::new();
        let mut answers = HashSet::new();
        for (idx, sentence) in self.sentences.iter().enumerate() {
            if sentence.id.is_empty() {
                return Err(ConfigError::EmptySentenceId(idx));
            }
            if !ids.insert(sentence.id.as_str()) {
                return Err(ConfigError::DuplicateSentenceId(sentence.id.clone()));
            }
            for segment in parse_template(&sentence.raw_text) {
                if let Some(blank) = segment.as_blank() {
                    if blank.expected_answer.is_empty() {
                        return Err(ConfigError::EmptyAnswer(sentence.id.clone()));
                    }
                    if !answers.insert(blank.expected_answer.clone()) {
                        return Err(ConfigError::RepeatedAnswer(blank.expected_answer.clone()));
                    }
                }
            }
        }

        let mut seen = HashSet::new();
        for distractor in &self.distractors {
            if answers.contains(distractor) {
                return Err(ConfigError::DistractorCollidesWithAnswer(distractor.clone()));
            }
            if !seen.insert(distractor.as_str()) {
                return Err(ConfigError::DuplicateDistractor(distractor.clone()));
            }
        }

        Ok(())
    }
}
