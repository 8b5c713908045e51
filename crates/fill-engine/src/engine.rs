//! Placement state machine.
//!
//! [`FillEngine`] is the only owner of mutations to blanks and to pool
//! membership. Every operation either applies completely or is ignored:
//! stray drag/drop events are expected on an interactive surface, so a
//! failed precondition returns `false` and logs at debug level instead
//! of erroring.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::completion::{Completion, evaluate};
use crate::config::{EngineOptions, ExerciseConfig};
use crate::pool::{WordPool, build_pool};
use crate::sentence::{Blank, Sentence};
use crate::template::parse_sentence;

/// Address of a blank: sentence id plus positional blank index.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BlankRef {
    pub sentence_id: String,
    pub blank_index: usize,
}

impl BlankRef {
    pub fn new(sentence_id: impl Into<String>, blank_index: usize) -> Self {
        Self {
            sentence_id: sentence_id.into(),
            blank_index,
        }
    }
}

/// Ephemeral drag state. Not part of the exercise's logical state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DragContext {
    pub dragged_word: String,
    /// Set when the drag started on a filled blank rather than the pool
    pub source: Option<BlankRef>,
    /// Blank currently under the pointer
    pub hover: Option<BlankRef>,
}

/// One live blank-filling exercise.
#[derive(Debug, Clone)]
pub struct FillEngine {
    sentences: Vec<Sentence>,
    pool: WordPool,
    drag: Option<DragContext>,
    show_immediate_feedback: bool,
    options: EngineOptions,
}

impl FillEngine {
    /// Parse every sentence and build the shuffled pool.
    ///
    /// The engine is rebuilt from scratch for each configuration; there is
    /// no incremental update path.
    pub fn new<R: Rng + ?Sized>(config: &ExerciseConfig, rng: &mut R) -> Self {
        let sentences: Vec<Sentence> = config
            .sentences
            .iter()
            .map(|s| parse_sentence(&s.id, &s.raw_text))
            .collect();
        let pool = build_pool(&sentences, &config.distractors, rng);

        tracing::debug!(
            sentences = sentences.len(),
            pool = pool.len(),
            "exercise initialised"
        );

        Self {
            sentences,
            pool,
            drag: None,
            show_immediate_feedback: config.show_immediate_feedback,
            options: config.options,
        }
    }

    /// False for an exercise created without sentences.
    pub fn is_configured(&self) -> bool {
        !self.sentences.is_empty()
    }

    pub fn sentences(&self) -> &[Sentence] {
        &self.sentences
    }

    pub fn sentence(&self, sentence_id: &str) -> Option<&Sentence> {
        self.sentences.iter().find(|s| s.id == sentence_id)
    }

    pub fn blank(&self, target: &BlankRef) -> Option<&Blank> {
        self.sentence(&target.sentence_id)?.blank(target.blank_index)
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn drag(&self) -> Option<&DragContext> {
        self.drag.as_ref()
    }

    pub fn options(&self) -> &EngineOptions {
        &self.options
    }

    pub fn show_immediate_feedback(&self) -> bool {
        self.show_immediate_feedback
    }

    /// Recomputed from the sentences on every call.
    pub fn completion(&self) -> Completion {
        evaluate(&self.sentences, &self.options)
    }

    pub fn can_progress(&self) -> bool {
        self.completion().can_progress
    }

    // ==================== User input entry points ====================

    /// Start dragging `word`, from the pool or from a filled blank.
    ///
    /// Replaces any drag already in progress. Ignored when the word is not
    /// where the caller claims it is.
    pub fn begin_drag(&mut self, word: impl Into<String>, source: Option<BlankRef>) -> bool {
        let word = word.into();
        let valid = match &source {
            None => self.pool.contains(&word),
            Some(src) => self.holds(src, &word),
        };

        if !valid {
            tracing::debug!(word = %word, source = ?source, "ignored drag start");
            self.drag = None;
            return false;
        }

        self.drag = Some(DragContext {
            dragged_word: word,
            source,
            hover: None,
        });
        true
    }

    /// Clear the drag, whether or not anything was dropped.
    pub fn end_drag(&mut self) {
        self.drag = None;
    }

    /// Track the blank under the pointer for hover previews.
    pub fn drag_over(&mut self, target: BlankRef) -> bool {
        if self.blank(&target).is_none() {
            return false;
        }
        match self.drag.as_mut() {
            Some(drag) => {
                drag.hover = Some(target);
                true
            }
            None => false,
        }
    }

    pub fn drag_leave(&mut self) {
        if let Some(drag) = self.drag.as_mut() {
            drag.hover = None;
        }
    }

    /// Drop the dragged word on a blank. Ends the drag.
    pub fn drop_on_blank(&mut self, sentence_id: &str, blank_index: usize) -> bool {
        let Some(drag) = self.drag.take() else {
            tracing::debug!(sentence_id, blank_index, "ignored drop without drag");
            return false;
        };

        let target = BlankRef::new(sentence_id, blank_index);
        match drag.source {
            None => self.place_from_pool(drag.dragged_word, &target),
            Some(source) => self.move_between(&source, &target, drag.dragged_word),
        }
    }

    /// Drop the dragged word back on the pool. Ends the drag.
    ///
    /// Only meaningful for words dragged out of a blank; dropping a pool
    /// word on the pool changes nothing.
    pub fn drop_on_pool(&mut self) -> bool {
        let Some(drag) = self.drag.take() else {
            return false;
        };
        match drag.source {
            Some(source) if self.holds(&source, &drag.dragged_word) => {
                self.remove_from_blank(&source.sentence_id, source.blank_index)
            }
            _ => false,
        }
    }

    /// Click path: place a pool word directly into a blank.
    pub fn place(&mut self, word: impl Into<String>, sentence_id: &str, blank_index: usize) -> bool {
        self.place_from_pool(word.into(), &BlankRef::new(sentence_id, blank_index))
    }

    /// Empty a filled blank and return its word to the pool.
    pub fn remove_from_blank(&mut self, sentence_id: &str, blank_index: usize) -> bool {
        let target = BlankRef::new(sentence_id, blank_index);
        let Some(word) = self.blank_mut(&target).and_then(Blank::clear) else {
            tracing::debug!(sentence_id, blank_index, "ignored remove on empty blank");
            return false;
        };
        self.pool.put_back(word);
        true
    }

    // ==================== Transitions ====================

    fn place_from_pool(&mut self, word: String, target: &BlankRef) -> bool {
        if self.blank(target).is_none() || !self.pool.contains(&word) {
            tracing::debug!(word = %word, target = ?target, "ignored placement");
            return false;
        }

        self.pool.take(&word);
        if let Some(displaced) = self.blank_mut(target).and_then(|blank| blank.fill(word)) {
            self.pool.put_back(displaced);
        }
        true
    }

    fn move_between(&mut self, source: &BlankRef, target: &BlankRef, word: String) -> bool {
        if source == target || self.blank(target).is_none() || !self.holds(source, &word) {
            tracing::debug!(source = ?source, target = ?target, "ignored move");
            return false;
        }

        let allow_swap = self.options.allow_swap;
        let displaced = self.blank_mut(target).and_then(|blank| blank.fill(word));

        // Source was checked by `holds`, so it exists
        let returned = match self.blank_mut(source) {
            Some(source_blank) => {
                source_blank.clear();
                match displaced {
                    Some(other) if allow_swap => source_blank.fill(other),
                    other => other,
                }
            }
            None => displaced,
        };

        if let Some(word) = returned {
            self.pool.put_back(word);
        }
        true
    }

    fn holds(&self, target: &BlankRef, word: &str) -> bool {
        self.blank(target)
            .and_then(|blank| blank.filled_word.as_deref())
            .is_some_and(|filled| filled == word)
    }

    fn blank_mut(&mut self, target: &BlankRef) -> Option<&mut Blank> {
        self.sentences
            .iter_mut()
            .find(|s| s.id == target.sentence_id)?
            .blank_mut(target.blank_index)
    }
}
