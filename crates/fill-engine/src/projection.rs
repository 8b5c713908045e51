//! Render projection: engine state to view model.
//!
//! Pure functions, safe to call on every paint.

use serde::{Deserialize, Serialize};

use crate::completion::Completion;
use crate::engine::{BlankRef, DragContext, FillEngine};
use crate::sentence::{Blank, Segment, Sentence};

/// Visual category of a single blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BlankState {
    Empty,
    /// A drag is hovering over this blank
    HoverPreview,
    /// Filled, feedback deferred until every blank is filled
    Pending,
    Correct,
    Incorrect,
}

impl BlankState {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::HoverPreview => "hover",
            Self::Pending => "pending",
            Self::Correct => "correct",
            Self::Incorrect => "incorrect",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SegmentView {
    Text {
        content: String,
    },
    Blank {
        index: usize,
        word: Option<String>,
        state: BlankState,
    },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentenceView {
    pub id: String,
    pub segments: Vec<SegmentView>,
    pub is_complete: bool,
    pub is_all_correct: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExerciseView {
    /// False renders the "not configured yet" placeholder
    pub configured: bool,
    pub sentences: Vec<SentenceView>,
    pub pool: Vec<String>,
    pub dragged_word: Option<String>,
    /// Whether correctness is currently shown
    pub reveal_feedback: bool,
    pub completion: Completion,
}

/// Classify one blank.
///
/// `reveal` is true when feedback is immediate or every blank is filled.
pub fn project_blank(
    blank: &Blank,
    at: &BlankRef,
    drag: Option<&DragContext>,
    reveal: bool,
) -> BlankState {
    if drag.and_then(|d| d.hover.as_ref()) == Some(at) {
        return BlankState::HoverPreview;
    }
    match blank.is_correct {
        None => BlankState::Empty,
        Some(_) if !reveal => BlankState::Pending,
        Some(true) => BlankState::Correct,
        Some(false) => BlankState::Incorrect,
    }
}

pub fn project_sentence(sentence: &Sentence, drag: Option<&DragContext>, reveal: bool) -> SentenceView {
    let mut blank_index = 0;
    let segments = sentence
        .segments
        .iter()
        .map(|segment| match segment {
            Segment::Text { content } => SegmentView::Text {
                content: content.clone(),
            },
            Segment::Blank(blank) => {
                let at = BlankRef::new(sentence.id.clone(), blank_index);
                blank_index += 1;
                SegmentView::Blank {
                    index: at.blank_index,
                    word: blank.filled_word.clone(),
                    state: project_blank(blank, &at, drag, reveal),
                }
            }
        })
        .collect();

    SentenceView {
        id: sentence.id.clone(),
        segments,
        is_complete: sentence.is_complete(),
        is_all_correct: sentence.is_all_correct(),
    }
}

pub fn project(engine: &FillEngine) -> ExerciseView {
    let completion = engine.completion();
    let reveal = engine.show_immediate_feedback() || completion.all_complete;
    let drag = engine.drag();

    ExerciseView {
        configured: engine.is_configured(),
        sentences: engine
            .sentences()
            .iter()
            .map(|s| project_sentence(s, drag, reveal))
            .collect(),
        pool: engine.pool().words().to_vec(),
        dragged_word: drag.map(|d| d.dragged_word.clone()),
        reveal_feedback: reveal,
        completion,
    }
}

impl FillEngine {
    pub fn view(&self) -> ExerciseView {
        project(self)
    }
}
