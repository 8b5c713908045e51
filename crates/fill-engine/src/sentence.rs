//! Sentence and segment types.
//!
//! A sentence is an ordered list of segments. Blank identity inside a
//! sentence is positional: the Nth [`Segment::Blank`] from the left is
//! blank index N.

use serde::{Deserialize, Serialize};

/// A fillable slot in a sentence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blank {
    /// The word that belongs here (trimmed at parse time)
    pub expected_answer: String,
    /// The word currently placed, if any
    pub filled_word: Option<String>,
    /// `Some(filled == expected)` while filled, `None` while empty
    pub is_correct: Option<bool>,
}

impl Blank {
    pub fn new(expected_answer: impl Into<String>) -> Self {
        Self {
            expected_answer: expected_answer.into(),
            filled_word: None,
            is_correct: None,
        }
    }

    pub fn is_filled(&self) -> bool {
        self.filled_word.is_some()
    }

    /// Place `word`, returning the word it displaced.
    pub fn fill(&mut self, word: String) -> Option<String> {
        // Exact, case-sensitive comparison
        self.is_correct = Some(word == self.expected_answer);
        self.filled_word.replace(word)
    }

    /// Empty the blank, returning the word it held.
    pub fn clear(&mut self) -> Option<String> {
        self.is_correct = None;
        self.filled_word.take()
    }
}

/// A parsed unit of a sentence template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Segment {
    /// Literal, unselectable text
    Text { content: String },
    /// A slot awaiting a word
    Blank(Blank),
}

impl Segment {
    pub fn text(content: impl Into<String>) -> Self {
        Self::Text {
            content: content.into(),
        }
    }

    pub fn blank(expected_answer: impl Into<String>) -> Self {
        Self::Blank(Blank::new(expected_answer))
    }

    pub fn as_blank(&self) -> Option<&Blank> {
        match self {
            Self::Blank(blank) => Some(blank),
            Self::Text { .. } => None,
        }
    }
}

/// A sentence with its parsed segments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sentence {
    pub id: String,
    pub segments: Vec<Segment>,
}

impl Sentence {
    pub fn new(id: impl Into<String>, segments: Vec<Segment>) -> Self {
        Self {
            id: id.into(),
            segments,
        }
    }

    /// Blanks in left-to-right order.
    pub fn blanks(&self) -> impl Iterator<Item = &Blank> {
        self.segments.iter().filter_map(Segment::as_blank)
    }

    pub fn blank_count(&self) -> usize {
        self.blanks().count()
    }

    pub fn blank(&self, index: usize) -> Option<&Blank> {
        self.blanks().nth(index)
    }

    pub fn blank_mut(&mut self, index: usize) -> Option<&mut Blank> {
        self.segments
            .iter_mut()
            .filter_map(|segment| match segment {
                Segment::Blank(blank) => Some(blank),
                Segment::Text { .. } => None,
            })
            .nth(index)
    }

    /// Every blank holds a word. Vacuously true without blanks.
    pub fn is_complete(&self) -> bool {
        self.blanks().all(Blank::is_filled)
    }

    /// Every blank holds its expected word. Vacuously true without blanks.
    pub fn is_all_correct(&self) -> bool {
        self.blanks().all(|blank| blank.is_correct == Some(true))
    }

    /// Words currently placed in this sentence.
    pub fn placed_words(&self) -> impl Iterator<Item = &str> {
        self.blanks().filter_map(|blank| blank.filled_word.as_deref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Sentence {
        Sentence::new(
            "s1",
            vec![
                Segment::text("Jag "),
                Segment::blank("har"),
                Segment::text(" en "),
                Segment::blank("katt"),
            ],
        )
    }

    #[test]
    fn test_blank_fill_sets_correctness() {
        let mut blank = Blank::new("stora");
        assert_eq!(blank.fill("lilla".to_string()), None);
        assert_eq!(blank.is_correct, Some(false));

        assert_eq!(blank.fill("stora".to_string()), Some("lilla".to_string()));
        assert_eq!(blank.is_correct, Some(true));
    }

    #[test]
    fn test_blank_match_is_case_sensitive() {
        let mut blank = Blank::new("Stora");
        blank.fill("stora".to_string());
        assert_eq!(blank.is_correct, Some(false));
    }

    #[test]
    fn test_blank_clear_resets_both_fields() {
        let mut blank = Blank::new("katt");
        blank.fill("katt".to_string());
        assert_eq!(blank.clear(), Some("katt".to_string()));
        assert_eq!(blank.filled_word, None);
        assert_eq!(blank.is_correct, None);
        assert_eq!(blank.clear(), None);
    }

    #[test]
    fn test_blank_indexing_is_positional() {
        let sentence = sample();
        assert_eq!(sentence.blank_count(), 2);
        assert_eq!(sentence.blank(0).unwrap().expected_answer, "har");
        assert_eq!(sentence.blank(1).unwrap().expected_answer, "katt");
        assert!(sentence.blank(2).is_none());
    }

    #[test]
    fn test_sentence_predicates() {
        let mut sentence = sample();
        assert!(!sentence.is_complete());
        assert!(!sentence.is_all_correct());

        sentence.blank_mut(0).unwrap().fill("har".to_string());
        sentence.blank_mut(1).unwrap().fill("hund".to_string());
        assert!(sentence.is_complete());
        assert!(!sentence.is_all_correct());

        sentence.blank_mut(1).unwrap().fill("katt".to_string());
        assert!(sentence.is_all_correct());
        assert_eq!(sentence.placed_words().collect::<Vec<_>>(), vec!["har", "katt"]);
    }

    #[test]
    fn test_sentence_without_blanks_is_vacuously_complete() {
        let sentence = Sentence::new("s", vec![Segment::text("Hej!")]);
        assert!(sentence.is_complete());
        assert!(sentence.is_all_correct());
    }

    #[test]
    fn test_segment_serializes_with_kind_tag() {
        let json = serde_json::to_string(&Segment::blank("stora")).unwrap();
        assert!(json.contains("\"kind\":\"blank\""));
        assert!(json.contains("\"expected_answer\":\"stora\""));
    }
}
