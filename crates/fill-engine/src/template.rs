//! Sentence template parsing.
//!
//! Templates mark blanks with square brackets: `"Den [stora] hunden"`.
//! The bracket's inner text, trimmed, is the blank's expected answer.

use crate::sentence::{Segment, Sentence};

/// Parse a raw template into ordered segments.
///
/// Empty text runs are omitted. A `[` without a closing `]` is kept as
/// literal text, so malformed templates degrade to a trailing text segment.
pub fn parse_template(raw_text: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut rest = raw_text;

    while let Some(open) = rest.find('[') {
        let after_open = &rest[open + 1..];
        let Some(close) = after_open.find(']') else {
            break;
        };

        push_text(&mut segments, &rest[..open]);
        segments.push(Segment::blank(after_open[..close].trim()));
        rest = &after_open[close + 1..];
    }

    push_text(&mut segments, rest);
    segments
}

/// Parse a template into a [`Sentence`] with the given id.
pub fn parse_sentence(id: &str, raw_text: &str) -> Sentence {
    Sentence::new(id, parse_template(raw_text))
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if !text.is_empty() {
        segments.push(Segment::text(text));
    }
}
