//! Author-placed turn markers.
//!
//! Speech generators may write `[TURN]` where the speaker should turn around
//! and end the speech with `[FINISH]`. Markers are stripped from the text and
//! turns are reported as token indices into the cleaned text.

use alloc::{string::String, vec::Vec};

pub const TURN_MARKER: &str = "[TURN]";
pub const FINISH_MARKER: &str = "[FINISH]";

#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct MarkedSpeech {
    /// Cleaned text, words separated by single spaces.
    pub text: String,
    /// Token index in `text` right after each marker, ascending, deduplicated.
    pub marks: Vec<usize>,
}

pub fn extract_markers(raw: &str) -> MarkedSpeech {
    let body = strip_finish(raw);
    let mut text = String::with_capacity(body.len());
    let mut marks: Vec<usize> = Vec::new();
    let mut words = 0usize;

    for token in body.split_whitespace() {
        for (part_index, part) in token.split(TURN_MARKER).enumerate() {
            if part_index > 0 && marks.last() != Some(&words) {
                marks.push(words);
            }
            if part.is_empty() {
                continue;
            }
            if words > 0 {
                text.push(' ');
            }
            text.push_str(part);
            words += 1;
        }
    }

    MarkedSpeech { text, marks }
}

fn strip_finish(raw: &str) -> &str {
    let trimmed = raw.trim_end();
    let Some(split) = trimmed.len().checked_sub(FINISH_MARKER.len()) else {
        return trimmed;
    };

    match (trimmed.get(..split), trimmed.get(split..)) {
        (Some(body), Some(tail)) if tail.eq_ignore_ascii_case(FINISH_MARKER) => body,
        _ => trimmed,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standalone_and_glued_markers_become_token_indices() {
        let marked = extract_markers("Hear me. [TURN]\nWe march now.[TURN] Onward!");
        assert_eq!(marked.text, "Hear me. We march now. Onward!");
        assert_eq!(marked.marks, vec![2, 5]);
    }

    #[test]
    fn repeated_markers_collapse() {
        let marked = extract_markers("One two [TURN] [TURN][TURN] three");
        assert_eq!(marked.text, "One two three");
        assert_eq!(marked.marks, vec![2]);
    }

    #[test]
    fn trailing_finish_marker_is_removed() {
        let marked = extract_markers("Farewell, Rome. [finish]  \n");
        assert_eq!(marked.text, "Farewell, Rome.");
        assert!(marked.marks.is_empty());
    }

    #[test]
    fn text_without_markers_is_normalized_only() {
        let marked = extract_markers("  a\tb\n\nc ");
        assert_eq!(marked.text, "a b c");
        assert!(marked.marks.is_empty());
        assert_eq!(extract_markers(""), MarkedSpeech::default());
    }
}
