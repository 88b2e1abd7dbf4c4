//! Whitespace tokenization and sentence/phrase boundary detection.
//!
//! Every boundary is stored as an exclusive token index: the index of the
//! token that follows the boundary.

use alloc::{string::String, vec::Vec};
use core::ops::Range;

use log::debug;

pub const DEFAULT_CLOSING_PHRASE: &str = "in conclusion";

/// Characters allowed after the terminal punctuation of a token.
const CLOSING_MARKS: [char; 6] = ['"', '\'', ')', ']', '\u{201d}', '\u{2019}'];

/// Case-insensitive phrase that opens the protected closing section.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ClosingPhrase {
    phrase: String,
}

impl ClosingPhrase {
    /// Builds a phrase with whitespace collapsed to single spaces.
    pub fn new(phrase: &str) -> Self {
        let mut normalized = String::with_capacity(phrase.len());
        for (index, word) in phrase.split_whitespace().enumerate() {
            if index > 0 {
                normalized.push(' ');
            }
            normalized.push_str(word);
        }

        Self { phrase: normalized }
    }

    /// A phrase that never matches, leaving the whole text open to turns.
    pub const fn disabled() -> Self {
        Self {
            phrase: String::new(),
        }
    }

    pub fn as_str(&self) -> &str {
        self.phrase.as_str()
    }

    pub fn is_disabled(&self) -> bool {
        self.phrase.trim().is_empty()
    }

    /// Whether `text` contains the phrase starting at a word start and ending
    /// at a word boundary.
    pub fn matches(&self, text: &str) -> bool {
        if self.is_disabled() {
            return false;
        }

        let mut previous: Option<char> = None;
        for (offset, ch) in text.char_indices() {
            let at_word_start = previous.is_none_or(char::is_whitespace);
            previous = Some(ch);
            if at_word_start && self.matches_at(&text[offset..]) {
                return true;
            }
        }

        false
    }

    fn matches_at(&self, rest: &str) -> bool {
        let mut text_chars = rest.chars();
        for expected in self.phrase.chars() {
            match text_chars.next() {
                Some(actual) if chars_eq_ignore_case(expected, actual) => {}
                _ => return false,
            }
        }

        text_chars
            .next()
            .is_none_or(|next| !(next.is_alphanumeric() || next == '_'))
    }
}

impl Default for ClosingPhrase {
    fn default() -> Self {
        Self::new(DEFAULT_CLOSING_PHRASE)
    }
}

fn chars_eq_ignore_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

/// One sentence (or trailing fragment) of the token sequence.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SentenceSpan {
    pub start: usize,
    pub end: usize,
    pub text: String,
}

/// Tokens of one text plus every boundary derived from them.
#[derive(Clone, Debug)]
pub struct Segments<'a> {
    tokens: Vec<&'a str>,
    sentence_ends: Vec<usize>,
    phrase_ends: Vec<usize>,
    spans: Vec<SentenceSpan>,
    closing_boundary: Option<usize>,
}

impl<'a> Segments<'a> {
    pub fn tokens(&self) -> &[&'a str] {
        &self.tokens
    }

    pub fn token_count(&self) -> usize {
        self.tokens.len()
    }

    pub fn sentence_ends(&self) -> &[usize] {
        &self.sentence_ends
    }

    pub fn phrase_ends(&self) -> &[usize] {
        &self.phrase_ends
    }

    /// Boundaries between every pair of adjacent tokens, `1..N`.
    pub fn word_boundaries(&self) -> Range<usize> {
        1..self.tokens.len().max(1)
    }

    pub fn sentence_spans(&self) -> &[SentenceSpan] {
        &self.spans
    }

    /// Number of complete sentences; a trailing unpunctuated fragment does
    /// not count.
    pub fn sentence_unit_count(&self) -> usize {
        self.sentence_ends.len()
    }

    /// Start of the closing section, `None` when the text has none.
    pub fn closing_boundary(&self) -> Option<usize> {
        self.closing_boundary
    }

    pub fn allows_turn_at(&self, index: usize) -> bool {
        self.closing_boundary.is_none_or(|closing| index < closing)
    }
}

/// Splits `text` into tokens and computes its boundary sets.
pub fn segment<'a>(text: &'a str, closing: &ClosingPhrase) -> Segments<'a> {
    let tokens: Vec<&'a str> = text.split_whitespace().collect();

    let mut sentence_ends = Vec::new();
    let mut phrase_ends = Vec::new();
    for (index, token) in tokens.iter().enumerate() {
        match terminal_char(token) {
            Some('.' | '!' | '?') => {
                sentence_ends.push(index + 1);
                phrase_ends.push(index + 1);
            }
            Some(',' | ';' | ':') => phrase_ends.push(index + 1),
            _ => {}
        }
    }

    let spans = sentence_spans(&tokens, &sentence_ends);
    let closing_boundary = spans
        .iter()
        .find(|span| closing.matches(&span.text))
        .map(|span| span.start);

    debug!(
        "segment: tokens={} sentences={} phrases={} closing={:?}",
        tokens.len(),
        sentence_ends.len(),
        phrase_ends.len(),
        closing_boundary
    );

    Segments {
        tokens,
        sentence_ends,
        phrase_ends,
        spans,
        closing_boundary,
    }
}

fn terminal_char(token: &str) -> Option<char> {
    token.trim_end_matches(&CLOSING_MARKS[..]).chars().next_back()
}

fn sentence_spans(tokens: &[&str], sentence_ends: &[usize]) -> Vec<SentenceSpan> {
    let mut spans = Vec::with_capacity(sentence_ends.len() + 1);
    let mut start = 0usize;

    for &end in sentence_ends {
        spans.push(SentenceSpan {
            start,
            end,
            text: tokens[start..end].join(" "),
        });
        start = end;
    }

    if start < tokens.len() {
        spans.push(SentenceSpan {
            start,
            end: tokens.len(),
            text: tokens[start..].join(" "),
        });
    }

    spans
}
