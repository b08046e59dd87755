//! Sentence and word tokenization over an alphabet.
//!
//! Tokens are returned as byte spans into the input so callers can
//! reconstruct the exact inter-token bytes (whitespace, punctuation) when
//! splicing corrections back into the original text.

use crate::lang::alphabet::{Alphabet, fold_char};

/// Characters that end a sentence.
const SENTENCE_TERMINATORS: &[char] = &['.', '!', '?'];

/// Byte range of a token in the text it was tokenized from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    /// Resolve the span against the text it was produced from.
    pub fn slice<'a>(&self, text: &'a str) -> &'a str {
        &text[self.start..self.end]
    }
}

/// Lowercase `text` with the 1:1 per-char fold.
///
/// The fold guarantees `tokenize(text)` and `tokenize(fold(text))` produce
/// the same sentence and token structure.
pub fn fold(text: &str) -> String {
    text.chars().map(fold_char).collect()
}

/// Split `text` into sentences of word spans.
///
/// A word is a maximal run of alphabet characters (case-insensitive); a
/// sentence ends at `.`, `!` or `?`. Sentences without words are dropped,
/// and a trailing unterminated sentence is kept.
pub fn tokenize(text: &str, alphabet: &Alphabet) -> Vec<Vec<Span>> {
    let mut sentences = Vec::new();
    let mut sentence: Vec<Span> = Vec::new();
    let mut word_start: Option<usize> = None;

    for (i, c) in text.char_indices() {
        if alphabet.contains(c) {
            word_start.get_or_insert(i);
            continue;
        }
        if let Some(start) = word_start.take() {
            sentence.push(Span { start, end: i });
        }
        if SENTENCE_TERMINATORS.contains(&c) && !sentence.is_empty() {
            sentences.push(std::mem::take(&mut sentence));
        }
    }
    if let Some(start) = word_start {
        sentence.push(Span {
            start,
            end: text.len(),
        });
    }
    if !sentence.is_empty() {
        sentences.push(sentence);
    }
    sentences
}
