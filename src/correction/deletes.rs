//! Symmetric-delete inverted index over the model vocabulary.
//!
//! For every vocabulary word the index records which strings its one- and
//! two-character deletions produce. At query time the corrector deletes
//! characters from the *query* instead and intersects: if a vocabulary word
//! is within edit distance two of the query, some pure-delete of one matches
//! a pure-delete of the other. This trades memory for never enumerating
//! insert/replace variants over the alphabet at lookup time.

use crate::correction::edits;
use crate::lang::model::{LangModel, WordId};
use std::collections::HashMap;

/// Inverted deletes index: pure-delete string → ids of the vocabulary words
/// that produce it. Keys are UTF-8; values tolerate duplicates.
#[derive(Debug, Default)]
pub struct DeletesIndex {
    deletes1: HashMap<String, Vec<WordId>>,
    deletes2: HashMap<String, Vec<WordId>>,
}

impl DeletesIndex {
    /// Rebuild from the model vocabulary.
    ///
    /// Clears previous contents first so rebuilding is idempotent. Must be
    /// called again whenever the vocabulary changes.
    pub fn build(&mut self, model: &LangModel) {
        self.deletes1.clear();
        self.deletes2.clear();
        for (word, id) in model.words() {
            for variant in edits::deletes1(word) {
                self.deletes1.entry(variant).or_default().push(id);
            }
            for variant in edits::deletes2(word) {
                self.deletes2.entry(variant).or_default().push(id);
            }
        }
    }

    /// Vocabulary ids whose one-character deletions include `key`.
    pub fn lookup1(&self, key: &str) -> &[WordId] {
        self.deletes1.get(key).map_or(&[], Vec::as_slice)
    }

    /// Vocabulary ids whose two-character deletions include `key`.
    pub fn lookup2(&self, key: &str) -> &[WordId] {
        self.deletes2.get(key).map_or(&[], Vec::as_slice)
    }

    /// Number of distinct keys across both tables.
    pub fn len(&self) -> usize {
        self.deletes1.len() + self.deletes2.len()
    }

    pub fn is_empty(&self) -> bool {
        self.deletes1.is_empty() && self.deletes2.is_empty()
    }
}
