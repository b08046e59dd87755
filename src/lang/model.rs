//! Trigram language model with a dense word-id dictionary.
//!
//! The model owns the vocabulary (word ↔ id), the n-gram count tables, the
//! alphabet it was trained with, and the calibrated miscorrection penalty.
//! It is the single collaborator the corrector scores candidates against.

use crate::defaults;
use crate::error::{Result, TypofixError};
use crate::lang::alphabet::Alphabet;
use crate::lang::tokenizer::{self, Span};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter};
use std::path::Path;
use tempfile::NamedTempFile;

/// Dense identifier of a vocabulary word.
pub type WordId = u32;

#[derive(Debug, Serialize, Deserialize)]
pub struct LangModel {
    version: u32,
    alphabet: Alphabet,
    word_to_id: HashMap<String, WordId>,
    words: Vec<String>,
    grams1: HashMap<WordId, u64>,
    grams2: HashMap<(WordId, WordId), u64>,
    grams3: HashMap<(WordId, WordId, WordId), u64>,
    total_words: u64,
    penalty: f64,
}

impl LangModel {
    pub fn new(alphabet: Alphabet) -> Self {
        Self {
            version: defaults::MODEL_VERSION,
            alphabet,
            word_to_id: HashMap::new(),
            words: Vec::new(),
            grams1: HashMap::new(),
            grams2: HashMap::new(),
            grams3: HashMap::new(),
            total_words: 0,
            penalty: 0.0,
        }
    }

    /// Train from tokenized sentences, minting ids for unseen words and
    /// accumulating 1/2/3-gram counts. May be called repeatedly; counts add
    /// up.
    pub fn train_raw(&mut self, sentences: &[Vec<&str>]) {
        for sentence in sentences {
            let ids: Vec<WordId> = sentence.iter().map(|w| self.get_or_create(w)).collect();
            for (i, &id) in ids.iter().enumerate() {
                *self.grams1.entry(id).or_insert(0) += 1;
                self.total_words += 1;
                if i >= 1 {
                    *self.grams2.entry((ids[i - 1], id)).or_insert(0) += 1;
                }
                if i >= 2 {
                    *self.grams3.entry((ids[i - 2], ids[i - 1], id)).or_insert(0) += 1;
                }
            }
        }
    }

    fn get_or_create(&mut self, word: &str) -> WordId {
        if let Some(&id) = self.word_to_id.get(word) {
            return id;
        }
        let id = self.words.len() as WordId;
        self.words.push(word.to_string());
        self.word_to_id.insert(word.to_string(), id);
        id
    }

    /// Look up a word's id; `None` for out-of-vocabulary words.
    pub fn get_word_id(&self, word: &str) -> Option<WordId> {
        self.word_to_id.get(word).copied()
    }

    /// The vocabulary word behind `id`.
    ///
    /// Ids are only minted by this model, so any id obtained from it is
    /// valid for its lifetime.
    pub fn word(&self, id: WordId) -> &str {
        &self.words[id as usize]
    }

    /// Number of distinct vocabulary words.
    pub fn word_count(&self) -> usize {
        self.words.len()
    }

    /// Iterate `(word, id)` pairs, e.g. for building the deletes cache.
    pub fn words(&self) -> impl Iterator<Item = (&str, WordId)> {
        self.words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.as_str(), i as WordId))
    }

    pub fn alphabet(&self) -> &Alphabet {
        &self.alphabet
    }

    /// Tokenize `text` with this model's alphabet.
    pub fn tokenize(&self, text: &str) -> Vec<Vec<Span>> {
        tokenizer::tokenize(text, &self.alphabet)
    }

    /// Score a sentence of word ids (`None` marks out-of-vocabulary tokens).
    ///
    /// Returns the sum of log interpolated trigram probabilities with
    /// additive smoothing. Values are always negative; higher is better.
    /// The scale is internal, so callers may only compare scores from the
    /// same model.
    pub fn score(&self, sentence: &[Option<WordId>]) -> f64 {
        let mut total = 0.0;
        for i in 0..sentence.len() {
            let p1 = self.gram1_prob(sentence[i]);
            let p2 = if i >= 1 {
                self.gram2_prob(sentence[i - 1], sentence[i])
            } else {
                p1
            };
            let p3 = if i >= 2 {
                self.gram3_prob(sentence[i - 2], sentence[i - 1], sentence[i])
            } else {
                p2
            };
            let p = defaults::GRAM1_WEIGHT * p1
                + defaults::GRAM2_WEIGHT * p2
                + defaults::GRAM3_WEIGHT * p3;
            total += p.ln();
        }
        total
    }

    // Additive smoothing keeps every probability in (0, 1), so the log
    // score stays finite and negative even for fully unseen windows.
    fn smoothing_denom(&self) -> f64 {
        self.words.len() as f64 + 1.0
    }

    fn gram1_prob(&self, w: Option<WordId>) -> f64 {
        let count = w.and_then(|w| self.grams1.get(&w)).copied().unwrap_or(0);
        (count as f64 + 1.0) / (self.total_words as f64 + self.smoothing_denom())
    }

    fn gram2_prob(&self, u: Option<WordId>, w: Option<WordId>) -> f64 {
        let context = u.and_then(|u| self.grams1.get(&u)).copied().unwrap_or(0);
        let count = match (u, w) {
            (Some(u), Some(w)) => self.grams2.get(&(u, w)).copied().unwrap_or(0),
            _ => 0,
        };
        (count as f64 + 1.0) / (context as f64 + self.smoothing_denom())
    }

    fn gram3_prob(&self, u: Option<WordId>, v: Option<WordId>, w: Option<WordId>) -> f64 {
        let context = match (u, v) {
            (Some(u), Some(v)) => self.grams2.get(&(u, v)).copied().unwrap_or(0),
            _ => 0,
        };
        let count = match (u, v, w) {
            (Some(u), Some(v), Some(w)) => self.grams3.get(&(u, v, w)).copied().unwrap_or(0),
            _ => 0,
        };
        (count as f64 + 1.0) / (context as f64 + self.smoothing_denom())
    }

    /// The calibrated miscorrection penalty stored with the model.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    pub fn set_penalty(&mut self, penalty: f64) {
        self.penalty = penalty;
    }

    /// Serialize the model atomically: write to a temp file in the target
    /// directory, then rename over `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        let parent = path.parent().unwrap_or_else(|| Path::new("."));
        fs::create_dir_all(parent)?;

        let temp_file = NamedTempFile::new_in(parent)?;
        let writer = BufWriter::new(&temp_file);
        bincode::serialize_into(writer, self).map_err(|e| TypofixError::ModelWrite {
            message: e.to_string(),
        })?;
        temp_file
            .persist(path)
            .map_err(|e| TypofixError::Io(e.error))?;
        Ok(())
    }

    /// Load a model previously written by [`LangModel::save`].
    pub fn load(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(TypofixError::ModelNotFound {
                path: path.display().to_string(),
            });
        }
        let file = File::open(path)?;
        let model: LangModel = bincode::deserialize_from(BufReader::new(file)).map_err(|e| {
            TypofixError::ModelParse {
                message: e.to_string(),
            }
        })?;
        if model.version != defaults::MODEL_VERSION {
            return Err(TypofixError::ModelVersion {
                expected: defaults::MODEL_VERSION,
                actual: model.version,
            });
        }
        Ok(model)
    }
}
