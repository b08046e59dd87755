//! Context-aware spell correction over a trained language model.
//!
//! Candidate enumeration runs in two tiers. The exhaustive tier expands all
//! strings within two edits of the query and keeps the in-vocabulary ones.
//! Only when that comes up empty does the cheaper fallback tier run: it
//! probes the pure-delete strings of the query against the vocabulary and
//! the precomputed deletes index. Candidates are then ranked by a windowed
//! language-model score with a calibrated penalty against spurious changes.

use crate::correction::deletes::DeletesIndex;
use crate::correction::edits;
use crate::correction::tuner;
use crate::defaults;
use crate::error::{Result, TypofixError};
use crate::lang::alphabet::Alphabet;
use crate::lang::model::{LangModel, WordId};
use crate::lang::tokenizer;
use indicatif::{ProgressBar, ProgressStyle};
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Options controlling training and penalty calibration.
#[derive(Debug, Clone)]
pub struct TrainOptions {
    /// Target fraction of held-out tokens the corrector may change.
    pub target_broken_percent: f64,
    /// Fraction of sentences reserved from the corpus tail for tuning.
    pub held_out_fraction: f64,
    /// Cap on the number of reserved sentences.
    pub held_out_cap: usize,
    /// Render a progress bar on stderr during training.
    pub progress: bool,
    /// Log tuning iterations to stderr.
    pub verbose: bool,
}

impl Default for TrainOptions {
    fn default() -> Self {
        Self {
            target_broken_percent: defaults::TARGET_BROKEN_PERCENT,
            held_out_fraction: defaults::HELD_OUT_FRACTION,
            held_out_cap: defaults::HELD_OUT_CAP,
            progress: false,
            verbose: false,
        }
    }
}

/// Statistical spell corrector: language model + deletes index + penalty.
///
/// Correction methods take `&self`; concurrent callers on disjoint inputs
/// need no coordination once the corrector is built.
#[derive(Debug)]
pub struct SpellCorrector {
    model: LangModel,
    deletes: DeletesIndex,
    penalty: f64,
}

impl SpellCorrector {
    /// Load a trained model and build the deletes cache.
    pub fn load(path: &Path) -> Result<Self> {
        Ok(Self::from_model(LangModel::load(path)?))
    }

    /// Wrap a model, adopting its stored penalty and building the deletes
    /// cache.
    pub(crate) fn from_model(model: LangModel) -> Self {
        let mut corrector = Self {
            penalty: model.penalty(),
            model,
            deletes: DeletesIndex::default(),
        };
        corrector.prepare_cache();
        corrector
    }

    /// Train a model from a UTF-8 text corpus and calibrate the penalty.
    ///
    /// The corpus is lowercased and tokenized; `min(held_out_fraction,
    /// held_out_cap)` sentences are reserved from the tail as the held-out
    /// set, the rest trains the model. The deletes cache is built and the
    /// penalty tuned against the held-out sentences and stored in the model.
    pub fn train(text_path: &Path, alphabet_path: &Path, opts: &TrainOptions) -> Result<Self> {
        let alphabet = Alphabet::load(alphabet_path)?;
        let text = fs::read_to_string(text_path)?;
        let lowered = tokenizer::fold(&text);

        let mut model = LangModel::new(alphabet);
        let sentences = model.tokenize(&lowered);
        if sentences.is_empty() {
            return Err(TypofixError::CorpusEmpty {
                path: text_path.display().to_string(),
            });
        }

        let held_out_count =
            ((sentences.len() as f64 * opts.held_out_fraction) as usize).min(opts.held_out_cap);
        let train_count = sentences.len() - held_out_count;

        if opts.verbose {
            eprintln!(
                "typofix: {} sentences ({} train, {held_out_count} held out)",
                sentences.len(),
                train_count
            );
        }

        let pb = if opts.progress {
            let pb = ProgressBar::new(train_count as u64);
            pb.set_style(
                ProgressStyle::default_bar()
                    .template("{spinner:.green} [{bar:40.cyan/blue}] {pos}/{len} sentences")
                    .unwrap()
                    .progress_chars("#>-"),
            );
            Some(pb)
        } else {
            None
        };

        for spans in &sentences[..train_count] {
            let sentence: Vec<&str> = spans.iter().map(|sp| sp.slice(&lowered)).collect();
            model.train_raw(std::slice::from_ref(&sentence));
            if let Some(ref pb) = pb {
                pb.inc(1);
            }
        }
        if let Some(pb) = pb {
            pb.finish_and_clear();
        }

        let mut corrector = Self::from_model(model);

        let held_out: Vec<Vec<&str>> = sentences[train_count..]
            .iter()
            .map(|spans| spans.iter().map(|sp| sp.slice(&lowered)).collect())
            .collect();
        let penalty = tuner::find_penalty(
            &mut corrector,
            &held_out,
            opts.target_broken_percent,
            opts.verbose,
        );
        corrector.penalty = penalty;
        corrector.model.set_penalty(penalty);
        Ok(corrector)
    }

    /// Persist the model (with its penalty) to `path`.
    pub fn save(&self, path: &Path) -> Result<()> {
        self.model.save(path)
    }

    /// Rebuild the deletes index from the current vocabulary.
    fn prepare_cache(&mut self) {
        self.deletes.build(&self.model);
    }

    pub fn model(&self) -> &LangModel {
        &self.model
    }

    /// Miscorrection penalty applied to non-identity candidates.
    pub fn penalty(&self) -> f64 {
        self.penalty
    }

    pub fn set_penalty(&mut self, penalty: f64) {
        self.penalty = penalty;
    }

    /// Ranked replacement candidates for `sentence[position]`, best first.
    ///
    /// Every candidate is in-vocabulary. An out-of-range position yields an
    /// empty list, as does a token with no in-vocabulary word within two
    /// edits.
    pub fn candidates(&self, sentence: &[&str], position: usize) -> Vec<String> {
        self.candidates_raw(sentence, position)
            .into_iter()
            .map(|id| self.model.word(id).to_string())
            .collect()
    }

    pub(crate) fn candidates_raw(&self, sentence: &[&str], position: usize) -> Vec<WordId> {
        if position >= sentence.len() {
            return Vec::new();
        }
        let word = sentence[position];

        let mut candidates = self.edit_candidates(word);
        let mut first_level = true;
        if candidates.is_empty() {
            candidates = self.indexed_candidates(word);
            first_level = false;
        }

        let identity = self.model.get_word_id(word);
        if let Some(id) = identity {
            candidates.push(id);
        }
        if candidates.is_empty() {
            return candidates;
        }

        let unique: HashSet<WordId> = candidates.into_iter().collect();
        let mut scored: Vec<(WordId, f64)> = Vec::with_capacity(unique.len());
        for cand in unique {
            let mut score = self.score_in_window(sentence, position, cand);
            if identity != Some(cand) {
                if first_level {
                    score -= self.penalty;
                } else {
                    score *= defaults::FALLBACK_SCORE_FACTOR;
                }
            }
            scored.push((cand, score));
        }

        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| self.model.word(a.0).cmp(self.model.word(b.0)))
        });
        scored.into_iter().map(|(id, _)| id).collect()
    }

    /// Exhaustive tier: all in-vocabulary words within two edit operations,
    /// expanded as two one-edit passes with deduplicated intermediates.
    fn edit_candidates(&self, word: &str) -> Vec<WordId> {
        let letters = self.model.alphabet().letters();
        let first = edits::variants1(word, letters);

        let mut found = Vec::new();
        for variant in &first {
            if let Some(id) = self.model.get_word_id(variant) {
                found.push(id);
            }
        }
        for variant in &first {
            for second in edits::variants1(variant, letters) {
                if let Some(id) = self.model.get_word_id(&second) {
                    found.push(id);
                }
            }
        }
        found
    }

    /// Fallback tier: probe the query's pure-delete strings against the
    /// vocabulary and both deletes tables. Recovers insert/replace/transpose
    /// matches because any edit within distance two implies a pure-delete
    /// collision with some vocabulary word.
    fn indexed_candidates(&self, word: &str) -> Vec<WordId> {
        let mut keys = edits::deletes1(word);
        keys.push(word.to_string());
        keys.extend(edits::deletes2(word));

        let mut found = Vec::new();
        for key in &keys {
            if let Some(id) = self.model.get_word_id(key) {
                found.push(id);
            }
            found.extend_from_slice(self.deletes.lookup1(key));
            found.extend_from_slice(self.deletes.lookup2(key));
        }
        found
    }

    /// Score `candidate` embedded at `position` in a window of up to
    /// [`defaults::WINDOW_RADIUS`] tokens on each side.
    fn score_in_window(&self, sentence: &[&str], position: usize, candidate: WordId) -> f64 {
        let start = position.saturating_sub(defaults::WINDOW_RADIUS);
        let end = (position + defaults::WINDOW_RADIUS).min(sentence.len() - 1);
        let mut window = Vec::with_capacity(end - start + 1);
        for (i, token) in sentence.iter().enumerate().take(end + 1).skip(start) {
            if i == position {
                window.push(Some(candidate));
            } else {
                window.push(self.model.get_word_id(token));
            }
        }
        self.model.score(&window)
    }

    /// Correct a text fragment, preserving casing and inter-token bytes.
    ///
    /// Tokens are corrected against their lowercased form; a changed token
    /// gets the original's case pattern projected onto it (per character,
    /// with the last original character's case extending over any excess
    /// length). All bytes between tokens are copied through verbatim.
    pub fn fix_fragment(&self, text: &str) -> String {
        let orig_sentences = self.model.tokenize(text);
        let lowered = tokenizer::fold(text);
        let sentences = self.model.tokenize(&lowered);

        let mut result = String::with_capacity(text.len());
        let mut orig_pos = 0;
        for (spans, orig_spans) in sentences.iter().zip(&orig_sentences) {
            let mut words: Vec<String> = spans
                .iter()
                .map(|sp| sp.slice(&lowered).to_string())
                .collect();
            for j in 0..words.len() {
                let refs: Vec<&str> = words.iter().map(String::as_str).collect();
                if let Some(&best) = self.candidates_raw(&refs, j).first() {
                    words[j] = self.model.word(best).to_string();
                }

                let orig = orig_spans[j];
                result.push_str(&text[orig_pos..orig.start]);

                let orig_word = orig.slice(text);
                let lowered_word = spans[j].slice(&lowered);
                if words[j] != lowered_word {
                    project_case(&words[j], orig_word, &mut result);
                } else {
                    result.push_str(orig_word);
                }
                orig_pos = orig.end;
            }
        }
        result.push_str(&text[orig_pos..]);
        result
    }

    /// Correct a fragment into normalized form: lowercased, space-joined
    /// tokens, each sentence terminated with ". ".
    pub fn fix_fragment_normalized(&self, text: &str) -> String {
        let lowered = tokenizer::fold(text);
        let sentences = self.model.tokenize(&lowered);

        let mut result = String::new();
        for spans in &sentences {
            let mut words: Vec<String> = spans
                .iter()
                .map(|sp| sp.slice(&lowered).to_string())
                .collect();
            for j in 0..words.len() {
                let refs: Vec<&str> = words.iter().map(String::as_str).collect();
                if let Some(&best) = self.candidates_raw(&refs, j).first() {
                    words[j] = self.model.word(best).to_string();
                }
                result.push_str(&words[j]);
                result.push(' ');
            }
            if !words.is_empty() {
                result.pop();
                result.push_str(". ");
            }
        }
        if !result.is_empty() {
            result.pop();
        }
        result
    }
}

/// Project the case pattern of `source` onto `word`, appending to `out`.
///
/// Character k of `word` takes the case of character k of `source`; past the
/// end of `source` the last source character's case extends.
fn project_case(word: &str, source: &str, out: &mut String) {
    let source_chars: Vec<char> = source.chars().collect();
    for (k, c) in word.chars().enumerate() {
        let reference = source_chars[k.min(source_chars.len() - 1)];
        if reference.is_uppercase() {
            out.extend(c.to_uppercase());
        } else {
            out.push(c);
        }
    }
}
