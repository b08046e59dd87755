//! Default configuration constants for typofix.
//!
//! This module provides shared constants used across the corrector, the
//! tuner, and the configuration types to ensure consistency.

/// Number of context tokens considered on each side of a correction position.
///
/// Three tokens per side keeps scoring local: wider windows dilute the
/// distinction between nearby candidates and slow every lookup.
pub const WINDOW_RADIUS: usize = 3;

/// Score multiplier for non-identity candidates from the index fallback tier.
///
/// Scores are log-probabilities (negative), so multiplying makes fallback
/// candidates strictly worse than the untouched identity candidate.
pub const FALLBACK_SCORE_FACTOR: f64 = 50.0;

/// Lower bound of the penalty binary search.
pub const PENALTY_MIN: f64 = 0.0;

/// Upper bound of the penalty binary search.
pub const PENALTY_MAX: f64 = 500.0;

/// The penalty search stops once the bracket narrows below this width.
pub const PENALTY_TOLERANCE: f64 = 0.2;

/// Default target fraction of held-out tokens the corrector may change.
///
/// 0.7% tolerates occasional corrections of clean text in exchange for
/// fixing the overwhelming majority of genuine typos.
pub const TARGET_BROKEN_PERCENT: f64 = 0.007;

/// Fraction of training sentences reserved for penalty tuning.
pub const HELD_OUT_FRACTION: f64 = 0.2;

/// Cap on the number of held-out sentences.
///
/// Tuning scores every token of every held-out sentence a dozen times
/// during the binary search; 5000 sentences bound that cost on large
/// corpora without hurting calibration quality.
pub const HELD_OUT_CAP: usize = 5000;

/// Interpolation weight of the unigram probability in the language model.
pub const GRAM1_WEIGHT: f64 = 0.05;

/// Interpolation weight of the bigram probability.
pub const GRAM2_WEIGHT: f64 = 0.15;

/// Interpolation weight of the trigram probability.
pub const GRAM3_WEIGHT: f64 = 0.8;

/// Model file format version, checked on load.
pub const MODEL_VERSION: u32 = 1;

/// Default model filename under the data directory.
pub const MODEL_FILENAME: &str = "model.bin";
