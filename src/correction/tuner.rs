//! Penalty calibration by binary search over held-out sentences.
//!
//! The search relies on broken-percent being (approximately) monotonic in
//! the penalty: the identity candidate is never penalized, so raising the
//! penalty can only reduce the number of tokens the corrector changes.

use crate::correction::corrector::SpellCorrector;
use crate::defaults;

/// Find the smallest penalty (up to the search tolerance) at which the
/// corrector changes at most `target` of the held-out tokens.
///
/// Mutates the corrector's penalty during the search; the caller adopts the
/// returned value.
pub fn find_penalty(
    corrector: &mut SpellCorrector,
    held_out: &[Vec<&str>],
    target: f64,
    verbose: bool,
) -> f64 {
    let mut lo = defaults::PENALTY_MIN;
    let mut hi = defaults::PENALTY_MAX;

    while hi - lo >= defaults::PENALTY_TOLERANCE {
        let mid = lo + (hi - lo) * 0.5;
        let broken = broken_percent(corrector, held_out, mid);
        if verbose {
            eprintln!("typofix: penalty {mid:.2}, broken {broken:.5}");
        }
        if broken <= target {
            hi = mid;
        } else {
            lo = mid;
        }
    }
    hi
}

/// Fraction of held-out tokens whose top candidate differs from the token
/// itself at the given penalty.
pub fn broken_percent(
    corrector: &mut SpellCorrector,
    held_out: &[Vec<&str>],
    penalty: f64,
) -> f64 {
    assert!(
        !held_out.is_empty(),
        "penalty tuning requires a non-empty held-out corpus"
    );
    corrector.set_penalty(penalty);

    let mut total = 0usize;
    let mut broken = 0usize;
    for sentence in held_out {
        for position in 0..sentence.len() {
            total += 1;
            if let Some(&best) = corrector.candidates_raw(sentence, position).first()
                && corrector.model().word(best) != sentence[position]
            {
                broken += 1;
            }
        }
    }
    broken as f64 / total as f64
}
