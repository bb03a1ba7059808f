//! Rejection-sampling selection of a publishable corpus entry.

use crate::Corpus;
use magpie_error::{MagpieError, MagpieErrorKind, MagpieResult};
use rand::Rng;
use tracing::trace;

/// Pick one corpus entry satisfying `accept`, by uniform random sampling
/// with rejection.
///
/// Draws a uniformly random index (with replacement) and tests the
/// predicate, returning the first accepted entry. Expected cost is `1 / p`
/// draws where `p` is the fraction of accepted entries; the corpus is never
/// pre-filtered, so entries the predicate rejects simply stay unselected.
///
/// # Errors
///
/// - `EmptyCorpus` if the corpus has no entries (fails fast, never loops).
/// - `SelectionExhausted` if no draw is accepted within `max_attempts`,
///   which bounds the degenerate case where the predicate accepts nothing.
pub fn select_entry<'a, R, F>(
    corpus: &'a Corpus,
    accept: F,
    rng: &mut R,
    max_attempts: usize,
) -> MagpieResult<&'a str>
where
    R: Rng + ?Sized,
    F: Fn(&str) -> bool,
{
    if corpus.is_empty() {
        return Err(MagpieError::new(MagpieErrorKind::EmptyCorpus));
    }

    for attempt in 0..max_attempts {
        let index = rng.gen_range(0..corpus.len());
        let entry = &corpus.entries()[index];
        if accept(entry) {
            trace!(attempt, index, "Selected corpus entry");
            return Ok(entry);
        }
    }

    Err(MagpieError::new(MagpieErrorKind::SelectionExhausted {
        attempts: max_attempts,
    }))
}
