//! Related-items selector: a bounded random sample of same-category peers.
//!
//! This is the one intentionally non-deterministic operation in the crate.
//! Repeated calls with identical inputs may return different subsets; only
//! the size bound and membership constraints are contractual. Tests inject a
//! seeded rng through [`related_with_rng`].

use rand::seq::SliceRandom;
use rand::Rng;

use crate::domain::meme::EnrichedMeme;

/// Same-category peers of `focal` (focal itself excluded), shuffled with
/// `rng` and truncated to `limit`. An empty pool gives an empty result.
pub fn related_with_rng<R: Rng + ?Sized>(
    catalog: &[EnrichedMeme],
    focal: &EnrichedMeme,
    limit: usize,
    rng: &mut R,
) -> Vec<EnrichedMeme> {
    let mut pool: Vec<EnrichedMeme> = catalog
        .iter()
        .filter(|meme| meme.category == focal.category && meme.id != focal.id)
        .cloned()
        .collect();

    pool.shuffle(rng);
    pool.truncate(limit);
    pool
}

/// [`related_with_rng`] with the thread-local rng.
pub fn related(catalog: &[EnrichedMeme], focal: &EnrichedMeme, limit: usize) -> Vec<EnrichedMeme> {
    related_with_rng(catalog, focal, limit, &mut rand::thread_rng())
}
