//! Quiz question drawing
//!
//! Filters already-asked questions out of the pool and draws one of the
//! remainder uniformly at random. An exhausted pool is a normal
//! outcome, reported as no question rather than an error.

use rand::seq::SliceRandom;

use crate::models::Question;

/// Draw one question from `pool`, excluding ids in `previous`.
pub fn draw(pool: Vec<Question>, previous: &[i64]) -> Option<Question> {
    let candidates: Vec<Question> = pool
        .into_iter()
        .filter(|q| !previous.contains(&q.id))
        .collect();

    candidates.choose(&mut rand::thread_rng()).cloned()
}
