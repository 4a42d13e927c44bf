// Seeded jitter rolls for duel resolution.
//
// ChaCha8 keeps the sequence deterministic per seed across platforms, which
// is what makes seeded duels reproducible end to end.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Deterministic roll source for a single duel.
///
/// `roll` perturbs a base stat by up to ±10% and clamps at zero, so a stat
/// of 100 lands somewhere in 90..=110 and a zero stat always rolls zero.
#[derive(Debug, Clone)]
pub struct DuelRng {
    inner: ChaCha8Rng,
}

impl DuelRng {
    /// Create a roll source. With a seed the sequence is reproducible;
    /// without one it is drawn from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let inner = match seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::seed_from_u64(rand::random()),
        };
        DuelRng { inner }
    }

    /// Roll a stat: `max(0, round(base ± 10%))`.
    ///
    /// Always consumes exactly one draw, so the position in the sequence
    /// depends only on how many rolls have happened, not on their bases.
    pub fn roll(&mut self, base: i32) -> i32 {
        let jitter = (base as f64 * 0.1).abs();
        let value = base as f64 + self.inner.gen_range(-jitter..=jitter);
        (value.round() as i32).max(0)
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
