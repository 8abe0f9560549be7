//! Uniform rolls drawn from an injected random source.

use rand_chacha::rand_core::Rng;

/// Uniform value in `0..sides`.
pub(crate) fn roll_below<R: Rng + ?Sized>(rng: &mut R, sides: usize) -> usize {
    debug_assert!(sides > 0);
    (rng.next_u64() % sides as u64) as usize
}

/// Uniform value in `min..=max`.
pub(crate) fn roll_between<R: Rng + ?Sized>(rng: &mut R, min: usize, max: usize) -> usize {
    debug_assert!(min <= max);
    min + roll_below(rng, max - min + 1)
}
