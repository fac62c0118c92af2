// Random weights for fuzzing automaton algorithms.

use rand::Rng;

use crate::semiring::{Boolean, Real, StringWeight, Tropical};

/// Default divisor for random [`Real`] weights.
///
/// Keeping Real weights at most `1/6` keeps the pathsum of small random
/// machines convergent.
pub const DEFAULT_REAL_DIVISOR: f64 = 6.0;

/// A semiring that can draw random non-zero weights.
pub trait RandomWeight: Sized {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self;
}

impl RandomWeight for Boolean {
    /// Always `true`: `false` is the Boolean zero.
    fn random<R: Rng + ?Sized>(_rng: &mut R) -> Self {
        Boolean(true)
    }
}

impl RandomWeight for Tropical {
    /// An integer score in `0..=50`.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Tropical(rng.gen_range(0..=50) as f64)
    }
}

impl RandomWeight for Real {
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        random_real(rng, DEFAULT_REAL_DIVISOR)
    }
}

impl RandomWeight for StringWeight {
    /// One to eight lowercase ASCII letters.
    fn random<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let len = rng.gen_range(1..=8);
        let word: String = (0..len)
            .map(|_| char::from(b'a' + rng.gen_range(0..26u8)))
            .collect();
        StringWeight::Word(word)
    }
}

/// A Real weight in `[√tol, 1/divisor]`, rounded to three decimals, where
/// `tol` is the Real equality tolerance.
///
/// Values below `√tol` are redrawn so that products of two weights stay
/// distinguishable from zero.
pub fn random_real<R: Rng + ?Sized>(rng: &mut R, divisor: f64) -> Real {
    let floor = crate::REAL_TOLERANCE.sqrt();
    loop {
        let w = (rng.r#gen::<f64>() / divisor * 1000.0).round() / 1000.0;
        if w >= floor {
            return Real(w);
        }
    }
}

/// A Tropical weight in `-50..=50`; negative scores exercise cycles that the
/// non-negative generator never produces.
pub fn random_signed_tropical<R: Rng + ?Sized>(rng: &mut R) -> Tropical {
    Tropical(rng.gen_range(-50..=50) as f64)
}
