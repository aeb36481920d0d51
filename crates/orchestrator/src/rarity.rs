//! Rarity draw.

use std::sync::Mutex;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Default chance that a new plumbus is rare.
pub const DEFAULT_RARE_CHANCE: f64 = 0.05;

/// Weighted coin shared by every submission in the process.
///
/// The generator is seeded once and then only advanced, so draws made in
/// quick succession stay independent.
#[derive(Debug)]
pub struct RarityRoller {
    probability: f64,
    rng: Mutex<StdRng>,
}

impl RarityRoller {
    /// Seed from the operating system.
    pub fn new(probability: f64) -> Self {
        Self::with_rng(StdRng::from_entropy(), probability)
    }

    /// Deterministic roller for tests and reproducible runs.
    pub fn seeded(seed: u64, probability: f64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed), probability)
    }

    fn with_rng(rng: StdRng, probability: f64) -> Self {
        let probability = if probability.is_nan() {
            0.0
        } else {
            probability.clamp(0.0, 1.0)
        };
        Self {
            probability,
            rng: Mutex::new(rng),
        }
    }

    /// Chance of a rare draw, in `[0, 1]`.
    pub fn probability(&self) -> f64 {
        self.probability
    }

    /// Draw once.
    pub fn roll(&self) -> bool {
        // A poisoned lock still holds a usable generator.
        let mut rng = self.rng.lock().unwrap_or_else(|e| e.into_inner());
        rng.gen_bool(self.probability)
    }
}

impl Default for RarityRoller {
    fn default() -> Self {
        Self::new(DEFAULT_RARE_CHANCE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_certain_and_impossible() {
        let always = RarityRoller::seeded(7, 1.0);
        let never = RarityRoller::seeded(7, 0.0);
        for _ in 0..100 {
            assert!(always.roll());
            assert!(!never.roll());
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let a = RarityRoller::seeded(42, 0.5);
        let b = RarityRoller::seeded(42, 0.5);
        let left: Vec<bool> = (0..64).map(|_| a.roll()).collect();
        let right: Vec<bool> = (0..64).map(|_| b.roll()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_consecutive_draws_vary() {
        let roller = RarityRoller::seeded(1, 0.5);
        let draws: Vec<bool> = (0..64).map(|_| roller.roll()).collect();
        assert!(draws.iter().any(|d| *d));
        assert!(draws.iter().any(|d| !*d));
    }

    #[test]
    fn test_probability_is_clamped() {
        assert_eq!(RarityRoller::seeded(0, 3.0).probability(), 1.0);
        assert_eq!(RarityRoller::seeded(0, -1.0).probability(), 0.0);
        assert_eq!(RarityRoller::seeded(0, f64::NAN).probability(), 0.0);
        assert_eq!(RarityRoller::default().probability(), DEFAULT_RARE_CHANCE);
    }
}
