use crate::domain::model::DiceRoll;
use crate::domain::ports::Dice;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// The game's dice: two six-sided dice backed by a reseedable RNG.
#[derive(Debug)]
pub struct RandomDice {
    rng: StdRng,
    last: Option<DiceRoll>,
}

impl RandomDice {
    /// Dice seeded from entropy.
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
            last: None,
        }
    }

    /// Dice with a fixed seed, for reproducible games.
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
            last: None,
        }
    }
}

impl Default for RandomDice {
    fn default() -> Self {
        Self::new()
    }
}

impl Dice for RandomDice {
    fn roll(&mut self) -> DiceRoll {
        let roll = DiceRoll::new(self.rng.gen_range(1..=6), self.rng.gen_range(1..=6));
        self.last = Some(roll);
        roll
    }

    fn last_roll(&self) -> Option<DiceRoll> {
        self.last
    }

    fn reseed(&mut self, seed: Option<u64>) {
        self.rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rolls_stay_in_die_range() {
        let mut dice = RandomDice::seeded(1);
        for _ in 0..200 {
            let roll = dice.roll();
            assert!((1..=6).contains(&roll.first));
            assert!((1..=6).contains(&roll.second));
            assert!((2..=12).contains(&roll.total()));
        }
    }

    #[test]
    fn test_last_roll_tracks_most_recent_throw() {
        let mut dice = RandomDice::seeded(7);
        assert!(dice.last_roll().is_none());
        let roll = dice.roll();
        assert_eq!(dice.last_roll(), Some(roll));
    }

    #[test]
    fn test_same_seed_gives_same_sequence() {
        let mut a = RandomDice::seeded(42);
        let mut b = RandomDice::seeded(42);
        for _ in 0..50 {
            assert_eq!(a.roll(), b.roll());
        }
    }

    #[test]
    fn test_reseed_restarts_the_sequence() {
        let mut dice = RandomDice::seeded(9);
        let first: Vec<_> = (0..10).map(|_| dice.roll()).collect();
        dice.reseed(Some(9));
        let second: Vec<_> = (0..10).map(|_| dice.roll()).collect();
        assert_eq!(first, second);
    }
}
