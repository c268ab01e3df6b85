//! Every random decision in the game goes through [`Dice`], so the haunting can be replayed
//! deterministically.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub trait Dice {
    /// True with probability `1 / n`. Always true for `n <= 1`.
    fn one_in(&mut self, n: u32) -> bool;

    /// Uniform index in `0..len`. Returns 0 for an empty range.
    fn pick(&mut self, len: usize) -> usize;
}

/// Dice backed by any `rand` generator.
#[derive(Debug, Clone)]
pub struct RngDice<R> {
    rng: R,
}

impl<R: Rng> RngDice<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl RngDice<StdRng> {
    /// Seeded when `seed` is given, otherwise seeded from the OS.
    pub fn from_seed(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self::new(rng)
    }
}

impl<R: Rng> Dice for RngDice<R> {
    fn one_in(&mut self, n: u32) -> bool {
        n <= 1 || self.rng.gen_range(0..n) == 0
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Dice that replays queued results. Exhausted queues roll "miss" and pick index 0.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: VecDeque<bool>,
    picks: VecDeque<usize>,
}

impl ScriptedDice {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn roll(mut self, hit: bool) -> Self {
        self.rolls.push_back(hit);
        self
    }

    pub fn pick_index(mut self, index: usize) -> Self {
        self.picks.push_back(index);
        self
    }
}

impl Dice for ScriptedDice {
    fn one_in(&mut self, _n: u32) -> bool {
        self.rolls.pop_front().unwrap_or(false)
    }

    fn pick(&mut self, len: usize) -> usize {
        let index = self.picks.pop_front().unwrap_or(0);
        if len == 0 { 0 } else { index.min(len - 1) }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeded_dice_are_reproducible() {
        let mut a = RngDice::from_seed(Some(7));
        let mut b = RngDice::from_seed(Some(7));
        let rolls_a: Vec<_> = (0..32).map(|_| (a.one_in(3), a.pick(20))).collect();
        let rolls_b: Vec<_> = (0..32).map(|_| (b.one_in(3), b.pick(20))).collect();
        assert_eq!(rolls_a, rolls_b);
    }

    #[test]
    fn one_in_one_always_hits_and_picks_stay_in_range() {
        let mut dice = RngDice::from_seed(Some(1));
        for _ in 0..100 {
            assert!(dice.one_in(1));
            assert!(dice.pick(5) < 5);
        }
        assert_eq!(dice.pick(0), 0);
    }

    #[test]
    fn one_in_ten_hits_roughly_a_tenth_of_the_time() {
        let mut dice = RngDice::from_seed(Some(42));
        let hits = (0..10_000).filter(|_| dice.one_in(10)).count();
        assert!((700..1300).contains(&hits), "hits={hits}");
    }

    #[test]
    fn scripted_dice_replays_then_misses() {
        let mut dice = ScriptedDice::new().roll(true).pick_index(9);
        assert!(dice.one_in(10));
        assert!(!dice.one_in(10));
        assert_eq!(dice.pick(3), 2);
        assert_eq!(dice.pick(3), 0);
    }
}
