//! RNG oracle for the dice rolls of the game.
//!
//! Every probabilistic rule (zone generation, attack contests, luck checks,
//! world switching, turn order) draws through [`RngOracle`]. The console
//! seeds one [`PcgRng`] per process; tests replay fixed draws through
//! [`ScriptedRng`].

use std::collections::VecDeque;

/// Source of uniform integer draws.
///
/// Draws are independent; `range` is inclusive on both ends.
pub trait RngOracle {
    /// Generate the next raw 32-bit value.
    fn next_u32(&mut self) -> u32;

    /// Generate a random value in range [min, max] inclusive.
    ///
    /// Raw values from the incomplete last block of `2^32 mod span` are
    /// redrawn, so every value of the range is equally likely.
    fn range(&mut self, min: u32, max: u32) -> u32 {
        if min >= max {
            return min;
        }
        let span = u64::from(max - min) + 1;
        let limit = (1u64 << 32) - (1u64 << 32) % span;
        loop {
            let raw = u64::from(self.next_u32());
            if raw < limit {
                return min + (raw % span) as u32;
            }
        }
    }

    /// Roll a d20 (1-20 inclusive). Used for contests and luck checks.
    fn roll_d20(&mut self) -> u32 {
        self.range(1, 20)
    }

    /// Roll a d100 (1-100 inclusive). Used for percentage tables.
    fn roll_d100(&mut self) -> u32 {
        self.range(1, 100)
    }
}

impl<R: RngOracle + ?Sized> RngOracle for &mut R {
    fn next_u32(&mut self) -> u32 {
        (**self).next_u32()
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        (**self).range(min, max)
    }
}

/// Uniformly permutes `items` in place (Fisher-Yates).
pub fn shuffle<T>(rng: &mut (impl RngOracle + ?Sized), items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.range(0, i as u32) as usize;
        items.swap(i, j);
    }
}

/// PCG random number generator (Permuted Congruential Generator).
///
/// PCG-XSH-RR: 32-bit output from 64-bit state. Same seed, same sequence.
///
/// # References
///
/// - PCG paper: <https://www.pcg-random.org/>
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PcgRng {
    state: u64,
}

impl PcgRng {
    /// PCG multiplier constant.
    const MULTIPLIER: u64 = 6364136223846793005;

    /// PCG increment constant.
    const INCREMENT: u64 = 1442695040888963407;

    /// Creates a generator whose sequence is fully determined by `seed`.
    pub fn seeded(seed: u64) -> Self {
        let mut rng = Self { state: 0 };
        rng.state = Self::pcg_step(rng.state.wrapping_add(seed));
        rng
    }

    /// `state' = (state × multiplier + increment) mod 2^64`
    #[inline]
    fn pcg_step(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }

    /// PCG output function using XSH-RR (xorshift high, random rotate).
    #[inline]
    fn pcg_output(state: u64) -> u32 {
        let xorshifted = (((state >> 18) ^ state) >> 27) as u32;
        let rot = (state >> 59) as u32;
        xorshifted.rotate_right(rot)
    }
}

impl RngOracle for PcgRng {
    fn next_u32(&mut self) -> u32 {
        let old = self.state;
        self.state = Self::pcg_step(old);
        Self::pcg_output(old)
    }
}

/// Replays a fixed list of draws, then repeats a fallback value.
///
/// `range` returns the scripted value clamped into `[min, max]`, so a script
/// is written in terms of the rolls it wants ("d20 shows 20"), not raw bits.
/// Useful for fixtures, tutorials and tests.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScriptedRng {
    draws: VecDeque<u32>,
    fallback: u32,
}

impl ScriptedRng {
    /// Replays `draws` in order; once exhausted every draw yields the
    /// lowest value of the requested range.
    pub fn new(draws: impl IntoIterator<Item = u32>) -> Self {
        Self {
            draws: draws.into_iter().collect(),
            fallback: 0,
        }
    }

    /// Every draw yields `value` (clamped into the requested range).
    pub fn constant(value: u32) -> Self {
        Self {
            draws: VecDeque::new(),
            fallback: value,
        }
    }

    /// Replaces the value used once the script runs out.
    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }

    /// Draws not consumed yet.
    pub fn remaining(&self) -> usize {
        self.draws.len()
    }

    fn pop(&mut self) -> u32 {
        self.draws.pop_front().unwrap_or(self.fallback)
    }
}

impl RngOracle for ScriptedRng {
    fn next_u32(&mut self) -> u32 {
        self.pop()
    }

    fn range(&mut self, min: u32, max: u32) -> u32 {
        self.pop().clamp(min, max.max(min))
    }
}
