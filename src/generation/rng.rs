//! Random sources for structure placement.
//!
//! Every generator consumes one `RandomSource` sequentially. The draw order
//! is part of the contract: two runs with the same seed, anchor and grid
//! must make the same draws in the same order to produce the same structure.

/// A sequential source of pseudo-random integers.
pub trait RandomSource {
    /// Uniform integer in `[0, bound)`. `bound` must be positive.
    fn next_int(&mut self, bound: i32) -> i32;

    /// Uniform 64-bit integer
    fn next_long(&mut self) -> i64;
}

/// 48-bit linear congruential generator.
///
/// Bit-compatible with the reference worlds' legacy random source, so a
/// given seed yields the same draw sequence (and therefore the same
/// structures) as the worlds the constants were tuned against.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LegacyRandom {
    state: i64,
}

impl LegacyRandom {
    const MULTIPLIER: i64 = 0x5DEECE66D;
    const ADDEND: i64 = 0xB;
    const MASK: i64 = (1 << 48) - 1;

    pub fn new(seed: i64) -> Self {
        Self { state: (seed ^ Self::MULTIPLIER) & Self::MASK }
    }

    /// Advance state and return the top `bits` bits (1..=32)
    fn next_bits(&mut self, bits: u32) -> i32 {
        self.state = self.state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::ADDEND)
            & Self::MASK;
        (self.state >> (48 - bits)) as i32
    }
}

impl RandomSource for LegacyRandom {
    fn next_int(&mut self, bound: i32) -> i32 {
        debug_assert!(bound > 0, "bound must be positive, got {bound}");
        let bound = bound.max(1);

        // Power of two: take the high bits directly
        if bound & bound.wrapping_neg() == bound {
            return ((bound as i64 * self.next_bits(31) as i64) >> 31) as i32;
        }

        // Reject draws from the final partial bucket to stay uniform
        loop {
            let bits = self.next_bits(31);
            let value = bits % bound;
            if bits.wrapping_sub(value).wrapping_add(bound - 1) >= 0 {
                return value;
            }
        }
    }

    fn next_long(&mut self) -> i64 {
        let hi = (self.next_bits(32) as i64) << 32;
        hi.wrapping_add(self.next_bits(32) as i64)
    }
}

/// Replays a fixed list of bounded draws, to steer a generator down one
/// branch in tests. Panics when the list runs out.
#[cfg(test)]
pub(crate) struct ScriptedRandom {
    draws: std::collections::VecDeque<i32>,
}

#[cfg(test)]
impl ScriptedRandom {
    pub(crate) fn new(draws: &[i32]) -> Self {
        Self { draws: draws.iter().copied().collect() }
    }

    /// Draws not yet consumed
    pub(crate) fn remaining(&self) -> usize {
        self.draws.len()
    }
}

#[cfg(test)]
impl RandomSource for ScriptedRandom {
    fn next_int(&mut self, bound: i32) -> i32 {
        let value = self.draws.pop_front().expect("scripted draws exhausted");
        assert!((0..bound).contains(&value), "scripted draw {value} outside [0, {bound})");
        value
    }

    fn next_long(&mut self) -> i64 {
        panic!("next_long is not scripted")
    }
}

/// Answers every bounded draw from a function of the bound alone
#[cfg(test)]
pub(crate) struct BoundedAnswers<F: FnMut(i32) -> i32>(pub(crate) F);

#[cfg(test)]
impl<F: FnMut(i32) -> i32> RandomSource for BoundedAnswers<F> {
    fn next_int(&mut self, bound: i32) -> i32 {
        let value = (self.0)(bound);
        assert!((0..bound).contains(&value), "answer {value} outside [0, {bound})");
        value
    }

    fn next_long(&mut self) -> i64 {
        panic!("next_long is not scripted")
    }
}
