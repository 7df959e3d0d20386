//! Weight adjustment - Drive a spectrum to an exact Hamming weight
//!
//! Bits are flipped at random positions until the population count hits
//! the target. Three strategies are available, chosen per entity:
//!
//! 1. **RandomFlip** - pick a position in `[0, length)`, set it (or clear it)
//!    and repeat. A pick that lands on a bit already in the wanted state is
//!    a wasted iteration.
//! 2. **FillThenShrink** - for targets above half the width, set every bit
//!    first and then clear random bits back down to the target.
//! 3. **Exact** - draw exactly as many distinct positions as needed from
//!    the bits in the opposite state. No wasted iterations.
//!
//! # Liveness
//!
//! RandomFlip and FillThenShrink have no fixed iteration bound. They
//! terminate with probability 1, in `O(length * log(length))` expected
//! iterations for extreme targets. Exact terminates in `O(length)` steps.
//! Targets above the length are rejected before any loop is entered.

use rand::seq::index;
use rand::Rng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpectrumError};
use crate::spectrum::{mask, Spectrum};

/// How `adjust_ones_count` reaches its target weight
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum WeightStrategy {
    /// Single random flips until the weight matches
    #[default]
    RandomFlip,
    /// Fill to all ones first when the target exceeds half the width
    FillThenShrink,
    /// Sample exactly the needed number of distinct positions
    Exact,
}

impl WeightStrategy {
    /// Parse a short CLI name: `flip`, `fill` or `exact`
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "flip" | "random-flip" => Some(Self::RandomFlip),
            "fill" | "fill-then-shrink" => Some(Self::FillThenShrink),
            "exact" => Some(Self::Exact),
            _ => None,
        }
    }
}

impl Spectrum {
    /// Mutate the value in place until exactly `target` bits are set.
    ///
    /// Fails with `WeightOutOfRange` if `target > len()`, leaving the
    /// value untouched.
    pub fn adjust_ones_count(&mut self, target: usize) -> Result<&mut Self> {
        if target > self.length {
            return Err(SpectrumError::WeightOutOfRange {
                target,
                length: self.length,
            });
        }

        let iterations = match self.strategy {
            WeightStrategy::RandomFlip => self.flip_until(target),
            WeightStrategy::FillThenShrink => {
                if target > self.length / 2 && self.ones_count() < target {
                    self.value = mask(self.length);
                }
                self.flip_until(target)
            }
            WeightStrategy::Exact => self.sample_until(target),
        };

        log::trace!(
            "adjusted {}-bit spectrum to weight {} in {} iterations ({:?})",
            self.length,
            target,
            iterations,
            self.strategy
        );
        debug_assert_eq!(self.ones_count(), target);
        Ok(self)
    }

    fn flip_until(&mut self, target: usize) -> u64 {
        let mut ones = self.ones_count();
        let mut iterations = 0u64;

        while ones != target {
            let grow = ones < target;
            let pos = self.rng.gen_range(0..self.length) as u64;
            if self.value.bit(pos) != grow {
                self.value.set_bit(pos, grow);
                if grow {
                    ones += 1;
                } else {
                    ones -= 1;
                }
            }
            iterations += 1;
        }

        iterations
    }

    fn sample_until(&mut self, target: usize) -> u64 {
        let ones = self.ones_count();
        if ones == target {
            return 0;
        }

        // Candidates are the bits that must change state
        let grow = ones < target;
        let candidates: Vec<u64> = (0..self.length as u64)
            .filter(|&pos| self.value.bit(pos) != grow)
            .collect();
        let needed = target.abs_diff(ones);

        for i in index::sample(&mut self.rng, candidates.len(), needed) {
            self.value.set_bit(candidates[i], grow);
        }

        needed as u64
    }

    /// A random u64 with exactly `n` bits set within this spectrum's width.
    ///
    /// Works on a throwaway copy; `self` is not modified.
    pub fn random_u64_with_weight(&self, n: usize) -> Result<u64> {
        let mut scratch = self.clone();
        scratch.adjust_ones_count(n)?;
        scratch.as_u64()
    }

    /// A random value with exactly `n` bits set within this spectrum's width.
    ///
    /// Works on a throwaway copy; `self` is not modified.
    pub fn random_biguint_with_weight(&self, n: usize) -> Result<num_bigint::BigUint> {
        let mut scratch = self.clone();
        scratch.adjust_ones_count(n)?;
        Ok(scratch.as_biguint())
    }
}
