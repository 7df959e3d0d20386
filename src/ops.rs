//! Bitwise combinators and circular rotation
//!
//! The raw combinators (`and`, `or`, `and_not`, `xor`) return a plain
//! [`BigUint`]. Operands of different lengths are zero-extended to the
//! wider one, so the result always fits in `max(a.len(), b.len())` bits.
//! Nothing re-checks a declared length on the raw result; wrap it in a new
//! spectrum with a validated setter if a length is needed, or use
//! [`combine`], which insists on equal lengths.
//!
//! Rotations return a new spectrum of the same length. Bits leaving one
//! end of the field re-enter at the other, so weight is preserved and
//! rotating by `n` is the same as rotating by `n % len`.

use num_bigint::BigUint;

use crate::error::{Result, SpectrumError};
use crate::spectrum::{mask, Spectrum};

/// Bitwise operation selector for [`combine`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum BitOp {
    And,
    Or,
    /// `a & !b`
    AndNot,
    Xor,
}

impl BitOp {
    /// Apply to two raw values
    pub fn apply(self, a: &BigUint, b: &BigUint) -> BigUint {
        match self {
            BitOp::And => a & b,
            BitOp::Or => a | b,
            BitOp::AndNot => a ^ (a & b),
            BitOp::Xor => a ^ b,
        }
    }
}

/// `a & b`
pub fn and(a: &Spectrum, b: &Spectrum) -> BigUint {
    BitOp::And.apply(&a.value, &b.value)
}

/// `a | b`
pub fn or(a: &Spectrum, b: &Spectrum) -> BigUint {
    BitOp::Or.apply(&a.value, &b.value)
}

/// `a & !b`
pub fn and_not(a: &Spectrum, b: &Spectrum) -> BigUint {
    BitOp::AndNot.apply(&a.value, &b.value)
}

/// `a ^ b`
pub fn xor(a: &Spectrum, b: &Spectrum) -> BigUint {
    BitOp::Xor.apply(&a.value, &b.value)
}

/// Combine two spectra of equal length into a new one.
///
/// Fails with `LengthMismatch` when the lengths differ. The result takes
/// `a`'s weight strategy.
pub fn combine(op: BitOp, a: &Spectrum, b: &Spectrum) -> Result<Spectrum> {
    if a.length != b.length {
        return Err(SpectrumError::LengthMismatch {
            left: a.length,
            right: b.length,
        });
    }

    let mut out = Spectrum::with_strategy(a.length, a.strategy);
    out.set_biguint(&op.apply(&a.value, &b.value))?;
    Ok(out)
}

/// Rotate right by `n`: the low bits wrap around to the top
pub fn rotate_right(s: &Spectrum, n: usize) -> Spectrum {
    let mut rotated = s.clone();
    if s.length == 0 {
        return rotated;
    }

    let shift = n % s.length;
    if shift != 0 {
        let low = &s.value & mask(shift);
        rotated.value = (&s.value >> shift) | (low << (s.length - shift));
    }
    debug_assert!(rotated.value.bits() <= s.length as u64);
    rotated
}

/// Rotate left by `n`: the high bits wrap around to the bottom
pub fn rotate_left(s: &Spectrum, n: usize) -> Spectrum {
    let mut rotated = s.clone();
    if s.length == 0 {
        return rotated;
    }

    let shift = n % s.length;
    if shift != 0 {
        let high = &s.value >> (s.length - shift);
        rotated.value = ((&s.value << shift) & mask(s.length)) | high;
    }
    debug_assert!(rotated.value.bits() <= s.length as u64);
    rotated
}
