//! Concatenation of two spectra into a longer one

use crate::error::{Result, SpectrumError};
use crate::spectrum::Spectrum;

/// Concatenate `high` and `low` into a spectrum of `high.len() + low.len()` bits.
///
/// The result is `(high << low.len()) | low`. It takes `high`'s weight
/// strategy and a fresh random source.
pub fn merge(high: &Spectrum, low: &Spectrum) -> Result<Spectrum> {
    let length = high
        .length
        .checked_add(low.length)
        .ok_or(SpectrumError::LengthOverflow {
            left: high.length,
            right: low.length,
        })?;

    let mut merged = Spectrum::with_strategy(length, high.strategy);
    merged.set_biguint(&((&high.value << low.length) | &low.value))?;
    Ok(merged)
}
