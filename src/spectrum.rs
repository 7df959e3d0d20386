//! Spectrum - A fixed-width bit vector backed by an arbitrary-precision value
//!
//! A Spectrum declares its bit length once, at construction. The backing
//! value is a [`BigUint`] that is never allowed to grow past that width:
//! every setter checks `bits(value) <= length` before it writes anything.
//!
//! # Invariant
//!
//! `0 <= value < 2^length` holds after construction and after every
//! successful mutation. A failed mutation leaves the entity untouched.
//!
//! # Example
//! ```
//! use spectrum::{Spectrum, SpectrumError};
//!
//! let mut s = Spectrum::new(7);
//! s.set_u64(127).unwrap();
//! assert_eq!(s.hex_text(), "0x7f");
//! assert_eq!(s.ones_count(), 7);
//!
//! // Eight bits do not fit in seven
//! let err = s.set_u64(0xFF).unwrap_err();
//! assert!(matches!(err, SpectrumError::LengthExceeded { .. }));
//! assert_eq!(s.as_u64().unwrap(), 127);
//! ```

use std::fmt;

use num_bigint::BigUint;
use num_traits::{Num, One, ToPrimitive, Zero};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::error::{Result, SpectrumError};
use crate::weight::WeightStrategy;

/// Fixed-width bit vector with a private, seedable random source.
///
/// The random source is only consumed by weight adjustment. It takes no
/// part in equality, and clones get a freshly seeded one.
#[cfg_attr(
    feature = "serde",
    derive(Serialize, Deserialize),
    serde(into = "SpectrumRepr", try_from = "SpectrumRepr")
)]
pub struct Spectrum {
    pub(crate) length: usize,
    pub(crate) value: BigUint,
    pub(crate) rng: StdRng,
    pub(crate) strategy: WeightStrategy,
}

/// All-ones mask of `bits` width
pub(crate) fn mask(bits: usize) -> BigUint {
    (BigUint::one() << bits) - 1u32
}

/// Bits needed to represent a u64
#[inline]
fn u64_bits(x: u64) -> u64 {
    u64::from(64 - x.leading_zeros())
}

fn check_base(base: u32) -> Result<()> {
    if (2..=36).contains(&base) {
        Ok(())
    } else {
        Err(SpectrumError::InvalidBase(base))
    }
}

/// Resolve base 0 from a `0b`/`0o`/`0x` prefix, falling back to decimal
fn detect_base(text: &str, base: u32) -> (&str, u32) {
    if base != 0 {
        return (text, base);
    }
    let lower = text.get(..2).map(|p| p.to_ascii_lowercase());
    match lower.as_deref() {
        Some("0b") => (&text[2..], 2),
        Some("0o") => (&text[2..], 8),
        Some("0x") => (&text[2..], 16),
        _ => (text, 10),
    }
}

impl Spectrum {
    /// Create a zero-valued spectrum of `length` bits.
    ///
    /// The random source is seeded from OS entropy.
    pub fn new(length: usize) -> Self {
        Self::with_strategy(length, WeightStrategy::default())
    }

    /// Create a zero-valued spectrum that adjusts its weight with `strategy`
    pub fn with_strategy(length: usize, strategy: WeightStrategy) -> Self {
        Self {
            length,
            value: BigUint::zero(),
            rng: StdRng::from_entropy(),
            strategy,
        }
    }

    /// Create a spectrum holding `x`
    pub fn from_u64(length: usize, x: u64) -> Result<Self> {
        let mut s = Self::new(length);
        s.set_u64(x)?;
        Ok(s)
    }

    /// Create a spectrum holding the value parsed from `text` in `base`
    pub fn from_str_radix(length: usize, text: &str, base: u32) -> Result<Self> {
        let mut s = Self::new(length);
        s.set_str(text, base)?;
        Ok(s)
    }

    // === Validated setters ===

    fn check_fits(&self, required: u64) -> Result<()> {
        if required > self.length as u64 {
            log::debug!(
                "rejecting {}-bit value for {}-bit spectrum",
                required,
                self.length
            );
            return Err(SpectrumError::LengthExceeded {
                required,
                length: self.length,
            });
        }
        Ok(())
    }

    /// Set the value to `x`. Fails with `LengthExceeded` if `x` is too wide.
    pub fn set_biguint(&mut self, x: &BigUint) -> Result<&mut Self> {
        self.check_fits(x.bits())?;
        self.value.clone_from(x);
        Ok(self)
    }

    /// Set the value to `x`. Fails with `LengthExceeded` if `x` is too wide.
    pub fn set_u64(&mut self, x: u64) -> Result<&mut Self> {
        self.check_fits(u64_bits(x))?;
        self.value = BigUint::from(x);
        Ok(self)
    }

    /// Set the value from `text` written in `base`.
    ///
    /// Base 0 selects the radix from a `0b`, `0o` or `0x` prefix and
    /// defaults to decimal; a bare leading `0` is still decimal, so octal
    /// needs the explicit `0o`. Digit separators (`_`) are never accepted.
    /// A parse failure is reported as `ParseFailure`, a value that parses
    /// but is too wide as `LengthExceeded`.
    pub fn set_str(&mut self, text: &str, base: u32) -> Result<&mut Self> {
        if base != 0 {
            check_base(base)?;
        }
        let (digits, radix) = detect_base(text, base);
        let parsed = if digits.contains('_') {
            None
        } else {
            BigUint::from_str_radix(digits, radix).ok()
        };
        let parsed = parsed.ok_or_else(|| {
            log::debug!("failed to parse {:?} in base {}", text, radix);
            SpectrumError::ParseFailure {
                text: text.to_string(),
                base,
            }
        })?;
        self.set_biguint(&parsed)
    }

    /// Set or clear a single bit. Setting a bit at or beyond the length fails.
    pub fn set_bit(&mut self, index: usize, on: bool) -> Result<&mut Self> {
        if index >= self.length {
            if on {
                self.check_fits((index as u64).saturating_add(1))?;
            }
            return Ok(self);
        }
        self.value.set_bit(index as u64, on);
        Ok(self)
    }

    /// Reseed the random source. Same seed, same sequence of adjustments.
    pub fn seed(&mut self, seed: u64) {
        log::debug!("reseeding spectrum rng with {}", seed);
        self.rng = StdRng::seed_from_u64(seed);
    }

    /// Weight adjustment strategy
    pub fn strategy(&self) -> WeightStrategy {
        self.strategy
    }

    /// Change the weight adjustment strategy; the value is left as is
    pub fn set_strategy(&mut self, strategy: WeightStrategy) {
        self.strategy = strategy;
    }

    // === Accessors ===

    /// Declared bit length
    #[inline]
    pub fn len(&self) -> usize {
        self.length
    }

    /// True when the declared length is zero
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.length == 0
    }

    /// Population count (Hamming weight)
    pub fn ones_count(&self) -> usize {
        self.value
            .iter_u64_digits()
            .map(|d| d.count_ones() as usize)
            .sum()
    }

    /// Bit at `index`; false beyond the declared length
    #[inline]
    pub fn bit(&self, index: usize) -> bool {
        index < self.length && self.value.bit(index as u64)
    }

    /// The value as u64, or `NotRepresentable` if it needs more than 64 bits
    pub fn as_u64(&self) -> Result<u64> {
        self.value
            .to_u64()
            .ok_or(SpectrumError::NotRepresentable {
                bits: self.value.bits(),
            })
    }

    /// An owned copy of the value
    pub fn as_biguint(&self) -> BigUint {
        self.value.clone()
    }

    // === Formatting ===

    /// Base-2 digits padded to the declared length, prefixed with `0b`
    pub fn binary_text(&self) -> String {
        format!("0b{:0>width$}", self.value.to_str_radix(2), width = self.length)
    }

    /// Raw digits in `base` (2..=36), no padding, no prefix
    pub fn text(&self, base: u32) -> Result<String> {
        check_base(base)?;
        Ok(self.value.to_str_radix(base))
    }

    /// Base-16 digits padded to `ceil(length / 4)`, prefixed with `0x`
    pub fn hex_text(&self) -> String {
        format!("0x{:0>width$}", self.value.to_str_radix(16), width = self.hex_width())
    }

    #[inline]
    fn hex_width(&self) -> usize {
        (self.length + 3) / 4
    }
}

impl Clone for Spectrum {
    /// Copy length, value and strategy. The random source is seeded afresh.
    fn clone(&self) -> Self {
        Self {
            length: self.length,
            value: self.value.clone(),
            rng: StdRng::from_entropy(),
            strategy: self.strategy,
        }
    }
}

impl PartialEq for Spectrum {
    fn eq(&self, other: &Self) -> bool {
        self.length == other.length && self.value == other.value
    }
}

impl Eq for Spectrum {}

impl fmt::Debug for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Spectrum")
            .field("length", &self.length)
            .field("value", &self.hex_text())
            .field("strategy", &self.strategy)
            .finish()
    }
}

impl fmt::Display for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.binary_text())
    }
}

impl fmt::LowerHex for Spectrum {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if f.alternate() {
            f.write_str("0x")?;
        }
        write!(f, "{:0>width$}", self.value.to_str_radix(16), width = self.hex_width())
    }
}

/// Wire form: length plus unprefixed hex digits
#[cfg(feature = "serde")]
#[derive(Serialize, Deserialize)]
struct SpectrumRepr {
    length: usize,
    value: String,
    #[serde(default)]
    strategy: WeightStrategy,
}

#[cfg(feature = "serde")]
impl From<Spectrum> for SpectrumRepr {
    fn from(s: Spectrum) -> Self {
        Self {
            length: s.length,
            value: s.value.to_str_radix(16),
            strategy: s.strategy,
        }
    }
}

#[cfg(feature = "serde")]
impl TryFrom<SpectrumRepr> for Spectrum {
    type Error = SpectrumError;

    fn try_from(repr: SpectrumRepr) -> Result<Self> {
        let mut s = Spectrum::with_strategy(repr.length, repr.strategy);
        s.set_str(&repr.value, 16)?;
        Ok(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BITS32: u64 = 0xFFFF_FFFF;
    const BITS64: u64 = 0xFFFF_FFFF_FFFF_FFFF;

    #[test]
    fn test_new_is_zero() {
        let s = Spectrum::new(64);
        assert_eq!(s.len(), 64);
        assert_eq!(s.ones_count(), 0);
        assert!(s.as_biguint().is_zero());
    }

    #[test]
    fn test_set_within_length() {
        let mut s = Spectrum::new(32);
        s.set_biguint(&BigUint::from(BITS32)).unwrap();
        assert_eq!(s.as_u64().unwrap(), BITS32);

        s.set_u64(BITS32).unwrap();
        s.set_str("FFFFFFFF", 16).unwrap();
        assert_eq!(s.as_biguint(), BigUint::from(BITS32));
    }

    #[test]
    fn test_set_rejects_wide_values_without_mutation() {
        let mut s = Spectrum::from_u64(32, 0x1234).unwrap();

        let err = s.set_biguint(&BigUint::from(BITS64)).unwrap_err();
        assert_eq!(err, SpectrumError::LengthExceeded { required: 64, length: 32 });
        assert!(s.set_u64(BITS64).is_err());
        assert!(matches!(
            s.set_str("FFFFFFFFFFFFFFFF", 16),
            Err(SpectrumError::LengthExceeded { .. })
        ));

        // Prior value survives every failed write
        assert_eq!(s.as_u64().unwrap(), 0x1234);
    }

    #[test]
    fn test_parse_failure_is_distinct() {
        let mut s = Spectrum::from_u64(8, 5).unwrap();
        assert!(matches!(
            s.set_str("12", 2),
            Err(SpectrumError::ParseFailure { base: 2, .. })
        ));
        assert!(matches!(s.set_str("", 10), Err(SpectrumError::ParseFailure { .. })));
        assert_eq!(s.set_str("ff", 99).unwrap_err(), SpectrumError::InvalidBase(99));

        // Separators are not digits
        assert!(matches!(
            s.set_str("1_0", 2),
            Err(SpectrumError::ParseFailure { base: 2, .. })
        ));
        assert!(matches!(s.set_str("0x1_0", 0), Err(SpectrumError::ParseFailure { .. })));
        assert_eq!(s.as_u64().unwrap(), 5);
    }

    #[test]
    fn test_base_zero_detects_prefix() {
        let mut s = Spectrum::new(16);
        s.set_str("0b1010", 0).unwrap();
        assert_eq!(s.as_u64().unwrap(), 10);
        s.set_str("0x1F", 0).unwrap();
        assert_eq!(s.as_u64().unwrap(), 31);
        s.set_str("0o17", 0).unwrap();
        assert_eq!(s.as_u64().unwrap(), 15);
        s.set_str("250", 0).unwrap();
        assert_eq!(s.as_u64().unwrap(), 250);

        // Leading zero without a prefix stays decimal
        s.set_str("0755", 0).unwrap();
        assert_eq!(s.as_u64().unwrap(), 755);
    }

    #[test]
    fn test_zero_length() {
        let mut s = Spectrum::new(0);
        assert!(s.is_empty());
        s.set_u64(0).unwrap();
        assert!(s.set_u64(1).is_err());
        assert_eq!(s.ones_count(), 0);
    }

    #[test]
    fn test_bit_access() {
        let mut s = Spectrum::new(8);
        s.set_bit(0, true).unwrap().set_bit(7, true).unwrap();
        assert_eq!(s.as_u64().unwrap(), 0b1000_0001);
        assert!(s.bit(7));
        assert!(!s.bit(8));

        assert!(s.set_bit(8, true).is_err());
        s.set_bit(8, false).unwrap();
        s.set_bit(0, false).unwrap();
        assert_eq!(s.as_u64().unwrap(), 0b1000_0000);
    }

    #[test]
    fn test_set_bit_at_max_index() {
        let mut s = Spectrum::from_u64(8, 0b11).unwrap();
        assert!(matches!(
            s.set_bit(usize::MAX, true),
            Err(SpectrumError::LengthExceeded { length: 8, .. })
        ));
        s.set_bit(usize::MAX, false).unwrap();
        assert_eq!(s.as_u64().unwrap(), 0b11);
    }

    #[test]
    fn test_as_u64_not_representable() {
        let mut s = Spectrum::new(128);
        s.set_u64(BITS64).unwrap();
        assert_eq!(s.as_u64().unwrap(), BITS64);

        s.set_str("1ffffffffffffffff", 16).unwrap();
        assert_eq!(
            s.as_u64().unwrap_err(),
            SpectrumError::NotRepresentable { bits: 65 }
        );
    }

    #[test]
    fn test_as_biguint_is_a_copy() {
        let s = Spectrum::from_u64(64, BITS32).unwrap();
        let mut got = s.as_biguint();
        got += BigUint::from(BITS64);
        assert_ne!(got, s.as_biguint());
        assert_eq!(s.as_u64().unwrap(), BITS32);
    }

    #[test]
    fn test_ones_count() {
        let mut s = Spectrum::new(64);
        s.set_u64(BITS64).unwrap();
        assert_eq!(s.ones_count(), 64);
        s.set_u64(BITS32).unwrap();
        assert_eq!(s.ones_count(), 32);

        let mut wide = Spectrum::new(200);
        wide.set_biguint(&mask(200)).unwrap();
        assert_eq!(wide.ones_count(), 200);
    }

    #[test]
    fn test_formatting() {
        let s = Spectrum::from_u64(64, BITS32).unwrap();
        assert_eq!(
            s.binary_text(),
            "0b0000000000000000000000000000000011111111111111111111111111111111"
        );
        assert_eq!(s.text(10).unwrap(), "4294967295");
        assert_eq!(s.hex_text(), "0x00000000ffffffff");
        assert_eq!(format!("{:#x}", s), "0x00000000ffffffff");
        assert_eq!(s.to_string(), s.binary_text());
        assert_eq!(s.text(1).unwrap_err(), SpectrumError::InvalidBase(1));
    }

    #[test]
    fn test_hex_pads_to_nibbles_not_bits() {
        let s7 = Spectrum::from_u64(7, 127).unwrap();
        assert_eq!(s7.hex_text(), "0x7f");

        let s9 = Spectrum::from_u64(9, 1).unwrap();
        assert_eq!(s9.hex_text(), "0x001");
    }

    #[test]
    fn test_binary_full_width() {
        let s = Spectrum::from_u64(32, BITS32).unwrap();
        assert_eq!(s.binary_text(), format!("0b{}", "1".repeat(32)));
    }

    #[test]
    fn test_clone_is_independent() {
        let s = Spectrum::from_u64(64, 7).unwrap();
        let mut copy = s.clone();
        assert_eq!(copy, s);

        copy.set_u64(1).unwrap();
        assert_eq!(s.as_u64().unwrap(), 7);
        assert_ne!(copy, s);
    }

    #[test]
    fn test_clone_does_not_share_seeded_stream() {
        let mut a = Spectrum::with_strategy(256, WeightStrategy::Exact);
        a.seed(11);
        let mut b = a.clone();

        a.adjust_ones_count(128).unwrap();
        b.adjust_ones_count(128).unwrap();
        assert_eq!(a.ones_count(), b.ones_count());
        assert_ne!(a, b);

        // Reseeding both brings them back in step
        a.set_u64(0).unwrap().seed(11);
        b.set_u64(0).unwrap().seed(11);
        a.adjust_ones_count(128).unwrap();
        b.adjust_ones_count(128).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_equality_ignores_rng() {
        let mut a = Spectrum::from_u64(16, 9).unwrap();
        let b = Spectrum::from_u64(16, 9).unwrap();
        a.seed(42);
        assert_eq!(a, b);
        assert_ne!(a, Spectrum::from_u64(17, 9).unwrap());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_serde_validates_on_load() {
        let s = Spectrum::from_u64(12, 0xABC).unwrap();
        let json = serde_json::to_string(&s).unwrap();
        let restored: Spectrum = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, s);

        let bad = r#"{"length":4,"value":"ff"}"#;
        assert!(serde_json::from_str::<Spectrum>(bad).is_err());
    }
}
