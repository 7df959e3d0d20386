//! # Spectrum - Fixed-width bit vectors
//!
//! Bit patterns of a declared length, backed by an arbitrary-precision
//! unsigned value. Built for generating stimulus and test vectors where
//! the number of set bits (the Hamming weight) must be exact.
//!
//! ## Core Components
//!
//! - **Spectrum**: Declared length + value, every write validated against the length
//! - **Weight adjustment**: Randomized, seedable, drives the value to an exact weight
//! - **Combinators**: AND / OR / AND-NOT / XOR over two spectra
//! - **Rotation**: Circular shifts within the declared width
//! - **Merge**: Concatenation into a longer spectrum
//!
//! ## Design Principles
//!
//! - **Length is law**: `value < 2^length`, always; failed writes change nothing
//! - **No aliasing**: getters hand out copies, never references to the backing value
//! - **Private randomness**: each spectrum owns its random source, clones reseed
//!
//! ## Example
//!
//! ```
//! use spectrum::{merge, rotate_left, Spectrum, WeightStrategy};
//!
//! let mut s = Spectrum::with_strategy(16, WeightStrategy::Exact);
//! s.seed(42);
//! s.adjust_ones_count(5).unwrap();
//! assert_eq!(s.ones_count(), 5);
//!
//! let r = rotate_left(&s, 16);
//! assert_eq!(r, s);
//!
//! let wide = merge(&s, &r).unwrap();
//! assert_eq!(wide.len(), 32);
//! assert_eq!(wide.ones_count(), 10);
//! ```

// Spectrum - the fixed-width entity
mod spectrum;
pub use spectrum::Spectrum;

// Weight adjustment
pub mod weight;
pub use weight::WeightStrategy;

// Bitwise combinators and rotation
pub mod ops;
pub use ops::{and, and_not, combine, or, rotate_left, rotate_right, xor, BitOp};

// Concatenation
pub mod merge;
pub use merge::merge;

// Error types
mod error;
pub use error::{Result, SpectrumError};

// Backing integer type, re-exported so callers need not depend on num-bigint
pub use num_bigint::BigUint;
