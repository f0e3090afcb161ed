// src/number.rs

//! Numeric requirements shared by every controller in the crate.
//!
//! The transition core is written against a generic scalar so that it can run
//! on targets with or without a floating point unit. Any type that satisfies
//! the `num-traits` bounds below can be used; tests use `f32` and the
//! `I16F16` fixed point type.
//!
//! The stock limits and gains need a type covering at least `[-10000, 10000]`
//! with a resolution of `0.001` or finer. Narrower types silently lose the
//! constants they cannot hold; [`crate::QuadPlaneConfig::validate`] rejects a
//! configuration whose limits collapsed to zero this way.

use core::ops::Neg;
use num_traits::{FromPrimitive, Num};

/// Custom trait to encapsulate base number requirements.
pub trait Number: Num + Copy + PartialOrd + Neg<Output = Self> + FromPrimitive {
    /// Clamps generic PartialOrd values within a given range.
    fn clamp(self, min: Self, max: Self) -> Self {
        if self < min {
            min
        } else if max < self {
            max
        } else {
            self
        }
    }

    /// Converts a compile time constant into `Self`.
    ///
    /// Constants that cannot be represented fall back to zero, which is the
    /// inert command for every quantity this crate produces.
    fn constant(value: f32) -> Self {
        Self::from_f32(value).unwrap_or_else(Self::zero)
    }

    /// Converts a millisecond count into `Self`, saturating at zero on failure.
    fn from_millis(ms: u32) -> Self {
        Self::from_u32(ms).unwrap_or_else(Self::zero)
    }

    /// Returns `false` for NaN and for infinities.
    ///
    /// A finite value minus itself is exactly zero; NaN and both infinities
    /// give NaN.
    #[allow(clippy::eq_op)]
    fn is_valid(self) -> bool {
        self - self == Self::zero()
    }

    /// Replaces invalid values with `fallback`.
    fn or_if_invalid(self, fallback: Self) -> Self {
        if self.is_valid() {
            self
        } else {
            fallback
        }
    }

    /// Absolute value.
    fn magnitude(self) -> Self {
        if self < Self::zero() {
            -self
        } else {
            self
        }
    }
}

impl<T: Num + Copy + PartialOrd + Neg<Output = T> + FromPrimitive> Number for T {}
