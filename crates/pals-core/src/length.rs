//! # Element Lengths
//!
//! Segment lengths in meters. Thick elements carry a [`Length`], which is
//! validated at construction and at deserialization: negative, infinite,
//! and NaN values never make it into an element. Zero-length elements such as
//! markers carry a [`ZeroLength`], which always reads as `0.0`.

use serde::{Deserialize, Serialize};

use crate::error::ElementError;

/// Helper macro to implement `Deserialize` for float newtypes that must
/// validate their contents. Deserializes as a plain `f64`, then routes
/// through the type's `new()` constructor so that invalid values are
/// rejected at deserialization time.
macro_rules! impl_validating_deserialize {
    ($ty:ident) => {
        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
            where
                D: serde::Deserializer<'de>,
            {
                let raw = f64::deserialize(deserializer)?;
                Self::new(raw).map_err(serde::de::Error::custom)
            }
        }
    };
}

/// A non-negative segment length in meters.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize)]
pub struct Length(f64);

impl_validating_deserialize!(Length);

impl Length {
    /// Create a length, rejecting negative and non-finite values.
    ///
    /// # Errors
    ///
    /// - [`ElementError::NonFiniteLength`] for NaN or an infinity.
    /// - [`ElementError::NegativeLength`] for a finite value below zero.
    pub fn new(meters: f64) -> Result<Self, ElementError> {
        if !meters.is_finite() {
            tracing::debug!(length = meters, "rejected non-finite element length");
            return Err(ElementError::NonFiniteLength { length: meters });
        }
        if meters < 0.0 {
            tracing::debug!(length = meters, "rejected element length");
            return Err(ElementError::NegativeLength { length: meters });
        }
        Ok(Self(meters))
    }

    /// Length in meters.
    pub fn meters(&self) -> f64 {
        self.0
    }
}

impl TryFrom<f64> for Length {
    type Error = ElementError;

    fn try_from(meters: f64) -> Result<Self, Self::Error> {
        Self::new(meters)
    }
}

impl From<Length> for f64 {
    fn from(length: Length) -> Self {
        length.0
    }
}

impl PartialEq<f64> for Length {
    fn eq(&self, other: &f64) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Length {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} m", self.0)
    }
}

/// The fixed length of a zero-length element.
///
/// Serializes as `0.0`; deserialization accepts only zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ZeroLength;

impl_validating_deserialize!(ZeroLength);

impl ZeroLength {
    /// Accept `meters` only if it is zero.
    ///
    /// # Errors
    ///
    /// Returns [`ElementError::NonZeroLength`] for any other value.
    pub fn new(meters: f64) -> Result<Self, ElementError> {
        if meters != 0.0 {
            tracing::debug!(length = meters, "rejected length on zero-length element");
            return Err(ElementError::NonZeroLength { length: meters });
        }
        Ok(Self)
    }

    /// Always `0.0`.
    pub fn meters(&self) -> f64 {
        0.0
    }
}

impl Serialize for ZeroLength {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(0.0)
    }
}
