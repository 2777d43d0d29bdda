//! # Error Types — Validation Failures
//!
//! Defines the error types used throughout the PALS model. All errors use
//! `thiserror` for derive-based `Display` and `Error` implementations.
//!
//! ## Design
//!
//! - Multipole errors name the offending field, the parameter family,
//!   and the canonical pattern(s) the field was expected to follow.
//! - Element errors name the element kind and the violated constraint.
//! - Every error is raised at construction or mutation time. A failed
//!   call leaves no partially built value behind.

use thiserror::Error;

use crate::prefix::Family;

/// Top-level error type for the PALS model.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PalsError {
    /// A multipole parameter block rejected one of its fields.
    #[error("multipole parameter error: {0}")]
    Multipole(#[from] MultipoleError),

    /// An element violated a structural constraint.
    #[error("element error: {0}")]
    Element(#[from] ElementError),

    /// Serialization/deserialization error.
    #[error("serialization error: {0}")]
    Serialization(String),
}

/// Rejection of a multipole parameter field name.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MultipoleError {
    /// The base of the field name matches no registered prefix.
    #[error(
        "invalid {family} multipole parameter: '{field}'. Parameters must be of the form {allowed} \
         (with optional 'L' suffix for length-integrated), where 'N' is a non-negative integer"
    )]
    UnknownParameter {
        /// The rejected field name.
        field: String,
        /// Parameter family the field was checked against.
        family: Family,
        /// Human-readable list of the family's canonical formats.
        allowed: String,
    },

    /// The prefix was recognized but the order token is not a valid order.
    #[error(
        "invalid {family} multipole parameter: '{field}'. Parameter must be of the form \
         '{expected_format}', where 'N' is a non-negative integer without leading zeros"
    )]
    MalformedOrder {
        /// The rejected field name.
        field: String,
        /// Parameter family the field was checked against.
        family: Family,
        /// Canonical format of the matched prefix (e.g. `EnN`).
        expected_format: &'static str,
    },

    /// A `tilt` field carries the length-integration suffix.
    #[error(
        "invalid {family} multipole parameter: '{field}'. Tilt parameters have no \
         length-integrated form; use 'tiltN'"
    )]
    InvalidTiltSuffix {
        /// The rejected field name.
        field: String,
        /// Parameter family the field was checked against.
        family: Family,
    },

    /// The field name is valid but its value is NaN or infinite.
    #[error("invalid {family} multipole parameter: '{field}'. Value must be a finite number")]
    NonFiniteValue {
        /// The field whose value was rejected.
        field: String,
        /// Parameter family the field was checked against.
        family: Family,
    },

    /// The same field name was supplied more than once.
    #[error("duplicate {family} multipole parameter: '{field}'")]
    DuplicateParameter {
        /// The repeated field name.
        field: String,
        /// Parameter family of the block being built.
        family: Family,
    },
}

impl MultipoleError {
    /// The field name that caused the rejection.
    pub fn field(&self) -> &str {
        match self {
            Self::UnknownParameter { field, .. }
            | Self::MalformedOrder { field, .. }
            | Self::InvalidTiltSuffix { field, .. }
            | Self::NonFiniteValue { field, .. }
            | Self::DuplicateParameter { field, .. } => field,
        }
    }

    /// The parameter family the field was validated against.
    pub fn family(&self) -> Family {
        match self {
            Self::UnknownParameter { family, .. }
            | Self::MalformedOrder { family, .. }
            | Self::InvalidTiltSuffix { family, .. }
            | Self::NonFiniteValue { family, .. }
            | Self::DuplicateParameter { family, .. } => *family,
        }
    }
}

/// Structural constraint violated by a beamline element.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ElementError {
    /// None of the alternative parameter blocks the kind requires is present.
    #[error("{kind}: at least one of {} must be specified", quoted(.alternatives))]
    MissingRequiredAssociation {
        /// Element kind tag.
        kind: &'static str,
        /// Wire names of the alternative blocks, one of which is required.
        alternatives: &'static [&'static str],
    },

    /// A thick element length below zero.
    #[error("element length must be a non-negative number of meters, got {length}")]
    NegativeLength {
        /// The rejected length.
        length: f64,
    },

    /// A thick element length that is NaN or infinite.
    #[error("element length must be a finite number of meters, got {length}")]
    NonFiniteLength {
        /// The rejected length.
        length: f64,
    },

    /// A zero-length element was given a non-zero length.
    #[error("zero-length element cannot have length {length}")]
    NonZeroLength {
        /// The rejected length.
        length: f64,
    },
}

fn quoted(names: &[&str]) -> String {
    names
        .iter()
        .map(|n| format!("'{n}'"))
        .collect::<Vec<_>>()
        .join(" or ")
}
