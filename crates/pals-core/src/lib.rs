//! # pals-core — Foundational Types for the PALS Beamline Model
//!
//! This crate is the leaf of the workspace. It defines the validated
//! parameter blocks that beamline elements are assembled from, and the
//! error hierarchy every other crate reports through.
//!
//! ## Key Design Principles
//!
//! 1. **Field names are a grammar.** Multipole blocks accept an open set of
//!    keys (`Bn3`, `Es1L`, `tilt2`), each checked against its family's
//!    [`PrefixTable`] by the [`field::parse`] function. A typo fails at
//!    construction, never later.
//!
//! 2. **Validated at construction, validated at deserialization.** Blocks
//!    and lengths route `Deserialize` through the same checks as their
//!    constructors. Invalid interchange data never yields a value.
//!
//! 3. **Family as a type parameter.** [`ElectricMultipoleParameters`] and
//!    [`MagneticMultipoleParameters`] are distinct types sharing one
//!    implementation and one order grammar.
//!
//! ## Crate Policy
//!
//! - No dependencies on other `pals-*` crates.
//! - No `unsafe` code.
//! - No `panic!()` or `.unwrap()` outside tests.
//! - No file I/O; serialization is left to the caller's serde format.

pub mod error;
pub mod field;
pub mod length;
pub mod multipole;
pub mod order;
pub mod parameters;
pub mod prefix;

// Re-export primary types for ergonomic imports.
pub use error::{ElementError, MultipoleError, PalsError};
pub use field::MultipoleField;
pub use length::{Length, ZeroLength};
pub use multipole::{
    Electric, ElectricMultipoleParameters, Magnetic, MagneticMultipoleParameters,
    MultipoleFamily, MultipoleParameters,
};
pub use parameters::{
    ApertureLocation, ApertureParameters, ApertureShape, BeamBeamParameters, BendParameters,
    BodyShiftParameters, CavityType, CommonParameters, FloorParameters, FloorShiftParameters,
    ForkDirection, ForkParameters, MetaParameters, PatchParameters, RFParameters,
    ReferenceChangeParameters, ReferenceParameters, SolenoidParameters, TrackingParameters,
};
pub use prefix::{Family, Prefix, PrefixTable, ELECTRIC_PREFIXES, MAGNETIC_PREFIXES};
