//! # pals-lattice — Beamline Elements and Lines
//!
//! Builds on the validated parameter blocks of `pals-core`:
//!
//! - [`kinds`]: one struct per element kind, each implementing
//!   [`ElementKind`].
//! - [`Element`]: the tagged union over every kind, plus [`BeamLine`] and
//!   [`UnionEle`] for composition.
//! - [`codec`]: YAML/JSON conversion reporting failures as
//!   [`PalsError::Serialization`](pals_core::PalsError::Serialization).
//!
//! Multipole magnets (`Quadrupole`, `Sextupole`, `Octupole`, `Multipole`)
//! cannot exist without at least one multipole block. The check runs in
//! their constructors, on deserialization, and on every block update.

pub mod codec;
pub mod element;
pub mod kinds;
pub mod line;
pub mod multipoles;

pub use element::Element;
pub use kinds::*;
pub use line::{BeamLine, FlatIter, UnionEle};
pub use multipoles::{Multipoles, MULTIPOLE_BLOCKS};
