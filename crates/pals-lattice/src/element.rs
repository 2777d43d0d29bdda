//! # Element
//!
//! The closed set of things a beamline can contain: every element kind,
//! plus nested [`BeamLine`]s and [`UnionEle`]s.
//!
//! On the wire an element is a map whose `kind` entry names the variant:
//!
//! ```yaml
//! kind: Quadrupole
//! name: q1
//! length: 0.5
//! MagneticMultipoleP:
//!   Kn1: 0.3
//! ```

use pals_core::PalsError;
use serde::{Deserialize, Serialize};

use crate::kinds::*;
use crate::line::{BeamLine, UnionEle};
use crate::multipoles::Multipoles;

macro_rules! define_element {
    (
        kinds: [$($kind:ident),+ $(,)?],
        magnets: [$($magnet:ident),+ $(,)?] $(,)?
    ) => {
        /// Any beamline element, tagged by `kind`.
        ///
        /// Element records are open at the top level: keys that name no
        /// field of the kind are skipped when reading, so a misspelled
        /// block name (`MagneticMultipolP`) is dropped rather than
        /// rejected. Keys inside every parameter block are checked.
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(tag = "kind")]
        pub enum Element {
            $($kind($kind),)+
            $($magnet($magnet),)+
            BeamLine(BeamLine),
            UnionEle(UnionEle),
        }

        impl Element {
            /// Element name.
            pub fn name(&self) -> &str {
                match self {
                    $(Self::$kind(e) => e.name(),)+
                    $(Self::$magnet(e) => e.name(),)+
                    Self::BeamLine(line) => &line.name,
                    Self::UnionEle(union) => &union.name,
                }
            }

            /// The `kind` discriminant.
            pub fn kind(&self) -> &'static str {
                match self {
                    $(Self::$kind(_) => $kind::KIND,)+
                    $(Self::$magnet(_) => $magnet::KIND,)+
                    Self::BeamLine(_) => BeamLine::KIND,
                    Self::UnionEle(_) => UnionEle::KIND,
                }
            }

            /// Segment length in meters, or `None` for thin elements.
            ///
            /// A line reports the summed length of its contents; a union
            /// reports the longest of its overlapping elements.
            pub fn length(&self) -> Option<f64> {
                match self {
                    $(Self::$kind(e) => e.length(),)+
                    $(Self::$magnet(e) => e.length(),)+
                    Self::BeamLine(line) => Some(line.total_length()),
                    Self::UnionEle(union) => union.length(),
                }
            }

            /// Re-check the invariants of this element and everything it
            /// contains.
            pub fn validate(&self) -> Result<(), PalsError> {
                match self {
                    $(Self::$magnet(e) => e.validate(),)+
                    Self::BeamLine(line) => line.validate(),
                    Self::UnionEle(union) => union.validate(),
                    _ => self.validate_multipoles(),
                }
            }

            fn validate_multipoles(&self) -> Result<(), PalsError> {
                let multipoles: &Multipoles = match self {
                    Self::ACKicker(e) => &e.multipoles,
                    Self::Kicker(e) => &e.multipoles,
                    Self::CrabCavity(e) => &e.multipoles,
                    Self::EGun(e) => &e.multipoles,
                    Self::Instrument(e) => &e.multipoles,
                    Self::Mask(e) => &e.multipoles,
                    Self::Wiggler(e) => &e.multipoles,
                    Self::RBend(e) => &e.multipoles,
                    Self::SBend(e) => &e.multipoles,
                    Self::Solenoid(e) => &e.multipoles,
                    Self::RFCavity(e) => &e.multipoles,
                    Self::Converter(e) => &e.multipoles,
                    _ => return Ok(()),
                };
                multipoles.validate()?;
                Ok(())
            }
        }

        $(
            impl From<$kind> for Element {
                fn from(element: $kind) -> Self {
                    Self::$kind(element)
                }
            }
        )+
        $(
            impl From<$magnet> for Element {
                fn from(element: $magnet) -> Self {
                    Self::$magnet(element)
                }
            }
        )+
    };
}

define_element! {
    kinds: [
        Drift, ACKicker, Kicker, CrabCavity, EGun, Instrument, Mask, Wiggler,
        RBend, SBend, Solenoid, RFCavity, Patch,
        Marker,
        BeginningEle, Fiducial, NullEle, Feedback, Girder, Match, Taylor, Foil,
        Converter, FloorShift, Fork, BeamBeam,
    ],
    magnets: [Quadrupole, Sextupole, Octupole, Multipole],
}

impl From<BeamLine> for Element {
    fn from(line: BeamLine) -> Self {
        Self::BeamLine(line)
    }
}

impl From<UnionEle> for Element {
    fn from(union: UnionEle) -> Self {
        Self::UnionEle(union)
    }
}
