//! # Element Kinds
//!
//! One struct per beamline element kind. Every kind carries a `name` and
//! the parameter groups of [`CommonParameters`]; kinds differ in whether
//! they have a physical length and which extra parameter blocks they own.
//!
//! | Length | Kinds |
//! |--------|-------|
//! | thick, `>= 0` | `Drift`, `ACKicker`, `Kicker`, `CrabCavity`, `EGun`, `Instrument`, `Mask`, `Wiggler`, `RBend`, `SBend`, `Solenoid`, `RFCavity`, `Patch` |
//! | thick, multipole required | `Quadrupole`, `Sextupole`, `Octupole`, `Multipole` |
//! | fixed zero | `Marker` |
//! | none | `BeginningEle`, `Fiducial`, `NullEle`, `Feedback`, `Girder`, `Match`, `Taylor`, `Foil`, `Converter`, `FloorShift`, `Fork`, `BeamBeam` |
//!
//! Element structs serialize without their `kind` tag; the tag is added
//! by [`Element`](crate::Element), which is what interchange data holds.

use pals_core::{
    BeamBeamParameters, BendParameters, CommonParameters, ElectricMultipoleParameters,
    ElementError, FloorShiftParameters, ForkParameters, Length, MagneticMultipoleParameters,
    PalsError, PatchParameters, RFParameters, SolenoidParameters, ZeroLength,
};
use serde::{Deserialize, Serialize};

use crate::multipoles::{MagnetRecord, Multipoles};

/// Capability shared by every element kind.
pub trait ElementKind {
    /// Discriminant tag, equal to the kind's name. Part of the wire format.
    const KIND: &'static str;

    /// Element name.
    fn name(&self) -> &str;

    /// Segment length in meters, for kinds that have one.
    fn length(&self) -> Option<f64>;
}

macro_rules! impl_element_kind {
    ($kind:ident, thick) => {
        impl ElementKind for $kind {
            const KIND: &'static str = stringify!($kind);

            fn name(&self) -> &str {
                &self.name
            }

            fn length(&self) -> Option<f64> {
                Some(self.length.meters())
            }
        }

        impl $kind {
            /// Replace the length, rejecting negative and non-finite values.
            pub fn set_length(&mut self, meters: f64) -> Result<(), ElementError> {
                self.length = Length::new(meters)?;
                Ok(())
            }
        }
    };
    ($kind:ident, zero) => {
        impl ElementKind for $kind {
            const KIND: &'static str = stringify!($kind);

            fn name(&self) -> &str {
                &self.name
            }

            fn length(&self) -> Option<f64> {
                Some(self.length.meters())
            }
        }
    };
    ($kind:ident, thin) => {
        impl ElementKind for $kind {
            const KIND: &'static str = stringify!($kind);

            fn name(&self) -> &str {
                &self.name
            }

            fn length(&self) -> Option<f64> {
                None
            }
        }
    };
}

/// Constructors for kinds whose only required input is the name (and the
/// length, for thick kinds).
macro_rules! impl_default_constructor {
    ($kind:ident, thick) => {
        impl $kind {
            /// Create the element with all optional blocks unset.
            ///
            /// # Errors
            ///
            /// [`ElementError::NegativeLength`] or [`ElementError::NonFiniteLength`]
            /// for an invalid `length`.
            pub fn new(name: impl Into<String>, length: f64) -> Result<Self, ElementError> {
                Ok(Self {
                    name: name.into(),
                    length: Length::new(length)?,
                    ..Default::default()
                })
            }
        }
    };
    ($kind:ident, thin) => {
        impl $kind {
            /// Create the element with all optional blocks unset.
            pub fn new(name: impl Into<String>) -> Self {
                Self {
                    name: name.into(),
                    ..Default::default()
                }
            }
        }
    };
}

// ---------------------------------------------------------------------------
// Multipole magnets (thick, at least one multipole block)
// ---------------------------------------------------------------------------

macro_rules! multipole_magnet {
    ($(#[$meta:meta])* $kind:ident) => {
        $(#[$meta])*
        ///
        /// At least one of `MagneticMultipoleP` and `ElectricMultipoleP` is
        /// always present; construction, deserialization, and updates that
        /// would remove the last block fail with
        /// [`ElementError::MissingRequiredAssociation`].
        #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
        #[serde(try_from = "MagnetRecord")]
        pub struct $kind {
            pub name: String,
            pub length: Length,
            #[serde(flatten)]
            multipoles: Multipoles,
            #[serde(flatten)]
            pub common: CommonParameters,
        }

        impl $kind {
            /// Create the magnet.
            ///
            /// # Errors
            ///
            /// - [`ElementError::NegativeLength`] or
            ///   [`ElementError::NonFiniteLength`] for an invalid `length`.
            /// - [`ElementError::MissingRequiredAssociation`] if `multipoles`
            ///   holds neither block.
            pub fn new(
                name: impl Into<String>,
                length: f64,
                multipoles: Multipoles,
            ) -> Result<Self, ElementError> {
                let length = Length::new(length)?;
                multipoles.require_any(Self::KIND)?;
                Ok(Self {
                    name: name.into(),
                    length,
                    multipoles,
                    common: CommonParameters::default(),
                })
            }

            /// Attached multipole blocks.
            pub fn multipoles(&self) -> &Multipoles {
                &self.multipoles
            }

            /// The magnetic multipole block, if attached.
            pub fn magnetic_multipole(&self) -> Option<&MagneticMultipoleParameters> {
                self.multipoles.magnetic.as_ref()
            }

            /// The electric multipole block, if attached.
            pub fn electric_multipole(&self) -> Option<&ElectricMultipoleParameters> {
                self.multipoles.electric.as_ref()
            }

            /// Mutable access to the magnetic block, if attached.
            ///
            /// Field updates through the block re-validate their names.
            pub fn magnetic_multipole_mut(&mut self) -> Option<&mut MagneticMultipoleParameters> {
                self.multipoles.magnetic.as_mut()
            }

            /// Mutable access to the electric block, if attached.
            pub fn electric_multipole_mut(&mut self) -> Option<&mut ElectricMultipoleParameters> {
                self.multipoles.electric.as_mut()
            }

            /// Attach, replace, or detach the magnetic block.
            ///
            /// Detaching fails if it would leave no multipole block.
            pub fn set_magnetic_multipole(
                &mut self,
                block: Option<MagneticMultipoleParameters>,
            ) -> Result<(), ElementError> {
                let updated = Multipoles {
                    magnetic: block,
                    electric: self.multipoles.electric.clone(),
                };
                updated.require_any(Self::KIND)?;
                self.multipoles = updated;
                Ok(())
            }

            /// Attach, replace, or detach the electric block.
            ///
            /// Detaching fails if it would leave no multipole block.
            pub fn set_electric_multipole(
                &mut self,
                block: Option<ElectricMultipoleParameters>,
            ) -> Result<(), ElementError> {
                let updated = Multipoles {
                    magnetic: self.multipoles.magnetic.clone(),
                    electric: block,
                };
                updated.require_any(Self::KIND)?;
                self.multipoles = updated;
                Ok(())
            }

            /// Re-check every invariant of the element.
            pub fn validate(&self) -> Result<(), PalsError> {
                self.multipoles.require_any(Self::KIND)?;
                self.multipoles.validate()?;
                Ok(())
            }
        }

        impl TryFrom<MagnetRecord> for $kind {
            type Error = ElementError;

            fn try_from(record: MagnetRecord) -> Result<Self, Self::Error> {
                record.multipoles.require_any(Self::KIND)?;
                Ok(Self {
                    name: record.name,
                    length: record.length,
                    multipoles: record.multipoles,
                    common: record.common,
                })
            }
        }

        impl_element_kind!($kind, thick);
    };
}

multipole_magnet! {
    /// Quadrupole magnet.
    Quadrupole
}

multipole_magnet! {
    /// Sextupole magnet.
    Sextupole
}

multipole_magnet! {
    /// Octupole magnet.
    Octupole
}

multipole_magnet! {
    /// General multipole magnet.
    Multipole
}

// ---------------------------------------------------------------------------
// Thick elements
// ---------------------------------------------------------------------------

/// Field-free drift space.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Drift {
    pub name: String,
    pub length: Length,
    #[serde(flatten)]
    pub common: CommonParameters,
}

/// Thick element with optional multipole blocks and no other parameters.
macro_rules! thick_with_multipoles {
    ($(#[$meta:meta])* $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        pub struct $kind {
            pub name: String,
            pub length: Length,
            #[serde(flatten)]
            pub multipoles: Multipoles,
            #[serde(flatten)]
            pub common: CommonParameters,
        }

        impl_element_kind!($kind, thick);
        impl_default_constructor!($kind, thick);
    };
}

thick_with_multipoles! {
    /// Time-varying kicker.
    ACKicker
}

thick_with_multipoles! {
    /// Orbit corrector.
    Kicker
}

thick_with_multipoles! {
    /// Crab cavity.
    CrabCavity
}

thick_with_multipoles! {
    /// Electron gun.
    EGun
}

thick_with_multipoles! {
    /// Measurement instrument (monitor, profile screen, ...).
    Instrument
}

thick_with_multipoles! {
    /// Collimating mask.
    Mask
}

thick_with_multipoles! {
    /// Wiggler or undulator.
    Wiggler
}

/// Rectangular bend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RBend {
    pub name: String,
    pub length: Length,
    #[serde(rename = "BendP", default, skip_serializing_if = "Option::is_none")]
    pub bend: Option<BendParameters>,
    #[serde(flatten)]
    pub multipoles: Multipoles,
    #[serde(flatten)]
    pub common: CommonParameters,
}

/// Sector bend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SBend {
    pub name: String,
    pub length: Length,
    #[serde(rename = "BendP", default, skip_serializing_if = "Option::is_none")]
    pub bend: Option<BendParameters>,
    #[serde(flatten)]
    pub multipoles: Multipoles,
    #[serde(flatten)]
    pub common: CommonParameters,
}

/// Solenoid magnet.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Solenoid {
    pub name: String,
    pub length: Length,
    #[serde(rename = "SolenoidP", default, skip_serializing_if = "Option::is_none")]
    pub solenoid: Option<SolenoidParameters>,
    #[serde(flatten)]
    pub multipoles: Multipoles,
    #[serde(flatten)]
    pub common: CommonParameters,
}

/// RF cavity, optionally with a superimposed solenoid field.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct RFCavity {
    pub name: String,
    pub length: Length,
    #[serde(rename = "RFP", default, skip_serializing_if = "Option::is_none")]
    pub rf: Option<RFParameters>,
    #[serde(rename = "SolenoidP", default, skip_serializing_if = "Option::is_none")]
    pub solenoid: Option<SolenoidParameters>,
    #[serde(flatten)]
    pub multipoles: Multipoles,
    #[serde(flatten)]
    pub common: CommonParameters,
}

/// Reference-frame patch.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Patch {
    pub name: String,
    pub length: Length,
    #[serde(rename = "PatchP", default, skip_serializing_if = "Option::is_none")]
    pub patch: Option<PatchParameters>,
    #[serde(flatten)]
    pub common: CommonParameters,
}

impl_element_kind!(Drift, thick);
impl_element_kind!(RBend, thick);
impl_element_kind!(SBend, thick);
impl_element_kind!(Solenoid, thick);
impl_element_kind!(RFCavity, thick);
impl_element_kind!(Patch, thick);

impl_default_constructor!(Drift, thick);
impl_default_constructor!(RBend, thick);
impl_default_constructor!(SBend, thick);
impl_default_constructor!(Solenoid, thick);
impl_default_constructor!(RFCavity, thick);
impl_default_constructor!(Patch, thick);

// ---------------------------------------------------------------------------
// Zero-length and thin elements
// ---------------------------------------------------------------------------

/// Zero-length element naming a position in the beamline.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Marker {
    pub name: String,
    /// Always zero.
    #[serde(default)]
    pub length: ZeroLength,
    #[serde(flatten)]
    pub common: CommonParameters,
}

impl_element_kind!(Marker, zero);
impl_default_constructor!(Marker, thin);

/// Thin element with only the common parameter groups.
macro_rules! thin_element {
    ($(#[$meta:meta])* $kind:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
        pub struct $kind {
            pub name: String,
            #[serde(flatten)]
            pub common: CommonParameters,
        }

        impl_element_kind!($kind, thin);
        impl_default_constructor!($kind, thin);
    };
}

thin_element! {
    /// First element of a lattice, holding its initial reference state.
    BeginningEle
}

thin_element! {
    /// Fixed reference point for global positioning.
    Fiducial
}

thin_element! {
    /// Placeholder that is ignored by tracking codes.
    NullEle
}

thin_element! {
    /// Feedback loop between a pickup and a kicker.
    Feedback
}

thin_element! {
    /// Support structure grouping elements that move together.
    Girder
}

thin_element! {
    /// Transfer map matching given Twiss and orbit values.
    Match
}

thin_element! {
    /// Element defined by a Taylor map.
    Taylor
}

thin_element! {
    /// Stripping or scattering foil.
    Foil
}

/// Target converting an incoming beam into a different species.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Converter {
    pub name: String,
    #[serde(flatten)]
    pub multipoles: Multipoles,
    #[serde(flatten)]
    pub common: CommonParameters,
}

/// Shift of the floor coordinate system.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FloorShift {
    pub name: String,
    #[serde(rename = "FloorShiftP", default, skip_serializing_if = "Option::is_none")]
    pub floor_shift: Option<FloorShiftParameters>,
    #[serde(flatten)]
    pub common: CommonParameters,
}

/// Branch point into another line.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Fork {
    pub name: String,
    #[serde(rename = "ForkP", default, skip_serializing_if = "Option::is_none")]
    pub fork: Option<ForkParameters>,
    #[serde(flatten)]
    pub common: CommonParameters,
}

/// Beam-beam interaction point.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BeamBeam {
    pub name: String,
    #[serde(rename = "BeamBeamP", default, skip_serializing_if = "Option::is_none")]
    pub beam_beam: Option<BeamBeamParameters>,
    #[serde(flatten)]
    pub common: CommonParameters,
}

impl_element_kind!(Converter, thin);
impl_element_kind!(FloorShift, thin);
impl_element_kind!(Fork, thin);
impl_element_kind!(BeamBeam, thin);

impl_default_constructor!(Converter, thin);
impl_default_constructor!(FloorShift, thin);
impl_default_constructor!(Fork, thin);
impl_default_constructor!(BeamBeam, thin);

#[cfg(test)]
mod tests {
    use super::*;
    use pals_core::{ApertureParameters, MetaParameters};

    fn magnetic(fields: &[(&str, f64)]) -> MagneticMultipoleParameters {
        MagneticMultipoleParameters::new(fields.iter().copied()).unwrap()
    }

    fn electric(fields: &[(&str, f64)]) -> ElectricMultipoleParameters {
        ElectricMultipoleParameters::new(fields.iter().copied()).unwrap()
    }

    #[test]
    fn kind_tags_match_type_names() {
        assert_eq!(Quadrupole::KIND, "Quadrupole");
        assert_eq!(ACKicker::KIND, "ACKicker");
        assert_eq!(RFCavity::KIND, "RFCavity");
        assert_eq!(BeginningEle::KIND, "BeginningEle");
        assert_eq!(Marker::KIND, "Marker");
    }

    #[test]
    fn thick_element_rejects_negative_length() {
        assert_eq!(
            Drift::new("d1", -1.0).unwrap_err(),
            ElementError::NegativeLength { length: -1.0 }
        );

        let mut drift = Drift::new("d1", 1.0).unwrap();
        assert!(drift.set_length(-1.0).is_err());
        assert_eq!(drift.length(), Some(1.0));
        drift.set_length(2.5).unwrap();
        assert_eq!(drift.length, 2.5);
    }

    #[test]
    fn marker_has_zero_length() {
        let marker = Marker::new("marker1");
        assert_eq!(marker.name(), "marker1");
        assert_eq!(marker.length(), Some(0.0));
    }

    #[test]
    fn thin_elements_have_no_length() {
        assert_eq!(NullEle::new("null1").length(), None);
        assert_eq!(Fork::new("fork1").length(), None);
    }

    #[test]
    fn quadrupole_with_both_blocks() {
        let quad = Quadrupole::new(
            "quadrupole_element",
            1.0,
            Multipoles::both(
                magnetic(&[("Bn1", 1.1), ("Bs1", 2.1), ("tilt1", 3.1), ("Bn2", 1.2)]),
                electric(&[("En1", 1.1), ("Es1", 2.1), ("tilt1", 3.1)]),
            ),
        )
        .unwrap();
        assert_eq!(quad.name(), "quadrupole_element");
        assert_eq!(quad.length(), Some(1.0));
        assert_eq!(quad.magnetic_multipole().unwrap().get("Bn1"), Some(1.1));
        assert_eq!(quad.magnetic_multipole().unwrap().get("Bn2"), Some(1.2));
        assert_eq!(quad.electric_multipole().unwrap().get("tilt1"), Some(3.1));
        quad.validate().unwrap();
    }

    #[test]
    fn magnets_require_a_multipole_block() {
        let err = Sextupole::new("sext1", 0.5, Multipoles::default()).unwrap_err();
        assert!(matches!(
            err,
            ElementError::MissingRequiredAssociation { kind: "Sextupole", .. }
        ));
        assert!(Octupole::new("oct1", -0.3, Multipoles::magnetic(magnetic(&[("Bn3", 0.5)]))).is_err());
    }

    #[test]
    fn detaching_last_block_is_rejected() {
        let mut multipole =
            Multipole::new("mult1", 0.4, Multipoles::magnetic(magnetic(&[("Bn1", 2.0)]))).unwrap();
        let before = multipole.clone();

        assert!(multipole.set_magnetic_multipole(None).is_err());
        assert_eq!(multipole, before);

        multipole
            .set_electric_multipole(Some(electric(&[("En1", 2.0)])))
            .unwrap();
        multipole.set_magnetic_multipole(None).unwrap();
        assert!(multipole.magnetic_multipole().is_none());
        assert!(multipole.set_electric_multipole(None).is_err());
    }

    #[test]
    fn field_updates_through_attached_block_are_validated() {
        let mut quad =
            Quadrupole::new("q", 1.0, Multipoles::magnetic(magnetic(&[("Kn1", 0.3)]))).unwrap();
        let block = quad.magnetic_multipole_mut().unwrap();
        assert!(block.insert("Kn1L", 0.3).is_ok());
        assert!(block.insert("Kn01", 0.3).is_err());
        quad.validate().unwrap();
    }

    #[test]
    fn common_parameters_attach_to_any_kind() {
        let mut bend = RBend::new("rbend1", 1.0).unwrap();
        bend.bend = Some(BendParameters {
            rho_ref: Some(1.0),
            bend_field_ref: Some(2.0),
            ..Default::default()
        });
        bend.common.aperture = Some(ApertureParameters {
            x_limits: Some([-0.2, 0.2]),
            ..Default::default()
        });
        bend.common.meta = Some(MetaParameters {
            alias: None,
            description: Some("Test bend".into()),
        });
        assert_eq!(bend.bend.as_ref().unwrap().rho_ref, Some(1.0));
        assert_eq!(bend.common.aperture.as_ref().unwrap().x_limits, Some([-0.2, 0.2]));
    }

    #[test]
    fn magnet_deserialization_enforces_requirement() {
        let ok: Quadrupole = serde_json::from_value(serde_json::json!({
            "name": "q1",
            "length": 1.0,
            "MagneticMultipoleP": {"Bn1": 0.5},
        }))
        .unwrap();
        assert_eq!(ok.magnetic_multipole().unwrap().get("Bn1"), Some(0.5));

        let err = serde_json::from_value::<Quadrupole>(serde_json::json!({
            "name": "q1",
            "length": 1.0,
        }))
        .unwrap_err();
        assert!(err.to_string().contains("at least one of"), "{err}");
    }
}
