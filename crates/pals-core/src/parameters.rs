//! # Fixed-Schema Parameter Blocks
//!
//! Parameter groups attached to beamline elements alongside the
//! multipole blocks. Unlike multipole blocks these have a closed schema:
//! unknown keys are rejected at deserialization. Field names match the
//! PALS interchange format (`Ksol`, `E_tot_ref`, `dE_ref`, ...).
//!
//! Every field is optional; unset fields are omitted on output.

use std::num::NonZeroU32;

use serde::{Deserialize, Serialize};

/// Lower and upper limit, in meters.
pub type Limits = [f64; 2];

/// Aperture cross-section shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApertureShape {
    Rectangular,
    Elliptical,
    Vertex,
    CustomShape,
}

/// Where along the element the aperture is checked.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ApertureLocation {
    EntranceEnd,
    Center,
    ExitEnd,
    BothEnds,
    Nowhere,
    Everywhere,
}

/// Aperture parameters (`ApertureP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ApertureParameters {
    /// Horizontal limits `[min, max]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_limits: Option<Limits>,
    /// Vertical limits `[min, max]`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_limits: Option<Limits>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape: Option<ApertureShape>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<ApertureLocation>,
    /// Material of the aperture boundary.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub material: Option<String>,
    /// Wall thickness in meters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thickness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture_shifts_with_body: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub aperture_active: Option<bool>,
}

/// Misalignment of the element body (`BodyShiftP`).
///
/// Offsets in meters, rotations in radians.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BodyShiftParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_rot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_rot: Option<f64>,
}

/// Descriptive metadata (`MetaP`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MetaParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alias: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Solenoid field (`SolenoidP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SolenoidParameters {
    /// Normalized solenoid strength, 1/m.
    #[serde(rename = "Ksol", skip_serializing_if = "Option::is_none")]
    pub ksol: Option<f64>,
    /// Solenoid field, T.
    #[serde(rename = "Bsol", skip_serializing_if = "Option::is_none")]
    pub bsol: Option<f64>,
}

/// RF cavity structure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum CavityType {
    StandingWave,
    TravelingWave,
}

/// RF parameters (`RFP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RFParameters {
    /// RF frequency, Hz.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub frequency: Option<f64>,
    /// RF frequency as a harmonic of the revolution frequency.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub harmonic: Option<f64>,
    /// Cavity voltage, V.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub voltage: Option<f64>,
    /// Accelerating gradient, V/m.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient: Option<f64>,
    /// RF phase, rad/2pi.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub multipass_phase: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cavity_type: Option<CavityType>,
    /// Number of cells; at least one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub n_cell: Option<NonZeroU32>,
}

/// Bend geometry and reference field (`BendP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BendParameters {
    /// Reference bend radius, m.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rho_ref: Option<f64>,
    /// Reference bend field, T.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bend_field_ref: Option<f64>,
    /// Reference bend strength `1/rho_ref`, 1/m.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub g_ref: Option<f64>,
    /// Reference bend angle, rad.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub angle_ref: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e1_rect: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub e2_rect: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_int1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub edge_int2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h1: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub h2: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tilt_ref: Option<f64>,
}

/// Coordinate transformation across a patch (`PatchP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_rot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_rot: Option<f64>,
    /// Whether the exit frame is determined by the next element.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub flexible: Option<bool>,
}

/// Shift of the global floor coordinates (`FloorShiftP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorShiftParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_offset: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x_rot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y_rot: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z_rot: Option<f64>,
}

/// Absolute floor position and orientation (`FloorP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FloorParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub x: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub y: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub z: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub theta: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phi: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub psi: Option<f64>,
}

/// Direction of travel into a forked line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ForkDirection {
    Forwards,
    Backwards,
}

/// Branch target of a fork (`ForkP`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ForkParameters {
    /// Name of the line forked to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_line: Option<String>,
    /// Element of `to_line` the fork lands on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub to_element: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub direction: Option<ForkDirection>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub new_branch: Option<bool>,
}

/// Reference particle (`ReferenceP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceParameters {
    /// Reference species name (`electron`, `proton`, ...).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub species_ref: Option<String>,
    /// Reference momentum times c, eV.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pc_ref: Option<f64>,
    /// Reference total energy, eV.
    #[serde(rename = "E_tot_ref", skip_serializing_if = "Option::is_none")]
    pub e_tot_ref: Option<f64>,
}

/// Change of reference energy and time (`ReferenceChangeP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ReferenceChangeParameters {
    /// Reference energy change, eV.
    #[serde(rename = "dE_ref", skip_serializing_if = "Option::is_none")]
    pub de_ref: Option<f64>,
    /// Additional reference time shift, s.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra_dtime_ref: Option<f64>,
}

/// Integration step control (`TrackingP`).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TrackingParameters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub num_steps: Option<NonZeroU32>,
    /// Step length, m.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ds_step: Option<f64>,
}

/// Beam-beam interaction (`BeamBeamP`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeamBeamParameters {}

/// Parameter groups any element kind may carry.
///
/// Flattened into each element's record on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommonParameters {
    #[serde(rename = "ApertureP", default, skip_serializing_if = "Option::is_none")]
    pub aperture: Option<ApertureParameters>,
    #[serde(rename = "BodyShiftP", default, skip_serializing_if = "Option::is_none")]
    pub body_shift: Option<BodyShiftParameters>,
    #[serde(rename = "MetaP", default, skip_serializing_if = "Option::is_none")]
    pub meta: Option<MetaParameters>,
    #[serde(rename = "ReferenceP", default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<ReferenceParameters>,
    #[serde(rename = "ReferenceChangeP", default, skip_serializing_if = "Option::is_none")]
    pub reference_change: Option<ReferenceChangeParameters>,
    #[serde(rename = "FloorP", default, skip_serializing_if = "Option::is_none")]
    pub floor: Option<FloorParameters>,
    #[serde(rename = "TrackingP", default, skip_serializing_if = "Option::is_none")]
    pub tracking: Option<TrackingParameters>,
}
