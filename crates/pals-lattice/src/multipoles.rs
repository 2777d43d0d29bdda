//! # Multipole Attachments
//!
//! The pair of optional multipole blocks an element may carry
//! (`MagneticMultipoleP`, `ElectricMultipoleP`), and the record used to
//! deserialize the multipole magnets, which require at least one of the two.

use pals_core::{
    CommonParameters, Electric, ElectricMultipoleParameters, ElementError, Length, Magnetic,
    MagneticMultipoleParameters, MultipoleError, MultipoleFamily,
};
use serde::{Deserialize, Serialize};

/// Wire names of the blocks a multipole magnet needs at least one of.
pub const MULTIPOLE_BLOCKS: &[&str] = &[Magnetic::WIRE_NAME, Electric::WIRE_NAME];

/// Magnetic and electric multipole blocks attached to an element.
///
/// Flattened into the element record on the wire.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Multipoles {
    #[serde(rename = "MagneticMultipoleP", default, skip_serializing_if = "Option::is_none")]
    pub magnetic: Option<MagneticMultipoleParameters>,
    #[serde(rename = "ElectricMultipoleP", default, skip_serializing_if = "Option::is_none")]
    pub electric: Option<ElectricMultipoleParameters>,
}

impl Multipoles {
    /// Only a magnetic block.
    pub fn magnetic(block: MagneticMultipoleParameters) -> Self {
        Self {
            magnetic: Some(block),
            electric: None,
        }
    }

    /// Only an electric block.
    pub fn electric(block: ElectricMultipoleParameters) -> Self {
        Self {
            magnetic: None,
            electric: Some(block),
        }
    }

    /// Both blocks.
    pub fn both(magnetic: MagneticMultipoleParameters, electric: ElectricMultipoleParameters) -> Self {
        Self {
            magnetic: Some(magnetic),
            electric: Some(electric),
        }
    }

    /// Returns `true` if neither block is attached.
    pub fn is_empty(&self) -> bool {
        self.magnetic.is_none() && self.electric.is_none()
    }

    /// Enforce that at least one block is attached, for element `kind`.
    ///
    /// # Errors
    ///
    /// [`ElementError::MissingRequiredAssociation`] if both are absent.
    pub fn require_any(&self, kind: &'static str) -> Result<(), ElementError> {
        if self.is_empty() {
            tracing::debug!(kind, "multipole element without multipole parameters");
            return Err(ElementError::MissingRequiredAssociation {
                kind,
                alternatives: MULTIPOLE_BLOCKS,
            });
        }
        Ok(())
    }

    /// Re-validate every attached block.
    pub fn validate(&self) -> Result<(), MultipoleError> {
        if let Some(block) = &self.magnetic {
            block.validate()?;
        }
        if let Some(block) = &self.electric {
            block.validate()?;
        }
        Ok(())
    }
}

/// Unchecked wire shape shared by the multipole magnets.
///
/// Deserialized first, then converted into the concrete magnet through
/// its constructor so the multipole requirement is enforced.
#[derive(Debug, Deserialize)]
pub(crate) struct MagnetRecord {
    pub(crate) name: String,
    pub(crate) length: Length,
    #[serde(flatten)]
    pub(crate) multipoles: Multipoles,
    #[serde(flatten)]
    pub(crate) common: CommonParameters,
}
