//! # Multipole Field Name Parser
//!
//! Decodes a field name such as `Bs12L` into its
//! `(component, order, length-integrated)` triple against one family's
//! prefix table. The parse result is only used for validation; blocks
//! store the raw name and value.
//!
//! ## Algorithm
//!
//! 1. A trailing `L` marks the field as length-integrated and is dropped.
//! 2. The remaining base key is matched against the table in precedence
//!    order; the text after the prefix is the order token.
//! 3. The order token must satisfy [`is_valid_order`].
//! 4. `tilt` has no length-integrated form.
//!
//! A base key no prefix matches is an unknown parameter.

use crate::error::MultipoleError;
use crate::order::{is_valid_order, order_value};
use crate::prefix::{Prefix, PrefixTable};

/// Suffix marking a length-integrated field.
pub const LENGTH_INTEGRATED_SUFFIX: char = 'L';

/// A decoded multipole field name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultipoleField<'a> {
    /// Component role.
    pub prefix: Prefix,
    /// Order token exactly as written (grammar-checked).
    pub order: &'a str,
    /// Whether the value is pre-multiplied by the element length.
    pub length_integrated: bool,
}

impl MultipoleField<'_> {
    /// Numeric order, when it fits in a `u32`.
    pub fn order_value(&self) -> Option<u32> {
        order_value(self.order)
    }
}

impl std::fmt::Display for MultipoleField<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.prefix, self.order)?;
        if self.length_integrated {
            write!(f, "{LENGTH_INTEGRATED_SUFFIX}")?;
        }
        Ok(())
    }
}

/// Parse one field name against `table`.
///
/// # Errors
///
/// - [`MultipoleError::MalformedOrder`] if the prefix is known but the
///   order token is empty, non-numeric, or has a spurious leading zero.
/// - [`MultipoleError::InvalidTiltSuffix`] for `tiltNL`.
/// - [`MultipoleError::UnknownParameter`] if no prefix matches.
pub fn parse<'a>(
    field_name: &'a str,
    table: &PrefixTable,
) -> Result<MultipoleField<'a>, MultipoleError> {
    let (base_key, length_integrated) = match field_name.strip_suffix(LENGTH_INTEGRATED_SUFFIX) {
        Some(base) => (base, true),
        None => (field_name, false),
    };

    let Some((entry, order)) = table.lookup(base_key) else {
        return Err(MultipoleError::UnknownParameter {
            field: field_name.to_string(),
            family: table.family(),
            allowed: table.allowed_formats(),
        });
    };

    if !is_valid_order(order) {
        return Err(MultipoleError::MalformedOrder {
            field: field_name.to_string(),
            family: table.family(),
            expected_format: entry.canonical_format,
        });
    }

    if length_integrated && !entry.prefix.allows_length_integration() {
        return Err(MultipoleError::InvalidTiltSuffix {
            field: field_name.to_string(),
            family: table.family(),
        });
    }

    Ok(MultipoleField {
        prefix: entry.prefix,
        order,
        length_integrated,
    })
}
