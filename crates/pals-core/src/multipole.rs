//! # Multipole Parameter Blocks
//!
//! Open-schema parameter blocks for electric and magnetic multipoles. A
//! block accepts any field name its family's grammar accepts (`Bn3`,
//! `Ks0L`, `tilt2`, ...) and nothing else.
//!
//! ## Invariant
//!
//! Every key present in a [`MultipoleParameters`] block parses under its
//! family's [`PrefixTable`]. The invariant holds at every observable point:
//!
//! - [`MultipoleParameters::new`] validates all keys before the block exists.
//! - Deserialization validates each key as it is read.
//! - [`MultipoleParameters::insert`] validates the new key before storing it.
//!
//! A rejected construction or mutation has no observable effect.
//!
//! ## Concurrency
//!
//! Blocks are plain owned values. The prefix tables they consult are
//! `'static` constants, so validation needs no locking. Mutation goes
//! through `&mut self`; callers sharing a block across threads must wrap it
//! in their own lock.

use std::collections::BTreeMap;
use std::fmt;
use std::marker::PhantomData;

use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MultipoleError;
use crate::field::{parse, MultipoleField};
use crate::prefix::{Family, PrefixTable};

/// Marker trait tying a block type to its parameter family.
pub trait MultipoleFamily {
    /// The family whose prefix table validates the block.
    const FAMILY: Family;

    /// Name of the block on the wire when attached to an element.
    const WIRE_NAME: &'static str;

    /// The family's prefix table.
    fn table() -> &'static PrefixTable {
        Self::FAMILY.table()
    }
}

/// Electric multipole family marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Electric;

/// Magnetic multipole family marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Magnetic;

impl MultipoleFamily for Electric {
    const FAMILY: Family = Family::Electric;
    const WIRE_NAME: &'static str = "ElectricMultipoleP";
}

impl MultipoleFamily for Magnetic {
    const FAMILY: Family = Family::Magnetic;
    const WIRE_NAME: &'static str = "MagneticMultipoleP";
}

/// Electric multipole parameters (`tiltN`, `EnN`, `EsN`, and `EnNL`/`EsNL`).
pub type ElectricMultipoleParameters = MultipoleParameters<Electric>;

/// Magnetic multipole parameters (`tiltN`, `BnN`, `BsN`, `KnN`, `KsN`,
/// and their `L` forms).
pub type MagneticMultipoleParameters = MultipoleParameters<Magnetic>;

/// Validate every field against `table`, in iteration order.
///
/// Stops at the first invalid field. On success the fields are returned
/// unchanged; parsing only validates.
///
/// # Errors
///
/// The first [`MultipoleError`] produced by [`parse`], or
/// [`MultipoleError::NonFiniteValue`] for a NaN or infinite value.
pub fn validate_all<K: AsRef<str>>(
    fields: Vec<(K, f64)>,
    table: &PrefixTable,
) -> Result<Vec<(K, f64)>, MultipoleError> {
    for (name, value) in &fields {
        check(name.as_ref(), *value, table)?;
    }
    Ok(fields)
}

fn check<'a>(
    name: &'a str,
    value: f64,
    table: &PrefixTable,
) -> Result<MultipoleField<'a>, MultipoleError> {
    let checked = parse(name, table).and_then(|field| {
        if value.is_finite() {
            Ok(field)
        } else {
            Err(MultipoleError::NonFiniteValue {
                field: name.to_string(),
                family: table.family(),
            })
        }
    });
    checked.map_err(|err| {
        tracing::debug!(
            field = name,
            family = %table.family(),
            error = %err,
            "rejected multipole parameter"
        );
        err
    })
}

/// A validated mapping from multipole field name to value.
///
/// Keys are kept sorted so serialization is deterministic.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MultipoleParameters<F> {
    fields: BTreeMap<String, f64>,
    family: PhantomData<F>,
}

impl<F: MultipoleFamily> MultipoleParameters<F> {
    /// Build a block from `(name, value)` pairs.
    ///
    /// Either every name is valid and unique and the block is returned, or
    /// nothing is built.
    ///
    /// ```
    /// use pals_core::MagneticMultipoleParameters;
    ///
    /// let block = MagneticMultipoleParameters::new([("Bn1", 1.1), ("tilt1", 3.1)])?;
    /// assert_eq!(block.get("Bn1"), Some(1.1));
    /// assert!(MagneticMultipoleParameters::new([("tilt1L", 1.2)]).is_err());
    /// # Ok::<(), pals_core::MultipoleError>(())
    /// ```
    ///
    /// # Errors
    ///
    /// - Any error from [`validate_all`], for the first invalid name.
    /// - [`MultipoleError::DuplicateParameter`] if a name repeats.
    pub fn new<I, K>(fields: I) -> Result<Self, MultipoleError>
    where
        I: IntoIterator<Item = (K, f64)>,
        K: Into<String>,
    {
        let supplied: Vec<(String, f64)> =
            fields.into_iter().map(|(k, v)| (k.into(), v)).collect();
        let supplied = validate_all(supplied, F::table())?;

        let mut map = BTreeMap::new();
        for (name, value) in supplied {
            if map.contains_key(&name) {
                return Err(duplicate::<F>(name));
            }
            map.insert(name, value);
        }

        tracing::trace!(family = %F::FAMILY, fields = map.len(), "multipole block validated");
        Ok(Self {
            fields: map,
            family: PhantomData,
        })
    }

    /// An empty block.
    pub fn empty() -> Self {
        Self {
            fields: BTreeMap::new(),
            family: PhantomData,
        }
    }

    /// The block's parameter family.
    pub fn family(&self) -> Family {
        F::FAMILY
    }

    /// Value of field `name`, if present.
    pub fn get(&self, name: &str) -> Option<f64> {
        self.fields.get(name).copied()
    }

    /// Returns `true` if field `name` is present.
    pub fn contains(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Set field `name`, validating the name and value first.
    ///
    /// Returns the previous value. On error the block is unchanged.
    pub fn insert(
        &mut self,
        name: impl Into<String>,
        value: f64,
    ) -> Result<Option<f64>, MultipoleError> {
        let name = name.into();
        check(&name, value, F::table())?;
        Ok(self.fields.insert(name, value))
    }

    /// Remove field `name`, returning its value.
    pub fn remove(&mut self, name: &str) -> Option<f64> {
        self.fields.remove(name)
    }

    /// Number of fields.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns `true` if the block has no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterate `(name, value)` pairs in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> + '_ {
        self.fields.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// Iterate decoded field names with their values.
    pub fn fields(&self) -> impl Iterator<Item = (MultipoleField<'_>, f64)> + '_ {
        self.fields
            .iter()
            .filter_map(|(k, v)| parse(k, F::table()).ok().map(|field| (field, *v)))
    }

    /// Re-run validation over every stored field.
    ///
    /// Always succeeds for a block built through this API.
    pub fn validate(&self) -> Result<(), MultipoleError> {
        for (name, value) in &self.fields {
            check(name, *value, F::table())?;
        }
        Ok(())
    }

    /// Borrow the underlying sorted mapping.
    pub fn as_map(&self) -> &BTreeMap<String, f64> {
        &self.fields
    }
}

fn duplicate<F: MultipoleFamily>(field: String) -> MultipoleError {
    tracing::debug!(field = %field, family = %F::FAMILY, "duplicate multipole parameter");
    MultipoleError::DuplicateParameter {
        field,
        family: F::FAMILY,
    }
}

impl<F: MultipoleFamily> TryFrom<BTreeMap<String, f64>> for MultipoleParameters<F> {
    type Error = MultipoleError;

    fn try_from(map: BTreeMap<String, f64>) -> Result<Self, Self::Error> {
        Self::new(map)
    }
}

impl<F> From<MultipoleParameters<F>> for BTreeMap<String, f64> {
    fn from(block: MultipoleParameters<F>) -> Self {
        block.fields
    }
}

impl<F> Serialize for MultipoleParameters<F> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

impl<'de, F: MultipoleFamily> Deserialize<'de> for MultipoleParameters<F> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(BlockVisitor(PhantomData))
    }
}

struct BlockVisitor<F>(PhantomData<F>);

impl<'de, F: MultipoleFamily> Visitor<'de> for BlockVisitor<F> {
    type Value = MultipoleParameters<F>;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "a map of {} multipole parameters", F::FAMILY)
    }

    fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<Self::Value, A::Error> {
        let mut fields = BTreeMap::new();
        while let Some((name, value)) = access.next_entry::<String, f64>()? {
            if let Err(err) = check(&name, value, F::table()) {
                return Err(serde::de::Error::custom(err));
            }
            if fields.contains_key(&name) {
                return Err(serde::de::Error::custom(duplicate::<F>(name)));
            }
            fields.insert(name, value);
        }
        Ok(MultipoleParameters {
            fields,
            family: PhantomData,
        })
    }
}
