//! # Multipole Prefix Tables
//!
//! Fixed registries mapping a field-name prefix (`tilt`, `En`, `Bn`, ...)
//! to its role and canonical format. There is one table per parameter
//! family, both compile-time constants shared by every block.
//!
//! ## Precedence
//!
//! Lookup scans a table in registration order and takes the first entry
//! whose prefix leads the key. A table is unambiguous when no registered
//! prefix is a leading substring of a *later* one; the shipped tables are
//! checked for this in tests. Extending a table with overlapping prefixes
//! (e.g. `B` next to `Bn`) requires registering the longer prefix first.

use serde::{Deserialize, Serialize};

/// Multipole parameter family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Family {
    /// Electric multipoles (`tilt`, `En`, `Es`).
    Electric,
    /// Magnetic multipoles (`tilt`, `Bn`, `Bs`, `Kn`, `Ks`).
    Magnetic,
}

impl Family {
    /// Lowercase identifier, as used in error messages.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Electric => "electric",
            Self::Magnetic => "magnetic",
        }
    }

    /// The prefix table for this family.
    pub fn table(&self) -> &'static PrefixTable {
        match self {
            Self::Electric => &ELECTRIC_PREFIXES,
            Self::Magnetic => &MAGNETIC_PREFIXES,
        }
    }
}

impl std::fmt::Display for Family {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Component role encoded by a field-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Prefix {
    /// Rotation angle of the Nth order multipole.
    Tilt,
    /// Normal electric field component.
    En,
    /// Skew electric field component.
    Es,
    /// Normal magnetic field component.
    Bn,
    /// Skew magnetic field component.
    Bs,
    /// Normal magnetic strength, normalized by the reference momentum.
    Kn,
    /// Skew magnetic strength, normalized by the reference momentum.
    Ks,
}

impl Prefix {
    /// The literal prefix as it appears in field names.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tilt => "tilt",
            Self::En => "En",
            Self::Es => "Es",
            Self::Bn => "Bn",
            Self::Bs => "Bs",
            Self::Kn => "Kn",
            Self::Ks => "Ks",
        }
    }

    /// Whether the prefix admits a length-integrated (`L`) form.
    pub fn allows_length_integration(&self) -> bool {
        !matches!(self, Self::Tilt)
    }
}

impl std::fmt::Display for Prefix {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One registered prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PrefixEntry {
    /// The prefix.
    pub prefix: Prefix,
    /// Canonical field format, `N` standing for the order (e.g. `EnN`).
    pub canonical_format: &'static str,
    /// Short description of the component.
    pub description: &'static str,
}

/// Ordered, read-only registry of the prefixes one family accepts.
#[derive(Debug)]
pub struct PrefixTable {
    family: Family,
    entries: &'static [PrefixEntry],
}

/// Electric multipole prefixes.
pub static ELECTRIC_PREFIXES: PrefixTable = PrefixTable {
    family: Family::Electric,
    entries: &[
        PrefixEntry {
            prefix: Prefix::Tilt,
            canonical_format: "tiltN",
            description: "Tilt",
        },
        PrefixEntry {
            prefix: Prefix::En,
            canonical_format: "EnN",
            description: "Normal component",
        },
        PrefixEntry {
            prefix: Prefix::Es,
            canonical_format: "EsN",
            description: "Skew component",
        },
    ],
};

/// Magnetic multipole prefixes.
pub static MAGNETIC_PREFIXES: PrefixTable = PrefixTable {
    family: Family::Magnetic,
    entries: &[
        PrefixEntry {
            prefix: Prefix::Tilt,
            canonical_format: "tiltN",
            description: "Tilt",
        },
        PrefixEntry {
            prefix: Prefix::Bn,
            canonical_format: "BnN",
            description: "Normal component",
        },
        PrefixEntry {
            prefix: Prefix::Bs,
            canonical_format: "BsN",
            description: "Skew component",
        },
        PrefixEntry {
            prefix: Prefix::Kn,
            canonical_format: "KnN",
            description: "Normalized normal component",
        },
        PrefixEntry {
            prefix: Prefix::Ks,
            canonical_format: "KsN",
            description: "Normalized skew component",
        },
    ],
};

impl PrefixTable {
    /// The family this table validates.
    pub fn family(&self) -> Family {
        self.family
    }

    /// Registered entries, in precedence order.
    pub fn entries(&self) -> &'static [PrefixEntry] {
        self.entries
    }

    /// First entry whose prefix leads `base_key`, with the remaining
    /// order token.
    pub fn lookup<'k>(&self, base_key: &'k str) -> Option<(&'static PrefixEntry, &'k str)> {
        self.entries.iter().find_map(|entry| {
            base_key
                .strip_prefix(entry.prefix.as_str())
                .map(|order_token| (entry, order_token))
        })
    }

    /// Canonical formats as a readable list: `'tiltN', 'EnN', or 'EsN'`.
    pub fn allowed_formats(&self) -> String {
        let quoted: Vec<String> = self
            .entries
            .iter()
            .map(|e| format!("'{}'", e.canonical_format))
            .collect();
        match quoted.as_slice() {
            [] => String::new(),
            [only] => only.clone(),
            [init @ .., last] => format!("{}, or {last}", init.join(", ")),
        }
    }

    /// Returns `true` if no prefix is shadowed by an earlier, shorter one.
    pub fn is_unambiguous(&self) -> bool {
        self.entries.iter().enumerate().all(|(i, earlier)| {
            self.entries[i + 1..]
                .iter()
                .all(|later| !later.prefix.as_str().starts_with(earlier.prefix.as_str()))
        })
    }
}
