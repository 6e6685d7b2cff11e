//! ARIA role registry
//!
//! The registry maps a role name to its metadata. It is built from a JSON object
//! of the form:
//!
//! ```text
//! {
//!   "button": { "abstract": false, "superClass": ["command"] },
//!   "widget": { "abstract": true,  "superClass": ["roletype"] }
//! }
//! ```
//!
//! `abstract` is required. Other fields are kept when known and otherwise ignored.
//!
//! The bundled table (ARIA 1.1 plus the DPUB-ARIA `doc-*` roles) is embedded at
//! compile time and parsed once, on first use, into [`ROLES`]. The registry is
//! never mutated after construction, so it can be shared freely across threads.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

const BUNDLED_ROLES_JSON: &str = include_str!("../../data/roles.json");

/// The bundled role table, parsed on first access
pub static ROLES: Lazy<RoleRegistry> = Lazy::new(|| {
    RoleRegistry::from_json(BUNDLED_ROLES_JSON)
        .unwrap_or_else(|err| panic!("bundled data/roles.json is malformed: {}", err))
});

/// Errors raised while building a registry from JSON
#[derive(Debug, Clone, PartialEq)]
pub enum RegistryError {
    /// The document is not valid JSON or not an object of objects
    InvalidJson(String),
    /// A role entry lacks a boolean `abstract` field
    InvalidEntry { role: String, reason: String },
}

impl fmt::Display for RegistryError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RegistryError::InvalidJson(msg) => write!(f, "Invalid role table: {}", msg),
            RegistryError::InvalidEntry { role, reason } => {
                write!(f, "Invalid entry for role '{}': {}", role, reason)
            }
        }
    }
}

impl std::error::Error for RegistryError {}

#[derive(Debug, Deserialize)]
struct RawEntry {
    #[serde(rename = "abstract")]
    is_abstract: bool,
    #[serde(default, rename = "superClass")]
    superclasses: Vec<String>,
}

/// Metadata for one role
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoleEntry {
    pub name: String,
    #[serde(rename = "abstract")]
    pub is_abstract: bool,
    pub superclasses: Vec<String>,
}

impl RoleEntry {
    /// A concrete role may be used directly in markup
    pub fn is_concrete(&self) -> bool {
        !self.is_abstract
    }
}

/// Immutable mapping from role name to [`RoleEntry`]
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RoleRegistry {
    roles: BTreeMap<String, RoleEntry>,
}

impl RoleRegistry {
    /// Build a registry from a JSON object of role entries
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let table: BTreeMap<String, serde_json::Value> =
            serde_json::from_str(json).map_err(|e| RegistryError::InvalidJson(e.to_string()))?;

        table
            .into_iter()
            .map(|(name, value)| {
                let raw: RawEntry =
                    serde_json::from_value(value).map_err(|e| RegistryError::InvalidEntry {
                        role: name.clone(),
                        reason: e.to_string(),
                    })?;
                Ok(RoleEntry {
                    name,
                    is_abstract: raw.is_abstract,
                    superclasses: raw.superclasses,
                })
            })
            .collect::<Result<Vec<_>, _>>()
            .map(Self::from_entries)
    }

    /// Build a registry from entries; later duplicates replace earlier ones
    pub fn from_entries(entries: impl IntoIterator<Item = RoleEntry>) -> Self {
        let roles = entries
            .into_iter()
            .map(|entry| (entry.name.clone(), entry))
            .collect();
        Self { roles }
    }

    /// The process-wide bundled registry
    pub fn bundled() -> &'static RoleRegistry {
        &ROLES
    }

    /// Look up a role by its exact (case-sensitive) name
    pub fn lookup(&self, name: &str) -> Option<&RoleEntry> {
        self.roles.get(name)
    }

    /// Whether `name` is a known, non-abstract role
    pub fn is_concrete(&self, name: &str) -> bool {
        self.lookup(name).is_some_and(RoleEntry::is_concrete)
    }

    /// Names of all concrete roles, sorted
    pub fn concrete_roles(&self) -> Vec<&str> {
        self.names_where(|entry| !entry.is_abstract)
    }

    /// Names of all abstract roles, sorted
    pub fn abstract_roles(&self) -> Vec<&str> {
        self.names_where(|entry| entry.is_abstract)
    }

    fn names_where(&self, predicate: impl Fn(&RoleEntry) -> bool) -> Vec<&str> {
        self.roles
            .values()
            .filter(|entry| predicate(entry))
            .map(|entry| entry.name.as_str())
            .collect()
    }

    /// Entries in name order
    pub fn iter(&self) -> impl Iterator<Item = &RoleEntry> {
        self.roles.values()
    }

    pub fn len(&self) -> usize {
        self.roles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.roles.is_empty()
    }
}
