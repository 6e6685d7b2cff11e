//! ARIA data used by the rules

pub mod roles;

pub use roles::{RegistryError, RoleEntry, RoleRegistry, ROLES};
