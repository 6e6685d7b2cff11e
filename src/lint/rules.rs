//! Built-in rules

pub mod aria_role;

pub use aria_role::{AriaRole, AriaRoleOptions, RoleValue};
