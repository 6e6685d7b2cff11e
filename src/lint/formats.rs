//! Output formats for lint reports
//!
//! Each format implements [`DiagnosticFormatter`] and is looked up by name in a
//! [`FormatRegistry`]. The CLI's `--format` flag selects one.

pub mod registry;
pub mod simple;
pub mod structured;

pub use registry::{DiagnosticFormatter, FormatError, FormatRegistry};
pub use simple::SimpleFormatter;
pub use structured::{JsonFormatter, YamlFormatter};
