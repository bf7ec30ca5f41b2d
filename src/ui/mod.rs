//! User interface module
//!
//! All console output of the binary goes through [formatter]. Logging goes
//! to stderr through `tracing`; these functions print the user-facing
//! report.

pub mod formatter;

pub use formatter::{
    display_error, display_failure, display_outcome, display_plan, display_status,
    display_success, display_warning, format_version_change,
};
