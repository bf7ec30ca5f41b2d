//! Domain logic - pure release rules independent of git and the remote API

pub mod branch;
pub mod changes;
pub mod context;
pub mod tag;
pub mod version;

pub use branch::{BranchContext, BranchRole};
pub use changes::{sanitize, ChangeSet};
pub use context::ReleaseContext;
pub use tag::TagPattern;
pub use version::{extract_version, next_version, BumpPolicy, SemanticVersion};
