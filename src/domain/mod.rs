//! Domain logic - pure business rules independent of git operations

pub mod bump;
pub mod version;

pub use bump::{BumpClass, BumpClassifier};
pub use version::Version;
