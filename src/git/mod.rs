//! Git operations abstraction layer
//!
//! This module provides a trait-based abstraction over the handful of Git
//! operations tag-bump needs, allowing for a real implementation backed by
//! `git2` and an in-memory mock for testing.
//!
//! - [repository::Git2Repository]: A real implementation using the `git2` crate
//! - [mock::MockRepository]: A mock implementation for testing
//!
//! ```rust
//! # use tag_bump::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> tag_bump::Result<()> {
//! repo.fetch_tags("origin")?;
//! if let Some(tag) = repo.describe_latest_tag()? {
//!     println!("latest tag: {}", tag);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod repository;

pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::error::Result;

/// Version-control operations used by the bump workflow
///
/// ## Error Handling
///
/// Implementations map underlying failures to [crate::error::TagBumpError].
/// Every failure is fatal to the run except the "no tags" case of
/// [Repository::describe_latest_tag], which is reported as `Ok(None)`.
pub trait Repository {
    /// Fetch all tags from a remote
    ///
    /// Equivalent to `git fetch --tags <remote>`.
    fn fetch_tags(&self, remote: &str) -> Result<()>;

    /// Name of the newest tag reachable from HEAD
    ///
    /// Equivalent to `git describe --tags --abbrev=0`.
    ///
    /// # Returns
    /// * `Ok(Some(tag))` - The nearest tag name
    /// * `Ok(None)` - If no tag is reachable
    /// * `Err` - Any other Git error
    fn describe_latest_tag(&self) -> Result<Option<String>>;

    /// Set `user.name` and `user.email` in the repository configuration
    fn configure_identity(&self, name: &str, email: &str) -> Result<()>;

    /// Create an annotated tag on HEAD
    ///
    /// # Returns
    /// * `Ok(())` - Tag created
    /// * `Err` - If the tag already exists, HEAD is unborn, or Git error occurs
    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()>;

    /// Push a single tag to a remote
    ///
    /// Equivalent to `git push <remote> <tag>`. A rejected reference update
    /// is an error.
    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()>;
}
