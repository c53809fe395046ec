use crate::config::{IdentityConfig, ReleaseConfig};
use crate::domain::Version;
use crate::error::Result;
use crate::git::Repository;

/// Creates the annotated release tag and pushes it
pub struct TagPublisher<'a, R: Repository> {
    repo: &'a R,
    identity: &'a IdentityConfig,
    release: &'a ReleaseConfig,
    remote: &'a str,
}

impl<'a, R: Repository> TagPublisher<'a, R> {
    pub fn new(
        repo: &'a R,
        identity: &'a IdentityConfig,
        release: &'a ReleaseConfig,
        remote: &'a str,
    ) -> Self {
        TagPublisher {
            repo,
            identity,
            release,
            remote,
        }
    }

    /// Tag HEAD with `version` and push the tag
    ///
    /// Returns the tag name. A failed push leaves the local tag in place and
    /// is reported as an error.
    pub fn publish(&self, version: &Version) -> Result<String> {
        let tag = version.to_string();

        self.repo
            .configure_identity(&self.identity.name, &self.identity.email)?;
        self.repo
            .create_annotated_tag(&tag, &self.release.format_message(&tag))?;
        log::debug!("created tag {}", tag);

        self.repo.push_tag(self.remote, &tag)?;
        log::debug!("pushed tag {} to {}", tag, self.remote);

        Ok(tag)
    }
}
