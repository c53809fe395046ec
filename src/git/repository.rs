use crate::error::{Result, TagBumpError};
use git2::{
    Cred, CredentialType, DescribeFormatOptions, DescribeOptions, ErrorClass, ErrorCode,
    FetchOptions, PushOptions, RemoteCallbacks, Repository as Git2Repo,
};
use std::path::Path;

/// Wrapper around git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Git2Repo,
    token: Option<String>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;

        Ok(Git2Repository { repo, token: None })
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository { repo, token: None }
    }

    /// Use a token for HTTPS authentication on fetch and push
    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.is_empty());
        self
    }

    /// Root of the working tree, if the repository is not bare
    pub fn workdir(&self) -> Option<&Path> {
        self.repo.workdir()
    }

    /// Credential callbacks shared by fetch and push.
    fn callbacks(&self) -> RemoteCallbacks<'_> {
        let mut callbacks = RemoteCallbacks::new();
        let mut credentials = CredentialAttempts::new(self.token.as_deref());

        callbacks.credentials(move |_url, username_from_url, allowed_types| {
            credentials.next(username_from_url, allowed_types)
        });

        callbacks
    }
}

/// Hands out each kind of credential at most once per operation.
///
/// libgit2 asks again after every rejected credential. Order: the token as an
/// HTTPS password, then the SSH agent, then the default credential helper.
struct CredentialAttempts<'a> {
    token: Option<&'a str>,
    tried: CredentialType,
}

impl<'a> CredentialAttempts<'a> {
    fn new(token: Option<&'a str>) -> Self {
        CredentialAttempts {
            token,
            tried: CredentialType::empty(),
        }
    }

    fn next(
        &mut self,
        username_from_url: Option<&str>,
        allowed_types: CredentialType,
    ) -> std::result::Result<Cred, git2::Error> {
        if self.first_try(allowed_types, CredentialType::USER_PASS_PLAINTEXT) {
            if let Some(token) = self.token {
                return Cred::userpass_plaintext("x-access-token", token);
            }
        }

        if self.first_try(allowed_types, CredentialType::SSH_KEY) {
            if let Ok(cred) = Cred::ssh_key_from_agent(username_from_url.unwrap_or("git")) {
                return Ok(cred);
            }
        }

        if self.first_try(allowed_types, CredentialType::DEFAULT) {
            return Cred::default();
        }

        Err(git2::Error::from_str("authentication failed"))
    }

    fn first_try(&mut self, allowed_types: CredentialType, kind: CredentialType) -> bool {
        if !allowed_types.contains(kind) || self.tried.contains(kind) {
            return false;
        }
        self.tried.insert(kind);
        true
    }
}

impl super::Repository for Git2Repository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        log::debug!("git fetch --tags {}", remote);
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| TagBumpError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut fetch_options = FetchOptions::new();
        fetch_options.remote_callbacks(self.callbacks());

        remote_handle
            .fetch(&["refs/tags/*:refs/tags/*"], Some(&mut fetch_options), None)
            .map_err(|e| {
                TagBumpError::remote(format!("Fetch from '{}' failed: {}", remote, e))
            })?;

        Ok(())
    }

    fn describe_latest_tag(&self) -> Result<Option<String>> {
        log::debug!("git describe --tags --abbrev=0");
        let mut options = DescribeOptions::new();
        options.describe_tags();

        let describe = match self.repo.describe(&options) {
            Ok(describe) => describe,
            // NotFound: no tag reachable from HEAD. Describe class: no tags at all.
            Err(e) if e.code() == ErrorCode::NotFound || e.class() == ErrorClass::Describe => {
                return Ok(None);
            }
            Err(e) => return Err(e.into()),
        };

        let mut format = DescribeFormatOptions::new();
        format.abbreviated_size(0);
        let tag = describe.format(Some(&format))?;

        Ok(Some(tag))
    }

    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        log::debug!("git config user.name {:?} / user.email {:?}", name, email);
        let mut config = self.repo.config()?;
        config.set_str("user.name", name)?;
        config.set_str("user.email", email)?;
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        log::debug!("git tag -a {} -m {:?}", name, message);
        let head = self
            .repo
            .head()
            .and_then(|h| h.peel_to_commit())
            .map_err(|e| TagBumpError::tag(format!("Cannot resolve HEAD: {}", e)))?;
        let signature = self.repo.signature()?;

        self.repo
            .tag(name, head.as_object(), &signature, message, false)
            .map_err(|e| {
                if e.code() == ErrorCode::Exists {
                    TagBumpError::tag(format!("Tag '{}' already exists", name))
                } else {
                    TagBumpError::tag(format!("Cannot create tag '{}': {}", name, e))
                }
            })?;

        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        log::debug!("git push {} {}", remote, tag_name);
        let mut remote_handle = self
            .repo
            .find_remote(remote)
            .map_err(|e| TagBumpError::remote(format!("Cannot find remote '{}': {}", remote, e)))?;

        let mut callbacks = self.callbacks();
        callbacks.push_update_reference(|refname, status| match status {
            Some(status) => Err(git2::Error::from_str(&format!(
                "{} rejected: {}",
                refname, status
            ))),
            None => Ok(()),
        });

        let mut push_options = PushOptions::new();
        push_options.remote_callbacks(callbacks);

        let refspec = format!("refs/tags/{0}:refs/tags/{0}", tag_name);
        remote_handle
            .push(&[refspec.as_str()], Some(&mut push_options))
            .map_err(|e| match e.class() {
                ErrorClass::Net => {
                    TagBumpError::remote(format!("Network error during push: {}", e))
                }
                _ => TagBumpError::remote(format!("Failed to push tag '{}': {}", tag_name, e)),
            })?;

        Ok(())
    }
}
