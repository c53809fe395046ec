use crate::error::{Result, TagBumpError};
use crate::git::Repository;
use std::cell::RefCell;
use std::collections::BTreeMap;

/// Mock repository for testing without actual git operations
///
/// Tags created through [Repository::create_annotated_tag] are recorded with
/// their message, and pushed tags are recorded in push order.
pub struct MockRepository {
    latest_tag: Option<String>,
    identity: RefCell<Option<(String, String)>>,
    tags: RefCell<BTreeMap<String, String>>,
    pushed: RefCell<Vec<(String, String)>>,
    fetched: RefCell<Vec<String>>,
    fetch_error: Option<String>,
    push_error: Option<String>,
}

impl MockRepository {
    /// Create a new mock repository with no tags
    pub fn new() -> Self {
        MockRepository {
            latest_tag: None,
            identity: RefCell::new(None),
            tags: RefCell::new(BTreeMap::new()),
            pushed: RefCell::new(Vec::new()),
            fetched: RefCell::new(Vec::new()),
            fetch_error: None,
            push_error: None,
        }
    }

    /// Make `describe_latest_tag` report this tag
    pub fn with_latest_tag(mut self, tag: impl Into<String>) -> Self {
        let tag = tag.into();
        self.tags
            .get_mut()
            .insert(tag.clone(), format!("Release {}", tag));
        self.latest_tag = Some(tag);
        self
    }

    /// Make every fetch fail with the given message
    pub fn failing_fetch(mut self, message: impl Into<String>) -> Self {
        self.fetch_error = Some(message.into());
        self
    }

    /// Make every push fail with the given message
    pub fn failing_push(mut self, message: impl Into<String>) -> Self {
        self.push_error = Some(message.into());
        self
    }

    /// Message of a local tag, if it exists
    pub fn tag_message(&self, name: &str) -> Option<String> {
        self.tags.borrow().get(name).cloned()
    }

    /// Tags pushed so far, as (remote, tag) pairs
    pub fn pushed(&self) -> Vec<(String, String)> {
        self.pushed.borrow().clone()
    }

    /// Remotes fetched from so far
    pub fn fetched(&self) -> Vec<String> {
        self.fetched.borrow().clone()
    }

    /// Identity configured so far
    pub fn identity(&self) -> Option<(String, String)> {
        self.identity.borrow().clone()
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn fetch_tags(&self, remote: &str) -> Result<()> {
        if let Some(message) = &self.fetch_error {
            return Err(TagBumpError::remote(message.clone()));
        }
        self.fetched.borrow_mut().push(remote.to_string());
        Ok(())
    }

    fn describe_latest_tag(&self) -> Result<Option<String>> {
        Ok(self.latest_tag.clone())
    }

    fn configure_identity(&self, name: &str, email: &str) -> Result<()> {
        *self.identity.borrow_mut() = Some((name.to_string(), email.to_string()));
        Ok(())
    }

    fn create_annotated_tag(&self, name: &str, message: &str) -> Result<()> {
        let mut tags = self.tags.borrow_mut();
        if tags.contains_key(name) {
            return Err(TagBumpError::tag(format!("Tag '{}' already exists", name)));
        }
        tags.insert(name.to_string(), message.to_string());
        Ok(())
    }

    fn push_tag(&self, remote: &str, tag_name: &str) -> Result<()> {
        if let Some(message) = &self.push_error {
            return Err(TagBumpError::remote(message.clone()));
        }
        if !self.tags.borrow().contains_key(tag_name) {
            return Err(TagBumpError::remote(format!(
                "src refspec {} does not match any",
                tag_name
            )));
        }
        self.pushed
            .borrow_mut()
            .push((remote.to_string(), tag_name.to_string()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_repository_default() {
        let repo = MockRepository::default();
        assert_eq!(repo.describe_latest_tag().unwrap(), None);
        assert!(repo.pushed().is_empty());
    }

    #[test]
    fn test_mock_repository_latest_tag() {
        let repo = MockRepository::new().with_latest_tag("v2.3.4");
        assert_eq!(repo.describe_latest_tag().unwrap(), Some("v2.3.4".to_string()));
        assert!(repo.tag_message("v2.3.4").is_some());
    }

    #[test]
    fn test_mock_repository_duplicate_tag_fails() {
        let repo = MockRepository::new();
        repo.create_annotated_tag("v1.0.0", "Release v1.0.0").unwrap();
        assert!(repo.create_annotated_tag("v1.0.0", "Release v1.0.0").is_err());
    }

    #[test]
    fn test_mock_repository_push_requires_tag() {
        let repo = MockRepository::new();
        assert!(repo.push_tag("origin", "v9.9.9").is_err());

        repo.create_annotated_tag("v9.9.9", "Release v9.9.9").unwrap();
        repo.push_tag("origin", "v9.9.9").unwrap();
        assert_eq!(
            repo.pushed(),
            vec![("origin".to_string(), "v9.9.9".to_string())]
        );
    }

    #[test]
    fn test_mock_repository_failures() {
        let repo = MockRepository::new()
            .failing_fetch("network down")
            .failing_push("permission denied");
        assert!(repo.fetch_tags("origin").is_err());
        assert!(repo.push_tag("origin", "v1.0.0").is_err());
    }
}
