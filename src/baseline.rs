//! Baseline version resolution
//!
//! The baseline is the version considered current before any bump. It comes
//! from the first [VersionSource] in an ordered list that yields a non-empty
//! value. Missing or unreadable sources are skipped with a notice; only VCS
//! failures abort resolution.

use crate::error::Result;
use crate::git::Repository;
use crate::ui;
use std::fs;
use std::path::{Path, PathBuf};

/// A producer of a candidate baseline version
pub trait VersionSource {
    /// Short human-readable label, used in notices
    fn name(&self) -> String;

    /// Read the candidate
    ///
    /// # Returns
    /// * `Ok(Some(text))` - A candidate (possibly blank, the resolver trims it)
    /// * `Ok(None)` - The source is unavailable
    /// * `Err` - A fatal failure that must abort the run
    fn read(&self) -> Result<Option<String>>;
}

/// The newest tag reachable from HEAD
pub struct LatestTagSource<'a, R: Repository> {
    repo: &'a R,
}

impl<'a, R: Repository> LatestTagSource<'a, R> {
    pub fn new(repo: &'a R) -> Self {
        LatestTagSource { repo }
    }
}

impl<R: Repository> VersionSource for LatestTagSource<'_, R> {
    fn name(&self) -> String {
        "latest tag".to_string()
    }

    fn read(&self) -> Result<Option<String>> {
        let tag = self.repo.describe_latest_tag()?;
        if tag.is_none() {
            ui::display_info("No tags found, skipping version read from tags.");
        }
        Ok(tag)
    }
}

/// The `version` field of a project metadata descriptor
///
/// `.toml` files are read as Cargo manifests (`[package].version`); anything
/// else is read as a JSON object with a top-level `version` (package.json).
pub struct MetadataSource {
    path: PathBuf,
}

impl MetadataSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        MetadataSource { path: path.into() }
    }

    fn parse(&self, text: &str) -> std::result::Result<Option<String>, String> {
        let is_toml = self
            .path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("toml"))
            .unwrap_or(false);

        if is_toml {
            let value: toml::Value = toml::from_str(text).map_err(|e| e.to_string())?;
            Ok(value
                .get("package")
                .and_then(|p| p.get("version"))
                .and_then(|v| v.as_str())
                .map(str::to_string))
        } else {
            let value: serde_json::Value =
                serde_json::from_str(text).map_err(|e| e.to_string())?;
            Ok(value
                .get("version")
                .and_then(|v| v.as_str())
                .map(str::to_string))
        }
    }
}

impl VersionSource for MetadataSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<String>> {
        let text = match fs::read_to_string(&self.path) {
            Ok(text) => text,
            Err(e) => {
                log::debug!("cannot read {}: {}", self.path.display(), e);
                ui::display_info(&format!(
                    "No {} found, skipping version read from it.",
                    self.name()
                ));
                return Ok(None);
            }
        };

        match self.parse(&text) {
            Ok(Some(version)) => Ok(Some(version)),
            Ok(None) => {
                ui::display_info(&format!(
                    "{} has no version field, skipping it.",
                    self.name()
                ));
                Ok(None)
            }
            Err(e) => {
                ui::display_info(&format!(
                    "Cannot parse {} ({}), skipping version read from it.",
                    self.name(),
                    e
                ));
                Ok(None)
            }
        }
    }
}

/// A plain-text file whose content is a single version
pub struct VersionFileSource {
    path: PathBuf,
}

impl VersionFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        VersionFileSource { path: path.into() }
    }
}

impl VersionSource for VersionFileSource {
    fn name(&self) -> String {
        self.path.display().to_string()
    }

    fn read(&self) -> Result<Option<String>> {
        match fs::read_to_string(&self.path) {
            Ok(text) => Ok(Some(text.trim().to_string())),
            Err(e) => {
                log::debug!("cannot read {}: {}", self.path.display(), e);
                ui::display_info(&format!(
                    "No {} file found, skipping version read from it.",
                    self.name()
                ));
                Ok(None)
            }
        }
    }
}

/// A statically configured fallback
pub struct DefaultSource {
    version: String,
}

impl DefaultSource {
    pub fn new(version: impl Into<String>) -> Self {
        DefaultSource {
            version: version.into(),
        }
    }
}

impl VersionSource for DefaultSource {
    fn name(&self) -> String {
        "default version".to_string()
    }

    fn read(&self) -> Result<Option<String>> {
        Ok(Some(self.version.clone()))
    }
}

/// A selected baseline and the source that produced it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Baseline {
    pub version: String,
    pub source: String,
}

/// Ordered first-non-empty selection over version sources
#[derive(Default)]
pub struct BaselineResolver<'a> {
    sources: Vec<Box<dyn VersionSource + 'a>>,
}

impl<'a> BaselineResolver<'a> {
    pub fn new() -> Self {
        BaselineResolver {
            sources: Vec::new(),
        }
    }

    /// Append a source with lower priority than those already added
    pub fn with_source(mut self, source: impl VersionSource + 'a) -> Self {
        self.sources.push(Box::new(source));
        self
    }

    /// The standard chain: latest tag, metadata file, version file, default
    ///
    /// File paths are resolved against `root`.
    pub fn standard<R: Repository>(
        repo: &'a R,
        root: &Path,
        metadata_file: &Path,
        version_file: &Path,
        default_version: &str,
    ) -> Self {
        BaselineResolver::new()
            .with_source(LatestTagSource::new(repo))
            .with_source(MetadataSource::new(root.join(metadata_file)))
            .with_source(VersionFileSource::new(root.join(version_file)))
            .with_source(DefaultSource::new(default_version))
    }

    /// Consult sources in order and return the first non-empty candidate
    ///
    /// Later sources are not read once a candidate is found. Returns
    /// `Ok(None)` if every source is empty.
    pub fn resolve(&self) -> Result<Option<Baseline>> {
        for source in &self.sources {
            let candidate = source.read()?;
            let trimmed = candidate.as_deref().map(str::trim).unwrap_or("");
            if trimmed.is_empty() {
                log::debug!("baseline source '{}' is empty", source.name());
                continue;
            }

            log::debug!("baseline '{}' from {}", trimmed, source.name());
            return Ok(Some(Baseline {
                version: trimmed.to_string(),
                source: source.name(),
            }));
        }

        Ok(None)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TagBumpError;
    use crate::git::MockRepository;
    use std::cell::Cell;
    use std::rc::Rc;
    use tempfile::TempDir;

    struct Fixed {
        value: Option<&'static str>,
        reads: Rc<Cell<usize>>,
    }

    impl VersionSource for Fixed {
        fn name(&self) -> String {
            "fixed".to_string()
        }

        fn read(&self) -> Result<Option<String>> {
            self.reads.set(self.reads.get() + 1);
            Ok(self.value.map(str::to_string))
        }
    }

    struct Failing;

    impl VersionSource for Failing {
        fn name(&self) -> String {
            "failing".to_string()
        }

        fn read(&self) -> Result<Option<String>> {
            Err(TagBumpError::remote("describe failed"))
        }
    }

    #[test]
    fn test_first_non_empty_wins_and_stops() {
        let later = Rc::new(Cell::new(0));
        let resolver = BaselineResolver::new()
            .with_source(Fixed {
                value: None,
                reads: Rc::new(Cell::new(0)),
            })
            .with_source(Fixed {
                value: Some("  "),
                reads: Rc::new(Cell::new(0)),
            })
            .with_source(Fixed {
                value: Some(" v1.2.3\n"),
                reads: Rc::new(Cell::new(0)),
            })
            .with_source(Fixed {
                value: Some("v9.9.9"),
                reads: later.clone(),
            });

        let baseline = resolver.resolve().unwrap().unwrap();
        assert_eq!(baseline.version, "v1.2.3");
        assert_eq!(later.get(), 0);
    }

    #[test]
    fn test_all_empty_is_none() {
        let resolver = BaselineResolver::new().with_source(DefaultSource::new(""));
        assert_eq!(resolver.resolve().unwrap(), None);
    }

    #[test]
    fn test_fatal_source_error_propagates() {
        let resolver = BaselineResolver::new()
            .with_source(Failing)
            .with_source(DefaultSource::new("v0.1.0"));
        assert!(resolver.resolve().is_err());
    }

    #[test]
    fn test_standard_chain_prefers_tag() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("package.json"), r#"{"version": "1.5.0"}"#).unwrap();
        let repo = MockRepository::new().with_latest_tag("v2.3.4");

        let resolver = BaselineResolver::standard(
            &repo,
            dir.path(),
            Path::new("package.json"),
            Path::new(".version"),
            "v0.1.0",
        );
        let baseline = resolver.resolve().unwrap().unwrap();
        assert_eq!(baseline.version, "v2.3.4");
        assert_eq!(baseline.source, "latest tag");
    }

    #[test]
    fn test_version_file_beats_default() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join(".version"), "3.1.4\n").unwrap();
        let repo = MockRepository::new();

        let resolver = BaselineResolver::standard(
            &repo,
            dir.path(),
            Path::new("package.json"),
            Path::new(".version"),
            "v0.1.0",
        );
        assert_eq!(resolver.resolve().unwrap().unwrap().version, "3.1.4");
    }

    #[test]
    fn test_metadata_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("package.json");
        fs::write(&path, r#"{"name": "app", "version": "1.5.0"}"#).unwrap();
        assert_eq!(
            MetadataSource::new(&path).read().unwrap(),
            Some("1.5.0".to_string())
        );
    }

    #[test]
    fn test_metadata_cargo_manifest() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("Cargo.toml");
        fs::write(&path, "[package]\nname = \"app\"\nversion = \"0.4.2\"\n").unwrap();
        assert_eq!(
            MetadataSource::new(&path).read().unwrap(),
            Some("0.4.2".to_string())
        );
    }

    #[test]
    fn test_metadata_malformed_or_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let broken = dir.path().join("package.json");
        fs::write(&broken, "{ not json").unwrap();
        assert_eq!(MetadataSource::new(&broken).read().unwrap(), None);

        let numeric = dir.path().join("numeric.json");
        fs::write(&numeric, r#"{"version": 3}"#).unwrap();
        assert_eq!(MetadataSource::new(&numeric).read().unwrap(), None);

        let missing = dir.path().join("missing.json");
        assert_eq!(MetadataSource::new(&missing).read().unwrap(), None);
    }

    #[test]
    fn test_version_file_missing_is_empty() {
        let dir = TempDir::new().unwrap();
        let source = VersionFileSource::new(dir.path().join(".version"));
        assert_eq!(source.read().unwrap(), None);
    }
}
