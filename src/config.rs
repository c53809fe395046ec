use crate::error::{Result, TagBumpError};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the project-local configuration file.
pub const CONFIG_FILE_NAME: &str = "tagbump.toml";

/// Represents the complete configuration for tag-bump.
///
/// Contains release settings, baseline sources, the tagging identity and the
/// prefix rules used to classify trigger strings.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub release: ReleaseConfig,

    #[serde(default)]
    pub sources: SourcesConfig,

    #[serde(default)]
    pub identity: IdentityConfig,

    #[serde(default)]
    pub rules: RulesConfig,
}

fn default_remote() -> String {
    "origin".to_string()
}

fn default_version() -> String {
    "v0.1.0".to_string()
}

fn default_tag_message() -> String {
    "Release {version}".to_string()
}

/// Where tags go and how they are annotated.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    #[serde(default = "default_remote")]
    pub remote: String,

    /// Baseline used when no tag, metadata or version file provides one
    #[serde(default = "default_version")]
    pub default_version: String,

    /// Annotated tag message; `{version}` is replaced with the new tag
    #[serde(default = "default_tag_message")]
    pub tag_message: String,
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            remote: default_remote(),
            default_version: default_version(),
            tag_message: default_tag_message(),
        }
    }
}

impl ReleaseConfig {
    /// Render the annotated tag message for a tag name
    pub fn format_message(&self, tag: &str) -> String {
        self.tag_message.replace("{version}", tag)
    }
}

fn default_metadata_file() -> PathBuf {
    PathBuf::from("package.json")
}

fn default_version_file() -> PathBuf {
    PathBuf::from(".version")
}

/// File-based baseline sources, relative to the repository root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct SourcesConfig {
    /// Project metadata descriptor (`.json` or `.toml`) carrying a version
    #[serde(default = "default_metadata_file")]
    pub metadata_file: PathBuf,

    /// Plain-text file holding a single version line
    #[serde(default = "default_version_file")]
    pub version_file: PathBuf,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        SourcesConfig {
            metadata_file: default_metadata_file(),
            version_file: default_version_file(),
        }
    }
}

fn default_identity_name() -> String {
    "GitHub Actions".to_string()
}

fn default_identity_email() -> String {
    "actions@github.com".to_string()
}

/// Author identity written to `user.name` / `user.email` before tagging.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct IdentityConfig {
    #[serde(default = "default_identity_name")]
    pub name: String,

    #[serde(default = "default_identity_email")]
    pub email: String,
}

impl Default for IdentityConfig {
    fn default() -> Self {
        IdentityConfig {
            name: default_identity_name(),
            email: default_identity_email(),
        }
    }
}

fn default_major_prefixes() -> Vec<String> {
    vec![
        "feat!:".to_string(),
        "fix!:".to_string(),
        "BREAKING CHANGE".to_string(),
    ]
}

fn default_minor_prefixes() -> Vec<String> {
    vec!["feat:".to_string()]
}

fn default_patch_prefixes() -> Vec<String> {
    vec!["fix:".to_string()]
}

/// Trigger prefixes per bump class.
///
/// Prefixes are literal text, matched case-insensitively at the start of the
/// trigger. Major rules are checked first, then minor, then patch.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct RulesConfig {
    #[serde(default = "default_major_prefixes")]
    pub major: Vec<String>,

    #[serde(default = "default_minor_prefixes")]
    pub minor: Vec<String>,

    #[serde(default = "default_patch_prefixes")]
    pub patch: Vec<String>,
}

impl Default for RulesConfig {
    fn default() -> Self {
        RulesConfig {
            major: default_major_prefixes(),
            minor: default_minor_prefixes(),
            patch: default_patch_prefixes(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `tagbump.toml` in the repository root
/// 3. `.tagbump.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, root: &Path) -> Result<Config> {
    if let Some(path) = config_path {
        return load_from(path);
    }

    let local = root.join(CONFIG_FILE_NAME);
    if local.exists() {
        return load_from(&local);
    }

    if let Some(config_dir) = dirs::config_dir() {
        let user = config_dir.join(format!(".{}", CONFIG_FILE_NAME));
        if user.exists() {
            return load_from(&user);
        }
    }

    log::debug!("no configuration file found, using defaults");
    Ok(Config::default())
}

fn load_from(path: &Path) -> Result<Config> {
    log::debug!("loading configuration from {}", path.display());
    let config_str = fs::read_to_string(path).map_err(|e| {
        TagBumpError::config(format!("Cannot read {}: {}", path.display(), e))
    })?;
    parse_config(&config_str)
        .map_err(|e| TagBumpError::config(format!("{}: {}", path.display(), e)))
}

/// Parses configuration from TOML text.
pub fn parse_config(text: &str) -> std::result::Result<Config, toml::de::Error> {
    toml::from_str(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.release.remote, "origin");
        assert_eq!(config.release.default_version, "v0.1.0");
        assert_eq!(config.sources.metadata_file, PathBuf::from("package.json"));
        assert_eq!(config.sources.version_file, PathBuf::from(".version"));
        assert_eq!(config.identity.name, "GitHub Actions");
        assert_eq!(config.identity.email, "actions@github.com");
        assert_eq!(config.rules.minor, vec!["feat:".to_string()]);
    }

    #[test]
    fn test_empty_file_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, Config::default());
    }

    #[test]
    fn test_partial_sections_keep_defaults() {
        let config = parse_config(
            r#"
            [release]
            remote = "upstream"

            [rules]
            patch = ["fix:", "perf:"]
            "#,
        )
        .unwrap();

        assert_eq!(config.release.remote, "upstream");
        assert_eq!(config.release.default_version, "v0.1.0");
        assert_eq!(config.rules.patch, vec!["fix:", "perf:"]);
        assert_eq!(config.rules.major, default_major_prefixes());
    }

    #[test]
    fn test_format_message() {
        let release = ReleaseConfig::default();
        assert_eq!(release.format_message("v1.2.3"), "Release v1.2.3");
    }

    #[test]
    fn test_invalid_toml_is_error() {
        assert!(parse_config("[release\nremote = 1").is_err());
    }
}
