//! Command-line surface: argument parsing and workflow orchestration

pub mod orchestration;

use std::path::PathBuf;

use crate::config::Config;

/// Command-line arguments
#[derive(clap::Parser, Debug, Clone, PartialEq)]
#[command(
    name = "tag-bump",
    version,
    about = "Create and push the next semver tag based on a conventional commit title"
)]
pub struct Args {
    #[arg(short, long, help = "Custom configuration file path")]
    pub config: Option<PathBuf>,

    #[arg(
        short,
        long,
        env = "TAGBUMP_TRIGGER",
        help = "Commit or pull-request title deciding the bump"
    )]
    pub trigger: Option<String>,

    #[arg(
        long,
        env = "INPUT_TOKEN",
        hide_env_values = true,
        help = "Token used to authenticate fetch and push over HTTPS"
    )]
    pub token: Option<String>,

    #[arg(
        long,
        env = "INPUT_DEFAULT_VERSION",
        help = "Baseline used when no tag, metadata or version file provides one"
    )]
    pub default_version: Option<String>,

    #[arg(short, long, help = "Remote to fetch tags from and push the new tag to")]
    pub remote: Option<String>,

    #[arg(
        short,
        long,
        env = "GITHUB_OUTPUT",
        help = "File to append new_version=<tag> to (stdout if unset)"
    )]
    pub output: Option<PathBuf>,

    #[arg(long, help = "Preview what would happen without making changes")]
    pub dry_run: bool,
}

impl Args {
    /// Apply command-line overrides on top of a loaded configuration
    pub fn apply_overrides(&self, config: &mut Config) {
        if let Some(version) = self.default_version.as_ref().filter(|v| !v.trim().is_empty()) {
            config.release.default_version = version.clone();
        }
        if let Some(remote) = self.remote.as_ref().filter(|r| !r.is_empty()) {
            config.release.remote = remote.clone();
        }
    }
}
