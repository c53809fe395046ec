//! Main workflow orchestration logic
//!
//! Runs one bump from start to finish:
//! `Start → TagsFetched → BaselineResolved → Classified`, then either stops
//! (no bump) or goes `TagCreated → TagPushed → OutputEmitted`. Any error
//! aborts the run at the step that produced it.

use std::path::PathBuf;

use crate::baseline::BaselineResolver;
use crate::config::Config;
use crate::domain::{BumpClass, BumpClassifier, Version};
use crate::error::{Result, TagBumpError};
use crate::git::Repository;
use crate::output::OutputSink;
use crate::publisher::TagPublisher;
use crate::ui;

/// Name of the output carrying the new tag.
pub const NEW_VERSION_OUTPUT: &str = "new_version";

/// Arguments for the bump workflow
///
/// Decoupled from the CLI so the workflow can be driven programmatically.
#[derive(Debug, Clone, PartialEq)]
pub struct BumpWorkflowArgs {
    /// Change description, usually a commit or pull-request title
    pub trigger: String,

    /// Directory the metadata and version files are resolved against
    pub root: PathBuf,

    /// Preview mode - don't create or push tags, don't emit outputs
    pub dry_run: bool,
}

/// How a run ended
#[derive(Debug, Clone, PartialEq)]
pub enum WorkflowOutcome {
    /// The trigger did not call for a release
    NoBump { baseline: String },

    /// Dry run: this tag would have been created
    Planned {
        baseline: String,
        bump: BumpClass,
        new_version: Version,
    },

    /// The tag was created, pushed and reported
    Published {
        baseline: String,
        bump: BumpClass,
        new_version: Version,
    },
}

/// Main bump workflow
///
/// 1. Fetch tags from the configured remote
/// 2. Resolve the baseline version
/// 3. Classify the trigger
/// 4. If a bump is due, tag, push and emit `new_version`
pub fn run_bump_workflow<R: Repository>(
    repo: &R,
    config: &Config,
    args: &BumpWorkflowArgs,
    output: &mut dyn OutputSink,
) -> Result<WorkflowOutcome> {
    let remote = config.release.remote.as_str();

    ui::display_status(&format!("Fetching tags from '{}'...", remote));
    repo.fetch_tags(remote)?;

    let resolver = BaselineResolver::standard(
        repo,
        &args.root,
        &config.sources.metadata_file,
        &config.sources.version_file,
        &config.release.default_version,
    );
    let baseline = resolver.resolve()?.ok_or_else(|| {
        TagBumpError::config("No baseline version: no tag, metadata, version file or default")
    })?;

    let classifier = BumpClassifier::new(&config.rules)?;
    let bump = classifier.classify(&args.trigger);
    ui::display_decision(&baseline.version, &baseline.source, &args.trigger, bump);

    if bump == BumpClass::None {
        ui::display_info("No version bump required.");
        return Ok(WorkflowOutcome::NoBump {
            baseline: baseline.version,
        });
    }

    let new_version = Version::parse(&baseline.version)?.bump(bump)?;
    ui::display_proposed_tag(&baseline.version, &new_version);

    if args.dry_run {
        ui::display_status("Dry run:");
        ui::display_success(&format!("  Would create tag: {}", new_version));
        ui::display_success(&format!("  Would push {} to {}", new_version, remote));
        return Ok(WorkflowOutcome::Planned {
            baseline: baseline.version,
            bump,
            new_version,
        });
    }

    ui::display_status(&format!("Creating and pushing tag: {}", new_version));
    let publisher = TagPublisher::new(repo, &config.identity, &config.release, remote);
    let tag = publisher.publish(&new_version)?;
    ui::display_success(&format!("Pushed tag {} to {}", tag, remote));

    output.set_output(NEW_VERSION_OUTPUT, &tag)?;

    Ok(WorkflowOutcome::Published {
        baseline: baseline.version,
        bump,
        new_version,
    })
}
