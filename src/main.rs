use anyhow::Result;
use clap::Parser;

use tag_bump::cli::orchestration::{run_bump_workflow, BumpWorkflowArgs};
use tag_bump::cli::Args;
use tag_bump::config::load_config;
use tag_bump::git::Git2Repository;
use tag_bump::output::{FileOutput, OutputSink, StdoutOutput};
use tag_bump::ui;

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn"))
        .format_timestamp(None)
        .init();

    let args = Args::parse();

    if let Err(e) = run(args) {
        ui::display_error(&e.to_string());
        std::process::exit(1);
    }
}

fn run(args: Args) -> Result<()> {
    // Initialize git operations
    let repo = Git2Repository::open(".")?.with_token(args.token.clone());
    let root = match repo.workdir() {
        Some(dir) => dir.to_path_buf(),
        None => std::env::current_dir()?,
    };

    // Load configuration
    let mut config = load_config(args.config.as_deref(), &root)?;
    args.apply_overrides(&mut config);

    let trigger = args.trigger.clone().unwrap_or_default();
    if trigger.trim().is_empty() {
        ui::display_info("No trigger text supplied; nothing can call for a bump.");
    }

    let mut output: Box<dyn OutputSink> = match &args.output {
        Some(path) => Box::new(FileOutput::new(path)),
        None => Box::new(StdoutOutput),
    };

    let workflow_args = BumpWorkflowArgs {
        trigger,
        root,
        dry_run: args.dry_run,
    };
    run_bump_workflow(&repo, &config, &workflow_args, &mut *output)?;

    Ok(())
}
