//! User-facing diagnostics.
//!
//! Everything the user should see goes through here; internal tracing uses
//! the `log` facade instead.

use crate::domain::{BumpClass, Version};
use console::style;

/// Whether we are running inside a GitHub Actions job.
pub fn in_github_actions() -> bool {
    std::env::var("GITHUB_ACTIONS")
        .map(|v| v == "true")
        .unwrap_or(false)
}

/// Format and print an error message in red.
///
/// Inside GitHub Actions the message is also emitted as an `::error::`
/// workflow command so it shows up as an annotation.
pub fn display_error(message: &str) {
    eprintln!("{} {}", style("ERROR:").red(), message);
    if in_github_actions() {
        println!("{}", workflow_error_command(message));
    }
}

/// Format and print a success message with green checkmark.
pub fn display_success(message: &str) {
    println!("{} {}", style("✓").green(), message);
}

/// Format and print a status message with yellow arrow.
pub fn display_status(message: &str) {
    println!("{} {}", style("→").yellow(), message);
}

/// Format and print an informational notice.
pub fn display_info(message: &str) {
    println!("{} {}", style("i").cyan(), message);
}

/// Display the baseline and the bump decision.
pub fn display_decision(baseline: &str, source: &str, trigger: &str, bump: BumpClass) {
    println!(
        "\n{} {} {}",
        style("Baseline:").bold(),
        baseline,
        style(format!("(from {})", source)).dim()
    );
    println!("{} {:?}", style("Trigger:").bold(), trigger);
    println!("{} {}", style("Bump:").bold(), bump);
}

/// Display the proposed tag change.
pub fn display_proposed_tag(baseline: &str, new_version: &Version) {
    println!("\n{}", style("Proposed Tag Change:").bold());
    println!("  From: {}", style(baseline).red());
    println!("  To:   {}", style(new_version).green());
}

/// Escape a message for a GitHub Actions workflow command.
pub fn workflow_error_command(message: &str) -> String {
    let escaped = message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A");
    format!("::error::{}", escaped)
}
