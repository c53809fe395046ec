//! Output sinks for values handed back to the calling pipeline

use crate::error::{Result, TagBumpError};
use std::fs::OpenOptions;
use std::io::Write;
use std::path::PathBuf;

/// Receives named output values such as `new_version`
pub trait OutputSink {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()>;
}

/// Appends `name=value` lines to a file, the GitHub Actions `GITHUB_OUTPUT` format
pub struct FileOutput {
    path: PathBuf,
}

impl FileOutput {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileOutput { path: path.into() }
    }
}

impl OutputSink for FileOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        check_single_line(name, value)?;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| {
                TagBumpError::output(format!("Cannot open {}: {}", self.path.display(), e))
            })?;
        writeln!(file, "{}={}", name, value)?;
        Ok(())
    }
}

/// Prints `name=value` lines to stdout
#[derive(Default)]
pub struct StdoutOutput;

impl OutputSink for StdoutOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        check_single_line(name, value)?;
        println!("{}={}", name, value);
        Ok(())
    }
}

/// Collects outputs in memory
#[derive(Debug, Default)]
pub struct MemoryOutput {
    pub values: Vec<(String, String)>,
}

impl OutputSink for MemoryOutput {
    fn set_output(&mut self, name: &str, value: &str) -> Result<()> {
        self.values.push((name.to_string(), value.to_string()));
        Ok(())
    }
}

fn check_single_line(name: &str, value: &str) -> Result<()> {
    if name.contains(['\n', '\r', '=']) || value.contains(['\n', '\r']) {
        return Err(TagBumpError::output(format!(
            "Output '{}' must be a single line",
            name
        )));
    }
    Ok(())
}
