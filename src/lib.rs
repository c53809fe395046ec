pub mod baseline;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod git;
pub mod output;
pub mod publisher;
pub mod ui;

pub use error::{Result, TagBumpError};
