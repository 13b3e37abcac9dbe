pub mod boundary;
pub mod cli;
pub mod config;
pub mod error;
pub mod flag;
pub mod git;
pub mod indent;
pub mod manifest;
pub mod ui;
pub mod version;

pub use error::{AutoCommitError, Result};
