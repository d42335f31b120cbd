use thiserror::Error;

use salsheli_catalog::{JsonError, YamlError};
use salsheli_import::ImportError;
use salsheli_lib::RuleError;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Partition file could not be read or written
    #[error("Catalog error: {0}")]
    Catalog(#[from] JsonError),

    /// Rule file could not be read or parsed
    #[error("Rules error: {0}")]
    RuleFile(#[from] YamlError),

    /// Rule table could not be compiled or a plan is missing
    #[error("Rules error: {0}")]
    Rule(#[from] RuleError),

    /// Catalog transformation failed
    #[error("{0}")]
    Import(#[from] ImportError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// `check` found invariant violations
    #[error("Check failed: {0}")]
    Check(String),
}

impl CliError {
    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn check(msg: impl Into<String>) -> Self {
        Self::Check(msg.into())
    }
}
