//! Error types for the command line front end.
//!
//! This module wraps pipeline errors with actionable recovery suggestions.

use crate::bundler::{self, ConfigurationError, ErrorKind};
use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, BundlerError>;

/// Main error type for all CLI operations
#[derive(Error, Debug)]
pub enum BundlerError {
    /// CLI argument errors
    #[error("CLI error: {0}")]
    Cli(#[from] CliError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Assembly or build errors
    #[error("{0}")]
    Bundler(#[from] bundler::Error),

    /// Configuration file errors, with context
    #[error("{0:#}")]
    Config(#[from] anyhow::Error),
}

/// CLI-specific errors
#[derive(Error, Debug)]
pub enum CliError {
    /// Invalid command line arguments
    #[error("Invalid arguments: {reason}")]
    InvalidArguments {
        /// Reason for the error
        reason: String,
    },
}

impl BundlerError {
    /// Get actionable recovery suggestions for this error
    pub fn recovery_suggestions(&self) -> Vec<String> {
        let BundlerError::Bundler(err) = self else {
            return vec!["Check the error message above for specific details".to_string()];
        };

        match (err.kind(), err) {
            (_, bundler::Error::Configuration(ConfigurationError::NameRequired)) => {
                vec!["Pass --name when building more than one scheme".to_string()]
            }
            (ErrorKind::Configuration, _) => {
                vec!["Run with --help to see the required arguments".to_string()]
            }
            (ErrorKind::Validation, _) => vec![
                "Pass .framework directories whose binary is named after the bundle".to_string(),
            ],
            (ErrorKind::Tool, bundler::Error::CommandFailed { .. }) => vec![
                "Install the Xcode Command Line Tools: xcode-select --install".to_string(),
                "Or point --xcodebuild / --lipo at the tools explicitly".to_string(),
            ],
            (ErrorKind::Tool, _) => vec![
                "Re-run the command shown above to reproduce the failure".to_string(),
                "Use --keep-archives to inspect intermediate archives".to_string(),
            ],
            (ErrorKind::FileSystem, _) => {
                vec!["Check permissions and free space in the output directories".to_string()]
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_name_required_suggestion() {
        let err = BundlerError::from(bundler::Error::from(ConfigurationError::NameRequired));
        assert!(err.recovery_suggestions()[0].contains("--name"));
    }

    #[test]
    fn test_spawn_failure_suggests_toolchain() {
        let err = BundlerError::from(bundler::Error::CommandFailed {
            command: "lipo".into(),
            error: std::io::Error::from(std::io::ErrorKind::NotFound),
        });
        assert!(
            err.recovery_suggestions()
                .iter()
                .any(|s| s.contains("xcode-select"))
        );
    }
}
