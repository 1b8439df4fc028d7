//! Error types for xcframework assembly.
//!
//! Every failure the pipeline can report belongs to one of four kinds
//! (see [`ErrorKind`]): configuration, validation, tool, or file system.
//! Free-text detail (stderr, command lines, paths) travels as fields of
//! those variants, never as a catch-all variant.
//!
//! # Features
//!
//! - **ErrorExt trait**: Filesystem operations with automatic path context
//! - **Structured tool failures**: stderr and the exact command line
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_xcframework::bundler::{Error, ErrorKind};
//!
//! fn report(err: &Error) {
//!     match err.kind() {
//!         ErrorKind::Configuration => eprintln!("fix your flags: {err}"),
//!         ErrorKind::Tool => eprintln!("toolchain failed: {err}"),
//!         _ => eprintln!("{err}"),
//!     }
//! }
//! ```

use std::{io, path::PathBuf};
use thiserror::Error as DeriveError;

/// Result alias used by every bundler operation.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the assembler and the multi-target builder.
#[derive(Debug, DeriveError)]
pub enum Error {
    /// A required input is absent. Detected before any I/O.
    #[error("configuration error: {0}")]
    Configuration(#[from] ConfigurationError),

    /// A supplied bundle failed a structural check.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An external tool ran but reported failure.
    ///
    /// `status` is `None` when the process was terminated by a signal.
    /// Archive steps also land here when they exit zero but write to stderr.
    #[error("{command} failed (exit status {status:?}):\n{stderr}")]
    Tool {
        /// The exact command line that was attempted
        command: String,
        /// Exit code of the process, if any
        status: Option<i32>,
        /// Captured standard error
        stderr: String,
    },

    /// An external tool could not be started at all.
    #[error("failed to run command {command}: {error}")]
    CommandFailed {
        /// Command that failed to execute
        command: String,
        /// The underlying error
        error: io::Error,
    },

    /// File system error with path context.
    ///
    /// Created by the [`ErrorExt`] trait's `fs_context` method.
    #[error("{context} {}: {error}", path.display())]
    Fs {
        /// Context describing the operation (e.g., "copying bundle")
        context: &'static str,
        /// Path that was being accessed
        path: PathBuf,
        /// The underlying I/O error
        error: io::Error,
    },

    /// Error walking a directory tree.
    #[error("{0}")]
    WalkdirError(#[from] walkdir::Error),

    /// Path prefix stripping error.
    #[error("{0}")]
    StripError(#[from] std::path::StripPrefixError),

    /// ZIP archive creation error.
    #[error("{0}")]
    ZipError(#[from] zip::result::ZipError),

    /// A blocking file-system task panicked or was cancelled.
    #[error("background task failed: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Missing or inconsistent configuration.
///
/// Variants are listed in the order the checks run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, DeriveError)]
pub enum ConfigurationError {
    /// No artifact name given to the assembler
    #[error("an artifact name is required")]
    MissingName,
    /// No output directory given to the assembler
    #[error("an output directory is required")]
    MissingOutputDirectory,
    /// Empty bundle list given to the assembler
    #[error("at least one .framework bundle is required")]
    MissingBundles,
    /// No project given to the builder
    #[error("no .xcodeproj or .xcworkspace was given")]
    ProjectNotFound,
    /// No output directory given to the builder
    #[error("no output directory was given")]
    OutputDirectoryNotFound,
    /// No intermediate build directory given to the builder
    #[error("no build directory was given")]
    BuildDirectoryNotFound,
    /// No scheme configured for any platform
    #[error("no scheme was configured for any platform")]
    NoSchemesFound,
    /// Several schemes configured but no artifact name
    #[error("an artifact name is required when more than one scheme is configured")]
    NameRequired,
}

/// A supplied bundle that cannot be processed.
#[derive(Debug, Clone, PartialEq, Eq, DeriveError)]
pub enum ValidationError {
    /// Path does not look like a bundle, or nothing usable was supplied
    #[error("invalid bundle {}: {reason}", path.display())]
    InvalidBundle {
        /// Offending path
        path: PathBuf,
        /// Why it was rejected
        reason: String,
    },
    /// The inspection tool printed no architectures
    #[error("could not read architectures of {}: {output:?}", path.display())]
    UnparsableArchitectures {
        /// Binary that was inspected
        path: PathBuf,
        /// What the tool printed
        output: String,
    },
}

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Required input absent
    Configuration,
    /// Structural check on a bundle failed
    Validation,
    /// External subprocess failed or could not start
    Tool,
    /// Copy, delete or enumerate failed
    FileSystem,
}

impl Error {
    /// Returns the kind this error belongs to.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Configuration(_) => ErrorKind::Configuration,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Tool { .. } | Error::CommandFailed { .. } => ErrorKind::Tool,
            Error::Fs { .. }
            | Error::WalkdirError(_)
            | Error::StripError(_)
            | Error::ZipError(_)
            | Error::Join(_) => ErrorKind::FileSystem,
        }
    }

    /// Captured stderr, for tool failures.
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Error::Tool { stderr, .. } => Some(stderr),
            _ => None,
        }
    }

    /// The attempted command line, for tool failures.
    pub fn command(&self) -> Option<&str> {
        match self {
            Error::Tool { command, .. } | Error::CommandFailed { command, .. } => Some(command),
            _ => None,
        }
    }
}

/// Extension trait for adding path context to I/O results.
pub trait ErrorExt<T> {
    /// Converts an I/O error into [`Error::Fs`] naming the operation and path.
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T>;
}

impl<T> ErrorExt<T> for std::result::Result<T, io::Error> {
    fn fs_context(self, context: &'static str, path: impl Into<PathBuf>) -> Result<T> {
        self.map_err(|error| Error::Fs {
            context,
            path: path.into(),
            error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        assert_eq!(
            Error::from(ConfigurationError::MissingName).kind(),
            ErrorKind::Configuration
        );
        let tool = Error::Tool {
            command: "lipo -archs X".into(),
            status: Some(1),
            stderr: "fatal".into(),
        };
        assert_eq!(tool.kind(), ErrorKind::Tool);
        assert_eq!(tool.stderr(), Some("fatal"));
        assert_eq!(tool.command(), Some("lipo -archs X"));

        let fs: Result<()> = Err(io::Error::other("boom")).fs_context("copying", "/tmp/x");
        assert_eq!(fs.unwrap_err().kind(), ErrorKind::FileSystem);
    }

    #[test]
    fn test_tool_message_contains_command_and_stderr() {
        let err = Error::Tool {
            command: "xcodebuild -create-xcframework".into(),
            status: Some(70),
            stderr: "error: no frameworks".into(),
        };
        let text = err.to_string();
        assert!(text.contains("xcodebuild -create-xcframework"));
        assert!(text.contains("error: no frameworks"));
    }
}
