//! Multi-platform `.xcframework` assembly library
//!
//! This library merges per-architecture `.framework` bundles into a single
//! `.xcframework`:
//! - from bundles that already exist (thinning fat binaries with `lipo`)
//! - from an Xcode project archived once per platform SDK
//!
//! It can be used both as a CLI tool and as a library dependency.

pub mod bundler;
pub mod cli;
pub mod error;

// Re-export commonly used types
pub use bundler::{assemble_bundles, build_and_assemble};
pub use error::{BundlerError, CliError, Result};
