//! Multi-platform `.xcframework` assembly.
//!
//! This module merges per-architecture `.framework` bundles into a single
//! `.xcframework`, either from bundles that already exist on disk or by
//! archiving an Xcode project once per platform SDK first.
//!
//! # Entry points
//!
//! | Function | Input | Result |
//! |----------|-------|--------|
//! | [`assemble_bundles`] | [`AssembleSettings`] | `()` |
//! | [`build_and_assemble`] | [`BuildSettings`] | archives produced |
//!
//! Both use the real toolchain. [`BundleAssembler`] and
//! [`MultiTargetBuilder`] accept any [`ToolInvoker`] and [`FileSystem`],
//! which is how the pipeline is exercised without spawning processes.
//!
//! # Example
//!
//! ```no_run
//! use kodegen_bundler_xcframework::bundler::{AssembleSettingsBuilder, Toolchain, assemble_bundles};
//!
//! # async fn example() -> kodegen_bundler_xcframework::bundler::Result<()> {
//! let settings = AssembleSettingsBuilder::new()
//!     .name("Combo")
//!     .output_directory("/out")
//!     .bundle("build/X.framework")
//!     .bundle("build/Y.framework")
//!     .build();
//!
//! assemble_bundles(&settings, Toolchain::detect(None, None)).await?;
//! # Ok(())
//! # }
//! ```
//!
//! # Failure policy
//!
//! The first failure aborts the operation and is returned. Cleanup of
//! temporary copies, stale outputs and the build directory is best-effort:
//! its failures are logged and never replace the primary error.

mod assembler;
pub mod builder;
mod bundle;
mod error;
mod inspect;
mod merge;
pub mod package;
mod settings;
mod thin;
mod tool;
mod toolchain;
pub(crate) mod utils;

pub use assembler::BundleAssembler;
pub use builder::{BuildReport, MultiTargetBuilder};
pub use bundle::{
    ARTIFACT_EXTENSION, Archive, BUNDLE_SUFFIX, BinaryBundle, artifact_path, has_bundle_suffix,
};
pub use error::{ConfigurationError, Error, ErrorExt, ErrorKind, Result, ValidationError};
pub use inspect::{BundleInspector, parse_architectures};
pub use merge::{Merger, merge_arguments};
pub use package::{PackagedArtifact, package_artifact};
pub use settings::{
    AssembleSettings, AssembleSettingsBuilder, BuildSettings, BuildSettingsBuilder, BuildTarget,
    Platform, Sdk, ValidatedBuild,
};
pub use thin::{BundleThinner, TemporaryBundles, thinned_path};
pub use tool::{ProcessInvoker, ToolInvoker, ToolOutput, command_line};
pub use toolchain::Toolchain;
pub use utils::fs::{DirEntry, FileSystem, LocalFileSystem};

/// Merges pre-built bundles into `<output>/<name>.xcframework`.
pub async fn assemble_bundles(settings: &AssembleSettings, toolchain: Toolchain) -> Result<()> {
    BundleAssembler::new(ProcessInvoker, LocalFileSystem, toolchain)
        .assemble(settings)
        .await
}

/// Archives every configured target and merges the produced frameworks.
///
/// Returns the archives in build order.
pub async fn build_and_assemble(
    settings: &BuildSettings,
    toolchain: Toolchain,
) -> Result<Vec<Archive>> {
    let report = MultiTargetBuilder::new(ProcessInvoker, LocalFileSystem, toolchain)
        .build(settings)
        .await?;
    Ok(report.archives)
}
