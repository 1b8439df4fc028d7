//! Main multi-target build orchestration.
//!
//! This module provides the [`MultiTargetBuilder`] that archives a project
//! once per configured SDK and merges the resulting frameworks.

use super::{
    archive::Archiver,
    grouping::{group_bundles, resolve_artifact_names},
};
use crate::bundler::{
    bundle::{Archive, artifact_path},
    error::Result,
    merge::Merger,
    settings::{BuildSettings, ValidatedBuild},
    tool::ToolInvoker,
    toolchain::Toolchain,
    utils::fs::{FileSystem, remove_best_effort},
};
use std::path::PathBuf;

/// Outcome of a successful build run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Archives in build order
    pub archives: Vec<Archive>,
    /// `.xcframework` paths, one per product group
    pub artifacts: Vec<PathBuf>,
}

/// Archives a project for every configured platform and merges the results.
///
/// # Platform Support
///
/// - **iOS, watchOS, tvOS**: device and simulator SDKs
/// - **macOS**: device SDK only
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_xcframework::bundler::{
///     BuildSettingsBuilder, LocalFileSystem, MultiTargetBuilder, Platform, ProcessInvoker,
///     Toolchain,
/// };
///
/// # async fn example() -> kodegen_bundler_xcframework::bundler::Result<()> {
/// let settings = BuildSettingsBuilder::new()
///     .project("Core.xcodeproj")
///     .output_directory("dist")
///     .build_directory("build")
///     .scheme(Platform::Ios, "Core")
///     .build();
///
/// let builder = MultiTargetBuilder::new(ProcessInvoker, LocalFileSystem, Toolchain::default());
/// let report = builder.build(&settings).await?;
/// for artifact in &report.artifacts {
///     println!("Created {}", artifact.display());
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct MultiTargetBuilder<T, F> {
    invoker: T,
    fs: F,
    toolchain: Toolchain,
}

impl<T: ToolInvoker, F: FileSystem> MultiTargetBuilder<T, F> {
    /// Creates a builder using the given tool runner, file system and tools.
    pub fn new(invoker: T, fs: F, toolchain: Toolchain) -> Self {
        Self {
            invoker,
            fs,
            toolchain,
        }
    }

    /// Runs every target, then merges each product group.
    ///
    /// The first failing target aborts the run before any merge. Unless
    /// `keep_archives` is set, the build directory is removed afterwards,
    /// whether the run succeeded or not.
    pub async fn build(&self, settings: &BuildSettings) -> Result<BuildReport> {
        let validated = settings.validate()?;

        let result = self.run(settings, validated).await;

        if settings.keep_archives() {
            log::info!("Keeping archives in {}", validated.build_directory.display());
        } else {
            remove_best_effort(&self.fs, validated.build_directory, "build directory").await;
        }
        result
    }

    async fn run(&self, settings: &BuildSettings, validated: ValidatedBuild<'_>) -> Result<BuildReport> {
        let archiver = Archiver {
            invoker: &self.invoker,
            fs: &self.fs,
            archiver: &self.toolchain.archiver,
            verbose: settings.verbose(),
        };

        let mut archives = Vec::new();
        for target in settings.targets() {
            log::info!("Archiving {} for {}", target.scheme, target.sdk);
            let archive = archiver
                .archive(
                    validated.project,
                    validated.build_directory,
                    &target,
                    settings.compiler_arguments(),
                )
                .await?;
            archives.push(archive);
        }

        let groups = resolve_artifact_names(group_bundles(&archives), validated.name);
        if groups.is_empty() {
            log::warn!("No frameworks were produced; nothing to merge");
        } else {
            self.fs.create_dir_all(validated.output_directory).await?;
        }

        let merger = Merger::new(&self.invoker, &self.toolchain.merger);
        let mut artifacts = Vec::with_capacity(groups.len());
        for (name, bundles) in groups {
            let artifact = artifact_path(validated.output_directory, &name);
            remove_best_effort(&self.fs, &artifact, "existing artifact").await;
            merger.merge(&bundles, &artifact).await?;
            artifacts.push(artifact);
        }

        Ok(BuildReport {
            archives,
            artifacts,
        })
    }
}
