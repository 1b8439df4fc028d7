//! One `xcodebuild archive` invocation per (scheme, SDK).

use crate::bundler::{
    bundle::{Archive, BinaryBundle, has_bundle_suffix},
    error::{Error, Result},
    settings::BuildTarget,
    tool::{ToolInvoker, command_line},
    utils::fs::FileSystem,
};
use std::io;
use std::path::{Path, PathBuf};

/// Extension of archives written by `xcodebuild archive`.
pub const ARCHIVE_EXTENSION: &str = "xcarchive";

/// Where frameworks land inside an archive.
pub const PRODUCTS_SUBDIRECTORY: &str = "Products/Library/Frameworks";

/// `INSTALL_PATH` every framework is archived with.
pub const INSTALL_PATH: &str = "Library/Frameworks";

/// `<build>/<scheme>-<sdk>.xcarchive`
pub fn archive_path(build_directory: &Path, target: &BuildTarget) -> PathBuf {
    build_directory.join(format!(
        "{}-{}.{ARCHIVE_EXTENSION}",
        target.scheme,
        target.sdk.name()
    ))
}

/// Arguments of the archive invocation for `target`.
///
/// Workspaces are passed with `-workspace`, everything else with `-project`.
pub fn archive_arguments(
    project: &Path,
    target: &BuildTarget,
    archive: &Path,
    extra: &[String],
) -> Vec<String> {
    let project_flag = match project.extension().and_then(|e| e.to_str()) {
        Some("xcworkspace") => "-workspace",
        _ => "-project",
    };
    let mut args = vec![
        "archive".to_string(),
        project_flag.to_string(),
        project.display().to_string(),
        "-scheme".to_string(),
        target.scheme.clone(),
        "-sdk".to_string(),
        target.sdk.name().to_string(),
        "-archivePath".to_string(),
        archive.display().to_string(),
        "SKIP_INSTALL=NO".to_string(),
        "BUILD_LIBRARY_FOR_DISTRIBUTION=YES".to_string(),
        format!("INSTALL_PATH={INSTALL_PATH}"),
    ];
    args.extend(extra.iter().cloned());
    args
}

/// Archives one target and collects the frameworks it produced.
pub struct Archiver<'a, T, F> {
    pub(super) invoker: &'a T,
    pub(super) fs: &'a F,
    pub(super) archiver: &'a Path,
    pub(super) verbose: bool,
}

impl<T: ToolInvoker, F: FileSystem> Archiver<'_, T, F> {
    /// Runs the archive step for `target`.
    ///
    /// A non-zero exit status or any output on stderr fails the target.
    pub async fn archive(
        &self,
        project: &Path,
        build_directory: &Path,
        target: &BuildTarget,
        extra: &[String],
    ) -> Result<Archive> {
        let archive_path = archive_path(build_directory, target);
        let args = archive_arguments(project, target, &archive_path, extra);
        let command = command_line(self.archiver, &args);

        if self.verbose {
            log::info!("Running: {}", command);
        }
        let output = self.invoker.run(self.archiver, &args).await?;
        if self.verbose && !output.stdout.is_empty() {
            log::info!("{}", output.stdout.trim_end());
        }
        if !output.success() || !output.stderr.is_empty() {
            return Err(output.into_error(command));
        }

        let bundles = self.discover(&archive_path, target).await?;
        log::info!(
            "✓ Archived {} for {} ({} framework(s))",
            target.scheme,
            target.sdk,
            bundles.len()
        );
        Ok(Archive {
            archive_path,
            bundles,
        })
    }

    async fn discover(&self, archive_path: &Path, target: &BuildTarget) -> Result<Vec<BinaryBundle>> {
        let products = archive_path.join(PRODUCTS_SUBDIRECTORY);
        let entries = match self.fs.list_dir(&products).await {
            Ok(entries) => entries,
            Err(Error::Fs { error, .. }) if error.kind() == io::ErrorKind::NotFound => {
                log::warn!("No products found in {}", products.display());
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let arch = target.sdk.architecture().to_string();
        entries
            .into_iter()
            .filter(|entry| has_bundle_suffix(Path::new(&entry.name)))
            .map(|entry| {
                BinaryBundle::from_path(entry.path, vec![arch.clone()], true).map_err(Error::from)
            })
            .collect()
    }
}
