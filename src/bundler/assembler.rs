//! Merging pre-built framework bundles into one `.xcframework`.

use super::{
    bundle::{BinaryBundle, artifact_path, has_bundle_suffix},
    error::{Result, ValidationError},
    inspect::BundleInspector,
    merge::Merger,
    settings::AssembleSettings,
    thin::{BundleThinner, TemporaryBundles},
    tool::ToolInvoker,
    toolchain::Toolchain,
    utils::fs::{FileSystem, remove_best_effort},
};
use std::path::Path;

/// Combines existing `.framework` bundles without driving a build.
///
/// # Pipeline
///
/// 1. Validate settings (name, output directory, bundle list)
/// 2. Reject any path without the `.framework` suffix
/// 3. Inspect each bundle's architectures
/// 4. Remove a previous artifact at the destination
/// 5. Thin fat bundles into temporary single-architecture copies
/// 6. Merge everything with one `xcodebuild -create-xcframework`
/// 7. Delete the temporary copies, whatever the merge outcome
#[derive(Debug)]
pub struct BundleAssembler<T, F> {
    invoker: T,
    fs: F,
    toolchain: Toolchain,
}

impl<T: ToolInvoker, F: FileSystem> BundleAssembler<T, F> {
    /// Creates an assembler using the given tool runner, file system and tools.
    pub fn new(invoker: T, fs: F, toolchain: Toolchain) -> Self {
        Self {
            invoker,
            fs,
            toolchain,
        }
    }

    /// Merges the configured bundles into `<output>/<name>.xcframework`.
    ///
    /// # Errors
    ///
    /// - [`ConfigurationError`](super::ConfigurationError) before any I/O
    /// - [`ValidationError`] for a path without the bundle suffix or unreadable architectures
    /// - [`Error::Tool`](super::Error::Tool) when inspection, thinning or merging fails
    /// - [`Error::Fs`](super::Error::Fs) when a bundle cannot be copied
    pub async fn assemble(&self, settings: &AssembleSettings) -> Result<()> {
        let (name, output_directory, paths) = settings.validate()?;

        if let Some(invalid) = paths.iter().find(|path| !has_bundle_suffix(path)) {
            return Err(ValidationError::InvalidBundle {
                path: invalid.clone(),
                reason: "expected a path ending in .framework".to_string(),
            }
            .into());
        }

        let inspector = BundleInspector::new(&self.invoker, &self.toolchain.inspector);
        let mut bundles = Vec::with_capacity(paths.len());
        for path in paths {
            bundles.push(inspector.inspect(path).await?);
        }
        if bundles.is_empty() {
            return Err(ValidationError::InvalidBundle {
                path: output_directory.to_path_buf(),
                reason: "no usable bundle remained".to_string(),
            }
            .into());
        }

        let artifact = artifact_path(output_directory, name);
        remove_best_effort(&self.fs, &artifact, "existing artifact").await;
        self.fs.create_dir_all(output_directory).await?;

        let mut temporaries = TemporaryBundles::new();
        let result = self.thin_and_merge(bundles, &artifact, &mut temporaries).await;
        temporaries.cleanup(&self.fs).await;
        result
    }

    async fn thin_and_merge(
        &self,
        bundles: Vec<BinaryBundle>,
        artifact: &Path,
        temporaries: &mut TemporaryBundles,
    ) -> Result<()> {
        let thinner = BundleThinner::new(&self.invoker, &self.fs, &self.toolchain.thinner);
        let mut slices = Vec::new();
        for bundle in bundles {
            slices.extend(thinner.thin(bundle, temporaries).await?);
        }

        log::info!(
            "Merging {} bundle(s) into {}",
            slices.len(),
            artifact.display()
        );
        Merger::new(&self.invoker, &self.toolchain.merger)
            .merge(&slices, artifact)
            .await
    }
}
