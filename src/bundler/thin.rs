//! Splitting multi-architecture bundles with `lipo -thin`.
//!
//! `xcodebuild -create-xcframework` refuses fat frameworks whose slices
//! belong to different variants, so every k-architecture bundle is turned
//! into k sibling copies, `<name>_<arch>.framework`, each rewritten to hold
//! one architecture.

use super::{
    bundle::{BUNDLE_SUFFIX, BinaryBundle},
    error::{Error, Result},
    tool::{ToolInvoker, command_line},
    utils::fs::{FileSystem, remove_best_effort},
};
use std::io;
use std::path::{Path, PathBuf};

/// Paths of temporary bundles created during a run.
///
/// A path is recorded once this run has created it, including a copy that
/// failed halfway. Paths that existed before the run are never recorded.
#[derive(Debug, Default)]
pub struct TemporaryBundles {
    paths: Vec<PathBuf>,
}

impl TemporaryBundles {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `path` for deletion.
    pub fn track(&mut self, path: PathBuf) {
        self.paths.push(path);
    }

    /// Tracked paths, in creation order.
    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    /// Deletes every tracked path. Failures are logged, never returned.
    pub async fn cleanup<F: FileSystem>(self, fs: &F) {
        for path in &self.paths {
            remove_best_effort(fs, path, "temporary bundle").await;
        }
    }
}

/// Produces single-architecture copies of fat bundles.
#[derive(Debug)]
pub struct BundleThinner<'a, T, F> {
    invoker: &'a T,
    fs: &'a F,
    thinner: PathBuf,
}

impl<'a, T: ToolInvoker, F: FileSystem> BundleThinner<'a, T, F> {
    /// Creates a thinner that runs `thinner` (normally `lipo`).
    pub fn new(invoker: &'a T, fs: &'a F, thinner: impl Into<PathBuf>) -> Self {
        Self {
            invoker,
            fs,
            thinner: thinner.into(),
        }
    }

    /// Returns the bundles to hand to the merge step for `bundle`.
    ///
    /// A single-architecture bundle is returned unchanged. Otherwise one
    /// temporary copy per architecture is created and registered in `temporaries`.
    pub async fn thin(
        &self,
        bundle: BinaryBundle,
        temporaries: &mut TemporaryBundles,
    ) -> Result<Vec<BinaryBundle>> {
        if !bundle.is_fat() {
            return Ok(vec![bundle]);
        }

        let mut thinned = Vec::with_capacity(bundle.architectures.len());
        for arch in &bundle.architectures {
            let destination = thinned_path(&bundle.directory, &bundle.logical_name, arch);
            self.claim(&bundle.directory, &destination, temporaries).await?;

            let copy = BinaryBundle {
                directory: destination,
                logical_name: bundle.logical_name.clone(),
                architectures: vec![arch.clone()],
                temporary: true,
            };
            self.thin_binary(&copy.binary_path(), arch).await?;

            log::debug!("Thinned {} to {}", bundle.directory.display(), copy.directory.display());
            thinned.push(copy);
        }
        Ok(thinned)
    }

    /// Copies `from` to `destination` and records the copy as temporary.
    ///
    /// An existing `destination` belongs to someone else: the copy is refused
    /// and the path is left alone.
    async fn claim(
        &self,
        from: &Path,
        destination: &Path,
        temporaries: &mut TemporaryBundles,
    ) -> Result<()> {
        match self.fs.copy_dir(from, destination).await {
            Err(Error::Fs { error, .. }) if error.kind() == io::ErrorKind::AlreadyExists => {
                Err(Error::Fs {
                    context: "thinned copy would overwrite",
                    path: destination.to_path_buf(),
                    error,
                })
            }
            result => {
                // A failed copy may have written part of the tree
                temporaries.track(destination.to_path_buf());
                result
            }
        }
    }

    async fn thin_binary(&self, binary: &Path, arch: &str) -> Result<()> {
        let binary = binary.display().to_string();
        let args = vec![
            binary.clone(),
            "-thin".to_string(),
            arch.to_string(),
            "-output".to_string(),
            binary,
        ];
        let output = self.invoker.run(&self.thinner, &args).await?;
        if !output.success() {
            return Err(output.into_error(command_line(&self.thinner, &args)));
        }
        Ok(())
    }
}

/// Sibling path `<parent>/<name>_<arch>.framework` for one thinned slice.
pub fn thinned_path(directory: &Path, logical_name: &str, arch: &str) -> PathBuf {
    let file_name = format!("{logical_name}_{arch}{BUNDLE_SUFFIX}");
    match directory.parent() {
        Some(parent) => parent.join(file_name),
        None => PathBuf::from(file_name),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_thinned_path_is_sibling() {
        assert_eq!(
            thinned_path(Path::new("/in/X.framework"), "X", "arm64"),
            PathBuf::from("/in/X_arm64.framework")
        );
    }
}
