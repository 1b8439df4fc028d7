//! `xcodebuild -create-xcframework` invocation.

use super::{
    bundle::BinaryBundle,
    error::Result,
    tool::{ToolInvoker, command_line},
};
use std::path::{Path, PathBuf};

/// Arguments for merging `bundles` into `output`.
pub fn merge_arguments<'b>(
    bundles: impl IntoIterator<Item = &'b BinaryBundle>,
    output: &Path,
) -> Vec<String> {
    let mut args = vec!["-create-xcframework".to_string()];
    for bundle in bundles {
        args.push("-framework".to_string());
        args.push(bundle.directory.display().to_string());
    }
    args.push("-output".to_string());
    args.push(output.display().to_string());
    args
}

/// Runs the merge tool once for a set of bundles.
#[derive(Debug)]
pub struct Merger<'a, T> {
    invoker: &'a T,
    merger: PathBuf,
}

impl<'a, T: ToolInvoker> Merger<'a, T> {
    /// Creates a merger that runs `merger` (normally `xcodebuild`).
    pub fn new(invoker: &'a T, merger: impl Into<PathBuf>) -> Self {
        Self {
            invoker,
            merger: merger.into(),
        }
    }

    /// Merges `bundles` into the artifact at `output`.
    ///
    /// Only the exit status decides success; warnings on stderr are logged.
    pub async fn merge(&self, bundles: &[BinaryBundle], output: &Path) -> Result<()> {
        let args = merge_arguments(bundles, output);
        let output_log = self.invoker.run(&self.merger, &args).await?;
        if !output_log.success() {
            return Err(output_log.into_error(command_line(&self.merger, &args)));
        }
        if !output_log.stderr.trim().is_empty() {
            log::warn!("{}", output_log.stderr.trim());
        }
        log::info!("✓ Created {}", output.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_arguments() {
        let bundles = [
            BinaryBundle::from_path("/b/A_arm64.framework", vec!["arm64".into()], true).unwrap(),
            BinaryBundle::from_path("/b/B.framework", vec!["x86_64".into()], false).unwrap(),
        ];
        assert_eq!(
            merge_arguments(&bundles, Path::new("/out/A.xcframework")),
            [
                "-create-xcframework",
                "-framework",
                "/b/A_arm64.framework",
                "-framework",
                "/b/B.framework",
                "-output",
                "/out/A.xcframework"
            ]
        );
    }
}
