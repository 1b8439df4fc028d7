//! Architecture discovery via `lipo -archs`.

use super::{
    bundle::{BinaryBundle, logical_name},
    error::{Result, ValidationError},
    tool::{ToolInvoker, command_line},
};
use std::path::{Path, PathBuf};

/// Reads the architecture list of existing bundles.
#[derive(Debug)]
pub struct BundleInspector<'a, T> {
    invoker: &'a T,
    inspector: PathBuf,
}

impl<'a, T: ToolInvoker> BundleInspector<'a, T> {
    /// Creates an inspector that runs `inspector` (normally `lipo`).
    pub fn new(invoker: &'a T, inspector: impl Into<PathBuf>) -> Self {
        Self {
            invoker,
            inspector: inspector.into(),
        }
    }

    /// Describes the bundle at `directory`, asking the inspection tool which
    /// architectures its binary contains.
    ///
    /// The returned bundle is never temporary.
    ///
    /// # Errors
    ///
    /// - [`Error::Tool`](super::Error::Tool) if the tool exits non-zero
    /// - [`ValidationError::UnparsableArchitectures`] if it prints nothing usable
    pub async fn inspect(&self, directory: &Path) -> Result<BinaryBundle> {
        let name = logical_name(directory)?;
        let binary = directory.join(&name);
        let args = vec!["-archs".to_string(), binary.display().to_string()];

        let output = self.invoker.run(&self.inspector, &args).await?;
        if !output.success() {
            return Err(output.into_error(command_line(&self.inspector, &args)));
        }

        let architectures = parse_architectures(&output.stdout);
        if architectures.is_empty() {
            return Err(ValidationError::UnparsableArchitectures {
                path: binary,
                output: output.stdout,
            }
            .into());
        }

        log::debug!("{} contains {}", directory.display(), architectures.join(", "));
        Ok(BinaryBundle {
            directory: directory.to_path_buf(),
            logical_name: name,
            architectures,
            temporary: false,
        })
    }
}

/// Splits the first output line into architecture tokens.
pub fn parse_architectures(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .next()
        .unwrap_or_default()
        .split_whitespace()
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_first_line_only() {
        assert_eq!(
            parse_architectures("x86_64 arm64\nwarning: something\n"),
            ["x86_64", "arm64"]
        );
        assert_eq!(parse_architectures("  arm64  "), ["arm64"]);
        assert!(parse_architectures("").is_empty());
        assert!(parse_architectures("\narm64").is_empty());
    }
}
