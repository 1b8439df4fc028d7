//! Framework bundles and the archives that produce them.

use crate::bundler::error::ValidationError;
use std::path::{Path, PathBuf};

/// Suffix every input bundle must carry.
pub const BUNDLE_SUFFIX: &str = ".framework";

/// Extension of the merged multi-platform artifact.
pub const ARTIFACT_EXTENSION: &str = "xcframework";

/// One platform/architecture-specific `.framework` bundle on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BinaryBundle {
    /// Location of the bundle directory
    pub directory: PathBuf,
    /// Product name; the binary inside the bundle carries this name
    pub logical_name: String,
    /// Architectures the binary contains, in tool order
    pub architectures: Vec<String>,
    /// Whether this copy is deleted once the merge has read it
    pub temporary: bool,
}

impl BinaryBundle {
    /// Describes the bundle at `directory`, deriving its logical name from
    /// the file name without the `.framework` suffix.
    pub fn from_path(
        directory: impl Into<PathBuf>,
        architectures: Vec<String>,
        temporary: bool,
    ) -> Result<Self, ValidationError> {
        let directory = directory.into();
        let logical_name = logical_name(&directory)?;
        Ok(Self {
            directory,
            logical_name,
            architectures,
            temporary,
        })
    }

    /// Path of the executable inside the bundle.
    pub fn binary_path(&self) -> PathBuf {
        self.directory.join(&self.logical_name)
    }

    /// Whether the binary carries more than one architecture.
    pub fn is_fat(&self) -> bool {
        self.architectures.len() > 1
    }
}

/// Output of one archive invocation for one SDK.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Archive {
    /// Location of the `.xcarchive`
    pub archive_path: PathBuf,
    /// Bundles found in the archive's product directory
    pub bundles: Vec<BinaryBundle>,
}

/// Whether `path` names a `.framework` bundle.
pub fn has_bundle_suffix(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name.len() > BUNDLE_SUFFIX.len() && name.ends_with(BUNDLE_SUFFIX))
}

/// File name of `path` without the `.framework` suffix.
pub fn logical_name(path: &Path) -> Result<String, ValidationError> {
    path.file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix(BUNDLE_SUFFIX))
        .filter(|stem| !stem.is_empty())
        .map(str::to_string)
        .ok_or_else(|| ValidationError::InvalidBundle {
            path: path.to_path_buf(),
            reason: format!("expected a path ending in {BUNDLE_SUFFIX}"),
        })
}

/// Destination of the merged artifact named `name` inside `output_directory`.
pub fn artifact_path(output_directory: &Path, name: &str) -> PathBuf {
    output_directory.join(format!("{name}.{ARTIFACT_EXTENSION}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_path_derives_name_and_binary() {
        let bundle =
            BinaryBundle::from_path("/build/Core.framework", vec!["arm64".into()], false).unwrap();
        assert_eq!(bundle.logical_name, "Core");
        assert_eq!(bundle.binary_path(), PathBuf::from("/build/Core.framework/Core"));
        assert!(!bundle.is_fat());
    }

    #[test]
    fn test_suffix_checks() {
        assert!(has_bundle_suffix(Path::new("/a/X.framework")));
        assert!(has_bundle_suffix(Path::new("X.framework/")));
        assert!(!has_bundle_suffix(Path::new("/a/X.frameworks")));
        assert!(!has_bundle_suffix(Path::new("/a/.framework")));
        assert!(!has_bundle_suffix(Path::new("/a/X.xcframework")));
        assert!(logical_name(Path::new("/a/libX.a")).is_err());
    }

    #[test]
    fn test_artifact_path() {
        assert_eq!(
            artifact_path(Path::new("/out"), "Combo"),
            PathBuf::from("/out/Combo.xcframework")
        );
    }
}
