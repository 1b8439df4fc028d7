//! Settings for merging pre-built bundles.

use crate::bundler::error::ConfigurationError;
use std::path::{Path, PathBuf};

/// Input of [`assemble_bundles`](crate::bundler::assemble_bundles).
///
/// Constructed via [`AssembleSettingsBuilder`](super::AssembleSettingsBuilder).
/// Fields stay optional so that missing input is reported as a
/// [`ConfigurationError`] by the pipeline itself.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AssembleSettings {
    pub(super) name: Option<String>,
    pub(super) output_directory: Option<PathBuf>,
    pub(super) bundles: Vec<PathBuf>,
    pub(super) zip: bool,
}

impl AssembleSettings {
    /// Artifact name, without extension.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Directory the artifact is written into.
    pub fn output_directory(&self) -> Option<&Path> {
        self.output_directory
            .as_deref()
            .filter(|dir| !dir.as_os_str().is_empty())
    }

    /// Bundle directories to merge, in caller order.
    pub fn bundles(&self) -> &[PathBuf] {
        &self.bundles
    }

    /// Whether the artifact is also compressed into a `.zip`.
    pub fn zip(&self) -> bool {
        self.zip
    }

    /// Checks that every required input is present.
    ///
    /// Order: name, output directory, bundle list. The first absent input wins.
    pub fn validate(&self) -> Result<(&str, &Path, &[PathBuf]), ConfigurationError> {
        let name = self.name().ok_or(ConfigurationError::MissingName)?;
        let output = self
            .output_directory()
            .ok_or(ConfigurationError::MissingOutputDirectory)?;
        if self.bundles.is_empty() {
            return Err(ConfigurationError::MissingBundles);
        }
        Ok((name, output, &self.bundles))
    }
}
