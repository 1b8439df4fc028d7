//! Settings for archiving a project across platforms.

use super::{BuildTarget, Platform};
use crate::bundler::error::ConfigurationError;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Input of [`build_and_assemble`](crate::bundler::build_and_assemble).
///
/// Constructed via [`BuildSettingsBuilder`](super::BuildSettingsBuilder).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BuildSettings {
    pub(super) project: Option<PathBuf>,
    pub(super) output_directory: Option<PathBuf>,
    pub(super) build_directory: Option<PathBuf>,
    /// Ordered by [`Platform`], which is also the build order.
    pub(super) schemes: BTreeMap<Platform, String>,
    pub(super) name: Option<String>,
    pub(super) verbose: bool,
    pub(super) keep_archives: bool,
    pub(super) compiler_arguments: Vec<String>,
    pub(super) zip: bool,
}

/// Validated view of [`BuildSettings`].
#[derive(Clone, Copy, Debug)]
pub struct ValidatedBuild<'a> {
    /// `.xcodeproj` or `.xcworkspace`
    pub project: &'a Path,
    /// Where artifacts land
    pub output_directory: &'a Path,
    /// Where archives are written
    pub build_directory: &'a Path,
    /// Artifact name, if configured
    pub name: Option<&'a str>,
}

impl BuildSettings {
    /// Project descriptor.
    pub fn project(&self) -> Option<&Path> {
        non_empty(self.project.as_deref())
    }

    /// Directory the artifacts are written into.
    pub fn output_directory(&self) -> Option<&Path> {
        non_empty(self.output_directory.as_deref())
    }

    /// Intermediate directory holding the `.xcarchive`s.
    pub fn build_directory(&self) -> Option<&Path> {
        non_empty(self.build_directory.as_deref())
    }

    /// Configured scheme for `platform`.
    pub fn scheme(&self, platform: Platform) -> Option<&str> {
        self.schemes.get(&platform).map(String::as_str)
    }

    /// Artifact name override.
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref().filter(|name| !name.is_empty())
    }

    /// Verbose tool output.
    pub fn verbose(&self) -> bool {
        self.verbose
    }

    /// Keep the build directory after the run.
    pub fn keep_archives(&self) -> bool {
        self.keep_archives
    }

    /// Extra arguments appended to every archive invocation.
    pub fn compiler_arguments(&self) -> &[String] {
        &self.compiler_arguments
    }

    /// Whether artifacts are also compressed into `.zip` files.
    pub fn zip(&self) -> bool {
        self.zip
    }

    /// Every (scheme, SDK) pair, in build order.
    pub fn targets(&self) -> Vec<BuildTarget> {
        self.schemes
            .iter()
            .flat_map(|(platform, scheme)| {
                platform.sdks().iter().map(move |&sdk| BuildTarget {
                    scheme: scheme.clone(),
                    sdk,
                })
            })
            .collect()
    }

    /// Checks required inputs; the first failure in declaration order of
    /// [`ConfigurationError`] wins.
    pub fn validate(&self) -> Result<ValidatedBuild<'_>, ConfigurationError> {
        let project = self.project().ok_or(ConfigurationError::ProjectNotFound)?;
        let output_directory = self
            .output_directory()
            .ok_or(ConfigurationError::OutputDirectoryNotFound)?;
        let build_directory = self
            .build_directory()
            .ok_or(ConfigurationError::BuildDirectoryNotFound)?;
        if self.schemes.is_empty() {
            return Err(ConfigurationError::NoSchemesFound);
        }
        if self.schemes.len() > 1 && self.name().is_none() {
            return Err(ConfigurationError::NameRequired);
        }
        Ok(ValidatedBuild {
            project,
            output_directory,
            build_directory,
            name: self.name(),
        })
    }
}

fn non_empty(path: Option<&Path>) -> Option<&Path> {
    path.filter(|p| !p.as_os_str().is_empty())
}
