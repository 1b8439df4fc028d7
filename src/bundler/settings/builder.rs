//! Builders for constructing settings.

use super::{AssembleSettings, BuildSettings, Platform};
use std::path::{Path, PathBuf};

/// Builder for [`AssembleSettings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_xcframework::bundler::AssembleSettingsBuilder;
///
/// let settings = AssembleSettingsBuilder::new()
///     .name("Combo")
///     .output_directory("/out")
///     .bundle("build/X.framework")
///     .bundle("build/Y.framework")
///     .build();
/// assert_eq!(settings.bundles().len(), 2);
/// ```
#[derive(Default)]
pub struct AssembleSettingsBuilder {
    settings: AssembleSettings,
}

impl AssembleSettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the artifact name (without `.xcframework`).
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.settings.name = Some(name.into());
        self
    }

    /// Sets the directory the artifact is written into.
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Appends one bundle path.
    pub fn bundle<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings.bundles.push(path.as_ref().to_path_buf());
        self
    }

    /// Replaces the bundle list.
    pub fn bundles(mut self, paths: Vec<PathBuf>) -> Self {
        self.settings.bundles = paths;
        self
    }

    /// Also compress the artifact into a `.zip`.
    ///
    /// Default: false
    pub fn zip(mut self, zip: bool) -> Self {
        self.settings.zip = zip;
        self
    }

    /// Builds the settings. Missing inputs are reported when the settings are used.
    pub fn build(self) -> AssembleSettings {
        self.settings
    }
}

/// Builder for [`BuildSettings`].
///
/// # Examples
///
/// ```no_run
/// use kodegen_bundler_xcframework::bundler::{BuildSettingsBuilder, Platform};
///
/// let settings = BuildSettingsBuilder::new()
///     .project("App.xcodeproj")
///     .output_directory("dist")
///     .build_directory("build")
///     .scheme(Platform::Ios, "Core-iOS")
///     .scheme(Platform::MacOs, "Core-macOS")
///     .name("Core")
///     .build();
/// assert_eq!(settings.targets().len(), 3);
/// ```
#[derive(Default)]
pub struct BuildSettingsBuilder {
    settings: BuildSettings,
}

impl BuildSettingsBuilder {
    /// Creates a new settings builder.
    pub fn new() -> Self {
        Default::default()
    }

    /// Sets the `.xcodeproj` or `.xcworkspace`.
    pub fn project<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings.project = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the directory artifacts are written into.
    pub fn output_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings.output_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Sets the intermediate directory for archives.
    pub fn build_directory<P: AsRef<Path>>(mut self, path: P) -> Self {
        self.settings.build_directory = Some(path.as_ref().to_path_buf());
        self
    }

    /// Configures the scheme archived for `platform`.
    pub fn scheme(mut self, platform: Platform, scheme: impl Into<String>) -> Self {
        let scheme = scheme.into();
        if scheme.is_empty() {
            self.settings.schemes.remove(&platform);
        } else {
            self.settings.schemes.insert(platform, scheme);
        }
        self
    }

    /// Sets the artifact name. Required with more than one scheme.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.settings.name = Some(name.into());
        self
    }

    /// Log every tool invocation.
    ///
    /// Default: false
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.settings.verbose = verbose;
        self
    }

    /// Keep the build directory after the run.
    ///
    /// Default: false
    pub fn keep_archives(mut self, keep: bool) -> Self {
        self.settings.keep_archives = keep;
        self
    }

    /// Extra arguments appended to every archive invocation.
    pub fn compiler_arguments(mut self, args: Vec<String>) -> Self {
        self.settings.compiler_arguments = args;
        self
    }

    /// Also compress each artifact into a `.zip`.
    ///
    /// Default: false
    pub fn zip(mut self, zip: bool) -> Self {
        self.settings.zip = zip;
        self
    }

    /// Builds the settings. Missing inputs are reported when the settings are used.
    pub fn build(self) -> BuildSettings {
        self.settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bundler::error::ConfigurationError;

    #[test]
    fn test_assemble_validation_order() {
        let empty = AssembleSettingsBuilder::new().build();
        assert_eq!(empty.validate().unwrap_err(), ConfigurationError::MissingName);

        let named = AssembleSettingsBuilder::new().name("X").build();
        assert_eq!(
            named.validate().unwrap_err(),
            ConfigurationError::MissingOutputDirectory
        );

        let no_bundles = AssembleSettingsBuilder::new()
            .name("X")
            .output_directory("/out")
            .build();
        assert_eq!(
            no_bundles.validate().unwrap_err(),
            ConfigurationError::MissingBundles
        );

        let blank_name = AssembleSettingsBuilder::new()
            .name("")
            .bundle("A.framework")
            .build();
        assert_eq!(
            blank_name.validate().unwrap_err(),
            ConfigurationError::MissingName
        );
    }

    #[test]
    fn test_build_validation_order() {
        let cases = [
            (BuildSettingsBuilder::new(), ConfigurationError::ProjectNotFound),
            (
                BuildSettingsBuilder::new().project("A.xcodeproj"),
                ConfigurationError::OutputDirectoryNotFound,
            ),
            (
                BuildSettingsBuilder::new()
                    .project("A.xcodeproj")
                    .output_directory("out"),
                ConfigurationError::BuildDirectoryNotFound,
            ),
            (
                BuildSettingsBuilder::new()
                    .project("A.xcodeproj")
                    .output_directory("out")
                    .build_directory("build"),
                ConfigurationError::NoSchemesFound,
            ),
            (
                BuildSettingsBuilder::new()
                    .project("A.xcodeproj")
                    .output_directory("out")
                    .build_directory("build")
                    .scheme(Platform::Ios, "A")
                    .scheme(Platform::TvOs, "A"),
                ConfigurationError::NameRequired,
            ),
        ];
        for (builder, expected) in cases {
            assert_eq!(builder.build().validate().unwrap_err(), expected);
        }
    }

    #[test]
    fn test_single_scheme_needs_no_name() {
        let settings = BuildSettingsBuilder::new()
            .project("A.xcodeproj")
            .output_directory("out")
            .build_directory("build")
            .scheme(Platform::MacOs, "A")
            .build();
        let validated = settings.validate().expect("single scheme is valid");
        assert!(validated.name.is_none());
    }

    #[test]
    fn test_targets_follow_platform_order() {
        let settings = BuildSettingsBuilder::new()
            .scheme(Platform::MacOs, "Mac")
            .scheme(Platform::Ios, "Phone")
            .scheme(Platform::WatchOs, "Watch")
            .build();
        let sdks: Vec<_> = settings
            .targets()
            .iter()
            .map(|t| format!("{}:{}", t.scheme, t.sdk))
            .collect();
        assert_eq!(
            sdks,
            [
                "Watch:watchos",
                "Watch:watchsimulator",
                "Phone:iphoneos",
                "Phone:iphonesimulator",
                "Mac:macosx"
            ]
        );
    }
}
