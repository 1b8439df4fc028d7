//! Build configuration files and conversion of arguments into settings.
//!
//! A configuration file carries the same inputs as the `build` flags:
//!
//! ```toml
//! project = "App.xcodeproj"
//! output = "dist"
//! build-dir = "build"
//! name = "Core"
//! keep-archives = false
//! compiler-arguments = ["OTHER_SWIFT_FLAGS=-Osize"]
//!
//! [schemes]
//! ios = "Core"
//! macos = "Core-macOS"
//! ```
//!
//! Relative paths in the file are resolved against the file's directory;
//! relative paths on the command line against the working directory.

use super::args::{AssembleArgs, BuildArgs};
use crate::bundler::{
    AssembleSettings, AssembleSettingsBuilder, BuildSettings, BuildSettingsBuilder, Platform,
};
use anyhow::Context;
use path_absolutize::Absolutize;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// Contents of a build configuration file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case", deny_unknown_fields)]
pub struct BuildConfigFile {
    /// `.xcodeproj` or `.xcworkspace`
    pub project: Option<PathBuf>,
    /// Output directory
    pub output: Option<PathBuf>,
    /// Intermediate build directory
    pub build_dir: Option<PathBuf>,
    /// Scheme per platform
    #[serde(default)]
    pub schemes: SchemesTable,
    /// Artifact name
    pub name: Option<String>,
    /// Keep intermediate archives
    #[serde(default)]
    pub keep_archives: bool,
    /// Extra archive arguments
    #[serde(default)]
    pub compiler_arguments: Vec<String>,
    /// Also produce `.zip` files
    #[serde(default)]
    pub zip: bool,
}

/// `[schemes]` table of a configuration file.
#[derive(Debug, Default, Deserialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct SchemesTable {
    /// iOS scheme
    pub ios: Option<String>,
    /// watchOS scheme
    pub watchos: Option<String>,
    /// tvOS scheme
    pub tvos: Option<String>,
    /// macOS scheme
    pub macos: Option<String>,
}

impl SchemesTable {
    fn into_map(self) -> BTreeMap<Platform, String> {
        [
            (Platform::Ios, self.ios),
            (Platform::WatchOs, self.watchos),
            (Platform::TvOs, self.tvos),
            (Platform::MacOs, self.macos),
        ]
        .into_iter()
        .filter_map(|(platform, scheme)| scheme.map(|s| (platform, s)))
        .collect()
    }
}

impl BuildConfigFile {
    /// Reads and parses `path`, resolving relative paths against its directory.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let mut config: Self = toml::from_str(&contents)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        let base = path.parent().unwrap_or_else(|| Path::new("."));
        for field in [&mut config.project, &mut config.output, &mut config.build_dir] {
            if let Some(value) = field.take() {
                *field = Some(absolute_from(&value, base)?);
            }
        }
        Ok(config)
    }
}

/// Settings for `assemble` from its arguments.
pub fn assemble_settings(args: &AssembleArgs) -> anyhow::Result<AssembleSettings> {
    let mut builder = AssembleSettingsBuilder::new().zip(args.zip);
    if let Some(name) = &args.name {
        builder = builder.name(name.clone());
    }
    if let Some(output) = &args.output {
        builder = builder.output_directory(absolute(output)?);
    }
    let bundles = args
        .bundles
        .iter()
        .map(|path| absolute(path))
        .collect::<anyhow::Result<Vec<_>>>()?;
    Ok(builder.bundles(bundles).build())
}

/// Settings for `build`: the configuration file (if any) overlaid with flags.
pub fn build_settings(args: &BuildArgs, verbose: bool) -> anyhow::Result<BuildSettings> {
    let file = match &args.config {
        Some(path) => BuildConfigFile::load(&absolute(path)?)?,
        None => BuildConfigFile::default(),
    };

    let mut schemes = file.schemes.into_map();
    for (platform, scheme) in [
        (Platform::Ios, &args.ios),
        (Platform::WatchOs, &args.watchos),
        (Platform::TvOs, &args.tvos),
        (Platform::MacOs, &args.macos),
    ] {
        if let Some(scheme) = scheme {
            schemes.insert(platform, scheme.clone());
        }
    }

    let mut builder = BuildSettingsBuilder::new()
        .verbose(verbose)
        .keep_archives(args.keep_archives || file.keep_archives)
        .zip(args.zip || file.zip)
        .compiler_arguments(if args.compiler_arguments.is_empty() {
            file.compiler_arguments
        } else {
            args.compiler_arguments.clone()
        });
    for (platform, scheme) in schemes {
        builder = builder.scheme(platform, scheme);
    }
    if let Some(project) = resolve(args.project.as_deref(), file.project)? {
        builder = builder.project(project);
    }
    if let Some(output) = resolve(args.output.as_deref(), file.output)? {
        builder = builder.output_directory(output);
    }
    if let Some(build_dir) = resolve(args.build_dir.as_deref(), file.build_dir)? {
        builder = builder.build_directory(build_dir);
    }
    if let Some(name) = args.name.clone().or(file.name) {
        builder = builder.name(name);
    }
    Ok(builder.build())
}

fn resolve(flag: Option<&Path>, file: Option<PathBuf>) -> anyhow::Result<Option<PathBuf>> {
    match flag {
        Some(path) => absolute(path).map(Some),
        None => Ok(file),
    }
}

fn absolute(path: &Path) -> anyhow::Result<PathBuf> {
    if path.as_os_str().is_empty() {
        return Ok(PathBuf::new());
    }
    Ok(path
        .absolutize()
        .with_context(|| format!("resolving {}", path.display()))?
        .into_owned())
}

fn absolute_from(path: &Path, base: &Path) -> anyhow::Result<PathBuf> {
    Ok(path
        .absolutize_from(base)
        .with_context(|| format!("resolving {}", path.display()))?
        .into_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_load_resolves_relative_to_file() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("xcframework.toml");
        std::fs::write(
            &path,
            r#"
project = "App.xcodeproj"
output = "dist"
build-dir = "/abs/build"
name = "Core"
compiler-arguments = ["OTHER_SWIFT_FLAGS=-Osize"]

[schemes]
ios = "Core"
macos = "Core-macOS"
"#,
        )
        .unwrap();

        let config = BuildConfigFile::load(&path).expect("config should parse");
        assert_eq!(config.project, Some(temp.path().join("App.xcodeproj")));
        assert_eq!(config.output, Some(temp.path().join("dist")));
        assert_eq!(config.build_dir, Some(PathBuf::from("/abs/build")));
        assert_eq!(config.schemes.ios.as_deref(), Some("Core"));
        assert_eq!(config.schemes.macos.as_deref(), Some("Core-macOS"));
        assert!(config.schemes.tvos.is_none());
    }

    #[test]
    fn test_unknown_keys_rejected() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("bad.toml");
        std::fs::write(&path, "projekt = \"App.xcodeproj\"\n").unwrap();
        assert!(BuildConfigFile::load(&path).is_err());
    }

    #[test]
    fn test_flags_override_file() {
        let temp = TempDir::new().expect("Failed to create temp dir");
        let path = temp.path().join("xcframework.toml");
        std::fs::write(
            &path,
            "project = \"App.xcodeproj\"\nname = \"FromFile\"\n[schemes]\nios = \"FileScheme\"\n",
        )
        .unwrap();

        let args = BuildArgs {
            config: Some(path),
            name: Some("FromFlag".into()),
            macos: Some("Mac".into()),
            output: Some(PathBuf::from("/out")),
            ..Default::default()
        };
        let settings = build_settings(&args, true).unwrap();
        assert_eq!(settings.name(), Some("FromFlag"));
        assert_eq!(settings.scheme(Platform::Ios), Some("FileScheme"));
        assert_eq!(settings.scheme(Platform::MacOs), Some("Mac"));
        assert_eq!(settings.project(), Some(temp.path().join("App.xcodeproj").as_path()));
        assert_eq!(settings.output_directory(), Some(Path::new("/out")));
        assert!(settings.build_directory().is_none());
        assert!(settings.verbose());
    }

    #[test]
    fn test_assemble_settings_keep_missing_inputs_missing() {
        let args = AssembleArgs {
            name: None,
            output: None,
            zip: false,
            bundles: vec![],
        };
        let settings = assemble_settings(&args).unwrap();
        assert!(settings.name().is_none());
        assert!(settings.output_directory().is_none());
        assert!(settings.bundles().is_empty());
    }
}
