//! External tool locations.
//!
//! The pipeline never relies on an implicit `PATH` lookup at call time: the
//! archiver, inspector, thinner and merge tool are resolved once into a
//! [`Toolchain`] and handed to the assembler and builder.

use std::path::{Path, PathBuf};

/// Paths of the four external tools the pipeline drives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Builds and archives a scheme (`xcodebuild archive`)
    pub archiver: PathBuf,
    /// Lists a binary's architectures (`lipo -archs`)
    pub inspector: PathBuf,
    /// Restricts a binary to one architecture (`lipo -thin`)
    pub thinner: PathBuf,
    /// Produces the multi-platform artifact (`xcodebuild -create-xcframework`)
    pub merger: PathBuf,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::with_paths(PathBuf::from("xcodebuild"), PathBuf::from("lipo"))
    }
}

impl Toolchain {
    /// Uses `xcodebuild` for archiving and merging, `lipo` for inspecting and thinning.
    pub fn with_paths(xcodebuild: PathBuf, lipo: PathBuf) -> Self {
        Self {
            archiver: xcodebuild.clone(),
            inspector: lipo.clone(),
            thinner: lipo,
            merger: xcodebuild,
        }
    }

    /// Resolves tools, preferring explicit overrides, then `PATH`.
    ///
    /// A tool that cannot be found keeps its bare name so the eventual spawn
    /// failure names it.
    pub fn detect(xcodebuild: Option<PathBuf>, lipo: Option<PathBuf>) -> Self {
        let xcodebuild = xcodebuild.unwrap_or_else(|| locate("xcodebuild"));
        let lipo = lipo.unwrap_or_else(|| locate("lipo"));
        Self::with_paths(xcodebuild, lipo)
    }
}

fn locate(program: &str) -> PathBuf {
    match which::which(program) {
        Ok(path) => {
            log::debug!("Found {} at: {}", program, path.display());
            path
        }
        Err(e) => {
            log::warn!(
                "{} not found in PATH: {}. Install the Xcode Command Line Tools or pass an explicit path.",
                program,
                e
            );
            Path::new(program).to_path_buf()
        }
    }
}
