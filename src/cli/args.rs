//! Command line argument parsing and validation.
//!
//! This module provides CLI argument parsing using clap. Required inputs
//! are deliberately optional at this layer: the pipeline reports them as
//! configuration errors in a fixed order.

use clap::{Args as ClapArgs, Parser, Subcommand};
use std::path::PathBuf;

/// Assemble multi-platform .xcframework bundles
#[derive(Parser, Debug)]
#[command(
    name = "kodegen_bundler_xcframework",
    version,
    about = "Assemble multi-platform .xcframework bundles",
    long_about = "Merges per-architecture .framework bundles into a single .xcframework.

Usage:
  kodegen_bundler_xcframework assemble --name Combo --output dist build/X.framework build/Y.framework
  kodegen_bundler_xcframework build --project App.xcodeproj --ios Core --macos Core-macOS \\
      --name Core --output dist --build-dir build
  kodegen_bundler_xcframework build --config xcframework.toml --zip

Exit code 0 = every artifact exists at its output path."
)]
pub struct Args {
    /// Command to run
    #[command(subcommand)]
    pub command: Command,

    /// Show every tool invocation and its output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Only print errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to xcodebuild (default: found in PATH)
    #[arg(long, global = true, value_name = "PATH", env = "XCFRAMEWORK_XCODEBUILD")]
    pub xcodebuild: Option<PathBuf>,

    /// Path to lipo (default: found in PATH)
    #[arg(long, global = true, value_name = "PATH", env = "XCFRAMEWORK_LIPO")]
    pub lipo: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Merge existing .framework bundles
    Assemble(AssembleArgs),
    /// Archive a project per platform, then merge the frameworks
    Build(BuildArgs),
}

/// Arguments of `assemble`
#[derive(ClapArgs, Debug)]
pub struct AssembleArgs {
    /// Name of the .xcframework, without extension
    #[arg(short, long)]
    pub name: Option<String>,

    /// Directory the .xcframework is written into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Also write <name>.xcframework.zip and print its checksum
    #[arg(long)]
    pub zip: bool,

    /// .framework bundles to merge
    #[arg(value_name = "FRAMEWORK")]
    pub bundles: Vec<PathBuf>,
}

/// Arguments of `build`
#[derive(ClapArgs, Debug, Default)]
pub struct BuildArgs {
    /// TOML file with build settings; flags override its values
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// .xcodeproj or .xcworkspace to archive
    #[arg(short, long, value_name = "PATH")]
    pub project: Option<PathBuf>,

    /// Directory the .xcframework files are written into
    #[arg(short, long, value_name = "DIR")]
    pub output: Option<PathBuf>,

    /// Directory for intermediate archives
    #[arg(short, long, value_name = "DIR")]
    pub build_dir: Option<PathBuf>,

    /// iOS scheme
    #[arg(long, value_name = "SCHEME")]
    pub ios: Option<String>,

    /// watchOS scheme
    #[arg(long, value_name = "SCHEME")]
    pub watchos: Option<String>,

    /// tvOS scheme
    #[arg(long, value_name = "SCHEME")]
    pub tvos: Option<String>,

    /// macOS scheme
    #[arg(long, value_name = "SCHEME")]
    pub macos: Option<String>,

    /// Artifact name; required with more than one scheme
    #[arg(short, long)]
    pub name: Option<String>,

    /// Keep the build directory after the run
    #[arg(long)]
    pub keep_archives: bool,

    /// Extra argument passed to every archive invocation (repeatable)
    #[arg(long = "compiler-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub compiler_arguments: Vec<String>,

    /// Also write <name>.xcframework.zip and print its checksum
    #[arg(long)]
    pub zip: bool,
}

impl Args {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Validate arguments for consistency
    pub fn validate(&self) -> Result<(), String> {
        if let Command::Build(build) = &self.command {
            // These are set per target by the builder itself
            const RESERVED: [&str; 5] =
                ["-scheme", "-sdk", "-archivePath", "-project", "-workspace"];
            if let Some(arg) = build
                .compiler_arguments
                .iter()
                .find(|arg| RESERVED.contains(&arg.as_str()))
            {
                return Err(format!(
                    "--compiler-arg {arg} conflicts with the arguments set for each target"
                ));
            }
        }
        Ok(())
    }
}
