//! Command line interface for the xcframework bundler.
//!
//! This module parses arguments, turns them into pipeline settings,
//! runs the requested command and reports the outcome.

mod args;
pub mod config;
mod output;

pub use args::{Args, AssembleArgs, BuildArgs, Command};
pub use output::OutputManager;

use crate::bundler::{
    self, BundleAssembler, LocalFileSystem, MultiTargetBuilder, PackagedArtifact, ProcessInvoker,
    Toolchain,
};
use crate::error::{CliError, Result};

/// Main CLI entry point
pub async fn run() -> Result<i32> {
    let args = Args::parse_args();
    init_logging(args.verbose, args.quiet);
    let output = OutputManager::new(args.verbose, args.quiet);

    if let Err(reason) = args.validate() {
        return Err(CliError::InvalidArguments { reason }.into());
    }

    let toolchain = Toolchain::detect(args.xcodebuild.clone(), args.lipo.clone());
    output.verbose(&format!(
        "Using {} and {}",
        toolchain.merger.display(),
        toolchain.inspector.display()
    ))?;

    match &args.command {
        Command::Assemble(assemble) => run_assemble(assemble, toolchain, &output).await?,
        Command::Build(build) => run_build(build, args.verbose, toolchain, &output).await?,
    }
    Ok(0)
}

/// Sets up `env_logger`; `RUST_LOG` still takes precedence.
fn init_logging(verbose: bool, quiet: bool) {
    let default_filter = if verbose {
        "debug"
    } else if quiet {
        "error"
    } else {
        "warn"
    };
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .try_init();
}

async fn run_assemble(
    args: &AssembleArgs,
    toolchain: Toolchain,
    output: &OutputManager,
) -> Result<()> {
    let settings = config::assemble_settings(args)?;
    output.section("Assembling xcframework")?;
    output.progress(&format!("Merging {} bundle(s)", settings.bundles().len()))?;

    BundleAssembler::new(ProcessInvoker, LocalFileSystem, toolchain)
        .assemble(&settings)
        .await?;

    // Validation passed, so both are present
    let artifact = match (settings.name(), settings.output_directory()) {
        (Some(name), Some(dir)) => bundler::artifact_path(dir, name),
        _ => return Ok(()),
    };
    output.success(&format!("Created {}", artifact.display()))?;

    if settings.zip() {
        report_package(&bundler::package_artifact(&artifact).await?, output)?;
    }
    Ok(())
}

async fn run_build(
    args: &BuildArgs,
    verbose: bool,
    toolchain: Toolchain,
    output: &OutputManager,
) -> Result<()> {
    let settings = config::build_settings(args, verbose)?;
    output.section("Building xcframework")?;
    for target in settings.targets() {
        output.indent(&format!("{} ({})", target.scheme, target.sdk))?;
    }

    let report = MultiTargetBuilder::new(ProcessInvoker, LocalFileSystem, toolchain)
        .build(&settings)
        .await?;

    for archive in &report.archives {
        output.verbose(&format!(
            "{}: {} framework(s)",
            archive.archive_path.display(),
            archive.bundles.len()
        ))?;
    }
    for artifact in &report.artifacts {
        output.success(&format!("Created {}", artifact.display()))?;
    }

    if settings.zip() {
        for artifact in &report.artifacts {
            report_package(&bundler::package_artifact(artifact).await?, output)?;
        }
    }
    Ok(())
}

fn report_package(packaged: &PackagedArtifact, output: &OutputManager) -> std::io::Result<()> {
    output.success(&format!("Packaged {}", packaged.zip_path.display()))?;
    output.indent(&format!("checksum: {}", packaged.checksum))
}
