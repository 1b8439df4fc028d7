//! Configuration structures for assembly and build runs.
//!
//! Both entry points take plain data: [`AssembleSettings`] for merging
//! existing bundles, [`BuildSettings`] for archiving a project per platform.
//! Builders provide a fluent way to construct them.

mod assemble;
mod build;
mod builder;
mod platform;

pub use assemble::AssembleSettings;
pub use build::{BuildSettings, ValidatedBuild};
pub use builder::{AssembleSettingsBuilder, BuildSettingsBuilder};
pub use platform::{BuildTarget, Platform, Sdk};
