//! Multi-target build orchestration.
//!
//! This module provides the [`MultiTargetBuilder`] that drives one archive
//! invocation per platform SDK and merges the produced frameworks.
//!
//! # Overview
//!
//! The builder:
//! 1. Validates [`BuildSettings`](crate::bundler::BuildSettings)
//! 2. Archives each (scheme, SDK) target in platform order
//! 3. Collects the frameworks of each archive
//! 4. Groups them by product name
//! 5. Merges each group into an `.xcframework`
//!
//! # Module Organization
//!
//! - [`archive`] - `xcodebuild archive` invocation and product discovery
//! - [`grouping`] - Grouping bundles by logical name
//! - [`orchestrator`] - Main [`MultiTargetBuilder`] struct

pub mod archive;
pub mod grouping;
mod orchestrator;

pub use orchestrator::{BuildReport, MultiTargetBuilder};
