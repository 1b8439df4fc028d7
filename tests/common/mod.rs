//! Shared helpers for pipeline tests: a scripted tool runner and on-disk
//! framework fixtures.

#![allow(dead_code)]

use kodegen_bundler_xcframework::bundler::{Result, ToolInvoker, ToolOutput, Toolchain};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

/// One recorded tool invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub program: PathBuf,
    pub args: Vec<String>,
}

impl Call {
    /// Whether this is an `xcodebuild -create-xcframework` call.
    pub fn is_merge(&self) -> bool {
        self.args.first().map(String::as_str) == Some("-create-xcframework")
    }

    /// Whether this is an `xcodebuild archive` call.
    pub fn is_archive(&self) -> bool {
        self.args.first().map(String::as_str) == Some("archive")
    }

    /// Whether this is a `lipo -thin` call.
    pub fn is_thin(&self) -> bool {
        self.args.iter().any(|a| a == "-thin")
    }

    /// Value following `flag`, if present.
    pub fn value_of(&self, flag: &str) -> Option<&str> {
        self.args
            .iter()
            .position(|a| a == flag)
            .and_then(|i| self.args.get(i + 1))
            .map(String::as_str)
    }

    /// Every `-framework` path of a merge call.
    pub fn frameworks(&self) -> Vec<PathBuf> {
        self.args
            .windows(2)
            .filter(|pair| pair[0] == "-framework")
            .map(|pair| PathBuf::from(&pair[1]))
            .collect()
    }
}

type Responder = Arc<dyn Fn(&Call) -> ToolOutput + Send + Sync>;

/// [`ToolInvoker`] that records calls and answers from a closure.
///
/// Clones share the call log.
#[derive(Clone)]
pub struct FakeInvoker {
    calls: Arc<Mutex<Vec<Call>>>,
    responder: Responder,
}

impl FakeInvoker {
    pub fn new(responder: impl Fn(&Call) -> ToolOutput + Send + Sync + 'static) -> Self {
        Self {
            calls: Arc::new(Mutex::new(Vec::new())),
            responder: Arc::new(responder),
        }
    }

    /// Behaves like a working toolchain.
    ///
    /// `-archs` answers from `archs` by framework directory name, merges
    /// create the output directory, archives create `frameworks` in the
    /// product directory of every archive.
    pub fn toolchain(archs: Vec<(&'static str, &'static str)>, frameworks: Vec<&'static str>) -> Self {
        Self::scripted(archs, frameworks, |_| None)
    }

    /// Like [`FakeInvoker::toolchain`], but `overrides` answers first.
    pub fn scripted(
        archs: Vec<(&'static str, &'static str)>,
        frameworks: Vec<&'static str>,
        overrides: impl Fn(&Call) -> Option<ToolOutput> + Send + Sync + 'static,
    ) -> Self {
        Self::new(move |call| {
            if let Some(output) = overrides(call) {
                return output;
            }
            if call.is_merge() {
                if let Some(output) = call.value_of("-output") {
                    std::fs::create_dir_all(output).unwrap();
                }
                return ok("");
            }
            if call.is_archive() {
                if let Some(archive) = call.value_of("-archivePath") {
                    let products = Path::new(archive).join("Products/Library/Frameworks");
                    for name in &frameworks {
                        make_framework(&products, name);
                    }
                }
                return ok("");
            }
            if let Some(binary) = call.value_of("-archs") {
                let framework = Path::new(binary)
                    .parent()
                    .and_then(Path::file_name)
                    .and_then(|n| n.to_str())
                    .unwrap_or_default();
                if let Some((_, list)) = archs.iter().find(|(name, _)| *name == framework) {
                    return ok(&format!("{list}\n"));
                }
            }
            ok("")
        })
    }

    /// Every call so far, in order.
    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl ToolInvoker for FakeInvoker {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ToolOutput> {
        let call = Call {
            program: program.to_path_buf(),
            args: args.to_vec(),
        };
        let output = (self.responder)(&call);
        self.calls.lock().unwrap().push(call);
        Ok(output)
    }
}

/// Successful output with `stdout`.
pub fn ok(stdout: &str) -> ToolOutput {
    ToolOutput {
        status: Some(0),
        stdout: stdout.to_string(),
        stderr: String::new(),
    }
}

/// Output of a process that wrote `stderr` and exited with `status`.
pub fn failed(status: i32, stderr: &str) -> ToolOutput {
    ToolOutput {
        status: Some(status),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}

/// Tool names distinguishable in recorded calls.
pub fn toolchain() -> Toolchain {
    Toolchain::with_paths(PathBuf::from("xcodebuild"), PathBuf::from("lipo"))
}

/// Creates `<dir>/<name>.framework` holding a binary and a header.
pub fn make_framework(dir: &Path, name: &str) -> PathBuf {
    let bundle = dir.join(format!("{name}.framework"));
    std::fs::create_dir_all(bundle.join("Headers")).unwrap();
    std::fs::write(bundle.join(name), b"binary").unwrap();
    std::fs::write(bundle.join("Headers").join(format!("{name}.h")), b"#pragma once").unwrap();
    bundle
}

/// Output of a process that exited zero but wrote to stderr.
pub fn warned(stderr: &str) -> ToolOutput {
    ToolOutput {
        status: Some(0),
        stdout: String::new(),
        stderr: stderr.to_string(),
    }
}
