//! Subprocess boundary.
//!
//! Every interaction with the Apple toolchain (`xcodebuild`, `lipo`) goes
//! through [`ToolInvoker`]. The pipeline never parses binary formats itself;
//! it only looks at exit status, stdout and stderr.

use super::error::{Error, Result};
use std::future::Future;
use std::path::Path;

/// Captured result of one finished subprocess.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutput {
    /// Exit code, `None` if the process was killed by a signal
    pub status: Option<i32>,
    /// Standard output, lossily decoded
    pub stdout: String,
    /// Standard error, lossily decoded
    pub stderr: String,
}

impl ToolOutput {
    /// Zero exit status.
    pub fn success(&self) -> bool {
        self.status == Some(0)
    }

    /// Builds the [`Error::Tool`] describing this output.
    pub fn into_error(self, command: String) -> Error {
        Error::Tool {
            command,
            status: self.status,
            stderr: self.stderr,
        }
    }
}

/// Runs external programs.
///
/// `Err` is reserved for processes that could not be started; a process that
/// ran and failed is reported through [`ToolOutput::status`].
pub trait ToolInvoker {
    /// Runs `program` with `args` to completion and captures its output.
    fn run(&self, program: &Path, args: &[String]) -> impl Future<Output = Result<ToolOutput>> + Send;
}

/// [`ToolInvoker`] backed by real child processes.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessInvoker;

impl ToolInvoker for ProcessInvoker {
    async fn run(&self, program: &Path, args: &[String]) -> Result<ToolOutput> {
        let command = command_line(program, args);
        log::debug!("Running: {}", command);

        let output = tokio::process::Command::new(program)
            .args(args)
            .output()
            .await
            .map_err(|error| Error::CommandFailed { command, error })?;

        Ok(ToolOutput {
            status: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        })
    }
}

/// Renders a command line for logs and error messages.
///
/// Arguments containing whitespace are single-quoted so the line can be
/// pasted back into a shell.
pub fn command_line(program: &Path, args: &[String]) -> String {
    let mut line = program.display().to_string();
    for arg in args {
        line.push(' ');
        if arg.is_empty() || arg.chars().any(char::is_whitespace) {
            line.push('\'');
            line.push_str(arg);
            line.push('\'');
        } else {
            line.push_str(arg);
        }
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_command_line_quotes_spaces() {
        let line = command_line(
            Path::new("xcodebuild"),
            &["-framework".into(), "/tmp/My Lib.framework".into()],
        );
        assert_eq!(line, "xcodebuild -framework '/tmp/My Lib.framework'");
    }

    #[test]
    fn test_output_success() {
        let ok = ToolOutput {
            status: Some(0),
            ..Default::default()
        };
        assert!(ok.success());
        let killed = ToolOutput::default();
        assert!(!killed.success());
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_process_invoker_captures_streams() {
        let invoker = ProcessInvoker;
        let output = invoker
            .run(
                Path::new("sh"),
                &["-c".into(), "echo out; echo err >&2; exit 3".into()],
            )
            .await
            .expect("sh should start");
        assert_eq!(output.status, Some(3));
        assert_eq!(output.stdout.trim(), "out");
        assert_eq!(output.stderr.trim(), "err");
    }

    #[tokio::test]
    async fn test_process_invoker_missing_program() {
        let result = ProcessInvoker
            .run(Path::new("/definitely/not/a/real/tool"), &[])
            .await;
        assert!(matches!(result, Err(Error::CommandFailed { .. })));
    }
}
