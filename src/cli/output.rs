//! Terminal reporting for assemble and build runs.
//!
//! Every line starts with a colored mark: `✓` for a finished artifact,
//! `⋯` for work in progress, `→` for verbose detail and `✗` for the fatal
//! error. Errors go to stderr, everything else to stdout.

use std::io::{self, Write};
use termcolor::{Buffer, BufferWriter, Color, ColorChoice, ColorSpec, WriteColor};

/// Leading mark of a reported line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
    Done,
    Working,
    Detail,
    Failed,
}

impl Mark {
    fn symbol(self) -> &'static str {
        match self {
            Mark::Done => "✓",
            Mark::Working => "⋯",
            Mark::Detail => "→",
            Mark::Failed => "✗",
        }
    }

    fn style(self) -> ColorSpec {
        let mut spec = ColorSpec::new();
        match self {
            Mark::Done => spec.set_fg(Some(Color::Green)).set_bold(true),
            Mark::Working => spec.set_fg(Some(Color::Magenta)),
            Mark::Detail => spec.set_fg(Some(Color::Blue)),
            Mark::Failed => spec.set_fg(Some(Color::Red)).set_bold(true),
        };
        spec
    }
}

fn write_marked(buffer: &mut Buffer, mark: Mark, message: &str) -> io::Result<()> {
    buffer.set_color(&mark.style())?;
    write!(buffer, "{}", mark.symbol())?;
    buffer.reset()?;
    writeln!(buffer, " {message}")
}

fn write_heading(buffer: &mut Buffer, title: &str) -> io::Result<()> {
    writeln!(buffer)?;
    buffer.set_color(ColorSpec::new().set_fg(Some(Color::Cyan)).set_bold(true))?;
    writeln!(buffer, "═══ {title} ═══")?;
    buffer.reset()
}

/// Prints run progress, honoring `--verbose` and `--quiet`.
#[derive(Debug)]
pub struct OutputManager {
    stdout: BufferWriter,
    verbose: bool,
    quiet: bool,
}

impl OutputManager {
    /// Creates a reporter; `quiet` suppresses everything but errors.
    pub fn new(verbose: bool, quiet: bool) -> Self {
        Self {
            stdout: BufferWriter::stdout(ColorChoice::Auto),
            verbose,
            quiet,
        }
    }

    /// A finished step, such as a created artifact.
    pub fn success(&self, message: &str) -> io::Result<()> {
        self.emit(!self.quiet, |buffer| write_marked(buffer, Mark::Done, message))
    }

    /// A step that is starting.
    pub fn progress(&self, message: &str) -> io::Result<()> {
        self.emit(!self.quiet, |buffer| write_marked(buffer, Mark::Working, message))
    }

    /// Detail shown only with `--verbose`.
    pub fn verbose(&self, message: &str) -> io::Result<()> {
        self.emit(self.verbose && !self.quiet, |buffer| {
            write_marked(buffer, Mark::Detail, message)
        })
    }

    /// Heading for the command being run.
    pub fn section(&self, title: &str) -> io::Result<()> {
        self.emit(!self.quiet, |buffer| write_heading(buffer, title))
    }

    /// Sub-item of the previous line.
    pub fn indent(&self, message: &str) -> io::Result<()> {
        self.emit(!self.quiet, |buffer| writeln!(buffer, "    {message}"))
    }

    /// The fatal error of the run. Always printed, on stderr.
    pub fn error(&self, message: &str) {
        let stderr = BufferWriter::stderr(ColorChoice::Auto);
        let mut buffer = stderr.buffer();
        let printed = write_marked(&mut buffer, Mark::Failed, message)
            .and_then(|()| stderr.print(&buffer));
        if printed.is_err() {
            // Last resort when stderr is unusable
            println!("✗ {message}");
        }
    }

    fn emit(
        &self,
        enabled: bool,
        render: impl FnOnce(&mut Buffer) -> io::Result<()>,
    ) -> io::Result<()> {
        if !enabled {
            return Ok(());
        }
        let mut buffer = self.stdout.buffer();
        render(&mut buffer)?;
        self.stdout.print(&buffer)
    }
}
