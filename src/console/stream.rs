//! The colorizing console stream.
//!
//! [`ConsoleStream`] wraps an output sink and layers three pieces of state
//! on top of it:
//!
//! - a **color stack** of [`Color`] tokens. [`set_color`](ConsoleStream::set_color)
//!   only emits; pushing and popping is the caller's responsibility when
//!   entering and leaving a colorized region. [`with_color`](ConsoleStream::with_color)
//!   wraps the push/pop pair for a closure so call sites cannot leave the
//!   stack unbalanced.
//! - a **line-start flag**. After any write ending in a newline, the next
//!   content write first emits the configured line prefix once. Every
//!   rendered line therefore begins with the prefix without call sites
//!   re-emitting it.
//! - an **ignore-colors override**. When set, or when the sink is not an
//!   interactive terminal, color tokens are suppressed entirely and the
//!   output is plain text.
//!
//! # Example
//!
//! ```
//! use termreport::console::{ColorChoice, ConsoleStream};
//!
//! let mut stream = ConsoleStream::new(std::io::sink(), ColorChoice::Never);
//! stream.set_line_prefix("| ");
//! stream.write("one\ntwo\n");
//! ```

use std::io::{self, IsTerminal, Write};

use super::color::Color;

/// Whether a stream should emit color escape sequences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorChoice {
    /// Colorize only when the sink is an interactive terminal. For sinks
    /// constructed from an arbitrary writer this resolves to `Never`; use
    /// [`ConsoleStream::stdout`] / [`ConsoleStream::stderr`] to get
    /// terminal detection.
    #[default]
    Auto,
    /// Always emit escape sequences, terminal or not.
    Always,
    /// Never emit escape sequences.
    Never,
}

/// A sink wrapper that tracks line-start state and a color stack.
pub struct ConsoleStream {
    sink: Box<dyn Write>,
    colors_supported: bool,
    ignore_colors: bool,
    at_line_start: bool,
    line_prefix: String,
    color_stack: Vec<Color>,
}

impl ConsoleStream {
    /// Wrap an arbitrary sink.
    ///
    /// With [`ColorChoice::Auto`] an arbitrary sink is treated as
    /// non-interactive and colors are suppressed.
    pub fn new(sink: impl Write + 'static, choice: ColorChoice) -> Self {
        Self::build(Box::new(sink), matches!(choice, ColorChoice::Always))
    }

    /// A stream on standard output; colorized iff stdout is a terminal.
    pub fn stdout() -> Self {
        Self::build(Box::new(io::stdout()), io::stdout().is_terminal())
    }

    /// A stream on standard error; colorized iff stderr is a terminal.
    pub fn stderr() -> Self {
        Self::build(Box::new(io::stderr()), io::stderr().is_terminal())
    }

    fn build(sink: Box<dyn Write>, colors_supported: bool) -> Self {
        Self {
            sink,
            colors_supported,
            ignore_colors: false,
            at_line_start: true,
            line_prefix: String::new(),
            // The bottom entry stands in for the terminal's ambient
            // attributes and is never popped.
            color_stack: vec![Color::RESET],
        }
    }

    /// Set the prefix auto-inserted at the start of every line.
    pub fn set_line_prefix(&mut self, prefix: impl Into<String>) {
        self.line_prefix = prefix.into();
    }

    /// The configured line prefix.
    pub fn line_prefix(&self) -> &str {
        &self.line_prefix
    }

    /// Suppress color emission without touching the stack.
    pub fn set_ignore_colors(&mut self, ignore: bool) {
        self.ignore_colors = ignore;
    }

    /// Whether color tokens currently produce escape sequences.
    pub fn colors_active(&self) -> bool {
        self.colors_supported && !self.ignore_colors
    }

    /// Whether the stream is at the start of a line.
    pub fn at_line_start(&self) -> bool {
        self.at_line_start
    }

    /// Write text, inserting the line prefix at each line start.
    ///
    /// Sink write failures are discarded.
    pub fn write(&mut self, text: &str) {
        for segment in text.split_inclusive('\n') {
            if self.at_line_start {
                if !self.line_prefix.is_empty() {
                    _ = self.sink.write_all(self.line_prefix.as_bytes());
                }
                self.at_line_start = false;
            }
            _ = self.sink.write_all(segment.as_bytes());
            if segment.ends_with('\n') {
                self.at_line_start = true;
            }
        }
    }

    /// Write text followed by a newline.
    pub fn write_line(&mut self, text: &str) {
        self.write(text);
        self.write("\n");
    }

    /// Emit the escape sequence for `color`.
    ///
    /// Does not touch the stack or the line-start state: a color change at
    /// a line start must not trigger the prefix.
    pub fn set_color(&mut self, color: Color) {
        if self.colors_active() {
            _ = color.write_sgr(&mut self.sink);
        }
    }

    /// Push a color onto the stack and emit it.
    pub fn push_color(&mut self, color: Color) {
        self.color_stack.push(color);
        self.set_color(color);
    }

    /// Pop the top color and re-emit the color underneath.
    ///
    /// The bottom (ambient) entry is never popped; popping there just
    /// re-emits it.
    pub fn pop_color(&mut self) {
        if self.color_stack.len() > 1 {
            self.color_stack.pop();
        }
        if let Some(&restored) = self.color_stack.last() {
            self.set_color(restored);
        }
    }

    /// Run `f` with `color` applied, restoring the previous color after.
    pub fn with_color(&mut self, color: Color, f: impl FnOnce(&mut Self)) {
        self.push_color(color);
        f(self);
        self.pop_color();
    }

    /// Flush the underlying sink.
    pub fn flush(&mut self) {
        _ = self.sink.flush();
    }
}

impl std::fmt::Debug for ConsoleStream {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ConsoleStream")
            .field("colors_supported", &self.colors_supported)
            .field("ignore_colors", &self.ignore_colors)
            .field("at_line_start", &self.at_line_start)
            .field("line_prefix", &self.line_prefix)
            .field("color_stack", &self.color_stack)
            .finish_non_exhaustive()
    }
}
