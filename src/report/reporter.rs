//! The message aggregator.
//!
//! [`Reporter`] is the single entry point tools report through. Each
//! reported message is checked against its classification (enabled +
//! verbosity), and, if accepted, either rendered immediately (auto-flush
//! mode) or inserted into an ordered buffer that [`flush`](Reporter::flush)
//! later drains in deterministic order: messages sharing a file sort by
//! source position, everything else by emission order.
//!
//! # Example
//!
//! ```
//! use termreport::{ConsoleStream, ColorChoice, Location, Reporter};
//!
//! let stream = ConsoleStream::new(std::io::sink(), ColorChoice::Never);
//! let mut reporter = Reporter::new(stream);
//! reporter.warning_at(Location::line("main.c", 3), "missing semicolon", ());
//! reporter.error_at(Location::line("main.c", 1), "undefined symbol", ());
//! // The error renders first: line 1 sorts before line 3.
//! reporter.flush();
//! reporter.report_errors();
//! ```
//!
//! Counters and rendering are decoupled on purpose: the error/warning
//! counters reflect every report *attempt*, while rendering reflects only
//! accepted messages.

use std::cmp::Ordering;

use crate::console::{Color, ConsoleStream};
use crate::location::Location;

use super::class::{ClassRegistry, ClassSpec, MessageClass};
use super::record::Record;
use super::render::{render, Token};
use super::severity::Severity;

/// The default verbosity level: only classes at threshold 0 pass.
pub const VERBOSITY_DEFAULT: i32 = 0;

/// Collects, filters, orders, and renders diagnostic messages.
///
/// Single-threaded by contract: the reporter owns its stream and buffer
/// exclusively; callers on multiple threads must serialize externally.
#[derive(Debug)]
pub struct Reporter {
    stream: ConsoleStream,
    registry: ClassRegistry,
    buffer: Vec<Record>,
    errors: u32,
    warnings: u32,
    auto_flush: bool,
    colored: bool,
    verbosity: i32,
    indent: u32,
    next_id: u64,
    origin: u32,
}

impl Reporter {
    /// A reporter writing to the given stream.
    pub fn new(stream: ConsoleStream) -> Self {
        Self {
            stream,
            registry: ClassRegistry::new(),
            buffer: Vec::new(),
            errors: 0,
            warnings: 0,
            auto_flush: false,
            colored: true,
            verbosity: VERBOSITY_DEFAULT,
            indent: 0,
            next_id: 1,
            origin: std::process::id(),
        }
    }

    /// A reporter on standard output.
    pub fn stdout() -> Self {
        Self::new(ConsoleStream::stdout())
    }

    /// A reporter on standard error.
    pub fn stderr() -> Self {
        Self::new(ConsoleStream::stderr())
    }

    /// Direct access to the underlying stream.
    pub fn stream(&mut self) -> &mut ConsoleStream {
        &mut self.stream
    }

    /// The classification registry.
    pub fn registry(&self) -> &ClassRegistry {
        &self.registry
    }

    /// Mutable access to the classification registry.
    pub fn registry_mut(&mut self) -> &mut ClassRegistry {
        &mut self.registry
    }

    /// The class at `index`, auto-allocating (shorthand for
    /// [`ClassRegistry::get`]).
    pub fn class(&mut self, index: usize) -> &mut MessageClass {
        self.registry.get(index)
    }

    /// Enable or disable colored output on the stream.
    pub fn use_colored_messages(&mut self, colored: bool) {
        self.colored = colored;
        self.stream.set_ignore_colors(!colored);
    }

    /// Whether colored output is requested.
    pub fn using_colored_messages(&self) -> bool {
        self.colored
    }

    /// The current verbosity level.
    pub fn verbosity(&self) -> i32 {
        self.verbosity
    }

    /// Set the verbosity level. Messages whose class threshold exceeds
    /// this level are dropped.
    pub fn set_verbosity(&mut self, verbosity: i32) {
        self.verbosity = verbosity;
    }

    /// Switch auto-flush on or off.
    ///
    /// While on, accepted messages render immediately, bypassing the
    /// buffer. Switching modes never flushes retroactively: content
    /// buffered before the switch stays pending until an explicit
    /// [`flush`](Self::flush). This is a literal contract; downstream
    /// ordering depends on it.
    pub fn set_auto_flush(&mut self, auto_flush: bool) {
        self.auto_flush = auto_flush;
    }

    /// The number of errors reported so far (counting dropped ones).
    pub fn errors(&self) -> u32 {
        self.errors
    }

    /// The number of warnings reported so far (counting dropped ones).
    pub fn warnings(&self) -> u32 {
        self.warnings
    }

    /// Increase the indentation of subsequently reported messages.
    pub fn indent(&mut self) {
        self.indent += 1;
    }

    /// Decrease the indentation.
    ///
    /// # Panics
    ///
    /// Panics when the indentation is already zero; a negative depth must
    /// never reach rendering.
    pub fn outdent(&mut self) {
        assert!(self.indent > 0, "outdent() called at zero indentation");
        self.indent -= 1;
    }

    // Entry points. One no-location and one `_at` form per severity, all
    // funneling into `submit`. The error/warning forms bump their counter
    // before classification is even consulted.

    /// Report an error without a location.
    pub fn error(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.errors += 1;
        self.submit(Location::null(), text.into(), Severity::Error, class.into());
    }

    /// Report an error at a location.
    pub fn error_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.errors += 1;
        self.submit(location, text.into(), Severity::Error, class.into());
    }

    /// Report a warning without a location.
    pub fn warning(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.warnings += 1;
        self.submit(
            Location::null(),
            text.into(),
            Severity::Warning,
            class.into(),
        );
    }

    /// Report a warning at a location.
    pub fn warning_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.warnings += 1;
        self.submit(location, text.into(), Severity::Warning, class.into());
    }

    /// Report a top-level action (` > `).
    pub fn action(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(Location::null(), text.into(), Severity::Action, class.into());
    }

    /// Report a top-level action at a location.
    pub fn action_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::Action, class.into());
    }

    /// Report a nested action (`   > `).
    pub fn action2(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(
            Location::null(),
            text.into(),
            Severity::Action2,
            class.into(),
        );
    }

    /// Report a nested action at a location.
    pub fn action2_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::Action2, class.into());
    }

    /// Report a minor action in the default color (`   - `).
    pub fn action3(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(
            Location::null(),
            text.into(),
            Severity::Action3,
            class.into(),
        );
    }

    /// Report a minor action at a location.
    pub fn action3_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::Action3, class.into());
    }

    /// Report a successful outcome (` o `).
    pub fn success(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(
            Location::null(),
            text.into(),
            Severity::Success,
            class.into(),
        );
    }

    /// Report a successful outcome at a location.
    pub fn success_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::Success, class.into());
    }

    /// Report a failed outcome (` x `).
    pub fn failure(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(
            Location::null(),
            text.into(),
            Severity::Failure,
            class.into(),
        );
    }

    /// Report a failed outcome at a location.
    pub fn failure_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::Failure, class.into());
    }

    /// Report a side note (` - `).
    pub fn note(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(Location::null(), text.into(), Severity::Note, class.into());
    }

    /// Report a side note at a location.
    pub fn note_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::Note, class.into());
    }

    /// Report a notification (`:: `).
    pub fn notify(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(Location::null(), text.into(), Severity::Notify, class.into());
    }

    /// Report a notification at a location.
    pub fn notify_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::Notify, class.into());
    }

    /// Report a highlighted notification (`:: `).
    pub fn notify_highlighted(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(
            Location::null(),
            text.into(),
            Severity::NotifyH,
            class.into(),
        );
    }

    /// Report a highlighted notification at a location.
    pub fn notify_highlighted_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::NotifyH, class.into());
    }

    /// Report a plain message.
    pub fn message(&mut self, text: impl Into<String>, class: impl Into<ClassSpec>) {
        self.submit(
            Location::null(),
            text.into(),
            Severity::Message,
            class.into(),
        );
    }

    /// Report a plain message at a location.
    pub fn message_at(
        &mut self,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), Severity::Message, class.into());
    }

    /// Report with an explicit severity kind.
    ///
    /// Unlike [`error`](Self::error) and [`warning`](Self::warning), this
    /// does not touch the counters, whatever `severity` is.
    pub fn report(
        &mut self,
        severity: Severity,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(Location::null(), text.into(), severity, class.into());
    }

    /// Report with an explicit severity kind at a location.
    pub fn report_at(
        &mut self,
        severity: Severity,
        location: Location,
        text: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        self.submit(location, text.into(), severity, class.into());
    }

    /// Report a file name and its raw contents: a title record followed
    /// by an unprefixed file-contents record.
    pub fn file(
        &mut self,
        file_name: impl Into<String>,
        contents: impl Into<String>,
        class: impl Into<ClassSpec>,
    ) {
        let spec = class.into();
        self.submit(Location::null(), file_name.into(), Severity::Title, spec);
        self.submit(Location::null(), contents.into(), Severity::File, spec);
    }

    /// Render all buffered messages in sorted order and empty the buffer.
    ///
    /// Messages sharing a non-empty file name render in
    /// `(line, column, id)` order; all others in id (emission) order.
    /// Flushing an empty buffer produces no output.
    pub fn flush(&mut self) {
        let records = std::mem::take(&mut self.buffer);
        for record in &records {
            self.print(record);
        }
    }

    /// Write the summary line: error and warning totals, each count green
    /// when zero and in its severity color otherwise.
    pub fn report_errors(&mut self) {
        self.stream.set_color(Color::NOTIFY);
        self.stream.write(":: ");
        self.stream.set_color(Color::NOTIFY2);
        self.stream.write("Finished. ");
        self.stream.set_color(if self.errors == 0 {
            Color::PROPER
        } else {
            Color::ERROR
        });
        self.stream.write(&format!("{} errors", self.errors));
        self.stream.set_color(Color::NOTIFY2);
        self.stream.write(" and ");
        self.stream.set_color(if self.warnings == 0 {
            Color::PROPER
        } else {
            Color::WARNING
        });
        self.stream.write(&format!("{} warnings", self.warnings));
        self.stream.set_color(Color::NOTIFY2);
        self.stream.write(".\n");
        self.stream.set_color(Color::RESET);
    }

    /// The one primitive every entry point routes through.
    fn submit(&mut self, location: Location, text: String, severity: Severity, spec: ClassSpec) {
        let class = self.resolve(spec);
        if !class.enabled() {
            return;
        }
        if class.verbosity() > self.verbosity {
            return;
        }

        let id = self.next_id;
        self.next_id += 1;
        let record = Record {
            id,
            location,
            indent: self.indent,
            text,
            severity,
            origin: self.origin,
        };

        if self.auto_flush {
            self.print(&record);
        } else {
            let pos = self
                .buffer
                .partition_point(|buffered| buffered.buffer_cmp(&record) == Ordering::Less);
            self.buffer.insert(pos, record);
        }
    }

    fn resolve(&mut self, spec: ClassSpec) -> MessageClass {
        match spec {
            ClassSpec::Class(class) => class,
            ClassSpec::Index(index) => *self.registry.get(index),
        }
    }

    fn print(&mut self, record: &Record) {
        for token in render(record) {
            match token {
                Token::Text(text) => self.stream.write(&text),
                Token::Color(color) => self.stream.set_color(color),
            }
        }
    }
}
