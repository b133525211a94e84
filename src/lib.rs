//! # termreport
//!
//! A terminal diagnostic reporting library for tools that emit
//! severity-classified, location-tagged messages: compilers, build
//! drivers, test runners.
//!
//! The core is the [`Reporter`]: it collects messages that arrive out of
//! order (multiple passes, multiple error sites), assigns a total order,
//! filters by per-category enable/verbosity policy, and renders through a
//! colorizing [`ConsoleStream`] that tracks line-start state and a color
//! stack.
//!
//! ## Quick Start
//!
//! ```
//! use termreport::{Location, Reporter};
//!
//! let mut reporter = Reporter::stderr();
//!
//! reporter.notify("compiling project", ());
//! reporter.warning_at(Location::line("main.c", 3), "missing semicolon", ());
//! reporter.error_at(Location::line("main.c", 1), "undefined symbol", ());
//!
//! // Buffered messages render sorted by source position within a file:
//! // the error on line 1 prints before the warning on line 3.
//! reporter.flush();
//! reporter.report_errors();
//! ```
//!
//! ## Classification
//!
//! Every message carries a [`MessageClass`] (enabled flag plus verbosity
//! threshold) given explicitly, by registry index, or as `()` for the
//! default. Disabled or too-verbose messages drop silently; error and
//! warning *counters* still advance for every report attempt.
//!
//! ```
//! use termreport::{ColorChoice, ConsoleStream, Reporter};
//!
//! let stream = ConsoleStream::new(std::io::sink(), ColorChoice::Never);
//! let mut reporter = Reporter::new(stream);
//! reporter.registry_mut().register(1, "lint").set_enabled(false);
//! reporter.warning("unused variable", 1usize); // dropped, but counted
//! assert_eq!(reporter.warnings(), 1);
//! ```
//!
//! ## Beyond the core
//!
//! - [`process`]: run shell commands with output redirection and
//!   timing/memory statistics, reporting progress through a `Reporter`.
//! - [`settings`]: a flat string-keyed settings store.
//! - [`system`]: startup argument capture, UUIDs, monotonic timers.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod console;
mod location;
pub mod process;
mod report;
pub mod settings;
pub mod system;

// =============================================================================
// Prelude - import commonly used items with a single `use`
// =============================================================================

/// Prelude module for convenient imports.
///
/// Import everything commonly needed with:
///
/// ```
/// use termreport::prelude::*;
/// ```
pub mod prelude {
    // Reporting
    pub use crate::{
        ClassRegistry, ClassSpec, Location, MessageClass, Reporter, Severity, VERBOSITY_DEFAULT,
    };

    // Console
    pub use crate::{Color, ColorChoice, ConsoleStream};

    // Process execution
    pub use crate::process::{execute, execute_with_stats, ExecError, ExecOptions, RunStats};

    // Settings
    pub use crate::settings::{Settings, SettingsValue, Switch};
}

// =============================================================================
// Reporting core
// =============================================================================

pub use location::Location;
pub use report::{
    plain_text, render, ClassRegistry, ClassSpec, MessageClass, Record, Reporter, Severity, Token,
    VERBOSITY_DEFAULT,
};

// =============================================================================
// Console stream
// =============================================================================

pub use console::{Color, ColorChoice, ConsoleStream};
