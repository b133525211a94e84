//! Shell command execution with captured run statistics.
//!
//! This is a client of the reporting core, not part of it: it builds a
//! shell command line (output redirections plus an optional statistics
//! wrapper), runs it through `sh -c`, and reports its progress as
//! Action-severity messages through an optional [`Reporter`].
//!
//! # Example
//!
//! ```no_run
//! use termreport::process::{execute, ExecOptions};
//!
//! let options = ExecOptions::new("make all").with_cwd("build");
//! let exit_code = execute(&options, None)?;
//! # Ok::<(), termreport::process::ExecError>(())
//! ```

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

use crate::report::{MessageClass, Reporter};
use crate::system;
use crate::system::Timer;

use super::stats::{read_memtime_log, read_time_stats, write_report, RunStats};

/// Error running a shell command.
#[derive(Debug, Error)]
pub enum ExecError {
    /// The shell itself could not be launched.
    #[error("failed to launch `{command}`: {source}")]
    Launch {
        /// The full command line handed to the shell.
        command: String,
        /// The underlying launch failure.
        source: io::Error,
    },

    /// File I/O around the run failed (report file, working directory).
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Options for one shell command run.
///
/// # Example
///
/// ```
/// use termreport::process::ExecOptions;
///
/// let options = ExecOptions::new("cc -c main.c")
///     .with_cwd("src")
///     .with_out_file("cc.out")
///     .with_verbosity(1);
/// ```
#[derive(Debug, Clone)]
pub struct ExecOptions {
    /// The command line to run.
    pub command: String,
    /// Working directory for the run.
    pub cwd: PathBuf,
    /// Where to redirect stdout; `/dev/null` when unset.
    pub out_file: Option<PathBuf>,
    /// Where to redirect stderr; `/dev/null` when unset.
    pub err_file: Option<PathBuf>,
    /// Where the statistics wrapper writes; a temporary file when unset.
    pub stat_file: Option<PathBuf>,
    /// Statistics wrapper command; auto-detected when unset.
    pub stat_program: Option<String>,
    /// Where to write the JSON statistics report, if anywhere.
    pub report_file: Option<PathBuf>,
    /// Verbosity threshold for the progress messages.
    pub verbosity: i32,
}

impl ExecOptions {
    /// Options running `command` in the current directory.
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            cwd: PathBuf::from("."),
            out_file: None,
            err_file: None,
            stat_file: None,
            stat_program: None,
            report_file: None,
            verbosity: 0,
        }
    }

    /// Set the working directory.
    pub fn with_cwd(mut self, cwd: impl Into<PathBuf>) -> Self {
        self.cwd = cwd.into();
        self
    }

    /// Redirect stdout to a file.
    pub fn with_out_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.out_file = Some(path.into());
        self
    }

    /// Redirect stderr to a file.
    pub fn with_err_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.err_file = Some(path.into());
        self
    }

    /// Use a fixed statistics file instead of a temporary one.
    pub fn with_stat_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.stat_file = Some(path.into());
        self
    }

    /// Use an explicit statistics wrapper command.
    pub fn with_stat_program(mut self, program: impl Into<String>) -> Self {
        self.stat_program = Some(program.into());
        self
    }

    /// Write a JSON statistics report after the run.
    pub fn with_report_file(mut self, path: impl Into<PathBuf>) -> Self {
        self.report_file = Some(path.into());
        self
    }

    /// Set the verbosity threshold of the progress messages.
    pub fn with_verbosity(mut self, verbosity: i32) -> Self {
        self.verbosity = verbosity;
        self
    }
}

/// Which statistics wrapper a run uses, deciding the readback parser.
#[derive(Debug, Clone, PartialEq, Eq)]
enum StatProgram {
    /// POSIX `time -p` with `-o`; read back with the `time` parser.
    Time(String),
    /// `memtime`; read back with the memtime log parser.
    Memtime(String),
    /// Caller-specified wrapper; no readback.
    Custom(String),
}

/// Find `name` in the `PATH`.
pub fn find_in_path(name: &str) -> Option<PathBuf> {
    let path = std::env::var_os("PATH")?;
    std::env::split_paths(&path)
        .map(|dir| dir.join(name))
        .find(|candidate| candidate.is_file())
}

/// Whether the `memtime` companion utility is available.
pub fn memtime_available() -> bool {
    find_in_path("memtime").is_some()
}

/// Pick the statistics wrapper: the caller's choice verbatim, else
/// `memtime` when available, else `time -p`.
fn pick_stat_program(options: &ExecOptions) -> StatProgram {
    if let Some(program) = &options.stat_program {
        return StatProgram::Custom(program.clone());
    }
    if let Some(memtime) = find_in_path("memtime") {
        return StatProgram::Memtime(memtime.display().to_string());
    }
    if let Some(time) = find_in_path("time") {
        return StatProgram::Time(format!("{} -p", time.display()));
    }
    StatProgram::Custom("time".to_string())
}

/// Build the full shell command line: redirections, then the statistics
/// wrapper when `stat_file` is given.
pub fn build_command(options: &ExecOptions, stat_file: Option<&Path>) -> String {
    let mut command = options.command.clone();

    command.push_str(" > ");
    match &options.out_file {
        Some(path) => command.push_str(&path.display().to_string()),
        None => command.push_str("/dev/null"),
    }
    command.push_str(" 2> ");
    match &options.err_file {
        Some(path) => command.push_str(&path.display().to_string()),
        None => command.push_str("/dev/null"),
    }

    if let Some(stat_file) = stat_file {
        let program = pick_stat_program(options);
        match &program {
            StatProgram::Time(time) => {
                command = format!("{} -o {} {}", time, stat_file.display(), command);
            }
            StatProgram::Memtime(wrapper) | StatProgram::Custom(wrapper) => {
                command = format!("{wrapper} {command}");
                if options.err_file.is_none() {
                    command.push_str(&format!(" 2> {}", stat_file.display()));
                }
            }
        }
    }

    command
}

/// Run the command, reporting progress through `reporter`.
///
/// Returns the command's exit code; a command killed by a signal reports
/// `-1`.
pub fn execute(options: &ExecOptions, reporter: Option<&mut Reporter>) -> Result<i32, ExecError> {
    let (exit_code, _) = run(options, reporter, false)?;
    Ok(exit_code)
}

/// Run the command and collect [`RunStats`].
///
/// The run is wrapped with the statistics program (auto-detected unless
/// [`ExecOptions::stat_program`] is set) and the statistics file is read
/// back afterwards. `time_monraw` is always filled from this library's
/// own timer, whatever the wrapper reports.
pub fn execute_with_stats(
    options: &ExecOptions,
    reporter: Option<&mut Reporter>,
) -> Result<(i32, RunStats), ExecError> {
    let (exit_code, stats) = run(options, reporter, true)?;
    Ok((exit_code, stats.unwrap_or_default()))
}

fn run(
    options: &ExecOptions,
    mut reporter: Option<&mut Reporter>,
    want_stats: bool,
) -> Result<(i32, Option<RunStats>), ExecError> {
    let class = MessageClass::with_verbosity(options.verbosity);

    // A temporary statistics file when the caller did not pin one.
    let mut temp_stat = false;
    let stat_file = if want_stats {
        Some(match &options.stat_file {
            Some(path) => path.clone(),
            None => {
                temp_stat = true;
                std::env::temp_dir().join(format!("termreport-stat-{}", system::generate_uuid(8)))
            }
        })
    } else {
        None
    };

    let command = build_command(options, stat_file.as_deref());

    let cwd = fs::canonicalize(&options.cwd).unwrap_or_else(|_| options.cwd.clone());
    if let Some(rep) = reporter.as_deref_mut() {
        rep.action(
            format!("Entering directory: `{}'", cwd.display()),
            class,
        );
        rep.action(format!("Executing: {command}"), class);
    }

    let timer = Timer::new();
    let status = Command::new("sh")
        .arg("-c")
        .arg(&command)
        .current_dir(&cwd)
        .status()
        .map_err(|source| ExecError::Launch {
            command: command.clone(),
            source,
        })?;
    let elapsed = timer.elapsed_seconds();
    let exit_code = status.code().unwrap_or(-1);

    if let Some(rep) = reporter.as_deref_mut() {
        rep.action(format!("Process exited with result: {exit_code}"), class);
    }

    let mut stats = None;
    if want_stats {
        let mut collected = RunStats {
            time_monraw: elapsed as f32,
            ..RunStats::default()
        };
        if let Some(stat_file) = &stat_file {
            match pick_stat_program(options) {
                StatProgram::Time(_) => {
                    if let Some(parsed) = read_time_stats(stat_file) {
                        collected.time_user = parsed.time_user;
                        collected.time_system = parsed.time_system;
                        collected.time_elapsed = parsed.time_elapsed;
                        if let Some(rep) = reporter.as_deref_mut() {
                            rep.action("Read time statistics", class);
                        }
                    }
                }
                StatProgram::Memtime(_) => {
                    if let Some(parsed) = read_memtime_log(stat_file) {
                        collected.add_time_max_mem(&parsed);
                        if let Some(rep) = reporter.as_deref_mut() {
                            rep.action("Read memtime statistics", class);
                        }
                    }
                }
                StatProgram::Custom(_) => {}
            }
            if temp_stat {
                _ = fs::remove_file(stat_file);
            }
        }
        if let Some(report_file) = &options.report_file {
            write_report(report_file, &collected)?;
        }
        stats = Some(collected);
    }

    if let Some(rep) = reporter.as_deref_mut() {
        rep.action(format!("Exiting directory: `{}'", cwd.display()), class);
    }

    Ok((exit_code, stats))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn build_command_defaults_to_dev_null() {
        let options = ExecOptions::new("echo hi");
        assert_eq!(
            build_command(&options, None),
            "echo hi > /dev/null 2> /dev/null"
        );
    }

    #[test]
    fn build_command_uses_redirect_files() {
        let options = ExecOptions::new("echo hi")
            .with_out_file("out.log")
            .with_err_file("err.log");
        assert_eq!(build_command(&options, None), "echo hi > out.log 2> err.log");
    }

    #[test]
    fn build_command_wraps_custom_stat_program() {
        let options = ExecOptions::new("echo hi").with_stat_program("mystat");
        let command = build_command(&options, Some(Path::new("stats.txt")));
        assert_eq!(
            command,
            "mystat echo hi > /dev/null 2> /dev/null 2> stats.txt"
        );
    }

    #[test]
    fn custom_stat_program_respects_err_file() {
        let options = ExecOptions::new("echo hi")
            .with_stat_program("mystat")
            .with_err_file("err.log");
        let command = build_command(&options, Some(Path::new("stats.txt")));
        // The stderr slot is taken; the wrapper's output stays there.
        assert_eq!(command, "mystat echo hi > /dev/null 2> err.log");
    }

    #[test]
    fn execute_returns_exit_code() {
        let exit = execute(&ExecOptions::new("exit 3"), None).unwrap();
        assert_eq!(exit, 3);
        let exit = execute(&ExecOptions::new("true"), None).unwrap();
        assert_eq!(exit, 0);
    }

    #[test]
    fn execute_redirects_stdout() {
        let dir = tempfile::tempdir().unwrap();
        let out = dir.path().join("captured.txt");
        let options = ExecOptions::new("echo hello").with_out_file(&out);
        let exit = execute(&options, None).unwrap();
        assert_eq!(exit, 0);
        assert_eq!(fs::read_to_string(&out).unwrap(), "hello\n");
    }

    #[test]
    fn execute_runs_in_cwd() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("probe"), "x").unwrap();
        let out = dir.path().join("ls.txt");
        let options = ExecOptions::new("ls")
            .with_cwd(dir.path())
            .with_out_file(&out);
        execute(&options, None).unwrap();
        assert!(fs::read_to_string(&out).unwrap().contains("probe"));
    }

    #[test]
    fn execute_with_stats_times_the_run() {
        let dir = tempfile::tempdir().unwrap();
        // A custom wrapper keeps the test independent of what is in PATH.
        let options = ExecOptions::new("true")
            .with_stat_program("env")
            .with_stat_file(dir.path().join("stats.txt"));
        let (exit, stats) = execute_with_stats(&options, None).unwrap();
        assert_eq!(exit, 0);
        assert!(stats.time_monraw >= 0.0);
    }

    #[test]
    fn execute_with_stats_writes_report() {
        let dir = tempfile::tempdir().unwrap();
        let report = dir.path().join("report.json");
        let options = ExecOptions::new("true")
            .with_stat_program("env")
            .with_stat_file(dir.path().join("stats.txt"))
            .with_report_file(&report);
        execute_with_stats(&options, None).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&report).unwrap()).unwrap();
        assert!(parsed.is_object());
    }

    #[test]
    fn find_in_path_locates_sh() {
        assert!(find_in_path("sh").is_some());
        assert!(find_in_path("definitely-not-a-real-binary-xyz").is_none());
    }
}
