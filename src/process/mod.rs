//! Shell command execution and run statistics.

mod exec;
mod stats;

pub use exec::{
    build_command, execute, execute_with_stats, find_in_path, memtime_available, ExecError,
    ExecOptions,
};
pub use stats::{
    parse_memtime_line, parse_memtime_log, parse_time_output, read_memtime_log, read_time_stats,
    write_report, RunStats,
};
