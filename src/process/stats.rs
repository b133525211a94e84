//! Run statistics: timing and memory figures for executed commands.
//!
//! Statistics come from companion utilities wrapped around the command,
//! `memtime` (one summary line per run) or POSIX `time -p`, and are read
//! back from the file the utility wrote. The parsers here are pure; the
//! wrapping and readback live in the execution half of this module.

use std::fs;
use std::io;
use std::path::Path;

/// Timing and memory statistics for one or more command runs.
///
/// Times are seconds, memory figures kilobytes. `time_monraw` is measured
/// by this library's own monotonic timer around the run; the rest come
/// from the companion utility.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunStats {
    /// User-mode CPU time.
    pub time_user: f32,
    /// Kernel-mode CPU time.
    pub time_system: f32,
    /// Wall-clock time as measured by the companion utility.
    pub time_elapsed: f32,
    /// Wall-clock time as measured by our own monotonic timer.
    pub time_monraw: f32,
    /// Peak virtual memory, KB.
    pub mem_virtual: f32,
    /// Peak resident memory, KB.
    pub mem_resident: f32,
}

impl RunStats {
    /// Accumulate another run: times add up, memory peaks take the max.
    pub fn add_time_max_mem(&mut self, other: &RunStats) {
        self.time_user += other.time_user;
        self.time_system += other.time_system;
        self.time_elapsed += other.time_elapsed;
        self.time_monraw += other.time_monraw;
        self.max_mem(other);
    }

    /// Take the memory peaks of `other` where they are higher.
    pub fn max_mem(&mut self, other: &RunStats) {
        self.mem_virtual = self.mem_virtual.max(other.mem_virtual);
        self.mem_resident = self.mem_resident.max(other.mem_resident);
    }

    /// Serialize to a JSON object holding only the nonzero fields.
    pub fn to_json(&self) -> serde_json::Value {
        let mut map = serde_json::Map::new();
        let mut put = |key: &str, value: f32| {
            if value > 0.0 {
                map.insert(key.to_string(), value.into());
            }
        };
        put("time_monraw", self.time_monraw);
        put("time_user", self.time_user);
        put("time_system", self.time_system);
        put("time_elapsed", self.time_elapsed);
        put("mem_virtual", self.mem_virtual);
        put("mem_resident", self.mem_resident);
        serde_json::Value::Object(map)
    }
}

/// Parse one `memtime` summary line:
///
/// ```text
/// 0.00 user, 0.00 system, 0.10 elapsed -- Max VSize = 4024KB, Max RSS = 76KB
/// ```
///
/// Returns `None` for lines in any other shape (memtime logs interleave
/// the command's own stderr with the summary).
pub fn parse_memtime_line(line: &str) -> Option<RunStats> {
    let (times, mems) = line.trim().split_once(" -- ")?;

    let mut stats = RunStats::default();
    for part in times.split(", ") {
        let (value, label) = part.trim().split_once(' ')?;
        let value: f32 = value.parse().ok()?;
        match label {
            "user" => stats.time_user = value,
            "system" => stats.time_system = value,
            "elapsed" => stats.time_elapsed = value,
            _ => return None,
        }
    }

    for part in mems.split(", ") {
        let (label, value) = part.trim().split_once(" = ")?;
        let value: f32 = value.trim().strip_suffix("KB")?.parse().ok()?;
        match label.trim() {
            "Max VSize" => stats.mem_virtual = value,
            "Max RSS" => stats.mem_resident = value,
            _ => return None,
        }
    }

    Some(stats)
}

/// Read a `memtime` log: every parseable summary line accumulates via
/// [`RunStats::add_time_max_mem`]; everything else is skipped.
///
/// Returns `None` when the file cannot be read or holds no summary line.
pub fn read_memtime_log(path: &Path) -> Option<RunStats> {
    let contents = fs::read_to_string(path).ok()?;
    parse_memtime_log(&contents)
}

/// Accumulate `memtime` summary lines out of arbitrary log text.
pub fn parse_memtime_log(contents: &str) -> Option<RunStats> {
    let mut total = RunStats::default();
    let mut seen = false;
    for line in contents.lines() {
        if let Some(stats) = parse_memtime_line(line) {
            total.add_time_max_mem(&stats);
            seen = true;
        }
    }
    seen.then_some(total)
}

/// Parse POSIX `time -p` output:
///
/// ```text
/// real 0.10
/// user 0.02
/// sys 0.01
/// ```
///
/// All three fields must be present. Memory figures are zero; `time`
/// does not report them.
pub fn parse_time_output(contents: &str) -> Option<RunStats> {
    let mut real = None;
    let mut user = None;
    let mut sys = None;
    for line in contents.lines() {
        let mut fields = line.split_whitespace();
        let (label, value) = (fields.next(), fields.next());
        let (Some(label), Some(value)) = (label, value) else {
            continue;
        };
        let parsed: Option<f32> = value.parse().ok();
        match label {
            "real" => real = parsed,
            "user" => user = parsed,
            "sys" => sys = parsed,
            _ => {}
        }
    }
    Some(RunStats {
        time_user: user?,
        time_system: sys?,
        time_elapsed: real?,
        ..RunStats::default()
    })
}

/// Read a `time -p` output file.
pub fn read_time_stats(path: &Path) -> Option<RunStats> {
    let contents = fs::read_to_string(path).ok()?;
    parse_time_output(&contents)
}

/// Write the statistics report file: a JSON object with the nonzero
/// fields of `stats`.
pub fn write_report(path: &Path, stats: &RunStats) -> io::Result<()> {
    let mut body = serde_json::to_string_pretty(&stats.to_json())
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;
    body.push('\n');
    fs::write(path, body)
}

#[cfg(test)]
mod tests {
    use super::*;

    const MEMTIME_LINE: &str =
        "0.02 user, 0.01 system, 0.10 elapsed -- Max VSize = 4024KB, Max RSS = 76KB";

    #[test]
    fn memtime_line_parses_all_fields() {
        let stats = parse_memtime_line(MEMTIME_LINE).unwrap();
        assert_eq!(stats.time_user, 0.02);
        assert_eq!(stats.time_system, 0.01);
        assert_eq!(stats.time_elapsed, 0.10);
        assert_eq!(stats.mem_virtual, 4024.0);
        assert_eq!(stats.mem_resident, 76.0);
    }

    #[test]
    fn memtime_rejects_other_lines() {
        assert_eq!(parse_memtime_line(""), None);
        assert_eq!(parse_memtime_line("warning: something happened"), None);
        assert_eq!(
            parse_memtime_line("0.02 user, 0.01 system, 0.10 elapsed"),
            None
        );
    }

    #[test]
    fn memtime_log_accumulates_runs() {
        let log = format!(
            "some stderr noise\n{MEMTIME_LINE}\nmore noise\n\
             0.03 user, 0.02 system, 0.20 elapsed -- Max VSize = 2000KB, Max RSS = 100KB\n"
        );
        let stats = parse_memtime_log(&log).unwrap();
        // Times sum; memory takes the per-field max.
        assert!((stats.time_user - 0.05).abs() < 1e-6);
        assert!((stats.time_elapsed - 0.30).abs() < 1e-6);
        assert_eq!(stats.mem_virtual, 4024.0);
        assert_eq!(stats.mem_resident, 100.0);
    }

    #[test]
    fn memtime_log_without_summary_is_none() {
        assert_eq!(parse_memtime_log("just noise\nand more\n"), None);
    }

    #[test]
    fn time_output_parses() {
        let stats = parse_time_output("real 0.10\nuser 0.02\nsys 0.01\n").unwrap();
        assert_eq!(stats.time_elapsed, 0.10);
        assert_eq!(stats.time_user, 0.02);
        assert_eq!(stats.time_system, 0.01);
        assert_eq!(stats.mem_virtual, 0.0);
    }

    #[test]
    fn time_output_requires_all_fields() {
        assert_eq!(parse_time_output("real 0.10\nuser 0.02\n"), None);
        assert_eq!(parse_time_output(""), None);
    }

    #[test]
    fn accumulate_adds_times_and_maxes_memory() {
        let mut total = RunStats {
            time_user: 1.0,
            mem_resident: 50.0,
            ..RunStats::default()
        };
        total.add_time_max_mem(&RunStats {
            time_user: 2.0,
            mem_resident: 20.0,
            mem_virtual: 300.0,
            ..RunStats::default()
        });
        assert_eq!(total.time_user, 3.0);
        assert_eq!(total.mem_resident, 50.0);
        assert_eq!(total.mem_virtual, 300.0);
    }

    #[test]
    fn json_report_skips_zero_fields() {
        let stats = RunStats {
            time_user: 0.5,
            time_elapsed: 1.5,
            ..RunStats::default()
        };
        let json = stats.to_json();
        assert_eq!(json["time_user"], 0.5);
        assert_eq!(json["time_elapsed"], 1.5);
        assert!(json.get("mem_virtual").is_none());
    }

    #[test]
    fn report_file_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.json");
        let stats = RunStats {
            time_monraw: 0.25,
            ..RunStats::default()
        };
        write_report(&path, &stats).unwrap();
        let parsed: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(parsed["time_monraw"], 0.25);
    }
}
