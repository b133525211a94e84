//! Process-startup utilities: argument capture, UUIDs, clocks.
//!
//! Call [`init`] once at the top of `main` to capture the argument vector
//! and the startup working directory; both stay readable for the rest of
//! the process. The rest of the module is stateless: UUID generation,
//! wall-clock timestamps, a monotonic [`Timer`], and [`sleep`].

use std::path::PathBuf;
use std::sync::LazyLock;
use std::time::Instant;

use parking_lot::RwLock;
use rand::Rng;

/// What `init` captured at startup.
#[derive(Debug, Clone, Default)]
struct Startup {
    args: Vec<String>,
    dir: Option<PathBuf>,
}

/// Process-wide startup capture; written once by [`init`].
static STARTUP: LazyLock<RwLock<Startup>> = LazyLock::new(|| RwLock::new(Startup::default()));

/// Capture the process arguments and the startup working directory.
///
/// Safe to call more than once; the latest call wins.
pub fn init() {
    let startup = Startup {
        args: std::env::args().collect(),
        dir: std::env::current_dir().ok(),
    };
    *STARTUP.write() = startup;
}

/// Capture an explicit argument vector instead of [`std::env::args`].
pub fn init_with_args(args: impl IntoIterator<Item = String>) {
    let startup = Startup {
        args: args.into_iter().collect(),
        dir: std::env::current_dir().ok(),
    };
    *STARTUP.write() = startup;
}

/// The captured argument at `index`, if [`init`] ran and it exists.
pub fn argument(index: usize) -> Option<String> {
    STARTUP.read().args.get(index).cloned()
}

/// All captured arguments; empty before [`init`].
pub fn arguments() -> Vec<String> {
    STARTUP.read().args.clone()
}

/// The working directory captured at [`init`] time.
pub fn startup_dir() -> Option<PathBuf> {
    STARTUP.read().dir.clone()
}

/// A random identifier of `2 * bytes` uppercase hex characters.
pub fn generate_uuid(bytes: usize) -> String {
    const HEX: &[u8; 16] = b"0123456789ABCDEF";
    let mut rng = rand::thread_rng();
    (0..bytes * 2)
        .map(|_| HEX[rng.gen_range(0..16)] as char)
        .collect()
}

/// Milliseconds since the Unix epoch.
pub fn current_time_millis() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

/// Microseconds since the Unix epoch.
pub fn current_time_micros() -> u64 {
    chrono::Utc::now().timestamp_micros().max(0) as u64
}

/// Block the calling thread for `ms` milliseconds.
pub fn sleep(ms: u64) {
    std::thread::sleep(std::time::Duration::from_millis(ms));
}

/// A monotonic stopwatch.
///
/// # Example
///
/// ```
/// use termreport::system::Timer;
///
/// let timer = Timer::new();
/// // ... work ...
/// let seconds = timer.elapsed_seconds();
/// assert!(seconds >= 0.0);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct Timer {
    start: Instant,
}

impl Timer {
    /// A timer started now.
    pub fn new() -> Self {
        Self {
            start: Instant::now(),
        }
    }

    /// Restart the timer.
    pub fn reset(&mut self) {
        self.start = Instant::now();
    }

    /// Seconds elapsed since start (or the last reset).
    pub fn elapsed_seconds(&self) -> f64 {
        self.start.elapsed().as_secs_f64()
    }
}

impl Default for Timer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uuid_has_requested_length_and_alphabet() {
        let uuid = generate_uuid(16);
        assert_eq!(uuid.len(), 32);
        assert!(uuid.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(uuid.chars().all(|c| !c.is_ascii_lowercase()));
    }

    #[test]
    fn uuids_differ() {
        assert_ne!(generate_uuid(16), generate_uuid(16));
    }

    #[test]
    fn zero_byte_uuid_is_empty() {
        assert_eq!(generate_uuid(0), "");
    }

    #[test]
    fn timer_is_monotonic() {
        let mut timer = Timer::new();
        let first = timer.elapsed_seconds();
        let second = timer.elapsed_seconds();
        assert!(second >= first);
        timer.reset();
        assert!(timer.elapsed_seconds() >= 0.0);
    }

    #[test]
    fn wall_clock_advances() {
        let a = current_time_micros();
        sleep(2);
        let b = current_time_micros();
        assert!(b > a);
        assert!(current_time_millis() > 0);
    }

    #[test]
    fn init_with_args_captures() {
        init_with_args(["tool".to_string(), "--fast".to_string()]);
        assert_eq!(argument(0).as_deref(), Some("tool"));
        assert_eq!(argument(1).as_deref(), Some("--fast"));
        assert_eq!(argument(2), None);
        assert_eq!(arguments().len(), 2);
        assert!(startup_dir().is_some());
    }
}
