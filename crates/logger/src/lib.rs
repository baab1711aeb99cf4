use std::{fmt::Display, sync::Mutex, time::Instant};

use anyhow::anyhow;

/// Sink for progress messages and recoverable errors.
///
/// Implementations are cheap to clone (usually a shared reference), so the
/// scanner can hand a copy to each phase of a run.
pub trait Logger: Clone {
    fn log(&self, message: impl Display);
    fn warn(&self, message: impl Display) {
        self.log(format!("WARN: {}", message));
    }
    fn error(&self, message: impl Display) {
        self.log(format!("ERROR: {}", message));
    }
}

#[macro_export]
macro_rules! debug_logf {
    ($logger:expr, $fmt:expr $(, $arg:expr)*) => {
        if cfg!(debug_assertions) {
            $logger.log(format!($fmt $(, $arg)*));
        }
    };
}

impl<T: Logger> Logger for &T {
    fn log(&self, message: impl Display) {
        (*self).log(message);
    }
    fn warn(&self, message: impl Display) {
        (*self).warn(message);
    }
    fn error(&self, message: impl Display) {
        (*self).error(message);
    }
}

/// Logger for command-line use.
///
/// Warnings and errors always go to stderr as bare lines. Progress messages
/// are timestamped and only written when the logger is verbose. Nothing is
/// ever written to stdout, which is reserved for the report itself.
pub struct StdioLogger {
    zero_time: Instant,
    verbose: bool,
}
impl Logger for &StdioLogger {
    fn log(&self, message: impl Display) {
        if !self.verbose {
            return;
        }
        let delta_time = Instant::now().duration_since(self.zero_time);
        eprintln!("[{:.04}] {}", delta_time.as_secs_f64(), message);
    }
    fn warn(&self, message: impl Display) {
        eprintln!("{}", message);
    }
    fn error(&self, message: impl Display) {
        eprintln!("{}", message);
    }
}
impl StdioLogger {
    pub fn new() -> Self {
        Self::with_verbosity(false)
    }

    pub fn with_verbosity(verbose: bool) -> Self {
        Self {
            zero_time: Instant::now(),
            verbose,
        }
    }
}
impl Default for StdioLogger {
    fn default() -> Self {
        Self::new()
    }
}

pub struct VecLogger {
    logs: Mutex<Vec<String>>,
}

impl Logger for &VecLogger {
    fn log(&self, message: impl Display) {
        self.logs
            .lock()
            .expect("locking the logger array should not fail!")
            .push(format!("{}", message));
    }
}
impl VecLogger {
    pub fn new() -> Self {
        Self {
            logs: Mutex::new(Vec::new()),
        }
    }

    pub fn get_logs(self) -> Result<Vec<String>, anyhow::Error> {
        self.logs
            .into_inner()
            .map_err(|err| anyhow!("error unlocking VecLogger logs:{err}"))
    }

    // messages logged at error level, with the level prefix stripped
    pub fn errors(&self) -> Vec<String> {
        self.logs
            .lock()
            .expect("locking the logger array should not fail!")
            .iter()
            .filter_map(|line| line.strip_prefix("ERROR: ").map(str::to_string))
            .collect()
    }
}
impl Default for VecLogger {
    fn default() -> Self {
        Self::new()
    }
}
