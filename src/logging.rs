// Conditional logging macros - only active in debug builds

use env_logger::{Builder, Env, Target};
use std::fs::{self, OpenOptions};
use std::path::Path;

pub const LOG_FILE_NAME: &str = "hangman.log";

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {
        log::debug!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! debug_log {
    ($($arg:tt)*) => {{}};
}

#[cfg(debug_assertions)]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {
        log::info!($($arg)*);
    };
}

#[cfg(not(debug_assertions))]
#[macro_export]
macro_rules! info_log {
    ($($arg:tt)*) => {{}};
}

/// Installs the global logger. Level comes from `RUST_LOG`, default `warn`.
///
/// With a `log_dir` the output is appended to `hangman.log` there, which
/// keeps it off a full-screen terminal; if that file cannot be opened the
/// logger falls back to stderr.
pub fn init(log_dir: Option<&Path>) {
    let mut builder = Builder::from_env(Env::default().default_filter_or("warn"));

    if let Some(dir) = log_dir {
        let file = fs::create_dir_all(dir).and_then(|()| {
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(dir.join(LOG_FILE_NAME))
        });
        match file {
            Ok(file) => {
                builder.target(Target::Pipe(Box::new(file)));
            }
            Err(e) => eprintln!("Could not open log file in {}: {e}", dir.display()),
        }
    }

    // A logger may already be installed when running under a test harness.
    let _ = builder.try_init();
}
