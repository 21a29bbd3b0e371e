//! Logging utilities with colored output and progress display.
//!
//! This module provides:
//! - `log!` macro for decorative stderr output with a colored module prefix
//! - `warn!` macro for warnings
//! - `debug!` macro for output only shown with `--debug`
//! - `ProgressLine` for a single-line progress counter
//!
//! Everything goes to stderr so stdout only ever carries the report.
//!
//! # Example
//!
//! ```ignore
//! log!("search"; "using {}", backend.name());
//! debug!("resolve"; "{} -> direct", key);
//!
//! let progress = ProgressLine::new("analyze", keys.len());
//! progress.update(1);
//! progress.finish();
//! ```

use std::{
    io::{Write, stderr},
    sync::atomic::{AtomicBool, Ordering},
};

use colored::Colorize;

/// Global quiet flag (set by --quiet / --json)
static QUIET: AtomicBool = AtomicBool::new(false);

/// Global debug flag (set by --debug)
static DEBUG: AtomicBool = AtomicBool::new(false);

pub fn set_quiet(v: bool) {
    QUIET.store(v, Ordering::SeqCst);
}

pub fn is_quiet() -> bool {
    QUIET.load(Ordering::SeqCst)
}

pub fn set_debug(v: bool) {
    DEBUG.store(v, Ordering::SeqCst);
}

pub fn is_debug() -> bool {
    DEBUG.load(Ordering::SeqCst)
}

// ============================================================================
// Log Macros
// ============================================================================

/// Log a message with a colored module prefix (suppressed in quiet mode)
///
/// # Usage
/// ```ignore
/// log!("module"; "message with {} formatting", args);
/// ```
#[macro_export]
macro_rules! log {
    ($module:expr; $($arg:tt)*) => {{
        if !$crate::logger::is_quiet() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

/// Log a warning (suppressed in quiet mode)
#[macro_export]
macro_rules! warn {
    ($($arg:tt)*) => {{
        if !$crate::logger::is_quiet() {
            $crate::logger::warn(&format!($($arg)*))
        }
    }};
}

/// Log a debug message (only shown when --debug is enabled)
///
/// Debug output is diagnostic, so it is shown even in quiet mode.
#[macro_export]
macro_rules! debug {
    ($module:expr; $($arg:tt)*) => {{
        if $crate::logger::is_debug() {
            $crate::logger::log($module, &format!($($arg)*))
        }
    }};
}

// ============================================================================
// Helper Functions
// ============================================================================

pub fn log(module: &str, message: &str) {
    let prefix = colorize_prefix(module);
    let mut stderr = stderr().lock();
    writeln!(stderr, "{prefix} {message}").ok();
}

pub fn warn(message: &str) {
    let mut stderr = stderr().lock();
    writeln!(stderr, "{} {}", "warning:".bold().yellow(), message).ok();
}

fn colorize_prefix(module: &str) -> String {
    let prefix = format!("[{module}]");
    match module {
        "search" => prefix.bright_blue().bold().to_string(),
        "analyze" => prefix.bright_green().bold().to_string(),
        "resolve" | "scan" => prefix.dimmed().to_string(),
        _ => prefix.bold().to_string(),
    }
}

// ============================================================================
// Progress Line
// ============================================================================

/// Single-line progress counter rendered on stderr.
///
/// Rendering is a no-op when disabled, so callers don't need to branch.
pub struct ProgressLine {
    module: &'static str,
    total: usize,
    enabled: bool,
}

impl ProgressLine {
    pub fn new(module: &'static str, total: usize) -> Self {
        Self {
            module,
            total,
            enabled: !is_quiet(),
        }
    }

    pub fn disabled(module: &'static str, total: usize) -> Self {
        Self {
            module,
            total,
            enabled: false,
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn update(&self, done: usize) {
        if !self.enabled {
            return;
        }
        let mut stderr = stderr().lock();
        write!(
            stderr,
            "\r{} {}/{} keys ({}%)",
            colorize_prefix(self.module),
            done,
            self.total,
            percent(done, self.total)
        )
        .ok();
        stderr.flush().ok();
    }

    pub fn finish(&self) {
        if !self.enabled {
            return;
        }
        let mut stderr = stderr().lock();
        writeln!(stderr).ok();
    }
}

fn percent(done: usize, total: usize) -> usize {
    if total == 0 {
        100
    } else {
        done * 100 / total
    }
}
