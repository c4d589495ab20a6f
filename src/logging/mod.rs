//! Leveled logging and output control
//!
//! This module provides the [`Logger`] used on the request path. It supports
//! quiet and verbose modes and writes to stderr, leaving stdout free for the
//! JSON status report.

use std::time::{Duration, Instant};

/// Logger responsible for all diagnostic output
#[derive(Debug, Clone)]
pub struct Logger {
    pub verbose: bool,
    pub quiet: bool,
    pub start_time: Option<Instant>,
}

impl Logger {
    pub fn new(verbose: bool) -> Self {
        Self {
            verbose,
            quiet: false,
            start_time: Some(Instant::now()),
        }
    }

    pub fn new_quiet() -> Self {
        Self {
            verbose: false,
            quiet: true,
            start_time: Some(Instant::now()),
        }
    }

    // Structured logging levels
    pub fn debug(&self, message: &str) {
        if self.verbose && !self.quiet {
            self.emit("DEBUG", message);
        }
    }

    /// Information message
    pub fn info(&self, message: &str) {
        if !self.quiet {
            self.emit("INFO", message);
        }
    }

    /// Warning message
    pub fn warning(&self, message: &str) {
        if !self.quiet {
            self.emit("WARN", message);
        }
    }

    /// Error message, printed even in quiet mode
    pub fn error(&self, message: &str) {
        self.emit("ERROR", message);
    }

    /// Time since the logger was created
    pub fn elapsed(&self) -> Duration {
        self.start_time
            .map(|start| start.elapsed())
            .unwrap_or_default()
    }

    /// Format a byte count in human-readable units
    pub fn format_size(&self, bytes: u64) -> String {
        if bytes < 1024 {
            format!("{} B", bytes)
        } else if bytes < 1024 * 1024 {
            format!("{:.1} KB", bytes as f64 / 1024.0)
        } else if bytes < 1024 * 1024 * 1024 {
            format!("{:.1} MB", bytes as f64 / (1024.0 * 1024.0))
        } else {
            format!("{:.1} GB", bytes as f64 / (1024.0 * 1024.0 * 1024.0))
        }
    }

    fn emit(&self, level: &str, message: &str) {
        let millis = self.elapsed().as_millis();
        eprintln!("[{:>6}ms] {:<5} {}", millis, level, message);
    }
}

impl Default for Logger {
    fn default() -> Self {
        Self::new(false)
    }
}
