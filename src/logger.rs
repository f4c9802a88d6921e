//! Custom logging module.
//!
//! This module provides a logger implementation that captures log entries
//! into a shared buffer so the UI can display them in the log panel.

use crate::error::AppError;
use log::{Level, LevelFilter, Log, Metadata, Record};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Most recent entries kept for display.
///
pub const LOG_CAPACITY: usize = 500;

/// Shared buffer of formatted log lines, oldest first.
///
pub type LogBuffer = Arc<Mutex<VecDeque<String>>>;

pub fn new_buffer() -> LogBuffer {
    Arc::new(Mutex::new(VecDeque::with_capacity(LOG_CAPACITY)))
}

/// Format a log record into a string for display
///
pub fn format_log(record: &Record) -> String {
    let timestamp = chrono::Local::now().format("%H:%M:%S%.3f");
    let level_str = match record.level() {
        Level::Error => "ERROR",
        Level::Warn => "WARN",
        Level::Info => "INFO",
        Level::Debug => "DEBUG",
        Level::Trace => "TRACE",
    };
    format!("{} {} {}", timestamp, level_str, record.args())
}

/// Logger that captures formatted records into a `LogBuffer`.
///
pub struct CaptureLogger {
    buffer: LogBuffer,
    level: LevelFilter,
}

impl CaptureLogger {
    pub fn new(buffer: LogBuffer, level: LevelFilter) -> Self {
        CaptureLogger { buffer, level }
    }

    /// Install as the global logger.
    ///
    pub fn init(self) -> Result<(), AppError> {
        let level = self.level;
        log::set_logger(Box::leak(Box::new(self)))
            .map_err(|e| AppError::Logger(e.to_string()))?;
        log::set_max_level(level);
        Ok(())
    }

    fn push(&self, line: String) {
        // A poisoned buffer only loses log lines
        if let Ok(mut buffer) = self.buffer.lock() {
            if buffer.len() == LOG_CAPACITY {
                buffer.pop_front();
            }
            buffer.push_back(line);
        }
    }
}

impl Log for CaptureLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level
            && (metadata.target().starts_with("venue_tui") || metadata.level() <= Level::Warn)
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.push(format_log(record));
        }
    }

    fn flush(&self) {}
}
