//! LogState - Console Log Panel with Ring Buffer

use chrono::{DateTime, Local};
use ratatui::style::Color;
use std::collections::VecDeque;

use crate::services::SimulatorEvent;
use crate::theme::colors::ConsoleColors;

/// Log level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Info,
    Warn,
    Error,
    Debug,
}

impl LogLevel {
    pub fn label(&self) -> &'static str {
        match self {
            LogLevel::Info => "INFO",
            LogLevel::Warn => "WARN",
            LogLevel::Error => "ERROR",
            LogLevel::Debug => "DEBUG",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            LogLevel::Info => ConsoleColors::success(),
            LogLevel::Warn => ConsoleColors::warning(),
            LogLevel::Error => ConsoleColors::danger(),
            LogLevel::Debug => ConsoleColors::unknown(),
        }
    }
}

/// A single log entry
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub id: u64,
    pub level: LogLevel,
    pub message: String,
    pub timestamp: DateTime<Local>,
}

/// State for log messages using a ring buffer
#[derive(Debug)]
pub struct LogState {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
    /// Ticks seen so far
    ticks: u64,
}

impl LogState {
    /// Create a new log state with the specified capacity
    pub fn new(capacity: usize) -> Self {
        Self {
            entries: VecDeque::with_capacity(capacity.min(1024)),
            capacity,
            next_id: 1,
            ticks: 0,
        }
    }

    /// Push a new log entry
    pub fn push(&mut self, level: LogLevel, message: impl Into<String>, timestamp: DateTime<Local>) {
        let entry = LogEntry {
            id: self.next_id,
            level,
            message: message.into(),
            timestamp,
        };
        self.next_id += 1;

        if self.capacity == 0 {
            return;
        }
        if self.entries.len() >= self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(entry);
    }

    /// Push a log entry with current timestamp
    pub fn push_now(&mut self, level: LogLevel, message: impl Into<String>) {
        self.push(level, message, Local::now());
    }

    /// Record a simulator event
    pub fn ingest(&mut self, event: &SimulatorEvent) {
        match event {
            SimulatorEvent::Started { period } => {
                self.push_now(LogLevel::Info, format!("Simulation started, period {:?}", period));
            }
            SimulatorEvent::Tick { tick, summary } => {
                self.ticks += 1;
                self.push_now(
                    LogLevel::Debug,
                    format!(
                        "Tick {}: {}/{} points updated (revision {})",
                        tick, summary.perturbed, summary.touched, summary.revision
                    ),
                );
            }
            SimulatorEvent::Stopped { ticks } => {
                self.push_now(LogLevel::Info, format!("Simulation stopped after {} ticks", ticks));
            }
        }
    }

    /// Get all log entries, oldest first
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    /// Most recent `n` entries, oldest first
    pub fn tail(&self, n: usize) -> Vec<&LogEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).collect()
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Get the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check if empty
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for LogState {
    fn default() -> Self {
        Self::new(crate::constants::CONSOLE_LOG_CAPACITY)
    }
}
