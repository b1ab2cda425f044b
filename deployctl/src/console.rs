//! Operator-facing output
//!
//! Progress and outcome lines for the person running the tool. Diagnostic
//! tracing goes to stderr separately (see [`crate::logs`]).

use std::fmt;

use chrono::{DateTime, Local};
use colored::{Color, Colorize};

/// Message level
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Info,
    Success,
    Warning,
    Error,
}

impl Level {
    fn color(&self) -> Color {
        match self {
            Level::Info => Color::Blue,
            Level::Success => Color::Green,
            Level::Warning => Color::Yellow,
            Level::Error => Color::Red,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Level::Info => "INFO",
            Level::Success => "SUCCESS",
            Level::Warning => "WARNING",
            Level::Error => "ERROR",
        };
        f.write_str(s)
    }
}

/// Format a line without color
pub fn format_line(level: Level, message: &str, at: DateTime<Local>) -> String {
    format!("[{}] {}: {}", at.format("%Y-%m-%d %H:%M:%S"), level, message)
}

/// Print a leveled line to stdout
pub fn say(level: Level, message: impl AsRef<str>) {
    let line = format_line(level, message.as_ref(), Local::now());
    println!("{}", line.color(level.color()));
}

pub fn info(message: impl AsRef<str>) {
    say(Level::Info, message)
}

pub fn success(message: impl AsRef<str>) {
    say(Level::Success, message)
}

pub fn warning(message: impl AsRef<str>) {
    say(Level::Warning, message)
}

pub fn error(message: impl AsRef<str>) {
    say(Level::Error, message)
}
