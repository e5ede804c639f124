//! FILENAME: core/importer/src/report.rs
//! PURPOSE: Structured import log.
//! CONTEXT: Every processed file produces a tagged entry instead of a raw
//! printed line, so tests and frontends can assert on outcomes rather than
//! scrape text. Rendering matches the log format users already know.

use std::fmt;

/// Outcome class of one log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogKind {
    Ok,
    Warn,
    Skip,
    Fatal,
}

impl LogKind {
    fn tag(self) -> &'static str {
        match self {
            LogKind::Ok => "OK",
            LogKind::Warn => "WARN",
            LogKind::Skip => "SKIP",
            LogKind::Fatal => "FATAL",
        }
    }
}

/// One line of the import log.
#[derive(Debug, Clone)]
pub struct LogEntry {
    pub kind: LogKind,
    /// File the entry refers to; batch-level lines carry no file.
    pub file: Option<String>,
    pub message: String,
}

impl LogEntry {
    pub fn ok(file: impl Into<String>, message: impl Into<String>) -> Self {
        LogEntry {
            kind: LogKind::Ok,
            file: Some(file.into()),
            message: message.into(),
        }
    }

    pub fn warn(file: impl Into<String>, message: impl Into<String>) -> Self {
        LogEntry {
            kind: LogKind::Warn,
            file: Some(file.into()),
            message: message.into(),
        }
    }

    pub fn skip(file: impl Into<String>, message: impl Into<String>) -> Self {
        LogEntry {
            kind: LogKind::Skip,
            file: Some(file.into()),
            message: message.into(),
        }
    }

    /// Batch-level line without a file, rendered untagged.
    pub fn note(message: impl Into<String>) -> Self {
        LogEntry {
            kind: LogKind::Ok,
            file: None,
            message: message.into(),
        }
    }

    pub fn fatal(message: impl Into<String>) -> Self {
        LogEntry {
            kind: LogKind::Fatal,
            file: None,
            message: message.into(),
        }
    }
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.file, self.kind) {
            (Some(file), kind) => write!(f, "[{}] {}: {}", kind.tag(), file, self.message),
            (None, LogKind::Fatal) => write!(f, "[FATAL] {}", self.message),
            (None, _) => write!(f, "{}", self.message),
        }
    }
}
