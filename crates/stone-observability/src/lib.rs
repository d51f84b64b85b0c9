//! Observability for the StoneCraft catalog platform.
//!
//! Structured logging with component context. Every log line carries the
//! component that emitted it plus typed fields, emitted to stderr as either
//! one JSON object per line or a human-readable form for development.

pub mod logging;

pub use logging::{LogBuilder, LogEntry, LogFormat, LogLevel, StructuredLogger};
