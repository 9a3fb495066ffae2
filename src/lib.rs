#![deny(missing_docs)]

//! Core library for the EduVision document intelligence pipeline.

/// Environment-driven configuration management.
pub mod config;
/// Concurrent extraction of every document under a directory.
pub mod ingest;
/// Structured logging and tracing setup.
pub mod logging;
/// Usage counters for analytics.
pub mod metrics;
/// Extraction, summarization, and question answering.
pub mod processing;
