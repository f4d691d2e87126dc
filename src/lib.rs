#![deny(missing_docs)]

//! Core library for the newsvec ingestion pipeline.

/// Environment-driven configuration management.
pub mod config;
/// Embedding client abstraction and adapters.
pub mod embedding;
/// JSON file reading and writing for documents and records.
pub mod io;
/// Structured logging and tracing setup.
pub mod logging;
/// Ingestion metrics helpers.
pub mod metrics;
/// Document normalization pipeline.
pub mod pipeline;
