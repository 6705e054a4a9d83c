//! Batch lookup pipeline.
//!
//! This crate runs many lookups and serializes the results:
//! - [`BatchRunner`] looks up each address in input order and projects the result
//! - [`Sink`] consumes the records; [`TabularSink`] streams CSV rows,
//!   [`AggregateSink`] buffers a single JSON document
//! - [`build_sink`] picks and validates a sink for an [`OutputFormat`]

pub mod error;
pub mod format;
pub mod runner;
pub mod sink;

pub use error::{BatchError, Result};
pub use format::OutputFormat;
pub use runner::{BatchRunner, BatchSummary};
pub use sink::{AggregateSink, Sink, TabularSink, build_sink};
