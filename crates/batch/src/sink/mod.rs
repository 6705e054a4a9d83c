//! Output sinks for batch results.

pub mod aggregate;
pub mod tabular;

use std::io::Write;

use common::{Record, Selector};

pub use aggregate::AggregateSink;
pub use tabular::TabularSink;

use crate::{OutputFormat, Result};

/// Consumes the records of a batch and produces one serialized output.
///
/// `accept` is called once per record in input order, then `finish` once.
pub trait Sink: Send {
    /// Takes the next record of the batch.
    fn accept(&mut self, record: Record) -> Result<()>;

    /// Completes the output after the last record.
    fn finish(&mut self) -> Result<()>;
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn accept(&mut self, record: Record) -> Result<()> {
        (**self).accept(record)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// Creates the sink for `format`, writing to `writer`.
///
/// Fails before anything is written if the format cannot be produced with
/// the given selectors: CSV rows need a fixed field list.
pub fn build_sink<'a, W>(
    format: OutputFormat,
    selectors: &[Selector],
    writer: W,
) -> Result<Box<dyn Sink + 'a>>
where
    W: Write + Send + 'a,
{
    match format {
        OutputFormat::Json => Ok(Box::new(AggregateSink::new(writer))),
        OutputFormat::Csv => Ok(Box::new(TabularSink::new(writer, selectors.to_vec())?)),
    }
}
