//! Aggregate JSON sink.

use std::io::Write;

use common::Record;
use serde::Serialize;

use crate::Result;
use crate::sink::Sink;

#[derive(Serialize)]
struct AggregateDocument<'a> {
    results: &'a [Record],
}

/// Buffers every record and writes a single `{"results": [...]}` document on
/// [`finish`](Sink::finish).
///
/// Nothing is written until the batch completes, so an aborted batch leaves
/// the output untouched.
pub struct AggregateSink<W: Write> {
    writer: W,
    results: Vec<Record>,
    finished: bool,
}

impl<W: Write> AggregateSink<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer,
            results: Vec::new(),
            finished: false,
        }
    }

    /// Returns the number of buffered records.
    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write + Send> Sink for AggregateSink<W> {
    fn accept(&mut self, record: Record) -> Result<()> {
        self.results.push(record);
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        if self.finished {
            return Ok(());
        }
        self.finished = true;

        let document = AggregateDocument {
            results: &self.results,
        };
        serde_json::to_writer(&mut self.writer, &document)?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
