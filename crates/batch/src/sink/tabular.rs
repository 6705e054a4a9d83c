//! Streaming CSV sink.

use std::io::Write;

use common::{Record, Selector, Value};
use projection::resolve;

use crate::sink::Sink;
use crate::{BatchError, Result};

/// Writes one CSV row per record, columns in selector order.
///
/// The output starts with a `# <selectors>` comment line naming the columns.
/// Each row is flushed as soon as it is written; there is no closing marker.
pub struct TabularSink<W: Write> {
    selectors: Vec<Selector>,
    writer: csv::Writer<W>,
}

impl<W: Write> TabularSink<W> {
    /// Creates the sink and writes the header comment.
    ///
    /// Fails with [`BatchError::Configuration`] when `selectors` is empty.
    pub fn new(mut writer: W, selectors: Vec<Selector>) -> Result<Self> {
        if selectors.is_empty() {
            return Err(BatchError::Configuration(
                "CSV output requires a list of fields to extract; use JSON output for whole records"
                    .to_string(),
            ));
        }

        writeln!(writer, "# {}", Selector::join(&selectors))?;
        writer.flush()?;

        Ok(Self {
            selectors,
            writer: csv::Writer::from_writer(writer),
        })
    }

    pub fn selectors(&self) -> &[Selector] {
        &self.selectors
    }

    /// Flushes pending output and returns the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|err| BatchError::Io(err.into_error()))
    }
}

impl<W: Write + Send> Sink for TabularSink<W> {
    fn accept(&mut self, record: Record) -> Result<()> {
        let row = self
            .selectors
            .iter()
            .map(|selector| render_cell(resolve(&record, selector)));
        self.writer.write_record(row)?;
        self.writer.flush()?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// Renders a field for a CSV cell: missing and `null` fields are empty,
/// nested values are written as compact JSON.
fn render_cell(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) => String::new(),
        Some(Value::String(s)) => s.clone(),
        Some(Value::Bool(b)) => b.to_string(),
        Some(Value::Number(n)) => n.to_string(),
        Some(nested @ (Value::Record(_) | Value::Sequence(_))) => nested.to_string(),
    }
}
