//! Batch runner feeding lookup results to a sink.

use common::Selector;
use futures_util::StreamExt;
use futures_util::stream;
use lookup::Lookup;
use projection::Projector;

use crate::sink::Sink;
use crate::{BatchError, Result};

/// Outcome of a completed batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BatchSummary {
    /// Number of records delivered to the sink.
    pub delivered: usize,
}

impl std::fmt::Display for BatchSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} records", self.delivered)
    }
}

/// Looks up a sequence of addresses and delivers the records to a [`Sink`].
///
/// The runner guarantees:
/// - Records reach the sink in input order, whatever the concurrency
/// - Blank input lines are skipped and do not count as items
/// - The first failed lookup aborts the batch; the sink is never finished
pub struct BatchRunner<L: Lookup> {
    lookup: L,
    projector: Projector,
    concurrency: usize,
}

impl<L: Lookup> BatchRunner<L> {
    /// Creates a runner that performs one lookup at a time and keeps whole records.
    pub fn new(lookup: L) -> Self {
        Self {
            lookup,
            projector: Projector::default(),
            concurrency: 1,
        }
    }

    /// Projects every record down to `selectors`. An empty list keeps whole records.
    pub fn with_selectors(mut self, selectors: Vec<Selector>) -> Self {
        self.projector = Projector::new(selectors);
        self
    }

    /// Allows up to `concurrency` lookups in flight. Zero is treated as one.
    pub fn with_concurrency(mut self, concurrency: usize) -> Self {
        self.concurrency = concurrency.max(1);
        self
    }

    pub fn selectors(&self) -> &[Selector] {
        self.projector.selectors()
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Runs the batch over `addresses`, finishing `sink` once all records
    /// have been delivered.
    #[tracing::instrument(skip_all, fields(concurrency = self.concurrency))]
    pub async fn run<I, S>(&self, addresses: I, sink: &mut S) -> Result<BatchSummary>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
        S: Sink + ?Sized,
    {
        let lookup = &self.lookup;
        let inputs = addresses.into_iter().filter_map(normalize).enumerate();

        let mut results = stream::iter(inputs)
            .map(|(position, address)| async move {
                let outcome = lookup.fetch(Some(address.as_str())).await;
                (position, address, outcome)
            })
            .buffered(self.concurrency);

        let mut summary = BatchSummary::default();
        while let Some((position, address, outcome)) = results.next().await {
            let record = outcome.map_err(|source| BatchError::Lookup {
                position,
                address: address.clone(),
                source,
            })?;
            tracing::debug!(position, %address, "lookup complete");

            sink.accept(self.projector.apply(record))?;
            summary.delivered += 1;
        }

        sink.finish()?;
        tracing::info!(delivered = summary.delivered, "batch complete");

        Ok(summary)
    }
}

/// Trims an input line, dropping it when nothing remains.
fn normalize<A: AsRef<str>>(line: A) -> Option<String> {
    let address = line.as_ref().trim();
    if address.is_empty() {
        None
    } else {
        Some(address.to_string())
    }
}
