//! Subcommand implementations.
//!
//! Each command takes its lookup client and output streams as arguments so
//! the binary can wire real ones and tests can pass in-memory ones.

use std::io::Write;

use batch::{BatchRunner, BatchSummary, OutputFormat, build_sink};
use common::{Selector, Value};
use lookup::Lookup;
use projection::Projector;

use crate::credentials::CredentialStore;
use crate::{Error, Result};

/// Address used to check that an API key works.
pub const PROBE_ADDRESS: &str = "8.8.8.8";

/// Looks up `address` (or the caller's own address) and prints the record as JSON.
pub async fn lookup_one<L, W>(
    lookup: &L,
    address: Option<&str>,
    selectors: Vec<Selector>,
    out: &mut W,
) -> Result<()>
where
    L: Lookup + ?Sized,
    W: Write + ?Sized,
{
    let record = lookup.fetch(address).await?;
    let record = Projector::new(selectors).apply(record);

    serde_json::to_writer(&mut *out, &record)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

/// Options for [`run_batch`].
#[derive(Debug, Clone)]
pub struct BatchOptions {
    pub format: OutputFormat,
    pub selectors: Vec<Selector>,
    pub concurrency: usize,
}

/// Checks that `options` describe an output that can be produced.
///
/// Called before the output file is created or any lookup is made.
pub fn validate_batch(options: &BatchOptions) -> Result<()> {
    if options.format == OutputFormat::Csv && options.selectors.is_empty() {
        return Err(batch::BatchError::Configuration(
            "Output in CSV format is not supported without specification of exactly fields to extract \
             because of plain nature of CSV format. Please use JSON format instead."
                .to_string(),
        )
        .into());
    }
    Ok(())
}

/// Looks up every address in `input` (one per line) and writes the results to `out`.
pub async fn run_batch<L, W>(
    lookup: L,
    input: &str,
    options: BatchOptions,
    out: W,
) -> Result<BatchSummary>
where
    L: Lookup,
    W: Write + Send,
{
    validate_batch(&options)?;

    let mut sink = build_sink(options.format, &options.selectors, out)?;
    let summary = BatchRunner::new(lookup)
        .with_selectors(options.selectors)
        .with_concurrency(options.concurrency)
        .run(input.lines(), &mut sink)
        .await?;

    Ok(summary)
}

/// Validates `api_key` with a probe lookup and stores it.
///
/// `lookup` must already be configured with `api_key`. A warning is written
/// to `err` when a different key is replaced.
pub async fn init<L, W, E>(
    lookup: &L,
    store: &CredentialStore,
    api_key: &str,
    out: &mut W,
    err: &mut E,
) -> Result<()>
where
    L: Lookup + ?Sized,
    W: Write + ?Sized,
    E: Write + ?Sized,
{
    lookup
        .fetch(Some(PROBE_ADDRESS))
        .await
        .map_err(Error::InvalidApiKey)?;

    if let Some(existing) = store.load()? {
        if existing != api_key {
            writeln!(
                err,
                "Warning: You already have an IPData API Key \"{existing}\" listed in {}. \
                 It will be overwritten with {api_key}",
                store.path().display()
            )?;
        }
    }

    store.save(api_key)?;
    tracing::info!(path = %store.path().display(), "api key stored");
    writeln!(out, "New API Key is saved to {}", store.path().display())?;
    Ok(())
}

/// Prints the number of requests made with the configured key.
pub async fn info<L, W>(lookup: &L, out: &mut W) -> Result<()>
where
    L: Lookup + ?Sized,
    W: Write + ?Sized,
{
    let record = lookup.fetch(Some(PROBE_ADDRESS)).await?;
    let count = match record.get("count") {
        Some(Value::String(count)) => count.clone(),
        Some(Value::Number(count)) => count.to_string(),
        _ => {
            return Err(Error::UnexpectedResponse(
                "response has no request count".to_string(),
            ));
        }
    };

    writeln!(out, "Number of requests made: {count}")?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use common::Record;
    use lookup::{InMemoryLookup, LookupError};
    use serde_json::json;

    fn record(value: serde_json::Value) -> Record {
        serde_json::from_value(value).unwrap()
    }

    fn probe_lookup() -> InMemoryLookup {
        InMemoryLookup::new().with_record(
            PROBE_ADDRESS,
            record(json!({
                "ip": "8.8.8.8",
                "status": 200,
                "count": "17",
                "loc": {"lat": 1, "lon": 2}
            })),
        )
    }

    #[tokio::test]
    async fn test_lookup_one_prints_projected_record() {
        let lookup = probe_lookup();
        let mut out = Vec::new();

        lookup_one(
            &lookup,
            Some("8.8.8.8"),
            Selector::parse_list("ip,loc.lat"),
            &mut out,
        )
        .await
        .unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"ip\":\"8.8.8.8\",\"loc\":{\"lat\":1}}\n"
        );
    }

    #[tokio::test]
    async fn test_lookup_one_own_address_whole_record() {
        let lookup = InMemoryLookup::new()
            .with_own_record(record(json!({"ip": "203.0.113.7", "status": 200})));
        let mut out = Vec::new();

        lookup_one(&lookup, None, Vec::new(), &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "{\"ip\":\"203.0.113.7\",\"status\":200}\n"
        );
    }

    #[tokio::test]
    async fn test_lookup_one_failure_writes_nothing() {
        let lookup = InMemoryLookup::new();
        let mut out = Vec::new();

        let err = lookup_one(&lookup, Some("1.1.1.1"), Vec::new(), &mut out)
            .await
            .unwrap_err();

        assert!(matches!(err, Error::Lookup(LookupError::Upstream { .. })));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_csv_batch_without_fields_is_rejected_before_lookup() {
        let lookup = probe_lookup();
        let options = BatchOptions {
            format: OutputFormat::Csv,
            selectors: Vec::new(),
            concurrency: 1,
        };

        let err = run_batch(lookup.clone(), "8.8.8.8\n", options, Vec::new())
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            Error::Batch(batch::BatchError::Configuration(_))
        ));
        assert_eq!(lookup.call_count(), 0);
    }

    #[tokio::test]
    async fn test_init_stores_valid_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::in_home(dir.path());
        let lookup = probe_lookup();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        init(&lookup, &store, "new-key", &mut out, &mut err)
            .await
            .unwrap();

        assert_eq!(store.load().unwrap(), Some("new-key".to_string()));
        assert!(String::from_utf8(out).unwrap().starts_with("New API Key is saved to "));
        assert!(err.is_empty());
    }

    #[tokio::test]
    async fn test_init_warns_when_replacing_key() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::in_home(dir.path());
        store.save("old-key").unwrap();
        let lookup = probe_lookup();
        let (mut out, mut err) = (Vec::new(), Vec::new());

        init(&lookup, &store, "new-key", &mut out, &mut err)
            .await
            .unwrap();

        let warning = String::from_utf8(err).unwrap();
        assert!(warning.contains("\"old-key\""), "{warning}");
        assert!(warning.contains("overwritten with new-key"), "{warning}");
        assert_eq!(store.load().unwrap(), Some("new-key".to_string()));
    }

    #[tokio::test]
    async fn test_init_rejected_key_is_not_stored() {
        let dir = tempfile::tempdir().unwrap();
        let store = CredentialStore::in_home(dir.path());
        store.save("old-key").unwrap();
        let lookup = probe_lookup();
        lookup.set_failing(PROBE_ADDRESS);
        let (mut out, mut err) = (Vec::new(), Vec::new());

        let result = init(&lookup, &store, "bad-key", &mut out, &mut err).await;

        assert!(matches!(result, Err(Error::InvalidApiKey(_))));
        assert_eq!(store.load().unwrap(), Some("old-key".to_string()));
        assert!(out.is_empty());
    }

    #[tokio::test]
    async fn test_info_prints_count() {
        let lookup = probe_lookup();
        let mut out = Vec::new();

        info(&lookup, &mut out).await.unwrap();

        assert_eq!(
            String::from_utf8(out).unwrap(),
            "Number of requests made: 17\n"
        );
    }

    #[tokio::test]
    async fn test_info_without_count_is_unexpected() {
        let lookup = InMemoryLookup::new()
            .with_record(PROBE_ADDRESS, record(json!({"ip": "8.8.8.8", "status": 200})));
        let mut out = Vec::new();

        let err = info(&lookup, &mut out).await.unwrap_err();

        assert!(matches!(err, Error::UnexpectedResponse(_)));
    }
}
