//! In-memory lookup implementation.

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use common::Record;

use crate::client::Lookup;
use crate::{LookupError, Result};

#[derive(Debug, Default)]
struct InMemoryLookupState {
    records: HashMap<String, Record>,
    own_record: Option<Record>,
    failing: HashSet<String>,
    calls: Vec<Option<String>>,
}

/// In-memory lookup service for testing.
///
/// Serves records registered with [`with_record`](Self::with_record). Unknown
/// addresses fail with a 404 upstream error, mirroring the HTTP client.
#[derive(Debug, Clone, Default)]
pub struct InMemoryLookup {
    state: Arc<RwLock<InMemoryLookupState>>,
}

impl InMemoryLookup {
    /// Creates a lookup service with no records.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the record returned for `address`.
    pub fn with_record(self, address: impl Into<String>, record: Record) -> Self {
        self.state
            .write()
            .unwrap()
            .records
            .insert(address.into(), record);
        self
    }

    /// Registers the record returned for the caller's own address.
    pub fn with_own_record(self, record: Record) -> Self {
        self.state.write().unwrap().own_record = Some(record);
        self
    }

    /// Configures lookups of `address` to fail.
    pub fn set_failing(&self, address: impl Into<String>) {
        self.state.write().unwrap().failing.insert(address.into());
    }

    /// Returns every address looked up so far, in call order.
    pub fn calls(&self) -> Vec<Option<String>> {
        self.state.read().unwrap().calls.clone()
    }

    /// Returns the number of lookups performed.
    pub fn call_count(&self) -> usize {
        self.state.read().unwrap().calls.len()
    }
}

#[async_trait]
impl Lookup for InMemoryLookup {
    async fn fetch(&self, address: Option<&str>) -> Result<Record> {
        let mut state = self.state.write().unwrap();
        state.calls.push(address.map(str::to_string));

        let Some(address) = address else {
            return state.own_record.clone().ok_or(LookupError::Upstream {
                status: 404,
                message: "no record for own address".to_string(),
            });
        };

        if state.failing.contains(address) {
            return Err(LookupError::Upstream {
                status: 500,
                message: format!("lookup of {address} failed"),
            });
        }

        state
            .records
            .get(address)
            .cloned()
            .ok_or_else(|| LookupError::Upstream {
                status: 404,
                message: format!("no record for {address}"),
            })
    }
}
