//! Lookup collaborators that turn an IP address into a geolocation record.
//!
//! - [`Lookup`] is the seam the batch pipeline and CLI depend on
//! - [`HttpLookup`] queries the ipdata HTTP API
//! - [`InMemoryLookup`] serves canned records for tests

pub mod client;
pub mod error;
pub mod http;
pub mod memory;

pub use client::Lookup;
pub use error::{LookupError, Result};
pub use http::{DEFAULT_BASE_URL, HttpLookup, HttpLookupBuilder};
pub use memory::InMemoryLookup;
