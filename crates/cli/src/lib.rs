//! Command-line client for the ipdata geolocation API.
//!
//! Looks up single addresses, the caller's own address, or whole files of
//! addresses, optionally keeping only selected fields of each record.

pub mod args;
pub mod commands;
pub mod config;
pub mod credentials;
pub mod error;

pub use config::Config;
pub use credentials::CredentialStore;
pub use error::{Error, Result};
