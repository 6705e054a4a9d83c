//! The lookup collaborator trait.

use std::sync::Arc;

use async_trait::async_trait;
use common::Record;

use crate::Result;

/// Resolves an IP address to a geolocation record.
///
/// Credentials are supplied when the implementation is constructed, never per
/// call. Every successful record carries a numeric `status` field.
#[async_trait]
pub trait Lookup: Send + Sync {
    /// Looks up `address`, or the caller's own address when `None`.
    async fn fetch(&self, address: Option<&str>) -> Result<Record>;
}

#[async_trait]
impl<T: Lookup + ?Sized> Lookup for Arc<T> {
    async fn fetch(&self, address: Option<&str>) -> Result<Record> {
        (**self).fetch(address).await
    }
}

#[async_trait]
impl<T: Lookup + ?Sized> Lookup for Box<T> {
    async fn fetch(&self, address: Option<&str>) -> Result<Record> {
        (**self).fetch(address).await
    }
}
