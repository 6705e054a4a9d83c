//! Shared data model for geolocation records.
//!
//! - [`Value`] is the typed variant every record field holds
//! - [`Record`] is a string-keyed mapping of values
//! - [`Selector`] names a (possibly nested) field by dotted path

pub mod selector;
pub mod value;

pub use selector::Selector;
pub use value::{Record, Value};
