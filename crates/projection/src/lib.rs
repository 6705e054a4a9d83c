//! Field projection for geolocation records.
//!
//! - [`project`] keeps only the fields named by a list of selectors
//! - [`resolve`] walks a single selector through a record
//! - [`Projector`] bundles a selector list for repeated use

pub mod projector;

pub use projector::{Projector, merge, project, resolve};
