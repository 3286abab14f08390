//! Configuration loader and schema types.
//!
//! The schema drives engine timing, HTTP behavior, playback defaults and
//! the configured catalog sources.

mod load;
mod schema;

pub use schema::*;
