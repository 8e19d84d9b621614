//! Flat-text persistence of the fleet.
//!
//! One vehicle per line, eight comma-separated fields, no header, no quoting.

mod record;
mod snapshot;

pub use record::*;
pub use snapshot::*;
