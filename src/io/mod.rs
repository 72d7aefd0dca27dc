//! Input readers.
pub mod delimited;

pub use delimited::{parse_delimited, ParseOutcome};
