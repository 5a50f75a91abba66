//! jop-etl - Joy of Painting episode loader
//!
//! Reads the three raw sources (title/date list, color usage table, subject
//! flag table), merges them into one canonical record per episode, derives
//! the unique color and subject tables, and replaces the contents of the
//! document store.

pub mod cli;
pub mod error;
pub mod extract;
pub mod load;
pub mod records;
pub mod transform;

pub use error::{EtlError, EtlResult};
pub use load::{run_full_etl, CollectionCounts};
