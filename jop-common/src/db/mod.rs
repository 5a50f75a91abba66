//! Document store over SQLite
//!
//! Each collection is a table of JSON documents keyed by a UUID guid.
//! Row insertion order is the collection order.

pub mod documents;
pub mod episodes;
pub mod init;

pub use documents::{count, delete_all, find_all, find_by_guid, insert_many, Document, Stored};
pub use episodes::{find_episode, find_episode_by_number, ping};
pub use init::{connect_readonly, init_database};
