//! Durable per-session conversation history backed by Redis.
//!
//! Turns are stored as one JSON document per entry in a Redis list keyed by
//! the composite session key, so insertion order is the chronological order
//! and `LRANGE 0 -1` reads the whole conversation back in sequence.
//!
//! Public API:
//! - [`RedisHistory::connect`]: open the connection and verify it with PING.
//! - [`RedisHistory::append`] / [`RedisHistory::list`]: append-only writes
//!   and ordered reads. Existing turns are never mutated or deleted.

pub mod errors;
mod store;
mod turn;

pub use store::RedisHistory;
pub use turn::{Role, Turn};
