//! shardgate: HTTP gateway over date-sharded observation and permit tables.
//!
//! Datasets arrive from an out-of-scope ingestion pipeline as many
//! independently named Postgres tables, one per calendar day or per date
//! range, plus a registry table enumerating them. The gateway validates
//! untrusted date input, derives the physical table name the ingester used,
//! runs a single read-only projection, and serves the rows as typed JSON.

pub mod api;
pub mod database;
pub mod dates;
pub mod error;
pub mod models;
pub mod shard;

pub use database::Storage;
pub use error::GatewayError;
