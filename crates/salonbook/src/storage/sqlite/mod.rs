//! SQLite storage backend implementation.
//!
//! Implements the repository traits using `rusqlite` for synchronous operations
//! and `tokio-rusqlite` for async wrapping.

mod conversions;
mod error;
mod repository;
mod schema;

pub use repository::SqliteRepository;
