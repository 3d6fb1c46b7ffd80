//! Storage backend implementations.
//!
//! Concrete implementations of the repository traits defined in
//! `salonbook_core::storage`, selected at compile time via feature flags.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//! - `inmemory`: HashMap-backed storage, data is lost on restart
//!
//! These features are mutually exclusive.
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p salonbook
//! ```
//!
//! Build with in-memory storage:
//! ```bash
//! cargo build -p salonbook --no-default-features --features inmemory
//! ```

#[cfg(all(feature = "sqlite", feature = "inmemory"))]
compile_error!(
    "Features 'sqlite' and 'inmemory' are mutually exclusive. \
    Enable only one storage backend at a time."
);

#[cfg(not(any(feature = "sqlite", feature = "inmemory")))]
compile_error!(
    "No storage backend selected. Enable 'sqlite' or 'inmemory' feature. \
    Example: cargo build -p salonbook --features sqlite"
);

// The in-memory backend also backs the handler tests.
#[cfg(any(feature = "inmemory", test))]
pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

#[cfg(any(feature = "inmemory", test))]
pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
