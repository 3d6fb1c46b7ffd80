//! In-memory storage backend.
//!
//! Stores every entity in HashMaps wrapped in `Arc<RwLock<_>>`. Used by the
//! `inmemory` feature and by the router tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use salonbook::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! ```

mod repository;

pub use repository::InMemoryRepository;
