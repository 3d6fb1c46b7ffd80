//! Core domain for salonbook.
//!
//! Pure types and functions with no I/O: the service catalog, opening hours and
//! slot availability, reservations and customer requests, and the repository
//! traits the server implements.

pub mod booking;
pub mod catalog;
pub mod schedule;
pub mod serde;
pub mod storage;
