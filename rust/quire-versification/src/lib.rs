//! Versification systems and verse addressing.
//!
//! A versification system fixes the canonical enumeration of a text corpus:
//! which books it contains, in what order, how many chapters each book has
//! and how many verses each chapter has. Every verse address in a system maps
//! to a unique dense ordinal, which is what the storage layer indexes by.
//!
//! The crate ships two built-in systems (KJV, the default, and LXX), a
//! [`Catalog`] object that holds named systems and accepts further ones at
//! runtime, a JSON description loader for custom systems, and a [`mapper`]
//! that converts verse addresses between systems through a shared reference
//! system.

pub mod book;
pub mod catalog;
pub mod description;
pub mod mapper;
mod system;
pub mod versification;

pub use book::{BookId, Testament};
pub use catalog::Catalog;
pub use versification::Versification;
