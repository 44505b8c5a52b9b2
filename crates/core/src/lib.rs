//! Shared domain types and pure logic for the portfolio backend.
//!
//! Nothing in this crate performs I/O. The database, storage and HTTP
//! crates build on these types.

pub mod error;
pub mod forms;
pub mod media;
pub mod slug;
pub mod types;
pub mod view;
