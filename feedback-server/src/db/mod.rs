//! Database layer - connection, schema bootstrap and repositories
//!
//! A single connection is shared by every request; concurrent queries
//! wait on it instead of opening more.

pub mod migrations;
pub mod pool;
pub mod repos;
pub mod store;

pub use pool::create_pool;
pub use repos::{Feedback, FeedbackRepo};
pub use store::{FeedbackStore, MemoryStore, StoreError};
