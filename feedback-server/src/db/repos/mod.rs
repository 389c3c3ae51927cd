//! Repository implementations for database access

pub mod feedback;

pub use feedback::{Feedback, FeedbackRepo};
