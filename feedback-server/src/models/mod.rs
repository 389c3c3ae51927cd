//! Domain models with validation at construction
//!
//! All user input is validated when creating these types.
//! Invalid input returns ValidationError, not panic.

pub mod feedback;
pub mod validation;

pub use feedback::{FeedbackPayload, NewFeedback, MIN_MESSAGE_LEN};
pub use validation::ValidationError;
