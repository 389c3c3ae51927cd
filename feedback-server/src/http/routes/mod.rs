//! Route handlers organized by resource

pub mod fallback;
pub mod feedback;
pub mod health;
