//! feedback-server: feedback submission API
//!
//! Clients submit a name/subject/message triplet and list what has been
//! submitted. Input is validated in `models`, persisted through the
//! `db::FeedbackStore` trait, and exposed over HTTP by `http`.

pub mod db;
pub mod http;
pub mod models;

pub use db::{FeedbackRepo, FeedbackStore};
pub use http::{run_server, AppState, ServerConfig};
