//! Typed client for the `YouTube` Data API comment-threads endpoint.

pub mod client;
pub mod error;
pub mod types;

pub use client::YoutubeClient;
pub use error::YoutubeError;
pub use types::CommentPage;
