//! Reddit adapter
//!
//! [`RedditClient`] implements the platform port over Reddit's OAuth API.
//! Response parsing lives in [`listing`] so it can be tested without a
//! network.

pub mod client;
pub mod error;
pub mod listing;

pub use client::RedditClient;
pub use error::RedditError;
