//! Paper registry entities
//!
//! A [`Paper`](entities::Paper) is the deduplicated, persisted record of one
//! proposed work. [`Author`](entities::Author) and
//! [`Submitter`](entities::Submitter) are the side records kept alongside it.

pub mod entities;
pub mod title;

pub use entities::{Author, Nomination, Paper, Submitter};
pub use title::{NormalizedTitle, normalize_title};
