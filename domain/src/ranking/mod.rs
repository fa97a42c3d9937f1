//! Ranking of a voting round's nominations
//!
//! Ordering and table formatting are pure; collecting the nominations from
//! the platform and the registry is an application use case.

pub mod order;
pub mod table;

pub use order::{RankedNomination, rank_order};
pub use table::ranking_table;
