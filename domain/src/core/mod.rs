//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level errors
//! - [`string`]: text helpers used when composing platform messages

pub mod error;
pub mod string;
