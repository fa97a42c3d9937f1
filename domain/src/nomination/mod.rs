//! Nomination parsing
//!
//! Turns the free text of a voting-thread reply into a [`Candidate`].
//! Matching rules live behind the [`NominationParser`] trait so callers
//! never depend on how the text is matched.

pub mod candidate;
pub mod parser;

pub use candidate::Candidate;
pub use parser::{
    NominationField, NominationParser, ParseError, ParseOutcome, RegexNominationParser,
    RejectionReason,
};
