//! Recommendation synthesis.
//!
//! Turns a verdict into reviewer-facing recommendation text and an ordered
//! list of remediation suggestions.

pub mod recommendation;

pub use recommendation::*;
