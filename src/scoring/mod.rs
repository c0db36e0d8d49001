//! Scoring module.
//!
//! - `fusion` - Pattern/ML/PII fusion into a threat verdict
//! - `compliance` - Compliance and marketing-quality scores

pub mod compliance;
pub mod fusion;

pub use compliance::*;
pub use fusion::*;
