//! Data model for the analysis pipeline.
//!
//! - `content` - Input items and content-type tags
//! - `findings` - Pattern matches and PII findings
//! - `verdict` - Threat levels and the fused verdict
//! - `result` - Response envelopes for single items and batches

pub mod content;
pub mod findings;
pub mod result;
pub mod verdict;

pub use content::*;
pub use findings::*;
pub use result::*;
pub use verdict::*;
