//! Pipeline orchestration module.
//!
//! Coordinates a single analysis:
//! - Input validation
//! - Pattern matching and PII detection
//! - External ML signal (optional)
//! - Score fusion
//! - Compliance/marketing scoring
//! - Recommendation synthesis
//!
//! and fans it out across batches of items or uploaded files.

pub mod batch;
pub mod context;
pub mod extraction;
pub mod orchestrator;
pub mod scorer;

pub use batch::*;
pub use context::*;
pub use extraction::*;
pub use orchestrator::*;
pub use scorer::*;
