//! Detection module.
//!
//! Rule-based scanning of content:
//! - `categories` - Category table (severity, penalties, remediation)
//! - `rules` - General and channel-specific pattern rule sets
//! - `matcher` - Pattern matching over normalized text
//! - `pii` - Format-based PII detection and redaction

pub mod categories;
pub mod matcher;
pub mod pii;
pub mod rules;

pub use categories::*;
pub use matcher::*;
pub use pii::*;
