//! Structured logging with request context.
//!
//! Every log line carries the batch_id (when analysing a batch) and the
//! request_id of the item so one analysis can be followed end to end.

pub mod structured;

pub use structured::*;
