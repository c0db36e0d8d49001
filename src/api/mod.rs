//! Request/response contract for the presentation layer.
//!
//! - `request` - Single-item analysis request
//! - `response` - Success envelopes, error bodies and file-upload responses

pub mod request;
pub mod response;

pub use request::*;
pub use response::*;
