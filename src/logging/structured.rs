//! Structured logging utilities.
//!
//! Log lines follow `"{ctx} EVENT_NAME key=value ..."` so they can be grepped
//! and parsed without a JSON formatter.

use std::fmt;

/// Install the process logger.
///
/// Safe to call repeatedly; only the first call takes effect.
pub fn init_logger() {
    let _ = env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .format_timestamp_millis()
        .try_init();
}

/// Logging context for a single analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct LogContext {
    pub batch_id: Option<String>,
    pub request_id: String,
}

impl LogContext {
    pub fn new(request_id: &str) -> Self {
        Self {
            batch_id: None,
            request_id: request_id.to_string(),
        }
    }

    pub fn with_batch(&self, batch_id: &str) -> Self {
        Self {
            batch_id: Some(batch_id.to_string()),
            request_id: self.request_id.clone(),
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.batch_id {
            Some(bid) => write!(f, "[batch={}] [req={}]", bid, self.request_id),
            None => write!(f, "[req={}]", self.request_id),
        }
    }
}
