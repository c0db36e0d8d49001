//! Pipeline context management.
//!
//! Provides batch and request context for logging and result stamping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::logging::structured::LogContext;

/// Context for a batch of items.
#[derive(Debug, Clone)]
pub struct BatchContext {
    pub batch_id: String,
}

impl BatchContext {
    pub fn new() -> Self {
        Self {
            batch_id: format!("batch-{}", &Uuid::new_v4().to_string()[..8]),
        }
    }

    /// Create a request context for one item of this batch.
    pub fn request_context(&self) -> RequestContext {
        RequestContext {
            batch_id: Some(self.batch_id.clone()),
            ..RequestContext::new()
        }
    }
}

impl Default for BatchContext {
    fn default() -> Self {
        Self::new()
    }
}

/// Context for a single analysis request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub request_id: String,
    pub batch_id: Option<String>,
    pub timestamp: DateTime<Utc>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self {
            request_id: format!("req-{}", Uuid::new_v4().simple()),
            batch_id: None,
            timestamp: Utc::now(),
        }
    }

    pub fn log_context(&self) -> LogContext {
        let ctx = LogContext::new(&self.request_id);
        match &self.batch_id {
            Some(batch_id) => ctx.with_batch(batch_id),
            None => ctx,
        }
    }
}

impl Default for RequestContext {
    fn default() -> Self {
        Self::new()
    }
}
