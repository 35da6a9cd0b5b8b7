//! JSON envelopes shared by every endpoint.

use serde::Serialize;
use serde_json::Value;

use appliances_domain::listing::PageMeta;

/// Success envelope: `{"data": ..., "meta": {...}}`.
#[derive(Debug, Serialize)]
pub struct DataBody<T> {
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<PageMeta>,
}

impl<T> DataBody<T> {
    pub fn new(data: T) -> Self {
        Self { data, meta: None }
    }

    pub fn with_meta(data: T, meta: PageMeta) -> Self {
        Self {
            data,
            meta: Some(meta),
        }
    }
}

/// Success envelope carrying only a message: `{"message": "Deleted"}`.
#[derive(Debug, Serialize)]
pub struct MessageBody {
    pub message: &'static str,
}

/// Error envelope: `{"message": ..., "details": ...}`.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ErrorBody {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            details: None,
        }
    }

    #[must_use]
    pub fn with_details(mut self, details: impl Into<Value>) -> Self {
        self.details = Some(details.into());
        self
    }
}
