//! Time and timestamp helpers.

use chrono::{DateTime, Utc};

/// UTC timestamp used for `created_at`. Assigned by storage on insert.
pub type Timestamp = DateTime<Utc>;
