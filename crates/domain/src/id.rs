//! Typed identifier for appliances, backed by the storage row id.

use std::fmt;

use serde::Serialize;

/// Unique identifier for an [`Appliance`](crate::appliance::Appliance).
///
/// Generated by the storage layer on insert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ApplianceId(i64);

impl ApplianceId {
    /// Wrap a raw row id.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(value)
    }

    /// Access the raw row id.
    #[must_use]
    pub fn as_i64(self) -> i64 {
        self.0
    }

    /// Parse a path segment into an id.
    ///
    /// Only segments made entirely of ASCII digits that fit in an `i64` are
    /// accepted; anything else (`abc`, `-1`, `1.5`, ``) yields `None`.
    #[must_use]
    pub fn from_segment(segment: &str) -> Option<Self> {
        if segment.is_empty() || !segment.bytes().all(|b| b.is_ascii_digit()) {
            return None;
        }
        segment.parse().ok().map(Self)
    }
}

impl fmt::Display for ApplianceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_parse_numeric_segment() {
        assert_eq!(ApplianceId::from_segment("42"), Some(ApplianceId::new(42)));
    }

    #[test]
    fn should_reject_non_numeric_segment() {
        assert_eq!(ApplianceId::from_segment("abc"), None);
        assert_eq!(ApplianceId::from_segment("12abc"), None);
        assert_eq!(ApplianceId::from_segment("-1"), None);
        assert_eq!(ApplianceId::from_segment("1.5"), None);
        assert_eq!(ApplianceId::from_segment(""), None);
    }

    #[test]
    fn should_reject_segment_overflowing_i64() {
        assert_eq!(ApplianceId::from_segment("99999999999999999999"), None);
    }

    #[test]
    fn should_serialize_as_plain_number() {
        let json = serde_json::to_string(&ApplianceId::new(7)).unwrap();
        assert_eq!(json, "7");
    }
}
