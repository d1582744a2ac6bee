use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// A stored URL record in the registry.
///
/// The legacy aliases keep snapshots written by the previous generation of
/// the tool (`OriginalURL` / `Expiry` / `AccessCount`) loadable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UrlRecord {
    /// The original URL that was shortened.
    #[serde(alias = "OriginalURL")]
    pub target: String,
    /// When the record stops resolving.
    #[serde(alias = "Expiry")]
    pub expires_at: Timestamp,
    /// Number of successful resolutions so far.
    #[serde(alias = "AccessCount")]
    pub access_count: u64,
}

impl UrlRecord {
    /// Creates a fresh record with a zero access count.
    pub fn new(target: impl Into<String>, expires_at: Timestamp) -> Self {
        Self {
            target: target.into(),
            expires_at,
            access_count: 0,
        }
    }

    /// Returns true once `now` has reached the expiry instant.
    pub fn is_expired_at(&self, now: Timestamp) -> bool {
        now >= self.expires_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jiff::SignedDuration;

    #[test]
    fn new_record_starts_unaccessed() {
        let expires_at = Timestamp::from_second(1_000).unwrap();
        let record = UrlRecord::new("https://example.com", expires_at);
        assert_eq!(record.access_count, 0);
        assert_eq!(record.target, "https://example.com");
    }

    #[test]
    fn expiry_boundary_is_inclusive() {
        let expires_at = Timestamp::from_second(1_000).unwrap();
        let record = UrlRecord::new("https://example.com", expires_at);

        let just_before = expires_at - SignedDuration::from_nanos(1);
        let after = expires_at + SignedDuration::from_secs(1);

        assert!(!record.is_expired_at(just_before));
        assert!(record.is_expired_at(expires_at));
        assert!(record.is_expired_at(after));
    }

    #[test]
    fn decodes_legacy_field_names() {
        let json = r#"{
            "OriginalURL": "https://google.com",
            "Expiry": "2024-03-02T10:15:30.123456789+01:00",
            "AccessCount": 4
        }"#;

        let record: UrlRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.target, "https://google.com");
        assert_eq!(record.access_count, 4);
        assert_eq!(
            record.expires_at,
            "2024-03-02T09:15:30.123456789Z".parse::<Timestamp>().unwrap()
        );
    }

    #[test]
    fn encodes_current_field_names() {
        let record = UrlRecord::new("https://example.com", Timestamp::UNIX_EPOCH);
        let value = serde_json::to_value(&record).unwrap();

        assert_eq!(value["target"], "https://example.com");
        assert_eq!(value["expires_at"], "1970-01-01T00:00:00Z");
        assert_eq!(value["access_count"], 0);
    }
}
