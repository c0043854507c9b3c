//! Submission models.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize, Serializer};

/// Subject used when the form leaves it blank.
pub const DEFAULT_SUBJECT: &str = "Contact from Portfolio";

/// Raw contact form input, as typed by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactForm {
    /// Visitor name.
    pub name: String,
    /// Visitor email address.
    pub email: String,
    /// Optional subject.
    pub subject: String,
    /// Message body.
    pub message: String,
}

impl ContactForm {
    /// Creates a form with all four fields.
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            subject: subject.into(),
            message: message.into(),
        }
    }

    /// Builds a form from decoded form-encoded pairs; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut form = Self::default();
        for (key, value) in pairs {
            match key.as_ref() {
                "name" => form.name = value.into(),
                "email" => form.email = value.into(),
                "subject" => form.subject = value.into(),
                "message" => form.message = value.into(),
                _ => {}
            }
        }
        form
    }

    /// Clears every field.
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// True when every field is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// A validated submission waiting to be logged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewSubmission {
    /// Visitor name.
    pub name: String,
    /// Visitor email address.
    pub email: String,
    /// Subject, defaulted when blank.
    pub subject: String,
    /// Message body.
    pub message: String,
}

/// A logged submission.
///
/// Serializes to the same JSON shape the site keeps in local storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRecord {
    /// Visitor name.
    pub name: String,
    /// Visitor email address.
    pub email: String,
    /// Subject.
    pub subject: String,
    /// Message body.
    pub message: String,
    /// Capture time, millisecond precision.
    #[serde(serialize_with = "serialize_millis")]
    pub timestamp: DateTime<Utc>,
    /// Strictly increasing identifier derived from the capture time in
    /// milliseconds.
    pub id: i64,
}

/// Always writes three fractional digits (`2025-10-09T08:53:20.000Z`).
fn serialize_millis<S: Serializer>(
    timestamp: &DateTime<Utc>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn record_at(timestamp: DateTime<Utc>) -> SubmissionRecord {
        SubmissionRecord {
            name: "Ann".to_string(),
            email: "ann@example.com".to_string(),
            subject: DEFAULT_SUBJECT.to_string(),
            message: "Hello".to_string(),
            timestamp,
            id: timestamp.timestamp_millis(),
        }
    }

    #[test]
    fn test_timestamp_keeps_zero_millis() {
        let record = record_at(Utc.with_ymd_and_hms(2025, 10, 9, 8, 53, 20).unwrap());
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["timestamp"], "2025-10-09T08:53:20.000Z");
    }

    #[test]
    fn test_timestamp_round_trips() {
        let timestamp = DateTime::from_timestamp_millis(1_760_000_000_123).unwrap();
        let record = record_at(timestamp);
        let json = serde_json::to_string(&record).unwrap();
        assert!(json.contains(r#""timestamp":"2025-10-09T08:53:20.123Z""#));
        let back: SubmissionRecord = serde_json::from_str(&json).unwrap();
        assert_eq!(back, record);
    }

    #[test]
    fn test_from_pairs() {
        let form = ContactForm::from_pairs([
            ("name", "Ann"),
            ("email", "ann@example.com"),
            ("message", "Hello"),
            ("csrf", "ignored"),
        ]);
        assert_eq!(form.name, "Ann");
        assert_eq!(form.email, "ann@example.com");
        assert_eq!(form.subject, "");
        assert_eq!(form.message, "Hello");
    }

    #[test]
    fn test_reset_clears_all_fields() {
        let mut form = ContactForm::new("Ann", "ann@example.com", "Hi", "Hello");
        assert!(!form.is_empty());
        form.reset();
        assert!(form.is_empty());
    }
}
