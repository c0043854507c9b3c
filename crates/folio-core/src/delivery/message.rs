//! Message templates.

use std::fmt::Write;

use chrono::FixedOffset;

use crate::submissions::SubmissionRecord;

/// Where submissions come from, as shown to the recipient.
pub const SOURCE_LABEL: &str = "Portfolio Website";

/// Markdown message for the bot API.
///
/// The send time is rendered in `offset`, the sender's local time.
#[must_use]
pub fn format_bot_message(record: &SubmissionRecord, offset: FixedOffset) -> String {
    let sent_at = record
        .timestamp
        .with_timezone(&offset)
        .format("%-m/%-d/%Y, %-I:%M:%S %p");

    let mut text = String::new();
    let _ = writeln!(text, "🤖 *New Contact Form Submission*");
    text.push('\n');
    let _ = writeln!(text, "👤 *Name:* {}", record.name);
    let _ = writeln!(text, "📧 *Email:* {}", record.email);
    let _ = writeln!(text, "📝 *Subject:* {}", record.subject);
    let _ = writeln!(text, "💬 *Message:*");
    let _ = writeln!(text, "{}", record.message);
    text.push('\n');
    let _ = writeln!(text, "⏰ *Time:* {sent_at}");
    let _ = write!(text, "🌐 *Source:* {SOURCE_LABEL}");
    text
}

/// Plain-text message prefilled into the deep link.
#[must_use]
pub fn format_plain_message(record: &SubmissionRecord) -> String {
    format!(
        "Hi! I'm {} ({}).\n\nSubject: {}\n\nMessage: {}\n\nI found you through your portfolio website.",
        record.name, record.email, record.subject, record.message
    )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;

    fn record() -> SubmissionRecord {
        SubmissionRecord {
            name: "Ann Lee".to_string(),
            email: "ann@example.com".to_string(),
            subject: "Collaboration".to_string(),
            message: "Let's build something.".to_string(),
            timestamp: Utc.with_ymd_and_hms(2026, 3, 4, 15, 6, 7).unwrap(),
            id: 1,
        }
    }

    #[test]
    fn test_bot_message_template() {
        let offset = FixedOffset::east_opt(7 * 3600).unwrap();
        let text = format_bot_message(&record(), offset);

        assert!(text.starts_with("🤖 *New Contact Form Submission*\n\n"));
        assert!(text.contains("👤 *Name:* Ann Lee\n"));
        assert!(text.contains("📧 *Email:* ann@example.com\n"));
        assert!(text.contains("📝 *Subject:* Collaboration\n"));
        assert!(text.contains("💬 *Message:*\nLet's build something.\n"));
        assert!(text.contains("⏰ *Time:* 3/4/2026, 10:06:07 PM\n"));
        assert!(text.ends_with("🌐 *Source:* Portfolio Website"));
    }

    #[test]
    fn test_plain_message_has_no_markup() {
        let text = format_plain_message(&record());
        assert_eq!(
            text,
            "Hi! I'm Ann Lee (ann@example.com).\n\nSubject: Collaboration\n\n\
             Message: Let's build something.\n\nI found you through your portfolio website."
        );
        assert!(!text.contains('*'));
    }
}
