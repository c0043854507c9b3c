//! Submission log repository.

use chrono::{DateTime, SecondsFormat, Utc};
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions, SqliteRow};

use super::model::{NewSubmission, SubmissionRecord};
use crate::{Error, Result};

/// Table holding the log; named after the key the site keeps in local storage.
pub const SUBMISSIONS_TABLE: &str = "portfolio_contacts";

/// Append-only log of contact submissions.
///
/// Each append is a single statement, so concurrent writers sharing the
/// database never drop or duplicate one another's records.
#[derive(Debug, Clone)]
pub struct SubmissionLog {
    pool: SqlitePool,
}

impl SubmissionLog {
    /// Create a new log with the given database path.
    ///
    /// Creates the database and tables if they don't exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn new(database_path: &str) -> Result<Self> {
        let url = format!("sqlite:{database_path}?mode=rwc");
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        let log = Self { pool };
        log.initialize().await?;
        Ok(log)
    }

    /// Create an in-memory log for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let log = Self { pool };
        log.initialize().await?;
        Ok(log)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS portfolio_contacts (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                id INTEGER NOT NULL UNIQUE,
                name TEXT NOT NULL,
                email TEXT NOT NULL,
                subject TEXT NOT NULL,
                message TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Append a submission captured at `captured_at`.
    ///
    /// The id is the capture time in milliseconds, bumped past the newest
    /// logged id when the clock has not moved forward.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn append(
        &self,
        submission: NewSubmission,
        captured_at: DateTime<Utc>,
    ) -> Result<SubmissionRecord> {
        let millis = captured_at.timestamp_millis();
        let timestamp = DateTime::from_timestamp_millis(millis)
            .ok_or_else(|| Error::Corrupt(format!("timestamp out of range: {millis}")))?;

        let row = sqlx::query(
            r"
            INSERT INTO portfolio_contacts (id, name, email, subject, message, timestamp)
            SELECT MAX(?, COALESCE(MAX(id), 0) + 1), ?, ?, ?, ?, ?
            FROM portfolio_contacts
            RETURNING id
            ",
        )
        .bind(millis)
        .bind(&submission.name)
        .bind(&submission.email)
        .bind(&submission.subject)
        .bind(&submission.message)
        .bind(timestamp.to_rfc3339_opts(SecondsFormat::Millis, true))
        .fetch_one(&self.pool)
        .await?;

        let id: i64 = row.get("id");
        tracing::debug!(id, "Logged submission");

        Ok(SubmissionRecord {
            name: submission.name,
            email: submission.email,
            subject: submission.subject,
            message: submission.message,
            timestamp,
            id,
        })
    }

    /// Every logged submission in append order.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is corrupt.
    pub async fn list(&self) -> Result<Vec<SubmissionRecord>> {
        let rows = sqlx::query(
            r"
            SELECT id, name, email, subject, message, timestamp
            FROM portfolio_contacts
            ORDER BY seq
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(record_from_row).collect()
    }

    /// Number of logged submissions.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn len(&self) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM portfolio_contacts")
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.get("count");
        Ok(count.unsigned_abs())
    }

    /// Whether the log is empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn is_empty(&self) -> Result<bool> {
        Ok(self.len().await? == 0)
    }

    /// Remove every submission. Maintenance only.
    ///
    /// Returns how many were removed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn clear(&self) -> Result<u64> {
        let removed = sqlx::query("DELETE FROM portfolio_contacts")
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(removed, "Cleared submission log");
        Ok(removed)
    }

    /// The log as a JSON array, in the shape the site keeps in local storage.
    ///
    /// # Errors
    ///
    /// Returns an error if reading or serializing fails.
    pub async fn export_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.list().await?)?)
    }
}

fn record_from_row(row: &SqliteRow) -> Result<SubmissionRecord> {
    let timestamp: String = row.get("timestamp");
    let timestamp = DateTime::parse_from_rfc3339(&timestamp)
        .map_err(|e| Error::Corrupt(format!("timestamp {timestamp}: {e}")))?
        .with_timezone(&Utc);

    Ok(SubmissionRecord {
        name: row.get("name"),
        email: row.get("email"),
        subject: row.get("subject"),
        message: row.get("message"),
        timestamp,
        id: row.get("id"),
    })
}
