//! Cache generation storage repository.

use chrono::Utc;
use sqlx::Row;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};

use super::model::{GenerationSummary, LifecycleState, RequestKey, Resource};
use crate::{Error, Result};

/// Repository holding every cache generation and its stored responses.
///
/// Writes to one key are serialised by `SQLite`; concurrent writers of the
/// same key resolve last-writer-wins.
#[derive(Debug, Clone)]
pub struct CacheStorage {
    pool: SqlitePool,
}

impl CacheStorage {
    /// Create a new repository with the given database path.
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

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Create an in-memory repository for testing.
    ///
    /// # Errors
    ///
    /// Returns an error if the database connection fails or schema creation fails.
    pub async fn in_memory() -> Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;

        let repo = Self { pool };
        repo.initialize().await?;
        Ok(repo)
    }

    /// Initialize database schema.
    async fn initialize(&self) -> Result<()> {
        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cache_generations (
                name TEXT PRIMARY KEY NOT NULL,
                state TEXT NOT NULL DEFAULT 'installing',
                created_at TEXT NOT NULL
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r"
            CREATE TABLE IF NOT EXISTS cache_entries (
                generation TEXT NOT NULL,
                method TEXT NOT NULL,
                url TEXT NOT NULL,
                response_url TEXT NOT NULL,
                status INTEGER NOT NULL,
                headers_json TEXT NOT NULL DEFAULT '[]',
                body BLOB NOT NULL,
                cached_at TEXT NOT NULL,
                PRIMARY KEY (generation, method, url)
            )
            ",
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Open a generation, creating it if absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn open(&self, name: &str) -> Result<()> {
        sqlx::query(
            r"
            INSERT INTO cache_generations (name, state, created_at)
            VALUES (?, 'installing', ?)
            ON CONFLICT(name) DO NOTHING
            ",
        )
        .bind(name)
        .bind(Utc::now().to_rfc3339())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Record the lifecycle state of a generation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn set_state(&self, name: &str, state: LifecycleState) -> Result<()> {
        sqlx::query("UPDATE cache_generations SET state = ? WHERE name = ?")
            .bind(state.as_str())
            .bind(name)
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    /// Stored lifecycle state, `None` if the generation does not exist.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored state is unknown.
    pub async fn state(&self, name: &str) -> Result<Option<LifecycleState>> {
        let row = sqlx::query("SELECT state FROM cache_generations WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;

        row.map(|row| {
            let state: String = row.get("state");
            state.parse().map_err(Error::Corrupt)
        })
        .transpose()
    }

    /// Store a response, replacing any previous entry for the same key.
    ///
    /// Only writes into a generation that exists; a deleted generation is
    /// never brought back. Returns whether the response was stored.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn put(&self, name: &str, key: &RequestKey, resource: &Resource) -> Result<bool> {
        let headers_json = serde_json::to_string(&resource.headers)?;
        let stored = sqlx::query(
            r"
            INSERT INTO cache_entries
                (generation, method, url, response_url, status, headers_json, body, cached_at)
            SELECT ?, ?, ?, ?, ?, ?, ?, ?
            WHERE EXISTS (SELECT 1 FROM cache_generations WHERE name = ?)
            ON CONFLICT(generation, method, url) DO UPDATE SET
                response_url = excluded.response_url,
                status = excluded.status,
                headers_json = excluded.headers_json,
                body = excluded.body,
                cached_at = excluded.cached_at
            ",
        )
        .bind(name)
        .bind(&key.method)
        .bind(&key.url)
        .bind(&resource.url)
        .bind(i64::from(resource.status))
        .bind(headers_json)
        .bind(resource.body.as_ref())
        .bind(Utc::now().to_rfc3339())
        .bind(name)
        .execute(&self.pool)
        .await?
        .rows_affected();

        Ok(stored > 0)
    }

    /// Store several responses; either all are stored or none are.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails; the transaction is rolled back.
    pub async fn put_all(&self, name: &str, entries: &[(RequestKey, Resource)]) -> Result<()> {
        let mut tx = self.pool.begin().await?;
        let cached_at = Utc::now().to_rfc3339();

        for (key, resource) in entries {
            let headers_json = serde_json::to_string(&resource.headers)?;
            sqlx::query(
                r"
                INSERT INTO cache_entries
                    (generation, method, url, response_url, status, headers_json, body, cached_at)
                VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                ON CONFLICT(generation, method, url) DO UPDATE SET
                    response_url = excluded.response_url,
                    status = excluded.status,
                    headers_json = excluded.headers_json,
                    body = excluded.body,
                    cached_at = excluded.cached_at
                ",
            )
            .bind(name)
            .bind(&key.method)
            .bind(&key.url)
            .bind(&resource.url)
            .bind(i64::from(resource.status))
            .bind(headers_json)
            .bind(resource.body.as_ref())
            .bind(&cached_at)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        Ok(())
    }

    /// Look up a stored response.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row is corrupt.
    pub async fn lookup(&self, name: &str, key: &RequestKey) -> Result<Option<Resource>> {
        let row = sqlx::query(
            r"
            SELECT response_url, status, headers_json, body
            FROM cache_entries
            WHERE generation = ? AND method = ? AND url = ?
            ",
        )
        .bind(name)
        .bind(&key.method)
        .bind(&key.url)
        .fetch_optional(&self.pool)
        .await?;

        let Some(row) = row else {
            return Ok(None);
        };

        let status = u16::try_from(row.get::<i64, _>("status"))
            .map_err(|e| Error::Corrupt(format!("status for {key}: {e}")))?;
        let headers_json: String = row.get("headers_json");
        let body: Vec<u8> = row.get("body");

        Ok(Some(Resource {
            url: row.get("response_url"),
            status,
            headers: serde_json::from_str(&headers_json)?,
            body: body.into(),
        }))
    }

    /// Names of every stored generation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn keys(&self) -> Result<Vec<String>> {
        let rows = sqlx::query("SELECT name FROM cache_generations ORDER BY created_at, name")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("name")).collect())
    }

    /// Delete a whole generation with all its entries.
    ///
    /// Returns whether the generation existed.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn delete(&self, name: &str) -> Result<bool> {
        let mut tx = self.pool.begin().await?;

        sqlx::query("DELETE FROM cache_entries WHERE generation = ?")
            .bind(name)
            .execute(&mut *tx)
            .await?;

        let deleted = sqlx::query("DELETE FROM cache_generations WHERE name = ?")
            .bind(name)
            .execute(&mut *tx)
            .await?
            .rows_affected();

        tx.commit().await?;
        Ok(deleted > 0)
    }

    /// Number of stored responses in a generation.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn entry_count(&self, name: &str) -> Result<u64> {
        let row = sqlx::query("SELECT COUNT(*) as count FROM cache_entries WHERE generation = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?;

        let count: i64 = row.get("count");
        Ok(count.unsigned_abs())
    }

    /// Summaries of every stored generation, oldest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn summaries(&self) -> Result<Vec<GenerationSummary>> {
        let rows = sqlx::query(
            r"
            SELECT g.name, g.state, COUNT(e.url) as entries
            FROM cache_generations g
            LEFT JOIN cache_entries e ON e.generation = g.name
            GROUP BY g.name
            ORDER BY g.created_at, g.name
            ",
        )
        .fetch_all(&self.pool)
        .await?;

        rows.iter()
            .map(|row| {
                let state: String = row.get("state");
                Ok(GenerationSummary {
                    name: row.get("name"),
                    state: state.parse().map_err(Error::Corrupt)?,
                    entries: row.get::<i64, _>("entries").unsigned_abs(),
                })
            })
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn page(body: &str) -> Resource {
        Resource::new("http://localhost/index.html", 200, body.to_string())
            .with_header("content-type", "text/html")
    }

    #[tokio::test]
    async fn test_put_and_lookup() {
        let storage = CacheStorage::in_memory().await.unwrap();
        let key = RequestKey::get("/index.html");

        storage.open("portfolio-v1").await.unwrap();
        assert!(storage.put("portfolio-v1", &key, &page("<h1>v1</h1>")).await.unwrap());

        let found = storage.lookup("portfolio-v1", &key).await.unwrap().unwrap();
        assert_eq!(found, page("<h1>v1</h1>"));
        assert!(storage.lookup("portfolio-v2", &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites_same_key() {
        let storage = CacheStorage::in_memory().await.unwrap();
        let key = RequestKey::get("/index.html");

        storage.open("portfolio-v1").await.unwrap();
        storage.put("portfolio-v1", &key, &page("old")).await.unwrap();
        storage.put("portfolio-v1", &key, &page("new")).await.unwrap();

        let found = storage.lookup("portfolio-v1", &key).await.unwrap().unwrap();
        assert_eq!(found.body.as_ref(), b"new");
        assert_eq!(storage.entry_count("portfolio-v1").await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_keys_and_delete() {
        let storage = CacheStorage::in_memory().await.unwrap();
        storage.open("portfolio-v1").await.unwrap();
        storage.open("portfolio-v2").await.unwrap();
        storage
            .put("portfolio-v2", &RequestKey::get("/"), &page("v2"))
            .await
            .unwrap();

        let mut keys = storage.keys().await.unwrap();
        keys.sort();
        assert_eq!(keys, vec!["portfolio-v1", "portfolio-v2"]);

        assert!(storage.delete("portfolio-v2").await.unwrap());
        assert!(!storage.delete("portfolio-v2").await.unwrap());
        assert_eq!(storage.keys().await.unwrap(), vec!["portfolio-v1"]);
        assert_eq!(storage.entry_count("portfolio-v2").await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_put_skips_deleted_generation() {
        let storage = CacheStorage::in_memory().await.unwrap();
        let key = RequestKey::get("/");

        assert!(!storage.put("portfolio-v1", &key, &page("ghost")).await.unwrap());
        assert!(storage.keys().await.unwrap().is_empty());

        storage.open("portfolio-v1").await.unwrap();
        storage.put("portfolio-v1", &key, &page("v1")).await.unwrap();
        storage.delete("portfolio-v1").await.unwrap();

        assert!(!storage.put("portfolio-v1", &key, &page("v1 again")).await.unwrap());
        assert!(storage.keys().await.unwrap().is_empty());
        assert!(storage.lookup("portfolio-v1", &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_state_tracking() {
        let storage = CacheStorage::in_memory().await.unwrap();
        assert_eq!(storage.state("portfolio-v1").await.unwrap(), None);

        storage.open("portfolio-v1").await.unwrap();
        assert_eq!(
            storage.state("portfolio-v1").await.unwrap(),
            Some(LifecycleState::Installing)
        );

        storage
            .set_state("portfolio-v1", LifecycleState::Active)
            .await
            .unwrap();
        let summaries = storage.summaries().await.unwrap();
        assert_eq!(summaries.len(), 1);
        assert_eq!(summaries[0].state, LifecycleState::Active);
        assert_eq!(summaries[0].entries, 0);
    }
}
