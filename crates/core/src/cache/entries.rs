//! Cached response entries: snapshot type and CRUD operations.
//!
//! Entries are keyed by (bucket, URL); only GET responses are ever stored.
//! Concurrent writers to the same key race with last-write-wins, which is
//! acceptable because every cached response is re-derivable from the
//! network.

use super::connection::CacheDb;
use super::hash::compute_entry_key;
use crate::Error;
use serde::{Deserialize, Serialize};
use tokio_rusqlite::params;
use tokio_rusqlite::rusqlite;

/// An immutable capture of a fetched response at the moment it was cached.
///
/// The snapshot owns its bytes; the live response stream is consumed once
/// by the requester, so strategies store a copy.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResponseSnapshot {
    pub url: String,
    pub status: u16,
    pub content_type: Option<String>,
    pub headers_json: Option<String>,
    pub body: Vec<u8>,
    pub fetched_at: String,
}

impl ResponseSnapshot {
    /// Capture a response, stamping the current time.
    pub fn capture(
        url: &str,
        status: u16,
        content_type: Option<String>,
        headers_json: Option<String>,
        body: Vec<u8>,
    ) -> Self {
        Self {
            url: url.to_string(),
            status,
            content_type,
            headers_json,
            body,
            fetched_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    /// Whether the captured status is 2xx.
    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

impl CacheDb {
    /// Insert or overwrite a cached response under the given bucket.
    ///
    /// Uses UPSERT semantics keyed on the content-addressed entry key.
    /// The bucket row is created if it does not exist yet.
    pub async fn put_entry(&self, bucket: &str, snapshot: &ResponseSnapshot) -> Result<(), Error> {
        let bucket = bucket.to_string();
        let key = compute_entry_key(&bucket, &snapshot.url);
        let snapshot = snapshot.clone();
        let bucket_created_at = chrono::Utc::now().to_rfc3339();
        self.conn
            .call(move |conn| -> Result<(), Error> {
                conn.execute(
                    "INSERT OR IGNORE INTO buckets (name, created_at) VALUES (?1, ?2)",
                    params![bucket, bucket_created_at],
                )?;
                conn.execute(
                    "INSERT INTO entries (
                        key, bucket, url, status, content_type, headers_json, body, fetched_at
                    ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
                    ON CONFLICT(key) DO UPDATE SET
                        status = excluded.status,
                        content_type = excluded.content_type,
                        headers_json = excluded.headers_json,
                        body = excluded.body,
                        fetched_at = excluded.fetched_at",
                    params![
                        key,
                        bucket,
                        &snapshot.url,
                        snapshot.status as i64,
                        &snapshot.content_type,
                        &snapshot.headers_json,
                        &snapshot.body,
                        &snapshot.fetched_at,
                    ],
                )?;
                Ok(())
            })
            .await
            .map_err(Error::from)
    }

    /// Look up a cached response by URL within the given bucket.
    ///
    /// Returns None on a cache miss.
    pub async fn match_entry(&self, bucket: &str, url: &str) -> Result<Option<ResponseSnapshot>, Error> {
        let key = compute_entry_key(bucket, url);
        self.conn
            .call(move |conn| -> Result<Option<ResponseSnapshot>, Error> {
                let mut stmt = conn.prepare(
                    "SELECT url, status, content_type, headers_json, body, fetched_at
                     FROM entries WHERE key = ?1",
                )?;

                let result = stmt.query_row(params![key], |row| {
                    Ok(ResponseSnapshot {
                        url: row.get(0)?,
                        status: row.get::<_, i64>(1)? as u16,
                        content_type: row.get(2)?,
                        headers_json: row.get(3)?,
                        body: row.get(4)?,
                        fetched_at: row.get(5)?,
                    })
                });

                match result {
                    Ok(s) => Ok(Some(s)),
                    Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
                    Err(e) => Err(e.into()),
                }
            })
            .await
            .map_err(Error::from)
    }

    /// List the URLs cached under a bucket.
    pub async fn entry_urls(&self, bucket: &str) -> Result<Vec<String>, Error> {
        let bucket = bucket.to_string();
        self.conn
            .call(move |conn| -> Result<Vec<String>, Error> {
                let mut stmt = conn.prepare("SELECT url FROM entries WHERE bucket = ?1 ORDER BY url ASC")?;
                let urls = stmt
                    .query_map(params![bucket], |row| row.get::<_, String>(0))?
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(urls)
            })
            .await
            .map_err(Error::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_snapshot(url: &str, body: &[u8]) -> ResponseSnapshot {
        ResponseSnapshot::capture(url, 200, Some("text/html".to_string()), None, body.to_vec())
    }

    #[tokio::test]
    async fn test_put_and_match() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let snapshot = make_snapshot("https://calio.app/index.html", b"<html></html>");

        db.put_entry("calio-v1", &snapshot).await.unwrap();

        let found = db.match_entry("calio-v1", "https://calio.app/index.html").await.unwrap().unwrap();
        assert_eq!(found.url, snapshot.url);
        assert_eq!(found.body, snapshot.body);
        assert!(found.is_ok());
    }

    #[tokio::test]
    async fn test_match_missing() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let result = db.match_entry("calio-v1", "https://calio.app/nope").await.unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_match_is_bucket_scoped() {
        let db = CacheDb::open_in_memory().await.unwrap();
        let snapshot = make_snapshot("https://calio.app/index.html", b"v1");
        db.put_entry("calio-v1", &snapshot).await.unwrap();

        let other = db.match_entry("calio-v2", "https://calio.app/index.html").await.unwrap();
        assert!(other.is_none());
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_entry("calio-v1", &make_snapshot("https://calio.app/app.js", b"old"))
            .await
            .unwrap();
        db.put_entry("calio-v1", &make_snapshot("https://calio.app/app.js", b"new"))
            .await
            .unwrap();

        let found = db.match_entry("calio-v1", "https://calio.app/app.js").await.unwrap().unwrap();
        assert_eq!(found.body, b"new");

        let urls = db.entry_urls("calio-v1").await.unwrap();
        assert_eq!(urls.len(), 1);
    }

    #[tokio::test]
    async fn test_entry_urls() {
        let db = CacheDb::open_in_memory().await.unwrap();
        db.put_entry("calio-v1", &make_snapshot("https://calio.app/b", b"b"))
            .await
            .unwrap();
        db.put_entry("calio-v1", &make_snapshot("https://calio.app/a", b"a"))
            .await
            .unwrap();

        let urls = db.entry_urls("calio-v1").await.unwrap();
        assert_eq!(urls, vec!["https://calio.app/a", "https://calio.app/b"]);
    }

    #[test]
    fn test_snapshot_is_ok_bounds() {
        let ok = ResponseSnapshot::capture("https://calio.app/", 299, None, None, Vec::new());
        assert!(ok.is_ok());
        let not_ok = ResponseSnapshot::capture("https://calio.app/", 404, None, None, Vec::new());
        assert!(!not_ok.is_ok());
    }
}
