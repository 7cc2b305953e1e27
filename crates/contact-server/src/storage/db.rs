//! SQLite database layer (embedded, no external dependencies)
//!
//! Every operation opens its own connection and drops it on return, on the
//! success path and on every `?` alike. SQLite serializes concurrent writers.

use anyhow::{Context, Result};
use contact_types::{Contact, ContactStats, DailyCount, NewContact, RECENT_DAYS};
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode};
use sqlx::{ConnectOptions, SqliteConnection};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// How long a writer waits on a locked database before failing
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

pub struct Database {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl Database {
    /// Open (creating if needed) the database file and make sure the
    /// `contacts` table exists. Safe to call on every start.
    pub async fn new(database_path: &Path) -> Result<Self> {
        tracing::info!("Opening SQLite database at: {}", database_path.display());

        if let Some(parent) = database_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.with_context(|| {
                format!("Failed to create database directory: {}", parent.display())
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(database_path)
            .create_if_missing(true)
            // Rollback journal keeps the store to a single file between writes
            .journal_mode(SqliteJournalMode::Delete)
            .busy_timeout(BUSY_TIMEOUT);

        let db = Self {
            path: database_path.to_path_buf(),
            options,
        };

        db.init().await.context("Failed to initialize contacts table")?;

        tracing::info!("Database initialization complete");
        Ok(db)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn connect(&self) -> Result<SqliteConnection> {
        self.options.connect().await.with_context(|| {
            format!(
                "Failed to connect to SQLite database at: {}",
                self.path.display()
            )
        })
    }

    async fn init(&self) -> Result<()> {
        let mut conn = self.connect().await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS contacts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                phone TEXT NOT NULL,
                grade TEXT NOT NULL,
                created_at TEXT NOT NULL DEFAULT CURRENT_TIMESTAMP,
                status TEXT DEFAULT 'pending'
            )
            "#,
        )
        .execute(&mut conn)
        .await?;

        Ok(())
    }

    /// Store a validated submission and return its new id.
    pub async fn insert_contact(&self, contact: &NewContact, created_at: &str) -> Result<i64> {
        let mut conn = self.connect().await?;

        let result = sqlx::query(
            r#"
            INSERT INTO contacts (name, phone, grade, created_at)
            VALUES (?1, ?2, ?3, ?4)
            "#,
        )
        .bind(&contact.name)
        .bind(&contact.phone)
        .bind(&contact.grade)
        .bind(created_at)
        .execute(&mut conn)
        .await?;

        Ok(result.last_insert_rowid())
    }

    /// All contacts, newest first.
    pub async fn list_contacts(&self) -> Result<Vec<Contact>> {
        let mut conn = self.connect().await?;

        let rows: Vec<ContactRow> = sqlx::query_as(
            r#"
            SELECT id, name, phone, grade, created_at
            FROM contacts
            ORDER BY created_at DESC
            "#,
        )
        .fetch_all(&mut conn)
        .await?;

        Ok(rows.into_iter().map(|r| r.into()).collect())
    }

    /// Total count plus per-date counts for the most recent dates that have
    /// any submissions. Empty dates are skipped, not reported as zero.
    pub async fn stats(&self) -> Result<ContactStats> {
        let mut conn = self.connect().await?;

        let (total_contacts,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM contacts")
            .fetch_one(&mut conn)
            .await?;

        let recent: Vec<(String, i64)> = sqlx::query_as(
            r#"
            SELECT DATE(created_at) AS date, COUNT(*) AS count
            FROM contacts
            GROUP BY DATE(created_at)
            ORDER BY date DESC
            LIMIT ?1
            "#,
        )
        .bind(RECENT_DAYS)
        .fetch_all(&mut conn)
        .await?;

        Ok(ContactStats {
            total_contacts,
            recent_7_days: recent
                .into_iter()
                .map(|(date, count)| DailyCount { date, count })
                .collect(),
        })
    }
}

// Helper struct for sqlx query_as
#[derive(sqlx::FromRow)]
struct ContactRow {
    id: i64,
    name: String,
    phone: String,
    grade: String,
    created_at: String,
}

impl From<ContactRow> for Contact {
    fn from(r: ContactRow) -> Self {
        Contact {
            id: r.id,
            name: r.name,
            phone: r.phone,
            grade: r.grade,
            created_at: r.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contact(name: &str) -> NewContact {
        NewContact {
            name: name.to_string(),
            phone: "13800138000".to_string(),
            grade: "高三".to_string(),
        }
    }

    async fn open_temp() -> Result<(tempfile::TempDir, Database)> {
        let temp_dir = tempfile::tempdir()?;
        let db = Database::new(&temp_dir.path().join("contacts.db")).await?;
        Ok((temp_dir, db))
    }

    #[tokio::test]
    async fn test_insert_ids_increase() -> Result<()> {
        let (_dir, db) = open_temp().await?;

        let mut last = 0;
        for i in 0..5 {
            let id = db
                .insert_contact(&contact("Al"), &format!("2026-10-19T10:00:0{}.000000", i))
                .await?;
            assert!(id > last, "id {} should be greater than {}", id, last);
            last = id;
        }
        Ok(())
    }

    #[tokio::test]
    async fn test_duplicates_are_accepted() -> Result<()> {
        let (_dir, db) = open_temp().await?;

        let ts = "2026-10-19T10:00:00.000000";
        let first = db.insert_contact(&contact("Al"), ts).await?;
        let second = db.insert_contact(&contact("Al"), ts).await?;
        assert_ne!(first, second);
        assert_eq!(db.list_contacts().await?.len(), 2);
        Ok(())
    }

    #[tokio::test]
    async fn test_list_newest_first() -> Result<()> {
        let (_dir, db) = open_temp().await?;

        db.insert_contact(&contact("First"), "2026-10-17T09:00:00.000000")
            .await?;
        db.insert_contact(&contact("Third"), "2026-10-19T09:00:00.000000")
            .await?;
        db.insert_contact(&contact("Second"), "2026-10-18T09:00:00.000000")
            .await?;

        let contacts = db.list_contacts().await?;
        let names: Vec<_> = contacts.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, ["Third", "Second", "First"]);
        assert_eq!(contacts[0].created_at, "2026-10-19T09:00:00.000000");
        assert_eq!(contacts[0].grade, "高三");
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_database() -> Result<()> {
        let (_dir, db) = open_temp().await?;

        assert!(db.list_contacts().await?.is_empty());
        let stats = db.stats().await?;
        assert_eq!(stats.total_contacts, 0);
        assert!(stats.recent_7_days.is_empty());
        Ok(())
    }

    #[tokio::test]
    async fn test_stats_same_day() -> Result<()> {
        let (_dir, db) = open_temp().await?;

        for hour in ["08", "12", "23"] {
            db.insert_contact(&contact("Al"), &format!("2026-10-19T{}:30:00.000000", hour))
                .await?;
        }

        let stats = db.stats().await?;
        assert_eq!(stats.total_contacts, 3);
        assert_eq!(
            stats.recent_7_days,
            vec![DailyCount {
                date: "2026-10-19".to_string(),
                count: 3
            }]
        );
        Ok(())
    }

    #[tokio::test]
    async fn test_stats_keeps_seven_most_recent_dates() -> Result<()> {
        let (_dir, db) = open_temp().await?;

        // Nine distinct dates with a gap on the 5th, two rows on the 10th
        for day in [1, 2, 3, 4, 6, 7, 8, 9, 10, 10] {
            db.insert_contact(&contact("Al"), &format!("2026-10-{:02}T10:00:00.000000", day))
                .await?;
        }

        let stats = db.stats().await?;
        assert_eq!(stats.total_contacts, 10);

        let dates: Vec<_> = stats.recent_7_days.iter().map(|d| d.date.as_str()).collect();
        assert_eq!(
            dates,
            [
                "2026-10-10",
                "2026-10-09",
                "2026-10-08",
                "2026-10-07",
                "2026-10-06",
                "2026-10-04",
                "2026-10-03"
            ]
        );
        assert_eq!(stats.recent_7_days[0].count, 2);
        assert!(stats.recent_7_days[1..].iter().all(|d| d.count == 1));
        Ok(())
    }

    #[tokio::test]
    async fn test_store_is_a_single_file() -> Result<()> {
        let (dir, db) = open_temp().await?;

        db.insert_contact(&contact("Al"), "2026-10-19T10:00:00.000000")
            .await?;
        db.list_contacts().await?;
        db.stats().await?;

        let mut files: Vec<String> = std::fs::read_dir(dir.path())?
            .map(|entry| entry.map(|e| e.file_name().to_string_lossy().into_owned()))
            .collect::<std::io::Result<_>>()?;
        files.sort();
        assert_eq!(files, ["contacts.db"]);
        Ok(())
    }

    #[tokio::test]
    async fn test_reopen_keeps_rows() -> Result<()> {
        let temp_dir = tempfile::tempdir()?;
        let path = temp_dir.path().join("nested").join("contacts.db");

        let db = Database::new(&path).await?;
        let id = db
            .insert_contact(&contact("Al"), "2026-10-19T10:00:00.000000")
            .await?;
        drop(db);

        let reopened = Database::new(&path).await?;
        let contacts = reopened.list_contacts().await?;
        assert_eq!(contacts.len(), 1);
        assert_eq!(contacts[0].id, id);

        let next = reopened
            .insert_contact(&contact("Bo"), "2026-10-19T11:00:00.000000")
            .await?;
        assert!(next > id);
        Ok(())
    }
}
