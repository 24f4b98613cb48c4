//! Persistent SQLite slide backend with lazy connection setup.
//!
//! # Responsibility
//! - Own the file-backed slide collection and its cached connection handle.
//! - Map SQLite rows to the canonical `Slide` shape.
//!
//! # Invariants
//! - At most one underlying connection exists at any time; the
//!   `Disconnected -> Connecting -> Connected` transition happens under the
//!   connection mutex, so racing first accesses share one handle.
//! - `release` returns the backend to its pre-connection state; the next
//!   access re-establishes the connection.

use crate::db::{open_db, DbError};
use crate::model::slide::{Slide, SlideId};
use crate::repo::slide_repo::{RepoError, RepoResult, SlideBackend, SlideListQuery};
use log::info;
use rusqlite::types::Value;
use rusqlite::{params, params_from_iter, Connection, Row};
use std::path::PathBuf;
use std::sync::Mutex;
use uuid::Uuid;

const SLIDE_SELECT_SQL: &str = "SELECT
    id,
    subject,
    body,
    author,
    created_at
FROM slides";

/// SQLite-backed slide repository.
///
/// Construction is cheap and performs no I/O; the database file is opened and
/// migrated on first use.
pub struct SqliteSlideBackend {
    path: PathBuf,
    conn: Mutex<Option<Connection>>,
}

impl SqliteSlideBackend {
    /// Creates a backend for the given database file without connecting.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            conn: Mutex::new(None),
        }
    }

    /// Runs `op` against the cached connection, establishing it first when
    /// needed. Holding the mutex across open+bootstrap is what guarantees a
    /// single connection under concurrent first access.
    fn with_conn<T>(&self, op: impl FnOnce(&Connection) -> RepoResult<T>) -> RepoResult<T> {
        let mut guard = self
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if guard.is_none() {
            *guard = Some(open_db(&self.path)?);
            info!("event=backend_connect module=repo status=ok backend=sqlite");
        }

        let conn = guard.as_ref().expect("connection established above");
        op(conn)
    }
}

impl SlideBackend for SqliteSlideBackend {
    fn list_ordered(&self, query: &SlideListQuery) -> RepoResult<Vec<Slide>> {
        self.with_conn(|conn| {
            let mut sql = format!("{SLIDE_SELECT_SQL} ORDER BY created_at DESC, id ASC");
            let mut bind_values: Vec<Value> = Vec::new();

            if let Some(limit) = query.limit {
                sql.push_str(" LIMIT ?");
                bind_values.push(Value::Integer(i64::from(limit)));
                if query.offset > 0 {
                    sql.push_str(" OFFSET ?");
                    bind_values.push(Value::Integer(offset_to_i64(query.offset)?));
                }
            } else if query.offset > 0 {
                sql.push_str(" LIMIT -1 OFFSET ?");
                bind_values.push(Value::Integer(offset_to_i64(query.offset)?));
            }

            let mut stmt = conn.prepare(&sql)?;
            let mut rows = stmt.query(params_from_iter(bind_values))?;
            let mut slides = Vec::new();

            while let Some(row) = rows.next()? {
                slides.push(parse_slide_row(row)?);
            }

            Ok(slides)
        })
    }

    fn fetch_by_id(&self, id: SlideId) -> RepoResult<Option<Slide>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare(&format!("{SLIDE_SELECT_SQL} WHERE id = ?1"))?;
            let mut rows = stmt.query(params![id.to_string()])?;

            if let Some(row) = rows.next()? {
                return Ok(Some(parse_slide_row(row)?));
            }

            Ok(None)
        })
    }

    fn insert(&self, slide: &Slide) -> RepoResult<()> {
        slide.validate()?;

        self.with_conn(|conn| {
            let inserted = conn.execute(
                "INSERT OR IGNORE INTO slides (id, subject, body, author, created_at)
                 VALUES (?1, ?2, ?3, ?4, ?5);",
                params![
                    slide.id.to_string(),
                    slide.subject.as_str(),
                    slide.body.as_str(),
                    slide.author.as_str(),
                    slide.created_at,
                ],
            )?;

            if inserted == 0 {
                return Err(RepoError::DuplicateId(slide.id));
            }

            Ok(())
        })
    }

    fn count(&self) -> RepoResult<u64> {
        self.with_conn(|conn| {
            let total: i64 = conn.query_row("SELECT COUNT(*) FROM slides;", [], |row| row.get(0))?;
            Ok(total as u64)
        })
    }

    fn release(&self) -> RepoResult<()> {
        let mut guard = self
            .conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());

        if let Some(conn) = guard.take() {
            conn.close()
                .map_err(|(_conn, err)| RepoError::Db(DbError::Sqlite(err)))?;
            info!("event=backend_release module=repo status=ok backend=sqlite");
        }

        Ok(())
    }
}

fn parse_slide_row(row: &Row<'_>) -> RepoResult<Slide> {
    let id_text: String = row.get("id")?;
    let id = Uuid::parse_str(&id_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{id_text}` in slides.id"))
    })?;

    let slide = Slide {
        id,
        subject: row.get("subject")?,
        body: row.get("body")?,
        author: row.get("author")?,
        created_at: row.get("created_at")?,
    };
    slide.validate()?;
    Ok(slide)
}

fn offset_to_i64(offset: u64) -> RepoResult<i64> {
    i64::try_from(offset)
        .map_err(|_| RepoError::InvalidData(format!("list offset {offset} exceeds i64 range")))
}
