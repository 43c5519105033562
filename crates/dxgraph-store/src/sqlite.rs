//! Read-only SQLite graph store.
//!
//! Every `execute` call opens its own read-only connection, bounds it with a
//! busy timeout plus a progress-handler deadline, runs the statement and
//! drops the connection before returning. Nothing outlives a single call.

#![cfg(feature = "sqlite")]

use dxgraph_core::error::QueryFailure;
use dxgraph_core::query::{fields, Binding, PatternQuery, QueryParams};
use dxgraph_core::store::GraphStore;
use rusqlite::{params_from_iter, Connection, ErrorCode, OpenFlags};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::error::StoreError;

/// Tables the store reads. `kind` holds `INDICATES` or `TREATED_BY`;
/// `src`/`dst` hold node names.
pub const SCHEMA: &str = r#"
CREATE TABLE IF NOT EXISTS nodes (
    label TEXT NOT NULL,
    name TEXT NOT NULL,
    PRIMARY KEY (label, name)
);

CREATE TABLE IF NOT EXISTS relations (
    kind TEXT NOT NULL,
    src TEXT NOT NULL,
    dst TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_relations_src ON relations(kind, src);
CREATE INDEX IF NOT EXISTS idx_relations_dst ON relations(kind, dst);
"#;

/// VM instructions between deadline checks.
const PROGRESS_INTERVAL: i32 = 1_000;

/// SQLite-backed symptom graph, opened read-only per query.
#[derive(Debug, Clone)]
pub struct SqliteGraphStore {
    path: PathBuf,
    timeout: Duration,
}

impl SqliteGraphStore {
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Point the store at an existing database and check its schema.
    pub fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let path = path.as_ref().to_path_buf();
        let conn = Connection::open_with_flags(&path, OpenFlags::SQLITE_OPEN_READ_ONLY)?;
        let tables: i64 = conn.query_row(
            "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name IN ('nodes', 'relations')",
            [],
            |row| row.get(0),
        )?;
        if tables != 2 {
            return Err(StoreError::MissingSchema(path));
        }
        info!(path = %path.display(), "opened SQLite graph store");
        Ok(Self {
            path,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    fn connect(&self) -> Result<Connection, QueryFailure> {
        let conn = Connection::open_with_flags(
            &self.path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| self.failure(e))?;
        conn.busy_timeout(self.timeout).map_err(|e| self.failure(e))?;

        let deadline = Instant::now() + self.timeout;
        conn.progress_handler(PROGRESS_INTERVAL, Some(move || Instant::now() >= deadline));
        debug!(path = %self.path.display(), "acquired read-only connection");
        Ok(conn)
    }

    fn failure(&self, err: rusqlite::Error) -> QueryFailure {
        match &err {
            rusqlite::Error::SqliteFailure(e, _) => match e.code {
                ErrorCode::OperationInterrupted
                | ErrorCode::DatabaseBusy
                | ErrorCode::DatabaseLocked => QueryFailure::Timeout(self.timeout),
                ErrorCode::CannotOpen
                | ErrorCode::NotADatabase
                | ErrorCode::PermissionDenied
                | ErrorCode::SystemIoFailure => QueryFailure::connection(err.to_string()),
                _ => QueryFailure::backend(err.to_string()),
            },
            _ => QueryFailure::backend(err.to_string()),
        }
    }

    fn disease_rows(conn: &Connection, params: &QueryParams) -> rusqlite::Result<Vec<Binding>> {
        if params.symptoms.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = vec!["?"; params.symptoms.len()].join(", ");
        let sql = format!(
            "WITH candidates AS (
                SELECT DISTINCT dst AS disease FROM relations
                WHERE kind = 'INDICATES' AND src IN ({placeholders})
            )
            SELECT c.disease, 'symptom', r.src FROM candidates c
                JOIN relations r ON r.kind = 'INDICATES' AND r.dst = c.disease
            UNION ALL
            SELECT c.disease, 'medicine', r.dst FROM candidates c
                JOIN relations r ON r.kind = 'TREATED_BY' AND r.src = c.disease"
        );

        let mut stmt = conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(params.symptoms.iter()))?;

        // disease -> (symptoms, medicines)
        let mut grouped: BTreeMap<String, (Vec<String>, Vec<String>)> = BTreeMap::new();
        while let Some(row) = rows.next()? {
            let disease: String = row.get(0)?;
            let kind: String = row.get(1)?;
            let name: String = row.get(2)?;
            let entry = grouped.entry(disease).or_default();
            if kind == "symptom" {
                entry.0.push(name);
            } else {
                entry.1.push(name);
            }
        }

        Ok(grouped
            .into_iter()
            .map(|(disease, (symptoms, medicines))| {
                Binding::new()
                    .with(fields::DISEASE, disease)
                    .with(fields::SYMPTOMS, symptoms)
                    .with(fields::MEDICINES, medicines)
            })
            .collect())
    }

    fn symptom_rows(conn: &Connection) -> rusqlite::Result<Vec<Binding>> {
        let mut stmt =
            conn.prepare("SELECT name FROM nodes WHERE label = 'Symptom' ORDER BY name")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(Binding::new().with(fields::SYMPTOM, row.get::<_, String>(0)?))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }

    fn count_rows(conn: &Connection) -> rusqlite::Result<Vec<Binding>> {
        let mut stmt = conn.prepare(
            "SELECT label, COUNT(*) FROM nodes GROUP BY label
             UNION ALL
             SELECT kind, COUNT(*) FROM relations GROUP BY kind",
        )?;
        let rows = stmt
            .query_map([], |row| {
                let label: String = row.get(0)?;
                let count: i64 = row.get(1)?;
                Ok(Binding::new()
                    .with(fields::LABEL, label)
                    .with(fields::COUNT, count.max(0) as u64))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
    }
}

impl GraphStore for SqliteGraphStore {
    fn execute(&self, query: &PatternQuery, params: &QueryParams)
        -> Result<Vec<Binding>, QueryFailure> {
        let conn = self.connect()?;
        let rows = match query {
            // The engine applies the policy; every candidate is returned.
            PatternQuery::DiseasesBySymptoms { .. } => Self::disease_rows(&conn, params),
            PatternQuery::SymptomNames => Self::symptom_rows(&conn),
            PatternQuery::Counts => Self::count_rows(&conn),
        }
        .map_err(|e| self.failure(e))?;
        debug!(?query, rows = rows.len(), "sqlite store executed query");
        Ok(rows)
    }
}
