//! SQLite store backend with FTS5 full-text search and BM25 ranking.

use rusqlite::Connection;
use std::path::Path;
use std::sync::Mutex;

use schemebot_core::error::{Result, SchemebotError};
use schemebot_core::types::{Intent, QueryLogEntry, Scheme};

use crate::store::{SchemeStore, ScoredIntent};

pub struct SqliteSchemeStore {
    conn: Mutex<Connection>,
}

impl SqliteSchemeStore {
    /// Open (or create) the store at the given path and bootstrap the schema.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path).map_err(|e| SchemebotError::Store(e.to_string()))?;
        Self::bootstrap(conn)
    }

    /// Open an in-memory store (tests, throwaway sessions).
    pub fn open_in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().map_err(|e| SchemebotError::Store(e.to_string()))?;
        Self::bootstrap(conn)
    }

    fn bootstrap(conn: Connection) -> Result<Self> {
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS schemes (
                id INTEGER PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT,
                eligibility TEXT,
                benefits TEXT,
                application_process TEXT,
                documents_required TEXT NOT NULL DEFAULT '[]',
                keywords TEXT NOT NULL DEFAULT '[]'
            );
            CREATE TABLE IF NOT EXISTS scheme_keywords (
                scheme_id INTEGER NOT NULL,
                keyword TEXT NOT NULL
            );
            CREATE TABLE IF NOT EXISTS intents (
                id INTEGER PRIMARY KEY,
                intent TEXT NOT NULL UNIQUE,
                patterns TEXT NOT NULL DEFAULT '[]',
                responses TEXT NOT NULL DEFAULT '[]',
                list_all INTEGER NOT NULL DEFAULT 0
            );
            CREATE TABLE IF NOT EXISTS query_log (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                query TEXT NOT NULL,
                tokens TEXT NOT NULL DEFAULT '[]',
                response TEXT NOT NULL,
                created_at TEXT DEFAULT (datetime('now'))
            );",
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;

        // FTS5 virtual tables for fast full-text search with BM25 ranking
        conn.execute_batch(
            "CREATE VIRTUAL TABLE IF NOT EXISTS schemes_fts USING fts5(
                scheme_id UNINDEXED,
                name,
                description,
                eligibility,
                benefits,
                keywords,
                tokenize='unicode61'
            );
            CREATE VIRTUAL TABLE IF NOT EXISTS intents_fts USING fts5(
                intent_id UNINDEXED,
                intent,
                patterns,
                tokenize='unicode61'
            );",
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;

        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn lock(&self) -> Result<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| SchemebotError::Store(e.to_string()))
    }

    /// Insert a scheme record and index it for full-text and keyword search.
    /// Schemes are keyed by name: re-inserting replaces the previous record
    /// and its index rows, so re-seeding is idempotent.
    pub fn insert_scheme(&self, scheme: &Scheme) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM schemes_fts WHERE scheme_id IN (SELECT id FROM schemes WHERE name = ?1)",
            rusqlite::params![scheme.name],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;
        conn.execute(
            "DELETE FROM scheme_keywords WHERE scheme_id IN (SELECT id FROM schemes WHERE name = ?1)",
            rusqlite::params![scheme.name],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;
        conn.execute(
            "DELETE FROM schemes WHERE name = ?1",
            rusqlite::params![scheme.name],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;

        conn.execute(
            "INSERT INTO schemes (name, description, eligibility, benefits, application_process, documents_required, keywords)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            rusqlite::params![
                scheme.name,
                scheme.description,
                scheme.eligibility,
                scheme.benefits,
                scheme.application_process,
                serde_json::to_string(&scheme.documents_required).unwrap_or_else(|_| "[]".into()),
                serde_json::to_string(&scheme.keywords).unwrap_or_else(|_| "[]".into()),
            ],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;
        let id = conn.last_insert_rowid();

        conn.execute(
            "INSERT INTO schemes_fts (scheme_id, name, description, eligibility, benefits, keywords)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
            rusqlite::params![
                id,
                scheme.name,
                scheme.description.as_deref().unwrap_or(""),
                scheme.eligibility.as_deref().unwrap_or(""),
                scheme.benefits.as_deref().unwrap_or(""),
                scheme.keywords.join(" "),
            ],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;

        for keyword in &scheme.keywords {
            conn.execute(
                "INSERT INTO scheme_keywords (scheme_id, keyword) VALUES (?1, ?2)",
                rusqlite::params![id, keyword.to_lowercase()],
            )
            .map_err(|e| SchemebotError::Store(e.to_string()))?;
        }
        Ok(())
    }

    /// Insert an intent record and index its patterns for relevance lookup.
    /// Keyed by label, same replace-on-reinsert behavior as `insert_scheme`.
    pub fn insert_intent(&self, intent: &Intent) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "DELETE FROM intents_fts WHERE intent_id IN (SELECT id FROM intents WHERE intent = ?1)",
            rusqlite::params![intent.intent],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;
        conn.execute(
            "DELETE FROM intents WHERE intent = ?1",
            rusqlite::params![intent.intent],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;

        conn.execute(
            "INSERT INTO intents (intent, patterns, responses, list_all)
             VALUES (?1, ?2, ?3, ?4)",
            rusqlite::params![
                intent.intent,
                serde_json::to_string(&intent.patterns).unwrap_or_else(|_| "[]".into()),
                serde_json::to_string(&intent.responses).unwrap_or_else(|_| "[]".into()),
                intent.list_all as i64,
            ],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;
        let id = conn.last_insert_rowid();

        conn.execute(
            "INSERT INTO intents_fts (intent_id, intent, patterns) VALUES (?1, ?2, ?3)",
            rusqlite::params![id, intent.intent, intent.patterns.join(" ")],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;
        Ok(())
    }

    /// Number of rows in the query log (offline-analysis tooling).
    pub fn count_query_log(&self) -> Result<u64> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM query_log", [], |r| r.get::<_, i64>(0))
            .map(|n| n as u64)
            .map_err(|e| SchemebotError::Store(e.to_string()))
    }
}

/// Strip characters that FTS5 query syntax would choke on.
fn sanitize_fts(query: &str) -> String {
    query
        .chars()
        .filter(|c| c.is_alphanumeric() || c.is_whitespace() || *c == '_')
        .collect::<String>()
        .trim()
        .to_string()
}

fn scheme_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Scheme> {
    Ok(Scheme {
        name: row.get(0)?,
        description: row.get(1)?,
        eligibility: row.get(2)?,
        benefits: row.get(3)?,
        application_process: row.get(4)?,
        documents_required: row
            .get::<_, String>(5)
            .map(|s| serde_json::from_str(&s).unwrap_or_default())
            .unwrap_or_default(),
        keywords: row
            .get::<_, String>(6)
            .map(|s| serde_json::from_str(&s).unwrap_or_default())
            .unwrap_or_default(),
    })
}

const SCHEME_COLUMNS: &str =
    "s.name, s.description, s.eligibility, s.benefits, s.application_process, s.documents_required, s.keywords";

impl SchemeStore for SqliteSchemeStore {
    fn find_intents_by_relevance(&self, text: &str) -> Result<Vec<ScoredIntent>> {
        let clean = sanitize_fts(text);
        if clean.is_empty() {
            return Ok(Vec::new());
        }
        let match_expr = clean.split_whitespace().collect::<Vec<_>>().join(" OR ");

        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(
                "SELECT i.intent, i.patterns, i.responses, i.list_all, bm25(intents_fts) AS score
                 FROM intents_fts f
                 JOIN intents i ON i.id = f.intent_id
                 WHERE intents_fts MATCH ?1
                 ORDER BY score",
            )
            .map_err(|e| SchemebotError::Store(e.to_string()))?;

        let rows = stmt
            .query_map(rusqlite::params![match_expr], |row| {
                Ok(ScoredIntent {
                    intent: Intent {
                        intent: row.get(0)?,
                        patterns: row
                            .get::<_, String>(1)
                            .map(|s| serde_json::from_str(&s).unwrap_or_default())
                            .unwrap_or_default(),
                        responses: row
                            .get::<_, String>(2)
                            .map(|s| serde_json::from_str(&s).unwrap_or_default())
                            .unwrap_or_default(),
                        list_all: row.get::<_, i64>(3)? != 0,
                    },
                    // BM25 returns negative scores; lower is better
                    score: row.get::<_, f32>(4).unwrap_or(0.0).abs(),
                })
            })
            .map_err(|e| SchemebotError::Store(e.to_string()))?;

        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn find_schemes_by_phrase(&self, phrase: &str, limit: usize) -> Result<Vec<Scheme>> {
        let clean = sanitize_fts(phrase);
        if clean.is_empty() {
            return Ok(Vec::new());
        }
        let match_expr = format!("\"{clean}\"");

        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SCHEME_COLUMNS}
                 FROM schemes_fts f
                 JOIN schemes s ON s.id = f.scheme_id
                 WHERE schemes_fts MATCH ?1
                 ORDER BY bm25(schemes_fts)
                 LIMIT ?2"
            ))
            .map_err(|e| SchemebotError::SearchUnavailable(e.to_string()))?;

        let rows = stmt
            .query_map(rusqlite::params![match_expr, limit as i64], scheme_from_row)
            .map_err(|e| SchemebotError::SearchUnavailable(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn find_schemes_by_terms(&self, terms: &[String], limit: usize) -> Result<Vec<Scheme>> {
        let clean: Vec<String> = terms
            .iter()
            .map(|t| sanitize_fts(t))
            .filter(|t| !t.is_empty())
            .collect();
        if clean.is_empty() {
            return Ok(Vec::new());
        }
        let match_expr = clean.join(" OR ");

        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&format!(
                "SELECT {SCHEME_COLUMNS}
                 FROM schemes_fts f
                 JOIN schemes s ON s.id = f.scheme_id
                 WHERE schemes_fts MATCH ?1
                 ORDER BY bm25(schemes_fts)
                 LIMIT ?2"
            ))
            .map_err(|e| SchemebotError::SearchUnavailable(e.to_string()))?;

        let rows = stmt
            .query_map(rusqlite::params![match_expr, limit as i64], scheme_from_row)
            .map_err(|e| SchemebotError::SearchUnavailable(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn find_schemes_by_keyword_overlap(
        &self,
        keywords: &[String],
        limit: usize,
    ) -> Result<Vec<(Scheme, usize)>> {
        if keywords.is_empty() {
            return Ok(Vec::new());
        }
        let placeholders = (1..=keywords.len())
            .map(|i| format!("?{i}"))
            .collect::<Vec<_>>()
            .join(", ");
        let sql = format!(
            "SELECT {SCHEME_COLUMNS}, COUNT(k.keyword) AS overlap
             FROM schemes s
             JOIN scheme_keywords k ON k.scheme_id = s.id
             WHERE k.keyword IN ({placeholders})
             GROUP BY s.id
             ORDER BY overlap DESC, s.id ASC
             LIMIT ?{}",
            keywords.len() + 1
        );

        let mut values: Vec<rusqlite::types::Value> = keywords
            .iter()
            .map(|k| rusqlite::types::Value::Text(k.to_lowercase()))
            .collect();
        values.push(rusqlite::types::Value::Integer(limit as i64));

        let conn = self.lock()?;
        let mut stmt = conn
            .prepare(&sql)
            .map_err(|e| SchemebotError::Store(e.to_string()))?;
        let rows = stmt
            .query_map(rusqlite::params_from_iter(values), |row| {
                let scheme = scheme_from_row(row)?;
                let overlap: i64 = row.get(7)?;
                Ok((scheme, overlap as usize))
            })
            .map_err(|e| SchemebotError::Store(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn list_all_scheme_names(&self) -> Result<Vec<String>> {
        let conn = self.lock()?;
        let mut stmt = conn
            .prepare("SELECT name FROM schemes ORDER BY id")
            .map_err(|e| SchemebotError::Store(e.to_string()))?;
        let rows = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .map_err(|e| SchemebotError::Store(e.to_string()))?;
        Ok(rows.filter_map(|r| r.ok()).collect())
    }

    fn append_query_log(&self, entry: &QueryLogEntry) -> Result<()> {
        let conn = self.lock()?;
        conn.execute(
            "INSERT INTO query_log (query, tokens, response) VALUES (?1, ?2, ?3)",
            rusqlite::params![
                entry.query,
                serde_json::to_string(&entry.tokens).unwrap_or_else(|_| "[]".into()),
                entry.response,
            ],
        )
        .map_err(|e| SchemebotError::Store(e.to_string()))?;
        Ok(())
    }

    fn count_schemes(&self) -> Result<u64> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM schemes", [], |r| r.get::<_, i64>(0))
            .map(|n| n as u64)
            .map_err(|e| SchemebotError::Store(e.to_string()))
    }

    fn count_intents(&self) -> Result<u64> {
        let conn = self.lock()?;
        conn.query_row("SELECT COUNT(*) FROM intents", [], |r| r.get::<_, i64>(0))
            .map(|n| n as u64)
            .map_err(|e| SchemebotError::Store(e.to_string()))
    }
}
