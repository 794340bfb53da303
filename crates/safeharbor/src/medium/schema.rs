//! `SQLite` schema definitions for the record medium.

/// SQL statement to create the records table.
///
/// One row per record key. The whole serialized record lives in `value`.
pub const CREATE_RECORDS_TABLE: &str = r"
CREATE TABLE IF NOT EXISTS records (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,
    updated_at TEXT NOT NULL
)
";

/// All schema creation statements in order.
pub const SCHEMA_STATEMENTS: &[&str] = &[CREATE_RECORDS_TABLE];

/// Replace a record in a single statement.
pub const UPSERT_RECORD: &str = r"
INSERT OR REPLACE INTO records (key, value, updated_at) VALUES (?1, ?2, ?3)
";

/// Read a record's value.
pub const SELECT_RECORD: &str = "SELECT value FROM records WHERE key = ?1";

/// Read when a record was last replaced.
pub const SELECT_UPDATED_AT: &str = "SELECT updated_at FROM records WHERE key = ?1";

/// Delete a record.
pub const DELETE_RECORD: &str = "DELETE FROM records WHERE key = ?1";
