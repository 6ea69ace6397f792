//! SQLite schema for the key-value slot table.

/// Schema applied when a SQLite slot is opened.
pub const SCHEMA: &str = r#"
-- ============================================================================
-- Key-value slots
-- ============================================================================

CREATE TABLE IF NOT EXISTS kv_slots (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL,                          -- serialized envelope JSON
    updated_at TEXT NOT NULL DEFAULT (datetime('now'))
);
"#;
