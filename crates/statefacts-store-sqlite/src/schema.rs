//! SQL schema for the statefacts SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- One row per state. Rows are created by seeding, never by request handlers,
-- and are never deleted.
CREATE TABLE IF NOT EXISTS fun_facts (
    state_code  TEXT PRIMARY KEY,             -- two uppercase letters
    funfacts    TEXT NOT NULL DEFAULT '[]'    -- JSON array of strings, display order
);

PRAGMA user_version = 1;
";
