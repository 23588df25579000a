//! SQL schema for the Roster SQLite store.
//!
//! Executed once at connection startup. Future migrations will be gated on
//! `PRAGMA user_version`.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

-- `seq` fixes insertion order and is never reused (AUTOINCREMENT).
CREATE TABLE IF NOT EXISTS employees (
    seq             INTEGER PRIMARY KEY AUTOINCREMENT,
    employee_id     TEXT NOT NULL UNIQUE,
    name            TEXT NOT NULL CHECK (name <> ''),
    address         TEXT NOT NULL CHECK (address <> ''),
    email           TEXT NOT NULL,
    email_key       TEXT NOT NULL,   -- lowercase email; uniqueness key
    dob             TEXT NOT NULL,   -- YYYY-MM-DD
    gender          TEXT NOT NULL CHECK (gender IN ('Male', 'Female')),
    date_of_joining TEXT NOT NULL,   -- YYYY-MM-DD
    marital_status  TEXT NOT NULL
                    CHECK (marital_status IN ('Single', 'Married', 'Divorced', 'Widowed')),
    contact_no      TEXT NOT NULL CHECK (length(contact_no) = 10)
);

CREATE UNIQUE INDEX IF NOT EXISTS employees_email_key_idx ON employees(email_key);

PRAGMA user_version = 1;
";
