//! SQL DDL for initializing the record storage.
//! SQLite-first design; can be adapted for other RDBMS.

/// Single key-value table holding JSON-serialized records.
///
/// Key layout (the storage contract consumed by the service layer):
/// - `session_user`             -> User (the session pointer)
/// - `users_<username>`         -> User (profile record)
/// - `credentials_<username>`   -> Credential
/// - `vaults`                   -> [Vault]
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS kv_records (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);
"#;
