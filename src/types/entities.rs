use serde::{Deserialize, Serialize};

/// Profile record for a registered account; `username` is the primary key.
/// Also the shape of the session pointer stored under `session_user`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    pub username: String,
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub email: String,
}

/// Stored authentication material, one record per username.
///
/// The password itself is never stored: `password_hash` is
/// SHA-256(salt || password) with a per-record random salt.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub salt: String,
    pub password_hash: String,
}

/// Stablecoin accepted for vault deposits.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Token {
    #[serde(rename = "USDT")]
    Usdt,
    #[serde(rename = "DAI")]
    Dai,
}

/// A health-tagged savings record. `verified` flips false -> true once and
/// gates withdrawal; `deposit` and `yield` never go negative.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Vault {
    pub id: u64,
    pub owner: String,
    pub title: String,
    pub token: Token,
    pub deposit: f64,
    #[serde(rename = "yield")]
    pub yield_amount: f64,
    pub verified: bool,
}

impl Vault {
    /// Next id for a new vault: one past the current maximum, 1 when empty.
    pub fn next_id(existing: &[Vault]) -> u64 {
        existing.iter().map(|v| v.id).max().map_or(1, |max| max + 1)
    }
}
