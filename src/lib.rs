pub mod config;
pub mod db;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod service;
pub mod types;

pub use error::VaultError;
pub use service::session_ops::SessionOps;
pub use service::vault_ops::VaultOps;
