pub mod entities;
pub mod requests;

pub use entities::{Credential, Token, User, Vault};
