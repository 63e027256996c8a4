pub mod account;
pub mod vaults;
