use crate::error::VaultError;
use crate::types::{Token, Vault};
use serde::Serialize;
use tracing::info;

/// Outcome of a withdrawal request. `simulated` stays `true` until a real
/// settlement backend exists.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct WithdrawReceipt {
    pub vault_id: u64,
    pub token: Token,
    pub amount: f64,
    pub simulated: bool,
}

/// Seam between vault bookkeeping and fund movement. Swapping in a real
/// settlement backend must not require touching callers.
pub trait Settlement: Send + Sync {
    fn withdraw(&self, vault: &Vault) -> Result<WithdrawReceipt, VaultError>;
}

/// Settlement stand-in: acknowledges the withdrawal without moving funds or
/// mutating the vault.
#[derive(Debug, Clone, Copy, Default)]
pub struct SimulatedSettlement;

impl Settlement for SimulatedSettlement {
    fn withdraw(&self, vault: &Vault) -> Result<WithdrawReceipt, VaultError> {
        info!(vault_id = vault.id, amount = vault.deposit, "simulated withdrawal");
        Ok(WithdrawReceipt {
            vault_id: vault.id,
            token: vault.token,
            amount: vault.deposit,
            simulated: true,
        })
    }
}
