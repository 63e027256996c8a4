use crate::db::KvStorage;
use crate::error::VaultError;
use crate::service::settlement::{Settlement, SimulatedSettlement, WithdrawReceipt};
use crate::types::{Token, Vault};
use std::sync::Arc;
use tracing::info;

/// Key holding the full vault sequence. The stored list is global; per-user
/// views are produced by filtering on `owner` at read time.
const VAULTS_KEY: &str = "vaults";

/// Vault CRUD over the key-value storage.
#[derive(Clone)]
pub struct VaultOps {
    storage: KvStorage,
    settlement: Arc<dyn Settlement>,
}

impl VaultOps {
    pub fn new(storage: KvStorage) -> Self {
        Self::with_settlement(storage, Arc::new(SimulatedSettlement))
    }

    pub fn with_settlement(storage: KvStorage, settlement: Arc<dyn Settlement>) -> Self {
        Self { storage, settlement }
    }

    /// The full stored sequence, empty if uninitialized.
    pub async fn list_vaults(&self) -> Result<Vec<Vault>, VaultError> {
        Ok(self
            .storage
            .get_record(VAULTS_KEY)
            .await?
            .unwrap_or_default())
    }

    /// Vaults owned by `owner`, in stored order.
    pub async fn list_vaults_for(&self, owner: &str) -> Result<Vec<Vault>, VaultError> {
        let mut vaults = self.list_vaults().await?;
        vaults.retain(|v| v.owner == owner);
        Ok(vaults)
    }

    /// Create a vault for a health goal. The amount arrives as entered by
    /// the user and must parse to a strictly positive number.
    pub async fn create_vault(
        &self,
        owner: &str,
        goal: &str,
        token: Token,
        amount: &str,
    ) -> Result<Vault, VaultError> {
        let deposit: f64 = amount.trim().parse().map_err(|_| VaultError::InvalidAmount)?;
        if !deposit.is_finite() || deposit <= 0.0 {
            return Err(VaultError::InvalidAmount);
        }

        let mut vaults = self.list_vaults().await?;
        let vault = Vault {
            id: Vault::next_id(&vaults),
            owner: owner.to_string(),
            title: format!("{goal} Vault"),
            token,
            deposit,
            yield_amount: 0.0,
            verified: false,
        };
        vaults.push(vault.clone());
        self.storage.put_record(VAULTS_KEY, &vaults).await?;
        info!(vault_id = vault.id, owner = %owner, "vault created");
        Ok(vault)
    }

    /// Mark a vault as verified. One-way and idempotent: an already-verified
    /// vault is returned unchanged.
    pub async fn verify_vault(&self, id: u64) -> Result<Vault, VaultError> {
        let mut vaults = self.list_vaults().await?;
        let vault = vaults
            .iter_mut()
            .find(|v| v.id == id)
            .ok_or(VaultError::VaultNotFound(id))?;
        if !vault.verified {
            vault.verified = true;
            let updated = vault.clone();
            self.storage.put_record(VAULTS_KEY, &vaults).await?;
            info!(vault_id = id, "vault verified");
            return Ok(updated);
        }
        Ok(vault.clone())
    }

    /// Request a withdrawal through the settlement seam. Purely
    /// observational today: no vault state changes.
    pub async fn withdraw(&self, id: u64) -> Result<WithdrawReceipt, VaultError> {
        let vaults = self.list_vaults().await?;
        let vault = vaults
            .iter()
            .find(|v| v.id == id)
            .ok_or(VaultError::VaultNotFound(id))?;
        if !vault.verified {
            return Err(VaultError::VaultNotVerified(id));
        }
        self.settlement.withdraw(vault)
    }
}
