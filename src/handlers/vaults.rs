use crate::error::VaultError;
use crate::middleware::CurrentUser;
use crate::router::AppState;
use crate::service::WithdrawReceipt;
use crate::types::Vault;
use crate::types::requests::CreateVaultRequest;
use axum::{
    Json,
    extract::{Path, State},
};

/// GET /vaults -> the session user's vaults.
pub async fn list(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<Json<Vec<Vault>>, VaultError> {
    let vaults = state.vaults.list_vaults_for(&user.username).await?;
    Ok(Json(vaults))
}

/// POST /vaults
pub async fn create(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<CreateVaultRequest>,
) -> Result<Json<Vault>, VaultError> {
    let vault = state
        .vaults
        .create_vault(&user.username, &req.goal, req.token, &req.amount)
        .await?;
    Ok(Json(vault))
}

/// POST /vaults/{id}/verify
pub async fn verify(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<u64>,
) -> Result<Json<Vault>, VaultError> {
    let vault = state.vaults.verify_vault(id).await?;
    Ok(Json(vault))
}

/// POST /vaults/{id}/withdraw -> a simulated settlement receipt.
pub async fn withdraw(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Path(id): Path<u64>,
) -> Result<Json<WithdrawReceipt>, VaultError> {
    let receipt = state.vaults.withdraw(id).await?;
    Ok(Json(receipt))
}
