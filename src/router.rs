use crate::db::KvStorage;
use crate::handlers::{account, vaults};
use crate::service::{SessionOps, VaultOps};
use axum::{
    Router,
    routing::{delete, get, post, put},
};

/// Shared handler state: the two ops facades over one storage pool.
#[derive(Clone)]
pub struct AppState {
    pub sessions: SessionOps,
    pub vaults: VaultOps,
}

impl AppState {
    pub fn new(storage: KvStorage) -> Self {
        Self {
            sessions: SessionOps::new(storage.clone()),
            vaults: VaultOps::new(storage),
        }
    }
}

pub fn vault_router(state: AppState) -> Router {
    Router::new()
        .route("/account/signup", post(account::signup))
        .route("/account/login", post(account::login))
        .route("/account/logout", post(account::logout))
        .route("/account/me", get(account::me))
        .route("/account/profile", put(account::update_profile))
        .route("/account/password", post(account::change_password))
        .route("/account", delete(account::delete_account))
        .route("/vaults", get(vaults::list).post(vaults::create))
        .route("/vaults/{id}/verify", post(vaults::verify))
        .route("/vaults/{id}/withdraw", post(vaults::withdraw))
        .with_state(state)
}
