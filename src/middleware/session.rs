use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::VaultError;
use crate::router::AppState;
use crate::types::User;

/// Extractor for the currently-authenticated user.
///
/// Reads the session pointer from storage; rejects with 401 when no session
/// exists. Handlers that take `CurrentUser` are login-gated by construction.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub User);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = VaultError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let user = state
            .sessions
            .current_user()
            .await?
            .ok_or(VaultError::NotLoggedIn)?;
        Ok(Self(user))
    }
}
