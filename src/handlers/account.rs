use crate::error::VaultError;
use crate::middleware::CurrentUser;
use crate::router::AppState;
use crate::types::User;
use crate::types::requests::{
    ChangePasswordRequest, LoginRequest, SessionResponse, SignupRequest, UpdateProfileRequest,
};
use axum::{Json, extract::State, http::StatusCode};

/// POST /account/signup -> creates the account and establishes the session.
pub async fn signup(
    State(state): State<AppState>,
    Json(req): Json<SignupRequest>,
) -> Result<Json<SessionResponse>, VaultError> {
    let user = state
        .sessions
        .signup(
            &req.full_name,
            &req.username,
            &req.email,
            &req.password,
            &req.confirm_password,
        )
        .await?;
    Ok(Json(SessionResponse { user }))
}

/// POST /account/login
pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<SessionResponse>, VaultError> {
    let user = state.sessions.login(&req.username, &req.password).await?;
    Ok(Json(SessionResponse { user }))
}

/// POST /account/logout -> clears the session pointer.
pub async fn logout(State(state): State<AppState>) -> Result<StatusCode, VaultError> {
    state.sessions.clear_current_user().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /account/me
pub async fn me(CurrentUser(user): CurrentUser) -> Json<SessionResponse> {
    Json(SessionResponse { user })
}

/// PUT /account/profile -> rewrites the profile record and session pointer.
pub async fn update_profile(
    State(state): State<AppState>,
    CurrentUser(_user): CurrentUser,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<SessionResponse>, VaultError> {
    let user = User {
        username: req.username,
        full_name: req.full_name,
        email: req.email,
    };
    state.sessions.update_profile(&user).await?;
    Ok(Json(SessionResponse { user }))
}

/// POST /account/password
pub async fn change_password(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, VaultError> {
    state
        .sessions
        .change_password(
            &user.username,
            &req.old_password,
            &req.new_password,
            &req.confirm_new_password,
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE /account -> removes credential, profile and session.
pub async fn delete_account(
    State(state): State<AppState>,
    CurrentUser(user): CurrentUser,
) -> Result<StatusCode, VaultError> {
    state.sessions.delete_account(&user.username).await?;
    Ok(StatusCode::NO_CONTENT)
}
