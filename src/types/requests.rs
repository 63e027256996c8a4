use crate::types::entities::{Token, User};
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub username: String,
    pub email: String,
    pub password: String,
    #[serde(rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct UpdateProfileRequest {
    #[serde(rename = "fullName")]
    pub full_name: String,
    pub username: String,
    pub email: String,
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordRequest {
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword")]
    pub new_password: String,
    #[serde(rename = "confirmNewPassword")]
    pub confirm_new_password: String,
}

#[derive(Debug, Deserialize)]
pub struct CreateVaultRequest {
    pub goal: String,
    pub token: Token,
    /// Deposit amount as entered by the user; validated server-side.
    pub amount: String,
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: User,
}
