use crate::db::KvStorage;
use crate::error::VaultError;
use crate::service::password;
use crate::types::{Credential, User};
use tracing::{info, warn};

/// Key holding the session pointer (the single currently-authenticated user).
const SESSION_KEY: &str = "session_user";

fn credential_key(username: &str) -> String {
    format!("credentials_{username}")
}

fn profile_key(username: &str) -> String {
    format!("users_{username}")
}

/// Account and session operations over the key-value storage.
///
/// One session per storage profile: the session pointer is a single record,
/// overwritten on login/signup and removed on logout.
#[derive(Clone)]
pub struct SessionOps {
    storage: KvStorage,
}

impl SessionOps {
    pub fn new(storage: KvStorage) -> Self {
        Self { storage }
    }

    /// Read the session pointer. Absent or malformed data reads as `None`.
    pub async fn current_user(&self) -> Result<Option<User>, VaultError> {
        self.storage.get_record(SESSION_KEY).await
    }

    /// Overwrite the session pointer unconditionally.
    pub async fn set_current_user(&self, user: &User) -> Result<(), VaultError> {
        self.storage.put_record(SESSION_KEY, user).await
    }

    /// Remove the session pointer (logout).
    pub async fn clear_current_user(&self) -> Result<(), VaultError> {
        self.storage.delete(SESSION_KEY).await
    }

    pub async fn get_credential(&self, username: &str) -> Result<Option<Credential>, VaultError> {
        self.storage.get_record(&credential_key(username)).await
    }

    /// Upsert a credential record, keyed by its username.
    pub async fn set_credential(&self, credential: &Credential) -> Result<(), VaultError> {
        self.storage
            .put_record(&credential_key(&credential.username), credential)
            .await
    }

    pub async fn delete_credential(&self, username: &str) -> Result<(), VaultError> {
        self.storage.delete(&credential_key(username)).await
    }

    /// Register an account: writes the profile record and credential, then
    /// establishes the session. An existing username is overwritten
    /// (last-write-wins, matching the storage medium).
    pub async fn signup(
        &self,
        full_name: &str,
        username: &str,
        email: &str,
        password: &str,
        confirm_password: &str,
    ) -> Result<User, VaultError> {
        if full_name.is_empty() || username.is_empty() || email.is_empty() || password.is_empty() {
            return Err(VaultError::MissingFields);
        }
        if password != confirm_password {
            return Err(VaultError::PasswordMismatch);
        }

        let user = User {
            username: username.to_string(),
            full_name: full_name.to_string(),
            email: email.to_string(),
        };
        self.storage.put_record(&profile_key(username), &user).await?;
        self.set_credential(&password::make_credential(username, password))
            .await?;
        self.set_current_user(&user).await?;
        info!(username = %username, "account created");
        Ok(user)
    }

    /// Authenticate and establish the session. The session pointer is set
    /// from the stored profile record; accounts registered before profile
    /// records existed get a synthesized placeholder email.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, VaultError> {
        let credential = match self.get_credential(username).await? {
            Some(c) => c,
            None => {
                warn!(username = %username, "login for unknown username");
                return Err(VaultError::InvalidCredentials);
            }
        };
        if !password::verify(&credential, password) {
            warn!(username = %username, "login with wrong password");
            return Err(VaultError::InvalidCredentials);
        }

        let user = match self.storage.get_record(&profile_key(username)).await? {
            Some(user) => user,
            None => User {
                username: username.to_string(),
                full_name: username.to_string(),
                email: format!("{username}@example.com"),
            },
        };
        self.set_current_user(&user).await?;
        info!(username = %username, "session established");
        Ok(user)
    }

    /// Rewrite the profile record and session pointer from an edited profile.
    pub async fn update_profile(&self, user: &User) -> Result<(), VaultError> {
        self.storage
            .put_record(&profile_key(&user.username), user)
            .await?;
        self.set_current_user(user).await
    }

    /// Replace the stored password. The credential is left untouched on any
    /// validation failure.
    pub async fn change_password(
        &self,
        username: &str,
        old_password: &str,
        new_password: &str,
        confirm_new_password: &str,
    ) -> Result<(), VaultError> {
        if new_password != confirm_new_password {
            return Err(VaultError::PasswordMismatch);
        }
        let credential = self
            .get_credential(username)
            .await?
            .ok_or(VaultError::InvalidCredentials)?;
        if !password::verify(&credential, old_password) {
            return Err(VaultError::InvalidCredentials);
        }
        self.set_credential(&password::make_credential(username, new_password))
            .await?;
        info!(username = %username, "password changed");
        Ok(())
    }

    /// Remove the credential, profile record and session pointer.
    /// Interactive confirmation is the caller's concern.
    pub async fn delete_account(&self, username: &str) -> Result<(), VaultError> {
        self.delete_credential(username).await?;
        self.storage.delete(&profile_key(username)).await?;
        self.clear_current_user().await?;
        info!(username = %username, "account deleted");
        Ok(())
    }
}
