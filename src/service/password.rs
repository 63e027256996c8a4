use crate::types::Credential;
use rand::RngCore;
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;

/// Build a credential record for `username`. The password is stored only as
/// SHA-256(salt_hex || password) with a fresh random salt.
pub fn make_credential(username: &str, password: &str) -> Credential {
    let mut salt = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt);
    let salt_hex = to_hex(&salt);
    let password_hash = digest_hex(&salt_hex, password);
    Credential {
        username: username.to_string(),
        salt: salt_hex,
        password_hash,
    }
}

/// Constant-time check of `password` against a stored credential.
pub fn verify(credential: &Credential, password: &str) -> bool {
    let candidate = digest_hex(&credential.salt, password);
    bool::from(candidate.as_bytes().ct_eq(credential.password_hash.as_bytes()))
}

fn digest_hex(salt_hex: &str, password: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(salt_hex.as_bytes());
    hasher.update(password.as_bytes());
    to_hex(&hasher.finalize())
}

fn to_hex(bytes: &[u8]) -> String {
    bytes.iter().map(|b| format!("{b:02x}")).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_accepts_only_the_original_password() {
        let cred = make_credential("alice", "hunter2");
        assert!(verify(&cred, "hunter2"));
        assert!(!verify(&cred, "hunter3"));
        assert!(!verify(&cred, ""));
    }

    #[test]
    fn salts_are_unique_per_credential() {
        let a = make_credential("alice", "pw");
        let b = make_credential("alice", "pw");
        assert_ne!(a.salt, b.salt);
        assert_ne!(a.password_hash, b.password_hash);
    }
}
