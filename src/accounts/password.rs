use std::str::FromStr;

use argon2::{
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use rand::rngs::OsRng;
use serde::Deserialize;
use sha2::{Digest, Sha256};
use tracing::{error, warn};

/// How new credentials are hashed before they are stored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PasswordScheme {
    /// Unsalted SHA-256, hex encoded. Deterministic and compatible with
    /// existing `users.db` files, but weak against offline attacks.
    #[default]
    Sha256,
    /// Salted Argon2id in PHC string form.
    Argon2,
}

impl FromStr for PasswordScheme {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "sha256" => Ok(Self::Sha256),
            "argon2" => Ok(Self::Argon2),
            other => anyhow::bail!("unknown password scheme '{other}'"),
        }
    }
}

impl PasswordScheme {
    pub fn hash(self, plain: &str) -> anyhow::Result<String> {
        match self {
            Self::Sha256 => Ok(sha256_hex(plain)),
            Self::Argon2 => hash_argon2(plain),
        }
    }
}

/// Check `plain` against a stored hash of either scheme.
///
/// The scheme is read off the stored value, so rows written under a previous
/// configuration keep verifying.
pub fn verify_password(plain: &str, stored: &str) -> bool {
    if stored.starts_with("$argon2") {
        return match PasswordHash::new(stored) {
            Ok(parsed) => Argon2::default()
                .verify_password(plain.as_bytes(), &parsed)
                .is_ok(),
            Err(e) => {
                warn!(error = %e, "stored argon2 hash is malformed");
                false
            }
        };
    }
    constant_time_eq(sha256_hex(plain).as_bytes(), stored.as_bytes())
}

fn sha256_hex(plain: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(plain.as_bytes());
    format!("{:x}", hasher.finalize())
}

fn hash_argon2(plain: &str) -> anyhow::Result<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plain.as_bytes(), &salt)
        .map_err(|e| {
            error!(error = %e, "argon2 hash_password error");
            anyhow::anyhow!(e.to_string())
        })?
        .to_string();
    Ok(hash)
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sha256_is_deterministic_hex() {
        let a = PasswordScheme::Sha256.hash("hunter2").unwrap();
        let b = PasswordScheme::Sha256.hash("hunter2").unwrap();
        assert_eq!(a, b);
        assert_eq!(
            a,
            "f52fbd32b2b3b86ff88ef6c490628285f482af15ddcb29541f94bcf526a3f6c7"
        );
        assert!(!a.contains("hunter2"));
    }

    #[test]
    fn sha256_verify_roundtrip() {
        let hash = PasswordScheme::Sha256.hash("correct-horse").unwrap();
        assert!(verify_password("correct-horse", &hash));
        assert!(!verify_password("wrong-horse", &hash));
    }

    #[test]
    fn argon2_hash_and_verify_roundtrip() {
        let password = "Secur3P@ssw0rd!";
        let hash = PasswordScheme::Argon2.hash(password).expect("hashing should succeed");
        assert!(hash.starts_with("$argon2"));
        assert!(verify_password(password, &hash));
        assert!(!verify_password("wrong-password", &hash));
    }

    #[test]
    fn argon2_salts_each_hash() {
        let a = PasswordScheme::Argon2.hash("same").unwrap();
        let b = PasswordScheme::Argon2.hash("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_argon2_hash_does_not_verify() {
        assert!(!verify_password("anything", "$argon2id$garbage"));
    }

    #[test]
    fn scheme_parses_from_config_value() {
        assert_eq!("sha256".parse::<PasswordScheme>().unwrap(), PasswordScheme::Sha256);
        assert_eq!(" Argon2 ".parse::<PasswordScheme>().unwrap(), PasswordScheme::Argon2);
        assert!("bcrypt".parse::<PasswordScheme>().is_err());
        assert_eq!(PasswordScheme::default(), PasswordScheme::Sha256);
    }
}
