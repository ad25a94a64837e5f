//! Salted PBKDF2-HMAC-SHA256 password hashing.
//!
//! Records are stored as `<salt>:<hex(derived key)>` where `<salt>` is the
//! hex encoding of 16 random bytes. The key is derived over the salt's text
//! form, which keeps records interchangeable with hashes written by older
//! deployments of this service.

use rand::Rng;

use crate::constants::crypto::{DERIVED_KEY_BYTES, SALT_BYTES};

pub const DEFAULT_ITERATIONS: u32 = 100_000;

/// Well-formed record that no password derives to. Verified against when the
/// account is unknown so that path pays the same key derivation.
pub const UNKNOWN_ACCOUNT_RECORD: &str = "00000000000000000000000000000000:\
0000000000000000000000000000000000000000000000000000000000000000";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    iterations: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
        }
    }
}

impl PasswordHasher {
    #[must_use]
    pub const fn with_iterations(iterations: u32) -> Self {
        Self { iterations }
    }

    #[must_use]
    pub const fn iterations(&self) -> u32 {
        self.iterations
    }

    /// One-way hash with a fresh random salt. Two calls on the same password
    /// yield different records.
    #[must_use]
    pub fn hash(&self, password: &str) -> String {
        let salt_bytes: [u8; SALT_BYTES] = rand::rng().random();
        let salt = hex::encode(salt_bytes);
        let key = self.derive(password, &salt);
        format!("{salt}:{}", hex::encode(key))
    }

    /// Fails closed: a record without exactly one separator, an empty salt,
    /// or a key that is not valid hex of the expected length never verifies.
    #[must_use]
    pub fn verify(&self, password: &str, record: &str) -> bool {
        let mut parts = record.split(':');
        let (Some(salt), Some(stored_hex), None) = (parts.next(), parts.next(), parts.next())
        else {
            return false;
        };

        if salt.is_empty() {
            return false;
        }

        let Ok(stored) = hex::decode(stored_hex) else {
            return false;
        };

        if stored.len() != DERIVED_KEY_BYTES {
            return false;
        }

        constant_time_eq(&self.derive(password, salt), &stored)
    }

    fn derive(&self, password: &str, salt: &str) -> [u8; DERIVED_KEY_BYTES] {
        let mut key = [0u8; DERIVED_KEY_BYTES];
        pbkdf2::pbkdf2_hmac::<sha2::Sha256>(
            password.as_bytes(),
            salt.as_bytes(),
            self.iterations,
            &mut key,
        );
        key
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut diff = 0u8;
    for (x, y) in a.iter().zip(b.iter()) {
        diff |= x ^ y;
    }
    diff == 0
}
