//! Credential store: salted PBKDF2 password hashing
//!
//! Stored form is `salt$derivedHex`. The iteration count is a tunable
//! (see `SecurityConfig::pbkdf2_iterations`); verification recomputes
//! with the same salt and compares in constant time.

use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;
use subtle::ConstantTimeEq;

/// Derived key length in bytes
const KEY_LEN: usize = 32;
/// Salt length in bytes (stored hex-encoded)
const SALT_LEN: usize = 16;

/// Hash a password with a fresh random salt.
pub fn hash_password(password: &str, iterations: u32) -> String {
    let mut salt_bytes = [0u8; SALT_LEN];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = hex::encode(salt_bytes);

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);

    format!("{}${}", salt, hex::encode(key))
}

/// Verify a password against a stored `salt$derivedHex` form.
///
/// Returns `false` for malformed stored forms; never errors.
pub fn verify_password(stored: &str, password: &str, iterations: u32) -> bool {
    let Some((salt, stored_hex)) = stored.split_once('$') else {
        return false;
    };
    let Ok(stored_key) = hex::decode(stored_hex) else {
        return false;
    };
    if stored_key.len() != KEY_LEN {
        return false;
    }

    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(password.as_bytes(), salt.as_bytes(), iterations, &mut key);

    key.ct_eq(stored_key.as_slice()).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    // Low count keeps tests fast; production default is configured
    const ITERATIONS: u32 = 1000;

    #[test]
    fn hash_and_verify() {
        let stored = hash_password("secure_password_123", ITERATIONS);
        assert!(verify_password(&stored, "secure_password_123", ITERATIONS));
        assert!(!verify_password(&stored, "wrong_password", ITERATIONS));
    }

    #[test]
    fn fresh_salt_every_time() {
        let a = hash_password("same", ITERATIONS);
        let b = hash_password("same", ITERATIONS);
        assert_ne!(a, b);
    }

    #[test]
    fn malformed_stored_form_is_false_not_panic() {
        assert!(!verify_password("", "pw", ITERATIONS));
        assert!(!verify_password("no-separator", "pw", ITERATIONS));
        assert!(!verify_password("salt$not-hex", "pw", ITERATIONS));
        assert!(!verify_password("salt$abcd", "pw", ITERATIONS));
    }

    #[test]
    fn iteration_count_is_part_of_the_derivation() {
        let stored = hash_password("pw", ITERATIONS);
        assert!(!verify_password(&stored, "pw", ITERATIONS + 1));
    }
}
