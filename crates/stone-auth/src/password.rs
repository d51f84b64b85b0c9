//! Password hashing.
//!
//! A dependency-free iterated key derivation that runs anywhere, including
//! WASM builds where native crypto backends are unavailable. Hashes embed
//! their own iteration count and salt, so the cost can be raised without
//! invalidating stored credentials.

use crate::error::{AuthError, AuthResult};

/// Minimum password length the storefront accepts.
pub const MIN_PASSWORD_LEN: usize = 6;

/// Password hasher configuration.
#[derive(Debug, Clone)]
pub struct PasswordHasher {
    /// Iterations of the mixing round.
    pub iterations: u32,
    /// Salt length in bytes.
    pub salt_length: usize,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            salt_length: 16,
        }
    }
}

impl PasswordHasher {
    /// Create a hasher with a custom iteration count.
    pub fn new(iterations: u32) -> Self {
        Self {
            iterations,
            salt_length: 16,
        }
    }

    /// Hash a password.
    ///
    /// Returns a string in the format `$stone$iterations$salt$digest`.
    pub fn hash(&self, password: &str) -> AuthResult<String> {
        let salt = self.generate_salt();
        let digest = self.derive(password, &salt);

        Ok(format!(
            "$stone${}${}${}",
            self.iterations,
            hex_encode(&salt),
            hex_encode(&digest)
        ))
    }

    /// Verify a password against a stored hash.
    pub fn verify(&self, password: &str, stored: &str) -> AuthResult<bool> {
        let parts: Vec<&str> = stored.split('$').collect();
        if parts.len() != 5 || parts[1] != "stone" {
            return Err(AuthError::Provider("malformed password hash".to_string()));
        }

        let iterations: u32 = parts[2]
            .parse()
            .map_err(|_| AuthError::Provider("malformed password hash".to_string()))?;
        let salt = hex_decode(parts[3])?;
        let expected = hex_decode(parts[4])?;

        let computed = PasswordHasher::new(iterations).derive(password, &salt);
        Ok(constant_time_eq(&computed, &expected))
    }

    /// Enforce the storefront's password rule.
    pub fn validate_password(password: &str) -> AuthResult<()> {
        if password.len() < MIN_PASSWORD_LEN {
            return Err(AuthError::WeakPassword(format!(
                "password shorter than {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }

    fn generate_salt(&self) -> Vec<u8> {
        use std::time::{SystemTime, UNIX_EPOCH};

        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_nanos() as u64)
            .unwrap_or(0);

        // Fold in an allocation address so two salts in the same nanosecond
        // still differ.
        let probe = Box::new(0u64);
        let mut state = nanos ^ (&*probe as *const u64 as u64);

        let mut salt = Vec::with_capacity(self.salt_length);
        while salt.len() < self.salt_length {
            // splitmix64 step
            state = state.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = state;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^= z >> 31;
            for byte in z.to_le_bytes() {
                if salt.len() == self.salt_length {
                    break;
                }
                salt.push(byte);
            }
        }
        salt
    }

    /// Derive a 32-byte digest from password and salt.
    fn derive(&self, password: &str, salt: &[u8]) -> [u8; 32] {
        let mut state = [0u8; 32];
        for (i, &b) in salt.iter().enumerate() {
            state[i % 32] = state[i % 32].wrapping_add(b);
        }
        for (i, &b) in password.as_bytes().iter().enumerate() {
            state[(i * 7) % 32] ^= b.wrapping_add(i as u8);
        }

        for _ in 0..self.iterations {
            state = mix_round(&state);
        }
        state
    }
}

/// One mixing round over the 32-byte state.
fn mix_round(input: &[u8; 32]) -> [u8; 32] {
    let mut out = [0u8; 32];

    for i in 0..32 {
        let a = input[i];
        let b = input[(i + 5) % 32];
        let c = input[(i + 11) % 32];
        let d = input[(i + 19) % 32];

        out[i] = a
            .rotate_left(1)
            .wrapping_add(b.rotate_left(4))
            .wrapping_mul(3)
            ^ c.wrapping_add(d.rotate_right(3));
    }

    for i in 0..32 {
        out[i] = out[i].wrapping_add(out[(i + 13) % 32].rotate_left(2));
    }

    out
}

/// Constant-time comparison to prevent timing attacks.
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

fn hex_encode(bytes: &[u8]) -> String {
    use std::fmt::Write;

    let mut out = String::with_capacity(bytes.len() * 2);
    for byte in bytes {
        let _ = write!(out, "{:02x}", byte);
    }
    out
}

fn hex_decode(s: &str) -> AuthResult<Vec<u8>> {
    if s.len() % 2 != 0 {
        return Err(AuthError::Provider("malformed password hash".to_string()));
    }
    (0..s.len())
        .step_by(2)
        .map(|i| {
            u8::from_str_radix(&s[i..i + 2], 16)
                .map_err(|_| AuthError::Provider("malformed password hash".to_string()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let hasher = PasswordHasher::new(200);
        let hash = hasher.hash("stonecraft1").unwrap();

        assert!(hash.starts_with("$stone$200$"));
        assert!(hasher.verify("stonecraft1", &hash).unwrap());
        assert!(!hasher.verify("stonecraft2", &hash).unwrap());
    }

    #[test]
    fn test_salts_differ_between_hashes() {
        let hasher = PasswordHasher::new(200);
        let a = hasher.hash("same password").unwrap();
        let b = hasher.hash("same password").unwrap();

        assert_ne!(a, b);
        assert!(hasher.verify("same password", &a).unwrap());
        assert!(hasher.verify("same password", &b).unwrap());
    }

    #[test]
    fn test_iteration_count_travels_in_the_hash() {
        let hash = PasswordHasher::new(50).hash("travelling").unwrap();
        // A differently configured hasher still verifies.
        assert!(PasswordHasher::new(9999).verify("travelling", &hash).unwrap());
    }

    #[test]
    fn test_malformed_hash_is_rejected() {
        let hasher = PasswordHasher::new(50);
        assert!(hasher.verify("x", "not a hash").is_err());
        assert!(hasher.verify("x", "$pbkdf2$10$ab$cd").is_err());
        assert!(hasher.verify("x", "$stone$oops$ab$cd").is_err());
    }

    #[test]
    fn test_password_rule() {
        assert!(PasswordHasher::validate_password("123456").is_ok());
        let err = PasswordHasher::validate_password("12345").unwrap_err();
        assert!(matches!(err, AuthError::WeakPassword(_)));
        assert_eq!(
            err.user_message(),
            "Password should be at least 6 characters."
        );
    }
}
