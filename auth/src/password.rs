use pbkdf2::pbkdf2_hmac;
use rand::RngCore;
use sha2::Sha256;

const ALGORITHM: &str = "pbkdf2_sha256";
pub const HASH_ITERATIONS: u32 = 120_000;
const KEY_LEN: usize = 32;

/// Hash a password for storage. Output format is
/// `pbkdf2_sha256$<salt_hex>$<derived_key_hex>` with a fresh random salt, so
/// hashing the same password twice yields different strings.
pub fn hash_password(password: &str) -> String {
    let mut salt_bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut salt_bytes);
    let salt = hex::encode(salt_bytes);

    let mut derived = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        HASH_ITERATIONS,
        &mut derived,
    );

    format!("{}${}${}", ALGORITHM, salt, hex::encode(derived))
}

/// Check a login attempt against a stored hash. A malformed stored value or
/// unknown algorithm tag is simply a failed verification, never an error.
pub fn verify_password(password: &str, stored: &str) -> bool {
    let mut parts = stored.splitn(3, '$');
    let (algorithm, salt, digest_hex) = match (parts.next(), parts.next(), parts.next()) {
        (Some(algorithm), Some(salt), Some(digest_hex)) => (algorithm, salt, digest_hex),
        _ => return false,
    };

    if algorithm != ALGORITHM {
        return false;
    }

    let expected = match hex::decode(digest_hex) {
        Ok(expected) => expected,
        Err(_) => return false,
    };

    let mut derived = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(
        password.as_bytes(),
        salt.as_bytes(),
        HASH_ITERATIONS,
        &mut derived,
    );

    constant_time_eq(&derived, &expected)
}

/// Constant-time byte comparison to prevent timing attacks.
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
