use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// HMAC-SHA256 signer for session cookies. The secret is injected once at
/// construction; rotating it invalidates every outstanding cookie.
#[derive(Clone)]
pub struct CookieSigner {
    secret: String,
}

impl CookieSigner {
    pub fn new<S: Into<String>>(secret: S) -> Self {
        CookieSigner {
            secret: secret.into(),
        }
    }

    /// `value` -> `value.<hmac_hex>`
    pub fn sign(&self, value: &str) -> String {
        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(value.as_bytes());
        format!("{}.{}", value, hex::encode(mac.finalize().into_bytes()))
    }

    /// Returns the original value only if the signature checks out. Any
    /// malformed input is None, never an error.
    pub fn unsign(&self, signed: &str) -> Option<String> {
        let index = signed.rfind('.')?;
        let (value, signature_hex) = (&signed[..index], &signed[index + 1..]);
        let signature = hex::decode(signature_hex).ok()?;

        let mut mac = HmacSha256::new_from_slice(self.secret.as_bytes())
            .expect("HMAC can take key of any size");
        mac.update(value.as_bytes());
        // verify_slice is constant time
        mac.verify_slice(&signature).ok()?;

        Some(value.to_string())
    }
}
