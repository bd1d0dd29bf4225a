//! Log-safe fingerprints for personal identity numbers
//!
//! A personnummer is personal data, and the space of valid numbers is small
//! enough to enumerate. A plain digest would therefore be reversible, so
//! log events identify an input by a truncated HMAC-SHA256 under a key that
//! is generated once per process and never leaves it. Fingerprints correlate
//! events within one run; they cannot be matched across runs.

use std::fmt;
use std::sync::OnceLock;

use hmac::digest::generic_array::GenericArray;
use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use rand::Rng;
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Hex characters kept from the MAC
pub const FINGERPRINT_LEN: usize = 12;

/// Key length, equal to the SHA-256 block size
pub const KEY_LEN: usize = 64;

static PROCESS_KEY: OnceLock<FingerprintKey> = OnceLock::new();

/// Secret key for [`fingerprint_with`]
#[derive(Clone, PartialEq, Eq)]
pub struct FingerprintKey([u8; KEY_LEN]);

impl FingerprintKey {
    /// Fresh random key from the thread-local CSPRNG
    pub fn generate() -> Self {
        let mut bytes = [0u8; KEY_LEN];
        rand::thread_rng().fill(&mut bytes[..]);
        Self(bytes)
    }

    pub fn from_bytes(bytes: [u8; KEY_LEN]) -> Self {
        Self(bytes)
    }
}

// Never print key material
impl fmt::Debug for FingerprintKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str("FingerprintKey(..)")
    }
}

/// The key used by [`fingerprint`], created on first use
pub fn process_key() -> &'static FingerprintKey {
    PROCESS_KEY.get_or_init(FingerprintKey::generate)
}

/// Short, stable-within-process identifier for `value`
pub fn fingerprint(value: &str) -> String {
    fingerprint_with(process_key(), value)
}

/// Fingerprint of the trimmed `value` under an explicit key
pub fn fingerprint_with(key: &FingerprintKey, value: &str) -> String {
    let mut mac = <HmacSha256 as KeyInit>::new(GenericArray::from_slice(&key.0));
    mac.update(value.trim().as_bytes());
    let hex = format!("{:x}", mac.finalize().into_bytes());
    hex[..FINGERPRINT_LEN].to_string()
}
