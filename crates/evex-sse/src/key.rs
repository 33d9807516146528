//! SSE-C key generation, validation, and digest derivation.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use evex_types::SseKeyError;
use rand::RngCore;

/// Required decoded length of an SSE-C key: 32 bytes (256 bits).
pub const SSE_KEY_LEN: usize = 32;

/// Generates a random 256-bit SSE-C key, base64-encoded.
///
/// Uses the thread-local CSPRNG; the result is suitable for S3 server-side
/// encryption with customer-provided keys.
#[must_use]
pub fn generate_key() -> String {
    let mut bytes = [0u8; SSE_KEY_LEN];
    rand::thread_rng().fill_bytes(&mut bytes);
    STANDARD.encode(bytes)
}

/// Decodes a base64 SSE-C key and validates its length.
///
/// # Errors
///
/// Returns [`SseKeyError::InvalidKeyEncoding`] for malformed base64 and
/// [`SseKeyError::InvalidKeyLength`] when the decoded key is not exactly
/// [`SSE_KEY_LEN`] bytes.
pub fn decode_key(key_b64: &str) -> Result<Vec<u8>, SseKeyError> {
    let bytes = STANDARD
        .decode(key_b64)
        .map_err(|e| SseKeyError::InvalidKeyEncoding(e.to_string()))?;
    if bytes.len() != SSE_KEY_LEN {
        return Err(SseKeyError::InvalidKeyLength(bytes.len()));
    }
    Ok(bytes)
}

/// Computes the base64-encoded MD5 digest of raw key bytes.
///
/// S3 uses this digest as an integrity check on the SSE-C key header.
#[must_use]
pub fn compute_key_md5(key_bytes: &[u8]) -> String {
    STANDARD.encode(md5::compute(key_bytes).0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_key_decodes_to_32_bytes() {
        let key = generate_key();
        let bytes = decode_key(&key).unwrap();
        assert_eq!(bytes.len(), SSE_KEY_LEN);
    }

    #[test]
    fn test_generated_keys_differ() {
        assert_ne!(generate_key(), generate_key());
    }

    #[test]
    fn test_decode_rejects_short_key() {
        let short = STANDARD.encode([0u8; 31]);
        assert_eq!(decode_key(&short), Err(SseKeyError::InvalidKeyLength(31)));
    }

    #[test]
    fn test_decode_rejects_long_key() {
        let long = STANDARD.encode([0u8; 33]);
        assert_eq!(decode_key(&long), Err(SseKeyError::InvalidKeyLength(33)));
    }

    #[test]
    fn test_decode_rejects_malformed_base64() {
        assert!(matches!(
            decode_key("not base64!!!"),
            Err(SseKeyError::InvalidKeyEncoding(_))
        ));
    }

    #[test]
    fn test_key_md5_known_value() {
        // MD5 of 32 zero bytes.
        let digest = compute_key_md5(&[0u8; 32]);
        assert_eq!(digest, STANDARD.encode(md5::compute([0u8; 32]).0));
        assert_eq!(STANDARD.decode(&digest).unwrap().len(), 16);
    }
}
