//! S3 and SSE-C configuration builders.
//!
//! Resolution priority for every field is explicit argument, then
//! environment variable, then (for the SSE-C key on the export path only)
//! auto-generation. The environment merge takes an injected lookup so the
//! priority logic is testable without mutating the process environment.

use evex_types::{EncryptionConfig, S3Config, SseKeyError};

use crate::key::{compute_key_md5, decode_key, generate_key};

/// Default SSE-C algorithm when a key is present.
pub const DEFAULT_ALGORITHM: &str = "AES256";

/// An empty string, explicit or from the environment, counts as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

/// Inputs to the SSE-C encryption-config builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SseOptions {
    /// Explicit base64 key, if supplied by the caller.
    pub key: Option<String>,
    /// Explicit base64 key digest, passed through unverified when present.
    pub key_md5: Option<String>,
    /// Explicit algorithm override.
    pub algorithm: Option<String>,
    /// Fully opts out of encryption regardless of other inputs.
    pub disabled: bool,
}

impl SseOptions {
    /// Fills unset fields from the process environment
    /// (`S3_SSE_C_KEY`, `S3_SSE_C_KEY_MD5`, `S3_SSE_C_ALGORITHM`).
    #[must_use]
    pub fn merged_with_env(self) -> Self {
        self.merged_with(|name| std::env::var(name).ok())
    }

    /// Fills unset fields using the given variable lookup.
    #[must_use]
    pub fn merged_with<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            key: non_empty(self.key).or_else(|| non_empty(lookup("S3_SSE_C_KEY"))),
            key_md5: non_empty(self.key_md5).or_else(|| non_empty(lookup("S3_SSE_C_KEY_MD5"))),
            algorithm: non_empty(self.algorithm)
                .or_else(|| non_empty(lookup("S3_SSE_C_ALGORITHM"))),
            disabled: self.disabled,
        }
    }

    /// Builds the encryption config.
    ///
    /// Returns `Ok(None)` when encryption is disabled or no key could be
    /// resolved. `auto_generate` must be true only on the export path:
    /// fabricating a key while checking status or downloading would make a
    /// previously encrypted object unrecoverable with it.
    ///
    /// # Errors
    ///
    /// Returns an error when the resolved key is malformed base64 or does
    /// not decode to exactly 32 bytes.
    pub fn build(self, auto_generate: bool) -> Result<Option<EncryptionConfig>, SseKeyError> {
        if self.disabled {
            return Ok(None);
        }

        let (key_b64, generated) = match non_empty(self.key) {
            Some(key) => (key, false),
            None if auto_generate => (generate_key(), true),
            None => return Ok(None),
        };

        let key_bytes = decode_key(&key_b64)?;
        let algorithm = non_empty(self.algorithm)
            .unwrap_or_else(|| DEFAULT_ALGORITHM.to_string());
        let key_md5_b64 = non_empty(self.key_md5)
            .unwrap_or_else(|| compute_key_md5(&key_bytes));

        Ok(Some(EncryptionConfig {
            key_b64,
            algorithm,
            key_md5_b64,
            generated,
        }))
    }
}

/// Inputs to the full S3 destination builder.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct S3Options {
    /// Destination bucket name.
    pub bucket: Option<String>,
    /// Key prefix inside the bucket.
    pub prefix: Option<String>,
    /// Access key ID.
    pub access_key: Option<String>,
    /// Secret access key.
    pub secret_key: Option<String>,
    /// Custom endpoint URL.
    pub endpoint: Option<String>,
    /// Region name.
    pub region: Option<String>,
    /// SSE-C encryption inputs.
    pub sse: SseOptions,
}

impl S3Options {
    /// Fills unset fields from the process environment (`S3_BUCKET`,
    /// `S3_PREFIX`, `S3_ACCESS_KEY_ID`, `S3_SECRET_ACCESS_KEY`,
    /// `S3_ENDPOINT_URL`, `S3_REGION_NAME`, and the SSE-C variables).
    #[must_use]
    pub fn merged_with_env(self) -> Self {
        self.merged_with(|name| std::env::var(name).ok())
    }

    /// Fills unset fields using the given variable lookup.
    #[must_use]
    pub fn merged_with<F>(self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        Self {
            bucket: non_empty(self.bucket).or_else(|| non_empty(lookup("S3_BUCKET"))),
            prefix: non_empty(self.prefix).or_else(|| non_empty(lookup("S3_PREFIX"))),
            access_key: non_empty(self.access_key)
                .or_else(|| non_empty(lookup("S3_ACCESS_KEY_ID"))),
            secret_key: non_empty(self.secret_key)
                .or_else(|| non_empty(lookup("S3_SECRET_ACCESS_KEY"))),
            endpoint: non_empty(self.endpoint).or_else(|| non_empty(lookup("S3_ENDPOINT_URL"))),
            region: non_empty(self.region).or_else(|| non_empty(lookup("S3_REGION_NAME"))),
            sse: self.sse.merged_with(lookup),
        }
    }

    /// Builds the S3 block for the export request.
    ///
    /// Returns `Ok(None)` when no bucket setting and no encryption config
    /// resolved, in which case no `s3` block is sent at all.
    ///
    /// # Errors
    ///
    /// Returns an error when the SSE-C key is invalid.
    pub fn build(self, auto_generate: bool) -> Result<Option<S3Config>, SseKeyError> {
        let encryption = self.sse.build(auto_generate)?;
        let config = S3Config {
            bucket_name: non_empty(self.bucket),
            prefix: non_empty(self.prefix),
            access_key_id: non_empty(self.access_key),
            secret_access_key: non_empty(self.secret_key),
            endpoint_url: non_empty(self.endpoint),
            region_name: non_empty(self.region),
            encryption,
        };

        if config.is_empty() {
            Ok(None)
        } else {
            Ok(Some(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::key::SSE_KEY_LEN;
    use base64::Engine as _;
    use base64::engine::general_purpose::STANDARD;

    fn valid_key() -> String {
        STANDARD.encode([7u8; SSE_KEY_LEN])
    }

    #[test]
    fn test_disabled_wins_over_explicit_key() {
        let options = SseOptions {
            key: Some(valid_key()),
            disabled: true,
            ..Default::default()
        };
        assert_eq!(options.build(true).unwrap(), None);
    }

    #[test]
    fn test_no_key_no_autogenerate_is_none() {
        let options = SseOptions::default();
        assert_eq!(options.build(false).unwrap(), None);
    }

    #[test]
    fn test_explicit_key_builds_with_derived_md5() {
        let options = SseOptions {
            key: Some(valid_key()),
            ..Default::default()
        };
        let config = options.build(false).unwrap().unwrap();
        assert_eq!(config.key_b64, valid_key());
        assert_eq!(config.algorithm, "AES256");
        assert_eq!(
            config.key_md5_b64,
            STANDARD.encode(md5::compute([7u8; SSE_KEY_LEN]).0)
        );
        assert!(!config.generated);
    }

    #[test]
    fn test_explicit_md5_is_passed_through() {
        let options = SseOptions {
            key: Some(valid_key()),
            key_md5: Some("caller-supplied".to_string()),
            ..Default::default()
        };
        let config = options.build(true).unwrap().unwrap();
        assert_eq!(config.key_md5_b64, "caller-supplied");
    }

    #[test]
    fn test_explicit_algorithm_override() {
        let options = SseOptions {
            key: Some(valid_key()),
            algorithm: Some("AES256-custom".to_string()),
            ..Default::default()
        };
        let config = options.build(false).unwrap().unwrap();
        assert_eq!(config.algorithm, "AES256-custom");
    }

    #[test]
    fn test_autogenerated_key_is_flagged_and_valid() {
        let config = SseOptions::default().build(true).unwrap().unwrap();
        assert!(config.generated);
        assert_eq!(
            STANDARD.decode(&config.key_b64).unwrap().len(),
            SSE_KEY_LEN
        );

        let again = SseOptions::default().build(true).unwrap().unwrap();
        assert_ne!(config.key_b64, again.key_b64);
    }

    #[test]
    fn test_invalid_length_is_rejected() {
        for len in [31usize, 33] {
            let options = SseOptions {
                key: Some(STANDARD.encode(vec![0u8; len])),
                ..Default::default()
            };
            assert_eq!(
                options.build(true).unwrap_err(),
                SseKeyError::InvalidKeyLength(len)
            );
        }
    }

    #[test]
    fn test_explicit_beats_environment() {
        let options = SseOptions {
            key: Some("explicit".to_string()),
            ..Default::default()
        };
        let merged = options.merged_with(|name| match name {
            "S3_SSE_C_KEY" => Some("from-env".to_string()),
            "S3_SSE_C_ALGORITHM" => Some("env-alg".to_string()),
            _ => None,
        });
        assert_eq!(merged.key.as_deref(), Some("explicit"));
        assert_eq!(merged.algorithm.as_deref(), Some("env-alg"));
    }

    #[test]
    fn test_empty_env_key_is_ignored_and_autogenerates() {
        let merged = SseOptions::default().merged_with(|name| match name {
            "S3_SSE_C_KEY" => Some(String::new()),
            _ => None,
        });
        let config = merged.build(true).unwrap().unwrap();
        assert!(config.generated);
        assert_eq!(
            STANDARD.decode(&config.key_b64).unwrap().len(),
            SSE_KEY_LEN
        );
    }

    #[test]
    fn test_empty_explicit_key_is_treated_as_absent() {
        let options = SseOptions {
            key: Some(String::new()),
            ..Default::default()
        };
        assert_eq!(options.build(false).unwrap(), None);
    }

    #[test]
    fn test_empty_env_bucket_yields_no_block() {
        let merged = S3Options::default().merged_with(|name| match name {
            "S3_BUCKET" => Some(String::new()),
            _ => None,
        });
        assert_eq!(merged.build(false).unwrap(), None);
    }

    #[test]
    fn test_s3_options_env_merge() {
        let merged = S3Options::default().merged_with(|name| match name {
            "S3_BUCKET" => Some("exports".to_string()),
            "S3_REGION_NAME" => Some("eu-west-1".to_string()),
            _ => None,
        });
        let config = merged.build(false).unwrap().unwrap();
        assert_eq!(config.bucket_name.as_deref(), Some("exports"));
        assert_eq!(config.region_name.as_deref(), Some("eu-west-1"));
        assert_eq!(config.encryption, None);
    }

    #[test]
    fn test_all_empty_yields_no_block() {
        assert_eq!(S3Options::default().build(false).unwrap(), None);
    }

    #[test]
    fn test_bare_autogenerate_yields_encryption_only_block() {
        let config = S3Options::default().build(true).unwrap().unwrap();
        assert!(config.bucket_name.is_none());
        assert!(config.encryption.is_some());
    }
}
