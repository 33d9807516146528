//! Object-storage destination and SSE-C encryption descriptors.

use serde::Serialize;

/// A customer-supplied-key (SSE-C) encryption descriptor.
///
/// Serializes to the wire field names the export API expects. The
/// [`generated`](Self::generated) flag is display metadata for the CLI (so a
/// freshly generated key can be shown once for the user to save) and is never
/// transmitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EncryptionConfig {
    /// Base64 text decoding to exactly 32 bytes.
    #[serde(rename = "sse_customer_key")]
    pub key_b64: String,

    /// Encryption algorithm, `AES256` unless overridden.
    #[serde(rename = "sse_customer_algorithm")]
    pub algorithm: String,

    /// Base64 of the MD5 digest of the raw key bytes.
    #[serde(rename = "sse_customer_key_md5")]
    pub key_md5_b64: String,

    /// True only when the key was synthesized by the builder rather than
    /// supplied by the caller or environment.
    #[serde(skip)]
    pub generated: bool,
}

/// Custom S3 destination settings for an export.
///
/// Every field is optional; fields that were not provided are omitted from
/// the request body entirely.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct S3Config {
    /// Destination bucket name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket_name: Option<String>,

    /// Key prefix inside the bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,

    /// Access key ID for the destination bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_key_id: Option<String>,

    /// Secret access key for the destination bucket.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub secret_access_key: Option<String>,

    /// Custom endpoint URL (non-AWS object storage).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub endpoint_url: Option<String>,

    /// Bucket region name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub region_name: Option<String>,

    /// SSE-C encryption settings, flattened into the same object.
    #[serde(flatten)]
    pub encryption: Option<EncryptionConfig>,
}

impl S3Config {
    /// Returns true when no setting at all was provided, in which case no
    /// `s3` block should be sent to the server.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.bucket_name.is_none()
            && self.prefix.is_none()
            && self.access_key_id.is_none()
            && self.secret_access_key.is_none()
            && self.endpoint_url.is_none()
            && self.region_name.is_none()
            && self.encryption.is_none()
    }

    /// Returns true when any non-encryption bucket setting is present.
    #[must_use]
    pub const fn has_bucket_settings(&self) -> bool {
        self.bucket_name.is_some()
            || self.prefix.is_some()
            || self.access_key_id.is_some()
            || self.secret_access_key.is_some()
            || self.endpoint_url.is_some()
            || self.region_name.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generated_flag_is_never_serialized() {
        let config = EncryptionConfig {
            key_b64: "a".repeat(44),
            algorithm: "AES256".to_string(),
            key_md5_b64: "b".repeat(24),
            generated: true,
        };
        let value = serde_json::to_value(&config).unwrap();
        let object = value.as_object().unwrap();
        assert!(object.contains_key("sse_customer_key"));
        assert!(object.contains_key("sse_customer_algorithm"));
        assert!(object.contains_key("sse_customer_key_md5"));
        assert!(!object.contains_key("generated"));
    }

    #[test]
    fn test_s3_config_omits_absent_fields() {
        let config = S3Config {
            bucket_name: Some("exports".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 1);
        assert_eq!(object["bucket_name"], "exports");
    }

    #[test]
    fn test_s3_config_flattens_encryption() {
        let config = S3Config {
            encryption: Some(EncryptionConfig {
                key_b64: "key".to_string(),
                algorithm: "AES256".to_string(),
                key_md5_b64: "md5".to_string(),
                generated: false,
            }),
            ..Default::default()
        };
        let value = serde_json::to_value(&config).unwrap();
        assert_eq!(value["sse_customer_key"], "key");
        assert_eq!(value["sse_customer_algorithm"], "AES256");
        assert_eq!(value["sse_customer_key_md5"], "md5");
    }

    #[test]
    fn test_is_empty() {
        assert!(S3Config::default().is_empty());
        let config = S3Config {
            prefix: Some("daily/".to_string()),
            ..Default::default()
        };
        assert!(!config.is_empty());
        assert!(config.has_bucket_settings());
    }
}
