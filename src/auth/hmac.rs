//! HMAC validation for OAuth callbacks and webhook deliveries.
//!
//! Shopify signs OAuth callback query strings with a hex-encoded
//! HMAC-SHA256 (`hmac` parameter) and webhook payloads with a
//! base64-encoded HMAC-SHA256 (`X-Shopify-Hmac-SHA256` header). Both are
//! verified here with constant-time comparison to prevent timing attacks.
//!
//! # Example
//!
//! ```rust
//! use shopify_admin::auth::hmac::{compute_signature, compute_signature_base64};
//!
//! // Hex-encoded signature for OAuth callbacks
//! let message = "code=abc123&shop=example.myshopify.com&state=xyz";
//! let signature = compute_signature(message, "my-api-secret");
//! assert!(signature.chars().all(|c| c.is_ascii_hexdigit()));
//!
//! // Base64-encoded signature for webhooks
//! let webhook_sig = compute_signature_base64(b"webhook payload", "my-api-secret");
//! assert_eq!(webhook_sig.len(), 44); // Base64 of 32 bytes
//! ```

use base64::prelude::*;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use subtle::ConstantTimeEq;

type HmacSha256 = Hmac<Sha256>;

/// Computes a lowercase hex-encoded HMAC-SHA256 signature.
///
/// This is the encoding Shopify uses for the `hmac` parameter on OAuth
/// callbacks.
///
/// # Example
///
/// ```rust
/// use shopify_admin::auth::hmac::compute_signature;
///
/// let sig = compute_signature("test-message", "secret-key");
/// assert_eq!(sig.len(), 64); // SHA256 produces 32 bytes = 64 hex chars
/// ```
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature(message: &str, secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message.as_bytes());
    hex_encode(mac.finalize().into_bytes())
}

/// Computes a base64-encoded HMAC-SHA256 signature over raw bytes.
///
/// This is the encoding Shopify uses for the `X-Shopify-Hmac-SHA256`
/// webhook header. The message is raw bytes so the exact payload is
/// signed without UTF-8 interpretation.
#[must_use]
#[allow(clippy::missing_panics_doc)] // HMAC accepts any key size, so this never panics
pub fn compute_signature_base64(message: &[u8], secret: &str) -> String {
    let mut mac =
        HmacSha256::new_from_slice(secret.as_bytes()).expect("HMAC can take key of any size");
    mac.update(message);
    BASE64_STANDARD.encode(mac.finalize().into_bytes())
}

/// Performs constant-time comparison of two strings.
///
/// Used for all signature comparisons in this module; `ConstantTimeEq`
/// handles differing lengths securely.
#[must_use]
pub fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Validates the `hmac` parameter of an OAuth callback.
///
/// `params` are the callback's query parameters. The signable message is
/// every parameter except `hmac`, sorted by key and joined as
/// `key=value&key=value`, matching how Shopify computes the signature.
///
/// # Example
///
/// ```rust
/// use shopify_admin::auth::hmac::{compute_signature, verify_callback_hmac};
///
/// let mut params = vec![
///     ("shop".to_string(), "example.myshopify.com".to_string()),
///     ("code".to_string(), "auth-code".to_string()),
///     ("state".to_string(), "nonce".to_string()),
/// ];
/// let signature = compute_signature(
///     "code=auth-code&shop=example.myshopify.com&state=nonce",
///     "secret",
/// );
/// params.push(("hmac".to_string(), signature));
///
/// assert!(verify_callback_hmac(&params, "secret"));
/// ```
#[must_use]
pub fn verify_callback_hmac(params: &[(String, String)], secret: &str) -> bool {
    let Some(received) = params
        .iter()
        .find(|(key, _)| key == "hmac")
        .map(|(_, value)| value)
    else {
        return false;
    };

    let mut signable: Vec<&(String, String)> =
        params.iter().filter(|(key, _)| key != "hmac").collect();
    signable.sort_by(|a, b| a.0.cmp(&b.0));

    let message = signable
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join("&");

    constant_time_compare(&compute_signature(&message, secret), received)
}

/// Validates the `X-Shopify-Hmac-SHA256` header of a webhook delivery.
///
/// `body` must be the raw request body exactly as received; re-serialized
/// JSON will not verify.
#[must_use]
pub fn verify_webhook_hmac(body: &[u8], secret: &str, header_value: &str) -> bool {
    constant_time_compare(&compute_signature_base64(body, secret), header_value)
}

// Internal hex encoding; small enough not to warrant a dependency.
fn hex_encode(bytes: impl AsRef<[u8]>) -> String {
    const HEX_CHARS: &[u8; 16] = b"0123456789abcdef";

    let bytes = bytes.as_ref();
    let mut result = String::with_capacity(bytes.len() * 2);
    for &byte in bytes {
        result.push(HEX_CHARS[(byte >> 4) as usize] as char);
        result.push(HEX_CHARS[(byte & 0x0f) as usize] as char);
    }
    result
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_signature_matches_known_value() {
        // Known HMAC-SHA256 test vector
        let sig = compute_signature("message", "key");
        assert_eq!(
            sig,
            "6e9ef29b75fffc5b7abae527d58fdadb2fe42e7219011976917343065f58ed4a"
        );
    }

    #[test]
    fn test_compute_signature_is_lowercase_hex() {
        let sig = compute_signature("test", "secret");
        assert_eq!(sig.len(), 64);
        assert!(sig.chars().all(|c| c.is_ascii_hexdigit()));
        assert!(sig.chars().all(|c| !c.is_ascii_uppercase()));
    }

    #[test]
    fn test_compute_signature_base64_matches_known_value() {
        // Same vector as above, base64-encoded
        let sig = compute_signature_base64(b"message", "key");
        assert_eq!(sig, "bp7ym3X//Ft6uuUn1Y/a2y/kLnIZARl2kXNDBl9Y7Uo=");
    }

    #[test]
    fn test_compute_signature_base64_handles_non_utf8_bytes() {
        let non_utf8: &[u8] = &[0x80, 0x81, 0xff, 0xfe];
        let sig = compute_signature_base64(non_utf8, "secret");
        assert_eq!(sig.len(), 44);
    }

    #[test]
    fn test_constant_time_compare() {
        assert!(constant_time_compare("abc123", "abc123"));
        assert!(!constant_time_compare("abc123", "abc124"));
        assert!(!constant_time_compare("abc", "abcd"));
        assert!(constant_time_compare("", ""));
    }

    fn signed_params(secret: &str) -> Vec<(String, String)> {
        let mut params = vec![
            ("shop".to_string(), "test-shop.myshopify.com".to_string()),
            ("code".to_string(), "auth-code".to_string()),
            ("timestamp".to_string(), "1234567890".to_string()),
            ("state".to_string(), "nonce-value".to_string()),
        ];
        let message =
            "code=auth-code&shop=test-shop.myshopify.com&state=nonce-value&timestamp=1234567890";
        params.push(("hmac".to_string(), compute_signature(message, secret)));
        params
    }

    #[test]
    fn test_verify_callback_hmac_succeeds_with_correct_signature() {
        let params = signed_params("test-secret");
        assert!(verify_callback_hmac(&params, "test-secret"));
    }

    #[test]
    fn test_verify_callback_hmac_fails_with_wrong_secret() {
        let params = signed_params("test-secret");
        assert!(!verify_callback_hmac(&params, "other-secret"));
    }

    #[test]
    fn test_verify_callback_hmac_fails_with_tampered_params() {
        let mut params = signed_params("test-secret");
        for param in &mut params {
            if param.0 == "code" {
                param.1 = "tampered".to_string();
            }
        }
        assert!(!verify_callback_hmac(&params, "test-secret"));
    }

    #[test]
    fn test_verify_callback_hmac_fails_without_hmac_param() {
        let params = vec![("shop".to_string(), "test-shop.myshopify.com".to_string())];
        assert!(!verify_callback_hmac(&params, "test-secret"));
    }

    #[test]
    fn test_verify_webhook_hmac_round_trip() {
        let body = br#"{"id":1,"topic":"orders/create"}"#;
        let signature = compute_signature_base64(body, "webhook-secret");

        assert!(verify_webhook_hmac(body, "webhook-secret", &signature));
        assert!(!verify_webhook_hmac(body, "wrong-secret", &signature));
        assert!(!verify_webhook_hmac(b"other body", "webhook-secret", &signature));
    }
}
