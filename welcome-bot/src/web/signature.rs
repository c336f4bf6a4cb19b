//! Pachca webhook signature verification and replay protection.
//!
//! Pachca signs the raw request body with HMAC-SHA256 using the webhook's
//! signing secret and sends the hex digest in the `pachca-signature` header.

use std::time::{SystemTime, UNIX_EPOCH};

use hmac::{Hmac, Mac};
use sha2::Sha256;
use tracing::warn;

type HmacSha256 = Hmac<Sha256>;

/// Header carrying the hex-encoded body signature.
pub const SIGNATURE_HEADER: &str = "pachca-signature";

/// Verify a Pachca webhook signature.
///
/// Pachca computes HMAC-SHA256 over the exact request body bytes with the
/// webhook's signing secret and sends the lowercase hex digest. The digest is
/// decoded and compared in constant time, so hex case does not matter.
///
/// # Arguments
///
/// * `secret` - The signing secret of the outgoing webhook
/// * `body` - The raw, unparsed request body
/// * `signature` - The value of the `pachca-signature` header
///
/// # Returns
///
/// `true` if the signature matches the body, `false` otherwise.
pub fn verify_signature(secret: &str, body: &[u8], signature: &str) -> bool {
    let provided = match hex::decode(signature.trim()) {
        Ok(bytes) => bytes,
        Err(_) => {
            warn!(signature_length = signature.len(), "webhook_signature_not_hex");
            return false;
        }
    };

    let mut mac = match HmacSha256::new_from_slice(secret.as_bytes()) {
        Ok(m) => m,
        Err(_) => {
            warn!("webhook_signature_invalid_key");
            return false;
        }
    };
    mac.update(body);

    let valid = mac.verify_slice(&provided).is_ok();
    if !valid {
        warn!(
            body_length = body.len(),
            signature_length = signature.len(),
            "webhook_signature_mismatch"
        );
    }

    valid
}

/// Check a webhook send time against the replay window.
///
/// # Arguments
///
/// * `sent_at` - The `webhook_timestamp` of the event, if it carried one
/// * `now` - Current Unix time in seconds
/// * `max_age_seconds` - Maximum allowed drift in either direction
///
/// # Returns
///
/// `true` if the event has no timestamp or its drift is at most
/// `max_age_seconds` (the boundary is inclusive), `false` otherwise.
pub fn is_fresh(sent_at: Option<f64>, now: i64, max_age_seconds: u64) -> bool {
    match sent_at {
        Some(sent_at) => drift(sent_at, now) <= max_age_seconds as f64,
        None => true,
    }
}

/// Absolute difference in seconds between a send time and `now`.
pub fn drift(sent_at: f64, now: i64) -> f64 {
    (now as f64 - sent_at).abs()
}

/// Current Unix time in seconds.
pub fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .unwrap_or_default()
}

/// Compute the hex HMAC-SHA256 of `body` under `secret`, as Pachca does.
#[cfg(test)]
pub(crate) fn sign(secret: &str, body: &[u8]) -> String {
    let mut mac = HmacSha256::new_from_slice(secret.as_bytes()).unwrap();
    mac.update(body);
    hex::encode(mac.finalize().into_bytes())
}
