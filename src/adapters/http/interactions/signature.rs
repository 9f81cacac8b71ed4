//! Ed25519 verification of inbound interaction requests.
//!
//! The platform signs `timestamp || body` with the application's key and
//! sends the signature and timestamp as headers. Requests whose timestamp
//! falls outside the accepted window are rejected before the signature is
//! checked.

use ed25519_dalek::{Signature, VerifyingKey, PUBLIC_KEY_LENGTH};
use thiserror::Error;

pub const SIGNATURE_HEADER: &str = "X-Signature-Ed25519";
pub const TIMESTAMP_HEADER: &str = "X-Signature-Timestamp";

/// Maximum age of a signed request (5 minutes).
const MAX_TIMESTAMP_AGE_SECS: i64 = 300;

/// Clock skew tolerance for future timestamps (60 seconds).
const MAX_FUTURE_TOLERANCE_SECS: i64 = 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignatureError {
    #[error("public key is not a valid Ed25519 key")]
    InvalidPublicKey,

    #[error("missing {0} header")]
    MissingHeader(&'static str),

    #[error("signature is not valid hex of the right length")]
    MalformedSignature,

    #[error("timestamp is not a unix time")]
    MalformedTimestamp,

    #[error("request is {age_secs}s old")]
    Expired { age_secs: i64 },

    #[error("request timestamp is in the future")]
    FromFuture,

    #[error("signature does not match")]
    Mismatch,
}

/// Verifies interaction signatures against the application's public key.
#[derive(Debug, Clone)]
pub struct InteractionVerifier {
    key: VerifyingKey,
}

impl InteractionVerifier {
    /// `public_key` is the hex-encoded key shown in the developer portal.
    pub fn from_hex(public_key: &str) -> Result<Self, SignatureError> {
        let bytes: [u8; PUBLIC_KEY_LENGTH] = hex::decode(public_key.trim())
            .map_err(|_| SignatureError::InvalidPublicKey)?
            .try_into()
            .map_err(|_| SignatureError::InvalidPublicKey)?;
        let key = VerifyingKey::from_bytes(&bytes).map_err(|_| SignatureError::InvalidPublicKey)?;
        Ok(Self { key })
    }

    pub fn from_key(key: VerifyingKey) -> Self {
        Self { key }
    }

    /// Checks the timestamp window against `now` (unix seconds), then the
    /// signature.
    pub fn verify(
        &self,
        signature: &str,
        timestamp: &str,
        body: &[u8],
        now: i64,
    ) -> Result<(), SignatureError> {
        let sent_at: i64 = timestamp
            .trim()
            .parse()
            .map_err(|_| SignatureError::MalformedTimestamp)?;
        let age = now - sent_at;

        if age > MAX_TIMESTAMP_AGE_SECS {
            tracing::warn!(
                request_timestamp = sent_at,
                current_time = now,
                age_secs = age,
                "Interaction too old - possible replay"
            );
            return Err(SignatureError::Expired { age_secs: age });
        }

        if age < -MAX_FUTURE_TOLERANCE_SECS {
            tracing::warn!(
                request_timestamp = sent_at,
                current_time = now,
                "Interaction from the future - clock skew or manipulation"
            );
            return Err(SignatureError::FromFuture);
        }

        let signature_bytes = hex::decode(signature.trim())
            .map_err(|_| SignatureError::MalformedSignature)?;
        let signature = Signature::from_slice(&signature_bytes)
            .map_err(|_| SignatureError::MalformedSignature)?;

        let mut message = Vec::with_capacity(timestamp.len() + body.len());
        message.extend_from_slice(timestamp.as_bytes());
        message.extend_from_slice(body);

        self.key.verify_strict(&message, &signature).map_err(|_| {
            tracing::warn!("Invalid interaction signature");
            SignatureError::Mismatch
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ed25519_dalek::{Signer, SigningKey};

    const NOW: i64 = 1_717_200_000;
    const BODY: &[u8] = br#"{"type":1}"#;

    fn signing_key() -> SigningKey {
        SigningKey::from_bytes(&[7u8; 32])
    }

    fn verifier() -> InteractionVerifier {
        InteractionVerifier::from_hex(&hex::encode(signing_key().verifying_key().to_bytes()))
            .unwrap()
    }

    fn sign(timestamp: &str, body: &[u8]) -> String {
        let mut message = timestamp.as_bytes().to_vec();
        message.extend_from_slice(body);
        hex::encode(signing_key().sign(&message).to_bytes())
    }

    #[test]
    fn valid_signature_is_accepted() {
        let ts = NOW.to_string();

        assert_eq!(verifier().verify(&sign(&ts, BODY), &ts, BODY, NOW), Ok(()));
    }

    #[test]
    fn tampered_body_is_rejected() {
        let ts = NOW.to_string();

        let result = verifier().verify(&sign(&ts, BODY), &ts, br#"{"type":2}"#, NOW);

        assert_eq!(result, Err(SignatureError::Mismatch));
    }

    #[test]
    fn signature_binds_timestamp() {
        let ts = NOW.to_string();
        let other = (NOW - 1).to_string();

        let result = verifier().verify(&sign(&ts, BODY), &other, BODY, NOW);

        assert_eq!(result, Err(SignatureError::Mismatch));
    }

    #[test]
    fn stale_request_is_rejected() {
        let ts = (NOW - 301).to_string();

        let result = verifier().verify(&sign(&ts, BODY), &ts, BODY, NOW);

        assert_eq!(result, Err(SignatureError::Expired { age_secs: 301 }));
    }

    #[test]
    fn five_minutes_old_is_still_accepted() {
        let ts = (NOW - 300).to_string();

        assert!(verifier().verify(&sign(&ts, BODY), &ts, BODY, NOW).is_ok());
    }

    #[test]
    fn future_request_is_rejected() {
        let ts = (NOW + 61).to_string();

        let result = verifier().verify(&sign(&ts, BODY), &ts, BODY, NOW);

        assert_eq!(result, Err(SignatureError::FromFuture));
    }

    #[test]
    fn garbage_signature_is_malformed() {
        let ts = NOW.to_string();

        assert_eq!(
            verifier().verify("zz", &ts, BODY, NOW),
            Err(SignatureError::MalformedSignature)
        );
        assert_eq!(
            verifier().verify("abcd", &ts, BODY, NOW),
            Err(SignatureError::MalformedSignature)
        );
    }

    #[test]
    fn non_numeric_timestamp_is_malformed() {
        assert_eq!(
            verifier().verify(&sign("soon", BODY), "soon", BODY, NOW),
            Err(SignatureError::MalformedTimestamp)
        );
    }

    #[test]
    fn short_public_key_is_rejected() {
        assert_eq!(
            InteractionVerifier::from_hex("abcd").unwrap_err(),
            SignatureError::InvalidPublicKey
        );
    }
}
