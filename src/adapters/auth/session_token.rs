//! HMAC-SHA256 signed session tokens.
//!
//! Token format: `{session_uuid}.{hex(hmac_sha256(secret, session_uuid))}`.

use hmac::{Hmac, Mac};
use secrecy::{ExposeSecret, SecretString};
use sha2::Sha256;
use subtle::ConstantTimeEq;
use thiserror::Error;

use crate::domain::foundation::SessionId;

type HmacSha256 = Hmac<Sha256>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed session token")]
    Malformed,

    #[error("Invalid session token signature")]
    BadSignature,

    #[error("Signing key rejected: {0}")]
    Key(String),
}

pub struct SessionTokenSigner {
    secret: SecretString,
}

impl SessionTokenSigner {
    pub fn new(secret: SecretString) -> Self {
        Self { secret }
    }

    fn mac(&self, payload: &str) -> Result<Vec<u8>, TokenError> {
        let mut mac = HmacSha256::new_from_slice(self.secret.expose_secret().as_bytes())
            .map_err(|e| TokenError::Key(e.to_string()))?;
        mac.update(payload.as_bytes());
        Ok(mac.finalize().into_bytes().to_vec())
    }

    pub fn sign(&self, id: SessionId) -> Result<String, TokenError> {
        let payload = id.to_string();
        let signature = self.mac(&payload)?;
        Ok(format!("{}.{}", payload, hex::encode(signature)))
    }

    /// Returns the session id when the signature matches.
    pub fn verify(&self, token: &str) -> Result<SessionId, TokenError> {
        let (payload, signature) = token.trim().split_once('.').ok_or(TokenError::Malformed)?;
        let provided = hex::decode(signature).map_err(|_| TokenError::Malformed)?;
        let expected = self.mac(payload)?;

        if expected.as_slice().ct_eq(provided.as_slice()).unwrap_u8() != 1 {
            tracing::warn!("Rejected session token with invalid signature");
            return Err(TokenError::BadSignature);
        }

        payload.parse().map_err(|_| TokenError::Malformed)
    }
}
