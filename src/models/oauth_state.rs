//! OAuth2 CSRF state token
//!
//! Encodes the random nonce plus the caller identity that ties an
//! authorization redirect to its callback.

use base64::engine::general_purpose::{URL_SAFE, URL_SAFE_NO_PAD};
use base64::Engine as _;
use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::utils::{AppError, AppResult};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct OAuthState {
    /// Random nonce proving the callback matches an authorize request
    pub state: String,
    pub user_id: String,
    pub org_id: String,
}

impl OAuthState {
    /// Creates a state token with a fresh 256-bit nonce
    pub fn new(user_id: impl Into<String>, org_id: impl Into<String>) -> Self {
        let mut nonce = [0u8; 32];
        rand::thread_rng().fill_bytes(&mut nonce);

        Self {
            state: URL_SAFE_NO_PAD.encode(nonce),
            user_id: user_id.into(),
            org_id: org_id.into(),
        }
    }

    /// Serializes to the URL-safe form appended to the authorization URL
    pub fn encode(&self) -> AppResult<String> {
        let json = serde_json::to_vec(self)?;
        Ok(URL_SAFE.encode(json))
    }

    pub fn decode(encoded: &str) -> AppResult<Self> {
        let bytes = URL_SAFE
            .decode(encoded.as_bytes())
            .map_err(|_| AppError::ValidationError("Invalid state format.".to_string()))?;

        serde_json::from_slice(&bytes)
            .map_err(|_| AppError::ValidationError("Invalid state format.".to_string()))
    }
}
