use jsonwebtoken::{encode, Algorithm, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::claims::AllowListedClaims;
use super::ExchangeError;
use crate::helpers::time::now_u64;
use crate::utils::constants::{INTERNAL_ISSUER, TOKEN_TTL_SECS};

/// Claim set of a signed internal token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InternalClaims {
    pub iss: String,
    pub sub: String,
    pub preferred_username: String,
    pub exp: u64,
    pub iat: u64,
}

/// Stateless signer holding the process-wide private key.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    issuer: String,
    ttl_secs: u64,
}

impl TokenIssuer {
    pub fn new(encoding_key: EncodingKey) -> Self {
        Self {
            encoding_key,
            issuer: INTERNAL_ISSUER.to_owned(),
            ttl_secs: TOKEN_TTL_SECS,
        }
    }

    /// Sign a fresh internal token carrying exactly the allow-listed claims.
    pub fn issue(&self, claims: &AllowListedClaims) -> Result<String, ExchangeError> {
        let iat = now_u64();
        let internal = InternalClaims {
            iss: self.issuer.clone(),
            sub: claims.sub.clone(),
            preferred_username: claims.preferred_username.clone(),
            exp: iat + self.ttl_secs,
            iat,
        };

        let token = encode(&Header::new(Algorithm::RS256), &internal, &self.encoding_key)?;

        debug!(sub = %internal.sub, exp = internal.exp, "issued internal token");
        Ok(token)
    }
}
