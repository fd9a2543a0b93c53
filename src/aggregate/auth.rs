use axum::extract::FromRequestParts;
use axum::http::header::AUTHORIZATION;
use axum::http::request::Parts;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};

use super::routes::AppState;
use super::AggregateError;
use crate::exchange::issuer::InternalClaims;
use crate::utils::constants::INTERNAL_ISSUER;

/// Self-verifying token source: unlike the exchanger's pre-verified payload
/// header, nothing upstream vouches for the bearer token, so signature,
/// issuer and expiry are all checked here against the mesh public key.
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn new(decoding_key: DecodingKey) -> Self {
        let mut validation = Validation::new(Algorithm::RS256);
        validation.set_issuer(&[INTERNAL_ISSUER]);
        validation.validate_aud = false;

        Self {
            decoding_key,
            validation,
        }
    }

    pub fn verify(&self, token: &str) -> Result<InternalClaims, AggregateError> {
        decode::<InternalClaims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| AggregateError::Authentication(e.to_string()))
    }
}

/// Extractor that runs token verification before the handler body. On
/// failure the request short-circuits with 401 and no downstream call is
/// ever made.
pub struct AuthenticatedUser {
    pub claims: InternalClaims,
    /// Raw `Authorization` header value, propagated unchanged downstream.
    pub authorization: String,
}

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = AggregateError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let authorization = parts
            .headers
            .get(AUTHORIZATION)
            .and_then(|v| v.to_str().ok())
            .ok_or_else(|| AggregateError::Authentication("Authorization header required".to_owned()))?
            .to_owned();

        let token = authorization
            .strip_prefix("Bearer ")
            .ok_or_else(|| AggregateError::Authentication("Bearer token required".to_owned()))?;

        let claims = state.verifier.verify(token)?;

        Ok(Self {
            claims,
            authorization,
        })
    }
}
