//! HS512 compact token codec

use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, Header, Validation};

use crate::domain::entities::claims::Claims;
use crate::errors::TokenError;
use crate::services::policy::SigningKey;

/// Signing algorithm for every token kind
pub const ALGORITHM: Algorithm = Algorithm::HS512;

/// Reason a token string was not accepted
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Rejection {
    /// Signature valid but `exp` has been reached
    Expired,
    /// Signature does not match the key
    Signature,
    /// Not a well-formed token, wrong algorithm, or missing claims
    Malformed(String),
}

/// Encodes and signs claims into a compact token
pub fn sign(key: &SigningKey, claims: &Claims) -> Result<String, TokenError> {
    encode(&Header::new(ALGORITHM), claims, key.encoding_key()).map_err(|e| {
        TokenError::Signing {
            message: e.to_string(),
        }
    })
}

/// Verifies signature and expiration, then returns the claims
///
/// A token is expired from the second named by `exp` onwards. `jsonwebtoken`
/// only rejects once `exp` is strictly in the past, so the boundary second is
/// checked here.
pub fn verify(key: &SigningKey, token: &str) -> Result<Claims, Rejection> {
    let claims = decode::<Claims>(token, key.decoding_key(), &validation())
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => Rejection::Expired,
            ErrorKind::InvalidSignature => Rejection::Signature,
            _ => Rejection::Malformed(e.to_string()),
        })?;

    if claims.is_expired() {
        return Err(Rejection::Expired);
    }
    Ok(claims)
}

fn validation() -> Validation {
    let mut validation = Validation::new(ALGORITHM);
    validation.leeway = 0;
    validation.validate_exp = true;
    validation.validate_aud = false;
    validation.set_required_spec_claims(&["exp", "sub"]);
    validation
}
