//! JWT creation and verification.
//!
//! Tokens are signed with HS256 using [`JwtConfig::secret`]. Verification
//! rejects a token when its signature does not match, when its payload cannot
//! be decoded into [`Claims`], or when the current time has reached `exp`.
//! No leeway is applied to the expiry check.

use chrono::Utc;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};

use bookswap_config::JwtConfig;
use bookswap_core::AppError;

use crate::claims::Claims;

/// Creates an access token for `subject` using the configured lifetime.
pub fn create_access_token(subject: &str, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now.saturating_add(jwt_config.access_token_expiry);
    issue(subject, now, exp, jwt_config)
}

/// Creates an access token for `subject` that expires `ttl_minutes` from now.
///
/// A negative `ttl_minutes` produces a token that is already expired, which is
/// only useful in tests.
pub fn create_access_token_with_ttl(
    subject: &str,
    ttl_minutes: i64,
    jwt_config: &JwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp();
    let exp = now.saturating_add(ttl_minutes.saturating_mul(60));
    issue(subject, now, exp, jwt_config)
}

fn issue(subject: &str, iat: i64, exp: i64, jwt_config: &JwtConfig) -> Result<String, AppError> {
    let claims = Claims {
        sub: subject.to_string(),
        exp: exp.max(0) as usize,
        iat: iat.max(0) as usize,
    };

    encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(jwt_config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create token: {}", e)))
}

/// Verifies an access token and returns the embedded claims.
///
/// # Errors
///
/// Returns an `InvalidToken` error if the signature is invalid, the payload is
/// malformed, or the token has expired.
pub fn verify_token(token: &str, jwt_config: &JwtConfig) -> Result<Claims, AppError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.leeway = 0;
    validation.set_required_spec_claims(&["exp", "sub"]);

    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt_config.secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::invalid_token("Invalid or expired token"))?;

    // jsonwebtoken accepts exp == now; a token is dead from its expiry second on.
    if claims.is_expired_at(Utc::now().timestamp().max(0) as usize) {
        return Err(AppError::invalid_token("Invalid or expired token"));
    }

    if claims.sub.is_empty() {
        return Err(AppError::invalid_token("Token has no subject"));
    }

    Ok(claims)
}
