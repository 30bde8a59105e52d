use anyhow::{anyhow, Result};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use webstat_core::identity::Identity;

/// Session token claims shared with the identity provider.
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub role: String,
    pub exp: i64,
    pub iat: i64,
}

impl From<Claims> for Identity {
    fn from(claims: Claims) -> Self {
        Identity::new(claims.sub, claims.role)
    }
}

/// Encode a JWT token for `identity`.
///
/// Returns (token_string, expires_at_rfc3339).
pub fn encode_jwt(secret: &str, identity: &Identity, session_days: u32) -> Result<(String, String)> {
    let now = Utc::now();
    let exp = now + Duration::days(session_days as i64);

    let claims = Claims {
        sub: identity.id.clone(),
        role: identity.role.clone(),
        exp: exp.timestamp(),
        iat: now.timestamp(),
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| anyhow!("encode_jwt: {}", e))?;

    Ok((token, exp.to_rfc3339()))
}

/// Decode and validate a JWT token.
pub fn decode_jwt(token: &str, secret: &str) -> Result<Claims> {
    let data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| anyhow!("decode_jwt: {}", e))?;

    Ok(data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_carries_identity() {
        let identity = Identity::new("user_1", "authenticated");
        let (token, _) = encode_jwt("secret", &identity, 7).expect("encode");
        let decoded: Identity = decode_jwt(&token, "secret").expect("decode").into();
        assert_eq!(decoded, identity);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let identity = Identity::new("user_1", "authenticated");
        let (token, _) = encode_jwt("secret", &identity, 7).expect("encode");
        assert!(decode_jwt(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let claims = Claims {
            sub: "user_1".to_string(),
            role: "authenticated".to_string(),
            exp: Utc::now().timestamp() - 3600,
            iat: Utc::now().timestamp() - 7200,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"secret"),
        )
        .expect("encode");
        assert!(decode_jwt(&token, "secret").is_err());
    }
}
