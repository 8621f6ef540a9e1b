//! Authentication Middleware
//!
//! Bearer token validation for protected routes. Tokens are issued by the
//! external identity provider; this server only verifies them.

use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{decode, errors::ErrorKind, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use crate::config::{AuthSettings, TokenAlgorithm};
use crate::domain::UserId;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// JWT claims structure (Keycloak access token subset)
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at time (Unix timestamp)
    #[serde(default)]
    pub iat: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_username: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realm_access: Option<RealmAccess>,
}

/// Realm-level role assignments
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RealmAccess {
    #[serde(default)]
    pub roles: Vec<String>,
}

/// Authenticated user extension
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub user_id: UserId,
    pub username: String,
    pub name: Option<String>,
    pub email: Option<String>,
    /// Realm roles from the token. Carried for request logging only;
    /// authorization is decided by group ownership and membership.
    pub roles: Vec<String>,
}

impl AuthUser {
    pub fn from_claims(claims: Claims) -> Result<Self, AppError> {
        let user_id = UserId::new(claims.sub.clone())
            .map_err(|_| AppError::Unauthorized("Invalid token claims".into()))?;

        Ok(Self {
            user_id,
            username: claims.preferred_username.unwrap_or(claims.sub),
            name: claims.name,
            email: claims.email,
            roles: claims.realm_access.map(|r| r.roles).unwrap_or_default(),
        })
    }

    /// Name shown to other players: full name if present, else the login.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .filter(|n| !n.trim().is_empty())
            .unwrap_or(&self.username)
    }
}

/// Verifies bearer tokens against the configured key.
pub struct TokenVerifier {
    key: DecodingKey,
    validation: Validation,
}

impl TokenVerifier {
    pub fn from_settings(settings: &AuthSettings) -> Result<Self, AppError> {
        let (key, algorithm) = match settings.algorithm {
            TokenAlgorithm::HS256 => {
                let secret = settings
                    .secret
                    .as_deref()
                    .ok_or_else(|| AppError::Internal("HS256 requires a shared secret".into()))?;
                (DecodingKey::from_secret(secret.as_bytes()), Algorithm::HS256)
            }
            TokenAlgorithm::RS256 => {
                let pem = settings
                    .public_key_pem
                    .as_deref()
                    .ok_or_else(|| AppError::Internal("RS256 requires a public key".into()))?;
                let key = DecodingKey::from_rsa_pem(pem.as_bytes())
                    .map_err(|e| AppError::Internal(format!("Invalid public key: {}", e)))?;
                (key, Algorithm::RS256)
            }
        };

        let mut validation = Validation::new(algorithm);
        validation.leeway = settings.leeway_secs;
        if let Some(issuer) = &settings.issuer {
            validation.set_issuer(&[issuer]);
        }
        match &settings.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Ok(Self { key, validation })
    }

    /// Decode and validate a raw token.
    pub fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::Unauthorized("Token expired".into()),
                _ => AppError::Unauthorized("Invalid token".into()),
            })
    }
}

/// Authentication middleware that validates JWT tokens
pub async fn auth_middleware(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Result<Response, AppError> {
    // Extract Authorization header
    let auth_header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| AppError::Unauthorized("Missing authorization header".into()))?;

    // Check for Bearer token
    let token = auth_header
        .strip_prefix("Bearer ")
        .ok_or_else(|| AppError::Unauthorized("Invalid authorization header format".into()))?;

    let claims = state.tokens.verify(token)?;
    let user = AuthUser::from_claims(claims)?;
    tracing::debug!(user_id = %user.user_id, roles = ?user.roles, "Request authenticated");

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}
