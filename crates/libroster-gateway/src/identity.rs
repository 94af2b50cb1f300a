//! Authenticated principal, forwarded by the auth proxy.
//!
//! The proxy terminates the OAuth flow and forwards `X-Auth-Email` /
//! `X-Auth-Name` on every request. This core trusts that email as the
//! caller's identity and as the manager-lookup key; requests without it are
//! rejected before any handler runs.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::http::StatusCode;
use axum::http::request::Parts;

pub const AUTH_EMAIL_HEADER: &str = "x-auth-email";
pub const AUTH_NAME_HEADER: &str = "x-auth-name";

#[derive(Debug, Clone)]
pub struct Identity {
    pub email: String,
    pub name: String,
}

impl<S: Send + Sync> FromRequestParts<S> for Identity {
    type Rejection = (StatusCode, Json<serde_json::Value>);

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let header = |name: &str| {
            parts
                .headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
                .map(String::from)
        };

        let Some(email) = header(AUTH_EMAIL_HEADER) else {
            return Err((
                StatusCode::UNAUTHORIZED,
                Json(serde_json::json!({"error": "Unauthorized"})),
            ));
        };
        let name = header(AUTH_NAME_HEADER).unwrap_or_default();

        Ok(Identity { email, name })
    }
}
