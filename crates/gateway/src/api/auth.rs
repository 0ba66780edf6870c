//! Bearer-token gate for the `/api` routes.
//!
//! The token itself is never kept in memory: bootstrap reads the env var
//! named by `config.server.api_token_env` once and stores only its
//! SHA-256 digest in `AppState`. With no token configured the gateway
//! runs open (dev mode) after a single startup warning.

use axum::body::Body;
use axum::extract::State;
use axum::http::{header, HeaderMap, Request, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use sha2::{Digest, Sha256};
use subtle::ConstantTimeEq;

use crate::state::AppState;

/// Middleware for the protected routes; attach with
/// `axum::middleware::from_fn_with_state`.
pub async fn require_api_token(
    State(state): State<AppState>,
    req: Request<Body>,
    next: Next,
) -> Response {
    let Some(expected) = state.api_token_hash.as_deref() else {
        return next.run(req).await;
    };

    if token_matches(req.headers(), expected) {
        next.run(req).await
    } else {
        (
            StatusCode::UNAUTHORIZED,
            axum::Json(serde_json::json!({ "error": "invalid or missing API token" })),
        )
            .into_response()
    }
}

/// Digest the presented bearer token and compare the two fixed-length
/// hashes in constant time, so neither token content nor length leaks
/// through the comparison.
fn token_matches(headers: &HeaderMap, expected_hash: &[u8]) -> bool {
    let presented = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
        .unwrap_or_default();
    let presented_hash = Sha256::digest(presented.as_bytes());
    bool::from(presented_hash.ct_eq(expected_hash))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn hash(token: &str) -> Vec<u8> {
        Sha256::digest(token.as_bytes()).to_vec()
    }

    #[test]
    fn matching_token_is_accepted() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer right-token"),
        );
        assert!(token_matches(&headers, &hash("right-token")));
    }

    #[test]
    fn wrong_token_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Bearer wrong-token"),
        );
        assert!(!token_matches(&headers, &hash("right-token")));
    }

    #[test]
    fn missing_header_is_rejected() {
        assert!(!token_matches(&HeaderMap::new(), &hash("right-token")));
    }

    #[test]
    fn non_bearer_scheme_is_rejected() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            HeaderValue::from_static("Basic cmlnaHQtdG9rZW4="),
        );
        assert!(!token_matches(&headers, &hash("right-token")));
    }
}
