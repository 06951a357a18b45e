use std::sync::Arc;

use axum::{
    extract::State,
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use staffhub_auth::{SessionCodec, require_authenticated};

use crate::app::errors;

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<SessionCodec>,
}

/// Resolve the session principal and stash it in request extensions.
///
/// A missing, malformed or expired token all resolve the same way: the
/// bearer has no session and is redirected to the login page.
pub async fn session_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Response {
    let principal = extract_token(req.headers())
        .and_then(|token| state.codec.verify(&token, Utc::now()).ok())
        .map(|claims| claims.principal());

    match require_authenticated(principal.as_ref()) {
        Ok(principal) => {
            let principal = principal.clone();
            req.extensions_mut().insert(principal);
            next.run(req).await
        }
        Err(e) => errors::auth_error(e),
    }
}

/// Token from `Authorization: Bearer` (API clients) or the `session`
/// cookie (the browser portal).
fn extract_token(headers: &HeaderMap) -> Option<String> {
    if let Some(header) = headers.get(axum::http::header::AUTHORIZATION) {
        let header = header.to_str().ok()?;
        let token = header.strip_prefix("Bearer ")?.trim();
        if token.is_empty() {
            return None;
        }
        return Some(token.to_string());
    }

    let cookies = headers.get(axum::http::header::COOKIE)?.to_str().ok()?;
    cookies.split(';').find_map(|pair| {
        let token = pair.trim().strip_prefix("session=")?.trim();
        if token.is_empty() {
            None
        } else {
            Some(token.to_string())
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    #[test]
    fn bearer_header_wins_over_cookie() {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer abc".parse().unwrap());
        headers.insert(header::COOKIE, "session=def".parse().unwrap());
        assert_eq!(extract_token(&headers).as_deref(), Some("abc"));
    }

    #[test]
    fn session_cookie_is_found_among_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            "theme=dark; session=tok123; lang=en".parse().unwrap(),
        );
        assert_eq!(extract_token(&headers).as_deref(), Some("tok123"));
    }

    #[test]
    fn empty_or_missing_tokens_resolve_to_none() {
        assert_eq!(extract_token(&HeaderMap::new()), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Bearer ".parse().unwrap());
        assert_eq!(extract_token(&headers), None);

        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, "Basic abc".parse().unwrap());
        assert_eq!(extract_token(&headers), None);
    }
}
