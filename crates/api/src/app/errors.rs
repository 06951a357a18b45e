//! Error-to-response mapping.
//!
//! Authorization outcomes are recoverable by design: they become a 303
//! redirect with a flash notice, never a hard 4xx. Two consequences drive
//! the shapes here:
//!
//! - `Unauthenticated` goes to the login page; every other authorization
//!   failure goes back to the dashboard with the reason flashed.
//! - A resource that is out of the caller's scope produces the exact same
//!   response as a resource that does not exist.
//!
//! Only backend failures are request-fatal, and those surface as an opaque
//! 500 with no internal detail.

use axum::http::{StatusCode, header};
use axum::response::IntoResponse;
use serde_json::json;

use staffhub_auth::AuthError;
use staffhub_infra::StoreError;

/// Cookie carrying the one-shot flash notice shown after a redirect.
pub const NOTICE_COOKIE: &str = "notice";

/// 303 redirect with a flash notice cookie.
pub fn see_other(location: &str, notice: &str) -> axum::response::Response {
    (
        StatusCode::SEE_OTHER,
        [
            (header::LOCATION, location.to_string()),
            (header::SET_COOKIE, notice_cookie(notice)),
        ],
    )
        .into_response()
}

/// No resolvable session.
pub fn unauthenticated() -> axum::response::Response {
    see_other("/login", "please sign in to continue")
}

/// Map an authorization failure to its redirect decision.
pub fn auth_error(err: AuthError) -> axum::response::Response {
    match err {
        AuthError::Unauthenticated => unauthenticated(),
        AuthError::PermissionDenied(_)
        | AuthError::InvalidRole(_)
        | AuthError::InvalidRoleTransition(_) => {
            tracing::debug!(reason = %err, "authorization denied");
            see_other("/dashboard", &err.to_string())
        }
    }
}

/// The uniform response for a resource the caller cannot see.
///
/// Used for rows that are missing and rows that exist outside the caller's
/// scope; the two must stay byte-identical.
pub fn unavailable(area: &str) -> axum::response::Response {
    see_other(area, "that item is not available")
}

/// Map a store failure to a response, redirecting back to `area`.
pub fn store_error(area: &str, err: StoreError) -> axum::response::Response {
    match err {
        StoreError::NotFound => unavailable(area),
        StoreError::Denied(e) => auth_error(e),
        StoreError::Domain(e) => see_other(area, &e.to_string()),
        StoreError::Conflict(msg) => see_other(area, &msg),
        StoreError::Backend { .. } => {
            tracing::error!(error = %err, "store backend failure");
            internal()
        }
    }
}

/// Opaque 500; internal detail stays in the logs.
pub fn internal() -> axum::response::Response {
    json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error", "internal error")
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

fn notice_cookie(message: &str) -> String {
    format!(
        "{NOTICE_COOKIE}={}; Path=/; Max-Age=60",
        cookie_encode(message)
    )
}

/// Percent-encode the bytes RFC 6265 keeps out of cookie values, plus
/// `%` itself so the encoding stays reversible.
fn cookie_encode(message: &str) -> String {
    let mut out = String::with_capacity(message.len());
    for byte in message.bytes() {
        match byte {
            b'!' | b'#' | b'$' | b'&'..=b'+' | b'-'..=b':' | b'<'..=b'[' | b']'..=b'~' => {
                out.push(byte as char)
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cookie_encoding_escapes_separators_and_spaces() {
        assert_eq!(cookie_encode("no-spaces"), "no-spaces");
        assert_eq!(cookie_encode("two words"), "two%20words");
        assert_eq!(cookie_encode("a;b,c\"d"), "a%3Bb%2Cc%22d");
        assert_eq!(cookie_encode("100%"), "100%25");
    }

    #[test]
    fn missing_and_out_of_scope_share_one_response_shape() {
        let a = unavailable("/vacations");
        let b = store_error("/vacations", StoreError::NotFound);
        assert_eq!(a.status(), b.status());
        assert_eq!(
            a.headers().get(header::LOCATION),
            b.headers().get(header::LOCATION)
        );
        assert_eq!(
            a.headers().get(header::SET_COOKIE),
            b.headers().get(header::SET_COOKIE)
        );
    }

    #[test]
    fn denials_redirect_to_the_dashboard() {
        let res = auth_error(AuthError::denied("role switching is reserved for developers"));
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(
            res.headers().get(header::LOCATION).unwrap(),
            "/dashboard"
        );
    }

    #[test]
    fn unauthenticated_redirects_to_login() {
        let res = auth_error(AuthError::Unauthenticated);
        assert_eq!(res.status(), StatusCode::SEE_OTHER);
        assert_eq!(res.headers().get(header::LOCATION).unwrap(), "/login");
    }
}
