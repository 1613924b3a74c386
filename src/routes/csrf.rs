//! Form tokens (double-submit cookie).
//!
//! Every browser gets a random client id in the `cafe_client` cookie. A form
//! token is `<issued_at>.<sha256(secret:scope:client:issued_at)>`, so it only
//! verifies when sent back together with the cookie it was issued for, and
//! only within `TOKEN_MAX_AGE_SECS`.

use axum_extra::extract::cookie::{Cookie, CookieJar, SameSite};
use sha2::{Digest, Sha256};

use crate::error::AppError;

pub const CLIENT_COOKIE: &str = "cafe_client";

/// Tokens older than this are rejected.
pub const TOKEN_MAX_AGE_SECS: i64 = 3600;

/// Allowed clock skew for tokens stamped slightly in the future.
const FUTURE_SKEW_SECS: i64 = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenScope {
    /// Add and edit forms.
    Cafe,
    /// Per-row delete buttons.
    Delete,
}

impl TokenScope {
    fn as_str(&self) -> &'static str {
        match self {
            Self::Cafe => "cafe",
            Self::Delete => "delete",
        }
    }
}

pub fn new_client_id() -> String {
    uuid::Uuid::new_v4().simple().to_string()
}

fn is_client_id(value: &str) -> bool {
    value.len() == 32 && value.bytes().all(|b| b.is_ascii_hexdigit())
}

/// Client id from the request cookie, if it is well formed.
pub fn client_id(jar: &CookieJar) -> Option<String> {
    jar.get(CLIENT_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| is_client_id(v))
}

/// Reuse the request's client id or mint one and attach it to the response jar.
pub fn ensure_client(jar: CookieJar) -> (CookieJar, String) {
    if let Some(id) = client_id(&jar) {
        return (jar, id);
    }
    let id = new_client_id();
    let cookie = Cookie::build((CLIENT_COOKIE, id.clone()))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax);
    (jar.add(cookie), id)
}

fn digest(secret: &str, scope: TokenScope, client: &str, issued_at: i64) -> String {
    let mut hasher = Sha256::new();
    hasher.update(secret.as_bytes());
    hasher.update(b":");
    hasher.update(scope.as_str().as_bytes());
    hasher.update(b":");
    hasher.update(client.as_bytes());
    hasher.update(b":");
    hasher.update(issued_at.to_string().as_bytes());
    format!("{:x}", hasher.finalize())
}

pub fn issue(secret: &str, scope: TokenScope, client: &str, issued_at: i64) -> String {
    format!("{}.{}", issued_at, digest(secret, scope, client, issued_at))
}

pub fn verify(
    secret: &str,
    scope: TokenScope,
    client: Option<&str>,
    token: &str,
    now: i64,
) -> Result<(), AppError> {
    let reject = |reason: &str| {
        log::warn!("Rejected {} form: {}", scope.as_str(), reason);
        Err(AppError::InvalidToken)
    };

    let Some(client) = client else {
        return reject("no client cookie");
    };
    let Some((stamp, mac)) = token.split_once('.') else {
        return reject("malformed token");
    };
    let Ok(issued_at) = stamp.parse::<i64>() else {
        return reject("malformed token");
    };
    if now - issued_at > TOKEN_MAX_AGE_SECS || issued_at - now > FUTURE_SKEW_SECS {
        return reject("token expired");
    }

    let expected = digest(secret, scope, client, issued_at);
    if constant_time_eq(expected.as_bytes(), mac.as_bytes()) {
        Ok(())
    } else {
        reject("token mismatch")
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    a.len() == b.len() && a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}
