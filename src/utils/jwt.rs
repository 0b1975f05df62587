// src/utils/jwt.rs

use axum::{
    body::Body,
    extract::State,
    http::{HeaderMap, Request, header},
    middleware::Next,
    response::Response,
};
use jsonwebtoken::{DecodingKey, Validation, decode};
use serde::{Deserialize, Serialize};

use crate::{config::Config, error::AppError};

/// Name of the cookie that carries the bearer token.
pub const AUTH_COOKIE: &str = "Authorization";

/// JWT Claims structure.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Claims {
    pub email: String,
    /// Roles granted to the user (e.g. 'student', 'teacher').
    #[serde(default)]
    pub roles: Vec<String>,
    /// Expiration time as Unix timestamp.
    pub exp: usize,
}

/// Verifies and decodes a JWT string.
///
/// Returns the `Claims` if valid, otherwise returns an `AppError`.
pub fn verify_jwt(token: &str, secret: &str) -> Result<Claims, AppError> {
    let token_data = decode(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map_err(|e| {
        tracing::debug!("Token rejected: {}", e);
        AppError::AuthError("Invalid token".to_string())
    })?;

    Ok(token_data.claims)
}

/// Finds a cookie by name across all `Cookie` headers.
///
/// Pairs that are not valid UTF-8 are skipped without discarding the rest
/// of the header. Surrounding double quotes are stripped and the value is
/// query-unescaped (`%XX` and `+`); a value that does not unescape to UTF-8
/// reads as empty.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .flat_map(|value| value.as_bytes().split(|b| *b == b';'))
        .filter_map(|pair| std::str::from_utf8(pair).ok())
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| {
            let value = value
                .strip_prefix('"')
                .and_then(|v| v.strip_suffix('"'))
                .unwrap_or(value);
            urlencoding::decode(&value.replace('+', " "))
                .map(|v| v.into_owned())
                .unwrap_or_default()
        })
}

/// Axum Middleware: Cookie Authentication.
///
/// Reads the token from the `Authorization` cookie and verifies it.
/// If valid, injects `Claims` into the request extensions for handlers to use.
/// Otherwise returns 401 Unauthorized.
pub async fn cookie_auth_middleware(
    State(config): State<Config>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = read_cookie(req.headers(), AUTH_COOKIE)
        .ok_or_else(|| AppError::AuthError("Authorization token missing".to_string()))?;

    let claims = verify_jwt(&token, &config.jwt_secret)?;
    req.extensions_mut().insert(claims);

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use jsonwebtoken::{EncodingKey, Header, encode};

    fn token(secret: &str, exp: usize) -> String {
        let claims = Claims {
            email: "ann@example.com".to_string(),
            roles: vec!["student".to_string()],
            exp,
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    #[test]
    fn verify_accepts_token_signed_with_secret() {
        let claims = verify_jwt(&token("s3cret", 4_000_000_000), "s3cret").unwrap();
        assert_eq!(claims.email, "ann@example.com");
        assert_eq!(claims.roles, vec!["student"]);
    }

    #[test]
    fn verify_rejects_wrong_secret_and_expired_tokens() {
        assert!(verify_jwt(&token("other", 4_000_000_000), "s3cret").is_err());
        assert!(verify_jwt(&token("s3cret", 1_000), "s3cret").is_err());
        assert!(verify_jwt("not-a-jwt", "s3cret").is_err());
    }

    #[test]
    fn read_cookie_finds_named_cookie() {
        let mut headers = HeaderMap::new();
        headers.append(header::COOKIE, HeaderValue::from_static("theme=dark"));
        headers.append(
            header::COOKIE,
            HeaderValue::from_static("lang=en; Authorization=\"abc.def\"; x=1"),
        );
        assert_eq!(read_cookie(&headers, AUTH_COOKIE).as_deref(), Some("abc.def"));
        assert_eq!(read_cookie(&headers, "theme").as_deref(), Some("dark"));
        assert_eq!(read_cookie(&headers, "missing"), None);
    }

    #[test]
    fn empty_cookie_is_present_but_empty() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("Authorization="));
        assert_eq!(read_cookie(&headers, AUTH_COOKIE).as_deref(), Some(""));
    }

    #[test]
    fn cookie_value_is_query_unescaped() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_static("Authorization=a%2Eb+c%2B"),
        );
        assert_eq!(read_cookie(&headers, AUTH_COOKIE).as_deref(), Some("a.b c+"));
    }

    #[test]
    fn non_utf8_pair_does_not_hide_other_cookies() {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_bytes(b"junk=\xff\xfe; Authorization=tok").unwrap(),
        );
        assert_eq!(read_cookie(&headers, AUTH_COOKIE).as_deref(), Some("tok"));
    }
}
