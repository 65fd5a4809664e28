// Bearer-token authentication for the API.
//
// Token format and signing live in crate::auth. This module pulls the token
// out of the Authorization header, resolves it to a stored user and rejects
// the request otherwise:
//
//   missing / malformed / expired / unknown user  → 401 (WWW-Authenticate: Bearer)
//   valid token, inactive user                    → 400 "Inactive user"
//   valid token, not a superuser on admin routes  → 403 "Not enough privileges"

use axum::extract::{Request, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::middleware::Next;
use axum::response::Response;

use super::{api_error, internal_error, AppState};
use crate::db::models::User;

/// The authenticated user, inserted into request extensions by the
/// middleware below.
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

fn unauthorized() -> Response {
    let mut response = api_error(StatusCode::UNAUTHORIZED, "Could not validate credentials");
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, header::HeaderValue::from_static("Bearer"));
    response
}

/// The token from an `Authorization: Bearer <token>` header.
pub fn bearer_token(headers: &HeaderMap) -> Option<&str> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    if !scheme.eq_ignore_ascii_case("bearer") {
        return None;
    }
    let token = token.trim();
    (!token.is_empty()).then_some(token)
}

/// Resolve the request's bearer token to an active user.
pub async fn authenticate(state: &AppState, headers: &HeaderMap) -> Result<User, Response> {
    let token = bearer_token(headers).ok_or_else(unauthorized)?;
    let email = crate::auth::verify_token(
        &state.config.secret_key,
        token,
        state.config.token_ttl_secs(),
    )
    .ok_or_else(unauthorized)?;

    let user = state
        .db
        .get_user_by_email(&email)
        .await
        .map_err(|e| internal_error("Failed to load user", e))?
        .ok_or_else(unauthorized)?;

    if !user.is_active {
        return Err(api_error(StatusCode::BAD_REQUEST, "Inactive user"));
    }
    Ok(user)
}

/// As [`authenticate`], additionally requiring a superuser.
pub async fn authenticate_superuser(
    state: &AppState,
    headers: &HeaderMap,
) -> Result<User, Response> {
    let user = authenticate(state, headers).await?;
    if !user.is_superuser {
        return Err(api_error(StatusCode::FORBIDDEN, "Not enough privileges"));
    }
    Ok(user)
}

/// Axum middleware: require a signed-in, active user.
pub async fn require_user(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate(&state, request.headers()).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthUser(user));
            next.run(request).await
        }
        Err(rejection) => rejection,
    }
}

/// Axum middleware: require a superuser.
pub async fn require_superuser(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    match authenticate_superuser(&state, request.headers()).await {
        Ok(user) => {
            request.extensions_mut().insert(AuthUser(user));
            next.run(request).await
        }
        Err(rejection) => rejection,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::AUTHORIZATION, HeaderValue::from_str(value).unwrap());
        headers
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(&headers("Bearer abc.def")), Some("abc.def"));
        assert_eq!(bearer_token(&headers("bearer  abc")), Some("abc"));
        assert_eq!(bearer_token(&headers("Basic dXNlcjpwYXNz")), None);
        assert_eq!(bearer_token(&headers("Bearer ")), None);
        assert_eq!(bearer_token(&HeaderMap::new()), None);
    }
}
