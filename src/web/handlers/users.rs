// User handlers.
//
// POST /api/v1/users/signup: create an account (never a superuser)
// GET  /api/v1/users/me    : the signed-in user

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Extension, Json};
use tracing::info;

use crate::auth::hash_password_async;
use crate::db::models::{SignupRequest, UserRead};
use crate::web::auth::AuthUser;
use crate::web::{api_error, internal_error, AppState};

pub async fn signup(State(state): State<AppState>, Json(body): Json<SignupRequest>) -> Response {
    let email = body.email.trim();
    if email.is_empty() || !email.contains('@') {
        return api_error(StatusCode::UNPROCESSABLE_ENTITY, "A valid email is required");
    }
    if body.password.is_empty() {
        return api_error(StatusCode::UNPROCESSABLE_ENTITY, "Password must not be empty");
    }

    match state.db.get_user_by_email(email).await {
        Ok(Some(_)) => {
            return api_error(
                StatusCode::BAD_REQUEST,
                "A user with this email already exists",
            )
        }
        Ok(None) => {}
        Err(e) => return internal_error("Failed to look up user", e),
    }

    let hashed = match hash_password_async(body.password).await {
        Ok(hashed) => hashed,
        Err(e) => return internal_error("Failed to hash password", e),
    };

    // A concurrent signup can take the email between the lookup and here
    match state.db.create_user(email, &hashed, false).await {
        Ok(Some(user)) => {
            info!(user = %user.email, "New user signed up");
            Json(UserRead::from(&user)).into_response()
        }
        Ok(None) => api_error(
            StatusCode::BAD_REQUEST,
            "A user with this email already exists",
        ),
        Err(e) => internal_error("Failed to create user", e),
    }
}

pub async fn read_me(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<UserRead> {
    Json(UserRead::from(&user))
}
