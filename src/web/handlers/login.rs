// POST /api/v1/login/access-token: exchange email and password for a bearer token.
//
// Takes an urlencoded form with `username` (the email) and `password`.
// Wrong email and wrong password get the same answer, and an unknown email
// still pays for a full hash check.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::{Form, Json};
use serde::Deserialize;
use tracing::info;

use crate::auth::{create_token, verify_password_async};
use crate::db::models::AccessToken;
use crate::web::{api_error, internal_error, AppState};

#[derive(Deserialize)]
pub struct LoginForm {
    username: String,
    password: String,
}

pub async fn access_token(State(state): State<AppState>, Form(form): Form<LoginForm>) -> Response {
    let user = match state.db.get_user_by_email(form.username.trim()).await {
        Ok(user) => user,
        Err(e) => return internal_error("Failed to load user", e),
    };

    let stored = user.as_ref().map(|u| u.hashed_password.clone());
    let verified = verify_password_async(form.password, stored).await;
    let Some(user) = user.filter(|_| verified) else {
        return api_error(StatusCode::BAD_REQUEST, "Incorrect email or password");
    };

    if !user.is_active {
        return api_error(StatusCode::BAD_REQUEST, "Inactive user");
    }

    match create_token(&state.config.secret_key, &user.email) {
        Ok(token) => {
            info!(user = %user.email, "Issued access token");
            Json(AccessToken::bearer(token)).into_response()
        }
        Err(e) => internal_error("Failed to sign token", e),
    }
}
