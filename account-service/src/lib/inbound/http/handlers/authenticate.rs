use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::Credentials;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;

pub async fn authenticate<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<AuthenticateRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let issued = state
        .auth_service
        .authenticate(Credentials {
            email: body.email,
            password: body.password,
        })
        .await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            token: issued.token,
        },
    ))
}

/// HTTP request body for login (raw JSON)
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(default)]
pub struct AuthenticateRequestBody {
    email: String,
    password: String,
}
