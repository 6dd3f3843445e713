use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Deserialize;

use super::ApiError;
use super::ApiSuccess;
use super::TokenResponseData;
use crate::domain::user::models::RegisterRequest;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;

pub async fn register<R: UserRepository>(
    State(state): State<AppState<R>>,
    Json(body): Json<RegisterRequestBody>,
) -> Result<ApiSuccess<TokenResponseData>, ApiError> {
    let issued = state.auth_service.register(body.into_request()).await?;

    Ok(ApiSuccess::new(
        StatusCode::OK,
        TokenResponseData {
            token: issued.token,
        },
    ))
}

/// HTTP request body for registration (raw JSON, camelCase wire names).
///
/// Fields default to empty strings so a missing field reports the same
/// validation message as an empty one.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct RegisterRequestBody {
    first_name: String,
    last_name: String,
    email: String,
    password: String,
}

impl RegisterRequestBody {
    fn into_request(self) -> RegisterRequest {
        RegisterRequest {
            first_name: self.first_name,
            last_name: self.last_name,
            email: self.email,
            password: self.password,
        }
    }
}
