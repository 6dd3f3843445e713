use axum::http::StatusCode;
use axum::Extension;
use serde::Serialize;

use super::ApiSuccess;
use crate::inbound::http::middleware::CurrentUser;

/// Demo endpoint answering both anonymous and authenticated callers.
pub async fn hello(
    current_user: Option<Extension<CurrentUser>>,
) -> ApiSuccess<HelloResponseData> {
    let message = match current_user {
        Some(Extension(user)) => format!("Hello from secure endpoint, {}", user.subject),
        None => "Hello from secure endpoint".to_string(),
    };

    ApiSuccess::new(StatusCode::OK, HelloResponseData { message })
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HelloResponseData {
    pub message: String,
}
