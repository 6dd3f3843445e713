use axum::extract::Request;
use axum::extract::State;
use axum::http::{self};
use axum::middleware::Next;
use axum::response::Response;

use crate::domain::user::models::Role;
use crate::domain::user::models::UserId;
use crate::inbound::http::router::AppState;
use crate::user::ports::UserRepository;

/// Identity established for the current request.
///
/// Present in request extensions only when a valid bearer token accompanied
/// the request.
#[derive(Debug, Clone)]
pub struct CurrentUser {
    pub user_id: UserId,
    pub subject: String,
    pub role: Role,
}

/// Middleware establishing the caller's identity from a bearer token.
///
/// Requests without a token, or with one that fails validation, proceed
/// anonymously; no request is rejected here. Authorization is deliberately
/// permissive: authentication establishes identity but does not gate access.
pub async fn authenticate<R: UserRepository>(
    State(state): State<AppState<R>>,
    mut req: Request,
    next: Next,
) -> Response {
    if let Some(token) = extract_token_from_header(&req) {
        // Signature and expiry are checked before any claim is read
        match state.token_codec.decode(token) {
            Ok(claims) => match current_user_from_claims(&claims) {
                Ok(user) => {
                    req.extensions_mut().insert(user);
                }
                Err(reason) => {
                    tracing::warn!("Discarding token with unusable claims: {}", reason);
                }
            },
            Err(e) => {
                tracing::warn!("Token validation failed: {}", e);
            }
        }
    }

    next.run(req).await
}

fn current_user_from_claims(claims: &auth::Claims) -> Result<CurrentUser, String> {
    let user_id = claims
        .user_id()
        .ok_or_else(|| "missing userId claim".to_string())?;
    let user_id = UserId::from_string(user_id).map_err(|e| e.to_string())?;

    let role = claims
        .role()
        .ok_or_else(|| "missing role claim".to_string())?;
    let role = Role::parse(role).map_err(|e| e.to_string())?;

    Ok(CurrentUser {
        user_id,
        subject: claims.sub.clone(),
        role,
    })
}

fn extract_token_from_header(req: &Request) -> Option<&str> {
    req.headers()
        .get(http::header::AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
}
