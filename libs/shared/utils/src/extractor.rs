use std::sync::Arc;

use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use shared_config::AppConfig;
use shared_models::error::AppError;

use crate::jwt::validate_token;

/// Authentication middleware for all schedule routes.
///
/// Accepts either `Authorization: Bearer <token>` or the legacy
/// `x-auth-token` header. A missing or invalid token is rejected with
/// 401 - there is no mock-user fallback.
pub async fn auth_middleware(
    State(config): State<Arc<AppConfig>>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let token = extract_token(&request)
        .ok_or_else(|| AppError::Auth("Missing authentication token".to_string()))?;

    let user = validate_token(&token, &config.jwt_secret).map_err(AppError::Auth)?;

    request.extensions_mut().insert(user);

    Ok(next.run(request).await)
}

fn extract_token(request: &Request<Body>) -> Option<String> {
    if let Some(auth_header) = request.headers().get("Authorization") {
        let value = auth_header.to_str().ok()?;
        let token = value
            .strip_prefix("Bearer ")
            .or_else(|| value.strip_prefix("bearer "))?;
        return Some(token.to_string());
    }

    request
        .headers()
        .get("x-auth-token")
        .and_then(|v| v.to_str().ok())
        .map(|v| v.to_string())
}
