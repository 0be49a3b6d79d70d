/// Account operations
///
/// Register and login are anonymous JSON calls answering with a bearer
/// token; the current-user lookup authenticates with whatever token the
/// session holds.

use reqwest::Method;
use serde_json::json;

use super::client::{ApiClient, ApiError, Body};
use crate::state::data::User;

/// Fields collected by the registration form
#[derive(Debug, Clone)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub phone: String,
    pub location: String,
}

/// Fields collected by the login form
#[derive(Debug, Clone)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, serde::Deserialize)]
struct TokenResponse {
    token: String,
}

/// Create an account. Answers with a fresh session token.
pub async fn register(api: &ApiClient, request: &RegisterRequest) -> Result<String, ApiError> {
    let body = Body::Json(json!({
        "email": request.email,
        "password": request.password,
        "name": request.name,
        "phone": request.phone,
        "location": request.location,
    }));
    let response: TokenResponse = api
        .request_json(Method::POST, "/api/auth/register", body)
        .await?;
    Ok(response.token)
}

/// Exchange credentials for a session token.
pub async fn login(api: &ApiClient, request: &LoginRequest) -> Result<String, ApiError> {
    let body = Body::Json(json!({
        "email": request.email,
        "password": request.password,
    }));
    let response: TokenResponse = api
        .request_json(Method::POST, "/api/auth/login", body)
        .await?;
    Ok(response.token)
}

/// The account behind the current token. Fails with 401 when the token
/// is stale, which is the only stale-token signal the client gets.
pub async fn me(api: &ApiClient) -> Result<User, ApiError> {
    api.request_json(Method::GET, "/api/auth/me", Body::Empty)
        .await
}
