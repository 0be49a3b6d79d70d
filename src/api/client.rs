/// HTTP gateway to the KittyFind service
///
/// One reqwest client configured with the server origin and the injected
/// session. The gateway does not retry, cache, or time out; every failure
/// is surfaced unmodified to the caller as an [`ApiError`].

use log::{debug, warn};
use reqwest::multipart::Form;
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use thiserror::Error;
use url::Url;

use crate::state::session::Session;

/// Server origin used when KITTYFIND_SERVER is not set
pub const DEFAULT_SERVER: &str = "https://kittenfind-backend-5.onrender.com";

/// Error surfaced for any failed request.
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// The request never produced an HTTP response
    #[error("could not reach the server: {0}")]
    Transport(String),
    /// The server answered with a non-success status
    #[error("{}", .message.as_deref().unwrap_or("the server rejected the request"))]
    Server { status: u16, message: Option<String> },
}

impl ApiError {
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Transport(_) => None,
            ApiError::Server { status, .. } => Some(*status),
        }
    }

    /// The message the server attached to the failure, if it sent one
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Transport(_) => None,
            ApiError::Server { message, .. } => message.as_deref(),
        }
    }

    /// The one failure the client acts on specially: a stale or invalid
    /// token detected at the API boundary.
    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}

/// Error body shape the service uses: `{ "message": … }`
#[derive(Debug, Deserialize)]
struct ServerMessage {
    message: Option<String>,
}

/// Request body, chosen explicitly by the caller.
///
/// JSON bodies get the JSON content type; multipart bodies go through
/// the multipart encoder so the transport sets the boundary header. The
/// gateway never forces a JSON content type onto a multipart body.
pub enum Body {
    Empty,
    Json(serde_json::Value),
    Multipart(Form),
}

#[derive(Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    origin: Url,
    session: Session,
}

impl ApiClient {
    pub fn new(origin: Url, session: Session) -> Self {
        ApiClient {
            http: reqwest::Client::new(),
            origin,
            session,
        }
    }

    /// Build the client from the KITTYFIND_SERVER environment variable,
    /// falling back to the hosted service.
    pub fn from_env(session: Session) -> Self {
        let origin = std::env::var("KITTYFIND_SERVER")
            .ok()
            .and_then(|raw| match Url::parse(&raw) {
                Ok(url) => Some(url),
                Err(e) => {
                    warn!("ignoring invalid KITTYFIND_SERVER {:?}: {}", raw, e);
                    None
                }
            })
            .unwrap_or_else(|| {
                Url::parse(DEFAULT_SERVER).expect("default server origin is a valid URL")
            });

        debug!("using server origin {}", origin);
        Self::new(origin, session)
    }

    /// Issue a request and decode the JSON response body.
    pub async fn request_json<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        body: Body,
    ) -> Result<T, ApiError> {
        let response = self.dispatch(method, path, body).await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    /// Issue a request where only success matters, not the response body.
    pub async fn request(&self, method: Method, path: &str, body: Body) -> Result<(), ApiError> {
        self.dispatch(method, path, body).await.map(|_| ())
    }

    /// Fetch raw bytes, typically photo content. Server-relative paths
    /// resolve against the origin; absolute URLs pass through.
    pub async fn get_bytes(&self, path: &str) -> Result<Vec<u8>, ApiError> {
        let response = self.dispatch(Method::GET, path, Body::Empty).await?;
        response
            .bytes()
            .await
            .map(|bytes| bytes.to_vec())
            .map_err(|e| ApiError::Transport(e.to_string()))
    }

    async fn dispatch(
        &self,
        method: Method,
        path: &str,
        body: Body,
    ) -> Result<reqwest::Response, ApiError> {
        let url = self.resolve(path)?;
        debug!("{} {}", method, url);

        let mut request = self.http.request(method, url);

        // Consult the session right before dispatch so the freshest token
        // wins, even if it changed since this client was built
        if let Some(token) = self.session.token() {
            request = request.bearer_auth(token);
        }

        request = match body {
            Body::Empty => request,
            Body::Json(value) => request.json(&value),
            Body::Multipart(form) => request.multipart(form),
        };

        let response = request
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let message = response
            .json::<ServerMessage>()
            .await
            .ok()
            .and_then(|body| body.message);
        Err(ApiError::Server {
            status: status.as_u16(),
            message,
        })
    }

    fn resolve(&self, path: &str) -> Result<Url, ApiError> {
        if path.starts_with("http://") || path.starts_with("https://") {
            Url::parse(path).map_err(|e| ApiError::Transport(e.to_string()))
        } else {
            self.origin
                .join(path)
                .map_err(|e| ApiError::Transport(e.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn client() -> ApiClient {
        let session = Session::at_path(PathBuf::from("/nonexistent/kittyfind-test-token"));
        ApiClient::new(Url::parse("https://kittyfind.example").unwrap(), session)
    }

    #[test]
    fn test_relative_paths_resolve_against_the_origin() {
        let url = client().resolve("/api/cats").unwrap();
        assert_eq!(url.as_str(), "https://kittyfind.example/api/cats");
    }

    #[test]
    fn test_absolute_urls_pass_through() {
        let url = client().resolve("https://cdn.example/uploads/cat.jpg").unwrap();
        assert_eq!(url.as_str(), "https://cdn.example/uploads/cat.jpg");
    }

    #[test]
    fn test_server_errors_prefer_the_server_message() {
        let err = ApiError::Server {
            status: 400,
            message: Some("Name is required".to_owned()),
        };
        assert_eq!(err.to_string(), "Name is required");
        assert_eq!(err.server_message(), Some("Name is required"));
    }

    #[test]
    fn test_server_errors_fall_back_to_a_generic_line() {
        let err = ApiError::Server {
            status: 500,
            message: None,
        };
        assert_eq!(err.to_string(), "the server rejected the request");
    }

    #[test]
    fn test_unauthorized_detection() {
        let unauthorized = ApiError::Server {
            status: 401,
            message: None,
        };
        assert!(unauthorized.is_unauthorized());
        assert!(!ApiError::Transport("timed out".to_owned()).is_unauthorized());
    }
}
