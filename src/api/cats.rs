/// The cat sighting collection
///
/// Typed operations over the gateway. Listing and fetching are anonymous;
/// create, update, and delete ride on the session token. Create and
/// update send multipart bodies because they can carry photo files.

use reqwest::multipart::{Form, Part};
use reqwest::Method;

use super::client::{ApiClient, ApiError, Body};
use crate::state::data::{AgeGroup, Cat, Gender};

/// Everything the submission form dispatches for a create or an update.
#[derive(Debug, Clone)]
pub struct CatDraft {
    pub name: String,
    pub age: AgeGroup,
    pub gender: Gender,
    pub location: String,
    pub description: String,
    /// Newly picked files only, as (file name, bytes). Photos the server
    /// already stores are never re-sent; it keeps what is not re-sent.
    pub photos: Vec<(String, Vec<u8>)>,
}

impl CatDraft {
    fn into_form(self) -> Result<Form, ApiError> {
        let mut form = Form::new()
            .text("name", self.name)
            .text("age", self.age.to_string())
            .text("gender", self.gender.to_string())
            .text("location", self.location)
            .text("description", self.description);

        for (file_name, bytes) in self.photos {
            let mime = mime_guess::from_path(&file_name).first_or_octet_stream();
            let part = Part::bytes(bytes)
                .file_name(file_name)
                .mime_str(mime.essence_str())
                .map_err(|e| ApiError::Transport(e.to_string()))?;
            form = form.part("photos", part);
        }

        Ok(form)
    }
}

/// The full public collection.
pub async fn list(api: &ApiClient) -> Result<Vec<Cat>, ApiError> {
    api.request_json(Method::GET, "/api/cats", Body::Empty).await
}

/// One post by identifier, with the owner's contact details embedded.
pub async fn get(api: &ApiClient, id: &str) -> Result<Cat, ApiError> {
    api.request_json(Method::GET, &format!("/api/cats/{id}"), Body::Empty)
        .await
}

pub async fn create(api: &ApiClient, draft: CatDraft) -> Result<Cat, ApiError> {
    let form = draft.into_form()?;
    api.request_json(Method::POST, "/api/cats", Body::Multipart(form))
        .await
}

pub async fn update(api: &ApiClient, id: &str, draft: CatDraft) -> Result<Cat, ApiError> {
    let form = draft.into_form()?;
    api.request_json(Method::PUT, &format!("/api/cats/{id}"), Body::Multipart(form))
        .await
}

pub async fn delete(api: &ApiClient, id: &str) -> Result<(), ApiError> {
    api.request(Method::DELETE, &format!("/api/cats/{id}"), Body::Empty)
        .await
}

/// Raw bytes of a stored photo, for rendering.
pub async fn photo(api: &ApiClient, path: &str) -> Result<Vec<u8>, ApiError> {
    api.get_bytes(path).await
}
