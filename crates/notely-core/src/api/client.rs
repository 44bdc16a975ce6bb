//! HTTP client for the notes REST service.

use reqwest::{RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Deserialize;

use super::NotesBackend;
use crate::config::ClientConfig;
use crate::error::{Error, Result, DEFAULT_API_ERROR_MESSAGE};
use crate::models::{
    AddCategoriesRequest, CreateNoteRequest, NoteDto, NoteId, NoteQuery, PageResponse,
    UpdateNoteRequest,
};
use crate::util::{compact_text, normalize_text_option};

/// REST client bound to one notes service base URL.
#[derive(Debug, Clone)]
pub struct NotesApiClient {
    base_url: String,
    client: reqwest::Client,
}

impl NotesApiClient {
    /// Builds a client from validated configuration.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let config = config.clone().validated()?;
        let client = reqwest::Client::builder()
            .timeout(config.request_timeout())
            .build()?;
        Ok(Self {
            base_url: config.api_base_url,
            client,
        })
    }

    /// Returns the base URL this client was configured with.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn note_url(&self, id: NoteId, suffix: &str) -> String {
        self.url(&format!("/notes/{id}{suffix}"))
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T> {
        let response = request
            .header(reqwest::header::ACCEPT, "application/json")
            .send()
            .await?;
        let response = ensure_success(response).await?;
        Ok(response.json::<T>().await?)
    }
}

impl NotesBackend for NotesApiClient {
    async fn list_notes(&self, query: &NoteQuery) -> Result<PageResponse<NoteDto>> {
        let pairs = query.to_query_pairs();
        tracing::debug!(?pairs, "GET /notes");
        self.send_json(self.client.get(self.url("/notes")).query(&pairs))
            .await
    }

    async fn get_note(&self, id: NoteId) -> Result<NoteDto> {
        tracing::debug!("GET /notes/{id}");
        self.send_json(self.client.get(self.note_url(id, ""))).await
    }

    async fn create_note(&self, request: &CreateNoteRequest) -> Result<NoteDto> {
        tracing::debug!("POST /notes");
        self.send_json(self.client.post(self.url("/notes")).json(request))
            .await
    }

    async fn update_note(&self, id: NoteId, request: &UpdateNoteRequest) -> Result<NoteDto> {
        tracing::debug!("PUT /notes/{id}");
        self.send_json(self.client.put(self.note_url(id, "")).json(request))
            .await
    }

    async fn toggle_archive(&self, id: NoteId) -> Result<NoteDto> {
        tracing::debug!("PATCH /notes/{id}/archive");
        self.send_json(self.client.patch(self.note_url(id, "/archive")))
            .await
    }

    async fn delete_note(&self, id: NoteId) -> Result<()> {
        tracing::debug!("DELETE /notes/{id}");
        let response = self.client.delete(self.note_url(id, "")).send().await?;
        ensure_success(response).await?;
        Ok(())
    }

    async fn add_categories(&self, id: NoteId, categories: &[String]) -> Result<NoteDto> {
        tracing::debug!(?categories, "POST /notes/{id}/categories");
        let body = AddCategoriesRequest {
            categories: categories.to_vec(),
        };
        self.send_json(
            self.client
                .post(self.note_url(id, "/categories"))
                .json(&body),
        )
        .await
    }

    async fn remove_category(&self, id: NoteId, category: &str) -> Result<NoteDto> {
        let encoded = urlencoding::encode(category);
        tracing::debug!("DELETE /notes/{id}/categories/{encoded}");
        self.send_json(
            self.client
                .delete(self.note_url(id, &format!("/categories/{encoded}"))),
        )
        .await
    }
}

async fn ensure_success(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    tracing::debug!("notes service returned HTTP {}: {}", status, compact_text(&body));
    Err(parse_api_error(status, &body))
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: Option<String>,
}

/// Build an API error from a failed response.
///
/// Uses the JSON body's `message` when the service sent one.
pub fn parse_api_error(status: StatusCode, body: &str) -> Error {
    let message = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|parsed| normalize_text_option(parsed.message))
        .unwrap_or_else(|| DEFAULT_API_ERROR_MESSAGE.to_string());
    Error::Api {
        status: status.as_u16(),
        message,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_api_error_uses_body_message() {
        let error = parse_api_error(
            StatusCode::NOT_FOUND,
            r#"{"message": "Note not found with id 4", "status": 404}"#,
        );
        assert!(matches!(
            error,
            Error::Api { status: 404, ref message } if message == "Note not found with id 4"
        ));
    }

    #[test]
    fn parse_api_error_defaults_without_json_message() {
        for body in ["", "<html>Bad gateway</html>", r#"{"error": "x"}"#, r#"{"message": "  "}"#] {
            let error = parse_api_error(StatusCode::BAD_GATEWAY, body);
            assert_eq!(error.to_string(), DEFAULT_API_ERROR_MESSAGE);
            assert_eq!(error.status(), Some(502));
        }
    }

    #[test]
    fn client_rejects_invalid_base_url() {
        let config = ClientConfig {
            api_base_url: "notes.example.com".to_string(),
            ..ClientConfig::default()
        };
        assert!(matches!(NotesApiClient::new(&config), Err(Error::Config(_))));
    }

    #[test]
    fn note_urls_are_rooted_at_base() {
        let config = ClientConfig::new("http://localhost:8080/api/").unwrap();
        let client = NotesApiClient::new(&config).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8080/api");
        assert_eq!(
            client.note_url(NoteId::new(5), "/archive"),
            "http://localhost:8080/api/notes/5/archive"
        );
    }
}
