//! NoteHub REST client.
//!
//! Each API operation is split into a request builder and a response decoder,
//! because the plugin hands requests to the host and receives the response as a
//! later event.
//!
//! # Endpoints
//!
//! - `GET {base}/notes?page&perPage&search&sortBy=created` → [`PageResult`]
//! - `POST {base}/notes` → [`Note`]
//! - `DELETE {base}/notes/{id}` → [`Note`]

use super::config::ClientConfig;
use super::request::{ApiRequest, ApiResponse, HttpMethod, Operation, RequestContext};
use crate::domain::error::{NoteHubError, Result};
use crate::domain::note::{NewNote, Note, PageResult};
use serde::de::DeserializeOwned;
use std::collections::BTreeMap;
use url::Url;

/// Builds NoteHub requests and decodes their responses.
#[derive(Debug, Clone, Default)]
pub struct NoteClient {
    config: ClientConfig,
}

impl NoteClient {
    #[must_use]
    pub const fn new(config: ClientConfig) -> Self {
        Self { config }
    }

    #[must_use]
    pub const fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Builds a filtered, paginated list request.
    ///
    /// An empty `search` means no filter; the parameter is left out.
    ///
    /// # Errors
    ///
    /// Returns [`NoteHubError::Config`] if `page` or `per_page` is zero and
    /// [`NoteHubError::Url`] if the base URL does not parse.
    pub fn list_notes(&self, page: u32, per_page: u32, search: &str) -> Result<ApiRequest> {
        if page == 0 || per_page == 0 {
            return Err(NoteHubError::Config(format!(
                "page and perPage must be positive (page={page}, perPage={per_page})"
            )));
        }

        let mut url = self.notes_url()?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("page", &page.to_string());
            query.append_pair("perPage", &per_page.to_string());
            if !search.is_empty() {
                query.append_pair("search", search);
            }
            query.append_pair("sortBy", "created");
        }

        tracing::debug!(page, per_page, search = %search, "built list request");
        Ok(self.request(Operation::ListNotes, HttpMethod::Get, url, Vec::new()))
    }

    /// Builds a create request. The note must already be validated.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized or the URL is invalid.
    pub fn create_note(&self, note: &NewNote) -> Result<ApiRequest> {
        let url = self.notes_url()?;
        let body = serde_json::to_vec(note)?;

        tracing::debug!(title = %note.title, tag = %note.tag, "built create request");
        Ok(self.request(Operation::CreateNote, HttpMethod::Post, url, body))
    }

    /// Builds a delete request for the note with `id`.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot carry path segments.
    pub fn delete_note(&self, id: &str) -> Result<ApiRequest> {
        let mut url = self.notes_url()?;
        url.path_segments_mut()
            .map_err(|()| NoteHubError::Config(format!("base URL cannot hold a path: {}", self.config.base_url)))?
            .push(id);

        tracing::debug!(note_id = %id, "built delete request");
        Ok(self.request(Operation::DeleteNote, HttpMethod::Delete, url, Vec::new()))
    }

    /// Decodes a list response.
    ///
    /// # Errors
    ///
    /// [`NoteHubError::Api`] on non-2xx, [`NoteHubError::Decode`] on a bad body.
    pub fn decode_page(response: &ApiResponse) -> Result<PageResult> {
        Self::decode::<PageResult>(response).map(PageResult::normalized)
    }

    /// Decodes a create or delete response.
    ///
    /// # Errors
    ///
    /// [`NoteHubError::Api`] on non-2xx, [`NoteHubError::Decode`] on a bad body.
    pub fn decode_note(response: &ApiResponse) -> Result<Note> {
        Self::decode::<Note>(response)
    }

    fn decode<T: DeserializeOwned>(response: &ApiResponse) -> Result<T> {
        if !response.is_success() {
            return Err(NoteHubError::Api {
                status: response.status,
                message: error_message(response),
            });
        }
        Ok(serde_json::from_slice(&response.body)?)
    }

    fn notes_url(&self) -> Result<Url> {
        Ok(Url::parse(&format!("{}/notes", self.config.base_url))?)
    }

    fn request(&self, operation: Operation, method: HttpMethod, url: Url, body: Vec<u8>) -> ApiRequest {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());
        if !body.is_empty() {
            headers.insert("Content-Type".to_string(), "application/json".to_string());
        }
        if let Some(authorization) = self.config.authorization() {
            headers.insert("Authorization".to_string(), authorization);
        }

        ApiRequest {
            context: RequestContext::new(operation),
            method,
            url: url.into(),
            headers,
            body,
        }
    }
}

/// Picks the most useful message out of an error response.
///
/// Prefers a JSON `message` field, then the raw body, then the status reason.
fn error_message(response: &ApiResponse) -> String {
    if let Ok(value) = serde_json::from_slice::<serde_json::Value>(&response.body) {
        if let Some(message) = value.get("message").and_then(serde_json::Value::as_str) {
            return message.to_string();
        }
    }

    let text = String::from_utf8_lossy(&response.body).trim().to_string();
    if !text.is_empty() && text.len() <= 200 {
        return text;
    }

    status_reason(response.status).to_string()
}

const fn status_reason(status: u16) -> &'static str {
    match status {
        400 => "Bad Request",
        401 => "Unauthorized",
        403 => "Forbidden",
        404 => "Not Found",
        409 => "Conflict",
        422 => "Unprocessable Entity",
        429 => "Too Many Requests",
        500 => "Internal Server Error",
        502 => "Bad Gateway",
        503 => "Service Unavailable",
        _ => "Request failed",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::note::NoteTag;

    fn client() -> NoteClient {
        NoteClient::new(ClientConfig::new("https://notes.test/api", Some("tkn".into())))
    }

    fn response(status: u16, body: &str) -> ApiResponse {
        ApiResponse {
            status,
            body: body.as_bytes().to_vec(),
        }
    }

    #[test]
    fn list_request_carries_query_and_credential() {
        let request = client().list_notes(2, 15, "milk & eggs").unwrap();
        assert_eq!(request.method, HttpMethod::Get);
        assert_eq!(
            request.url,
            "https://notes.test/api/notes?page=2&perPage=15&search=milk+%26+eggs&sortBy=created"
        );
        assert_eq!(request.headers["Authorization"], "Bearer tkn");
        assert_eq!(request.context.operation, Operation::ListNotes);
    }

    #[test]
    fn empty_search_is_omitted() {
        let request = client().list_notes(1, 15, "").unwrap();
        assert_eq!(
            request.url,
            "https://notes.test/api/notes?page=1&perPage=15&sortBy=created"
        );
    }

    #[test]
    fn rejects_zero_page_or_size() {
        assert!(matches!(client().list_notes(0, 15, ""), Err(NoteHubError::Config(_))));
        assert!(matches!(client().list_notes(1, 0, ""), Err(NoteHubError::Config(_))));
    }

    #[test]
    fn create_request_posts_json() {
        let note = NewNote {
            title: "Buy milk".into(),
            content: String::new(),
            tag: NoteTag::Todo,
        };
        let request = client().create_note(&note).unwrap();
        assert_eq!(request.method, HttpMethod::Post);
        assert_eq!(request.url, "https://notes.test/api/notes");
        assert_eq!(request.headers["Content-Type"], "application/json");
        let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
        assert_eq!(body["tag"], "Todo");
    }

    #[test]
    fn delete_request_escapes_id() {
        let request = client().delete_note("abc/123").unwrap();
        assert_eq!(request.method, HttpMethod::Delete);
        assert_eq!(request.url, "https://notes.test/api/notes/abc%2F123");
    }

    #[test]
    fn requests_without_token_have_no_authorization() {
        let request = NoteClient::default().list_notes(1, 15, "").unwrap();
        assert!(!request.headers.contains_key("Authorization"));
    }

    #[test]
    fn decodes_page_and_normalizes_total() {
        let page = NoteClient::decode_page(&response(200, r#"{"notes":[],"totalPages":0}"#)).unwrap();
        assert_eq!(page.total_pages, 1);
    }

    #[test]
    fn non_success_maps_to_api_error() {
        let err = NoteClient::decode_note(&response(404, r#"{"message":"Note not found"}"#)).unwrap_err();
        match err {
            NoteHubError::Api { status, message } => {
                assert_eq!(status, 404);
                assert_eq!(message, "Note not found");
            }
            other => panic!("unexpected error: {other}"),
        }

        let err = NoteClient::decode_note(&response(401, "")).unwrap_err();
        assert_eq!(err.user_message(), "Unauthorized");
    }

    #[test]
    fn malformed_success_is_decode_error() {
        let err = NoteClient::decode_page(&response(200, "<html>")).unwrap_err();
        assert!(matches!(err, NoteHubError::Decode(_)));
    }
}
