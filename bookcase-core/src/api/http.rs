//! reqwest-backed `BookApi`

use super::envelope::{BookPage, Collection, Envelope, Payload};
use super::{BookApi, ListQuery};
use crate::config::Settings;
use crate::error::{ApiFailure, BookcaseError, Result};
use crate::types::{Book, BookDraft, BookId};
use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

const NOT_FOUND_CODE: &str = "RESOURCE_NOT_FOUND";

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CoverUpdate<'a> {
    cover_image_url: &'a str,
}

/// Book-storage client over HTTP
#[derive(Debug, Clone)]
pub struct HttpBookApi {
    client: Client,
    base_url: String,
}

impl HttpBookApi {
    /// Create a client rooted at `base_url` (e.g. `http://localhost:8080/api`)
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let client = Client::builder()
            .user_agent(concat!("bookcase/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    pub fn from_settings(settings: &Settings) -> Result<Self> {
        Self::new(settings.api_base_url.clone(), settings.timeout())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn book_url(&self, id: &BookId) -> String {
        self.url(&format!("/books/{}", urlencoding::encode(id.as_str())))
    }

    /// Send a request and decode its (possibly empty) payload
    async fn send<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
        id: Option<&BookId>,
    ) -> Result<Option<T>> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        tracing::debug!(status = status.as_u16(), bytes = body.len(), "storage response");

        if !status.is_success() {
            return Err(failure_for(status, &body, id));
        }

        if body.trim().is_empty() {
            return Ok(None);
        }

        let payload: Payload<T> = serde_json::from_str(&body)?;
        payload.into_result().map_err(|failure| match id {
            Some(id) if failure.code.as_deref() == Some(NOT_FOUND_CODE) => {
                BookcaseError::NotFound(id.clone())
            }
            _ => BookcaseError::Api(failure),
        })
    }

    /// Like `send`, but a missing `data` is a failure
    async fn send_book(&self, request: RequestBuilder, id: Option<&BookId>) -> Result<Book> {
        self.send::<Book>(request, id).await?.ok_or_else(|| {
            BookcaseError::Api(ApiFailure::new("response carried no book"))
        })
    }
}

/// Map a non-2xx response to an error, reading the error envelope if present
fn failure_for(status: StatusCode, body: &str, id: Option<&BookId>) -> BookcaseError {
    if let Some(id) = id {
        if status == StatusCode::NOT_FOUND {
            return BookcaseError::NotFound(id.clone());
        }
    }

    let failure = match serde_json::from_str::<Envelope<serde_json::Value>>(body) {
        Ok(envelope) => envelope.into_failure(),
        Err(_) => {
            let text = body.trim();
            let message = if text.is_empty() {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            } else {
                text.to_string()
            };
            ApiFailure::new(message)
        }
    };

    BookcaseError::Api(failure.with_status(status.as_u16()))
}

#[async_trait]
impl BookApi for HttpBookApi {
    async fn list_books(&self, query: &ListQuery) -> Result<BookPage> {
        tracing::debug!(?query, "listing books");
        let request = self.client.get(self.url("/books")).query(query);
        let collection: Option<Collection<Book>> = self.send(request, None).await?;
        Ok(collection.map(BookPage::from).unwrap_or_default())
    }

    async fn get_book(&self, id: &BookId) -> Result<Book> {
        tracing::debug!(%id, "fetching book");
        let request = self.client.get(self.book_url(id));
        self.send_book(request, Some(id)).await
    }

    async fn create_book(&self, draft: &BookDraft) -> Result<Book> {
        tracing::debug!(title = %draft.title, "creating book");
        let request = self.client.post(self.url("/books")).json(draft);
        self.send_book(request, None).await
    }

    async fn update_book(&self, id: &BookId, draft: &BookDraft) -> Result<Book> {
        tracing::debug!(%id, "updating book");
        let request = self.client.put(self.book_url(id)).json(draft);
        self.send_book(request, Some(id)).await
    }

    async fn update_book_cover(&self, id: &BookId, cover_image_url: &str) -> Result<Book> {
        tracing::debug!(%id, "updating cover");
        let request = self
            .client
            .patch(format!("{}/cover", self.book_url(id)))
            .json(&CoverUpdate { cover_image_url });
        self.send_book(request, Some(id)).await
    }

    async fn delete_book(&self, id: &BookId) -> Result<()> {
        tracing::debug!(%id, "deleting book");
        let request = self.client.delete(self.book_url(id));
        self.send::<serde_json::Value>(request, Some(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn client_for(server: &MockServer) -> HttpBookApi {
        HttpBookApi::new(format!("{}/api/", server.uri()), Duration::from_secs(5)).unwrap()
    }

    #[tokio::test]
    async fn test_list_books_paginated_envelope() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "content": [{ "id": 1, "title": "A" }] }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let page = api.list_books(&ListQuery::default()).await.unwrap();

        assert_eq!(page.books.len(), 1);
        assert_eq!(page.books[0].id, BookId::from("1"));
        assert_eq!(page.books[0].title, "A");
    }

    #[tokio::test]
    async fn test_list_books_sends_query() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books"))
            .and(query_param("search", "dune"))
            .and(query_param("page", "2"))
            .and(query_param("size", "5"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let page = api
            .list_books(&ListQuery::search("dune").with_page(2, 5))
            .await
            .unwrap();
        assert!(page.books.is_empty());
    }

    #[tokio::test]
    async fn test_get_book_bare_entity() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 7, "title": "Old", "author": "X", "content": "Y", "summary": "Z"
            })))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let book = api.get_book(&BookId::from("7")).await.unwrap();
        assert_eq!(book.title, "Old");
        assert_eq!(book.summary, "Z");
    }

    #[tokio::test]
    async fn test_get_book_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books/404"))
            .respond_with(ResponseTemplate::new(404).set_body_json(json!({
                "status": "error",
                "message": "no such book",
                "errorCode": "RESOURCE_NOT_FOUND"
            })))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let err = api.get_book(&BookId::from("404")).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_failure_envelope_with_ok_status() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books/3"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "error",
                "message": "backend unavailable",
                "errorCode": "INTERNAL_SERVER_ERROR"
            })))
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        match api.get_book(&BookId::from("3")).await {
            Err(BookcaseError::Api(failure)) => {
                assert_eq!(failure.message, "backend unavailable");
                assert_eq!(failure.code.as_deref(), Some("INTERNAL_SERVER_ERROR"));
            }
            other => panic!("expected API failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_server_error_is_surfaced() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/books"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        match api.list_books(&ListQuery::default()).await {
            Err(BookcaseError::Api(failure)) => {
                assert_eq!(failure.status, Some(500));
                assert_eq!(failure.message, "boom");
            }
            other => panic!("expected API failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_create_book_posts_draft() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/books"))
            .and(body_json(json!({
                "title": "Dune", "author": "Herbert", "summary": "", "content": "Sand"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "status": "success",
                "data": {
                    "id": 11, "title": "Dune", "author": "Herbert", "summary": "",
                    "content": "Sand", "createdAt": "2024-05-01T12:00:00"
                }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let book = api
            .create_book(&BookDraft::new("Dune", "Herbert", "Sand"))
            .await
            .unwrap();
        assert_eq!(book.id, BookId::from("11"));
        assert!(book.created_at.is_some());
    }

    #[tokio::test]
    async fn test_update_and_cover() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/api/books/7"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success", "data": { "id": 7, "title": "New" }
            })))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PATCH"))
            .and(path("/api/books/7/cover"))
            .and(body_json(json!({ "coverImageUrl": "https://img.example/c.png" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "status": "success",
                "data": { "id": 7, "title": "New", "coverImageUrl": "https://img.example/c.png" }
            })))
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        let id = BookId::from("7");
        let updated = api
            .update_book(&id, &BookDraft::new("New", "X", "Y"))
            .await
            .unwrap();
        assert_eq!(updated.title, "New");

        let covered = api
            .update_book_cover(&id, "https://img.example/c.png")
            .await
            .unwrap();
        assert_eq!(covered.cover_url(), "https://img.example/c.png");
    }

    #[tokio::test]
    async fn test_delete_accepts_empty_and_envelope_bodies() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/api/books/1"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("DELETE"))
            .and(path("/api/books/2"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(json!({ "status": "success", "message": "deleted" })),
            )
            .expect(1)
            .mount(&server)
            .await;

        let api = client_for(&server).await;
        api.delete_book(&BookId::from("1")).await.unwrap();
        api.delete_book(&BookId::from("2")).await.unwrap();
    }

    #[tokio::test]
    async fn test_transport_failure() {
        // Nothing listens on the discard port.
        let api = HttpBookApi::new("http://127.0.0.1:9/api", Duration::from_secs(2)).unwrap();
        let err = api.list_books(&ListQuery::default()).await.unwrap_err();
        assert!(matches!(err, BookcaseError::Transport(_)));
    }
}
