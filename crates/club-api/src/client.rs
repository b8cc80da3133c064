//! HTTP client for the backend's event resource.

use std::fmt;
use std::time::Duration;

use club_core::{Event, EventId, EventPatch, EventStatus, NewEvent};
use reqwest::{RequestBuilder, Url};
use serde::Deserialize;
use serde::de::DeserializeOwned;

use crate::ApiError;

/// Transport-level ceiling for a single request.
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Event API client.
///
/// # Thread Safety
///
/// The client is cheap to clone and safe to share across tasks. Each clone
/// shares the underlying HTTP connection pool.
#[derive(Clone)]
pub struct Client {
    http: reqwest::Client,
    base_url: Url,
    token: Option<String>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("base_url", &self.base_url.as_str())
            .field("token", &self.token.as_ref().map(|_| "[REDACTED]"))
            .finish_non_exhaustive()
    }
}

#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

impl Client {
    /// Creates a client rooted at `base_url` (e.g. `https://club.example/api`).
    ///
    /// `token` is sent as a bearer credential on mutating calls. A blank
    /// token is treated as absent.
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self, ApiError> {
        let base_url = base_url.trim();
        if base_url.is_empty() {
            return Err(ApiError::InvalidBaseUrl {
                reason: "base URL cannot be empty",
            });
        }
        let base_url = Url::parse(base_url).map_err(|_| ApiError::InvalidBaseUrl {
            reason: "base URL is not a valid URL",
        })?;
        if !matches!(base_url.scheme(), "http" | "https") {
            return Err(ApiError::InvalidBaseUrl {
                reason: "base URL must use http or https",
            });
        }

        let http = reqwest::Client::builder()
            .timeout(DEFAULT_TIMEOUT)
            .build()
            .map_err(ApiError::ClientBuild)?;

        let token = token.filter(|token| !token.trim().is_empty());
        Ok(Self {
            http,
            base_url,
            token,
        })
    }

    pub const fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// `GET /event/getall`, optionally narrowed to one status.
    pub async fn list_events(&self, status: Option<EventStatus>) -> Result<Vec<Event>, ApiError> {
        let mut request = self.http.get(self.endpoint(&["event", "getall"]));
        if let Some(status) = status {
            request = request.query(&[("status", status.as_str())]);
        }
        let envelope: Envelope<Vec<Event>> = self.fetch(request).await?;
        Ok(envelope.data)
    }

    /// `POST /event/create`. Returns the event with its backend-assigned ID.
    pub async fn create_event(&self, event: &NewEvent) -> Result<Event, ApiError> {
        let token = self.token_for("create")?;
        event.validate()?;
        let request = self
            .http
            .post(self.endpoint(&["event", "create"]))
            .bearer_auth(token)
            .json(event);
        let envelope: Envelope<Event> = self.fetch(request).await?;
        Ok(envelope.data)
    }

    /// `PUT /event/{id}/update` with only the fields present in `patch`.
    pub async fn update_event(&self, id: &EventId, patch: &EventPatch) -> Result<Event, ApiError> {
        let token = self.token_for("update")?;
        patch.validate()?;
        let request = self
            .http
            .put(self.endpoint(&["event", id.as_str(), "update"]))
            .bearer_auth(token)
            .json(patch);
        let envelope: Envelope<Event> = self.fetch(request).await?;
        Ok(envelope.data)
    }

    /// `DELETE /event/{id}/delete`. Any response body is ignored.
    pub async fn delete_event(&self, id: &EventId) -> Result<(), ApiError> {
        let token = self.token_for("delete")?;
        let request = self
            .http
            .delete(self.endpoint(&["event", id.as_str(), "delete"]))
            .bearer_auth(token);
        self.execute(request).await?;
        Ok(())
    }

    fn token_for(&self, operation: &'static str) -> Result<&str, ApiError> {
        self.token
            .as_deref()
            .ok_or(ApiError::MissingToken { operation })
    }

    /// Appends percent-encoded path segments to the base URL.
    fn endpoint(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        // Only cannot-be-a-base URLs refuse segments, and `new` admits http(s) only.
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    async fn fetch<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let body = self.execute(request).await?;
        serde_json::from_str(&body).map_err(|err| ApiError::InvalidResponse(err.to_string()))
    }

    async fn execute(&self, request: RequestBuilder) -> Result<String, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            tracing::debug!(%status, "event API returned an error status");
            return Err(parse_api_error(status.as_u16(), &body));
        }
        Ok(body)
    }
}

fn parse_api_error(status: u16, body: &str) -> ApiError {
    #[derive(Deserialize)]
    struct ErrorPayload {
        message: Option<String>,
    }

    let message = serde_json::from_str::<ErrorPayload>(body)
        .ok()
        .and_then(|payload| payload.message)
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| format!("request failed with status {status}"));
    ApiError::Api { status, message }
}

#[cfg(test)]
mod tests {
    use super::*;

    use wiremock::matchers::{body_json, header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const EVENT_JSON: &str = r#"{
        "_id": "65a1f0c2",
        "title": "Hack Night",
        "date": "2025-01-01T18:00",
        "location": "Lab 3",
        "status": "upcoming"
    }"#;

    fn data(inner: &str) -> String {
        format!(r#"{{"data": {inner}}}"#)
    }

    #[test]
    fn client_rejects_bad_base_urls() {
        assert!(matches!(
            Client::new("", None),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Client::new("not a url", None),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
        assert!(matches!(
            Client::new("mailto:club@example.com", None),
            Err(ApiError::InvalidBaseUrl { .. })
        ));
    }

    #[test]
    fn client_debug_redacts_token() {
        let client = Client::new("http://localhost:8000/api", Some("secret-token".into())).unwrap();
        let debug = format!("{client:?}");
        assert!(!debug.contains("secret-token"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn blank_token_counts_as_missing() {
        let client = Client::new("http://localhost:8000/api", Some("  ".into())).unwrap();
        assert!(!client.has_token());
    }

    #[test]
    fn endpoint_appends_encoded_segments() {
        let client = Client::new("http://localhost:8000/api/", None).unwrap();
        let url = client.endpoint(&["event", "a b/c", "update"]);
        assert_eq!(url.as_str(), "http://localhost:8000/api/event/a%20b%2Fc/update");
    }

    #[test]
    fn api_error_falls_back_to_status() {
        let err = parse_api_error(502, "<html>Bad Gateway</html>");
        assert_eq!(err.to_string(), "request failed with status 502");
        assert_eq!(err.status(), Some(502));

        let err = parse_api_error(400, r#"{"message": "Title is required"}"#);
        assert_eq!(err.to_string(), "Title is required");
    }

    #[tokio::test]
    async fn list_events_passes_status_filter() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/event/getall"))
            .and(query_param("status", "upcoming"))
            .respond_with(ResponseTemplate::new(200).set_body_string(data(&format!("[{EVENT_JSON}]"))))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), None).unwrap();
        let events = client.list_events(Some(EventStatus::Upcoming)).await.unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].id.as_str(), "65a1f0c2");
        assert_eq!(events[0].venue, "Lab 3");
    }

    #[tokio::test]
    async fn create_event_sends_bearer_and_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/event/create"))
            .and(header("authorization", "Bearer admin-token"))
            .and(body_json(serde_json::json!({
                "title": "Hack Night",
                "date": "2025-01-01T18:00",
                "venue": "Lab 3"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_string(data(EVENT_JSON)))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), Some("admin-token".into())).unwrap();
        let mut event = NewEvent::new("Hack Night", "2025-01-01T18:00");
        event.venue = Some("Lab 3".to_string());
        let created = client.create_event(&event).await.unwrap();

        assert_eq!(created.title, "Hack Night");
        assert!(!created.id.as_str().is_empty());
    }

    #[tokio::test]
    async fn mutations_require_token_before_any_request() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), None).unwrap();
        let id = EventId::new("e1").unwrap();
        let err = client.delete_event(&id).await.unwrap_err();

        assert!(matches!(err, ApiError::MissingToken { operation: "delete" }));
    }

    #[tokio::test]
    async fn update_rejects_empty_patch_locally() {
        let client = Client::new("http://127.0.0.1:9", Some("t".into())).unwrap();
        let id = EventId::new("e1").unwrap();
        let err = client
            .update_event(&id, &EventPatch::default())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Validation(_)));
    }

    #[tokio::test]
    async fn update_sends_only_patched_fields() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/event/65a1f0c2/update"))
            .and(body_json(serde_json::json!({"status": "cancelled"})))
            .respond_with(ResponseTemplate::new(200).set_body_string(data(EVENT_JSON)))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), Some("t".into())).unwrap();
        let id = EventId::new("65a1f0c2").unwrap();
        let patch = EventPatch {
            status: Some(EventStatus::Cancelled),
            ..EventPatch::default()
        };
        client.update_event(&id, &patch).await.unwrap();
    }

    #[tokio::test]
    async fn delete_ignores_empty_success_body() {
        let server = MockServer::start().await;
        Mock::given(method("DELETE"))
            .and(path("/event/e1/delete"))
            .respond_with(ResponseTemplate::new(204))
            .expect(1)
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), Some("t".into())).unwrap();
        client
            .delete_event(&EventId::new("e1").unwrap())
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn malformed_success_body_is_invalid_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/event/getall"))
            .respond_with(ResponseTemplate::new(200).set_body_string(r#"{"events": []}"#))
            .mount(&server)
            .await;

        let client = Client::new(&server.uri(), None).unwrap();
        let err = client.list_events(None).await.unwrap_err();
        assert!(matches!(err, ApiError::InvalidResponse(_)));
    }

    #[tokio::test]
    async fn unreachable_server_is_transport_error() {
        // Port 9 (discard) is closed on test hosts.
        let client = Client::new("http://127.0.0.1:9", None).unwrap();
        let err = client.list_events(None).await.unwrap_err();
        assert!(matches!(err, ApiError::Transport(_)));
        assert!(err.to_string().starts_with("network error"));
    }
}
