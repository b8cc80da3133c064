//! Hook behaviour against a mock backend.
//!
//! Covers the create/update/delete/list lifecycles and the
//! refetch-after-successful-mutation pattern the presentation layer relies on.

use chrono::{DateTime, Utc};
use club_api::{ApiError, Client, CreateEvent, DeleteEvent, ListEvents, Phase, UpdateEvent};
use club_core::{EventId, EventPatch, EventStatus, NewEvent, categorize, filter_by_query};
use serde_json::json;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "admin-token";

fn client(server: &MockServer) -> Client {
    Client::new(&server.uri(), Some(TOKEN.to_string())).unwrap()
}

fn event_json(id: &str, title: &str, date: &str, status: &str) -> serde_json::Value {
    json!({
        "_id": id,
        "title": title,
        "description": "",
        "venue": "Main Hall",
        "date": date,
        "status": status,
        "tags": [],
        "posters": []
    })
}

// ============================================================================
// Create
// ============================================================================

#[tokio::test]
async fn create_success_sets_result_with_assigned_id() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/event/create"))
        .respond_with(ResponseTemplate::new(201).set_body_json(json!({
            "data": {
                "_id": "6790ab12",
                "title": "Hack Night",
                "date": "2025-01-01T18:00",
                "location": "Lab 3"
            }
        })))
        .mount(&server)
        .await;

    let hook = CreateEvent::new(client(&server));
    let mut input = NewEvent::new("Hack Night", "2025-01-01T18:00");
    input.venue = Some("Lab 3".to_string());

    let created = hook.invoke(&input).await.unwrap();

    let result = hook.result().unwrap();
    assert!(!result.id.as_str().is_empty());
    assert_eq!(result, created);
    assert_eq!(result.venue, "Lab 3");
    assert!(!hook.loading());
    assert_eq!(hook.error(), None);
    assert_eq!(hook.phase(), Phase::Succeeded);
}

#[tokio::test]
async fn create_validation_failure_is_recorded_and_raised() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(201))
        .expect(0)
        .mount(&server)
        .await;

    let hook = CreateEvent::new(client(&server));
    let err = hook
        .invoke(&NewEvent::new("", "2025-01-01T18:00"))
        .await
        .unwrap_err();

    assert!(matches!(err, ApiError::Validation(_)));
    assert_eq!(hook.error().as_deref(), Some("title cannot be empty"));
    assert!(!hook.loading());
}

// ============================================================================
// Update
// ============================================================================

#[tokio::test]
async fn update_success_returns_stored_event() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/event/e1/update"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": event_json("e1", "Hack Night", "2025-01-01T18:00", "cancelled")
        })))
        .mount(&server)
        .await;

    let hook = UpdateEvent::new(client(&server));
    let patch = EventPatch {
        status: Some(EventStatus::Cancelled),
        ..EventPatch::default()
    };
    let updated = hook
        .invoke(&EventId::new("e1").unwrap(), &patch)
        .await
        .unwrap();

    assert_eq!(updated.status, EventStatus::Cancelled);
    assert_eq!(hook.result().unwrap().status, EventStatus::Cancelled);
}

// ============================================================================
// Delete
// ============================================================================

#[tokio::test]
async fn delete_not_found_records_backend_message() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/event/missing/delete"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({"message": "Not found"})))
        .mount(&server)
        .await;

    let hook = DeleteEvent::new(client(&server));
    let err = hook
        .invoke(&EventId::new("missing").unwrap())
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(404));
    assert_eq!(hook.error().as_deref(), Some("Not found"));
    assert_eq!(hook.result(), None);
    assert!(!hook.loading());
    assert_eq!(hook.phase(), Phase::Failed);
}

#[tokio::test]
async fn delete_success_sets_flag() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/event/e1/delete"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"message": "Deleted"})))
        .mount(&server)
        .await;

    let hook = DeleteEvent::new(client(&server));
    hook.invoke(&EventId::new("e1").unwrap()).await.unwrap();

    assert_eq!(hook.result(), Some(true));
}

// ============================================================================
// List
// ============================================================================

#[tokio::test]
async fn list_failure_keeps_stale_snapshot() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/event/getall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [event_json("e1", "Hack Night", "2025-01-01T18:00", "upcoming")]
        })))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/event/getall"))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({"message": "Database down"})))
        .mount(&server)
        .await;

    let hook = ListEvents::new(client(&server));
    hook.invoke(None).await.unwrap();
    assert_eq!(hook.events().len(), 1);

    let err = hook.invoke(None).await.unwrap_err();
    assert_eq!(err.to_string(), "Database down");
    assert_eq!(hook.error().as_deref(), Some("Database down"));
    assert_eq!(hook.events().len(), 1);
    assert_eq!(hook.events()[0].id.as_str(), "e1");
}

#[tokio::test]
async fn list_without_message_uses_generic_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let hook = ListEvents::new(client(&server));
    hook.invoke(None).await.unwrap_err();

    assert_eq!(
        hook.error().as_deref(),
        Some("request failed with status 503")
    );
    assert!(hook.events().is_empty());
}

#[tokio::test]
async fn list_then_empty_filter_reproduces_categorize() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/event/getall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                event_json("a", "AI Workshop 2024", "2025-06-15T17:00:00Z", "upcoming"),
                event_json("b", "Sports Day", "2025-07-01T09:00:00Z", "upcoming"),
                event_json("c", "Welcome Social", "2025-05-01T19:00:00Z", "completed"),
                event_json("d", "Gala", "2025-07-10T19:00:00Z", "cancelled")
            ]
        })))
        .mount(&server)
        .await;

    let hook = ListEvents::new(client(&server));
    let events = hook.invoke(None).await.unwrap();
    let now: DateTime<Utc> = "2025-06-15T12:00:00Z".parse().unwrap();

    let buckets = categorize(&events, &now);
    assert_eq!(filter_by_query(buckets.clone(), ""), buckets);
    assert_eq!(buckets.ongoing.len(), 1);
    assert_eq!(buckets.upcoming.len(), 1);
    assert_eq!(buckets.past.len(), 1);
}

#[tokio::test]
async fn list_tolerates_loosely_typed_records() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/event/getall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [
                {"_id": "epoch", "title": "Imported", "date": 1735689600000_u64, "tags": null},
                {"_id": "gala", "title": "Gala", "date": "2025-07-10T19:00:00Z", "status": "canceled"},
                {"_id": "social", "title": "Social", "date": "2025-06-15T19:00:00Z", "status": null, "posters": null}
            ]
        })))
        .mount(&server)
        .await;

    let hook = ListEvents::new(client(&server));
    let events = hook.invoke(None).await.unwrap();
    assert_eq!(events.len(), 3);
    assert!(hook.error().is_none());

    let now: DateTime<Utc> = "2025-06-15T12:00:00Z".parse().unwrap();
    let buckets = categorize(&events, &now);
    assert_eq!(buckets.past.len(), 1);
    assert_eq!(buckets.past[0].id.as_str(), "epoch");
    assert_eq!(buckets.ongoing.len(), 1);
    assert_eq!(buckets.ongoing[0].id.as_str(), "social");
    assert!(buckets.upcoming.is_empty());
    assert_eq!(events[1].status, EventStatus::Cancelled);
}

// ============================================================================
// Refetch after mutation
// ============================================================================

#[tokio::test]
async fn refetch_runs_only_after_successful_delete() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/event/ok/delete"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/event/locked/delete"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({"message": "Forbidden"})))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/event/getall"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": []})))
        .expect(1)
        .mount(&server)
        .await;

    let api = client(&server);
    let delete = DeleteEvent::new(api.clone());
    let list = ListEvents::new(api);

    for id in ["locked", "ok"] {
        let id = EventId::new(id).unwrap();
        if delete.invoke(&id).await.is_ok() {
            list.invoke(None).await.unwrap();
        }
    }

    assert_eq!(list.phase(), Phase::Succeeded);
    assert_eq!(delete.error(), None);
}
