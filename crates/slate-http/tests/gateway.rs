//! Auth gateway tests against a mock API server.
//!
//! These tests use wiremock to simulate the school management API and check
//! credential injection and 401 teardown without network access.

mod common;

use std::sync::Arc;

use serde_json::{Value, json};
use slate_core::error::{Error, TransportError};
use slate_core::{ApiUrl, Credentials, Destination, MemorySessionStore, Role, SessionStore};
use slate_http::{ASSIGNED_EXAMS, STUDENTS, SessionContext, TEACHERS};
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use common::{
    ReadOnlyStore, RecordingNavigator, anonymous, authenticated, harness, mock_api_url, session,
};

// ============================================================================
// Request Stage
// ============================================================================

#[tokio::test]
async fn attaches_bearer_token_when_authenticated() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teachers/"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{"id": 1}])))
        .expect(1)
        .mount(&server)
        .await;

    let h = authenticated(&server, "A");
    let teachers: Value = h.context.gateway().get_json(TEACHERS).await.unwrap();

    assert_eq!(teachers, json!([{"id": 1}]));
}

#[tokio::test]
async fn sends_no_authorization_header_when_anonymous() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let h = anonymous(&server);
    let _: Value = h.context.gateway().get_json(STUDENTS).await.unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn request_after_login_carries_new_token() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/token/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "fresh-access",
            "refresh": "fresh-refresh",
            "role": "student"
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/api/exams/assigned/"))
        .and(header("authorization", "Bearer fresh-access"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .expect(1)
        .mount(&server)
        .await;

    let h = anonymous(&server);
    h.context
        .login(Credentials::new("s@x.com", "pw").unwrap())
        .await
        .unwrap();

    let _: Value = h.context.gateway().get_json(ASSIGNED_EXAMS).await.unwrap();
}

// ============================================================================
// Response Stage
// ============================================================================

#[tokio::test]
async fn unauthorized_tears_down_session() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teachers/"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": "Given token not valid for any token type"
        })))
        .mount(&server)
        .await;

    let h = authenticated(&server, "expired");
    let err = h
        .context
        .gateway()
        .get_json::<Value>(TEACHERS)
        .await
        .unwrap_err();

    assert!(err.is_authorization_expired());
    assert!(h.store.get().is_none());
    assert!(h.context.current().is_none());
    assert_eq!(h.navigator.visits(), vec![Destination::Login]);
}

#[tokio::test]
async fn concurrent_unauthorized_responses_tear_down_once_safely() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let h = authenticated(&server, "expired");
    let gateway = h.context.gateway();

    let (a, b, c) = tokio::join!(
        gateway.get_json::<Value>(TEACHERS),
        gateway.get_json::<Value>(STUDENTS),
        gateway.get_json::<Value>(ASSIGNED_EXAMS),
    );

    for result in [a, b, c] {
        assert!(result.unwrap_err().is_authorization_expired());
    }
    assert!(h.store.get().is_none());
    assert!(h.context.current().is_none());

    let visits = h.navigator.visits();
    assert!(!visits.is_empty());
    assert!(visits.iter().all(|d| *d == Destination::Login));
}

#[tokio::test]
async fn unauthorized_while_anonymous_still_navigates_to_login() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let h = anonymous(&server);
    let err = h
        .context
        .gateway()
        .get_json::<Value>(TEACHERS)
        .await
        .unwrap_err();

    assert!(err.is_authorization_expired());
    assert_eq!(h.navigator.visits(), vec![Destination::Login]);
}

#[tokio::test]
async fn server_error_is_returned_without_teardown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teachers/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
        .mount(&server)
        .await;

    let h = authenticated(&server, "A");
    let err = h
        .context
        .gateway()
        .get_json::<Value>(TEACHERS)
        .await
        .unwrap_err();

    match err {
        Error::Protocol(e) => {
            assert_eq!(e.status, 500);
            assert_eq!(e.detail.as_deref(), Some("boom"));
        }
        other => panic!("expected protocol error, got {other:?}"),
    }
    assert_eq!(h.store.get(), Some(session("A", Role::Teacher)));
    assert!(h.context.is_authenticated());
    assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn forbidden_carries_server_detail() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/teachers/"))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "detail": "You do not have permission to perform this action."
        })))
        .mount(&server)
        .await;

    let h = authenticated(&server, "A");
    let err = h
        .context
        .gateway()
        .get_json::<Value>(TEACHERS)
        .await
        .unwrap_err();

    let Error::Protocol(e) = err else {
        panic!("expected protocol error");
    };
    assert_eq!(e.status, 403);
    assert_eq!(
        e.detail.as_deref(),
        Some("You do not have permission to perform this action.")
    );
    assert!(h.context.is_authenticated());
}

#[tokio::test]
async fn transport_error_does_not_tear_down() {
    // Reserve a port, then release it so nothing is listening.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let api = ApiUrl::new(format!("http://127.0.0.1:{}/api", port)).unwrap();
    let h = harness(
        api,
        MemorySessionStore::with_session(session("A", Role::Admin)),
    );

    let err = h
        .context
        .gateway()
        .get_json::<Value>(TEACHERS)
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Transport(TransportError::Connection { .. })));
    assert!(h.context.is_authenticated());
    assert!(h.store.get().is_some());
    assert!(h.navigator.visits().is_empty());
}

#[tokio::test]
async fn subscribers_observe_gateway_teardown() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let h = authenticated(&server, "expired");
    let mut rx = h.context.subscribe();
    assert!(rx.borrow_and_update().is_some());

    let _ = h.context.gateway().get_json::<Value>(TEACHERS).await;

    assert!(rx.has_changed().unwrap());
    assert!(rx.borrow_and_update().is_none());
}

#[tokio::test]
async fn unauthorized_with_unclearable_store_keeps_memory_and_store_in_step() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/students/"))
        .and(header("authorization", "Bearer A"))
        .respond_with(ResponseTemplate::new(401))
        .expect(2)
        .mount(&server)
        .await;

    let store = Arc::new(ReadOnlyStore(MemorySessionStore::with_session(session(
        "A",
        Role::Teacher,
    ))));
    let navigator = Arc::new(RecordingNavigator::default());
    let context =
        SessionContext::new(mock_api_url(&server), store.clone(), navigator.clone()).unwrap();

    let err = context
        .gateway()
        .get_json::<Value>(STUDENTS)
        .await
        .unwrap_err();
    assert!(err.is_authorization_expired());

    // The store still holds the token, so memory must still report it.
    assert!(store.get().is_some());
    assert_eq!(context.current(), store.get());
    assert!(context.is_authenticated());

    // The next request carries the same credential memory reports.
    let err = context
        .gateway()
        .get_json::<Value>(STUDENTS)
        .await
        .unwrap_err();
    assert!(err.is_authorization_expired());
    assert_eq!(context.current(), store.get());
    assert_eq!(navigator.visits(), vec![Destination::Login, Destination::Login]);
}
