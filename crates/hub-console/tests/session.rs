//! End-to-end session behaviour over the fake transport

use hub_api::{endpoints, ListParams, Namespace, Project, Transport, TransportError};
use hub_authz::PermissionGate;
use hub_console::prelude::*;
use hub_console::RetryConfig;
use hub_store::{selectors, DeleteDialogRequest, DeleteHandler};
use hub_test_utils::{document_json, documents_response, namespaces_json, projects_json, user_json, FakeTransport};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

fn session(transport: &Arc<FakeTransport>) -> ConsoleSession {
    let config = ConsoleConfig::new().with_retry(RetryConfig::disabled());
    ConsoleSession::new(config, Arc::clone(transport) as Arc<dyn Transport>).unwrap()
}

#[tokio::test]
async fn delete_action_appears_once_permission_is_granted() {
    let transport = Arc::new(
        FakeTransport::new().with_json(endpoints::WHOAMI, user_json("alice", &["project:view"])),
    );
    let session = session(&transport);
    let gate = PermissionGate::any_of(["project:delete"]);

    // Nothing loaded yet: default deny.
    assert_eq!(session.decide(&gate), GateDecision::Deny);
    assert_eq!(session.authorize(&gate).await, GateDecision::Deny);

    // The cached user is served until the query is invalidated.
    transport.set_json(endpoints::WHOAMI, user_json("alice", &["project:view", "project:delete"]));
    assert_eq!(session.authorize(&gate).await, GateDecision::Deny);

    session.queries().invalidate_user().await;
    assert_eq!(session.decide(&gate), GateDecision::Deny);
    assert_eq!(session.authorize(&gate).await, GateDecision::Allow);
    assert_eq!(session.decide(&gate), GateDecision::Allow);
    assert_eq!(transport.calls(endpoints::WHOAMI), 2);
}

#[tokio::test]
async fn overview_surfaces_first_failure() {
    let transport = Arc::new(
        FakeTransport::new()
            .with_error(endpoints::SERVER_INFO, TransportError::status(503, "maintenance"))
            .with_json(endpoints::WHOAMI, user_json("alice", &[]))
            .with_json(endpoints::PROJECTS, projects_json(&["acme"])),
    );
    let status = session(&transport).overview_status().await;

    assert_eq!(status.status, QueryStatus::Error);
    assert_eq!(
        status.error.map(|e| e.to_string()),
        Some("transport error (503): maintenance".to_string())
    );
}

#[tokio::test]
async fn project_route_scopes_the_resolved_project() {
    let transport = Arc::new(
        FakeTransport::new().with_json(endpoints::PROJECTS, projects_json(&["acme", "globex"])),
    );
    let session = session(&transport);
    let root = RouteScope::root();

    let scope = session.project_scope(&root, "/projects/globex").await.unwrap();
    assert_eq!(scope.get::<Project>().map(|p| p.name.as_str()), Some("globex"));

    assert!(session.project_scope(&root, "/projects/initech").await.is_none());
    assert_eq!(transport.calls(endpoints::PROJECTS), 1);
}

#[tokio::test]
async fn documents_follow_the_selected_namespace() {
    let path = endpoints::namespace_documents("ns-1");
    let transport = Arc::new(
        FakeTransport::new().with_response(&path, documents_response(&[document_json("1", false)], 1)),
    );
    let session = session(&transport);

    assert_eq!(session.documents(&ListParams::new()).await.status(), QueryStatus::Idle);
    assert_eq!(transport.total_calls(), 0);

    assert!(session.select_namespace("ns-1").unwrap());
    let page = session.documents(&ListParams::new()).await;
    assert_eq!(page.data().map(|p| p.total), Some(1));
    assert_eq!(transport.calls(&path), 1);
    assert_eq!(transport.calls(&endpoints::documents("ns-1")), 0);
}

#[tokio::test]
async fn reselecting_the_same_namespace_changes_nothing() {
    let transport = Arc::new(FakeTransport::new());
    let session = session(&transport);
    let mut subscription = session.store().subscribe();

    assert!(session.select_namespace("ns-1").unwrap());
    assert!(subscription.has_changed());
    subscription.changed().await;

    assert!(!session.select_namespace("ns-1").unwrap());
    assert!(!subscription.has_changed());
    assert!(session.select_namespace("ns-2").unwrap());
}

fn namespace_transport() -> Arc<FakeTransport> {
    // ids "1", "2", "3"
    Arc::new(FakeTransport::new().with_json(endpoints::NAMESPACES, namespaces_json(&["sales", "billing", "ops"])))
}

#[tokio::test]
async fn namespace_in_route_overrides_the_stored_selection() {
    let transport = namespace_transport();
    let session = session(&transport);
    session.select_namespace("1").unwrap();

    let scope = session
        .namespace_scope(&RouteScope::root(), "/documents/ns/2")
        .await
        .unwrap();

    assert_eq!(scope.get::<Namespace>().map(|n| n.name.as_str()), Some("billing"));
    assert_eq!(session.selected_namespace(), Some(NamespaceId::from("2")));
}

#[tokio::test]
async fn namespace_falls_back_to_the_stored_selection() {
    let transport = namespace_transport();
    let session = session(&transport);
    let root = RouteScope::root();

    assert!(session.namespace_scope(&root, "/documents").await.is_none());
    assert_eq!(transport.calls(endpoints::NAMESPACES), 0);

    session.select_namespace("3").unwrap();
    let scope = session.namespace_scope(&root, "/documents").await.unwrap();

    assert_eq!(scope.get::<Namespace>().map(|n| n.name.as_str()), Some("ops"));
    assert_eq!(session.selected_namespace(), Some(NamespaceId::from("3")));
}

#[tokio::test]
async fn namespaces_are_matched_by_id_not_name() {
    let transport = namespace_transport();
    let session = session(&transport);
    let root = RouteScope::root();

    assert!(session.namespace_scope(&root, "/documents/ns/billing").await.is_none());
    assert!(session.namespace_scope(&root, "/documents/ns/9").await.is_none());
    assert_eq!(session.selected_namespace(), Some(NamespaceId::from("9")));
    assert_eq!(transport.calls(endpoints::NAMESPACES), 1);
}

#[test]
fn blank_namespace_is_rejected() {
    let transport = Arc::new(FakeTransport::new());
    let session = session(&transport);
    assert!(matches!(session.select_namespace("  "), Err(ConsoleError::Store(_))));
    assert_eq!(session.selected_namespace(), None);
}

#[test]
fn delete_dialog_runs_handler_and_records_failure() {
    let transport = Arc::new(FakeTransport::new());
    let session = session(&transport);
    let deleted = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&deleted);

    assert!(!session.confirm_delete());

    session.request_delete(DeleteDialogRequest::new(
        "acme",
        "project",
        DeleteHandler::new(move || flag.store(true, Ordering::SeqCst)),
    ));
    assert!(session.confirm_delete());
    assert!(deleted.load(Ordering::SeqCst));
    assert!(session.store().select(|s| selectors::delete_dialog(s).is_processing));

    session.fail_delete();
    let dialog = session.store().select(|s| selectors::delete_dialog(s).clone());
    assert!(dialog.is_error && !dialog.is_processing);

    session.close_delete();
    assert!(!session.store().select(|s| selectors::delete_dialog(s).is_open));
}

#[tokio::test(start_paused = true)]
async fn polling_requires_a_selection() {
    let path = endpoints::namespace_documents("ns-1");
    let transport = Arc::new(
        FakeTransport::new().with_response(&path, documents_response(&[document_json("1", true)], 1)),
    );
    let session = session(&transport);
    assert!(session.poll_documents(&ListParams::new()).is_none());

    session.select_namespace("ns-1").unwrap();
    let poller = session.poll_documents(&ListParams::new()).unwrap();
    tokio::time::sleep(Duration::from_millis(3_500)).await;
    assert_eq!(transport.calls(&path), 2);
    poller.stop();
}
