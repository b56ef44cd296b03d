//! `HubQueries` against the fake transport

use hub_api::{endpoints, DocumentsOwner, HubQueries, ListParams, Pagination, TransportError};
use hub_query::{FetchError, QueryStatus, RetryPolicy};
use hub_test_utils::{document_json, documents_response, projects_json, user_json, FakeTransport};
use std::sync::Arc;
use std::time::Duration;

fn queries(transport: &Arc<FakeTransport>) -> HubQueries {
    HubQueries::new(Arc::clone(transport) as Arc<dyn hub_api::Transport>, 100)
        .with_retry(RetryPolicy::none())
}

#[tokio::test]
async fn concurrent_project_reads_share_one_request() {
    let transport = Arc::new(
        FakeTransport::new()
            .with_latency(Duration::from_millis(20))
            .with_json(endpoints::PROJECTS, projects_json(&["acme", "globex"])),
    );
    let queries = queries(&transport);

    let (a, b, c) = futures::join!(queries.projects(), queries.projects(), queries.projects());

    assert_eq!(transport.calls(endpoints::PROJECTS), 1);
    for result in [a, b, c] {
        assert_eq!(result.data().map(Vec::len), Some(2));
    }
}

#[tokio::test]
async fn whoami_decodes_permissions() {
    let transport = Arc::new(
        FakeTransport::new().with_json(endpoints::WHOAMI, user_json("alice", &["project:read"])),
    );
    let user = queries(&transport).current_user().await;

    let user = user.data().unwrap();
    assert_eq!(user.username, "alice");
    assert!(user.permissions.contains("project:read"));
}

#[tokio::test]
async fn server_errors_surface_as_errored_results() {
    let transport = Arc::new(
        FakeTransport::new().with_error(endpoints::SERVER_INFO, TransportError::status(500, "boom")),
    );
    let result = queries(&transport).server_info().await;

    assert_eq!(result.status(), QueryStatus::Error);
    assert_eq!(result.error(), Some(&FetchError::transport(Some(500), "boom")));
}

#[tokio::test]
async fn retries_until_success() {
    let transport = Arc::new(
        FakeTransport::new().with_json(endpoints::NAMESPACES, serde_json::json!([{ "name": "ns-1" }])),
    );
    transport.fail_next(endpoints::NAMESPACES, TransportError::Connection("reset".into()));
    let queries = HubQueries::new(Arc::clone(&transport) as Arc<dyn hub_api::Transport>, 100)
        .with_retry(RetryPolicy::immediate(2));

    let result = queries.namespaces().await;

    assert!(result.is_success());
    assert_eq!(transport.calls(endpoints::NAMESPACES), 2);
}

#[tokio::test]
async fn documents_wait_for_a_project() {
    let transport = Arc::new(FakeTransport::new());
    let result = queries(&transport).documents(None, &ListParams::new()).await;

    assert_eq!(result.status(), QueryStatus::Idle);
    assert_eq!(transport.total_calls(), 0);
}

#[tokio::test]
async fn documents_page_reads_total_header_and_params() {
    let path = endpoints::documents("acme");
    let transport = Arc::new(FakeTransport::new().with_response(
        &path,
        documents_response(&[document_json("1", false), document_json("2", true)], 57),
    ));
    let params = ListParams::new()
        .with_filter_text("F001")
        .with_pagination(Pagination { page: 2, per_page: 2 });

    let page = queries(&transport).documents(Some(DocumentsOwner::Project("acme")), &params).await;

    let page = page.data().unwrap();
    assert_eq!(page.total, 57);
    assert!(page.has_in_progress());
    assert_eq!(
        transport.last_query(&path),
        Some(vec![
            ("filterText".to_string(), "F001".to_string()),
            ("offset".to_string(), "2".to_string()),
            ("limit".to_string(), "2".to_string()),
        ])
    );
}

#[tokio::test]
async fn missing_logo_is_none() {
    let path = endpoints::company_logo("acme", "20123456789");
    let transport = Arc::new(FakeTransport::new().with_response(&path, hub_api::Response::ok("")));

    let logo = queries(&transport).company_logo("acme", "20123456789").await;

    assert_eq!(logo.data().map(|l| l.0.is_none()), Some(true));
}

#[tokio::test]
async fn invalidated_projects_are_fetched_again() {
    let transport = Arc::new(FakeTransport::new().with_json(endpoints::PROJECTS, projects_json(&["acme"])));
    let queries = queries(&transport);

    let _ = queries.projects().await;
    let _ = queries.projects().await;
    assert_eq!(transport.calls(endpoints::PROJECTS), 1);

    transport.set_json(endpoints::PROJECTS, projects_json(&["acme", "initech"]));
    queries.invalidate_projects().await;
    let projects = queries.projects().await;

    assert_eq!(transport.calls(endpoints::PROJECTS), 2);
    assert_eq!(projects.data().map(Vec::len), Some(2));
}

#[tokio::test(start_paused = true)]
async fn polling_speeds_up_while_documents_are_in_progress() {
    let path = endpoints::documents("acme");
    let transport = Arc::new(
        FakeTransport::new().with_response(&path, documents_response(&[document_json("1", true)], 1)),
    );
    let queries = queries(&transport);
    let params = ListParams::new();

    let poller = queries.poll_documents(DocumentsOwner::Project("acme"), &params, Duration::from_secs(3), None);

    tokio::time::sleep(Duration::from_millis(6_500)).await;
    assert_eq!(transport.calls(&path), 3);

    transport.set_json(&path, serde_json::json!([document_json("1", false)]));
    tokio::time::sleep(Duration::from_secs(30)).await;
    assert_eq!(transport.calls(&path), 4);
    assert!(poller.is_finished());
}

#[tokio::test]
async fn projects_are_sorted_by_name() {
    let transport = Arc::new(
        FakeTransport::new().with_json(endpoints::PROJECTS, projects_json(&["globex", "acme", "initech"])),
    );
    let projects = queries(&transport).projects().await;

    let names: Vec<&str> = projects
        .data()
        .unwrap()
        .iter()
        .map(|p| p.name.as_str())
        .collect();
    assert_eq!(names, vec!["acme", "globex", "initech"]);
}

#[tokio::test]
async fn namespace_documents_use_the_namespace_resource() {
    let path = endpoints::namespace_documents("1");
    let transport = Arc::new(
        FakeTransport::new().with_response(&path, documents_response(&[document_json("1", false)], 1)),
    );

    let page = queries(&transport)
        .documents(Some(DocumentsOwner::Namespace("1")), &ListParams::new())
        .await;

    assert_eq!(page.data().map(|p| p.total), Some(1));
    assert_eq!(transport.calls(&path), 1);
    assert_eq!(transport.calls(&endpoints::documents("1")), 0);
}

#[tokio::test]
async fn distinct_failed_filters_do_not_accumulate() {
    let transport = Arc::new(FakeTransport::new());
    let queries = queries(&transport);

    for i in 0..500 {
        let params = ListParams::new().with_filter_text(format!("f{i}"));
        let page = queries.documents(Some(DocumentsOwner::Project("acme")), &params).await;
        assert!(page.is_error());
    }

    let stats = queries.documents_stats();
    assert_eq!(stats.fetch_count, 500);
    assert_eq!(stats.entry_count, 0);
    assert_eq!(stats.observed_keys, 0);
}

#[tokio::test(start_paused = true)]
async fn polling_survives_a_transient_server_error() {
    let path = endpoints::documents("acme");
    let transport = Arc::new(
        FakeTransport::new().with_response(&path, documents_response(&[document_json("1", true)], 1)),
    );
    let queries = queries(&transport);
    let params = ListParams::new();

    let poller = queries.poll_documents(DocumentsOwner::Project("acme"), &params, Duration::from_secs(3), None);
    tokio::time::sleep(Duration::from_millis(500)).await;
    assert_eq!(transport.calls(&path), 1);

    transport.fail_next(&path, TransportError::status(503, "unavailable"));
    tokio::time::sleep(Duration::from_secs(3)).await;
    assert_eq!(transport.calls(&path), 2);

    tokio::time::sleep(Duration::from_secs(30)).await;
    assert!(transport.calls(&path) > 2);
    assert!(!poller.is_finished());
}
