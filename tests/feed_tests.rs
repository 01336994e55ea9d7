// Document database feed tests against a mock server

use mockito::Matcher;
use serde_json::json;
use skillswap_algo::config::FirestoreSettings;
use skillswap_algo::services::{spawn_refresh, FirestoreClient, FirestoreError, PopulationStore};
use std::sync::Arc;
use std::time::Duration;

const USERS_PATH: &str = "/projects/demo/databases/(default)/documents/users";

fn settings_for(server: &mockito::ServerGuard) -> FirestoreSettings {
    FirestoreSettings {
        endpoint: server.url(),
        project_id: Some("demo".to_string()),
        api_key: Some("test-key".to_string()),
        page_size: 2,
        timeout_secs: 5,
        ..FirestoreSettings::default()
    }
}

fn user_document(id: &str, name: &str, offered: &[&str]) -> serde_json::Value {
    let values: Vec<serde_json::Value> = offered
        .iter()
        .map(|skill| json!({ "stringValue": skill }))
        .collect();

    json!({
        "name": format!("projects/demo/databases/(default)/documents/users/{}", id),
        "fields": {
            "name": { "stringValue": name },
            "skillsOffered": { "arrayValue": { "values": values } },
            "isPublic": { "booleanValue": true }
        }
    })
}

#[tokio::test]
async fn test_list_users_follows_pages() {
    let mut server = mockito::Server::new_async().await;

    let first = server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Regex("^pageSize=2&orderBy=".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "documents": [
                    user_document("u1", "Ada", &["Math"]),
                    user_document("u2", "Grace", &["COBOL"])
                ],
                "nextPageToken": "page-2"
            })
            .to_string(),
        )
        .create_async()
        .await;

    let second = server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Regex("pageToken=page-2".into()))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(json!({ "documents": [user_document("u3", "Alan", &["Math"])] }).to_string())
        .create_async()
        .await;

    let client = FirestoreClient::new(&settings_for(&server)).unwrap();
    let profiles = client.list_users().await.unwrap();

    let ids: Vec<&str> = profiles.iter().map(|p| p.user_id()).collect();
    assert_eq!(ids, vec!["u1", "u2", "u3"]);
    assert_eq!(profiles[1].skills_offered, vec!["COBOL"]);

    first.assert_async().await;
    second.assert_async().await;
}

#[tokio::test]
async fn test_list_users_sends_api_key() {
    let mut server = mockito::Server::new_async().await;

    let mock = server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::UrlEncoded("key".into(), "test-key".into()))
        .with_status(200)
        .with_body("{}")
        .create_async()
        .await;

    let client = FirestoreClient::new(&settings_for(&server)).unwrap();
    let profiles = client.list_users().await.unwrap();

    // Empty collections come back without a documents field
    assert!(profiles.is_empty());
    mock.assert_async().await;
}

#[tokio::test]
async fn test_list_users_skips_bad_documents() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "documents": [
                    user_document("u1", "Ada", &["Math"]),
                    {
                        "name": "projects/demo/databases/(default)/documents/users/bad",
                        "fields": { "skillsWanted": { "integerValue": "3" } }
                    }
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let client = FirestoreClient::new(&settings_for(&server)).unwrap();
    let profiles = client.list_users().await.unwrap();

    assert_eq!(profiles.len(), 1);
    assert_eq!(profiles[0].user_id(), "u1");
}

#[tokio::test]
async fn test_list_users_errors() {
    let mut server = mockito::Server::new_async().await;

    let forbidden = server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(403)
        .create_async()
        .await;

    let client = FirestoreClient::new(&settings_for(&server)).unwrap();
    assert!(matches!(
        client.list_users().await,
        Err(FirestoreError::Unauthorized)
    ));
    forbidden.remove_async().await;

    server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("backend unavailable")
        .create_async()
        .await;

    match client.list_users().await {
        Err(FirestoreError::ApiError { status, body }) => {
            assert_eq!(status.as_u16(), 500);
            assert_eq!(body, "backend unavailable");
        }
        other => panic!("expected ApiError, got {:?}", other.map(|p| p.len())),
    }
}

#[tokio::test]
async fn test_refresh_publishes_listed_profiles() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "documents": [
                    user_document("u1", "Ada", &["Math"]),
                    user_document("u2", "   ", &["Math"])
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    let store = Arc::new(PopulationStore::new());
    let client = Arc::new(FirestoreClient::new(&settings_for(&server)).unwrap());
    let handle = spawn_refresh(Arc::clone(&store), client, Duration::from_millis(50));

    let mut revision = 0;
    for _ in 0..100 {
        revision = store.snapshot().revision;
        if revision > 0 {
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }
    handle.abort();

    assert_eq!(revision, 1);
    let snapshot = store.snapshot();
    assert_eq!(snapshot.profiles.len(), 1);
    assert_eq!(snapshot.profiles[0].user_id(), "u1");
}

async fn wait_for_revision(store: &PopulationStore, revision: u64) -> bool {
    for _ in 0..200 {
        if store.snapshot().revision >= revision {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}

#[tokio::test]
async fn test_failed_refresh_keeps_previous_snapshot() {
    let mut server = mockito::Server::new_async().await;

    let healthy = server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(json!({ "documents": [user_document("u1", "Ada", &["Math"])] }).to_string())
        .create_async()
        .await;

    let store = Arc::new(PopulationStore::new());
    let client = Arc::new(FirestoreClient::new(&settings_for(&server)).unwrap());
    let handle = spawn_refresh(Arc::clone(&store), client, Duration::from_millis(20));

    assert!(wait_for_revision(&store, 1).await);
    healthy.remove_async().await;

    let failing = server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body("backend unavailable")
        .expect_at_least(2)
        .create_async()
        .await;

    for _ in 0..200 {
        if failing.matched_async().await {
            break;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    failing.assert_async().await;

    let snapshot = store.snapshot();
    assert_eq!(snapshot.revision, 1);
    assert_eq!(snapshot.profiles.len(), 1);
    assert_eq!(snapshot.profiles[0].user_id(), "u1");
    assert!(!handle.is_finished());

    // The loop survives the failures and picks up the next good response
    failing.remove_async().await;
    server
        .mock("GET", USERS_PATH)
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(
            json!({
                "documents": [
                    user_document("u1", "Ada", &["Math"]),
                    user_document("u2", "Grace", &["COBOL"])
                ]
            })
            .to_string(),
        )
        .create_async()
        .await;

    assert!(wait_for_revision(&store, 2).await);
    handle.abort();

    assert_eq!(store.snapshot().profiles.len(), 2);
}
