//! End-to-end tests of the request pipeline against a local mock server.

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use httpmock::prelude::*;
use mailchimp3::campaigns::CampaignQueryParams;
use mailchimp3::params::ExtendedQueryParams;
use mailchimp3::{
    Client, ClientError, ListOfTemplateFolders, ListOfWebhooks, MemberRequest,
    TemplateFolderQueryParams,
};
use serde_json::json;

const API_KEY: &str = "0123456789abcdef0123456789abcdef-us14";

/// Client pointed at the mock server instead of the derived endpoint.
fn test_client(server: &MockServer) -> Client {
    Client::with_endpoint(API_KEY, &server.base_url())
}

#[tokio::test]
async fn get_list_sends_basic_auth_and_decodes() {
    let server = MockServer::start();
    let auth = format!("Basic {}", BASE64.encode(format!("mailchimp3:{API_KEY}")));

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/lists/l1")
            .header("Authorization", auth.as_str())
            .header("Content-Type", "application/json");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": "l1",
                "name": "Newsletter",
                "stats": {"member_count": 3}
            }));
    });

    let client = test_client(&server);
    let list = client.get_list("l1", None).await.unwrap();

    assert_eq!(list.id, "l1");
    assert_eq!(list.name, "Newsletter");
    assert_eq!(list.stats.member_count, 3);
    mock.assert();
}

#[tokio::test]
async fn empty_query_values_are_dropped() {
    let server = MockServer::start();

    // Matches only if an empty `type=` parameter reaches the wire.
    let empty_param_mock = server.mock(|when, then| {
        when.method(GET).path("/campaigns").query_param("type", "");
        then.status(500);
    });

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/campaigns")
            .query_param("status", "sent")
            .query_param("count", "10")
            .query_param("offset", "0");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"campaigns": [], "total_items": 0}));
    });

    let client = test_client(&server);
    let params = CampaignQueryParams {
        status: "sent".to_string(),
        extended: ExtendedQueryParams {
            count: 10,
            ..Default::default()
        },
        ..Default::default()
    };
    let campaigns = client.get_campaigns(Some(&params)).await.unwrap();

    assert_eq!(campaigns.meta.total_items, 0);
    assert_eq!(empty_param_mock.hits(), 0);
    mock.assert();
}

#[tokio::test]
async fn not_found_decodes_into_api_error() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/campaigns/missing");
        then.status(404)
            .header("Content-Type", "application/problem+json")
            .json_body(json!({
                "type": "https://mailchimp.com/developer/marketing/docs/errors/",
                "title": "Resource Not Found",
                "status": 404,
                "detail": "The requested resource could not be found.",
                "instance": "abc"
            }));
    });

    let client = test_client(&server);
    let err = client.get_campaign("missing", None).await.unwrap_err();

    match err {
        ClientError::Api(api) => {
            assert_eq!(api.status, 404);
            assert_eq!(api.title, "Resource Not Found");
            assert_eq!(api.detail, "The requested resource could not be found.");
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn delete_returns_same_api_error_on_failure() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(DELETE).path("/campaigns/missing");
        then.status(404)
            .json_body(json!({"title": "Not Found", "status": 404, "detail": "gone"}));
    });

    let client = test_client(&server);
    let err = client.delete_campaign("missing").await.unwrap_err();

    match err {
        ClientError::Api(api) => {
            assert_eq!(api.status, 404);
            assert_eq!(api.detail, "gone");
        }
        other => panic!("expected Api error, got {other}"),
    }
}

#[tokio::test]
async fn delete_with_empty_204_succeeds() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(DELETE).path("/lists/l1/members/abc");
        then.status(204);
    });

    let client = test_client(&server);
    client.list("l1").delete_member("abc").await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn garbage_error_body_preserves_status() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/lists/l1");
        then.status(502).body("<html>bad gateway</html>");
    });

    let client = test_client(&server);
    let err = client.get_list("l1", None).await.unwrap_err();

    match err {
        ClientError::ErrorBodyDecode { status, .. } => assert_eq!(status, 502),
        other => panic!("expected ErrorBodyDecode, got {other}"),
    }
}

#[tokio::test]
async fn create_member_posts_json_body() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/lists/l1/members")
            .header("Content-Type", "application/json")
            .json_body(json!({
                "email_address": "john@example.com",
                "status": "subscribed",
                "language": "",
                "vip": false
            }));
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": "d4c74594d841139328695756648b6bd6",
                "list_id": "l1",
                "email_address": "john@example.com",
                "status": "subscribed"
            }));
    });

    let client = test_client(&server);
    let member = client
        .list("l1")
        .create_member(&MemberRequest {
            email_address: "john@example.com".to_string(),
            status: "subscribed".to_string(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(member.id, "d4c74594d841139328695756648b6bd6");
    assert_eq!(member.list_id, "l1");
    mock.assert();
}

#[tokio::test]
async fn member_sub_resource_paths_compose_from_handle() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/lists/l1/members/d4c74594d841139328695756648b6bd6/notes");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "list_id": "l1",
                "notes": [{"id": 1, "note": "called them"}],
                "total_items": 1
            }));
    });

    let client = test_client(&server);
    let notes = client
        .member_for_api_calls("l1", "John@Example.com")
        .get_notes(None)
        .await
        .unwrap();

    assert_eq!(notes.meta.total_items, 1);
    assert_eq!(notes.notes[0].note, "called them");
    mock.assert();
}

#[tokio::test]
async fn missing_list_id_fails_locally_without_network() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path_includes("/members");
        then.status(200).json_body(json!({"members": []}));
    });

    let client = test_client(&server);
    let err = client.list("").get_members(None).await.unwrap_err();

    assert!(matches!(err, ClientError::MissingId("list id")));
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn empty_success_body_with_typed_target_yields_default() {
    let server = MockServer::start();

    server.mock(|when, then| {
        when.method(GET).path("/lists/l1");
        then.status(200);
    });

    let client = test_client(&server);
    let list = client.get_list("l1", None).await.unwrap();

    assert!(list.id.is_empty());
    assert_eq!(list.stats.member_count, 0);
}

#[tokio::test]
async fn schedule_campaign_sends_rfc3339_time() {
    use chrono::TimeZone;

    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/campaigns/c1/actions/schedule")
            .json_body(json!({"schedule_time": "2024-03-01T10:15:00Z"}));
        then.status(204);
    });

    let client = test_client(&server);
    let when = chrono::Utc.with_ymd_and_hms(2024, 3, 1, 10, 15, 0).unwrap();
    client.schedule_campaign("c1", when).await.unwrap();
    mock.assert();
}

#[tokio::test]
async fn debug_mode_does_not_change_results() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(GET).path("/lists/l1");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"id": "l1", "name": "Newsletter"}));
    });

    let quiet = test_client(&server);
    let verbose = test_client(&server).debug(true);

    let a = quiet.get_list("l1", None).await.unwrap();
    let b = verbose.get_list("l1", None).await.unwrap();

    assert_eq!(a.id, b.id);
    assert_eq!(a.name, b.name);
    assert_eq!(mock.hits(), 2);
}

#[tokio::test]
async fn envelope_types_are_usable_from_the_crate_root() {
    let server = MockServer::start();

    let folders_mock = server.mock(|when, then| {
        when.method(GET)
            .path("/template-folders")
            .query_param("count", "5")
            .query_param("offset", "0");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "folders": [{"id": "f1", "name": "Seasonal", "count": 2}],
                "total_items": 1
            }));
    });

    let hooks_mock = server.mock(|when, then| {
        when.method(GET).path("/lists/l1/webhooks");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({"list_id": "l1", "webhooks": [], "total_items": 0}));
    });

    let client = test_client(&server);
    let params = TemplateFolderQueryParams {
        extended: ExtendedQueryParams {
            count: 5,
            ..Default::default()
        },
    };
    let folders: ListOfTemplateFolders =
        client.get_template_folders(Some(&params)).await.unwrap();
    let hooks: ListOfWebhooks = client.list("l1").get_webhooks().await.unwrap();

    assert_eq!(folders.folders[0].name, "Seasonal");
    assert_eq!(hooks.meta.total_items, 0);
    folders_mock.assert();
    hooks_mock.assert();
}

#[tokio::test]
async fn upsert_derives_subscriber_hash_from_email() {
    let server = MockServer::start();

    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/lists/l1/members/d4c74594d841139328695756648b6bd6");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(json!({
                "id": "d4c74594d841139328695756648b6bd6",
                "list_id": "l1",
                "email_address": "john@example.com",
                "status": "subscribed"
            }));
    });

    let client = test_client(&server);
    let body = MemberRequest {
        email_address: "John@Example.com".to_string(),
        status: "subscribed".to_string(),
        ..Default::default()
    };
    let member = client
        .list_add_or_update_member("l1", "", &body)
        .await
        .unwrap();

    assert_eq!(member.email_address, "john@example.com");
    mock.assert();

    // Neither id nor email is a local error, no call made.
    let err = client
        .list_add_or_update_member("l1", "", &MemberRequest::default())
        .await
        .unwrap_err();
    assert!(matches!(err, ClientError::MissingId(_)));
}
