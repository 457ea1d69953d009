use std::time::Duration;

use pretty_assertions::assert_eq;
use timeline_engine::{
    ClientSettings, FailureKind, RefreshOutcome, ReqwestTimelineClient, TimelineApi,
};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TWO_TWEETS: &str = r#"[
  {"favorited": false, "id": "1180000000000000002", "images": [{"id": 11, "image": "https://img.example/a.jpg"}],
   "posted": "2019-10-01T12:00:00Z", "user": {"id": 5, "screen_name": "alice", "image": "https://img.example/alice.jpg"},
   "text": "second"},
  {"favorited": true, "id": "1180000000000000001", "images": [], "posted": "2019-10-01T11:00:00Z",
   "user": {"id": 5, "screen_name": "alice", "image": ""}, "text": "first"}
]"#;

fn client_for(server: &MockServer) -> ReqwestTimelineClient {
    ReqwestTimelineClient::new(ClientSettings {
        base_url: server.uri(),
        ..ClientSettings::default()
    })
    .expect("client")
}

fn json(body: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(body.to_string(), "application/json")
}

#[tokio::test]
async fn fetch_page_decodes_tweets() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/page"))
        .respond_with(json(TWO_TWEETS))
        .mount(&server)
        .await;

    let tweets = client_for(&server).fetch_page(1).await.expect("page");

    assert_eq!(tweets.len(), 2);
    assert_eq!(tweets[0].id, "1180000000000000002");
    assert_eq!(tweets[0].user.screen_name, "alice");
    assert_eq!(tweets[0].images[0].image, "https://img.example/a.jpg");
    assert!(tweets[1].favorited);
    assert!(tweets[1].posted.is_some());
}

#[tokio::test]
async fn fetch_page_sends_page_number_beyond_first() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/page"))
        .and(query_param("n", "3"))
        .respond_with(json("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let tweets = client_for(&server).fetch_page(3).await.expect("page");
    assert!(tweets.is_empty());
}

#[tokio::test]
async fn fetch_since_passes_newest_id() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/since"))
        .and(query_param("id", "1180000000000000001"))
        .respond_with(json(TWO_TWEETS))
        .expect(1)
        .mount(&server)
        .await;

    let tweets = client_for(&server)
        .fetch_since("1180000000000000001")
        .await
        .expect("since");
    assert_eq!(tweets.len(), 2);
}

#[tokio::test]
async fn toggle_favorite_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/42/favorite"))
        .respond_with(json(r#"[{"id": "42", "favorited": true}]"#))
        .expect(1)
        .mount(&server)
        .await;

    let tweets = client_for(&server).toggle_favorite("42").await.expect("fav");
    assert_eq!(tweets.len(), 1);
    assert!(tweets[0].favorited);
}

#[tokio::test]
async fn refetch_reports_gone() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/42/refresh"))
        .respond_with(json(r#"{"gone": true}"#))
        .mount(&server)
        .await;

    let outcome = client_for(&server).refetch("42").await.expect("refetch");
    assert_eq!(outcome, RefreshOutcome::Gone);
}

#[tokio::test]
async fn refetch_returns_current_copy() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/42/refresh"))
        .respond_with(json(r#"[{"id": "42", "text": "current"}]"#))
        .mount(&server)
        .await;

    let outcome = client_for(&server).refetch("42").await.expect("refetch");
    match outcome {
        RefreshOutcome::Tweets(tweets) => assert_eq!(tweets[0].text, "current"),
        RefreshOutcome::Gone => panic!("unexpected tombstone"),
    }
}

#[tokio::test]
async fn delete_accepts_no_content() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/42"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server).delete("42").await.expect("delete");
}

#[tokio::test]
async fn delete_failure_carries_status() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/42"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = client_for(&server).delete("42").await.unwrap_err();
    assert_eq!(err.kind, FailureKind::HttpStatus(500));
}

#[tokio::test]
async fn force_reload_trigger_uses_put() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/api/force-reload"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;

    client_for(&server)
        .trigger_force_reload()
        .await
        .expect("force reload");
}

#[tokio::test]
async fn malformed_body_is_a_decode_failure() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/page"))
        .respond_with(json(r#"{"not": "a list"}"#))
        .mount(&server)
        .await;

    let err = client_for(&server).fetch_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Decode);
}

#[tokio::test]
async fn slow_response_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/page"))
        .respond_with(json("[]").set_delay(Duration::from_millis(250)))
        .mount(&server)
        .await;

    let client = ReqwestTimelineClient::new(ClientSettings {
        base_url: server.uri(),
        request_timeout: Duration::from_millis(50),
        ..ClientSettings::default()
    })
    .expect("client");

    let err = client.fetch_page(1).await.unwrap_err();
    assert_eq!(err.kind, FailureKind::Timeout);
}

#[tokio::test]
async fn oversized_response_is_rejected() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/page"))
        .respond_with(json("[                    ]"))
        .mount(&server)
        .await;

    let client = ReqwestTimelineClient::new(ClientSettings {
        base_url: server.uri(),
        max_bytes: 10,
        ..ClientSettings::default()
    })
    .expect("client");

    let err = client.fetch_page(1).await.unwrap_err();
    assert_eq!(
        err.kind,
        FailureKind::TooLarge {
            max_bytes: 10,
            actual: Some(22)
        }
    );
}

#[tokio::test]
async fn base_url_with_path_prefix_is_extended() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/timeline/api/page"))
        .respond_with(json("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let client = ReqwestTimelineClient::new(ClientSettings {
        base_url: format!("{}/timeline", server.uri()),
        ..ClientSettings::default()
    })
    .expect("client");

    client.fetch_page(1).await.expect("page");
}

#[test]
fn invalid_base_url_is_rejected() {
    let err = ReqwestTimelineClient::new(ClientSettings {
        base_url: "not a url".to_string(),
        ..ClientSettings::default()
    })
    .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}

#[tokio::test]
async fn non_numeric_id_never_reaches_the_network() {
    let server = MockServer::start().await;
    let err = client_for(&server)
        .refetch("../force-reload")
        .await
        .unwrap_err();
    assert_eq!(err.kind, FailureKind::InvalidUrl);
}
