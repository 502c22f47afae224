use application::ports::{
    AnalyticsSink, CommentGateway, GatewayError, ManifestSource, NewsletterGateway, VoteGateway,
};
use domain::config::BackendConfig;
use domain::{
    AnalyticsAction, AnalyticsEvent, ClientIdentity, Comment, CommentContent, SubjectId,
    VoteCounts, VoteType,
};
use infrastructure::{HttpManifestSource, RestGateway};
use mockito::{Matcher, Server};
use serde_json::json;

const ANON_KEY: &str = "anon-test-key";

fn backend(url: &str) -> BackendConfig {
    BackendConfig {
        rest_url: url.to_string(),
        functions_url: url.to_string(),
        anon_key: ANON_KEY.to_string(),
        timeout_ms: 2_000,
    }
}

fn subject() -> SubjectId {
    SubjectId::new("midjourney").unwrap()
}

fn client() -> ClientIdentity {
    ClientIdentity::from_stored("client-123").unwrap()
}

#[tokio::test]
async fn test_fetch_counts_sends_auth_headers() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("GET", "/tool_vote_counts")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("tool_id".into(), "eq.midjourney".into()),
            Matcher::UrlEncoded("select".into(), "upvotes,downvotes,score".into()),
        ]))
        .match_header("apikey", ANON_KEY)
        .match_header("authorization", format!("Bearer {ANON_KEY}").as_str())
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"[{"upvotes":12,"downvotes":3,"score":9}]"#)
        .create_async()
        .await;

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();
    let counts = gateway.fetch_counts(&subject()).await.unwrap();

    assert_eq!(
        counts,
        Some(VoteCounts {
            upvotes: 12,
            downvotes: 3,
            score: 9
        })
    );
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_counts_empty_means_no_votes() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/tool_vote_counts")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("[]")
        .create_async()
        .await;

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();
    assert_eq!(gateway.fetch_counts(&subject()).await.unwrap(), None);
}

#[tokio::test]
async fn test_fetch_user_vote() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/tool_votes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("tool_id".into(), "eq.midjourney".into()),
            Matcher::UrlEncoded("client_id".into(), "eq.client-123".into()),
            Matcher::UrlEncoded("select".into(), "vote_type".into()),
        ]))
        .with_status(200)
        .with_body(r#"[{"vote_type":"downvote"}]"#)
        .create_async()
        .await;

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();
    let vote = gateway.fetch_user_vote(&subject(), &client()).await.unwrap();
    assert_eq!(vote, Some(VoteType::Downvote));
}

#[tokio::test]
async fn test_unknown_vote_type_is_decode_error() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/tool_votes")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"[{"vote_type":"meh"}]"#)
        .create_async()
        .await;

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();
    let err = gateway
        .fetch_user_vote(&subject(), &client())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Decode(_)));
}

#[tokio::test]
async fn test_upsert_vote_merges_duplicates() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/tool_votes")
        .match_query(Matcher::UrlEncoded(
            "on_conflict".into(),
            "tool_id,client_id".into(),
        ))
        .match_header("prefer", "resolution=merge-duplicates")
        .match_body(Matcher::Json(json!({
            "tool_id": "midjourney",
            "client_id": "client-123",
            "vote_type": "upvote"
        })))
        .with_status(201)
        .create_async()
        .await;

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();
    gateway
        .upsert_vote(&subject(), &client(), VoteType::Upvote)
        .await
        .unwrap();

    mock.assert_async().await;
}

#[tokio::test]
async fn test_delete_vote_failure_maps_status() {
    let mut server = Server::new_async().await;

    server
        .mock("DELETE", "/tool_votes")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("tool_id".into(), "eq.midjourney".into()),
            Matcher::UrlEncoded("client_id".into(), "eq.client-123".into()),
        ]))
        .with_status(503)
        .with_body("upstream unavailable")
        .create_async()
        .await;

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();
    let err = gateway.delete_vote(&subject(), &client()).await.unwrap_err();

    assert_eq!(
        err,
        GatewayError::Status {
            status: 503,
            body: "upstream unavailable".to_string()
        }
    );
    assert!(err.is_transient());
}

#[tokio::test]
async fn test_unreachable_backend_is_transport_error() {
    // Port 9 (discard) is closed on test machines
    let gateway = RestGateway::new(&backend("http://127.0.0.1:9")).unwrap();
    let err = gateway.fetch_counts(&subject()).await.unwrap_err();
    assert!(matches!(err, GatewayError::Transport(_)));
}

#[tokio::test]
async fn test_record_analytics_event() {
    let mut server = Server::new_async().await;

    let mock = server
        .mock("POST", "/tool_analytics")
        .match_body(Matcher::PartialJson(json!({
            "tool_id": "midjourney",
            "action": "visit_website",
            "client_id": "client-123",
            "metadata": { "utm_source": "newsletter" }
        })))
        .with_status(201)
        .create_async()
        .await;

    let mut metadata = std::collections::BTreeMap::new();
    metadata.insert("utm_source".to_string(), "newsletter".to_string());
    let event = AnalyticsEvent::new(subject(), AnalyticsAction::VisitWebsite)
        .with_metadata(metadata)
        .with_client(client());

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();
    gateway.record(&event).await.unwrap();
    mock.assert_async().await;
}

#[tokio::test]
async fn test_comments_listed_newest_first_and_inserted() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/tool_comments")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("tool_id".into(), "eq.midjourney".into()),
            Matcher::UrlEncoded("order".into(), "created_at.desc".into()),
        ]))
        .with_status(200)
        .with_body(
            r#"[
                {"id":"b","tool_id":"midjourney","client_id":"x","author_name":"Lin","content":"newer","created_at":"2024-06-02T00:00:00Z"},
                {"id":"a","tool_id":"midjourney","client_id":"y","author_name":null,"content":"older","created_at":"2024-06-01T00:00:00Z"}
            ]"#,
        )
        .create_async()
        .await;

    let insert = server
        .mock("POST", "/tool_comments")
        .match_header("prefer", "return=representation")
        .match_body(Matcher::PartialJson(json!({
            "tool_id": "midjourney",
            "client_id": "client-123",
            "content": "Nice"
        })))
        .with_status(201)
        .with_body(
            r#"[{"id":"c","tool_id":"midjourney","client_id":"client-123","content":"Nice","created_at":"2024-06-03T00:00:00Z"}]"#,
        )
        .create_async()
        .await;

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();

    let comments = gateway.list_comments(&subject()).await.unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0].content, "newer");
    assert_eq!(comments[1].display_author(), "Anonymous");

    let pending = Comment::pending(
        subject(),
        client(),
        None,
        CommentContent::new("Nice").unwrap(),
    );
    let saved = gateway.insert_comment(&pending).await.unwrap();
    assert_eq!(saved.id.as_str(), "c");
    assert!(!saved.pending);
    insert.assert_async().await;
}

#[tokio::test]
async fn test_newsletter_conflict_surfaces_as_409() {
    let mut server = Server::new_async().await;

    server
        .mock("POST", "/newsletter_subscribers")
        .match_body(Matcher::Json(json!({ "email": "dev@example.com" })))
        .with_status(409)
        .with_body(r#"{"code":"23505"}"#)
        .create_async()
        .await;

    let gateway = RestGateway::new(&backend(&server.url())).unwrap();
    let err = gateway.subscribe("dev@example.com", None).await.unwrap_err();
    assert!(err.is_conflict());
}

#[tokio::test]
async fn test_manifest_fetch_and_failure() {
    let mut server = Server::new_async().await;

    server
        .mock("GET", "/manifest/midjourney")
        .match_header("apikey", ANON_KEY)
        .with_status(200)
        .with_body(
            json!({
                "name": "Midjourney",
                "short_name": "Midjourney",
                "description": "Image generation",
                "start_url": "/tools/midjourney?source=pwa",
                "scope": "/tools/midjourney",
                "display": "standalone",
                "background_color": "#0f172a",
                "theme_color": "#6366f1",
                "icons": []
            })
            .to_string(),
        )
        .create_async()
        .await;

    server
        .mock("GET", "/manifest/broken")
        .with_status(500)
        .create_async()
        .await;

    let source = HttpManifestSource::new(&backend(&server.url())).unwrap();

    let descriptor = source.fetch_manifest(&subject()).await.unwrap();
    assert_eq!(descriptor.start_url, "/tools/midjourney?source=pwa");

    let err = source
        .fetch_manifest(&SubjectId::new("broken").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, GatewayError::Status { status: 500, .. }));
}
