//! Optimistic comment posting and newsletter subscription

use application::adapters::RecordingNotifier;
use application::ports::{CommentGateway, GatewayError, GatewayResult, NewsletterGateway};
use application::services::{CommentThread, NewsletterService, PostOutcome, SubscribeOutcome};
use application::ApplicationError;
use async_trait::async_trait;
use domain::{ClientIdentity, Comment, CommentId, SubjectId};
use mockall::mock;
use parking_lot::Mutex;
use std::sync::Arc;

mock! {
    pub Comments {}

    #[async_trait]
    impl CommentGateway for Comments {
        async fn list_comments(&self, subject: &SubjectId) -> GatewayResult<Vec<Comment>>;
        async fn insert_comment(&self, comment: &Comment) -> GatewayResult<Comment>;
    }
}

/// Newsletter list that records requests and answers with a fixed result
struct FakeNewsletter {
    requests: Mutex<Vec<(String, Option<String>)>>,
    response: GatewayResult<()>,
}

impl FakeNewsletter {
    fn answering(response: GatewayResult<()>) -> Arc<Self> {
        Arc::new(Self {
            requests: Mutex::new(Vec::new()),
            response,
        })
    }

    fn requests(&self) -> Vec<(String, Option<String>)> {
        self.requests.lock().clone()
    }
}

#[async_trait]
impl NewsletterGateway for FakeNewsletter {
    async fn subscribe(&self, email: &str, source: Option<&str>) -> GatewayResult<()> {
        self.requests
            .lock()
            .push((email.to_string(), source.map(str::to_string)));
        self.response.clone()
    }
}

fn subject() -> SubjectId {
    SubjectId::new("notion-ai").unwrap()
}

fn build_thread(gateway: MockComments) -> (CommentThread, Arc<RecordingNotifier>) {
    let notifier = Arc::new(RecordingNotifier::new());
    let thread = CommentThread::new(
        subject(),
        ClientIdentity::from_stored("client-1").unwrap(),
        Arc::new(gateway),
        notifier.clone(),
    );
    (thread, notifier)
}

fn existing_comment() -> Comment {
    let mut comment = Comment::pending(
        subject(),
        ClientIdentity::from_stored("someone-else").unwrap(),
        Some("Ada".to_string()),
        domain::CommentContent::new("Great tool").unwrap(),
    );
    comment.id = CommentId::new("srv-0");
    comment.pending = false;
    comment
}

#[tokio::test]
async fn test_post_replaces_pending_with_saved_row() {
    let mut gateway = MockComments::new();
    gateway
        .expect_list_comments()
        .returning(|_| Ok(vec![existing_comment()]));
    gateway
        .expect_insert_comment()
        .withf(|c| c.pending && c.id.is_local() && c.content == "Works offline too")
        .times(1)
        .returning(|c| {
            Ok(Comment {
                id: CommentId::new("srv-1"),
                ..c.clone()
            })
        });

    let (thread, notifier) = build_thread(gateway);
    thread.load().await.unwrap();

    let outcome = thread
        .post("  Works offline too  ", Some("  ".to_string()))
        .await
        .unwrap();

    let saved = match outcome {
        PostOutcome::Posted(saved) => saved,
        other => panic!("expected posted comment, got {other:?}"),
    };
    assert_eq!(saved.id.as_str(), "srv-1");
    assert!(!saved.pending);
    assert_eq!(saved.display_author(), "Anonymous");

    let comments = thread.comments();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0], saved);
    assert_eq!(comments[1].id.as_str(), "srv-0");
    assert!(notifier.notices().is_empty());
}

#[tokio::test]
async fn test_failed_post_removes_predicted_comment() {
    let mut gateway = MockComments::new();
    gateway
        .expect_list_comments()
        .returning(|_| Ok(vec![existing_comment()]));
    gateway
        .expect_insert_comment()
        .returning(|_| Err(GatewayError::Transport("offline".to_string())));

    let (thread, notifier) = build_thread(gateway);
    let before = thread.load().await.unwrap();

    let outcome = thread.post("Hello", None).await.unwrap();
    assert!(matches!(outcome, PostOutcome::RolledBack { .. }));
    assert_eq!(thread.comments(), before);
    assert!(!thread.is_pending());
    assert_eq!(notifier.errors()[0].title, "Comment failed");
}

#[tokio::test]
async fn test_invalid_comment_never_displayed() {
    let mut gateway = MockComments::new();
    gateway.expect_insert_comment().never();

    let (thread, _) = build_thread(gateway);

    let empty = thread.post("   ", None).await;
    assert!(matches!(empty, Err(ApplicationError::Domain(_))));

    let long = "x".repeat(2001);
    assert!(thread.post(&long, None).await.is_err());
    assert!(thread.comments().is_empty());
}

#[tokio::test]
async fn test_subscribe_normalizes_address() {
    let gateway = FakeNewsletter::answering(Ok(()));
    let service = NewsletterService::new(gateway.clone());

    let outcome = service.subscribe(" Dev@Example.com ", Some("footer")).await.unwrap();

    assert_eq!(
        outcome,
        SubscribeOutcome::Subscribed {
            email: "dev@example.com".to_string()
        }
    );
    assert_eq!(
        gateway.requests(),
        vec![("dev@example.com".to_string(), Some("footer".to_string()))]
    );
}

#[tokio::test]
async fn test_conflict_means_already_subscribed() {
    let gateway = FakeNewsletter::answering(Err(GatewayError::Status {
        status: 409,
        body: "duplicate key value violates unique constraint".to_string(),
    }));
    let service = NewsletterService::new(gateway);

    let outcome = service.subscribe("dev@example.com", None).await.unwrap();
    assert!(matches!(outcome, SubscribeOutcome::AlreadySubscribed { .. }));
}

#[tokio::test]
async fn test_server_error_is_reported() {
    let gateway = FakeNewsletter::answering(Err(GatewayError::Status {
        status: 502,
        body: "bad gateway".to_string(),
    }));
    let service = NewsletterService::new(gateway);

    let err = service.subscribe("dev@example.com", None).await.unwrap_err();
    assert_eq!(err.category(), "gateway");
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_invalid_email_rejected_before_request() {
    let gateway = FakeNewsletter::answering(Ok(()));
    let service = NewsletterService::new(gateway.clone());

    let err = service.subscribe("nobody", None).await.unwrap_err();
    assert_eq!(err.category(), "validation");
    assert!(gateway.requests().is_empty());
}
