//! Contact form flow from submission to delivery.
//!
//! The bot API is played by wiremock; the browser is a recording opener.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use folio_core::delivery::{LinkOpener, OpenError};
use folio_core::notify::LogPresenter;
use folio_core::{
    ContactForm, DeliveryStatus, DispatchError, DispatcherConfig, NotificationCenter,
    NotificationKind, Strategy, SubmissionDispatcher, SubmissionLog,
};
use serde_json::json;
use url::Url;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN: &str = "123456:test-token";

#[derive(Default)]
struct RecordingOpener {
    opened: Mutex<Vec<Url>>,
}

impl RecordingOpener {
    fn opened(&self) -> Vec<Url> {
        self.opened.lock().expect("lock").clone()
    }
}

impl LinkOpener for RecordingOpener {
    fn open(&self, url: &Url) -> Result<(), OpenError> {
        self.opened.lock().expect("lock").push(url.clone());
        Ok(())
    }
}

fn bot_config(server: &MockServer) -> DispatcherConfig {
    let mut config = DispatcherConfig::default();
    config.bot.token = TOKEN.to_string();
    config.bot.chat_id = "4242".to_string();
    config.bot.api_base = server.uri();
    config.bot.timeout_secs = 2;
    config
}

async fn dispatcher(
    config: DispatcherConfig,
    opener: Arc<RecordingOpener>,
) -> (SubmissionDispatcher, NotificationCenter) {
    let log = SubmissionLog::in_memory().await.expect("log");
    let notifications = NotificationCenter::new(Arc::new(LogPresenter), Duration::from_millis(3500));
    let dispatcher = SubmissionDispatcher::new(config, log, notifications.clone())
        .expect("dispatcher")
        .with_opener(opener);
    (dispatcher, notifications)
}

fn filled_form() -> ContactForm {
    ContactForm::new("Ann Lee", "ann@example.com", "Hiring & more", "Hello there!")
}

#[tokio::test]
async fn test_bot_accepts_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .and(body_partial_json(json!({
            "chat_id": "4242",
            "parse_mode": "Markdown"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": true,
            "result": { "message_id": 7, "date": 1_760_000_000 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opener = Arc::new(RecordingOpener::default());
    let (dispatcher, notifications) = dispatcher(bot_config(&server), opener.clone()).await;

    let mut form = filled_form();
    let outcome = dispatcher.submit(&mut form).await.expect("submit");

    assert_eq!(outcome.delivery.status, DeliveryStatus::Delivered);
    assert!(opener.opened().is_empty());
    assert!(form.is_empty());
    assert_eq!(
        notifications.current().map(|n| n.kind),
        Some(NotificationKind::Success)
    );

    let requests = server.received_requests().await.expect("recording");
    let sent: serde_json::Value = requests[0].body_json().expect("json body");
    let text = sent["text"].as_str().expect("text");
    assert!(text.contains("👤 *Name:* Ann Lee"));
    assert!(text.contains("📧 *Email:* ann@example.com"));
    assert!(text.contains("💬 *Message:*\nHello there!"));
}

#[tokio::test]
async fn test_bare_ok_reply_counts_as_delivered() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "ok": true })))
        .expect(1)
        .mount(&server)
        .await;

    let opener = Arc::new(RecordingOpener::default());
    let (dispatcher, notifications) = dispatcher(bot_config(&server), opener.clone()).await;

    let outcome = dispatcher.submit(&mut filled_form()).await.expect("submit");

    assert_eq!(outcome.delivery.status, DeliveryStatus::Delivered);
    assert!(!outcome.delivery.tried(Strategy::DeepLink));
    assert!(opener.opened().is_empty());
    assert_eq!(
        notifications.current().map(|n| n.kind),
        Some(NotificationKind::Success)
    );
}

#[tokio::test]
async fn test_bot_rejection_opens_deep_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/bot{TOKEN}/sendMessage")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "ok": false,
            "error_code": 403,
            "description": "Forbidden: bot was blocked by the user"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let opener = Arc::new(RecordingOpener::default());
    let (dispatcher, _) = dispatcher(bot_config(&server), opener.clone()).await;

    let outcome = dispatcher.submit(&mut filled_form()).await.expect("submit");

    assert_eq!(outcome.delivery.status, DeliveryStatus::FallbackOpened);
    assert!(outcome.delivery.tried(Strategy::DirectApi));

    let opened = opener.opened();
    assert_eq!(opened.len(), 1);
    let link = opened[0].as_str();
    assert!(link.starts_with("https://t.me/cykablyat572?text="));
    assert!(link.contains("Ann%20Lee"));
    assert!(link.contains("ann%40example.com"));
    assert!(link.contains("Hiring%20%26%20more"));
    assert!(link.contains("Hello%20there%21"));
}

#[tokio::test]
async fn test_unconfigured_bot_never_calls_api() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let mut config = bot_config(&server);
    config.bot.token.clear();

    let opener = Arc::new(RecordingOpener::default());
    let (dispatcher, _) = dispatcher(config, opener.clone()).await;

    let outcome = dispatcher.submit(&mut filled_form()).await.expect("submit");

    assert_eq!(outcome.delivery.status, DeliveryStatus::FallbackOpened);
    assert!(!outcome.delivery.tried(Strategy::DirectApi));
    assert_eq!(opener.opened().len(), 1);
}

#[tokio::test]
async fn test_invalid_form_is_rejected_before_logging() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let opener = Arc::new(RecordingOpener::default());
    let (dispatcher, notifications) = dispatcher(bot_config(&server), opener.clone()).await;

    let mut form = ContactForm::new("", "ann@example.com", "", "");
    let err = dispatcher.submit(&mut form).await.expect_err("should reject");

    assert!(matches!(err, DispatchError::Validation(ref errors) if errors.len() == 2));
    assert_eq!(form.email, "ann@example.com");
    assert!(dispatcher.log().is_empty().await.expect("log"));
    assert!(opener.opened().is_empty());
    assert_eq!(
        notifications.current().map(|n| n.message),
        Some("Please fill in all required fields.".to_string())
    );
}

#[tokio::test]
async fn test_every_submission_is_logged_in_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("oops"))
        .mount(&server)
        .await;

    let opener = Arc::new(RecordingOpener::default());
    let (dispatcher, _) = dispatcher(bot_config(&server), opener).await;

    for name in ["first", "second", "third"] {
        let mut form = ContactForm::new(name, "x@example.com", "", "hi");
        dispatcher.submit(&mut form).await.expect("submit");
    }

    let log = dispatcher.log().list().await.expect("list");
    let names: Vec<_> = log.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["first", "second", "third"]);
    assert!(log.windows(2).all(|w| w[0].id < w[1].id));
}
