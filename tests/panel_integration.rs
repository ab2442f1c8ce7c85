mod common;

use common::{MockBackend, spawn};
use retail_chatbot::chat::{ChatPanel, PLACEHOLDER, PanelMessage};
use retail_chatbot::{ChatRequest, Client, Error};

#[tokio::test]
async fn test_hi_scenario() {
    let backend = MockBackend::new();
    let addr = spawn(backend.clone()).await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let mut panel = ChatPanel::new(client, "session-001");
    panel.set_input("hi");
    panel.submit().await;

    assert_eq!(
        backend.http_bodies(),
        vec![r#"{"session_id":"session-001","message":"hi"}"#.to_string()]
    );
    assert_eq!(
        panel.state().messages(),
        &[PanelMessage {
            user: "hi".to_string(),
            bot: "Hello!".to_string(),
            product: None,
        }]
    );
    assert_eq!(panel.state().input(), "");
}

#[tokio::test]
async fn test_blank_input_sends_nothing() {
    let backend = MockBackend::new();
    let addr = spawn(backend.clone()).await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let mut panel = ChatPanel::new(client, "session-001");
    panel.set_input("   ");
    panel.submit().await;

    assert!(backend.http_bodies().is_empty());
    assert!(panel.state().messages().is_empty());
}

#[tokio::test]
async fn test_placeholder_visible_between_halves() {
    let backend = MockBackend::new();
    let addr = spawn(backend.clone()).await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let mut panel = ChatPanel::new(client, "session-001");
    panel.set_input("hi");

    let request = panel.begin_submit().unwrap();
    assert_eq!(panel.state().input(), "");
    assert_eq!(panel.state().messages()[0].bot, PLACEHOLDER);
    assert!(backend.http_bodies().is_empty());

    panel.deliver(request).await;
    assert_eq!(panel.state().messages()[0].bot, "Hello!");
}

#[tokio::test]
async fn test_server_error_leaves_placeholder() {
    let backend = MockBackend::new();
    backend.reply_http(500, "backend down");
    let addr = spawn(backend.clone()).await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let mut panel = ChatPanel::new(client, "session-001");
    panel.set_input("hi");
    panel.submit().await;

    assert_eq!(backend.http_bodies().len(), 1);
    assert_eq!(panel.state().messages()[0].bot, PLACEHOLDER);
}

#[tokio::test]
async fn test_malformed_body_leaves_placeholder() {
    let backend = MockBackend::new();
    backend.reply_http(200, "<html>oops</html>");
    let addr = spawn(backend.clone()).await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let mut panel = ChatPanel::new(client, "session-001");
    panel.set_input("hi");
    panel.submit().await;

    assert_eq!(panel.state().messages()[0].bot, PLACEHOLDER);
}

#[tokio::test]
async fn test_unreachable_backend_leaves_placeholder() {
    let addr = common::dead_addr().await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let mut panel = ChatPanel::new(client, "session-001");
    panel.set_input("hi");
    panel.submit().await;

    assert_eq!(panel.state().messages().len(), 1);
    assert_eq!(panel.state().messages()[0].bot, PLACEHOLDER);
}

#[tokio::test]
async fn test_related_product_recorded() {
    let backend = MockBackend::new();
    backend.reply_http(
        200,
        r#"{
            "session_id": "session-001",
            "answer": "This drill should do.",
            "product_title": "Cordless Drill",
            "product_description": "18V with two batteries"
        }"#,
    );
    let addr = spawn(backend.clone()).await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let mut panel = ChatPanel::new(client, "session-001");
    panel.set_input("I need a drill");
    panel.submit().await;

    let message = &panel.state().messages()[0];
    assert_eq!(message.bot, "This drill should do.");
    assert_eq!(
        message.product.as_ref().map(|p| p.title.as_str()),
        Some("Cordless Drill")
    );
}

#[tokio::test]
async fn test_client_reports_api_error() {
    let backend = MockBackend::new();
    backend.reply_http(503, "try later");
    let addr = spawn(backend).await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let err = client
        .chat()
        .send(&ChatRequest::new("session-001", "hi"))
        .await
        .unwrap_err();

    match err {
        Error::Api { status, message } => {
            assert_eq!(status, 503);
            assert_eq!(message, "try later");
        }
        other => panic!("expected API error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_client_reports_json_error() {
    let backend = MockBackend::new();
    backend.reply_http(200, r#"{"no_answer":true}"#);
    let addr = spawn(backend).await;

    let client = Client::new(format!("http://{addr}")).unwrap();
    let err = client
        .chat()
        .send(&ChatRequest::new("session-001", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Json(_)));
}

#[tokio::test]
async fn test_custom_chat_path() {
    let backend = MockBackend::new();
    let addr = spawn(backend.clone()).await;

    // The mock only serves /chat, so a different path must fail.
    let client = Client::new(format!("http://{addr}"))
        .unwrap()
        .with_chat_path("/api/chat");
    let err = client
        .chat()
        .send(&ChatRequest::new("session-001", "hi"))
        .await
        .unwrap_err();

    assert!(matches!(err, Error::Api { status: 404, .. }));
    assert!(backend.http_bodies().is_empty());
}
