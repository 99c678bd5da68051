//! End-to-end widget behavior against a fake backend over real HTTP.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chat_widget::api::HttpBackend;
use chat_widget::config::{BackendConfig, WidgetSettings};
use chat_widget::widget::{
    ChatWidget, ConnectivityStatus, ContactForm, HtmlTranscript, SubmitOutcome,
};
use serde_json::{Value, json};

type Requests = Arc<Mutex<Vec<Value>>>;

/// Mimics the assistant backend: availability questions need contact details.
async fn chat(State(requests): State<Requests>, Json(body): Json<Value>) -> impl IntoResponse {
    requests.lock().unwrap().push(body.clone());

    let question = body["question"].as_str().unwrap_or_default().trim().to_string();
    if question.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "Question is required"})),
        );
    }
    if question.contains("crash") {
        return (StatusCode::INTERNAL_SERVER_ERROR, Json(json!({})));
    }

    let has_contact = body["user_info"]["name"].as_str().is_some_and(|s| !s.is_empty())
        && body["user_info"]["email"].as_str().is_some_and(|s| !s.is_empty());
    if question.to_lowercase().contains("available") && !has_contact {
        return (
            StatusCode::OK,
            Json(json!({
                "question": question,
                "answer": "Could you please provide your name and email so I can notify Benitha about your availability request?",
                "status": "user_info_required"
            })),
        );
    }

    (
        StatusCode::OK,
        Json(json!({
            "question": question,
            "answer": "Benitha knows **React** and <script>alert(1)</script>\n\nThanks!",
            "status": "success"
        })),
    )
}

async fn health() -> Json<Value> {
    Json(json!({"status": "healthy", "ai_components": true, "openai_configured": false}))
}

async fn spawn(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

async fn spawn_backend() -> (String, Requests) {
    let requests = Requests::default();
    let router = Router::new()
        .route("/chat", post(chat))
        .route("/health", get(health))
        .with_state(Arc::clone(&requests));
    (spawn(router).await, requests)
}

fn widget_for(base_url: &str) -> (ChatWidget<HttpBackend, HtmlTranscript>, Arc<HtmlTranscript>) {
    let backend = Arc::new(HttpBackend::new(base_url).unwrap());
    let view = Arc::new(HtmlTranscript::new());
    let widget = ChatWidget::new(backend, Arc::clone(&view), WidgetSettings::default());
    (widget, view)
}

#[tokio::test]
async fn test_start_reports_limited_backend() {
    let (url, _) = spawn_backend().await;
    let (widget, view) = widget_for(&url);

    widget.start().await;

    let status = view.status().unwrap();
    assert_eq!(status.status, ConnectivityStatus::Limited);
    assert_eq!(status.label, "Limited functionality");
    assert_eq!(view.messages().len(), 1);
}

#[tokio::test]
async fn test_answer_is_rendered_safely() {
    let (url, _) = spawn_backend().await;
    let (widget, view) = widget_for(&url);

    assert_eq!(widget.submit("What are her skills?").await, SubmitOutcome::Answered);

    let html = view.to_html();
    assert!(html.contains("<strong>React</strong>"));
    assert!(!html.contains("**React**"));
    assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    assert!(!html.contains("<script>"));
    assert!(html.contains("<br><br>Thanks!"));
}

#[tokio::test]
async fn test_availability_escalation_round_trip() {
    let (url, requests) = spawn_backend().await;
    let (widget, view) = widget_for(&url);

    let outcome = widget.submit("Is she available for an interview?").await;
    assert_eq!(outcome, SubmitOutcome::ContactRequested);
    assert!(view.contact_form_visible());

    let outcome = widget
        .submit_contact(
            &ContactForm::new(" Ann ", "ann@example.com")
                .with_company("Acme")
                .with_role("Recruiter"),
        )
        .await
        .unwrap();
    assert_eq!(outcome, SubmitOutcome::Answered);
    assert!(!view.contact_form_visible());
    assert!(widget.pending_contact().is_none());

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 2);
    assert!(requests[0].get("user_info").is_none());
    assert_eq!(
        requests[1],
        json!({
            "question": "Is she available for an interview?",
            "user_info": {"name": "Ann", "email": "ann@example.com", "company": "Acme", "role": "Recruiter"}
        })
    );

    // The question shows twice: once asked, once resent with contact details.
    let asked: Vec<_> = view
        .messages()
        .into_iter()
        .filter(|m| m.text == "Is she available for an interview?")
        .collect();
    assert_eq!(asked.len(), 2);
}

#[tokio::test]
async fn test_server_error_without_message() {
    let (url, _) = spawn_backend().await;
    let (widget, view) = widget_for(&url);

    assert_eq!(widget.submit("please crash").await, SubmitOutcome::Failed);

    let last = view.messages().pop().unwrap();
    assert!(last.is_error);
    assert_eq!(last.text, "Error 500: Internal Server Error");
    assert!(!view.is_busy());
}

#[tokio::test]
async fn test_non_json_reply_is_a_connection_failure() {
    let router = Router::new().route("/chat", post(|| async { "<html>oops</html>" }));
    let url = spawn(router).await;
    let (widget, view) = widget_for(&url);

    assert_eq!(widget.submit("hello").await, SubmitOutcome::Failed);

    let last = view.messages().pop().unwrap();
    assert!(last.is_error);
    assert!(last.text.starts_with("Connection error."));
    assert_eq!(view.status().unwrap().status, ConnectivityStatus::Error);
    assert_eq!(view.typing_count(), 0);
}

#[tokio::test]
async fn test_unreachable_backend() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let (widget, view) = widget_for(&url);

    widget.start().await;
    assert_eq!(view.status().unwrap().label, "Connection error");

    assert_eq!(widget.submit("anyone there?").await, SubmitOutcome::Failed);
    assert!(!widget.is_busy());
    assert!(!view.is_busy());
}

#[tokio::test]
async fn test_request_timeout_is_a_connection_failure() {
    let router = Router::new().route(
        "/chat",
        post(|| async {
            tokio::time::sleep(Duration::from_secs(10)).await;
            Json(json!({"status": "success", "answer": "too late"}))
        }),
    );
    let url = spawn(router).await;
    let backend = HttpBackend::from_config(&BackendConfig {
        base_url: url,
        health_path: "/health".to_string(),
        chat_path: "/chat".to_string(),
        request_timeout_secs: Some(1),
    })
    .unwrap();
    let view = Arc::new(HtmlTranscript::new());
    let widget = ChatWidget::new(Arc::new(backend), Arc::clone(&view), WidgetSettings::default());

    assert_eq!(widget.submit("hello?").await, SubmitOutcome::Failed);

    let last = view.messages().pop().unwrap();
    assert!(last.is_error);
    assert!(last.text.starts_with("Connection error."));
    assert_eq!(view.status().unwrap().label, "Connection error");
    assert!(!view.is_busy());
}
