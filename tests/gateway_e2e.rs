use async_trait::async_trait;
use chatgpt_gateway::answering::{AnsweringCapability, EchoAnswerer, SerializedAnswerer};
use chatgpt_gateway::app::{AppState, create_app};
use chatgpt_gateway::models::GatewayOptions;
use reqwest::{Client, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

/// Logs when each call starts and ends so overlaps can be detected.
#[derive(Default)]
struct RecordingAnswerer {
    spans: Mutex<Vec<(String, Instant, Instant)>>,
}

#[async_trait]
impl AnsweringCapability for RecordingAnswerer {
    async fn ask(&self, text: &str) -> anyhow::Result<String> {
        let started = Instant::now();
        tokio::time::sleep(Duration::from_millis(100)).await;
        self.spans
            .lock()
            .unwrap()
            .push((text.to_string(), started, Instant::now()));
        Ok(format!("answered: {text}"))
    }
}

/// Counts calls that started and calls that ran to the end.
#[derive(Default)]
struct SlowAnswerer {
    started: AtomicUsize,
    finished: AtomicUsize,
}

#[async_trait]
impl AnsweringCapability for SlowAnswerer {
    async fn ask(&self, text: &str) -> anyhow::Result<String> {
        self.started.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(Duration::from_millis(300)).await;
        self.finished.fetch_add(1, Ordering::SeqCst);
        Ok(text.to_string())
    }
}

async fn spawn_gateway(capability: Arc<dyn AnsweringCapability>, append_suffix: bool) -> String {
    let state = AppState::new(
        SerializedAnswerer::new(capability, None),
        GatewayOptions { append_suffix },
    );
    let app = create_app(state);

    let listener = tokio::net::TcpListener::bind(("127.0.0.1", 0)).await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn e2e_status_returns_ok() {
    let base = spawn_gateway(Arc::new(EchoAnswerer), true).await;

    let response = Client::new()
        .get(format!("{base}/chatgpt/status"))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.text().await.unwrap(), r#"{"status":"ok"}"#);
}

#[tokio::test]
async fn e2e_question_round_trip_with_suffix() {
    let base = spawn_gateway(Arc::new(EchoAnswerer), true).await;

    let response = Client::new()
        .post(format!("{base}/chatgpt/question"))
        .json(&serde_json::json!({ "question": "What is 2+2?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.text().await.unwrap(),
        "What is 2+2? - do not write any explanations"
    );
}

#[tokio::test]
async fn e2e_missing_question_is_rejected() {
    let base = spawn_gateway(Arc::new(EchoAnswerer), false).await;

    let response = Client::new()
        .post(format!("{base}/chatgpt/question?debug=true"))
        .json(&serde_json::json!({ "prompt": "What is 2+2?" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "MALFORMED_REQUEST");
}

#[tokio::test]
async fn e2e_concurrent_questions_are_serialized() {
    let recorder = Arc::new(RecordingAnswerer::default());
    let base = spawn_gateway(recorder.clone(), false).await;
    let client = Client::new();

    let requests = ["first", "second", "third"].map(|question| {
        let client = client.clone();
        let url = format!("{base}/chatgpt/question");
        async move {
            client
                .post(url)
                .json(&serde_json::json!({ "question": question }))
                .send()
                .await
                .unwrap()
                .text()
                .await
                .unwrap()
        }
    });
    let answers = futures::future::join_all(requests).await;

    assert_eq!(
        answers,
        vec!["answered: first", "answered: second", "answered: third"]
    );

    let mut spans = recorder.spans.lock().unwrap().clone();
    assert_eq!(spans.len(), 3);
    spans.sort_by_key(|(_, started, _)| *started);
    for pair in spans.windows(2) {
        let (_, _, previous_end) = &pair[0];
        let (_, next_start, _) = &pair[1];
        assert!(next_start >= previous_end, "calls overlapped");
    }
}

#[tokio::test]
async fn e2e_client_disconnect_does_not_cancel_delegation() {
    let slow = Arc::new(SlowAnswerer::default());
    let base = spawn_gateway(slow.clone(), false).await;

    let result = Client::builder()
        .timeout(Duration::from_millis(50))
        .build()
        .unwrap()
        .post(format!("{base}/chatgpt/question"))
        .json(&serde_json::json!({ "question": "still wanted" }))
        .send()
        .await;
    assert!(result.is_err(), "client should give up before the answer");

    tokio::time::sleep(Duration::from_millis(800)).await;

    assert_eq!(slow.started.load(Ordering::SeqCst), 1);
    assert_eq!(slow.finished.load(Ordering::SeqCst), 1);
}
