//! Test helpers: a throwaway HTTP server standing in for the Telegram Bot API.

use std::{collections::HashMap, sync::Arc, time::Duration};

use axum::{
    Router,
    body::Bytes,
    extract::{FromRequest, Multipart, Request, State},
    http::{StatusCode, header::CONTENT_TYPE},
};
use tokio::{sync::Mutex, task::JoinHandle};

/// A file part received by the mock server
#[derive(Debug, Clone)]
pub struct RecordedFile {
    pub field: String,
    pub file_name: Option<String>,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// One request received by the mock server
#[derive(Debug, Clone, Default)]
pub struct RecordedRequest {
    pub path: String,
    pub json: Option<serde_json::Value>,
    pub fields: HashMap<String, String>,
    pub files: Vec<RecordedFile>,
}

impl RecordedRequest {
    /// Last path segment, i.e. the Bot API method name
    pub fn method(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or_default()
    }

    pub fn is_multipart(&self) -> bool {
        self.json.is_none()
    }
}

#[derive(Clone)]
struct MockState {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
}

/// Mock messaging API that records every request and answers with a fixed response
pub struct MockTelegram {
    pub base_url: String,
    requests: Arc<Mutex<Vec<RecordedRequest>>>,
    handle: JoinHandle<()>,
}

impl MockTelegram {
    pub async fn ok() -> Self {
        Self::start(StatusCode::OK, r#"{"ok":true,"result":{}}"#, Duration::ZERO).await
    }

    pub async fn failing(status: StatusCode, body: &'static str) -> Self {
        Self::start(status, body, Duration::ZERO).await
    }

    pub async fn slow(delay: Duration) -> Self {
        Self::start(StatusCode::OK, r#"{"ok":true,"result":{}}"#, delay).await
    }

    async fn start(status: StatusCode, body: &'static str, delay: Duration) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = MockState {
            status,
            body,
            delay,
            requests: requests.clone(),
        };
        let app = Router::new().fallback(record).with_state(state);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url: format!("http://{}", addr),
            requests,
            handle,
        }
    }

    pub async fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().await.clone()
    }
}

impl Drop for MockTelegram {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

async fn record(State(state): State<MockState>, request: Request) -> (StatusCode, &'static str) {
    let path = request.uri().path().to_string();
    let is_multipart = request
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("multipart/form-data"));

    let mut recorded = RecordedRequest {
        path,
        ..Default::default()
    };

    if is_multipart {
        let mut multipart = Multipart::from_request(request, &()).await.unwrap();
        while let Some(field) = multipart.next_field().await.unwrap() {
            let name = field.name().unwrap_or_default().to_string();
            match field.file_name().map(str::to_string) {
                Some(file_name) => {
                    let content_type = field.content_type().map(str::to_string);
                    let bytes = field.bytes().await.unwrap();
                    recorded.files.push(RecordedFile {
                        field: name,
                        file_name: Some(file_name),
                        content_type,
                        bytes,
                    });
                }
                None => {
                    let value = field.text().await.unwrap();
                    recorded.fields.insert(name, value);
                }
            }
        }
    } else {
        let bytes = axum::body::to_bytes(request.into_body(), usize::MAX)
            .await
            .unwrap();
        recorded.json = Some(serde_json::from_slice(&bytes).unwrap_or(serde_json::Value::Null));
    }

    state.requests.lock().await.push(recorded);

    if !state.delay.is_zero() {
        tokio::time::sleep(state.delay).await;
    }

    (state.status, state.body)
}
