use std::{
    collections::HashMap,
    path::PathBuf,
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex,
    },
    time::Duration,
};

use async_trait::async_trait;
use axum::{
    extract::{Path, Query},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde_json::json;
use tokio::{net::TcpListener, task::JoinHandle};
use url::Url;
use uuid::Uuid;

use crate::{
    backend::SlotBackend, configuration::Configuration, error::FollowListError,
    error::SlotError, follow_list::FollowListAccess, types::BookingSlot,
};

pub struct MockSlotBackendInner {
    pub success: AtomicBool,
    pub calls_to_slots: AtomicU64,
    pub calls_to_book_slot: AtomicU64,
    pub calls_to_add_slot: AtomicU64,
    pub calls_to_remove_slot: AtomicU64,
    pub calls_to_remove_all_slots: AtomicU64,
    pub slots: Mutex<Vec<BookingSlot>>,
}

#[derive(Clone)]
pub struct MockSlotBackend(pub Arc<MockSlotBackendInner>);

impl MockSlotBackendInner {
    fn new() -> Self {
        Self {
            success: AtomicBool::new(true),
            calls_to_slots: AtomicU64::default(),
            calls_to_book_slot: AtomicU64::default(),
            calls_to_add_slot: AtomicU64::default(),
            calls_to_remove_slot: AtomicU64::default(),
            calls_to_remove_all_slots: AtomicU64::default(),
            slots: Mutex::default(),
        }
    }
}

impl MockSlotBackend {
    pub fn new() -> Self {
        Self(Arc::new(MockSlotBackendInner::new()))
    }

    fn result(&self, id: Uuid) -> Result<(), SlotError> {
        match self.0.success.load(Ordering::SeqCst) {
            true => Ok(()),
            false => Err(SlotError::NotFound(id)),
        }
    }
}

impl SlotBackend for MockSlotBackend {
    fn slots(&self) -> Vec<BookingSlot> {
        self.0.calls_to_slots.fetch_add(1, Ordering::SeqCst);
        self.0.slots.lock().unwrap().clone()
    }

    fn book_slot(&self, id: Uuid) -> Result<BookingSlot, SlotError> {
        self.0.calls_to_book_slot.fetch_add(1, Ordering::SeqCst);
        self.result(id)?;
        Ok(BookingSlot::new("10:00 AM", true))
    }

    fn add_slot(&self, time: String) -> BookingSlot {
        self.0.calls_to_add_slot.fetch_add(1, Ordering::SeqCst);
        BookingSlot::new(time, false)
    }

    fn remove_slot(&self, id: Uuid) -> Result<(), SlotError> {
        self.0.calls_to_remove_slot.fetch_add(1, Ordering::SeqCst);
        self.result(id)
    }

    fn remove_all_slots(&self) {
        self.0
            .calls_to_remove_all_slots
            .fetch_add(1, Ordering::SeqCst);
    }
}

#[derive(Clone)]
pub struct TestConfiguration {
    pub download_dir: PathBuf,
}

impl Configuration for TestConfiguration {
    fn password(&self) -> String {
        "123".into()
    }

    fn port(&self) -> String {
        "0".into()
    }

    fn follow_directory_url(&self) -> Option<Url> {
        None
    }

    fn follow_directory_token(&self) -> Option<String> {
        None
    }

    fn lookup_timeout(&self) -> Duration {
        Duration::from_millis(200)
    }

    fn download_dir(&self) -> PathBuf {
        self.download_dir.clone()
    }
}

/// Follow directory that answers only after the given delay.
pub struct SlowFollowDirectory(pub Duration);

#[async_trait]
impl FollowListAccess for SlowFollowDirectory {
    async fn get_follow_list(&self, _student_id: &str) -> Result<Vec<String>, FollowListError> {
        tokio::time::sleep(self.0).await;
        Ok(vec![])
    }
}

/// Serves `app` on an ephemeral local port and returns its base address.
pub async fn spawn_test_server(app: Router) -> (String, JoinHandle<()>) {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    let server = tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    (format!("http://{address}"), server)
}

/// Stand-in for the remote follow directory and file storage.
pub fn directory_router() -> Router {
    Router::new()
        .route(
            "/tutoring/students/:student_id/follows.json",
            get(follows_document),
        )
        .route("/files/:file_name", get(file_content))
}

async fn follows_document(
    Path(student_id): Path<String>,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    match student_id.as_str() {
        "S-42" => Json(json!(["S-1", "S-7"])).into_response(),
        "S-43" => Json(json!({ "S-9": true, "S-2": true })).into_response(),
        "holes" => Json(json!([null, "S-1", null, "S-7"])).into_response(),
        "garbage" => "not a follow list".into_response(),
        "private" if query.get("auth").map(String::as_str) == Some("secret") => {
            Json(json!(["S-3"])).into_response()
        }
        "private" | "locked" => StatusCode::FORBIDDEN.into_response(),
        "broken" => StatusCode::INTERNAL_SERVER_ERROR.into_response(),
        "missing" => StatusCode::NOT_FOUND.into_response(),
        _ => Json(serde_json::Value::Null).into_response(),
    }
}

async fn file_content(Path(file_name): Path<String>) -> Response {
    if file_name.starts_with("missing") {
        return StatusCode::NOT_FOUND.into_response();
    }
    format!("contents of {file_name}").into_response()
}
