use crate::attachment_download::AttachmentDownloader;
use crate::backend::SlotBackend;
use crate::configuration::Configuration;
use crate::error::{AttachmentError, FollowListError, SlotError};
use crate::follow_lookup::FollowListLookup;
use crate::types::{AttachmentRecord, BookingSlot};
use axum::extract::{Path, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::{extract::State, http::StatusCode, Json};
use axum::{
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{debug, error, info};
use url::Url;
use uuid::Uuid;

#[derive(Clone)]
pub struct AppState<T: SlotBackend> {
    slot_backend: T,
    follow_lookup: FollowListLookup,
    downloader: AttachmentDownloader,
    admin_password: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct BookingRequest {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct RemoveSlotRequest {
    id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct AddSlotRequest {
    time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DownloadAttachmentRequest {
    remote_location: Url,
    download_url: String,
    file_name: Option<String>,
}

type ErrorResponse = (StatusCode, String);

pub fn create_app<T: SlotBackend, C: Configuration>(
    slot_backend: T,
    follow_lookup: FollowListLookup,
    configuration: C,
) -> Router {
    let state = AppState {
        slot_backend,
        follow_lookup,
        downloader: AttachmentDownloader::new(configuration.download_dir()),
        admin_password: configuration.password(),
    };

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let public = Router::new()
        .route("/slots", get(get_slots::<T>))
        .route("/book", post(book_slot::<T>))
        .route("/students/:student_id/follows", get(get_follow_list::<T>));

    let admin = Router::new()
        .route("/add", post(add_slot::<T>))
        .route("/remove", post(remove_slot::<T>))
        .route("/remove_all", post(remove_all_slots::<T>))
        .route("/attachments/download", post(download_attachment::<T>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            admin_auth::<T>,
        ));

    Router::new()
        .merge(public)
        .merge(admin)
        .with_state(state)
        .layer(cors)
}

async fn admin_auth<T: SlotBackend>(
    State(state): State<AppState<T>>,
    request: Request,
    next: Next,
) -> Result<Response, ErrorResponse> {
    let Some(auth_header) = request.headers().get("x-admin-password") else {
        return Err((StatusCode::UNAUTHORIZED, "Missing credentials".to_string()));
    };
    if auth_header.to_str().unwrap_or("") != state.admin_password {
        return Err((StatusCode::UNAUTHORIZED, "Unauthorized".to_string()));
    }
    Ok(next.run(request).await)
}

fn slot_error_response(err: SlotError) -> ErrorResponse {
    let status = match err {
        SlotError::NotFound(_) => StatusCode::NOT_FOUND,
        SlotError::AlreadyBooked(_) => StatusCode::CONFLICT,
    };
    (status, err.to_string())
}

fn follow_list_error_response(err: FollowListError) -> ErrorResponse {
    let status = match err {
        FollowListError::EmptyStudentId | FollowListError::InvalidStudentId(_) => {
            StatusCode::BAD_REQUEST
        }
        FollowListError::NotFound(_) => StatusCode::NOT_FOUND,
        FollowListError::PermissionDenied(_) => StatusCode::FORBIDDEN,
        FollowListError::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        FollowListError::Network(_) | FollowListError::Backend(_) => StatusCode::BAD_GATEWAY,
        FollowListError::Cancelled => StatusCode::INTERNAL_SERVER_ERROR,
    };
    (status, err.to_string())
}

fn attachment_error_response(err: AttachmentError) -> ErrorResponse {
    let status = match err {
        AttachmentError::InvalidFileName(_) => StatusCode::BAD_REQUEST,
        AttachmentError::AlreadyExists(_) => StatusCode::CONFLICT,
        AttachmentError::Request(_) | AttachmentError::Status(..) | AttachmentError::TooLarge(_) => {
            StatusCode::BAD_GATEWAY
        }
        AttachmentError::Io(_) | AttachmentError::InvalidPath(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, err.to_string())
}

async fn get_slots<T: SlotBackend>(State(state): State<AppState<T>>) -> Json<Vec<BookingSlot>> {
    Json(state.slot_backend.slots())
}

async fn book_slot<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Json(booking): Json<BookingRequest>,
) -> Result<Json<BookingSlot>, ErrorResponse> {
    state
        .slot_backend
        .book_slot(booking.id)
        .map(Json)
        .map_err(slot_error_response)
}

async fn get_follow_list<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Path(student_id): Path<String>,
) -> Result<Json<Vec<String>>, ErrorResponse> {
    state
        .follow_lookup
        .get_follow_list(&student_id)
        .await
        .map(Json)
        .map_err(|err| {
            let response = follow_list_error_response(err);
            if response.0.is_client_error() {
                debug!(%student_id, err = %response.1, "Follow list lookup rejected");
            } else {
                error!(%student_id, err = %response.1, "Follow list lookup failed");
            }
            response
        })
}

async fn add_slot<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<AddSlotRequest>,
) -> Json<BookingSlot> {
    let slot = state.slot_backend.add_slot(request.time);
    info!(id = %slot.id(), time = slot.time(), "Slot added");
    Json(slot)
}

async fn remove_slot<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<RemoveSlotRequest>,
) -> Result<(StatusCode, String), ErrorResponse> {
    state
        .slot_backend
        .remove_slot(request.id)
        .map_err(slot_error_response)?;
    Ok((StatusCode::OK, "Slot removed successfully".to_string()))
}

async fn remove_all_slots<T: SlotBackend>(State(state): State<AppState<T>>) -> (StatusCode, String) {
    state.slot_backend.remove_all_slots();
    (StatusCode::OK, "All slots removed successfully".to_string())
}

async fn download_attachment<T: SlotBackend>(
    State(state): State<AppState<T>>,
    Json(request): Json<DownloadAttachmentRequest>,
) -> Result<Json<AttachmentRecord>, ErrorResponse> {
    let mut attachment = AttachmentRecord::new(request.remote_location, request.download_url);
    if let Some(file_name) = request.file_name {
        attachment.rename(file_name);
    }

    state
        .downloader
        .download(&mut attachment)
        .await
        .map_err(attachment_error_response)?;
    Ok(Json(attachment))
}
