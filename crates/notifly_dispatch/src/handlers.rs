//! HTTP handlers for the notification dispatch service
//!
//! This module exposes the single dispatch endpoint over axum. The handler
//! only translates between the wire shapes and the typed outcome of
//! [`Dispatcher::dispatch`]; every failure becomes a structured JSON error
//! response, never an uncaught fault.

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;
use tracing::{debug, error};

use crate::logic::{DispatchRequest, Dispatcher};
use notifly_common::HttpStatusCode;

/// Shared state for dispatch handlers
#[derive(Clone)]
pub struct DispatchState {
    /// The dispatcher used to serve send requests
    pub dispatcher: Arc<Dispatcher>,
}

/// Response body for a successfully relayed notification
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct SendNotificationResponse {
    /// Always true for this body; failures use [`ErrorResponse`]
    pub success: bool,

    /// The relay's response body, passed through verbatim
    pub data: serde_json::Value,
}

/// Response body for a failed dispatch
#[derive(Debug, Serialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct ErrorResponse {
    /// Human-readable failure message
    pub error: String,
}

/// Handler for dispatching a push notification to a registered device
///
/// Accepts `{ "deviceId": string }`, looks the device up in the
/// registration store and forwards one notification to the push relay.
///
/// # Responses
///
/// - 200 OK: relay accepted the message; relay body under `data`
/// - 400 Bad Request: missing or empty `deviceId`
/// - 404 Not Found: no registration record for the device
/// - 500 Internal Server Error: store read or relay call failed
#[axum::debug_handler]
#[cfg_attr(feature = "openapi", utoipa::path(
    post,
    path = "/send-notification",
    request_body = DispatchRequest,
    responses(
        (status = 200, description = "Notification relayed", body = SendNotificationResponse),
        (status = 400, description = "Bad Request", body = ErrorResponse),
        (status = 404, description = "Registration not found", body = ErrorResponse),
        (status = 500, description = "Internal Server Error", body = ErrorResponse)
    ),
    tag = "Dispatch"
))]
pub async fn send_notification_handler(
    State(state): State<Arc<DispatchState>>,
    Json(payload): Json<DispatchRequest>,
) -> Response {
    debug!("Received dispatch request for device: {}", payload.device_id);

    match state.dispatcher.dispatch(payload).await {
        Ok(outcome) => Json(SendNotificationResponse {
            success: true,
            data: outcome.relay_response,
        })
        .into_response(),
        Err(err) => {
            error!("Dispatch failed: {err}");
            let status = StatusCode::from_u16(err.status_code())
                .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
            (
                status,
                Json(ErrorResponse {
                    error: err.to_string(),
                }),
            )
                .into_response()
        }
    }
}
