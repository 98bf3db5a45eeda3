#![allow(dead_code)]
use utoipa::OpenApi;

use crate::handlers::{ErrorResponse, SendNotificationResponse};
use crate::logic::DispatchRequest;

#[utoipa::path(
    post,
    path = "/send-notification",
    request_body(content = DispatchRequest, example = json!({
        "deviceId": "abc-123"
    })),
    responses(
        (status = 200, description = "Notification relayed", body = SendNotificationResponse,
         example = json!({
             "success": true,
             "data": { "data": { "status": "ok", "id": "receipt-1" } }
         })
        ),
        (status = 400, description = "Bad Request", body = ErrorResponse,
         example = json!({ "error": "deviceId must be present and non-empty" })
        ),
        (status = 404, description = "Registration not found", body = ErrorResponse,
         example = json!({ "error": "User not found" })
        ),
        (status = 500, description = "Internal Server Error", body = ErrorResponse,
         example = json!({ "error": "Push relay error: invalid push token" })
        )
    ),
    tag = "Dispatch"
)]
fn doc_send_notification_handler() {}

#[derive(OpenApi)]
#[openapi(
    paths(doc_send_notification_handler),
    components(
        schemas(
            DispatchRequest,
            SendNotificationResponse,
            ErrorResponse,
        )
    ),
    tags(
        (name = "Dispatch", description = "Push notification dispatch API")
    )
)]
pub struct DispatchApiDoc;
