//! Liveness endpoint.

use axum::Json;
use langlens_core::ServiceInfo;

/// `GET /`: static service descriptor, no model state involved.
pub async fn info() -> Json<ServiceInfo> {
    Json(ServiceInfo {
        message: "Programming Language Detector API".to_string(),
        status: "running".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}
