use axum::{
    routing::{get, MethodRouter},
    Json,
};
use chrono::Utc;

use crate::models::HealthResponse;

/// GET /health. Never calls upstream APIs. Returned as a method router so
/// the function's POST handler can share the path.
pub fn health<S>(function: &'static str) -> MethodRouter<S>
where
    S: Clone + Send + Sync + 'static,
{
    get(move || async move {
        Json(HealthResponse {
            status: "healthy".to_string(),
            function: function.to_string(),
            timestamp: Utc::now().to_rfc3339(),
        })
    })
}
