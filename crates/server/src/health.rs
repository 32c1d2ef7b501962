use std::sync::OnceLock;
use std::time::Instant;

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};

use crate::db::AppState;

static STARTED_AT: OnceLock<Instant> = OnceLock::new();

/// Mark process start for the uptime counter. Later calls are ignored.
pub fn record_start_time() {
    STARTED_AT.get_or_init(Instant::now);
}

fn uptime_seconds() -> u64 {
    STARTED_AT
        .get()
        .map_or(0, |started| started.elapsed().as_secs())
}

/// Liveness report. `status` is `ok` when the store answers a ping and
/// `degraded` otherwise; the process itself is always reachable if this
/// response is seen at all.
#[derive(Debug, Serialize, Deserialize, utoipa::ToSchema)]
pub struct HealthResponse {
    pub status: String,
    /// `connected`, or `error: <reason>` when the ping failed.
    pub db: String,
    pub uptime_seconds: u64,
    pub version: String,
}

impl HealthResponse {
    fn from_ping(ping: Result<(), crate::repo::StoreError>) -> Self {
        let (status, db) = match ping {
            Ok(()) => ("ok", "connected".to_string()),
            Err(error) => {
                tracing::warn!(%error, "health check: store ping failed");
                ("degraded", format!("error: {error}"))
            }
        };

        Self {
            status: status.to_string(),
            db,
            uptime_seconds: uptime_seconds(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Service is up; `status` reflects store reachability", body = HealthResponse)
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse::from_ping(state.store.ping().await))
}
