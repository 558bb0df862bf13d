use axum::{Json, extract::State};
use serde::Serialize;

use super::AppState;

#[derive(Debug, Serialize)]
pub struct SystemStatus {
    pub version: String,
    pub uptime: u64,
    pub database: String,
}

pub async fn status(State(state): State<AppState>) -> Json<SystemStatus> {
    let database = match state.store.ping().await {
        Ok(()) => "ok".to_string(),
        Err(e) => format!("error: {e}"),
    };

    Json(SystemStatus {
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime: state.start_time.elapsed().as_secs(),
        database,
    })
}
