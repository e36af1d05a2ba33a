//! API routes for wayfinderd
//!
//! `POST /skill` answers builder webhooks; it always replies 200 with a
//! skill payload, even when the data or a handler fails.

use crate::handlers::Reply;
use crate::server::AppState;
use axum::{
    extract::{rejection::JsonRejection, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};
use wayfinder_shared::{messages, AuditEntry, ResponseBuilder, SkillRequest, SkillResponse};

type AppStateArc = Arc<AppState>;

// ============================================================================
// Skill Routes
// ============================================================================

pub fn skill_routes() -> Router<AppStateArc> {
    Router::new().route("/skill", post(skill))
}

async fn skill(
    State(state): State<AppStateArc>,
    payload: Result<Json<SkillRequest>, JsonRejection>,
) -> Json<SkillResponse> {
    let params = match payload {
        Ok(Json(req)) => req.action.params,
        Err(rejection) => {
            error!("  Rejected skill payload: {}", rejection);
            let message = messages::server_error(&rejection.body_text());
            return Json(ResponseBuilder::text(message).build());
        }
    };

    let workbook = match state.workbooks.snapshot().await {
        Ok(workbook) => workbook,
        Err(e) => {
            error!("  Workbook load failed: {:#}", e);
            return Json(ResponseBuilder::text(messages::server_error(&e.to_string())).build());
        }
    };

    let outcome = {
        let mut rng = rand::thread_rng();
        state.handler.handle(&workbook, &params, &mut rng)
    };

    match outcome {
        Ok(Reply {
            response,
            audit_input,
        }) => {
            let id_code = params.id_code();
            let message = response.text().unwrap_or_default().to_string();
            info!("  {} -> {}", audit_input, message);
            state.audit.record(AuditEntry::new(
                id_code,
                workbook.caller_name(id_code),
                audit_input,
                message,
            ));
            Json(response)
        }
        Err(e) => {
            error!("  Skill handler failed: {:#}", e);
            Json(ResponseBuilder::text(messages::server_error(&e.to_string())).build())
        }
    }
}

// ============================================================================
// Health Routes
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub uptime_seconds: u64,
    pub hierarchy_rows: Option<usize>,
}

pub fn health_routes() -> Router<AppStateArc> {
    Router::new().route("/v1/health", get(health_check))
}

async fn health_check(State(state): State<AppStateArc>) -> Json<HealthResponse> {
    let hierarchy_rows = match state.workbooks.snapshot().await {
        Ok(workbook) => workbook.hierarchy.as_ref().ok().map(|t| t.len()),
        Err(_) => None,
    };

    Json(HealthResponse {
        status: if hierarchy_rows.is_some() {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: wayfinder_shared::VERSION.to_string(),
        uptime_seconds: state.start_time.elapsed().as_secs(),
        hierarchy_rows,
    })
}
