// handlers/jobs/mod.rs - Jobs resource handlers
//
// Reads are public. Create, update and delete take the AdminUser extractor
// first, so the capability check happens before the body is validated.

use axum::{
    extract::rejection::JsonRejection,
    routing::get,
    Json, Router,
};
use serde_json::Value;

use crate::error::ApiError;
use crate::state::AppState;

pub mod create; // POST /jobs
pub mod list; // GET /jobs
pub mod show; // GET /jobs/:id
pub mod update; // PATCH /jobs/:id
pub mod delete; // DELETE /jobs/:id

pub use create::job_create;
pub use delete::job_delete;
pub use list::job_list;
pub use show::job_show;
pub use update::job_update;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/jobs", get(job_list).post(job_create))
        .route("/jobs/:id", get(job_show).patch(job_update).delete(job_delete))
}

/// Ids are integers; anything else cannot name an existing job
pub(crate) fn parse_job_id(raw: &str) -> Result<i32, ApiError> {
    raw.parse::<i32>()
        .map_err(|_| ApiError::not_found(format!("No job: {}", raw)))
}

pub(crate) fn json_body(body: Result<Json<Value>, JsonRejection>) -> Result<Value, ApiError> {
    body.map(|Json(value)| value)
        .map_err(|rejection| ApiError::invalid_json(rejection.body_text()))
}
