// handlers/jobs/update.rs - PATCH /jobs/:id handler

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use serde_json::Value;

use crate::database::models::Job;
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::schemas::{validate_json, JobUpdate};
use crate::state::AppState;

use super::{json_body, parse_job_id};

/**
 * PATCH /jobs/:id - Partially update a job
 *
 * Body may include { title, salary, equity }; the company and id are fixed.
 * Returns { job: { id, title, salary, equity, companyHandle } }
 *
 * Requires admin.
 */
pub async fn job_update(
    AdminUser(_admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Job> {
    let data: JobUpdate = validate_json(json_body(body)?)?;
    let id = parse_job_id(&id)?;

    let job = state.jobs.update(id, data).await?;
    Ok(ApiResponse::success("job", job))
}
