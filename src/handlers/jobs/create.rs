// handlers/jobs/create.rs - POST /jobs handler

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde_json::Value;

use crate::database::models::Job;
use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::schemas::{validate_json, NewJob};
use crate::state::AppState;

use super::json_body;

/**
 * POST /jobs - Create a job posting
 *
 * Body: { title, salary?, equity?, companyHandle }
 * Returns 201 { job: { id, title, salary, equity, companyHandle } }
 *
 * Requires admin.
 */
pub async fn job_create(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    body: Result<Json<Value>, JsonRejection>,
) -> ApiResult<Job> {
    let data: NewJob = validate_json(json_body(body)?)?;

    tracing::debug!("'{}' creating job '{}' for {}", admin.username, data.title, data.company_handle);
    let job = state.jobs.create(data).await?;

    Ok(ApiResponse::created("job", job))
}
