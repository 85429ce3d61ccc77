// handlers/jobs/show.rs - GET /jobs/:id handler

use axum::extract::{Path, State};

use crate::database::models::JobDetail;
use crate::middleware::{ApiResponse, ApiResult};
use crate::state::AppState;

use super::parse_job_id;

/// GET /jobs/:id - { job: { id, title, salary, equity, company } }
pub async fn job_show(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<JobDetail> {
    let id = parse_job_id(&id)?;
    let job = state.jobs.get(id).await?;
    Ok(ApiResponse::success("job", job))
}
