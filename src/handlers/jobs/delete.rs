// handlers/jobs/delete.rs - DELETE /jobs/:id handler

use axum::extract::{Path, State};

use crate::middleware::{AdminUser, ApiResponse, ApiResult};
use crate::state::AppState;

use super::parse_job_id;

/// DELETE /jobs/:id - hard delete, returns { deleted: id }. Requires admin.
pub async fn job_delete(
    AdminUser(admin): AdminUser,
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<i32> {
    let id = parse_job_id(&id)?;
    state.jobs.remove(id).await?;

    tracing::debug!("'{}' deleted job {}", admin.username, id);
    Ok(ApiResponse::success("deleted", id))
}
