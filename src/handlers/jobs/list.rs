// handlers/jobs/list.rs - GET /jobs handler

use std::collections::HashMap;

use axum::extract::{Query, State};

use crate::database::models::JobListing;
use crate::filter::JobFilter;
use crate::middleware::{ApiResponse, ApiResult};
use crate::schemas::{coerce_search_query, validate_json, JobSearch};
use crate::state::AppState;

/// GET /jobs - list jobs, optionally filtered by `title`, `minSalary` and
/// `hasEquity`. Returns { jobs: [ { id, title, salary, equity, companyHandle, companyName } ] }
pub async fn job_list(
    State(state): State<AppState>,
    Query(raw): Query<HashMap<String, String>>,
) -> ApiResult<Vec<JobListing>> {
    let search: JobSearch = validate_json(coerce_search_query(raw))?;
    let filter = JobFilter::from(search);

    let jobs = state.jobs.find_all(filter).await?;
    Ok(ApiResponse::success("jobs", jobs))
}
