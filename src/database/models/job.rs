use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::company::Company;

/// Column list for a bare job row. Equity is NUMERIC in the table and is
/// always read back as text so the stored digits are returned unchanged.
pub const JOB_COLUMNS: &str = "id, title, salary, equity::text AS equity, company_handle";

/// A row of the jobs table, as returned by create and update
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
}

/// List view: job row plus the owning company's display name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobListing {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    pub company_handle: String,
    pub company_name: String,
}

/// Single-job view with the full company record embedded
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct JobDetail {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<String>,
    #[sqlx(flatten)]
    pub company: Company,
}
