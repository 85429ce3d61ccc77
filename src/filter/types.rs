use serde_json::Value;

/// Optional search criteria for listing jobs. Every field that is set
/// contributes one predicate; predicates are combined with AND.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JobFilter {
    /// Case-insensitive substring of the title
    pub title: Option<String>,
    pub min_salary: Option<i64>,
    /// Only jobs with non-null, non-zero equity
    pub has_equity: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub enum FilterPredicate {
    TitleContains(String),
    MinSalary(i64),
    HasEquity,
}

#[derive(Debug, Clone)]
pub struct SqlResult {
    pub query: String,
    pub params: Vec<Value>,
}
