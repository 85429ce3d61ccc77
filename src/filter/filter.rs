use super::filter_where::FilterWhere;
use super::types::{FilterPredicate, JobFilter, SqlResult};

const LIST_SELECT: &str = "SELECT j.id, j.title, j.salary, j.equity::text AS equity, \
                           j.company_handle, c.name AS company_name \
                           FROM jobs j JOIN companies c ON c.handle = j.company_handle";

impl JobFilter {
    /// One predicate per criterion that is present
    pub fn predicates(&self) -> Vec<FilterPredicate> {
        let mut out = Vec::new();
        if let Some(title) = self.title.as_deref().filter(|t| !t.is_empty()) {
            out.push(FilterPredicate::TitleContains(title.to_string()));
        }
        if let Some(min) = self.min_salary {
            out.push(FilterPredicate::MinSalary(min));
        }
        if self.has_equity {
            out.push(FilterPredicate::HasEquity);
        }
        out
    }

    pub fn is_empty(&self) -> bool {
        self.predicates().is_empty()
    }

    /// Full list query: jobs joined with their company name, ordered by title
    pub fn to_sql(&self) -> SqlResult {
        let (where_clause, params) = FilterWhere::generate(&self.predicates(), 0);

        let query = [
            LIST_SELECT.to_string(),
            if where_clause.is_empty() { String::new() } else { format!("WHERE {}", where_clause) },
            "ORDER BY j.title".to_string(),
        ]
        .into_iter()
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");

        SqlResult { query, params }
    }
}
