use serde_json::{json, Value};

use super::types::FilterPredicate;

/// Renders predicates into a WHERE body with positional parameters
pub struct FilterWhere {
    param_values: Vec<Value>,
    param_index: usize,
    conditions: Vec<String>,
}

impl FilterWhere {
    pub fn new(starting_param_index: usize) -> Self {
        Self {
            param_values: vec![],
            param_index: starting_param_index,
            conditions: vec![],
        }
    }

    /// Returns the joined conditions (empty when there are none) and the
    /// values to bind, in placeholder order.
    pub fn generate(predicates: &[FilterPredicate], starting_param_index: usize) -> (String, Vec<Value>) {
        let mut filter_where = Self::new(starting_param_index);
        for predicate in predicates {
            filter_where.push(predicate);
        }
        (filter_where.conditions.join(" AND "), filter_where.param_values)
    }

    fn push(&mut self, predicate: &FilterPredicate) {
        let condition = match predicate {
            FilterPredicate::TitleContains(needle) => {
                let p = self.param(json!(format!("%{}%", escape_like(needle))));
                format!("j.title ILIKE {}", p)
            }
            FilterPredicate::MinSalary(min) => {
                let p = self.param(json!(min));
                format!("j.salary >= {}", p)
            }
            // NULL > 0 is never true, so null equity drops out as well
            FilterPredicate::HasEquity => "j.equity > 0".to_string(),
        };
        self.conditions.push(condition);
    }

    fn param(&mut self, value: Value) -> String {
        self.param_values.push(value);
        self.param_index += 1;
        format!("${}", self.param_index)
    }
}

/// Escape LIKE metacharacters so user input matches literally
fn escape_like(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        if matches!(c, '%' | '_' | '\\') {
            out.push('\\');
        }
        out.push(c);
    }
    out
}
