// Request shapes for the jobs resource.
//
// Each shape is checked in two passes: a structural pass over the raw JSON
// (required keys, types, nulls, no unknown keys) and a validator pass over the
// values. Offending keys are dropped before deserializing so the value pass
// still runs, and both passes feed one sorted list of violations.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use rust_decimal::Decimal;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{Map, Number, Value};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::ApiError;
use crate::filter::JobFilter;

/// JSON type expected for a request key
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum JsonKind {
    Text,
    Int32,
    Int64,
    Bool,
}

impl JsonKind {
    fn check(self, value: &Value) -> Result<(), &'static str> {
        if value.is_null() {
            return Err("must not be null");
        }
        match self {
            JsonKind::Text if value.is_string() => Ok(()),
            JsonKind::Text => Err("is not of a type(s) string"),
            JsonKind::Bool if value.is_boolean() => Ok(()),
            JsonKind::Bool => Err("is not of a type(s) boolean"),
            JsonKind::Int64 if value.is_i64() => Ok(()),
            JsonKind::Int32 => match value.as_i64() {
                Some(n) if i32::try_from(n).is_ok() => Ok(()),
                Some(_) => Err("is out of range for a 32-bit integer"),
                None => Err("is not of a type(s) integer"),
            },
            JsonKind::Int64 => Err("is not of a type(s) integer"),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ShapeField {
    /// Wire (camelCase) name
    pub name: &'static str,
    pub kind: JsonKind,
    pub required: bool,
}

const fn field(name: &'static str, kind: JsonKind, required: bool) -> ShapeField {
    ShapeField { name, kind, required }
}

/// Keys a request shape accepts. Keys outside this list are violations.
pub trait RequestShape {
    const FIELDS: &'static [ShapeField];
}

/// POST /jobs body. Required keys default to empty so a missing key still
/// lets the other values be checked; the structural pass reports it.
#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    #[serde(default)]
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: String,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<String>,
    #[serde(default)]
    #[validate(length(min = 1, max = 25, message = "must be between 1 and 25 characters"))]
    pub company_handle: String,
}

impl RequestShape for NewJob {
    const FIELDS: &'static [ShapeField] = &[
        field("title", JsonKind::Text, true),
        field("salary", JsonKind::Int32, false),
        field("equity", JsonKind::Text, false),
        field("companyHandle", JsonKind::Text, true),
    ];
}

/// PATCH /jobs/:id body. `id` and `companyHandle` are not accepted.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobUpdate {
    #[validate(length(min = 1, message = "must not be empty"))]
    pub title: Option<String>,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub salary: Option<i32>,
    #[validate(custom(function = "validate_equity"))]
    pub equity: Option<String>,
}

impl JobUpdate {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.salary.is_none() && self.equity.is_none()
    }
}

impl RequestShape for JobUpdate {
    const FIELDS: &'static [ShapeField] = &[
        field("title", JsonKind::Text, false),
        field("salary", JsonKind::Int32, false),
        field("equity", JsonKind::Text, false),
    ];
}

/// GET /jobs query, after coercion
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearch {
    pub title: Option<String>,
    #[validate(range(min = 0, message = "must be greater than or equal to 0"))]
    pub min_salary: Option<i64>,
    #[serde(default)]
    pub has_equity: bool,
}

impl RequestShape for JobSearch {
    const FIELDS: &'static [ShapeField] = &[
        field("title", JsonKind::Text, false),
        field("minSalary", JsonKind::Int64, false),
        field("hasEquity", JsonKind::Bool, false),
    ];
}

impl From<JobSearch> for JobFilter {
    fn from(search: JobSearch) -> Self {
        JobFilter {
            title: search.title,
            min_salary: search.min_salary,
            has_equity: search.has_equity,
        }
    }
}

/// Equity is a decimal string between 0 and 1 inclusive
pub fn validate_equity(equity: &str) -> Result<(), ValidationError> {
    let value = Decimal::from_str(equity.trim()).map_err(|_| {
        let mut err = ValidationError::new("decimal");
        err.message = Some("must be a decimal number".into());
        err
    })?;

    if value < Decimal::ZERO || value > Decimal::ONE {
        let mut err = ValidationError::new("range");
        err.message = Some("must be between 0 and 1".into());
        return Err(err);
    }
    Ok(())
}

/// Query strings arrive as text. `minSalary` is turned into a number when it
/// parses (otherwise left as text so the type check reports it; an empty value
/// counts as 0) and `hasEquity` is true only for the literal "true".
pub fn coerce_search_query(raw: HashMap<String, String>) -> Value {
    let mut out = Map::new();
    let mut has_equity = false;

    for (key, value) in raw {
        match key.as_str() {
            "minSalary" => {
                let trimmed = value.trim();
                let coerced = if trimmed.is_empty() {
                    Value::Number(Number::from(0))
                } else {
                    trimmed
                        .parse::<i64>()
                        .map(|n| Value::Number(Number::from(n)))
                        .unwrap_or(Value::String(value))
                };
                out.insert(key, coerced);
            }
            "hasEquity" => has_equity = value == "true",
            _ => {
                out.insert(key, Value::String(value));
            }
        }
    }

    out.insert("hasEquity".to_string(), Value::Bool(has_equity));
    Value::Object(out)
}

/// Check a JSON value against shape `T`, collecting every violation
pub fn validate_json<T>(value: Value) -> Result<T, ApiError>
where
    T: DeserializeOwned + Validate + RequestShape,
{
    let Value::Object(mut map) = value else {
        return Err(ApiError::validation_error(vec![
            "instance is not of a type(s) object".to_string(),
        ]));
    };

    let mut violations = Vec::new();
    // Keys already reported; their value-level messages would be noise
    let mut flagged: HashSet<&'static str> = HashSet::new();

    map.retain(|key, value| {
        let Some(field) = T::FIELDS.iter().find(|f| f.name == key.as_str()) else {
            violations.push(format!(
                "instance is not allowed to have the additional property \"{}\"",
                key
            ));
            return false;
        };
        match field.kind.check(value) {
            Ok(()) => true,
            Err(message) => {
                violations.push(format!("instance.{} {}", key, message));
                flagged.insert(field.name);
                false
            }
        }
    });

    for field in T::FIELDS.iter().filter(|f| f.required && !map.contains_key(f.name)) {
        if flagged.insert(field.name) {
            violations.push(format!("instance requires property \"{}\"", field.name));
        }
    }

    match serde_json::from_value::<T>(Value::Object(map)) {
        Ok(parsed) => {
            if let Err(errors) = parsed.validate() {
                violations.extend(violation_messages(&errors, &flagged));
            }
            if violations.is_empty() {
                return Ok(parsed);
            }
        }
        Err(e) => violations.push(format!("instance {}", e)),
    }

    violations.sort();
    Err(ApiError::validation_error(violations))
}

fn violation_messages(errors: &ValidationErrors, skip: &HashSet<&'static str>) -> Vec<String> {
    errors
        .field_errors()
        .into_iter()
        .flat_map(|(field, errs)| {
            let field = camel_case(&field);
            let skipped = skip.contains(field.as_str());
            errs.iter()
                .filter(move |_| !skipped)
                .map(move |err| match &err.message {
                    Some(message) => format!("instance.{} {}", field, message),
                    None => format!("instance.{} is invalid ({})", field, err.code),
                })
                .collect::<Vec<_>>()
        })
        .collect()
}

/// Report fields under their wire names
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}
