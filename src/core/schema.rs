//! Shape checks for the documented Hacker News response schemas
//! (https://github.com/HackerNews/API#items). Required fields must be present
//! with the right type; optional fields are type-checked only when present.

use crate::utils::error::{HnError, Result};
use serde_json::{Map, Value};

/// The listing endpoint returns at most 500 ids.
const MAX_TOP_STORIES: usize = 500;

pub fn check_top_stories(value: &Value) -> Result<()> {
    let ids = value.as_array().ok_or_else(|| {
        schema_err(
            "topstories",
            format!("expected an array, got {}", type_name(value)),
        )
    })?;

    if ids.is_empty() {
        return Err(schema_err("topstories", "list cannot be empty".to_string()));
    }
    if ids.len() > MAX_TOP_STORIES {
        return Err(schema_err(
            "topstories",
            format!(
                "list length {} exceeds maximum of {}",
                ids.len(),
                MAX_TOP_STORIES
            ),
        ));
    }
    check_id_entries("topstories", ids)
}

pub fn check_story(value: &Value) -> Result<()> {
    let obj = object(value)?;

    require_int(obj, "id")?;
    require_str(obj, "type")?;
    require_int(obj, "time")?;

    optional_str(obj, "by")?;
    optional_str(obj, "title")?;
    optional_str(obj, "text")?;
    optional_str(obj, "url")?;
    optional_int(obj, "score")?;
    optional_int(obj, "descendants")?;
    optional_int(obj, "parent")?;
    optional_int(obj, "poll")?;
    optional_bool(obj, "dead")?;
    optional_id_list(obj, "kids")?;
    optional_id_list(obj, "parts")?;

    Ok(())
}

pub fn check_comment(value: &Value) -> Result<()> {
    let obj = object(value)?;

    require_int(obj, "id")?;
    let kind = require_str(obj, "type")?;
    if kind != "comment" {
        return Err(schema_err(
            "type",
            format!("expected 'comment', got '{}'", kind),
        ));
    }
    require_int(obj, "time")?;

    optional_str(obj, "by")?;
    optional_str(obj, "text")?;
    optional_int(obj, "parent")?;
    optional_bool(obj, "dead")?;
    optional_bool(obj, "deleted")?;
    optional_id_list(obj, "kids")?;

    Ok(())
}

fn schema_err(field: &str, reason: String) -> HnError {
    HnError::SchemaError {
        field: field.to_string(),
        reason,
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn object(value: &Value) -> Result<&Map<String, Value>> {
    value.as_object().ok_or_else(|| {
        schema_err(
            "item",
            format!("expected an object, got {}", type_name(value)),
        )
    })
}

fn require_int(obj: &Map<String, Value>, field: &str) -> Result<i64> {
    let value = obj
        .get(field)
        .ok_or_else(|| schema_err(field, "missing required field".to_string()))?;
    value
        .as_i64()
        .ok_or_else(|| schema_err(field, format!("must be an integer, got {}", type_name(value))))
}

fn require_str<'a>(obj: &'a Map<String, Value>, field: &str) -> Result<&'a str> {
    let value = obj
        .get(field)
        .ok_or_else(|| schema_err(field, "missing required field".to_string()))?;
    value
        .as_str()
        .ok_or_else(|| schema_err(field, format!("must be a string, got {}", type_name(value))))
}

fn optional_int(obj: &Map<String, Value>, field: &str) -> Result<()> {
    match obj.get(field) {
        Some(value) if value.as_i64().is_none() => Err(schema_err(
            field,
            format!("must be an integer, got {}", type_name(value)),
        )),
        _ => Ok(()),
    }
}

fn optional_str(obj: &Map<String, Value>, field: &str) -> Result<()> {
    match obj.get(field) {
        Some(value) if !value.is_string() => Err(schema_err(
            field,
            format!("must be a string, got {}", type_name(value)),
        )),
        _ => Ok(()),
    }
}

fn optional_bool(obj: &Map<String, Value>, field: &str) -> Result<()> {
    match obj.get(field) {
        Some(value) if !value.is_boolean() => Err(schema_err(
            field,
            format!("must be a bool, got {}", type_name(value)),
        )),
        _ => Ok(()),
    }
}

fn optional_id_list(obj: &Map<String, Value>, field: &str) -> Result<()> {
    match obj.get(field) {
        None => Ok(()),
        Some(value) => {
            let entries = value.as_array().ok_or_else(|| {
                schema_err(field, format!("must be an array, got {}", type_name(value)))
            })?;
            check_id_entries(field, entries)
        }
    }
}

fn check_id_entries(field: &str, entries: &[Value]) -> Result<()> {
    for entry in entries {
        if entry.as_i64().is_none() {
            return Err(schema_err(
                field,
                format!("entry is not an integer: got {} ({})", type_name(entry), entry),
            ));
        }
    }
    Ok(())
}
