//! Serialization / Validation Gate
//!
//! Converts the collection to and from the stored JSON text. Anything read
//! back is checked against the expected shape before it is trusted, and a
//! single bad element rejects the whole payload.

use std::collections::HashSet;

use chrono::{DateTime, NaiveDate, SecondsFormat, Timelike, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::model::Todo;

/// Reasons the collection cannot cross the storage boundary
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("stored text is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("failed to serialize todos: {0}")]
    Encode(serde_json::Error),
    #[error("stored value is not an array of todo records")]
    InvalidShape,
    #[error("stored todo has an empty id")]
    EmptyId,
    #[error("stored todos repeat the id {id:?}")]
    DuplicateId { id: String },
    #[error("todo {id} has an unreadable createdAt timestamp {value:?}")]
    InvalidTimestamp { id: String, value: String },
}

/// Plain record as it appears in storage
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredTodo {
    id: String,
    title: String,
    description: String,
    completed: bool,
    created_at: String,
}

/// Borrowed form of [`StoredTodo`] for writing
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StoredTodoRef<'a> {
    id: &'a str,
    title: &'a str,
    description: &'a str,
    completed: bool,
    created_at: String,
}

impl<'a> From<&'a Todo> for StoredTodoRef<'a> {
    fn from(todo: &'a Todo) -> Self {
        Self {
            id: &todo.id,
            title: &todo.title,
            description: &todo.description,
            completed: todo.completed,
            created_at: format_timestamp(&todo.created_at),
        }
    }
}

/// Render the collection as a JSON array, preserving order
///
/// Records hold only strings and booleans, so an error here means the
/// serializer itself is broken rather than the data.
pub fn encode(todos: &[Todo]) -> Result<String, CodecError> {
    let records: Vec<StoredTodoRef<'_>> = todos.iter().map(StoredTodoRef::from).collect();
    serde_json::to_string(&records).map_err(CodecError::Encode)
}

/// Structural check: an array whose every element carries the five typed fields
pub fn is_valid_todos(value: &Value) -> bool {
    let Some(items) = value.as_array() else {
        return false;
    };
    items.iter().all(|item| {
        let Some(fields) = item.as_object() else {
            return false;
        };
        ["id", "title", "description", "createdAt"]
            .iter()
            .all(|key| fields.get(*key).is_some_and(Value::is_string))
            && fields.get("completed").is_some_and(Value::is_boolean)
    })
}

/// Parse stored text back into a collection, all or nothing
pub fn decode(text: &str) -> Result<Vec<Todo>, CodecError> {
    let value: Value = serde_json::from_str(text)?;
    if !is_valid_todos(&value) {
        return Err(CodecError::InvalidShape);
    }
    let records: Vec<StoredTodo> =
        serde_json::from_value(value).map_err(|_| CodecError::InvalidShape)?;

    check_ids(&records)?;

    records
        .into_iter()
        .map(|record| {
            let created_at = parse_timestamp(&record.created_at).ok_or_else(|| {
                CodecError::InvalidTimestamp {
                    id: record.id.clone(),
                    value: record.created_at.clone(),
                }
            })?;
            Ok(Todo {
                id: record.id,
                title: record.title,
                description: record.description,
                completed: record.completed,
                created_at,
            })
        })
        .collect()
}

/// Ids must be non-empty and unique across the collection
fn check_ids(records: &[StoredTodo]) -> Result<(), CodecError> {
    let mut seen = HashSet::with_capacity(records.len());
    for record in records {
        if record.id.is_empty() {
            return Err(CodecError::EmptyId);
        }
        if !seen.insert(record.id.as_str()) {
            return Err(CodecError::DuplicateId {
                id: record.id.clone(),
            });
        }
    }
    Ok(())
}

/// `2023-01-01T00:00:00.000Z`, with more fraction digits only when needed
pub fn format_timestamp(at: &DateTime<Utc>) -> String {
    let nanos = at.nanosecond() % 1_000_000_000;
    let precision = if nanos % 1_000_000 == 0 {
        SecondsFormat::Millis
    } else if nanos % 1_000 == 0 {
        SecondsFormat::Micros
    } else {
        SecondsFormat::Nanos
    };
    at.to_rfc3339_opts(precision, true)
}

/// Full RFC 3339 date-time, or a bare date taken as midnight UTC
pub fn parse_timestamp(text: &str) -> Option<DateTime<Utc>> {
    if let Ok(at) = DateTime::parse_from_rfc3339(text) {
        return Some(at.with_timezone(&Utc));
    }
    NaiveDate::parse_from_str(text, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
