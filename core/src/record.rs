//! Schema-less view over a decoded JSON response.
//!
//! The client never assumes which fields Megaphone returns. A `Record` keeps
//! the decoded `serde_json::Value` as-is and lets callers read any field by
//! name, or decode the whole thing into a type of their own.

use std::ops::Index;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

static NULL: Value = Value::Null;

/// A decoded JSON value returned by the API.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Value);

impl Record {
    pub fn new(value: Value) -> Self {
        Self(value)
    }

    /// Field lookup on a JSON object. `None` for missing fields and for
    /// records that are not objects.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.get(field).and_then(Value::as_str)
    }

    pub fn get_i64(&self, field: &str) -> Option<i64> {
        self.get(field).and_then(Value::as_i64)
    }

    pub fn get_f64(&self, field: &str) -> Option<f64> {
        self.get(field).and_then(Value::as_f64)
    }

    pub fn get_bool(&self, field: &str) -> Option<bool> {
        self.get(field).and_then(Value::as_bool)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.get(field).is_some()
    }

    /// Field names of an object record, in the order the server sent them.
    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0
            .as_object()
            .into_iter()
            .flat_map(|map| map.keys().map(String::as_str))
    }

    /// True for an empty response body or a literal `null`.
    pub fn is_null(&self) -> bool {
        self.0.is_null()
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    /// Splits a JSON array into one record per element.
    pub fn into_list(self) -> Option<Vec<Record>> {
        match self.0 {
            Value::Array(items) => Some(items.into_iter().map(Record).collect()),
            _ => None,
        }
    }

    /// Decodes the record into a caller-chosen type.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        T::deserialize(&self.0)
    }
}

impl From<Value> for Record {
    fn from(value: Value) -> Self {
        Self(value)
    }
}

impl From<Record> for Value {
    fn from(record: Record) -> Self {
        record.0
    }
}

impl Index<&str> for Record {
    type Output = Value;

    /// Missing fields read as `Value::Null`.
    fn index(&self, field: &str) -> &Value {
        self.get(field).unwrap_or(&NULL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn show() -> Record {
        Record::new(json!({
            "id": "p1",
            "title": "Show",
            "episodesCount": 12,
            "explicit": false,
            "rating": 4.5
        }))
    }

    #[test]
    fn fields_are_readable_by_name() {
        let record = show();
        assert_eq!(record.get_str("title"), Some("Show"));
        assert_eq!(record.get_i64("episodesCount"), Some(12));
        assert_eq!(record.get_bool("explicit"), Some(false));
        assert_eq!(record.get_f64("rating"), Some(4.5));
        assert_eq!(record["id"], "p1");
    }

    #[test]
    fn missing_field_is_none_and_indexes_to_null() {
        let record = show();
        assert!(record.get("author").is_none());
        assert!(!record.contains("author"));
        assert!(record["author"].is_null());
    }

    #[test]
    fn wrong_type_is_none() {
        assert_eq!(show().get_i64("title"), None);
    }

    #[test]
    fn fields_keep_server_order() {
        let record: Record = serde_json::from_str(r#"{"b":1,"a":2,"c":3}"#).unwrap();
        let names: Vec<&str> = record.fields().collect();
        assert_eq!(names, vec!["b", "a", "c"]);
    }

    #[test]
    fn non_object_has_no_fields() {
        let record = Record::new(json!([1, 2]));
        assert_eq!(record.fields().count(), 0);
        assert!(record.get("id").is_none());
    }

    #[test]
    fn into_list_splits_arrays() {
        let list = Record::new(json!([{"id": "a"}, {"id": "b"}]))
            .into_list()
            .unwrap();
        assert_eq!(list.len(), 2);
        assert_eq!(list[1].get_str("id"), Some("b"));
    }

    #[test]
    fn into_list_rejects_objects() {
        assert!(show().into_list().is_none());
    }

    #[test]
    fn decode_into_caller_type() {
        #[derive(serde::Deserialize)]
        struct Podcast {
            id: String,
            title: String,
        }
        let podcast: Podcast = show().decode().unwrap();
        assert_eq!(podcast.id, "p1");
        assert_eq!(podcast.title, "Show");
    }

    #[test]
    fn default_record_is_null() {
        assert!(Record::default().is_null());
    }
}
