//! JSON record store.
//!
//! The store is a single JSON object mapping opaque keys to entries. Entries
//! are kept as raw JSON values so that fields this crate does not know about
//! survive a load/save cycle untouched, in their original order.

use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;

use crate::error::{StoreError, StoreResult};

/// Fixed relative location of the record store.
pub const DEFAULT_STORE_PATH: &str = "data/images.json";

const URL_FIELD: &str = "url";
const MESSAGE_ID_FIELD: &str = "messageId";
const CHANNEL_ID_FIELD: &str = "channelId";

/// An entry eligible for URL repair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub key: String,
    pub message_id: String,
    pub channel_id: String,
}

/// In-memory copy of the record store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RecordStore {
    entries: Map<String, Value>,
}

impl RecordStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_entries(entries: Map<String, Value>) -> Self {
        Self { entries }
    }

    /// Load the store from disk.
    ///
    /// Returns `Ok(None)` when the file does not exist yet.
    pub async fn load(path: impl AsRef<Path>) -> StoreResult<Option<Self>> {
        let path = path.as_ref();

        let text = match tokio::fs::read_to_string(path).await {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(StoreError::Read {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };

        Self::parse(&text).map(Some)
    }

    /// Parse a store from JSON text.
    pub fn parse(text: &str) -> StoreResult<Self> {
        match serde_json::from_str::<Value>(text)? {
            Value::Object(entries) => Ok(Self { entries }),
            other => Err(StoreError::NotAnObject {
                found: json_kind(&other),
            }),
        }
    }

    /// Serialize with two-space indentation.
    pub fn to_pretty_json(&self) -> StoreResult<String> {
        serde_json::to_string_pretty(&self.entries).map_err(StoreError::Serialize)
    }

    /// Write the whole store back to disk.
    pub async fn save(&self, path: impl AsRef<Path>) -> StoreResult<()> {
        let path = path.as_ref();
        let json = self.to_pretty_json()?;

        tokio::fs::write(path, json)
            .await
            .map_err(|source| StoreError::Write {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Entries with no `url` but both a `messageId` and a `channelId`,
    /// in document order.
    pub fn candidates(&self) -> Vec<Candidate> {
        self.entries
            .iter()
            .filter_map(|(key, value)| {
                let entry = value.as_object()?;
                if has_url(entry) {
                    return None;
                }

                Some(Candidate {
                    key: key.clone(),
                    message_id: non_empty_str(entry, MESSAGE_ID_FIELD)?.to_string(),
                    channel_id: non_empty_str(entry, CHANNEL_ID_FIELD)?.to_string(),
                })
            })
            .collect()
    }

    /// Set the `url` of an entry. Returns false if the key is unknown or the
    /// entry is not an object.
    pub fn set_url(&mut self, key: &str, url: impl Into<String>) -> bool {
        match self.entries.get_mut(key).and_then(Value::as_object_mut) {
            Some(entry) => {
                entry.insert(URL_FIELD.to_string(), Value::String(url.into()));
                true
            }
            None => false,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn entries(&self) -> &Map<String, Value> {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// `null` and `""` count as missing.
fn has_url(entry: &Map<String, Value>) -> bool {
    match entry.get(URL_FIELD) {
        None | Some(Value::Null) => false,
        Some(Value::String(s)) => !s.is_empty(),
        Some(_) => true,
    }
}

fn non_empty_str<'a>(entry: &'a Map<String, Value>, field: &str) -> Option<&'a str> {
    entry
        .get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn store(value: Value) -> RecordStore {
        match value {
            Value::Object(entries) => RecordStore::from_entries(entries),
            _ => panic!("test store must be an object"),
        }
    }

    #[test]
    fn test_candidates_require_both_ids_and_no_url() {
        let store = store(json!({
            "complete": { "url": "https://cdn.example/a.png", "messageId": "1", "channelId": "2" },
            "missing": { "messageId": "10", "channelId": "20", "prompt": "a cat" },
            "no_channel": { "messageId": "11" },
            "no_message": { "channelId": "21" },
            "bare": { "prompt": "nothing" }
        }));

        let candidates = store.candidates();

        assert_eq!(
            candidates,
            vec![Candidate {
                key: "missing".to_string(),
                message_id: "10".to_string(),
                channel_id: "20".to_string(),
            }]
        );
    }

    #[test]
    fn test_null_and_empty_url_count_as_missing() {
        let store = store(json!({
            "null_url": { "url": null, "messageId": "1", "channelId": "2" },
            "empty_url": { "url": "", "messageId": "3", "channelId": "4" }
        }));

        let keys: Vec<_> = store.candidates().into_iter().map(|c| c.key).collect();
        assert_eq!(keys, vec!["null_url", "empty_url"]);
    }

    #[test]
    fn test_empty_ids_are_not_candidates() {
        let store = store(json!({
            "a": { "messageId": "", "channelId": "2" },
            "b": { "messageId": "1", "channelId": "" },
            "c": { "messageId": 1, "channelId": 2 }
        }));

        assert!(store.candidates().is_empty());
    }

    #[test]
    fn test_non_object_entries_are_skipped() {
        let store = store(json!({
            "string": "just a string",
            "list": [1, 2, 3],
            "ok": { "messageId": "1", "channelId": "2" }
        }));

        assert_eq!(store.candidates().len(), 1);
        assert!(!store.clone().set_url("string", "x"));
    }

    #[test]
    fn test_set_url_preserves_other_fields() {
        let mut store = store(json!({
            "entry": { "messageId": "1", "channelId": "2", "prompt": "a dog", "seed": 42 }
        }));

        assert!(store.set_url("entry", "https://cdn.example/dog.png"));
        assert!(!store.set_url("unknown", "https://cdn.example/x.png"));

        assert_eq!(
            store.get("entry"),
            Some(&json!({
                "messageId": "1",
                "channelId": "2",
                "prompt": "a dog",
                "seed": 42,
                "url": "https://cdn.example/dog.png"
            }))
        );
        assert!(store.candidates().is_empty());
    }

    #[test]
    fn test_new_store_is_empty() {
        let store = RecordStore::new();

        assert!(store.is_empty());
        assert!(store.entries().is_empty());
        assert!(store.candidates().is_empty());
        assert_eq!(store.to_pretty_json().unwrap(), "{}");
    }

    #[test]
    fn test_entries_keep_document_order() {
        let store = RecordStore::parse(r#"{"z":{},"a":1,"m":{"url":"x"}}"#).unwrap();

        let keys: Vec<&str> = store.entries().keys().map(String::as_str).collect();
        assert_eq!(keys, vec!["z", "a", "m"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_parse_rejects_non_object() {
        let err = RecordStore::parse("[1, 2]").unwrap_err();
        assert!(matches!(err, StoreError::NotAnObject { found: "array" }));

        let err = RecordStore::parse("{ not json").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_pretty_json_uses_two_spaces_and_keeps_order() {
        let store = RecordStore::parse(r#"{"b":{"x":1},"a":{"y":2}}"#).unwrap();

        let json = store.to_pretty_json().unwrap();

        assert_eq!(
            json,
            "{\n  \"b\": {\n    \"x\": 1\n  },\n  \"a\": {\n    \"y\": 2\n  }\n}"
        );
    }

    #[tokio::test]
    async fn test_load_missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = RecordStore::load(dir.path().join("absent.json")).await.unwrap();
        assert!(loaded.is_none());
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("images.json");
        let mut store = store(json!({ "k": { "messageId": "1", "channelId": "2" } }));
        store.set_url("k", "https://cdn.example/k.png");

        store.save(&path).await.unwrap();
        let loaded = RecordStore::load(&path).await.unwrap().unwrap();

        assert_eq!(loaded, store);
        assert_eq!(loaded.len(), 1);
    }

    #[tokio::test]
    async fn test_load_directory_is_read_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = RecordStore::load(dir.path()).await.unwrap_err();
        assert!(matches!(err, StoreError::Read { .. }));
    }
}
