use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type ItemId = i64;

/// A Hacker News item (story, comment, job, poll) as a loose JSON object.
/// The API documents a handful of fields but almost all of them are optional,
/// so the raw map is kept and exposed through typed accessors.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Item {
    pub data: Map<String, Value>,
}

impl Item {
    /// The API answers `null` for nonexistent ids; those become `None`.
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(data) => Some(Self { data }),
            _ => None,
        }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn id(&self) -> Option<ItemId> {
        self.data.get("id").and_then(|v| v.as_i64())
    }

    pub fn kind(&self) -> Option<&str> {
        self.data.get("type").and_then(|v| v.as_str())
    }

    pub fn by(&self) -> Option<&str> {
        self.data.get("by").and_then(|v| v.as_str())
    }

    pub fn title(&self) -> Option<&str> {
        self.data.get("title").and_then(|v| v.as_str())
    }

    pub fn text(&self) -> Option<&str> {
        self.data.get("text").and_then(|v| v.as_str())
    }

    /// Ids of child comments, empty when the `kids` field is absent.
    pub fn kids(&self) -> Vec<ItemId> {
        self.data
            .get("kids")
            .and_then(|v| v.as_array())
            .map(|kids| kids.iter().filter_map(|k| k.as_i64()).collect())
            .unwrap_or_default()
    }

    pub fn has_comments(&self) -> bool {
        !self.kids().is_empty()
    }

    pub fn is_deleted(&self) -> bool {
        self.data
            .get("deleted")
            .and_then(|v| v.as_bool())
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn story() -> Item {
        Item::from_value(json!({
            "id": 8863,
            "type": "story",
            "by": "dhouston",
            "time": 1175714200,
            "title": "My YC app: Dropbox",
            "kids": [8952, 9224],
            "score": 111
        }))
        .unwrap()
    }

    #[test]
    fn test_from_value_null_is_none() {
        assert!(Item::from_value(json!(null)).is_none());
        assert!(Item::from_value(json!([1, 2])).is_none());
    }

    #[test]
    fn test_typed_accessors() {
        let item = story();
        assert_eq!(item.id(), Some(8863));
        assert_eq!(item.kind(), Some("story"));
        assert_eq!(item.by(), Some("dhouston"));
        assert_eq!(item.kids(), vec![8952, 9224]);
        assert!(item.has_comments());
        assert!(!item.is_deleted());
    }

    #[test]
    fn test_missing_kids_means_no_comments() {
        let item = Item::from_value(json!({"id": 1, "type": "story", "time": 0})).unwrap();
        assert!(item.kids().is_empty());
        assert!(!item.has_comments());
    }

    #[test]
    fn test_deleted_flag() {
        let item = Item::from_value(json!({"id": 2, "type": "comment", "deleted": true})).unwrap();
        assert!(item.is_deleted());
    }
}
