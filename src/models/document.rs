//! Document model
//!
//! Schemaless documents as they come out of the remote store: a store-assigned
//! id plus a map of named, tagged field values.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Field map of a document, excluding its id.
pub type Fields = BTreeMap<String, FieldValue>;

// == Field Value ==
/// A single document field value.
///
/// Deserialization tries variants in declaration order, so RFC 3339 strings
/// become `Timestamp` and every other string stays a `String`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Null,
    Bool(bool),
    Integer(i64),
    Double(f64),
    Timestamp(DateTime<Utc>),
    String(String),
}

impl FieldValue {
    /// Cross-type order: booleans, numbers, timestamps, strings, null.
    fn rank(&self) -> u8 {
        match self {
            FieldValue::Bool(_) => 0,
            FieldValue::Integer(_) | FieldValue::Double(_) => 1,
            FieldValue::Timestamp(_) => 2,
            FieldValue::String(_) => 3,
            FieldValue::Null => 4,
        }
    }

    /// Total order used when sorting documents by a field.
    ///
    /// Integers and doubles compare numerically with each other; values of
    /// unrelated types fall back to a fixed type rank.
    pub fn sort_cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (FieldValue::Bool(a), FieldValue::Bool(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Integer(b)) => a.cmp(b),
            (FieldValue::Integer(a), FieldValue::Double(b)) => (*a as f64).total_cmp(b),
            (FieldValue::Double(a), FieldValue::Integer(b)) => a.total_cmp(&(*b as f64)),
            (FieldValue::Double(a), FieldValue::Double(b)) => a.total_cmp(b),
            (FieldValue::Timestamp(a), FieldValue::Timestamp(b)) => a.cmp(b),
            (FieldValue::String(a), FieldValue::String(b)) => a.cmp(b),
            _ => self.rank().cmp(&other.rank()),
        }
    }

    /// Integer view of a numeric value. Doubles qualify only when integral.
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(n) => Some(*n),
            FieldValue::Double(d) if d.fract() == 0.0 && d.is_finite() => Some(*d as i64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }

    /// Truthiness as the site templates read flags like `explore`.
    pub fn is_truthy(&self) -> bool {
        match self {
            FieldValue::Null => false,
            FieldValue::Bool(b) => *b,
            FieldValue::Integer(n) => *n != 0,
            FieldValue::Double(d) => *d != 0.0,
            FieldValue::Timestamp(_) => true,
            FieldValue::String(s) => !s.is_empty(),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<i32> for FieldValue {
    fn from(value: i32) -> Self {
        FieldValue::Integer(i64::from(value))
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Double(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Timestamp(value)
    }
}

// == Document ==
/// One record of a collection: its store id plus untyped fields.
///
/// The id is kept outside the field map and serialized alongside the fields
/// as `"id"`, so a field named `id` can never disagree with the store id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    id: String,
    #[serde(flatten)]
    fields: Fields,
}

impl Document {
    // == Constructor ==
    /// Builds a document from a store id and its field map.
    ///
    /// Any `id` entry in `fields` is dropped in favour of the store id.
    pub fn new(id: impl Into<String>, mut fields: Fields) -> Self {
        fields.remove("id");
        Self {
            id: id.into(),
            fields,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn fields(&self) -> &Fields {
        &self.fields
    }

    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.fields.get(field)
    }

    /// Overwrites (or adds) a single field.
    pub fn set(&mut self, field: impl Into<String>, value: impl Into<FieldValue>) {
        let field = field.into();
        if field == "id" {
            return;
        }
        self.fields.insert(field, value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<FieldValue> {
        self.fields.remove(field)
    }

    /// Builder-style `set`, handy for fixtures.
    pub fn with(mut self, field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        self.set(field, value);
        self
    }

    /// Value used as a sort key. Null counts as missing.
    fn sort_key(&self, field: &str) -> Option<&FieldValue> {
        self.fields
            .get(field)
            .filter(|value| !matches!(value, FieldValue::Null))
    }
}

// == Sorting ==
/// Stable in-place sort of `docs` by `field`.
///
/// Documents without the field sort as if it held positive infinity in
/// ascending order, and they stay last in descending order as well.
pub fn sort_documents(docs: &mut [Document], field: &str, ascending: bool) {
    docs.sort_by(|a, b| match (a.sort_key(field), b.sort_key(field)) {
        (Some(x), Some(y)) => {
            let ord = x.sort_cmp(y);
            if ascending {
                ord
            } else {
                ord.reverse()
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    });
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn ids(docs: &[Document]) -> Vec<&str> {
        docs.iter().map(Document::id).collect()
    }

    fn order_fixture() -> Vec<Document> {
        vec![
            Document::new("1", Fields::new()).with("order", 3),
            Document::new("2", Fields::new()).with("order", 1),
            Document::new("3", Fields::new()),
        ]
    }

    #[test]
    fn test_sort_ascending_missing_last() {
        let mut docs = order_fixture();
        sort_documents(&mut docs, "order", true);
        assert_eq!(ids(&docs), vec!["2", "1", "3"]);
    }

    #[test]
    fn test_sort_descending_missing_still_last() {
        let mut docs = order_fixture();
        sort_documents(&mut docs, "order", false);
        assert_eq!(ids(&docs), vec!["1", "2", "3"]);
    }

    #[test]
    fn test_sort_is_stable_for_equal_keys() {
        let mut docs = vec![
            Document::new("a", Fields::new()).with("order", 1),
            Document::new("b", Fields::new()).with("order", 0),
            Document::new("c", Fields::new()).with("order", 1),
            Document::new("d", Fields::new()),
            Document::new("e", Fields::new()),
        ];

        sort_documents(&mut docs, "order", true);
        assert_eq!(ids(&docs), vec!["b", "a", "c", "d", "e"]);

        sort_documents(&mut docs, "order", false);
        assert_eq!(ids(&docs), vec!["a", "c", "b", "d", "e"]);
    }

    #[test]
    fn test_sort_null_counts_as_missing() {
        let mut docs = vec![
            Document::new("null", Fields::new()).with("order", FieldValue::Null),
            Document::new("two", Fields::new()).with("order", 2),
        ];
        sort_documents(&mut docs, "order", true);
        assert_eq!(ids(&docs), vec!["two", "null"]);
    }

    #[test]
    fn test_sort_mixed_numbers() {
        let mut docs = vec![
            Document::new("a", Fields::new()).with("order", 2.5),
            Document::new("b", Fields::new()).with("order", 2),
            Document::new("c", Fields::new()).with("order", 3),
        ];
        sort_documents(&mut docs, "order", true);
        assert_eq!(ids(&docs), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_sort_by_timestamp() {
        let early = Utc.with_ymd_and_hms(2024, 5, 1, 10, 0, 0).unwrap();
        let late = Utc.with_ymd_and_hms(2024, 5, 2, 10, 0, 0).unwrap();
        let mut docs = vec![
            Document::new("late", Fields::new()).with("timestamp", late),
            Document::new("early", Fields::new()).with("timestamp", early),
        ];
        sort_documents(&mut docs, "timestamp", true);
        assert_eq!(ids(&docs), vec!["early", "late"]);
    }

    #[test]
    fn test_new_drops_id_field() {
        let mut fields = Fields::new();
        fields.insert("id".to_string(), FieldValue::from("bogus"));
        fields.insert("like".to_string(), FieldValue::from(5));

        let doc = Document::new("post42", fields);
        assert_eq!(doc.id(), "post42");
        assert!(doc.get("id").is_none());
        assert_eq!(doc.get("like").and_then(FieldValue::as_i64), Some(5));
    }

    #[test]
    fn test_document_json_shape() {
        let doc = Document::new("post42", Fields::new())
            .with("like", 5)
            .with("caption", "first dance");

        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["id"], "post42");
        assert_eq!(json["like"], 5);
        assert_eq!(json["caption"], "first dance");

        let back: Document = serde_json::from_value(json).unwrap();
        assert_eq!(back, doc);
    }

    #[test]
    fn test_field_value_deserialize_variants() {
        let doc: Document = serde_json::from_str(
            r#"{"id":"m1","name":"Ann","count":3,"ratio":0.5,"pinned":true,"note":null,
                "timestamp":"2024-05-01T10:00:00Z"}"#,
        )
        .unwrap();

        assert_eq!(doc.get("name"), Some(&FieldValue::from("Ann")));
        assert_eq!(doc.get("count"), Some(&FieldValue::Integer(3)));
        assert_eq!(doc.get("ratio"), Some(&FieldValue::Double(0.5)));
        assert_eq!(doc.get("pinned"), Some(&FieldValue::Bool(true)));
        assert_eq!(doc.get("note"), Some(&FieldValue::Null));
        assert!(matches!(doc.get("timestamp"), Some(FieldValue::Timestamp(_))));
    }

    #[test]
    fn test_truthiness() {
        assert!(!FieldValue::Null.is_truthy());
        assert!(!FieldValue::from(false).is_truthy());
        assert!(!FieldValue::from("").is_truthy());
        assert!(!FieldValue::from(0).is_truthy());
        assert!(FieldValue::from(true).is_truthy());
        assert!(FieldValue::from("yes").is_truthy());
    }

    #[test]
    fn test_as_i64() {
        assert_eq!(FieldValue::from(6).as_i64(), Some(6));
        assert_eq!(FieldValue::from(6.0).as_i64(), Some(6));
        assert_eq!(FieldValue::from(6.5).as_i64(), None);
        assert_eq!(FieldValue::from("6").as_i64(), None);
    }
}
