use crate::store::error::{StoreError, StoreResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

/// Name of the identifier field every stored record carries
pub const ID_FIELD: &str = "_id";

/// Storage keys starting with this prefix are not collections
pub const RESERVED_KEY_PREFIX: &str = "__";

/// One stored record: a flat mapping from field name to JSON value
pub type Document = Map<String, Value>;

/// Collections used by the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CollectionName {
    Users,
    ContactRequests,
    ViewingRequests,
    Properties,
    Favorites,
}

impl CollectionName {
    pub const ALL: [CollectionName; 5] = [
        CollectionName::Users,
        CollectionName::ContactRequests,
        CollectionName::ViewingRequests,
        CollectionName::Properties,
        CollectionName::Favorites,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionName::Users => "users",
            CollectionName::ContactRequests => "contact_requests",
            CollectionName::ViewingRequests => "viewing_requests",
            CollectionName::Properties => "properties",
            CollectionName::Favorites => "favorites",
        }
    }
}

impl AsRef<str> for CollectionName {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CollectionName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exact-match constraint over record fields.
///
/// A record matches when, for every `(field, value)` pair, it has that field
/// with an equal value. An empty query matches every record. There are no
/// operators: no ranges, no regex, no `$or`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Query {
    constraints: Vec<(String, Value)>,
}

impl Query {
    pub fn new() -> Self {
        Self::default()
    }

    /// Query with no constraints
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self::new().eq(ID_FIELD, id.into())
    }

    /// Adds a constraint. A later constraint on the same field replaces the earlier one.
    pub fn eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        let field = field.into();
        let value = value.into();
        match self.constraints.iter_mut().find(|(name, _)| *name == field) {
            Some(existing) => existing.1 = value,
            None => self.constraints.push((field, value)),
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.constraints.is_empty()
    }

    pub fn constraints(&self) -> &[(String, Value)] {
        &self.constraints
    }

    pub fn matches(&self, record: &Document) -> bool {
        self.constraints.iter().all(|(field, expected)| {
            record
                .get(field)
                .is_some_and(|actual| values_equal(actual, expected))
        })
    }
}

impl From<Document> for Query {
    fn from(document: Document) -> Self {
        Self {
            constraints: document.into_iter().collect(),
        }
    }
}

/// Strict equality: same JSON type and same value.
///
/// Numbers compare by numeric value, so `2` and `2.0` are equal the way they
/// would be for a client that stores every number as a double.
pub fn values_equal(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Number(a), Value::Number(b)) => {
            if a == b {
                return true;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x == y,
                _ => false,
            }
        }
        _ => left == right,
    }
}

/// Field-set shallow-merged into a matched record (the `$set` of a document database)
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Update {
    fields: Document,
}

impl Update {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    pub fn fields(&self) -> &Document {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Merges the field-set into `record`. The identifier is never overwritten.
    pub(crate) fn apply_to(&self, record: &mut Document) {
        for (field, value) in &self.fields {
            if field == ID_FIELD {
                continue;
            }
            record.insert(field.clone(), value.clone());
        }
    }
}

impl From<Document> for Update {
    fn from(fields: Document) -> Self {
        Self { fields }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertOneResult {
    pub inserted_id: String,
    pub inserted_doc: Document,
}

/// Outcome of [`Collection::find_one_or_insert`](crate::store::Collection::find_one_or_insert)
#[derive(Debug, Clone, PartialEq)]
pub enum FindOrInsert {
    /// A record already matched; nothing was written
    Found(Document),
    Inserted(InsertOneResult),
}

#[derive(Debug, Clone, PartialEq)]
pub struct InsertManyResult {
    pub inserted_ids: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UpdateResult {
    pub modified_count: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeleteResult {
    pub deleted_count: usize,
}

/// Serializes a value into a document. The value must serialize to a JSON object.
pub fn to_document<T: Serialize + ?Sized>(value: &T) -> StoreResult<Document> {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::InvalidDocument(format!(
            "expected an object, got {}",
            json_type_name(&other)
        ))),
        Err(e) => Err(StoreError::InvalidDocument(e.to_string())),
    }
}

/// Deserializes a stored document into a typed record
pub fn from_document<T: DeserializeOwned>(document: Document) -> StoreResult<T> {
    serde_json::from_value(Value::Object(document))
        .map_err(|e| StoreError::InvalidDocument(e.to_string()))
}

fn json_type_name(value: &Value) -> &'static str {
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

    fn doc(value: Value) -> Document {
        match value {
            Value::Object(map) => map,
            _ => panic!("test document must be an object"),
        }
    }

    #[test]
    fn empty_query_matches_everything() {
        assert!(Query::all().matches(&doc(json!({"_id": "1"}))));
        assert!(Query::all().matches(&Document::new()));
    }

    #[test]
    fn every_constraint_must_hold() {
        let record = doc(json!({"_id": "1", "email": "a@x.com", "name": "Ada"}));
        assert!(Query::new().eq("email", "a@x.com").matches(&record));
        assert!(Query::new()
            .eq("email", "a@x.com")
            .eq("name", "Ada")
            .matches(&record));
        assert!(!Query::new()
            .eq("email", "a@x.com")
            .eq("name", "Bob")
            .matches(&record));
    }

    #[test]
    fn missing_field_never_matches() {
        let record = doc(json!({"_id": "1"}));
        assert!(!Query::new().eq("email", Value::Null).matches(&record));
    }

    #[test]
    fn equality_is_type_strict() {
        let record = doc(json!({"price": 900, "featured": true, "_id": "1"}));
        assert!(!Query::new().eq("price", "900").matches(&record));
        assert!(!Query::new().eq("featured", 1).matches(&record));
        assert!(!Query::new().eq("_id", 1).matches(&record));
        assert!(Query::new().eq("price", 900.0).matches(&record));
    }

    #[test]
    fn repeated_field_replaces_constraint() {
        let query = Query::new().eq("type", "rent").eq("type", "sale");
        assert_eq!(query.constraints().len(), 1);
        assert!(query.matches(&doc(json!({"type": "sale"}))));
    }

    #[test]
    fn update_never_touches_identifier() {
        let mut record = doc(json!({"_id": "1", "price": 10, "title": "a"}));
        Update::new()
            .set("_id", "other")
            .set("price", 20)
            .apply_to(&mut record);
        assert_eq!(record, doc(json!({"_id": "1", "price": 20, "title": "a"})));
    }

    #[test]
    fn to_document_rejects_non_objects() {
        assert!(matches!(
            to_document(&vec![1, 2]),
            Err(StoreError::InvalidDocument(_))
        ));
        assert!(to_document(&json!({"a": 1})).is_ok());
    }

    #[test]
    fn registry_names_are_stable() {
        let names: Vec<&str> = CollectionName::ALL.iter().map(|c| c.as_str()).collect();
        assert_eq!(
            names,
            vec![
                "users",
                "contact_requests",
                "viewing_requests",
                "properties",
                "favorites"
            ]
        );
    }
}
