use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A dynamic value stored in a materials item field.
///
/// Materials come from spreadsheets converted to JSON, so a field holds
/// whatever the conversion produced: text, a coerced `TRUE`/`FALSE`
/// boolean, a number, or null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Null,
}

impl Value {
    /// True for null, the empty string, and NaN.
    pub fn is_empty(&self) -> bool {
        match self {
            Value::Null => true,
            Value::String(s) => s.is_empty(),
            Value::Float(f) => f.is_nan(),
            Value::Bool(_) | Value::Int(_) => false,
        }
    }

    /// Spreadsheet-style truthiness: `false`, `0`, empty text and null are
    /// false, everything else is true.
    pub fn is_truthy(&self) -> bool {
        match self {
            Value::Bool(b) => *b,
            Value::Int(i) => *i != 0,
            Value::Float(f) => *f != 0.0 && !f.is_nan(),
            Value::String(s) => !s.is_empty(),
            Value::Null => false,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Value::Bool(b) => write!(f, "{b}"),
            Value::Int(i) => write!(f, "{i}"),
            Value::Float(x) => write!(f, "{x}"),
            Value::String(s) => f.write_str(s),
            Value::Null => f.write_str("null"),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::String(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::String(s)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<i32> for Value {
    fn from(i: i32) -> Self {
        Value::Int(i64::from(i))
    }
}

/// One row of materials: field name to value.
///
/// Which fields matter depends on the experiment variant consuming the
/// item. Items are never mutated while rendering.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Item {
    pub fields: HashMap<String, Value>,
}

impl Item {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style field setter.
    pub fn with(mut self, field: &str, value: impl Into<Value>) -> Self {
        self.fields.insert(field.to_string(), value.into());
        self
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// The field's text, if it is present and a string.
    pub fn text(&self, field: &str) -> Option<&str> {
        self.fields.get(field).and_then(Value::as_str)
    }

    /// Returns true if the field is present and not empty.
    pub fn is_filled(&self, field: &str) -> bool {
        self.fields.get(field).is_some_and(|v| !v.is_empty())
    }

    /// Returns true if the materials author flagged this item for exclusion.
    pub fn is_excluded(&self) -> bool {
        self.fields.get("exclude").is_some_and(Value::is_truthy)
    }

    /// The row identifier assigned at ingestion.
    pub fn id(&self) -> Option<&Value> {
        self.fields.get("id")
    }
}

impl FromIterator<(String, Value)> for Item {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Item {
            fields: iter.into_iter().collect(),
        }
    }
}

/// A named collection of items, as stored in one materials file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MaterialsSet {
    pub name: String,
    #[serde(default)]
    pub items: Vec<Item>,
}

impl MaterialsSet {
    pub fn new(name: &str, items: Vec<Item>) -> Self {
        Self {
            name: name.to_string(),
            items,
        }
    }

    /// Parse a materials set from its JSON document.
    pub fn from_json(input: &str) -> Result<MaterialsSet, serde_json::Error> {
        serde_json::from_str(input)
    }
}

/// The two pools a trial set is drawn from.
#[derive(Debug, Clone, PartialEq)]
pub struct MaterialsBundle {
    pub experimental: MaterialsSet,
    pub fillers: MaterialsSet,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn value_emptiness() {
        assert!(Value::Null.is_empty());
        assert!(Value::from("").is_empty());
        assert!(Value::Float(f64::NAN).is_empty());
        assert!(!Value::from("bees").is_empty());
        assert!(!Value::Bool(false).is_empty());
        assert!(!Value::Int(0).is_empty());
    }

    #[test]
    fn value_truthiness() {
        assert!(Value::Bool(true).is_truthy());
        assert!(!Value::Bool(false).is_truthy());
        assert!(!Value::Int(0).is_truthy());
        assert!(Value::from("x").is_truthy());
        assert!(!Value::from("").is_truthy());
        assert!(!Value::Null.is_truthy());
        assert!(!Value::Float(f64::NAN).is_truthy());
    }

    #[test]
    fn parse_materials_json() {
        let json = r#"{
            "name": "swarm-000-base",
            "items": [
                {"id": 0, "A": "bees", "A countable?": true, "exclude": false, "L det": ""},
                {"id": 1, "A": "ants", "exclude": true, "score": 0.5, "note": null}
            ]
        }"#;
        let set = MaterialsSet::from_json(json).unwrap();
        assert_eq!(set.name, "swarm-000-base");
        assert_eq!(set.items.len(), 2);

        let first = &set.items[0];
        assert_eq!(first.id(), Some(&Value::Int(0)));
        assert_eq!(first.text("A"), Some("bees"));
        assert_eq!(first.get("A countable?"), Some(&Value::Bool(true)));
        assert!(!first.is_excluded());
        assert!(!first.is_filled("L det"));

        let second = &set.items[1];
        assert!(second.is_excluded());
        assert_eq!(second.get("score"), Some(&Value::Float(0.5)));
        assert_eq!(second.get("note"), Some(&Value::Null));
        assert!(!second.is_filled("note"));
    }

    #[test]
    fn item_builder() {
        let item = Item::new().with("A", "bees").with("id", 3).with("exclude", true);
        assert_eq!(item.text("A"), Some("bees"));
        assert!(item.is_excluded());
        assert_eq!(item.id().map(|v| v.to_string()), Some("3".to_string()));
    }
}
