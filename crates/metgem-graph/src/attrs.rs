//! Typed attribute bags attached to graphs, vertices and edges.
//!
//! GraphML restricts data values to a small scalar lattice (boolean, integral,
//! floating, string); [`AttrValue`] mirrors it so documents round-trip without a
//! schema. Bags preserve insertion order so serialized output is deterministic.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AttrValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
}

impl AttrValue {
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttrValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            AttrValue::Int(i) => Some(*i),
            _ => None,
        }
    }

    /// Numeric view; integral values widen to `f64`.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            AttrValue::Float(f) => Some(*f),
            AttrValue::Int(i) => Some(*i as f64),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            AttrValue::Str(s) => Some(s),
            _ => None,
        }
    }
}

impl From<bool> for AttrValue {
    fn from(v: bool) -> Self {
        AttrValue::Bool(v)
    }
}

impl From<i64> for AttrValue {
    fn from(v: i64) -> Self {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> Self {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> Self {
        AttrValue::Str(v.to_string())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> Self {
        AttrValue::Str(v)
    }
}

/// Insertion-ordered attribute map.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AttrBag {
    entries: IndexMap<String, AttrValue>,
}

impl AttrBag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.entries.get(key)
    }

    pub fn set(&mut self, key: impl Into<String>, value: AttrValue) {
        self.entries.insert(key.into(), value);
    }

    pub fn remove(&mut self, key: &str) -> Option<AttrValue> {
        self.entries.shift_remove(key)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Keys not reserved by the engine (no `__` prefix).
    pub fn user_keys(&self) -> impl Iterator<Item = &str> {
        self.entries
            .keys()
            .map(String::as_str)
            .filter(|k| !k.starts_with("__"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_coercion_widens_ints() {
        assert_eq!(AttrValue::Int(3).as_f64(), Some(3.0));
        assert_eq!(AttrValue::Float(1.5).as_f64(), Some(1.5));
        assert_eq!(AttrValue::Str("3".into()).as_f64(), None);
    }

    #[test]
    fn bag_preserves_insertion_order() {
        let mut bag = AttrBag::new();
        bag.set("z", AttrValue::Int(1));
        bag.set("a", AttrValue::Int(2));
        bag.set("__weight", AttrValue::Float(0.5));
        let keys: Vec<_> = bag.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["z", "a", "__weight"]);
        assert_eq!(bag.user_keys().collect::<Vec<_>>(), vec!["z", "a"]);
    }

    #[test]
    fn serde_round_trip() {
        let mut bag = AttrBag::new();
        bag.set("label", AttrValue::Str("m/z 301.2".into()));
        bag.set("charge", AttrValue::Int(1));
        let json = serde_json::to_string(&bag).unwrap();
        let back: AttrBag = serde_json::from_str(&json).unwrap();
        assert_eq!(bag, back);
    }
}
