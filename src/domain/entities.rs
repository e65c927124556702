//! Domain entities: keys and records

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Identity of a record: either an integer or a string.
///
/// Equality and hashing are value based, and the two variants never compare
/// equal: `Key::Int(1)` and `Key::Str("1")` are distinct keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Key {
    Int(i64),
    Str(String),
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Key::Int(n) => write!(f, "{}", n),
            Key::Str(s) => write!(f, "{}", s),
        }
    }
}

/// Parse a key from command-line text.
///
/// Anything that parses as `i64` becomes `Key::Int`, everything else is kept
/// verbatim as `Key::Str`.
impl FromStr for Key {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(s.parse::<i64>()
            .map(Key::Int)
            .unwrap_or_else(|_| Key::Str(s.to_string())))
    }
}

impl From<i64> for Key {
    fn from(n: i64) -> Self {
        Key::Int(n)
    }
}

impl From<i32> for Key {
    fn from(n: i32) -> Self {
        Key::Int(i64::from(n))
    }
}

impl From<&str> for Key {
    fn from(s: &str) -> Self {
        Key::Str(s.to_string())
    }
}

impl From<String> for Key {
    fn from(s: String) -> Self {
        Key::Str(s)
    }
}

/// A record in the hierarchy.
///
/// Only `id` and `parent` are interpreted; `label` is carried along untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeItem {
    pub id: Key,
    /// Parent key, `None` for roots
    #[serde(default)]
    pub parent: Option<Key>,
    pub label: String,
}

impl TreeItem {
    pub fn new(id: impl Into<Key>, parent: Option<Key>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            parent,
            label: label.into(),
        }
    }

    /// Whether this record has no parent.
    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_numeric_text_when_parsing_key_then_returns_int() {
        assert_eq!("42".parse::<Key>().unwrap(), Key::Int(42));
        assert_eq!("-7".parse::<Key>().unwrap(), Key::Int(-7));
    }

    #[test]
    fn given_other_text_when_parsing_key_then_returns_str() {
        assert_eq!(
            "91064cee".parse::<Key>().unwrap(),
            Key::Str("91064cee".to_string())
        );
        assert_eq!("".parse::<Key>().unwrap(), Key::Str(String::new()));
    }

    #[test]
    fn given_int_and_str_with_same_text_then_keys_differ() {
        assert_ne!(Key::from(1), Key::from("1"));
        assert_eq!(Key::from(1).to_string(), Key::from("1").to_string());
    }

    #[test]
    fn given_item_without_parent_then_is_root() {
        let root = TreeItem::new(1, None, "root");
        let child = TreeItem::new("a", Some(1.into()), "child");

        assert!(root.is_root());
        assert!(!child.is_root());
    }
}
