//! Untyped SNBT values for free-form payloads such as item components.

use std::collections::BTreeMap;

/// A generic value from the relaxed text component grammar.
#[derive(Debug, Clone, PartialEq)]
pub enum SnbtValue {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    List(Vec<SnbtValue>),
    Compound(BTreeMap<String, SnbtValue>),
}

impl SnbtValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            SnbtValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_compound(&self) -> Option<&BTreeMap<String, SnbtValue>> {
        match self {
            SnbtValue::Compound(map) => Some(map),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accessors() {
        let mut map = BTreeMap::new();
        map.insert("minecraft:custom_name".to_string(), SnbtValue::String("Relic".into()));
        let value = SnbtValue::Compound(map);
        assert_eq!(
            value.as_compound().and_then(|m| m.get("minecraft:custom_name")).and_then(SnbtValue::as_str),
            Some("Relic")
        );
        assert!(SnbtValue::Int(1).as_str().is_none());
    }
}
