//! Shortcode parameter parsing.
//!
//! Parameters are `key="value"` or `key='value'` pairs. Values are kept
//! exactly as written, except that `true`/`false` (any case) become
//! booleans. Anything that is not a well-formed pair is skipped.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use serde::ser::SerializeMap;

/// `key="value"` or `key='value'`. There is no escape syntax: a value ends
/// at the first quote matching the opening one.
static PARAM_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r#"(\w+)=(?:"([^"]*)"|'([^']*)')"#).unwrap());

/// A single parameter value.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum ParamValue {
    Bool(bool),
    String(String),
}

impl ParamValue {
    /// Coerce a raw quoted value.
    pub fn from_raw(raw: &str) -> Self {
        if raw.eq_ignore_ascii_case("true") {
            ParamValue::Bool(true)
        } else if raw.eq_ignore_ascii_case("false") {
            ParamValue::Bool(false)
        } else {
            ParamValue::String(raw.to_string())
        }
    }
}

#[cfg(test)]
impl ParamValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ParamValue::String(s) => Some(s),
            ParamValue::Bool(_) => None,
        }
    }
}

impl From<&str> for ParamValue {
    fn from(s: &str) -> Self {
        ParamValue::String(s.to_string())
    }
}

impl From<bool> for ParamValue {
    fn from(b: bool) -> Self {
        ParamValue::Bool(b)
    }
}

/// Parameters of one invocation.
///
/// Keys keep the position of their first occurrence; a repeated key
/// overwrites the earlier value. Serializes as a map, which is how
/// templates see it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParamSet {
    entries: Vec<(String, ParamValue)>,
}

impl ParamSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, overwriting any previous value for the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<ParamValue>) {
        let key = key.into();
        let value = value.into();
        match self.entries.iter_mut().find(|(k, _)| *k == key) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((key, value)),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &ParamValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
impl ParamSet {
    pub fn get(&self, key: &str) -> Option<&ParamValue> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}

impl Serialize for ParamSet {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.len()))?;
        for (key, value) in self.iter() {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

/// Parse the raw attribute text of an invocation.
pub fn parse_params(raw: &str) -> ParamSet {
    let mut params = ParamSet::new();
    for caps in PARAM_PATTERN.captures_iter(raw) {
        let key = &caps[1];
        let value = caps
            .get(2)
            .or_else(|| caps.get(3))
            .map(|m| m.as_str())
            .unwrap_or_default();
        params.insert(key, ParamValue::from_raw(value));
    }
    params
}
