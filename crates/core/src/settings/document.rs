//! JSON-backed settings document with path addressing.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A course's settings document.
///
/// Values are addressed by key paths such as
/// `["course_leaderboard_component", "group_leaderboard", "title"]`.
/// Writing `None` removes the key so the reader's default applies again.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SettingsDocument(Value);

impl Default for SettingsDocument {
    fn default() -> Self {
        Self(Value::Object(Map::new()))
    }
}

impl SettingsDocument {
    /// Wrap a stored document. Anything that is not a JSON object is treated
    /// as empty.
    pub fn from_value(value: Value) -> Self {
        if value.is_object() {
            Self(value)
        } else {
            Self::default()
        }
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    pub fn into_value(self) -> Value {
        self.0
    }

    pub fn get(&self, path: &[&str]) -> Option<&Value> {
        path.iter()
            .try_fold(&self.0, |node, key| node.get(*key))
            .filter(|value| !value.is_null())
    }

    pub fn get_str(&self, path: &[&str]) -> Option<&str> {
        self.get(path).and_then(Value::as_str)
    }

    pub fn get_i64(&self, path: &[&str]) -> Option<i64> {
        self.get(path).and_then(Value::as_i64)
    }

    pub fn get_bool(&self, path: &[&str]) -> Option<bool> {
        self.get(path).and_then(Value::as_bool)
    }

    /// Set or (with `None`) remove the value at `path`, creating intermediate
    /// objects as needed.
    pub fn set(&mut self, path: &[&str], value: Option<Value>) {
        let Some((last, parents)) = path.split_last() else {
            return;
        };

        let mut node = &mut self.0;
        for key in parents {
            let object = ensure_object(node);
            node = object
                .entry((*key).to_string())
                .or_insert_with(|| Value::Object(Map::new()));
        }

        let object = ensure_object(node);
        match value {
            Some(value) => {
                object.insert((*last).to_string(), value);
            }
            None => {
                object.remove(*last);
            }
        }
    }
}

fn ensure_object(node: &mut Value) -> &mut Map<String, Value> {
    if !node.is_object() {
        *node = Value::Object(Map::new());
    }
    match node {
        Value::Object(map) => map,
        _ => unreachable!("node was just replaced with an object"),
    }
}

/// Cast a form-style value to a boolean.
///
/// Check boxes and selects submit `"0"`/`"1"`, `"true"`/`"false"`,
/// `"on"`/`"off"` and similar. Blank strings and `null` mean "not given".
pub fn cast_boolean(value: &Value) -> Option<bool> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(*b),
        Value::Number(n) => Some(n.as_f64().is_some_and(|f| f != 0.0)),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                return None;
            }
            let falsy = ["0", "f", "false", "off", "n", "no"];
            Some(!falsy.iter().any(|f| s.eq_ignore_ascii_case(f)))
        }
        Value::Array(_) | Value::Object(_) => Some(true),
    }
}
