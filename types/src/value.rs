//! Scalar values carried by filter requests and bound as query parameters.

/// A bindable scalar value.
///
/// Filter requests arrive as loosely typed documents, so the value set is kept
/// to what every supported dialect can bind directly.
#[derive(Debug, Clone, PartialEq, PartialOrd, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum Value {
    /// NULL value
    #[default]
    Null,
    /// Boolean value
    Bool(bool),
    /// Integer value (i64)
    Integer(i64),
    /// Real value (f64)
    Real(f64),
    /// Text value
    Text(String),
}

impl Value {
    /// Returns true if this value is NULL.
    #[inline]
    pub const fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    /// Returns the text value if this is TEXT.
    #[inline]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(value) => Some(value.as_str()),
            _ => None,
        }
    }

    /// Returns the integer value if this is an INTEGER.
    #[inline]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(value) => Some(*value),
            _ => None,
        }
    }

    /// If this is text starting with `marker`, returns the remainder as a new value.
    ///
    /// ```
    /// use sieve_types::Value;
    ///
    /// let v = Value::from("!banned");
    /// assert_eq!(v.strip_marker("!"), Some(Value::from("banned")));
    /// assert_eq!(Value::from("active").strip_marker("!"), None);
    /// ```
    pub fn strip_marker(&self, marker: &str) -> Option<Value> {
        if marker.is_empty() {
            return None;
        }
        self.as_str()
            .and_then(|s| s.strip_prefix(marker))
            .map(|rest| Value::Text(rest.to_string()))
    }
}

impl core::fmt::Display for Value {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Value::Null => f.write_str("NULL"),
            Value::Bool(b) => write!(f, "{b}"),
            Value::Integer(i) => write!(f, "{i}"),
            Value::Real(r) => write!(f, "{r}"),
            Value::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::Text(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::Text(value)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<i32> for Value {
    fn from(value: i32) -> Self {
        Value::Integer(i64::from(value))
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Bool(value)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(value: Option<T>) -> Self {
        value.map_or(Value::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strip_marker_only_applies_to_text() {
        assert_eq!(Value::from(3).strip_marker("!"), None);
        assert_eq!(Value::from("!").strip_marker("!"), Some(Value::from("")));
        assert_eq!(Value::from("!x").strip_marker(""), None);
    }

    #[test]
    fn display_is_unquoted() {
        assert_eq!(Value::from("abc").to_string(), "abc");
        assert_eq!(Value::Null.to_string(), "NULL");
        assert_eq!(Value::from(1.5).to_string(), "1.5");
    }

    #[cfg(feature = "serde")]
    #[test]
    fn deserializes_json_scalars() {
        let values: Vec<Value> = serde_json::from_str(r#"["a", 1, 2.5, true, null]"#).unwrap();
        assert_eq!(
            values,
            vec![
                Value::from("a"),
                Value::Integer(1),
                Value::Real(2.5),
                Value::Bool(true),
                Value::Null,
            ]
        );
    }
}
