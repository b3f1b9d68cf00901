use serde_json::Value;

/// The raw value of a form field, before it is known to be usable text
#[derive(Debug, Clone, PartialEq)]
pub enum FormValue {
    /// The field was not filled in, or held a falsy value
    Absent,
    Text(String),
    /// A value that is neither absent nor text, named by its type
    Other(&'static str),
}

impl FormValue {
    /// Returns true if the field is absent or empty
    pub fn is_missing(&self) -> bool {
        match self {
            FormValue::Absent => true,
            FormValue::Text(text) => text.is_empty(),
            FormValue::Other(_) => false,
        }
    }
}

impl From<&str> for FormValue {
    fn from(value: &str) -> Self {
        FormValue::Text(value.to_string())
    }
}

impl From<String> for FormValue {
    fn from(value: String) -> Self {
        FormValue::Text(value)
    }
}

impl From<&String> for FormValue {
    fn from(value: &String) -> Self {
        FormValue::Text(value.clone())
    }
}

impl<T> From<Option<T>> for FormValue
where
    T: Into<FormValue>,
{
    fn from(value: Option<T>) -> Self {
        value.map_or(FormValue::Absent, Into::into)
    }
}

impl From<Value> for FormValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null | Value::Bool(false) => FormValue::Absent,
            Value::Number(n) if n.as_f64() == Some(0.0) => FormValue::Absent,
            Value::String(text) => FormValue::Text(text),
            Value::Bool(true) => FormValue::Other("boolean"),
            Value::Number(_) => FormValue::Other("number"),
            Value::Array(_) => FormValue::Other("array"),
            Value::Object(_) => FormValue::Other("object"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_values() {
        assert_eq!(FormValue::from(json!(null)), FormValue::Absent);
        assert_eq!(FormValue::from(json!(0)), FormValue::Absent);
        assert_eq!(FormValue::from(json!(false)), FormValue::Absent);
        assert_eq!(FormValue::from(json!("alice")), FormValue::from("alice"));
        assert_eq!(FormValue::from(json!(42)), FormValue::Other("number"));
        assert_eq!(FormValue::from(json!(["a"])), FormValue::Other("array"));
    }

    #[test]
    fn test_missing() {
        assert!(FormValue::from("").is_missing());
        assert!(FormValue::from(None::<&str>).is_missing());
        assert!(!FormValue::from("   ").is_missing());
        assert!(!FormValue::Other("number").is_missing());
    }
}
