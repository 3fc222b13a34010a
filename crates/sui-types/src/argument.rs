//! Raw form input and encoded call arguments.

use serde::{Deserialize, Serialize};

use crate::normalized::ScalarWidth;

/// User-supplied value for one parameter slot.
///
/// Vector slots carry one string per element. Vectors of vectors are not
/// representable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawInput {
    Single(String),
    Many(Vec<String>),
}

impl RawInput {
    pub fn as_single(&self) -> Option<&str> {
        match self {
            RawInput::Single(s) => Some(s),
            RawInput::Many(_) => None,
        }
    }

    pub fn as_many(&self) -> Option<&[String]> {
        match self {
            RawInput::Single(_) => None,
            RawInput::Many(items) => Some(items),
        }
    }
}

impl From<&str> for RawInput {
    fn from(s: &str) -> Self {
        RawInput::Single(s.to_string())
    }
}

impl From<String> for RawInput {
    fn from(s: String) -> Self {
        RawInput::Single(s)
    }
}

impl From<Vec<&str>> for RawInput {
    fn from(items: Vec<&str>) -> Self {
        RawInput::Many(items.into_iter().map(String::from).collect())
    }
}

impl From<Vec<String>> for RawInput {
    fn from(items: Vec<String>) -> Self {
        RawInput::Many(items)
    }
}

/// Type-directed encoding of one argument, before slot allocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum EncodedArgument {
    /// Scalar pure value of the declared width.
    Pure { width: ScalarWidth, raw: String },
    /// Vector argument. `element_width` is `None` when the elements are
    /// objects, in which case each element is allocated on its own.
    PureVector {
        element_width: Option<ScalarWidth>,
        elements: Vec<EncodedArgument>,
    },
    /// Object passed by identifier; ownership and mutability are resolved
    /// later from on-chain metadata.
    ObjectRef { id: String },
}

impl EncodedArgument {
    pub fn is_object(&self) -> bool {
        matches!(self, EncodedArgument::ObjectRef { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_input_json_shapes() {
        let single: RawInput = serde_json::from_str("\"42\"").unwrap();
        assert_eq!(single, RawInput::from("42"));

        let many: RawInput = serde_json::from_str("[\"1\", \"2\"]").unwrap();
        assert_eq!(many.as_many().map(|m| m.len()), Some(2));
        assert!(many.as_single().is_none());
    }

    #[test]
    fn test_encoded_argument_serializes_tagged() {
        let arg = EncodedArgument::PureVector {
            element_width: Some(ScalarWidth::U8),
            elements: vec![EncodedArgument::Pure {
                width: ScalarWidth::U8,
                raw: "7".into(),
            }],
        };
        let json = serde_json::to_value(&arg).unwrap();
        assert_eq!(json["kind"], "pure_vector");
        assert_eq!(json["element_width"], "U8");
        assert!(!arg.is_object());
    }
}
