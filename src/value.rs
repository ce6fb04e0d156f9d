/*!
# Value Tree

Defines the typed tree produced by the parser. Objects keep their entries in
source order, duplicates included, so that a parsed document serializes back
to the same shape it was read from.
*/
use serde::ser::{
    Error as _, Serialize, SerializeMap, SerializeSeq, Serializer,
};
use std::fmt;

/// A parsed JSON value.
#[derive(PartialEq, Debug, Clone)]
pub enum Value {
    /// Key/value entries in source order. Keys are not deduplicated.
    Object(Vec<(String, Value)>),
    /// Ordered sequence of values
    Array(Vec<Value>),
    /// Decoded string payload
    String(String),
    /// Numeric literal and its parsed value
    Number(Number),
    /// `true` or `false`
    Boolean(bool),
    /// `null`
    Null,
}

/// A number as written in the source, plus its floating point value.
#[derive(PartialEq, Debug, Clone)]
pub struct Number {
    literal: String,
    value: f64,
}

impl Number {
    /// Construct a number from its source text and parsed value.
    pub fn new<T: Into<String>>(literal: T, value: f64) -> Self {
        Self {
            literal: literal.into(),
            value,
        }
    }

    /// The number exactly as it appeared in the input.
    #[must_use]
    pub fn literal(&self) -> &str {
        &self.literal
    }

    /// The parsed value.
    #[must_use]
    pub const fn as_f64(&self) -> f64 {
        self.value
    }

    /// The value as a signed integer, if the literal is written as one and
    /// fits.
    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        self.literal.parse().ok()
    }

    /// The value as an unsigned integer, if the literal is written as one
    /// and fits.
    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        self.literal.parse().ok()
    }
}

impl fmt::Display for Number {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.literal)
    }
}

impl Value {
    /// Compute the depth of the value tree. Leaves have depth 1.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Object(entries) => {
                let inner_depth =
                    entries.iter().map(|(_, v)| v.depth()).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::Array(arr) => {
                let inner_depth = arr.iter().map(Self::depth).max().unwrap_or(0);
                1 + inner_depth
            }
            Self::String(_) | Self::Number(_) | Self::Boolean(_) | Self::Null => 1,
        }
    }

    /// Name of the variant, e.g. `"object"`.
    #[must_use]
    pub const fn kind_name(&self) -> &'static str {
        match self {
            Self::Object(_) => "object",
            Self::Array(_) => "array",
            Self::String(_) => "string",
            Self::Number(_) => "number",
            Self::Boolean(_) => "boolean",
            Self::Null => "null",
        }
    }

    /// Iterate over the direct children of a container. Leaves have none.
    pub fn children(&self) -> Box<dyn Iterator<Item = &Self> + '_> {
        match self {
            Self::Object(entries) => Box::new(entries.iter().map(|(_, v)| v)),
            Self::Array(items) => Box::new(items.iter()),
            _ => Box::new(std::iter::empty()),
        }
    }

    /// Look up the first entry with the given key in an object.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Self> {
        match self {
            Self::Object(entries) => {
                entries.iter().find(|(k, _)| k == key).map(|(_, v)| v)
            }
            _ => None,
        }
    }

    /// Look up an element of an array by position.
    #[must_use]
    pub fn index(&self, idx: usize) -> Option<&Self> {
        match self {
            Self::Array(items) => items.get(idx),
            _ => None,
        }
    }

    /// The entries of an object.
    #[must_use]
    pub fn as_object(&self) -> Option<&[(String, Self)]> {
        match self {
            Self::Object(entries) => Some(entries),
            _ => None,
        }
    }

    /// The elements of an array.
    #[must_use]
    pub fn as_array(&self) -> Option<&[Self]> {
        match self {
            Self::Array(items) => Some(items),
            _ => None,
        }
    }

    /// The payload of a string.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The numeric value of a number.
    #[must_use]
    pub const fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    /// The value of a boolean.
    #[must_use]
    pub const fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Whether this is `null`.
    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Convert to pretty-printed JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json_pretty(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Convert to compact JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails, including for numbers that
    /// overflow `f64` (e.g. `1e999`). [`Display`](fmt::Display) renders those
    /// losslessly from their literal text.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

impl Serialize for Number {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if !self.value.is_finite() {
            // NOTE: serializers write non-finite floats as `null`, which
            // would silently replace the number
            return Err(S::Error::custom(format!(
                "number {} is out of range for a 64-bit float",
                self.literal
            )));
        }
        if self.value == 0.0 && self.value.is_sign_negative() {
            serializer.serialize_f64(self.value)
        } else if let Some(i) = self.as_i64() {
            serializer.serialize_i64(i)
        } else if let Some(u) = self.as_u64() {
            serializer.serialize_u64(u)
        } else {
            serializer.serialize_f64(self.value)
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Object(entries) => {
                // NOTE: serialized entry by entry so that source order and
                // duplicate keys survive
                let mut map = serializer.serialize_map(Some(entries.len()))?;
                for (key, value) in entries {
                    map.serialize_entry(key, value)?;
                }
                map.end()
            }
            Self::Array(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Self::String(s) => serializer.serialize_str(s),
            Self::Number(n) => n.serialize(serializer),
            Self::Boolean(b) => serializer.serialize_bool(*b),
            Self::Null => serializer.serialize_unit(),
        }
    }
}

impl fmt::Display for Value {
    /// Formats the value as compact JSON, numbers written as in the source.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Object(entries) => {
                f.write_str("{")?;
                for (i, (key, value)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write_quoted(f, key)?;
                    write!(f, ":{value}")?;
                }
                f.write_str("}")
            }
            Self::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            Self::String(s) => write_quoted(f, s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
            Self::Null => f.write_str("null"),
        }
    }
}

fn write_quoted(f: &mut fmt::Formatter<'_>, s: &str) -> fmt::Result {
    let quoted = serde_json::to_string(s).map_err(|_| fmt::Error)?;
    f.write_str(&quoted)
}

/// The result of parsing one document: a single top-level value.
#[derive(PartialEq, Debug, Clone)]
pub struct Program {
    /// The top-level value of the document
    pub root_value: Value,
}

impl Program {
    /// Take ownership of the root value.
    #[must_use]
    pub fn into_value(self) -> Value {
        self.root_value
    }
}
