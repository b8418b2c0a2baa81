//! The JSON value model: [Value], [Object] and [Array]
use std::cmp::Ordering;
use std::fmt::{Display, Formatter};

use crate::codec::enquote_into;
use crate::errors::{Details, ParserResult};
use crate::value_error;

/// An array is just an ordered, owned sequence of [Value]s
pub type Array = Vec<Value>;

/// Tags for each of the different variants of [Value], used mainly within error messages
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum ValueType {
    Null,
    Integer,
    Real,
    String,
    Boolean,
    Array,
    Object,
}

impl Display for ValueType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ValueType::Null => write!(f, "null"),
            ValueType::Integer => write!(f, "integer"),
            ValueType::Real => write!(f, "real"),
            ValueType::String => write!(f, "string"),
            ValueType::Boolean => write!(f, "boolean"),
            ValueType::Array => write!(f, "array"),
            ValueType::Object => write!(f, "object"),
        }
    }
}

/// Basic enumeration of different Json values
#[derive(Debug, Clone, Default)]
pub enum Value {
    /// Canonical null value
    #[default]
    Null,
    /// Integer numeric value
    Integer(i64),
    /// Floating point numeric value
    Real(f64),
    /// Decoded string value
    String(String),
    /// Canonical boolean value
    Boolean(bool),
    /// Array of values
    Array(Array),
    /// Ordered list of named values
    Object(Object),
}

macro_rules! type_mismatch {
    ($expected: expr, $found: expr) => {
        value_error!(Details::TypeMismatch {
            expected: $expected,
            found: $found,
        })
    };
}

impl Value {
    /// The [ValueType] tag for the current variant
    pub fn value_type(&self) -> ValueType {
        match self {
            Value::Null => ValueType::Null,
            Value::Integer(_) => ValueType::Integer,
            Value::Real(_) => ValueType::Real,
            Value::String(_) => ValueType::String,
            Value::Boolean(_) => ValueType::Boolean,
            Value::Array(_) => ValueType::Array,
            Value::Object(_) => ValueType::Object,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_integer(&self) -> bool {
        matches!(self, Value::Integer(_))
    }

    pub fn is_real(&self) -> bool {
        matches!(self, Value::Real(_))
    }

    pub fn is_string(&self) -> bool {
        matches!(self, Value::String(_))
    }

    pub fn is_boolean(&self) -> bool {
        matches!(self, Value::Boolean(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, Value::Array(_))
    }

    pub fn is_object(&self) -> bool {
        matches!(self, Value::Object(_))
    }

    pub fn get_integer(&self) -> ParserResult<i64> {
        match self {
            Value::Integer(i) => Ok(*i),
            _ => type_mismatch!(ValueType::Integer, self.value_type()),
        }
    }

    /// Get the value as a real. Integers are widened, this is the only implicit conversion
    /// performed by any of the accessors
    pub fn get_real(&self) -> ParserResult<f64> {
        match self {
            Value::Real(r) => Ok(*r),
            Value::Integer(i) => Ok(*i as f64),
            _ => type_mismatch!(ValueType::Real, self.value_type()),
        }
    }

    pub fn get_string(&self) -> ParserResult<&str> {
        match self {
            Value::String(s) => Ok(s),
            _ => type_mismatch!(ValueType::String, self.value_type()),
        }
    }

    pub fn get_boolean(&self) -> ParserResult<bool> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => type_mismatch!(ValueType::Boolean, self.value_type()),
        }
    }

    pub fn get_array(&self) -> ParserResult<&Array> {
        match self {
            Value::Array(a) => Ok(a),
            _ => type_mismatch!(ValueType::Array, self.value_type()),
        }
    }

    pub fn get_array_mut(&mut self) -> ParserResult<&mut Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => type_mismatch!(ValueType::Array, other.value_type()),
        }
    }

    pub fn get_object(&self) -> ParserResult<&Object> {
        match self {
            Value::Object(o) => Ok(o),
            _ => type_mismatch!(ValueType::Object, self.value_type()),
        }
    }

    pub fn get_object_mut(&mut self) -> ParserResult<&mut Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => type_mismatch!(ValueType::Object, other.value_type()),
        }
    }

    /// Consume the value, returning the owned string payload
    pub fn into_string(self) -> ParserResult<String> {
        match self {
            Value::String(s) => Ok(s),
            other => type_mismatch!(ValueType::String, other.value_type()),
        }
    }

    /// Consume the value, returning the owned array payload
    pub fn into_array(self) -> ParserResult<Array> {
        match self {
            Value::Array(a) => Ok(a),
            other => type_mismatch!(ValueType::Array, other.value_type()),
        }
    }

    /// Consume the value, returning the owned object payload
    pub fn into_object(self) -> ParserResult<Object> {
        match self {
            Value::Object(o) => Ok(o),
            other => type_mismatch!(ValueType::Object, other.value_type()),
        }
    }

    /// Take the value out, leaving [Value::Null] in its place
    pub fn take(&mut self) -> Value {
        std::mem::take(self)
    }

    /// Render the value as compact JSON text
    pub fn to_text(&self) -> String {
        let mut buffer = String::new();
        self.write_text(&mut buffer);
        buffer
    }

    /// Render the value as compact JSON text, appending to an existing buffer
    pub fn write_text(&self, buffer: &mut String) {
        match self {
            Value::Null => buffer.push_str("null"),
            Value::Integer(i) => write_integer(*i, buffer),
            Value::Real(r) => write_real(*r, buffer),
            Value::String(s) => enquote_into(s, buffer),
            Value::Boolean(true) => buffer.push_str("true"),
            Value::Boolean(false) => buffer.push_str("false"),
            Value::Array(values) => {
                buffer.push('[');
                for (index, value) in values.iter().enumerate() {
                    if index > 0 {
                        buffer.push(',');
                    }
                    value.write_text(buffer);
                }
                buffer.push(']');
            }
            Value::Object(object) => object.write_text(buffer),
        }
    }

    /// Order two values by comparing their rendered text. This is *not* a structural
    /// comparison: `1` and `1.0` are different, and arrays compare character-wise
    pub fn compare(&self, other: &Value) -> Ordering {
        self.to_text().cmp(&other.to_text())
    }
}

/// Write an integer as an exact decimal
pub(crate) fn write_integer<N: lexical::ToLexical>(value: N, buffer: &mut String) {
    buffer.push_str(&lexical::to_string(value));
}

/// Write a real using the shortest representation which parses back to the same value.
/// JSON has no representation for NaN or infinities, so these are written as `null`
pub(crate) fn write_real<F>(value: F, buffer: &mut String)
where
    F: lexical::ToLexical + Into<f64> + Copy,
{
    if !value.into().is_finite() {
        buffer.push_str("null");
        return;
    }
    let text = lexical::to_string(value);
    buffer.push_str(&text);
    if !text.contains(['.', 'e', 'E']) {
        buffer.push_str(".0");
    }
}

impl Display for Value {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.to_text())
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Value {}

impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}

impl From<i64> for Value {
    fn from(value: i64) -> Self {
        Value::Integer(value)
    }
}

impl From<f64> for Value {
    fn from(value: f64) -> Self {
        Value::Real(value)
    }
}

impl From<&str> for Value {
    fn from(value: &str) -> Self {
        Value::String(value.to_string())
    }
}

impl From<String> for Value {
    fn from(value: String) -> Self {
        Value::String(value)
    }
}

impl From<bool> for Value {
    fn from(value: bool) -> Self {
        Value::Boolean(value)
    }
}

impl From<Array> for Value {
    fn from(value: Array) -> Self {
        Value::Array(value)
    }
}

impl From<Object> for Value {
    fn from(value: Object) -> Self {
        Value::Object(value)
    }
}

/// An ordered association list of names and [Value]s. Member order is preserved, duplicate
/// names are permitted and lookups always return the *first* matching member
#[derive(Debug, Clone, Default)]
pub struct Object {
    members: Vec<(String, Value)>,
}

impl Object {
    pub fn new() -> Self {
        Object { members: vec![] }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Object {
            members: Vec::with_capacity(capacity),
        }
    }

    /// The number of members, including any duplicates
    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    /// Append a member to the end of the object. No check is made for an existing member with
    /// the same name
    pub fn push<K: Into<String>, V: Into<Value>>(&mut self, key: K, value: V) {
        self.members.push((key.into(), value.into()))
    }

    /// Find the first member with a given name
    pub fn find(&self, key: &str) -> Option<&Value> {
        self.members
            .iter()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    /// Find the first member with a given name, returning a mutable reference
    pub fn find_mut(&mut self, key: &str) -> Option<&mut Value> {
        self.members
            .iter_mut()
            .find(|(name, _)| name == key)
            .map(|(_, value)| value)
    }

    pub fn has_member(&self, key: &str) -> bool {
        self.find(key).is_some()
    }

    /// Look up a member, failing if it doesn't exist
    pub fn member(&self, key: &str) -> ParserResult<&Value> {
        match self.find(key) {
            Some(value) => Ok(value),
            None => value_error!(Details::KeyNotFound(key.to_string())),
        }
    }

    /// Look up a member for modification. If no member exists with the given name, a new
    /// member is appended with a [Value::Null] value
    pub fn member_mut(&mut self, key: &str) -> &mut Value {
        let index = match self.members.iter().position(|(name, _)| name == key) {
            Some(index) => index,
            None => {
                self.members.push((key.to_string(), Value::Null));
                self.members.len() - 1
            }
        };
        &mut self.members[index].1
    }

    /// Remove the first member with a given name, returning its value
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        let index = self.members.iter().position(|(name, _)| name == key)?;
        Some(self.members.remove(index).1)
    }

    pub fn clear(&mut self) {
        self.members.clear()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.members.iter().map(|(name, _)| name.as_str())
    }

    pub fn iter(&self) -> std::slice::Iter<'_, (String, Value)> {
        self.members.iter()
    }

    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, (String, Value)> {
        self.members.iter_mut()
    }

    /// Render the object as compact JSON text, appending to an existing buffer
    pub fn write_text(&self, buffer: &mut String) {
        buffer.push('{');
        for (index, (name, value)) in self.members.iter().enumerate() {
            if index > 0 {
                buffer.push(',');
            }
            enquote_into(name, buffer);
            buffer.push(':');
            value.write_text(buffer);
        }
        buffer.push('}');
    }

    /// Order two objects by their rendered text, exactly as [Value::compare] does
    pub fn compare(&self, other: &Object) -> Ordering {
        let mut left = String::new();
        let mut right = String::new();
        self.write_text(&mut left);
        other.write_text(&mut right);
        left.cmp(&right)
    }
}

impl FromIterator<(String, Value)> for Object {
    fn from_iter<T: IntoIterator<Item = (String, Value)>>(iter: T) -> Self {
        Object {
            members: iter.into_iter().collect(),
        }
    }
}

impl From<Vec<(String, Value)>> for Object {
    fn from(members: Vec<(String, Value)>) -> Self {
        Object { members }
    }
}

impl IntoIterator for Object {
    type Item = (String, Value);
    type IntoIter = std::vec::IntoIter<(String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.into_iter()
    }
}

impl<'a> IntoIterator for &'a Object {
    type Item = &'a (String, Value);
    type IntoIter = std::slice::Iter<'a, (String, Value)>;

    fn into_iter(self) -> Self::IntoIter {
        self.members.iter()
    }
}

impl PartialEq for Object {
    fn eq(&self, other: &Self) -> bool {
        self.compare(other) == Ordering::Equal
    }
}

impl Eq for Object {}

impl PartialOrd for Object {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.compare(other))
    }
}

impl Ord for Object {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare(other)
    }
}
