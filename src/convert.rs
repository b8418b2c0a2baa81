//! Conversions between [Value]s and native Rust types.
//!
//! Integer conversions are range checked, so a JSON integer which doesn't fit into the target
//! width is an error rather than being silently truncated. Maps are represented as arrays of
//! `{"key":K,"value":V}` objects (matching the serializer), and a conversion into a container
//! always replaces its contents rather than merging with them.
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::{BuildHasher, Hash};

use crate::errors::{Details, ParserResult};
use crate::value::{Object, Value};
use crate::{conversion_error, value_error};

/// Types which can be built from a [Value]
pub trait FromValue: Sized {
    fn from_value(value: &Value) -> ParserResult<Self>;

    /// Build from an owned value. Strings and containers move their contents out rather than
    /// cloning them
    fn from_owned(value: Value) -> ParserResult<Self> {
        Self::from_value(&value)
    }
}

/// Types which can be converted into a [Value]
pub trait ToValue {
    fn to_value(&self) -> Value;
}

/// Convert a value into a native type, replacing the current contents of `destination`.
/// On failure `destination` is left untouched
pub fn value_to_native<T: FromValue>(value: &Value, destination: &mut T) -> ParserResult<()> {
    *destination = T::from_value(value)?;
    Ok(())
}

/// Consume a value, converting it into a native type
pub fn value_into_native<T: FromValue>(value: Value) -> ParserResult<T> {
    T::from_owned(value)
}

/// Convert a native type into a new value
pub fn native_to_value<T: ToValue + ?Sized>(native: &T) -> Value {
    native.to_value()
}

impl Object {
    /// Look up and convert a required member. Conversion failures are wrapped with the name of
    /// the member
    pub fn required<T: FromValue>(&self, key: &str) -> ParserResult<T> {
        let value = self.member(key)?;
        T::from_value(value).map_err(|err| err.in_member(key))
    }

    /// Look up and convert an optional member. A missing member and a `null` member both
    /// produce [None]
    pub fn optional<T: FromValue>(&self, key: &str) -> ParserResult<Option<T>> {
        match self.find(key) {
            None | Some(Value::Null) => Ok(None),
            Some(value) => T::from_value(value)
                .map(Some)
                .map_err(|err| err.in_member(key)),
        }
    }
}

impl FromValue for Value {
    fn from_value(value: &Value) -> ParserResult<Self> {
        Ok(value.clone())
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        Ok(value)
    }
}

impl ToValue for Value {
    fn to_value(&self) -> Value {
        self.clone()
    }
}

impl FromValue for bool {
    fn from_value(value: &Value) -> ParserResult<Self> {
        value.get_boolean()
    }
}

impl ToValue for bool {
    fn to_value(&self) -> Value {
        Value::Boolean(*self)
    }
}

macro_rules! integer_from_value {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn from_value(value: &Value) -> ParserResult<Self> {
                    let integer = value.get_integer()?;
                    match <$t>::try_from(integer) {
                        Ok(narrowed) => Ok(narrowed),
                        Err(_) => conversion_error!(Details::OutOfRange {
                            value: integer.to_string(),
                            target: stringify!($t),
                        }),
                    }
                }
            }
        )*
    };
}

integer_from_value!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);

macro_rules! integer_to_value {
    ($($t:ty),*) => {
        $(
            impl ToValue for $t {
                fn to_value(&self) -> Value {
                    Value::Integer(i64::from(*self))
                }
            }
        )*
    };
}

integer_to_value!(i8, i16, i32, i64, u8, u16, u32);

impl ToValue for isize {
    fn to_value(&self) -> Value {
        Value::Integer(*self as i64)
    }
}

impl FromValue for f64 {
    fn from_value(value: &Value) -> ParserResult<Self> {
        value.get_real()
    }
}

impl ToValue for f64 {
    fn to_value(&self) -> Value {
        Value::Real(*self)
    }
}

impl FromValue for f32 {
    fn from_value(value: &Value) -> ParserResult<Self> {
        let real = value.get_real()?;
        let narrowed = real as f32;
        if real.is_finite() && !narrowed.is_finite() {
            return conversion_error!(Details::OutOfRange {
                value: real.to_string(),
                target: "f32",
            });
        }
        Ok(narrowed)
    }
}

impl ToValue for f32 {
    fn to_value(&self) -> Value {
        Value::Real(f64::from(*self))
    }
}

impl FromValue for String {
    fn from_value(value: &Value) -> ParserResult<Self> {
        Ok(value.get_string()?.to_string())
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        value.into_string()
    }
}

impl ToValue for String {
    fn to_value(&self) -> Value {
        Value::String(self.clone())
    }
}

impl ToValue for str {
    fn to_value(&self) -> Value {
        Value::String(self.to_string())
    }
}

impl<T: ToValue + ?Sized> ToValue for &T {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FromValue> FromValue for Box<T> {
    fn from_value(value: &Value) -> ParserResult<Self> {
        T::from_value(value).map(Box::new)
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        T::from_owned(value).map(Box::new)
    }
}

impl<T: ToValue + ?Sized> ToValue for Box<T> {
    fn to_value(&self) -> Value {
        (**self).to_value()
    }
}

impl<T: FromValue> FromValue for Option<T> {
    fn from_value(value: &Value) -> ParserResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other).map(Some),
        }
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        match value {
            Value::Null => Ok(None),
            other => T::from_owned(other).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self) -> Value {
        match self {
            Some(native) => native.to_value(),
            None => Value::Null,
        }
    }
}

impl<T: FromValue> FromValue for Vec<T> {
    fn from_value(value: &Value) -> ParserResult<Self> {
        value.get_array()?.iter().map(T::from_value).collect()
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        value.into_array()?.into_iter().map(T::from_owned).collect()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self) -> Value {
        self.as_slice().to_value()
    }
}

impl<T: ToValue> ToValue for [T] {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

impl<T: FromValue> FromValue for VecDeque<T> {
    fn from_value(value: &Value) -> ParserResult<Self> {
        value.get_array()?.iter().map(T::from_value).collect()
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        value.into_array()?.into_iter().map(T::from_owned).collect()
    }
}

impl<T: ToValue> ToValue for VecDeque<T> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(ToValue::to_value).collect())
    }
}

/// Build a `{"key":K,"value":V}` object
fn pair_to_value<K: ToValue + ?Sized, V: ToValue + ?Sized>(key: &K, value: &V) -> Value {
    let mut object = Object::with_capacity(2);
    object.push("key", key.to_value());
    object.push("value", value.to_value());
    Value::Object(object)
}

impl<K: FromValue, V: FromValue> FromValue for (K, V) {
    fn from_value(value: &Value) -> ParserResult<Self> {
        let object = value.get_object()?;
        if object.len() != 2 {
            return conversion_error!(Details::InvalidPair(object.len()));
        }
        Ok((object.required("key")?, object.required("value")?))
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        let mut object = value.into_object()?;
        if object.len() != 2 {
            return conversion_error!(Details::InvalidPair(object.len()));
        }
        Ok((
            take_member(&mut object, "key")?,
            take_member(&mut object, "value")?,
        ))
    }
}

/// Move a member out of an object and convert it, adding member context on failure
fn take_member<T: FromValue>(object: &mut Object, key: &str) -> ParserResult<T> {
    match object.remove(key) {
        Some(value) => T::from_owned(value).map_err(|err| err.in_member(key)),
        None => value_error!(Details::KeyNotFound(key.to_string())),
    }
}

impl<K: ToValue, V: ToValue> ToValue for (K, V) {
    fn to_value(&self) -> Value {
        pair_to_value(&self.0, &self.1)
    }
}

impl<K: FromValue + Ord, V: FromValue> FromValue for BTreeMap<K, V> {
    fn from_value(value: &Value) -> ParserResult<Self> {
        value
            .get_array()?
            .iter()
            .map(<(K, V)>::from_value)
            .collect()
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        value
            .into_array()?
            .into_iter()
            .map(<(K, V)>::from_owned)
            .collect()
    }
}

impl<K: ToValue, V: ToValue> ToValue for BTreeMap<K, V> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(|(k, v)| pair_to_value(k, v)).collect())
    }
}

impl<K, V, S> FromValue for HashMap<K, V, S>
where
    K: FromValue + Eq + Hash,
    V: FromValue,
    S: BuildHasher + Default,
{
    fn from_value(value: &Value) -> ParserResult<Self> {
        value
            .get_array()?
            .iter()
            .map(<(K, V)>::from_value)
            .collect()
    }

    fn from_owned(value: Value) -> ParserResult<Self> {
        value
            .into_array()?
            .into_iter()
            .map(<(K, V)>::from_owned)
            .collect()
    }
}

impl<K: ToValue, V: ToValue, S> ToValue for HashMap<K, V, S> {
    fn to_value(&self) -> Value {
        Value::Array(self.iter().map(|(k, v)| pair_to_value(k, v)).collect())
    }
}
