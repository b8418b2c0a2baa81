//! Serialization of values (and native Rust types) into compact JSON text.
//!
//! Every fragment may optionally be framed with a member name, producing `"name":value`, which
//! is how struct fields are written out by binding code sitting on top of this module. Sequences
//! are written as arrays, and key/value maps are written as arrays of `{"key":K,"value":V}`
//! objects so that keys are not restricted to strings.
use std::collections::{BTreeMap, HashMap, VecDeque};
use std::hash::BuildHasher;

use crate::codec::enquote_into;
use crate::value::{write_integer, write_real, Object, Value};

/// Types which are able to write themselves as a JSON fragment
pub trait ToJson {
    /// Append the JSON representation of `self` to a buffer
    fn write_json(&self, buffer: &mut String);
}

/// Render a value as JSON, prefixed with `"name":` when `name` is non-empty
pub fn value_to_json<T: ToJson + ?Sized>(name: &str, value: &T) -> String {
    let mut buffer = String::new();
    write_named(name, value, &mut buffer);
    buffer
}

/// Render a value as JSON, with no name prefix
pub fn to_json<T: ToJson + ?Sized>(value: &T) -> String {
    value_to_json("", value)
}

/// Append a value to a buffer, prefixed with `"name":` when `name` is non-empty
pub fn write_named<T: ToJson + ?Sized>(name: &str, value: &T, buffer: &mut String) {
    if !name.is_empty() {
        enquote_into(name, buffer);
        buffer.push(':');
    }
    value.write_json(buffer);
}

/// Write a sequence of elements as a JSON array
fn write_sequence<'a, T, I>(elements: I, buffer: &mut String)
where
    T: ToJson + 'a + ?Sized,
    I: IntoIterator<Item = &'a T>,
{
    buffer.push('[');
    for (index, element) in elements.into_iter().enumerate() {
        if index > 0 {
            buffer.push(',');
        }
        element.write_json(buffer);
    }
    buffer.push(']');
}

/// Write a single key/value pair as a `{"key":K,"value":V}` object
fn write_pair<K: ToJson + ?Sized, V: ToJson + ?Sized>(key: &K, value: &V, buffer: &mut String) {
    buffer.push('{');
    write_named("key", key, buffer);
    buffer.push(',');
    write_named("value", value, buffer);
    buffer.push('}');
}

/// Write a map as an array of key/value pair objects
fn write_map<'a, K, V, I>(entries: I, buffer: &mut String)
where
    K: ToJson + 'a,
    V: ToJson + 'a,
    I: IntoIterator<Item = (&'a K, &'a V)>,
{
    buffer.push('[');
    for (index, (key, value)) in entries.into_iter().enumerate() {
        if index > 0 {
            buffer.push(',');
        }
        write_pair(key, value, buffer);
    }
    buffer.push(']');
}

impl ToJson for Value {
    fn write_json(&self, buffer: &mut String) {
        self.write_text(buffer)
    }
}

impl ToJson for Object {
    fn write_json(&self, buffer: &mut String) {
        self.write_text(buffer)
    }
}

impl ToJson for bool {
    fn write_json(&self, buffer: &mut String) {
        buffer.push_str(if *self { "true" } else { "false" })
    }
}

macro_rules! integer_to_json {
    ($($t:ty),*) => {
        $(
            impl ToJson for $t {
                fn write_json(&self, buffer: &mut String) {
                    write_integer(*self, buffer)
                }
            }
        )*
    };
}

integer_to_json!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl ToJson for f32 {
    fn write_json(&self, buffer: &mut String) {
        write_real(*self, buffer)
    }
}

impl ToJson for f64 {
    fn write_json(&self, buffer: &mut String) {
        write_real(*self, buffer)
    }
}

impl ToJson for str {
    fn write_json(&self, buffer: &mut String) {
        enquote_into(self, buffer)
    }
}

impl ToJson for String {
    fn write_json(&self, buffer: &mut String) {
        enquote_into(self, buffer)
    }
}

impl<T: ToJson + ?Sized> ToJson for &T {
    fn write_json(&self, buffer: &mut String) {
        (**self).write_json(buffer)
    }
}

impl<T: ToJson + ?Sized> ToJson for Box<T> {
    fn write_json(&self, buffer: &mut String) {
        (**self).write_json(buffer)
    }
}

impl<T: ToJson> ToJson for Option<T> {
    fn write_json(&self, buffer: &mut String) {
        match self {
            Some(value) => value.write_json(buffer),
            None => buffer.push_str("null"),
        }
    }
}

impl<T: ToJson> ToJson for [T] {
    fn write_json(&self, buffer: &mut String) {
        write_sequence(self.iter(), buffer)
    }
}

impl<T: ToJson, const N: usize> ToJson for [T; N] {
    fn write_json(&self, buffer: &mut String) {
        write_sequence(self.iter(), buffer)
    }
}

impl<T: ToJson> ToJson for Vec<T> {
    fn write_json(&self, buffer: &mut String) {
        write_sequence(self.iter(), buffer)
    }
}

impl<T: ToJson> ToJson for VecDeque<T> {
    fn write_json(&self, buffer: &mut String) {
        write_sequence(self.iter(), buffer)
    }
}

impl<K: ToJson, V: ToJson> ToJson for BTreeMap<K, V> {
    fn write_json(&self, buffer: &mut String) {
        write_map(self.iter(), buffer)
    }
}

impl<K: ToJson, V: ToJson, S: BuildHasher> ToJson for HashMap<K, V, S> {
    fn write_json(&self, buffer: &mut String) {
        write_map(self.iter(), buffer)
    }
}

impl<K: ToJson, V: ToJson> ToJson for (K, V) {
    fn write_json(&self, buffer: &mut String) {
        write_pair(&self.0, &self.1, buffer)
    }
}
