//! A JSON value model together with a recursive-descent parser, a compact serializer, a string
//! escape codec and a typed conversion layer.
//!
//! Parsing produces a fully owned [Value] tree:
//!
//! ```
//! use chisel_json_value::parse_document;
//!
//! let parsed = parse_document(r#"{"x": [1, 2.5, "s", true, null], "y": {}}"#).unwrap();
//! let x = parsed.get_object().unwrap().member("x").unwrap();
//! assert_eq!(x.get_array().unwrap().len(), 5);
//! assert_eq!(parsed.to_text(), r#"{"x":[1,2.5,"s",true,null],"y":{}}"#);
//! ```
//!
//! Native types move in and out of the value model through the [FromValue] and [ToValue]
//! traits, and may be written straight to JSON text through [ToJson].
pub mod codec;
pub mod convert;
pub mod coords;
pub mod decoders;
pub mod errors;
pub mod lexer;
pub mod parser;
pub mod scanner;
pub mod serializer;
#[cfg(test)]
mod test_macros;
pub mod value;

pub use codec::{enquote, escape, unescape};
pub use convert::{native_to_value, value_into_native, value_to_native, FromValue, ToValue};
pub use decoders::Encoding;
pub use errors::{Details, Error, ParserResult, Stage};
pub use parser::{Parser, DEFAULT_MAX_DEPTH};
pub use serializer::{to_json, value_to_json, ToJson};
pub use value::{Array, Object, Value, ValueType};

/// Parse a document using a default [Parser]. The root must be an object or an array
pub fn parse_document(str: &str) -> ParserResult<Value> {
    Parser::default().parse_str(str)
}

/// Parse any single JSON value (including bare scalars) using a default [Parser]
pub fn parse_value(str: &str) -> ParserResult<Value> {
    Parser::default().parse_value(&mut str.chars())
}

/// Parse a UTF-8 encoded document using a default [Parser]
pub fn parse_bytes(bytes: &[u8]) -> ParserResult<Value> {
    Parser::default().parse_bytes(bytes)
}

/// Parse a document, collapsing any failure into [Value::Null]. Prefer [parse_document], which
/// reports what went wrong
pub fn parse_or_null(str: &str) -> Value {
    parse_document(str).unwrap_or_default()
}

/// Render a value as compact JSON text
pub fn to_text(value: &Value) -> String {
    value.to_text()
}
