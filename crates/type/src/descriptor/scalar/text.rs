// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! String and byte-buffer descriptors.
//!
//! All three store their content verbatim, so unsigned byte order is the
//! value order and the zero-length serialization doubles as the empty
//! value.

use crate::descriptor::scalar::mismatch;
use crate::descriptor::{Kind, TypeDescriptor};
use crate::error::{Result, TypeError};
use crate::format::SerializationFormat;
use crate::value::emptyable::Emptyable;
use crate::value::native::{Ascii, NativeValue};

fn to_hex(bytes: &[u8]) -> String {
	let mut out = String::with_capacity(2 + bytes.len() * 2);
	out.push_str("0x");
	for b in bytes {
		out.push_str(&format!("{b:02x}"));
	}
	out
}

fn hex_value(digit: u8) -> Option<u8> {
	match digit {
		b'0'..=b'9' => Some(digit - b'0'),
		b'a'..=b'f' => Some(digit - b'a' + 10),
		b'A'..=b'F' => Some(digit - b'A' + 10),
		_ => None,
	}
}

fn from_hex(text: &str) -> Result<Vec<u8>> {
	let digits = text.strip_prefix("0x").or_else(|| text.strip_prefix("0X")).unwrap_or(text);
	let digits = digits.as_bytes();
	if digits.len() % 2 != 0 {
		return Err(TypeError::marshal(format!("odd-length hex string {text:?}")));
	}
	let mut out = Vec::with_capacity(digits.len() / 2);
	for pair in digits.chunks_exact(2) {
		let (hi, lo) = (hex_value(pair[0]), hex_value(pair[1]));
		match (hi, lo) {
			(Some(hi), Some(lo)) => out.push(hi << 4 | lo),
			_ => return Err(TypeError::marshal(format!("invalid hex string {text:?}"))),
		}
	}
	Ok(out)
}

pub struct AsciiType;

impl TypeDescriptor for AsciiType {
	fn name(&self) -> &str {
		"ascii"
	}

	fn kind(&self) -> Kind {
		Kind::Ascii
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Ascii(Emptyable::Empty) => Ok(()),
			NativeValue::Ascii(Emptyable::Value(v)) => {
				if !v.0.is_ascii() {
					return Err(TypeError::marshal(format!(
						"non-ascii content in ascii value {:?}",
						v.0
					)));
				}
				out.extend_from_slice(v.0.as_bytes());
				Ok(())
			}
			other => Err(mismatch("ascii", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		if !bytes.is_ascii() {
			return Err(TypeError::marshal("non-ascii byte in ascii value".to_string()));
		}
		let s = std::str::from_utf8(bytes).expect("ascii is utf-8");
		Ok(NativeValue::Ascii(Emptyable::Value(Ascii(s.to_string()))))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		lhs < rhs
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Ascii(Emptyable::Value(v)) => v.0.clone(),
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		if !text.is_ascii() {
			return Err(TypeError::marshal(format!("non-ascii content in {text:?}")));
		}
		Ok(text.as_bytes().to_vec())
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		self.validate(bytes, SerializationFormat::internal())?;
		let s = std::str::from_utf8(bytes).expect("validated ascii");
		serde_json::to_string(s).map_err(|e| TypeError::marshal(e.to_string()))
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		let s = json
			.as_str()
			.ok_or_else(|| TypeError::marshal(format!("expected ascii string, got {json}")))?;
		self.from_string(s)
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Ascii(Emptyable::Value(Ascii(String::new())))
	}

	fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
		if bytes.is_ascii() {
			Ok(())
		} else {
			Err(TypeError::marshal("non-ascii byte in ascii value".to_string()))
		}
	}

	fn is_byte_order_comparable(&self) -> bool {
		true
	}

	fn is_string(&self) -> bool {
		true
	}
}

pub struct Utf8Type;

impl TypeDescriptor for Utf8Type {
	fn name(&self) -> &str {
		"text"
	}

	fn kind(&self) -> Kind {
		Kind::Utf8
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Text(v) => {
				out.extend_from_slice(v.as_bytes());
				Ok(())
			}
			other => Err(mismatch("text", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		let s = std::str::from_utf8(bytes)
			.map_err(|e| TypeError::marshal(format!("invalid utf-8 in text value: {e}")))?;
		Ok(NativeValue::Text(s.to_string()))
	}

	// UTF-8 byte order coincides with code point order.
	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		lhs < rhs
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Text(v) => v.clone(),
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		Ok(text.as_bytes().to_vec())
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		let s = std::str::from_utf8(bytes)
			.map_err(|e| TypeError::marshal(format!("invalid utf-8 in text value: {e}")))?;
		serde_json::to_string(s).map_err(|e| TypeError::marshal(e.to_string()))
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		let s = json
			.as_str()
			.ok_or_else(|| TypeError::marshal(format!("expected text string, got {json}")))?;
		Ok(s.as_bytes().to_vec())
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Text(String::new())
	}

	fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
		std::str::from_utf8(bytes)
			.map(|_| ())
			.map_err(|e| TypeError::marshal(format!("invalid utf-8 in text value: {e}")))
	}

	fn is_byte_order_comparable(&self) -> bool {
		true
	}

	fn is_string(&self) -> bool {
		true
	}

	// Every ascii value is a text value.
	fn is_value_compatible_with_internal(&self, other: &dyn TypeDescriptor) -> bool {
		matches!(other.kind(), Kind::Utf8 | Kind::Ascii)
	}
}

pub struct BytesType;

impl TypeDescriptor for BytesType {
	fn name(&self) -> &str {
		"blob"
	}

	fn kind(&self) -> Kind {
		Kind::Bytes
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Bytes(v) => {
				out.extend_from_slice(v);
				Ok(())
			}
			other => Err(mismatch("blob", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		Ok(NativeValue::Bytes(bytes.to_vec()))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		lhs < rhs
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Bytes(v) => to_hex(v),
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		from_hex(text)
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		Ok(format!("\"{}\"", to_hex(bytes)))
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		let s = json
			.as_str()
			.ok_or_else(|| TypeError::marshal(format!("expected hex string, got {json}")))?;
		if !s.starts_with("0x") {
			return Err(TypeError::marshal(format!("blob JSON value must start with 0x: {s:?}")));
		}
		from_hex(s)
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Bytes(Vec::new())
	}

	fn is_byte_order_comparable(&self) -> bool {
		true
	}

	// Any serialized value may be reinterpreted as a blob.
	fn is_value_compatible_with_internal(&self, _other: &dyn TypeDescriptor) -> bool {
		true
	}
}
