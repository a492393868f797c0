// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Builtin scalar descriptors.
//!
//! Every scalar accepts zero-length input as the empty value, which
//! sorts before all concrete values of its type. Comparisons never fail:
//! input that does not decode falls back to raw unsigned byte order so
//! the ordering stays total.

pub mod bignum;
pub mod float;
pub mod temporal;
pub mod text;
pub mod uuid;

use std::cmp::Ordering;

use crate::descriptor::{Kind, TypeDescriptor};
use crate::error::{Result, TypeError};
use crate::format::SerializationFormat;
use crate::util::encoding::{read_exact_i8, read_exact_i16, read_exact_i32, read_exact_i64};
use crate::value::emptyable::Emptyable;
use crate::value::native::NativeValue;

pub(crate) fn mismatch(dtype: &str, value: &NativeValue) -> TypeError {
	TypeError::runtime(format!("cannot serialize {} value as {dtype}", value.type_name()))
}

/// Orders the empty serialization before every concrete value, then
/// defers to the decoded comparison.
pub(crate) fn compare_with_empty<F>(lhs: &[u8], rhs: &[u8], concrete: F) -> Ordering
where
	F: FnOnce(&[u8], &[u8]) -> Ordering,
{
	match (lhs.is_empty(), rhs.is_empty()) {
		(true, true) => Ordering::Equal,
		(true, false) => Ordering::Less,
		(false, true) => Ordering::Greater,
		(false, false) => concrete(lhs, rhs),
	}
}

macro_rules! integer_descriptor {
	($descriptor:ident, $native:ty, $variant:ident, $kind:ident, $name:literal, $read:ident) => {
		pub struct $descriptor;

		impl TypeDescriptor for $descriptor {
			fn name(&self) -> &str {
				$name
			}

			fn kind(&self) -> Kind {
				Kind::$kind
			}

			fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
				match value {
					NativeValue::$variant(Emptyable::Empty) => Ok(()),
					NativeValue::$variant(Emptyable::Value(v)) => {
						out.extend_from_slice(&v.to_be_bytes());
						Ok(())
					}
					other => Err(mismatch($name, other)),
				}
			}

			fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
				if bytes.is_empty() {
					return Ok(NativeValue::$variant(Emptyable::Empty));
				}
				Ok(NativeValue::$variant(Emptyable::Value($read(bytes)?)))
			}

			fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
				self.compare(lhs, rhs) == Ordering::Less
			}

			fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
				compare_with_empty(lhs, rhs, |lhs, rhs| {
					match ($read(lhs), $read(rhs)) {
						(Ok(a), Ok(b)) => a.cmp(&b),
						_ => lhs.cmp(rhs),
					}
				})
			}

			fn to_string_value(&self, value: &NativeValue) -> String {
				match value {
					NativeValue::$variant(Emptyable::Value(v)) => v.to_string(),
					_ => String::new(),
				}
			}

			fn from_string(&self, text: &str) -> Result<Vec<u8>> {
				if text.is_empty() {
					return Ok(Vec::new());
				}
				let v: $native = text.parse().map_err(|e| {
					TypeError::marshal(format!(concat!("invalid ", $name, " {:?}: {}"), text, e))
				})?;
				Ok(v.to_be_bytes().to_vec())
			}

			fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
				match self.deserialize(bytes)? {
					NativeValue::$variant(Emptyable::Value(v)) => Ok(v.to_string()),
					_ => Ok("null".to_string()),
				}
			}

			fn from_json_object(
				&self,
				json: &serde_json::Value,
				_format: SerializationFormat,
			) -> Result<Vec<u8>> {
				let raw = json.as_i64().ok_or_else(|| {
					TypeError::marshal(format!(concat!("expected ", $name, " number, got {}"), json))
				})?;
				let v = <$native>::try_from(raw).map_err(|_| {
					TypeError::marshal(format!(concat!("value {} out of range for ", $name), raw))
				})?;
				Ok(v.to_be_bytes().to_vec())
			}

			fn make_empty_value(&self) -> NativeValue {
				NativeValue::$variant(Emptyable::Empty)
			}

			fn value_length_if_fixed(&self) -> Option<usize> {
				Some(size_of::<$native>())
			}

			fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
				if bytes.is_empty() || bytes.len() == size_of::<$native>() {
					Ok(())
				} else {
					Err(TypeError::marshal(format!(
						concat!($name, " expects {} bytes, got {}"),
						size_of::<$native>(),
						bytes.len()
					)))
				}
			}

			// Equal fixed-width encodings mean equal values, but the
			// sign bit breaks unsigned byte order.
			fn is_byte_order_equal(&self) -> bool {
				true
			}
		}
	};
}

integer_descriptor!(ByteType, i8, Byte, Byte, "tinyint", read_exact_i8);
integer_descriptor!(ShortType, i16, Short, Short, "smallint", read_exact_i16);
integer_descriptor!(Int32Type, i32, Int32, Int32, "int", read_exact_i32);
integer_descriptor!(LongType, i64, Long, Long, "bigint", read_exact_i64);

pub struct BooleanType;

impl BooleanType {
	fn decode(bytes: &[u8]) -> Result<bool> {
		match bytes {
			[b] => Ok(*b != 0),
			_ => Err(TypeError::marshal(format!("boolean expects 1 byte, got {}", bytes.len()))),
		}
	}
}

impl TypeDescriptor for BooleanType {
	fn name(&self) -> &str {
		"boolean"
	}

	fn kind(&self) -> Kind {
		Kind::Boolean
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Boolean(Emptyable::Empty) => Ok(()),
			NativeValue::Boolean(Emptyable::Value(v)) => {
				out.push(*v as u8);
				Ok(())
			}
			other => Err(mismatch("boolean", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		if bytes.is_empty() {
			return Ok(NativeValue::Boolean(Emptyable::Empty));
		}
		Ok(NativeValue::Boolean(Emptyable::Value(Self::decode(bytes)?)))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.compare(lhs, rhs) == Ordering::Less
	}

	// Any nonzero byte decodes to true, so comparison canonicalizes
	// before ordering.
	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		compare_with_empty(lhs, rhs, |lhs, rhs| {
			match (Self::decode(lhs), Self::decode(rhs)) {
				(Ok(a), Ok(b)) => a.cmp(&b),
				_ => lhs.cmp(rhs),
			}
		})
	}

	fn hash(&self, bytes: &[u8]) -> u64 {
		match Self::decode(bytes) {
			Ok(v) => xxhash_rust::xxh3::xxh3_64(&[v as u8]),
			Err(_) => xxhash_rust::xxh3::xxh3_64(bytes),
		}
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Boolean(Emptyable::Value(v)) => v.to_string(),
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		match text.to_ascii_lowercase().as_str() {
			"" => Ok(Vec::new()),
			"true" => Ok(vec![1]),
			"false" => Ok(vec![0]),
			_ => Err(TypeError::marshal(format!("invalid boolean {text:?}"))),
		}
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		match self.deserialize(bytes)? {
			NativeValue::Boolean(Emptyable::Value(v)) => Ok(v.to_string()),
			_ => Ok("null".to_string()),
		}
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		let v = json
			.as_bool()
			.ok_or_else(|| TypeError::marshal(format!("expected boolean, got {json}")))?;
		Ok(vec![v as u8])
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Boolean(Emptyable::Empty)
	}

	fn value_length_if_fixed(&self) -> Option<usize> {
		Some(1)
	}

	fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
		if bytes.len() <= 1 {
			Ok(())
		} else {
			Err(TypeError::marshal(format!("boolean expects 1 byte, got {}", bytes.len())))
		}
	}
}

/// Counters share the bigint representation but may only be changed
/// through increments, so the textual and JSON write paths are closed.
pub struct CounterType;

impl TypeDescriptor for CounterType {
	fn name(&self) -> &str {
		"counter"
	}

	fn kind(&self) -> Kind {
		Kind::Counter
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		LongType.serialize(value, out)
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		LongType.deserialize(bytes)
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		LongType.less(lhs, rhs)
	}

	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		LongType.compare(lhs, rhs)
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		LongType.to_string_value(value)
	}

	fn from_string(&self, _text: &str) -> Result<Vec<u8>> {
		Err(TypeError::marshal("counters may only be changed through increments".to_string()))
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		LongType.to_json_string(bytes)
	}

	fn from_json_object(
		&self,
		_json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		Err(TypeError::marshal("counters may only be changed through increments".to_string()))
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Long(Emptyable::Empty)
	}

	fn value_length_if_fixed(&self) -> Option<usize> {
		Some(8)
	}

	fn validate(&self, bytes: &[u8], format: SerializationFormat) -> Result<()> {
		LongType.validate(bytes, format)
	}

	fn is_byte_order_equal(&self) -> bool {
		true
	}
}

/// The type whose only value is the empty value. Used where a column
/// must exist but can never carry data.
pub struct EmptyType;

impl TypeDescriptor for EmptyType {
	fn name(&self) -> &str {
		"empty"
	}

	fn kind(&self) -> Kind {
		Kind::Empty
	}

	fn serialize(&self, value: &NativeValue, _out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Empty => Ok(()),
			other => Err(mismatch("empty", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		if bytes.is_empty() {
			Ok(NativeValue::Empty)
		} else {
			Err(TypeError::marshal(format!("empty expects 0 bytes, got {}", bytes.len())))
		}
	}

	fn less(&self, _lhs: &[u8], _rhs: &[u8]) -> bool {
		false
	}

	fn to_string_value(&self, _value: &NativeValue) -> String {
		String::new()
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		if text.is_empty() {
			Ok(Vec::new())
		} else {
			Err(TypeError::marshal(format!("empty cannot hold {text:?}")))
		}
	}

	fn to_json_string(&self, _bytes: &[u8]) -> Result<String> {
		Ok("null".to_string())
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		if json.is_null() {
			Ok(Vec::new())
		} else {
			Err(TypeError::marshal(format!("empty cannot hold {json}")))
		}
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Empty
	}

	fn value_length_if_fixed(&self) -> Option<usize> {
		Some(0)
	}

	fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
		if bytes.is_empty() {
			Ok(())
		} else {
			Err(TypeError::marshal(format!("empty expects 0 bytes, got {}", bytes.len())))
		}
	}

	fn is_byte_order_comparable(&self) -> bool {
		true
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_int_roundtrip() {
		let t = Int32Type;
		let mut out = Vec::new();
		t.serialize(&NativeValue::Int32(Emptyable::Value(-5)), &mut out).unwrap();
		assert_eq!(out, (-5i32).to_be_bytes());
		assert_eq!(t.deserialize(&out).unwrap(), NativeValue::Int32(Emptyable::Value(-5)));
	}

	#[test]
	fn test_int_empty_roundtrip() {
		let t = Int32Type;
		let mut out = Vec::new();
		t.serialize(&NativeValue::Int32(Emptyable::Empty), &mut out).unwrap();
		assert!(out.is_empty());
		assert_eq!(t.deserialize(&[]).unwrap(), NativeValue::Int32(Emptyable::Empty));
	}

	#[test]
	fn test_int_signed_order() {
		let t = Int32Type;
		assert!(t.less(&(-1i32).to_be_bytes(), &1i32.to_be_bytes()));
		assert!(t.less(&i32::MIN.to_be_bytes(), &i32::MAX.to_be_bytes()));
	}

	#[test]
	fn test_empty_sorts_before_minimum() {
		let t = LongType;
		assert!(t.less(&[], &i64::MIN.to_be_bytes()));
		assert!(!t.less(&[], &[]));
	}

	#[test]
	fn test_int_serialize_rejects_foreign_value() {
		let t = Int32Type;
		let mut out = Vec::new();
		let err = t.serialize(&NativeValue::Long(Emptyable::Value(1)), &mut out).unwrap_err();
		assert!(matches!(err, TypeError::Runtime(_)));
	}

	#[test]
	fn test_int_from_string() {
		let t = Int32Type;
		assert_eq!(t.from_string("42").unwrap(), 42i32.to_be_bytes());
		assert!(t.from_string("").unwrap().is_empty());
		assert!(t.from_string("forty-two").is_err());
	}

	#[test]
	fn test_int_json() {
		let t = ShortType;
		assert_eq!(t.to_json_string(&7i16.to_be_bytes()).unwrap(), "7");
		let json: serde_json::Value = serde_json::from_str("7").unwrap();
		assert_eq!(
			t.from_json_object(&json, SerializationFormat::latest()).unwrap(),
			7i16.to_be_bytes()
		);
		let big: serde_json::Value = serde_json::from_str("70000").unwrap();
		assert!(t.from_json_object(&big, SerializationFormat::latest()).is_err());
	}

	#[test]
	fn test_int_validate() {
		let t = LongType;
		let format = SerializationFormat::latest();
		assert!(t.validate(&[], format).is_ok());
		assert!(t.validate(&1i64.to_be_bytes(), format).is_ok());
		assert!(t.validate(&[1, 2, 3], format).is_err());
	}

	#[test]
	fn test_boolean_nonzero_is_true() {
		let t = BooleanType;
		assert_eq!(t.compare(&[2], &[1]), Ordering::Equal);
		assert_eq!(t.hash(&[2]), t.hash(&[1]));
		assert!(t.less(&[0], &[1]));
	}

	#[test]
	fn test_boolean_from_string() {
		let t = BooleanType;
		assert_eq!(t.from_string("true").unwrap(), vec![1]);
		assert_eq!(t.from_string("False").unwrap(), vec![0]);
		assert!(t.from_string("yes").is_err());
	}

	#[test]
	fn test_counter_rejects_direct_writes() {
		let t = CounterType;
		assert!(t.from_string("1").is_err());
		let json: serde_json::Value = serde_json::from_str("1").unwrap();
		assert!(t.from_json_object(&json, SerializationFormat::latest()).is_err());
		assert_eq!(
			t.deserialize(&5i64.to_be_bytes()).unwrap(),
			NativeValue::Long(Emptyable::Value(5))
		);
	}

	#[test]
	fn test_empty_type() {
		let t = EmptyType;
		assert_eq!(t.deserialize(&[]).unwrap(), NativeValue::Empty);
		assert!(t.deserialize(&[0]).is_err());
		assert_eq!(t.compare(&[], &[]), Ordering::Equal);
	}
}
