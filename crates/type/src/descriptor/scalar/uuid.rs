// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! UUID descriptors.
//!
//! Plain UUIDs order by version first; two version-1 values then compare
//! by their embedded 60-bit timestamp, everything else by unsigned
//! bytes. The timeuuid type admits only version-1 values and always
//! orders by timestamp.

use std::cmp::Ordering;

use uuid::Uuid;

use crate::descriptor::scalar::{compare_with_empty, mismatch};
use crate::descriptor::{Kind, TypeDescriptor};
use crate::error::{Result, TypeError};
use crate::format::SerializationFormat;
use crate::value::emptyable::Emptyable;
use crate::value::native::{NativeValue, Timeuuid};

fn decode(bytes: &[u8]) -> Result<[u8; 16]> {
	<[u8; 16]>::try_from(bytes)
		.map_err(|_| TypeError::marshal(format!("uuid expects 16 bytes, got {}", bytes.len())))
}

fn version(raw: &[u8; 16]) -> u8 {
	raw[6] >> 4
}

/// The 60-bit version-1 timestamp, reassembled from its split fields.
fn v1_timestamp(raw: &[u8; 16]) -> u64 {
	let time_low = u32::from_be_bytes([raw[0], raw[1], raw[2], raw[3]]) as u64;
	let time_mid = u16::from_be_bytes([raw[4], raw[5]]) as u64;
	let time_hi = (u16::from_be_bytes([raw[6], raw[7]]) & 0x0fff) as u64;
	(time_hi << 48) | (time_mid << 32) | time_low
}

fn compare_timeuuid(lhs: &[u8; 16], rhs: &[u8; 16]) -> Ordering {
	v1_timestamp(lhs).cmp(&v1_timestamp(rhs)).then_with(|| lhs.cmp(rhs))
}

pub struct UuidType;

impl TypeDescriptor for UuidType {
	fn name(&self) -> &str {
		"uuid"
	}

	fn kind(&self) -> Kind {
		Kind::Uuid
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Uuid(Emptyable::Empty) => Ok(()),
			NativeValue::Uuid(Emptyable::Value(v)) => {
				out.extend_from_slice(v.as_bytes());
				Ok(())
			}
			other => Err(mismatch("uuid", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		if bytes.is_empty() {
			return Ok(NativeValue::Uuid(Emptyable::Empty));
		}
		Ok(NativeValue::Uuid(Emptyable::Value(Uuid::from_bytes(decode(bytes)?))))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.compare(lhs, rhs) == Ordering::Less
	}

	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		compare_with_empty(lhs, rhs, |lhs, rhs| {
			match (decode(lhs), decode(rhs)) {
				(Ok(a), Ok(b)) => {
					let order = version(&a).cmp(&version(&b));
					if order != Ordering::Equal {
						return order;
					}
					if version(&a) == 1 {
						compare_timeuuid(&a, &b)
					} else {
						a.cmp(&b)
					}
				}
				_ => lhs.cmp(rhs),
			}
		})
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Uuid(Emptyable::Value(v)) => v.to_string(),
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		if text.is_empty() {
			return Ok(Vec::new());
		}
		let v = Uuid::parse_str(text)
			.map_err(|e| TypeError::marshal(format!("invalid uuid {text:?}: {e}")))?;
		Ok(v.as_bytes().to_vec())
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		match self.deserialize(bytes)? {
			NativeValue::Uuid(Emptyable::Value(v)) => Ok(format!("\"{v}\"")),
			_ => Ok("null".to_string()),
		}
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		let s = json
			.as_str()
			.ok_or_else(|| TypeError::marshal(format!("expected uuid string, got {json}")))?;
		self.from_string(s)
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Uuid(Emptyable::Empty)
	}

	fn value_length_if_fixed(&self) -> Option<usize> {
		Some(16)
	}

	fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
		if bytes.is_empty() || bytes.len() == 16 {
			Ok(())
		} else {
			Err(TypeError::marshal(format!("uuid expects 16 bytes, got {}", bytes.len())))
		}
	}

	fn is_byte_order_equal(&self) -> bool {
		true
	}

	// A timeuuid value is a valid uuid value.
	fn is_value_compatible_with_internal(&self, other: &dyn TypeDescriptor) -> bool {
		matches!(other.kind(), Kind::Uuid | Kind::Timeuuid)
	}
}

pub struct TimeuuidType;

impl TypeDescriptor for TimeuuidType {
	fn name(&self) -> &str {
		"timeuuid"
	}

	fn kind(&self) -> Kind {
		Kind::Timeuuid
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Timeuuid(Emptyable::Empty) => Ok(()),
			NativeValue::Timeuuid(Emptyable::Value(v)) => {
				out.extend_from_slice(v.0.as_bytes());
				Ok(())
			}
			other => Err(mismatch("timeuuid", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		if bytes.is_empty() {
			return Ok(NativeValue::Timeuuid(Emptyable::Empty));
		}
		let raw = decode(bytes)?;
		if version(&raw) != 1 {
			return Err(TypeError::marshal(format!(
				"timeuuid requires a version 1 uuid, got version {}",
				version(&raw)
			)));
		}
		Ok(NativeValue::Timeuuid(Emptyable::Value(Timeuuid(Uuid::from_bytes(raw)))))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.compare(lhs, rhs) == Ordering::Less
	}

	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		compare_with_empty(lhs, rhs, |lhs, rhs| {
			match (decode(lhs), decode(rhs)) {
				(Ok(a), Ok(b)) => compare_timeuuid(&a, &b),
				_ => lhs.cmp(rhs),
			}
		})
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Timeuuid(Emptyable::Value(v)) => v.to_string(),
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		if text.is_empty() {
			return Ok(Vec::new());
		}
		let v = Uuid::parse_str(text)
			.map_err(|e| TypeError::marshal(format!("invalid timeuuid {text:?}: {e}")))?;
		if v.get_version_num() != 1 {
			return Err(TypeError::marshal(format!("timeuuid requires a version 1 uuid: {text}")));
		}
		Ok(v.as_bytes().to_vec())
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		match self.deserialize(bytes)? {
			NativeValue::Timeuuid(Emptyable::Value(v)) => Ok(format!("\"{v}\"")),
			_ => Ok("null".to_string()),
		}
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		let s = json
			.as_str()
			.ok_or_else(|| TypeError::marshal(format!("expected timeuuid string, got {json}")))?;
		self.from_string(s)
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Timeuuid(Emptyable::Empty)
	}

	fn value_length_if_fixed(&self) -> Option<usize> {
		Some(16)
	}

	fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
		if bytes.is_empty() {
			return Ok(());
		}
		let raw = decode(bytes)?;
		if version(&raw) != 1 {
			return Err(TypeError::marshal(format!(
				"timeuuid requires a version 1 uuid, got version {}",
				version(&raw)
			)));
		}
		Ok(())
	}

	fn is_byte_order_equal(&self) -> bool {
		true
	}
}
