// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Temporal scalar descriptors.
//!
//! Timestamps are milliseconds since the Unix epoch, dates a day count
//! centered on `1 << 31`, times nanoseconds since midnight. The textual
//! forms are the raw integers.

use std::cmp::Ordering;

use crate::descriptor::scalar::{compare_with_empty, mismatch};
use crate::descriptor::{Kind, TypeDescriptor};
use crate::error::{Result, TypeError};
use crate::format::SerializationFormat;
use crate::util::encoding::{read_exact_i64, read_exact_u32};
use crate::value::emptyable::Emptyable;
use crate::value::native::{SimpleDate, Time, Timestamp};
use crate::value::NativeValue;

macro_rules! temporal_descriptor {
	(
		$descriptor:ident, $native:ident, $repr:ty, $variant:ident, $kind:ident,
		$name:literal, $read:ident, $byte_order:literal
	) => {
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
						out.extend_from_slice(&v.0.to_be_bytes());
						Ok(())
					}
					other => Err(mismatch($name, other)),
				}
			}

			fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
				if bytes.is_empty() {
					return Ok(NativeValue::$variant(Emptyable::Empty));
				}
				Ok(NativeValue::$variant(Emptyable::Value($native($read(bytes)?))))
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
				let v: $native = text.parse()?;
				Ok(v.0.to_be_bytes().to_vec())
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
				let v = <$repr>::try_from(raw).map_err(|_| {
					TypeError::marshal(format!(concat!("value {} out of range for ", $name), raw))
				})?;
				Ok(v.to_be_bytes().to_vec())
			}

			fn make_empty_value(&self) -> NativeValue {
				NativeValue::$variant(Emptyable::Empty)
			}

			fn value_length_if_fixed(&self) -> Option<usize> {
				Some(size_of::<$repr>())
			}

			fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
				if bytes.is_empty() || bytes.len() == size_of::<$repr>() {
					Ok(())
				} else {
					Err(TypeError::marshal(format!(
						concat!($name, " expects {} bytes, got {}"),
						size_of::<$repr>(),
						bytes.len()
					)))
				}
			}

			fn is_byte_order_comparable(&self) -> bool {
				$byte_order
			}

			fn is_byte_order_equal(&self) -> bool {
				true
			}
		}
	};
}

// Signed representations lose unsigned byte order across the sign bit;
// the unsigned day count keeps it.
temporal_descriptor!(TimestampType, Timestamp, i64, Timestamp, Timestamp, "timestamp", read_exact_i64, false);
temporal_descriptor!(SimpleDateType, SimpleDate, u32, Date, SimpleDate, "date", read_exact_u32, true);
temporal_descriptor!(TimeType, Time, i64, Time, Time, "time", read_exact_i64, false);

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_timestamp_roundtrip() {
		let t = TimestampType;
		let mut out = Vec::new();
		t.serialize(&NativeValue::Timestamp(Emptyable::Value(Timestamp(1_700_000_000_000))), &mut out)
			.unwrap();
		assert_eq!(
			t.deserialize(&out).unwrap(),
			NativeValue::Timestamp(Emptyable::Value(Timestamp(1_700_000_000_000)))
		);
	}

	#[test]
	fn test_timestamp_pre_epoch_sorts_first() {
		let t = TimestampType;
		let before = (-1i64).to_be_bytes();
		let after = 1i64.to_be_bytes();
		assert!(t.less(&before, &after));
	}

	#[test]
	fn test_date_epoch_centering() {
		let t = SimpleDateType;
		let epoch = (1u32 << 31).to_be_bytes();
		let day_before = ((1u32 << 31) - 1).to_be_bytes();
		assert!(t.less(&day_before, &epoch));
		assert!(t.is_byte_order_comparable());
	}

	#[test]
	fn test_time_from_string() {
		let t = TimeType;
		assert_eq!(t.from_string("86399000000000").unwrap(), 86_399_000_000_000i64.to_be_bytes());
		assert!(t.from_string("midnight").is_err());
	}

	#[test]
	fn test_json_range_check() {
		let t = SimpleDateType;
		let json: serde_json::Value = serde_json::from_str("-1").unwrap();
		assert!(t.from_json_object(&json, SerializationFormat::latest()).is_err());
	}
}
