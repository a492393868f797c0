// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! IEEE-754 scalar descriptors.
//!
//! The stored form is the big-endian bit pattern. Ordering differs from
//! the IEEE partial order in two places so it can be total: NaN sorts
//! after every number and compares equal to itself, and the two zeroes
//! are one value. Hashing canonicalizes both before hashing so it stays
//! consistent with equality.

use std::cmp::Ordering;

use xxhash_rust::xxh3::xxh3_64;

use crate::descriptor::scalar::{compare_with_empty, mismatch};
use crate::descriptor::{Kind, TypeDescriptor};
use crate::error::{Result, TypeError};
use crate::format::SerializationFormat;
use crate::util::encoding::{read_exact_u32, read_exact_u64};
use crate::value::emptyable::Emptyable;
use crate::value::native::NativeValue;

macro_rules! float_descriptor {
	($descriptor:ident, $native:ty, $bits:ty, $variant:ident, $kind:ident, $name:literal, $read:ident) => {
		pub struct $descriptor;

		impl $descriptor {
			fn decode(bytes: &[u8]) -> Result<$native> {
				Ok(<$native>::from_bits($read(bytes)?))
			}

			fn total_order(a: $native, b: $native) -> Ordering {
				match (a.is_nan(), b.is_nan()) {
					(true, true) => Ordering::Equal,
					(true, false) => Ordering::Greater,
					(false, true) => Ordering::Less,
					(false, false) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
				}
			}

			fn canonical_bits(v: $native) -> $bits {
				if v.is_nan() {
					<$native>::NAN.to_bits()
				} else if v == 0.0 {
					(0.0 as $native).to_bits()
				} else {
					v.to_bits()
				}
			}
		}

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
						out.extend_from_slice(&v.to_bits().to_be_bytes());
						Ok(())
					}
					other => Err(mismatch($name, other)),
				}
			}

			fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
				if bytes.is_empty() {
					return Ok(NativeValue::$variant(Emptyable::Empty));
				}
				Ok(NativeValue::$variant(Emptyable::Value(Self::decode(bytes)?)))
			}

			fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
				self.compare(lhs, rhs) == Ordering::Less
			}

			fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
				compare_with_empty(lhs, rhs, |lhs, rhs| {
					match (Self::decode(lhs), Self::decode(rhs)) {
						(Ok(a), Ok(b)) => Self::total_order(a, b),
						_ => lhs.cmp(rhs),
					}
				})
			}

			// All NaN payloads and both zeroes compare equal, so hash
			// over canonicalized bits.
			fn hash(&self, bytes: &[u8]) -> u64 {
				match Self::decode(bytes) {
					Ok(v) => xxh3_64(&Self::canonical_bits(v).to_be_bytes()),
					Err(_) => xxh3_64(bytes),
				}
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
				Ok(v.to_bits().to_be_bytes().to_vec())
			}

			fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
				match self.deserialize(bytes)? {
					NativeValue::$variant(Emptyable::Value(v)) => {
						// NaN and the infinities have no JSON rendering.
						match serde_json::Number::from_f64(v as f64) {
							Some(n) => Ok(n.to_string()),
							None => Ok("null".to_string()),
						}
					}
					_ => Ok("null".to_string()),
				}
			}

			fn from_json_object(
				&self,
				json: &serde_json::Value,
				_format: SerializationFormat,
			) -> Result<Vec<u8>> {
				let v = json.as_f64().ok_or_else(|| {
					TypeError::marshal(format!(concat!("expected ", $name, " number, got {}"), json))
				})?;
				Ok((v as $native).to_bits().to_be_bytes().to_vec())
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
		}
	};
}

float_descriptor!(FloatType, f32, u32, Float, Float, "float", read_exact_u32);
float_descriptor!(DoubleType, f64, u64, Double, Double, "double", read_exact_u64);

#[cfg(test)]
mod tests {
	use super::*;

	fn bytes(v: f64) -> Vec<u8> {
		v.to_bits().to_be_bytes().to_vec()
	}

	#[test]
	fn test_roundtrip() {
		let t = DoubleType;
		let mut out = Vec::new();
		t.serialize(&NativeValue::Double(Emptyable::Value(1.5)), &mut out).unwrap();
		assert_eq!(t.deserialize(&out).unwrap(), NativeValue::Double(Emptyable::Value(1.5)));
	}

	#[test]
	fn test_nan_sorts_last_and_equals_itself() {
		let t = DoubleType;
		let nan = bytes(f64::NAN);
		// A NaN with a different payload.
		let other_nan = bytes(f64::from_bits(0x7ff8000000000001));
		assert!(t.less(&bytes(f64::INFINITY), &nan));
		assert_eq!(t.compare(&nan, &other_nan), Ordering::Equal);
		assert_eq!(t.hash(&nan), t.hash(&other_nan));
	}

	#[test]
	fn test_zeroes_are_one_value() {
		let t = DoubleType;
		let pos = bytes(0.0);
		let neg = bytes(-0.0);
		assert_ne!(pos, neg);
		assert!(t.equal(&pos, &neg));
		assert_eq!(t.hash(&pos), t.hash(&neg));
	}

	#[test]
	fn test_negative_sorts_before_positive() {
		let t = FloatType;
		let neg = (-1.0f32).to_bits().to_be_bytes();
		let pos = 1.0f32.to_bits().to_be_bytes();
		assert!(t.less(&neg, &pos));
	}

	#[test]
	fn test_empty_sorts_first() {
		let t = DoubleType;
		assert!(t.less(&[], &bytes(f64::NEG_INFINITY)));
	}

	#[test]
	fn test_json() {
		let t = DoubleType;
		assert_eq!(t.to_json_string(&bytes(2.5)).unwrap(), "2.5");
		assert_eq!(t.to_json_string(&bytes(f64::NAN)).unwrap(), "null");
		let json: serde_json::Value = serde_json::from_str("2.5").unwrap();
		assert_eq!(t.from_json_object(&json, SerializationFormat::latest()).unwrap(), bytes(2.5));
	}
}
