// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Arbitrary-precision descriptors.
//!
//! Varints are two's-complement big-endian signed bytes; decimals add a
//! four-byte scale in front of the unscaled varint. Neither encoding is
//! canonical on the wire (sign-extension padding, trailing zeros in the
//! unscaled digits), so equality and hashing go through the decoded
//! value rather than the bytes.

use std::cmp::Ordering;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use num_traits::Zero;
use xxhash_rust::xxh3::xxh3_64;

use crate::descriptor::scalar::{compare_with_empty, mismatch};
use crate::descriptor::{Kind, TypeDescriptor};
use crate::error::{Result, TypeError};
use crate::format::SerializationFormat;
use crate::util::encoding::read_be_i32;
use crate::value::emptyable::Emptyable;
use crate::value::native::NativeValue;

pub struct VarintType;

impl TypeDescriptor for VarintType {
	fn name(&self) -> &str {
		"varint"
	}

	fn kind(&self) -> Kind {
		Kind::Varint
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Varint(Emptyable::Empty) => Ok(()),
			NativeValue::Varint(Emptyable::Value(v)) => {
				out.extend_from_slice(&v.to_signed_bytes_be());
				Ok(())
			}
			other => Err(mismatch("varint", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		if bytes.is_empty() {
			return Ok(NativeValue::Varint(Emptyable::Empty));
		}
		Ok(NativeValue::Varint(Emptyable::Value(BigInt::from_signed_bytes_be(bytes))))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.compare(lhs, rhs) == Ordering::Less
	}

	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		compare_with_empty(lhs, rhs, |lhs, rhs| {
			BigInt::from_signed_bytes_be(lhs).cmp(&BigInt::from_signed_bytes_be(rhs))
		})
	}

	// Sign-extended paddings of one value must collide, so hash the
	// minimal re-encoding.
	fn hash(&self, bytes: &[u8]) -> u64 {
		if bytes.is_empty() {
			return xxh3_64(bytes);
		}
		xxh3_64(&BigInt::from_signed_bytes_be(bytes).to_signed_bytes_be())
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Varint(Emptyable::Value(v)) => v.to_string(),
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		if text.is_empty() {
			return Ok(Vec::new());
		}
		let v = BigInt::from_str(text)
			.map_err(|e| TypeError::marshal(format!("invalid varint {text:?}: {e}")))?;
		Ok(v.to_signed_bytes_be())
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		match self.deserialize(bytes)? {
			NativeValue::Varint(Emptyable::Value(v)) => Ok(v.to_string()),
			_ => Ok("null".to_string()),
		}
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		if let Some(s) = json.as_str() {
			return self.from_string(s);
		}
		if json.is_number() {
			return self.from_string(&json.to_string());
		}
		Err(TypeError::marshal(format!("expected varint number, got {json}")))
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Varint(Emptyable::Empty)
	}
}

pub struct DecimalType;

impl DecimalType {
	fn encode(v: &BigDecimal, out: &mut Vec<u8>) -> Result<()> {
		let (digits, exponent) = v.as_bigint_and_exponent();
		let scale = i32::try_from(exponent)
			.map_err(|_| TypeError::marshal(format!("decimal scale {exponent} out of range")))?;
		out.extend_from_slice(&scale.to_be_bytes());
		out.extend_from_slice(&digits.to_signed_bytes_be());
		Ok(())
	}

	fn decode(bytes: &[u8]) -> Result<BigDecimal> {
		let mut view = bytes;
		let scale = read_be_i32(&mut view)?;
		Ok(BigDecimal::new(BigInt::from_signed_bytes_be(view), scale as i64))
	}
}

impl TypeDescriptor for DecimalType {
	fn name(&self) -> &str {
		"decimal"
	}

	fn kind(&self) -> Kind {
		Kind::Decimal
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Decimal(Emptyable::Empty) => Ok(()),
			NativeValue::Decimal(Emptyable::Value(v)) => Self::encode(v, out),
			other => Err(mismatch("decimal", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		if bytes.is_empty() {
			return Ok(NativeValue::Decimal(Emptyable::Empty));
		}
		Ok(NativeValue::Decimal(Emptyable::Value(Self::decode(bytes)?)))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.compare(lhs, rhs) == Ordering::Less
	}

	// Numeric comparison: 1.0 and 1.00 are one value.
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
			Ok(v) => {
				// Normalization strips trailing zeros but leaves the
				// scale of zero itself alone.
				let canonical_value =
					if v.is_zero() { BigDecimal::zero() } else { v.normalized() };
				let mut canonical = Vec::new();
				// Stripping trailing zeros can push the scale out of
				// i32 range; raw bytes then.
				if Self::encode(&canonical_value, &mut canonical).is_ok() {
					xxh3_64(&canonical)
				} else {
					xxh3_64(bytes)
				}
			}
			Err(_) => xxh3_64(bytes),
		}
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Decimal(Emptyable::Value(v)) => v.to_string(),
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		if text.is_empty() {
			return Ok(Vec::new());
		}
		let v = BigDecimal::from_str(text)
			.map_err(|e| TypeError::marshal(format!("invalid decimal {text:?}: {e}")))?;
		let mut out = Vec::new();
		Self::encode(&v, &mut out)?;
		Ok(out)
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		match self.deserialize(bytes)? {
			NativeValue::Decimal(Emptyable::Value(v)) => Ok(v.to_string()),
			_ => Ok("null".to_string()),
		}
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		_format: SerializationFormat,
	) -> Result<Vec<u8>> {
		if let Some(s) = json.as_str() {
			return self.from_string(s);
		}
		if json.is_number() {
			return self.from_string(&json.to_string());
		}
		Err(TypeError::marshal(format!("expected decimal number, got {json}")))
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Decimal(Emptyable::Empty)
	}

	fn validate(&self, bytes: &[u8], _format: SerializationFormat) -> Result<()> {
		if bytes.is_empty() || bytes.len() >= 4 {
			Ok(())
		} else {
			Err(TypeError::marshal(format!(
				"decimal expects at least 4 bytes of scale, got {}",
				bytes.len()
			)))
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_varint_roundtrip() {
		let t = VarintType;
		for text in ["0", "-1", "170141183460469231731687303715884105728"] {
			let bytes = t.from_string(text).unwrap();
			assert_eq!(t.get_string(&bytes).unwrap(), text);
		}
	}

	#[test]
	fn test_varint_order() {
		let t = VarintType;
		let neg = t.from_string("-300").unwrap();
		let pos = t.from_string("300").unwrap();
		let huge = t.from_string("99999999999999999999999999").unwrap();
		assert!(t.less(&neg, &pos));
		assert!(t.less(&pos, &huge));
		assert!(t.less(&[], &neg));
	}

	#[test]
	fn test_varint_padded_encoding_is_same_value() {
		let t = VarintType;
		let minimal = vec![0x01];
		let padded = vec![0x00, 0x00, 0x01];
		assert_ne!(minimal, padded);
		assert!(t.equal(&minimal, &padded));
		assert_eq!(t.hash(&minimal), t.hash(&padded));
	}

	#[test]
	fn test_decimal_roundtrip() {
		let t = DecimalType;
		let bytes = t.from_string("-12.345").unwrap();
		assert_eq!(t.get_string(&bytes).unwrap(), "-12.345");
	}

	#[test]
	fn test_decimal_trailing_zeros_are_same_value() {
		let t = DecimalType;
		let one_zero = t.from_string("1.0").unwrap();
		let two_zeros = t.from_string("1.00").unwrap();
		assert_ne!(one_zero, two_zeros);
		assert!(t.equal(&one_zero, &two_zeros));
		assert_eq!(t.hash(&one_zero), t.hash(&two_zeros));
	}

	#[test]
	fn test_decimal_zero_spellings_hash_alike() {
		let t = DecimalType;
		let a = t.from_string("0.000").unwrap();
		let b = t.from_string("0").unwrap();
		assert!(t.equal(&a, &b));
		assert_eq!(t.hash(&a), t.hash(&b));
	}

	#[test]
	fn test_decimal_order_across_scales() {
		let t = DecimalType;
		let small = t.from_string("0.5").unwrap();
		let big = t.from_string("10").unwrap();
		let negative = t.from_string("-0.001").unwrap();
		assert!(t.less(&small, &big));
		assert!(t.less(&negative, &small));
	}

	#[test]
	fn test_decimal_truncated_scale() {
		let t = DecimalType;
		assert!(t.deserialize(&[0x00, 0x01]).is_err());
		assert!(t.validate(&[0x00, 0x01], SerializationFormat::latest()).is_err());
	}

	#[test]
	fn test_json_numbers() {
		let vt = VarintType;
		let json: serde_json::Value = serde_json::from_str("12345678901234567890").unwrap();
		let bytes = vt.from_json_object(&json, SerializationFormat::latest()).unwrap();
		assert_eq!(vt.to_json_string(&bytes).unwrap(), "12345678901234567890");
	}
}
