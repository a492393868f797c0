// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! The owned pairing of a descriptor and one of its native values.

use std::fmt::{Display, Formatter};

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use uuid::Uuid;

use crate::descriptor::DataType;
use crate::descriptor::builtin::HasBuiltinType;
use crate::error::{Result, TypeError};
use crate::value::native::{Ascii, NativeType, NativeValue, SimpleDate, Time, Timestamp, Timeuuid};

/// A native value bound to the descriptor that governs it.
///
/// `value` is `None` for null, which stands for deleted or never set and
/// serializes to zero bytes. Note that a value whose serialization is
/// itself zero-length (empty text, the empty marker of a scalar) is not
/// null but produces the same bytes, so the two compare equal under the
/// serialized equality below.
#[derive(Clone)]
pub struct TypedValue {
	dtype: DataType,
	value: Option<NativeValue>,
}

impl std::fmt::Debug for TypedValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TypedValue")
			.field("type", &self.dtype.name())
			.field("value", &self.value)
			.finish()
	}
}

impl TypedValue {
	/// Callers must pass a representation produced by `dtype` itself;
	/// the descriptor constructors uphold this.
	pub(crate) fn from_parts(dtype: DataType, value: Option<NativeValue>) -> Self {
		TypedValue {
			dtype,
			value,
		}
	}

	pub fn make_null(dtype: DataType) -> Self {
		TypedValue {
			dtype,
			value: None,
		}
	}

	pub fn data_type(&self) -> &DataType {
		&self.dtype
	}

	pub fn is_null(&self) -> bool {
		self.value.is_none()
	}

	pub fn native(&self) -> Option<&NativeValue> {
		self.value.as_ref()
	}

	/// Produces the serialized form, zero bytes for null.
	pub fn serialize(&self) -> Result<Vec<u8>> {
		let mut out = Vec::new();
		if let Some(value) = &self.value {
			self.dtype.serialize(value, &mut out)?;
		}
		Ok(out)
	}

	pub fn serialized_size(&self) -> Result<usize> {
		match &self.value {
			None => Ok(0),
			Some(value) => self.dtype.serialized_size(value),
		}
	}
}

// Values of distinct descriptor instances never compare equal, even when
// the descriptors describe the same type. Within one descriptor the
// comparison runs over serialized forms so it agrees with the stored
// ordering.
impl PartialEq for TypedValue {
	fn eq(&self, other: &Self) -> bool {
		if !std::sync::Arc::ptr_eq(&self.dtype, &other.dtype) {
			return false;
		}
		match (self.serialize(), other.serialize()) {
			(Ok(a), Ok(b)) => self.dtype.equal(&a, &b),
			_ => false,
		}
	}
}

impl Display for TypedValue {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match &self.value {
			None => f.write_str("null"),
			Some(value) => f.write_str(&self.dtype.to_string_value(value)),
		}
	}
}

/// Borrows the concrete native representation out of a typed value.
///
/// Fails with a bad-cast error when the requested representation does
/// not match what the value holds (null included), and with an
/// empty-value error when the value carries the empty marker.
pub fn value_cast<T: NativeType>(value: &TypedValue) -> Result<&T> {
	match value.native() {
		None => Err(TypeError::BadCast {
			expected: T::NAME,
			actual: "null",
		}),
		Some(native) => match T::unwrap(native) {
			None => Err(TypeError::BadCast {
				expected: T::NAME,
				actual: native.type_name(),
			}),
			Some(inner) => inner,
		},
	}
}

macro_rules! from_native {
	($($ty:ty),* $(,)?) => {$(
		impl From<$ty> for TypedValue {
			fn from(value: $ty) -> Self {
				TypedValue::from_parts(<$ty>::builtin_type(), Some(value.wrap()))
			}
		}

		impl From<Option<$ty>> for TypedValue {
			fn from(value: Option<$ty>) -> Self {
				match value {
					Some(v) => v.into(),
					None => TypedValue::make_null(<$ty>::builtin_type()),
				}
			}
		}
	)*};
}

from_native!(
	bool,
	i8,
	i16,
	i32,
	i64,
	f32,
	f64,
	String,
	Vec<u8>,
	Uuid,
	Timeuuid,
	Timestamp,
	SimpleDate,
	Time,
	Ascii,
	BigInt,
	BigDecimal,
);

impl From<&str> for TypedValue {
	fn from(value: &str) -> Self {
		String::from(value).into()
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::DataTypeExt;
	use crate::descriptor::builtin::{bigint_type, int_type};

	#[test]
	fn test_from_native_carries_type() {
		let v = TypedValue::from(42i32);
		assert_eq!(v.data_type().name(), "int");
		assert!(!v.is_null());
		assert_eq!(*value_cast::<i32>(&v).unwrap(), 42);
	}

	#[test]
	fn test_cast_mismatch() {
		let v = TypedValue::from(42i32);
		let err = value_cast::<i64>(&v).unwrap_err();
		assert!(matches!(
			err,
			TypeError::BadCast {
				expected: "bigint",
				actual: "int"
			}
		));
	}

	#[test]
	fn test_cast_null() {
		let v = TypedValue::make_null(int_type());
		let err = value_cast::<i32>(&v).unwrap_err();
		assert!(matches!(
			err,
			TypeError::BadCast {
				actual: "null",
				..
			}
		));
	}

	#[test]
	fn test_cast_empty() {
		let v = int_type().make_empty();
		assert!(matches!(value_cast::<i32>(&v), Err(TypeError::EmptyValue)));
	}

	#[test]
	fn test_null_serializes_to_nothing() {
		let v = TypedValue::make_null(int_type());
		assert!(v.serialize().unwrap().is_empty());
		assert_eq!(v.serialized_size().unwrap(), 0);
	}

	#[test]
	fn test_equality_requires_same_descriptor() {
		let a = TypedValue::from(1i32);
		let b = TypedValue::from(1i64);
		assert_ne!(a, b);
		assert_eq!(a, TypedValue::from(1i32));
	}

	#[test]
	fn test_null_equals_empty_of_same_type() {
		// Both serialize to zero bytes.
		let null = TypedValue::make_null(bigint_type());
		let empty = bigint_type().make_empty();
		assert_eq!(null, empty);
	}

	#[test]
	fn test_display() {
		assert_eq!(TypedValue::from(7i64).to_string(), "7");
		assert_eq!(TypedValue::make_null(int_type()).to_string(), "null");
	}
}
