// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! The order-inverting wrapper.
//!
//! A reversed type stores, renders and validates exactly like the type
//! it wraps; only the comparison direction changes. Everything that
//! asks about values rather than order should strip the wrapper via
//! `underlying()`.

use std::cmp::Ordering;

use crate::descriptor::{DataType, Kind, TypeDescriptor};
use crate::error::Result;
use crate::format::SerializationFormat;
use crate::registry::TypeRegistry;
use crate::value::native::NativeValue;

pub struct ReversedType {
	underlying: DataType,
	name: String,
}

impl ReversedType {
	pub(crate) fn new(underlying: DataType) -> Self {
		let name = format!("reversed<{}>", underlying.name());
		ReversedType {
			underlying,
			name,
		}
	}
}

impl TypeDescriptor for ReversedType {
	fn name(&self) -> &str {
		&self.name
	}

	fn kind(&self) -> Kind {
		Kind::Reversed
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		self.underlying.serialize(value, out)
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		self.underlying.deserialize(bytes)
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.underlying.less(rhs, lhs)
	}

	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		self.underlying.compare(rhs, lhs)
	}

	fn equal(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.underlying.equal(lhs, rhs)
	}

	fn hash(&self, bytes: &[u8]) -> u64 {
		self.underlying.hash(bytes)
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		self.underlying.to_string_value(value)
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		self.underlying.from_string(text)
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		self.underlying.to_json_string(bytes)
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		format: SerializationFormat,
	) -> Result<Vec<u8>> {
		self.underlying.from_json_object(json, format)
	}

	fn make_empty_value(&self) -> NativeValue {
		self.underlying.make_empty_value()
	}

	fn value_length_if_fixed(&self) -> Option<usize> {
		self.underlying.value_length_if_fixed()
	}

	fn serialized_size(&self, value: &NativeValue) -> Result<usize> {
		self.underlying.serialized_size(value)
	}

	fn validate(&self, bytes: &[u8], format: SerializationFormat) -> Result<()> {
		self.underlying.validate(bytes, format)
	}

	// The wrapped order is inverted, so byte order never applies even
	// when it does for the underlying type.
	fn is_byte_order_comparable(&self) -> bool {
		false
	}

	fn is_byte_order_equal(&self) -> bool {
		self.underlying.is_byte_order_equal()
	}

	fn is_string(&self) -> bool {
		self.underlying.is_string()
	}

	fn is_native(&self) -> bool {
		self.underlying.is_native()
	}

	fn is_multi_cell(&self) -> bool {
		self.underlying.is_multi_cell()
	}

	fn underlying_type(&self) -> Option<&DataType> {
		Some(&self.underlying)
	}

	fn is_compatible_with(&self, previous: &dyn TypeDescriptor) -> bool {
		match previous.underlying_type() {
			Some(inner) if previous.is_reversed() => {
				self.underlying.is_compatible_with(inner.as_ref())
			}
			_ => false,
		}
	}

	fn is_value_compatible_with_internal(&self, other: &dyn TypeDescriptor) -> bool {
		self.underlying.is_value_compatible_with_internal(other)
	}

	fn references_user_type(&self, keyspace: &str, name: &str) -> bool {
		self.underlying.references_user_type(keyspace, name)
	}

	fn update_user_type(
		&self,
		registry: &mut TypeRegistry,
		updated: &DataType,
	) -> Option<DataType> {
		self.underlying
			.update_user_type(registry, updated)
			.map(|inner| registry.reversed(inner))
	}

	fn type_parameters(&self) -> Vec<DataType> {
		vec![self.underlying.clone()]
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use super::*;
	use crate::descriptor::DataTypeExt;
	use crate::descriptor::builtin::int_type;

	fn reversed_int() -> DataType {
		Arc::new(ReversedType::new(int_type()))
	}

	#[test]
	fn test_order_is_inverted() {
		let t = reversed_int();
		let one = 1i32.to_be_bytes();
		let two = 2i32.to_be_bytes();
		assert!(t.less(&two, &one));
		assert!(!t.less(&one, &two));
		assert_eq!(t.compare(&one, &two), Ordering::Greater);
	}

	#[test]
	fn test_values_are_untouched() {
		let t = reversed_int();
		let bytes = 7i32.to_be_bytes();
		assert!(t.equal(&bytes, &bytes));
		assert_eq!(t.hash(&bytes), int_type().hash(&bytes));
		assert_eq!(t.get_string(&bytes).unwrap(), "7");
		assert_eq!(t.from_string("7").unwrap(), bytes);
	}

	#[test]
	fn test_underlying_strips_wrapper() {
		let t = reversed_int();
		assert!(t.underlying().same_as(&int_type()));
		assert_eq!(t.name(), "reversed<int>");
		assert!(t.is_reversed());
	}

	#[test]
	fn test_value_compatibility_ignores_reversal() {
		let t = reversed_int();
		assert!(t.is_value_compatible_with(&int_type()));
		assert!(int_type().is_value_compatible_with(&t));
	}

	#[test]
	fn test_not_byte_order_comparable() {
		let t = reversed_int();
		assert!(!t.is_byte_order_comparable());
	}
}
