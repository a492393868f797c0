// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Type descriptors: immutable objects describing one database type.
//!
//! A descriptor knows how to serialize, order, validate and render the
//! values of its type. Descriptors are shared behind [`DataType`] and
//! compared by identity; the registry guarantees one instance per
//! distinct type within a context, which makes identity comparison
//! sound.

pub mod builtin;
pub mod collection;
pub mod reversed;
pub mod scalar;
pub mod tuple;

use std::cmp::Ordering;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use xxhash_rust::xxh3::xxh3_64;

use crate::error::{Result, TypeError};
use crate::format::SerializationFormat;
use crate::registry::TypeRegistry;
use crate::value::native::{NativeType, NativeValue};
use crate::value::typed::TypedValue;

/// Shared handle to a descriptor. Equality of types is handle identity.
pub type DataType = Arc<dyn TypeDescriptor>;

/// Closed classification of every descriptor.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
	Ascii,
	Boolean,
	Byte,
	Bytes,
	Counter,
	Decimal,
	Double,
	Empty,
	Float,
	Int32,
	List,
	Long,
	Map,
	Reversed,
	Set,
	Short,
	SimpleDate,
	Time,
	Timestamp,
	Timeuuid,
	Tuple,
	User,
	Utf8,
	Uuid,
	Varint,
}

/// Behavior of one database type.
///
/// Implementations are stateless and immutable after construction, so a
/// descriptor may be shared freely across threads. Zero-length input is
/// never an error on the deserialize path: it decodes to the type's
/// empty value.
pub trait TypeDescriptor: Send + Sync {
	fn name(&self) -> &str;

	fn kind(&self) -> Kind;

	/// Appends the serialized form of `value` to `out`. Fails when the
	/// native representation does not belong to this type.
	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()>;

	/// Decodes a serialized form. Zero bytes decode to the empty value.
	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue>;

	/// Strict less-than over serialized forms. Total over arbitrary
	/// bytes: malformed input is ordered, never an error.
	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool;

	/// Human-readable rendering of a native value.
	fn to_string_value(&self, value: &NativeValue) -> String;

	/// Parses the textual form into serialized bytes. The empty string
	/// produces the empty value's serialization.
	fn from_string(&self, text: &str) -> Result<Vec<u8>>;

	/// Renders serialized bytes as a JSON document fragment.
	fn to_json_string(&self, bytes: &[u8]) -> Result<String>;

	/// Converts a JSON value into serialized bytes.
	fn from_json_object(
		&self,
		json: &serde_json::Value,
		format: SerializationFormat,
	) -> Result<Vec<u8>>;

	/// The native representation of this type's empty value.
	fn make_empty_value(&self) -> NativeValue;

	/// Byte width of every non-empty serialization, when constant.
	fn value_length_if_fixed(&self) -> Option<usize> {
		None
	}

	fn serialized_size(&self, value: &NativeValue) -> Result<usize> {
		let mut out = Vec::new();
		self.serialize(value, &mut out)?;
		Ok(out.len())
	}

	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		if self.less(lhs, rhs) {
			Ordering::Less
		} else if self.less(rhs, lhs) {
			Ordering::Greater
		} else {
			Ordering::Equal
		}
	}

	/// Equality consistent with [`TypeDescriptor::compare`].
	fn equal(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		if self.is_byte_order_equal() {
			lhs == rhs
		} else {
			self.compare(lhs, rhs) == Ordering::Equal
		}
	}

	/// Hash over serialized bytes, consistent with
	/// [`TypeDescriptor::equal`]: types whose equality is coarser than
	/// byte identity must override this.
	fn hash(&self, bytes: &[u8]) -> u64 {
		xxh3_64(bytes)
	}

	/// Checks that `bytes` is a well-formed serialization.
	fn validate(&self, _bytes: &[u8], _format: SerializationFormat) -> Result<()> {
		Ok(())
	}

	/// Validates, then renders. The safe path for untrusted bytes.
	fn get_string(&self, bytes: &[u8]) -> Result<String> {
		self.validate(bytes, SerializationFormat::internal())?;
		Ok(self.to_string_value(&self.deserialize(bytes)?))
	}

	/// Whether unsigned byte order agrees with [`TypeDescriptor::less`].
	fn is_byte_order_comparable(&self) -> bool {
		false
	}

	/// Whether byte identity agrees with [`TypeDescriptor::equal`].
	/// Weaker than byte-order comparability.
	fn is_byte_order_equal(&self) -> bool {
		self.is_byte_order_comparable()
	}

	fn is_string(&self) -> bool {
		false
	}

	/// False for the composite types built out of other descriptors.
	fn is_native(&self) -> bool {
		true
	}

	/// Whether values consist of independently updatable cells.
	fn is_multi_cell(&self) -> bool {
		false
	}

	/// The wrapped descriptor, for order-modifying wrappers.
	fn underlying_type(&self) -> Option<&DataType> {
		None
	}

	/// Whether stored data written under `previous` remains fully
	/// readable, order included, under `self`. The default covers the
	/// parameterless builtins, which exist as one descriptor per kind;
	/// descriptors with type parameters must override.
	fn is_compatible_with(&self, previous: &dyn TypeDescriptor) -> bool {
		self.kind() == previous.kind()
	}

	/// Value-only compatibility, ordering excluded. Called with reversal
	/// already stripped from both sides.
	fn is_value_compatible_with_internal(&self, other: &dyn TypeDescriptor) -> bool {
		self.is_compatible_with(other)
	}

	/// Whether this type mentions the named user type anywhere.
	fn references_user_type(&self, _keyspace: &str, _name: &str) -> bool {
		false
	}

	/// Rebuilds this descriptor with a redefined user type substituted,
	/// or `None` when unaffected.
	fn update_user_type(
		&self,
		_registry: &mut TypeRegistry,
		_updated: &DataType,
	) -> Option<DataType> {
		None
	}

	/// Component types of composite descriptors, in declaration order.
	/// For maps the key precedes the value.
	fn type_parameters(&self) -> Vec<DataType> {
		Vec::new()
	}

	/// The `(keyspace, name)` pair of a user-defined type.
	fn user_type_identity(&self) -> Option<(&str, &str)> {
		None
	}

	fn is_collection(&self) -> bool {
		matches!(self.kind(), Kind::List | Kind::Set | Kind::Map)
	}

	fn is_reversed(&self) -> bool {
		self.kind() == Kind::Reversed
	}

	fn is_tuple(&self) -> bool {
		matches!(self.kind(), Kind::Tuple | Kind::User)
	}

	fn is_user_type(&self) -> bool {
		self.kind() == Kind::User
	}

	fn is_counter(&self) -> bool {
		self.kind() == Kind::Counter
	}

	fn is_atomic(&self) -> bool {
		!self.is_collection() && !self.is_tuple()
	}
}

/// Operations on the shared handle that need the handle itself.
pub trait DataTypeExt {
	fn deserialize_value(&self, bytes: &[u8]) -> Result<TypedValue>;
	fn make_null(&self) -> TypedValue;
	fn make_empty(&self) -> TypedValue;
	/// Wraps a native value after checking it is this type's
	/// representation. Composite values go through their dedicated
	/// constructors instead.
	fn make_value<T: NativeType>(&self, value: T) -> Result<TypedValue>;
	/// Strips order-modifying wrappers.
	fn underlying(&self) -> &DataType;
	fn is_value_compatible_with(&self, other: &DataType) -> bool;
	fn same_as(&self, other: &DataType) -> bool;
	fn as_less_comparator(&self) -> SerializedCompare;
	fn as_tri_comparator(&self) -> SerializedTriCompare;
}

impl DataTypeExt for DataType {
	fn deserialize_value(&self, bytes: &[u8]) -> Result<TypedValue> {
		let native = self.deserialize(bytes)?;
		Ok(TypedValue::from_parts(self.clone(), Some(native)))
	}

	fn make_null(&self) -> TypedValue {
		TypedValue::make_null(self.clone())
	}

	fn make_empty(&self) -> TypedValue {
		TypedValue::from_parts(self.clone(), Some(self.make_empty_value()))
	}

	fn make_value<T: NativeType>(&self, value: T) -> Result<TypedValue> {
		let native = value.wrap();
		let expected = self.make_empty_value();
		if std::mem::discriminant(&native) != std::mem::discriminant(&expected) {
			return Err(TypeError::runtime(format!(
				"native value of type {} does not belong to {}",
				native.type_name(),
				self.name()
			)));
		}
		Ok(TypedValue::from_parts(self.clone(), Some(native)))
	}

	fn underlying(&self) -> &DataType {
		self.underlying_type().unwrap_or(self)
	}

	fn is_value_compatible_with(&self, other: &DataType) -> bool {
		self.underlying()
			.is_value_compatible_with_internal(other.underlying().as_ref())
	}

	fn same_as(&self, other: &DataType) -> bool {
		Arc::ptr_eq(self, other)
	}

	fn as_less_comparator(&self) -> SerializedCompare {
		SerializedCompare(self.clone())
	}

	fn as_tri_comparator(&self) -> SerializedTriCompare {
		SerializedTriCompare(self.clone())
	}
}

/// Strict-weak-order predicate over serialized forms, for use as a
/// sorted-container comparator.
#[derive(Clone)]
pub struct SerializedCompare(DataType);

impl SerializedCompare {
	pub fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.0.less(lhs, rhs)
	}
}

/// Three-way comparator over serialized forms.
#[derive(Clone)]
pub struct SerializedTriCompare(DataType);

impl SerializedTriCompare {
	pub fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		self.0.compare(lhs, rhs)
	}
}

/// Hasher over serialized forms, consistent with [`SerializedEqual`].
#[derive(Clone)]
pub struct SerializedHash(pub DataType);

impl SerializedHash {
	pub fn hash(&self, bytes: &[u8]) -> u64 {
		self.0.hash(bytes)
	}
}

/// Equality predicate over serialized forms.
#[derive(Clone)]
pub struct SerializedEqual(pub DataType);

impl SerializedEqual {
	pub fn equal(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.0.equal(lhs, rhs)
	}
}

#[cfg(test)]
mod tests {
	use super::builtin::{boolean_type, int_type, timeuuid_type, uuid_type};
	use super::*;

	#[test]
	fn test_compare_agrees_with_less() {
		let t = int_type();
		let a = 1i32.to_be_bytes();
		let b = 2i32.to_be_bytes();
		assert_eq!(t.compare(&a, &b), Ordering::Less);
		assert_eq!(t.compare(&b, &a), Ordering::Greater);
		assert_eq!(t.compare(&a, &a), Ordering::Equal);
	}

	#[test]
	fn test_identity_compatibility() {
		let a = int_type();
		let b = int_type();
		// Builtins are singletons, so two lookups share one instance.
		assert!(a.same_as(&b));
		assert!(a.is_compatible_with(b.as_ref()));
		assert!(!a.is_compatible_with(boolean_type().as_ref()));
	}

	#[test]
	fn test_compatibility_separates_builtin_kinds() {
		// Builtin descriptors are stateless, so compatibility goes
		// through the kind, never through instance addresses.
		assert!(uuid_type().is_compatible_with(uuid_type().as_ref()));
		assert!(!timeuuid_type().is_compatible_with(uuid_type().as_ref()));
		assert!(!uuid_type().is_compatible_with(timeuuid_type().as_ref()));
	}

	#[test]
	fn test_make_value_rejects_foreign_representation() {
		let t = int_type();
		assert!(t.make_value(42i32).is_ok());
		assert!(t.make_value(42i64).is_err());
	}

	#[test]
	fn test_comparator_adaptors() {
		let t = int_type();
		let less = t.as_less_comparator();
		let tri = t.as_tri_comparator();
		let a = 1i32.to_be_bytes();
		let b = 2i32.to_be_bytes();
		assert!(less.less(&a, &b));
		assert_eq!(tri.compare(&b, &a), Ordering::Greater);
	}

	#[test]
	fn test_hash_equal_consistency() {
		let t = int_type();
		let a = 7i32.to_be_bytes();
		let b = 7i32.to_be_bytes();
		assert!(t.equal(&a, &b));
		assert_eq!(t.hash(&a), t.hash(&b));
	}
}
