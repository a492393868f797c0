// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Native representations and the bridge that erases them.
//!
//! Each descriptor declares exactly one native representation. The
//! [`NativeValue`] union holds any of them behind one type, and the
//! [`NativeType`] trait supplies the per-representation glue (wrap,
//! unwrap, identity token) without per-type boilerplate. Clone and drop
//! come from ownership; no manual lifetime management is involved.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use uuid::Uuid;

use crate::error::{Result, TypeError};
use crate::value::emptyable::Emptyable;
use crate::value::typed::TypedValue;

macro_rules! scalar_newtype {
	($(#[$doc:meta])* $name:ident($inner:ty)) => {
		$(#[$doc])*
		#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
		pub struct $name(pub $inner);

		impl Display for $name {
			fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
				Display::fmt(&self.0, f)
			}
		}

		impl From<$inner> for $name {
			fn from(value: $inner) -> Self {
				$name(value)
			}
		}
	};
}

scalar_newtype! {
	/// Milliseconds since the Unix epoch.
	Timestamp(i64)
}

scalar_newtype! {
	/// Day count with the Unix epoch at `1 << 31`, so earlier days fit
	/// below it.
	SimpleDate(u32)
}

scalar_newtype! {
	/// Nanoseconds since midnight.
	Time(i64)
}

impl FromStr for Timestamp {
	type Err = TypeError;

	fn from_str(s: &str) -> Result<Self> {
		s.parse::<i64>()
			.map(Timestamp)
			.map_err(|e| TypeError::marshal(format!("invalid timestamp {s:?}: {e}")))
	}
}

impl FromStr for SimpleDate {
	type Err = TypeError;

	fn from_str(s: &str) -> Result<Self> {
		s.parse::<u32>()
			.map(SimpleDate)
			.map_err(|e| TypeError::marshal(format!("invalid date {s:?}: {e}")))
	}
}

impl FromStr for Time {
	type Err = TypeError;

	fn from_str(s: &str) -> Result<Self> {
		s.parse::<i64>()
			.map(Time)
			.map_err(|e| TypeError::marshal(format!("invalid time {s:?}: {e}")))
	}
}

/// Seven-bit text. Distinct from [`String`] so casts cannot confuse the
/// ascii and utf8 types.
#[derive(Clone, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ascii(pub String);

impl Display for Ascii {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(&self.0)
	}
}

/// A version-1 UUID ordered by its embedded timestamp.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timeuuid(pub Uuid);

impl Display for Timeuuid {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		Display::fmt(&self.0, f)
	}
}

/// Type-erased storage for one native value.
///
/// Representations without a natural empty state sit inside
/// [`Emptyable`]; strings, byte buffers and element vectors are stored
/// directly, since their zero-length value already is the empty value.
#[derive(Clone, Debug, PartialEq)]
pub enum NativeValue {
	Boolean(Emptyable<bool>),
	Byte(Emptyable<i8>),
	Short(Emptyable<i16>),
	Int32(Emptyable<i32>),
	Long(Emptyable<i64>),
	Float(Emptyable<f32>),
	Double(Emptyable<f64>),
	Ascii(Emptyable<Ascii>),
	Text(String),
	Bytes(Vec<u8>),
	Uuid(Emptyable<Uuid>),
	Timeuuid(Emptyable<Timeuuid>),
	Timestamp(Emptyable<Timestamp>),
	Date(Emptyable<SimpleDate>),
	Time(Emptyable<Time>),
	Varint(Emptyable<BigInt>),
	Decimal(Emptyable<BigDecimal>),
	Empty,
	List(Vec<TypedValue>),
	Set(Vec<TypedValue>),
	Map(Vec<(TypedValue, TypedValue)>),
	Tuple(Vec<TypedValue>),
	User(Vec<TypedValue>),
}

impl NativeValue {
	/// Stable label used in cast and mismatch diagnostics.
	pub fn type_name(&self) -> &'static str {
		match self {
			NativeValue::Boolean(_) => "boolean",
			NativeValue::Byte(_) => "tinyint",
			NativeValue::Short(_) => "smallint",
			NativeValue::Int32(_) => "int",
			NativeValue::Long(_) => "bigint",
			NativeValue::Float(_) => "float",
			NativeValue::Double(_) => "double",
			NativeValue::Ascii(_) => "ascii",
			NativeValue::Text(_) => "text",
			NativeValue::Bytes(_) => "blob",
			NativeValue::Uuid(_) => "uuid",
			NativeValue::Timeuuid(_) => "timeuuid",
			NativeValue::Timestamp(_) => "timestamp",
			NativeValue::Date(_) => "date",
			NativeValue::Time(_) => "time",
			NativeValue::Varint(_) => "varint",
			NativeValue::Decimal(_) => "decimal",
			NativeValue::Empty => "empty",
			NativeValue::List(_) => "list",
			NativeValue::Set(_) => "set",
			NativeValue::Map(_) => "map",
			NativeValue::Tuple(_) => "tuple",
			NativeValue::User(_) => "user",
		}
	}
}

/// Bridge between one concrete native representation and the erased
/// [`NativeValue`] union.
///
/// `unwrap` returns `None` when the stored variant does not match
/// `Self` (an identity-token mismatch) and `Err` when the value carries
/// the empty discriminant.
pub trait NativeType: Sized {
	/// Identity token, reported in bad-cast errors.
	const NAME: &'static str;

	fn wrap(self) -> NativeValue;
	fn wrap_empty() -> NativeValue;
	fn unwrap(value: &NativeValue) -> Option<Result<&Self>>;
}

macro_rules! emptyable_native {
	($native:ty, $variant:ident, $name:literal) => {
		impl NativeType for $native {
			const NAME: &'static str = $name;

			fn wrap(self) -> NativeValue {
				NativeValue::$variant(Emptyable::Value(self))
			}

			fn wrap_empty() -> NativeValue {
				NativeValue::$variant(Emptyable::Empty)
			}

			fn unwrap(value: &NativeValue) -> Option<Result<&Self>> {
				match value {
					NativeValue::$variant(inner) => Some(inner.get()),
					_ => None,
				}
			}
		}
	};
}

macro_rules! natural_native {
	($native:ty, $variant:ident, $name:literal) => {
		impl NativeType for $native {
			const NAME: &'static str = $name;

			fn wrap(self) -> NativeValue {
				NativeValue::$variant(self)
			}

			fn wrap_empty() -> NativeValue {
				NativeValue::$variant(<$native>::default())
			}

			fn unwrap(value: &NativeValue) -> Option<Result<&Self>> {
				match value {
					NativeValue::$variant(inner) => Some(Ok(inner)),
					_ => None,
				}
			}
		}
	};
}

emptyable_native!(bool, Boolean, "boolean");
emptyable_native!(i8, Byte, "tinyint");
emptyable_native!(i16, Short, "smallint");
emptyable_native!(i32, Int32, "int");
emptyable_native!(i64, Long, "bigint");
emptyable_native!(f32, Float, "float");
emptyable_native!(f64, Double, "double");
emptyable_native!(Ascii, Ascii, "ascii");
emptyable_native!(Uuid, Uuid, "uuid");
emptyable_native!(Timeuuid, Timeuuid, "timeuuid");
emptyable_native!(Timestamp, Timestamp, "timestamp");
emptyable_native!(SimpleDate, Date, "date");
emptyable_native!(Time, Time, "time");
emptyable_native!(BigInt, Varint, "varint");
emptyable_native!(BigDecimal, Decimal, "decimal");

natural_native!(String, Text, "text");
natural_native!(Vec<u8>, Bytes, "blob");

// All list-like composites share one native representation, so a cast to
// `Vec<TypedValue>` succeeds for any of them.
impl NativeType for Vec<TypedValue> {
	const NAME: &'static str = "vector";

	fn wrap(self) -> NativeValue {
		NativeValue::List(self)
	}

	fn wrap_empty() -> NativeValue {
		NativeValue::List(Vec::new())
	}

	fn unwrap(value: &NativeValue) -> Option<Result<&Self>> {
		match value {
			NativeValue::List(inner)
			| NativeValue::Set(inner)
			| NativeValue::Tuple(inner)
			| NativeValue::User(inner) => Some(Ok(inner)),
			_ => None,
		}
	}
}

impl NativeType for Vec<(TypedValue, TypedValue)> {
	const NAME: &'static str = "map";

	fn wrap(self) -> NativeValue {
		NativeValue::Map(self)
	}

	fn wrap_empty() -> NativeValue {
		NativeValue::Map(Vec::new())
	}

	fn unwrap(value: &NativeValue) -> Option<Result<&Self>> {
		match value {
			NativeValue::Map(inner) => Some(Ok(inner)),
			_ => None,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_unwrap_matching_variant() {
		let v = 42i32.wrap();
		assert_eq!(*i32::unwrap(&v).unwrap().unwrap(), 42);
	}

	#[test]
	fn test_unwrap_wrong_variant() {
		let v = 42i32.wrap();
		assert!(i64::unwrap(&v).is_none());
	}

	#[test]
	fn test_unwrap_empty() {
		let v = i32::wrap_empty();
		assert!(matches!(i32::unwrap(&v), Some(Err(TypeError::EmptyValue))));
	}

	#[test]
	fn test_ascii_is_not_text() {
		let v = Ascii("a".into()).wrap();
		assert!(String::unwrap(&v).is_none());
		assert!(Ascii::unwrap(&v).is_some());
	}

	#[test]
	fn test_natural_empty_is_readable() {
		let v = String::wrap_empty();
		assert_eq!(String::unwrap(&v).unwrap().unwrap(), "");
	}
}
