// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Process-wide singletons for the builtin scalars.
//!
//! Builtins carry no parameters, so one shared instance per process is
//! enough for identity comparison to work; only derived types need a
//! registry.

use std::sync::Arc;

use bigdecimal::BigDecimal;
use num_bigint::BigInt;
use once_cell::sync::Lazy;
use uuid::Uuid;

use crate::descriptor::DataType;
use crate::descriptor::scalar::bignum::{DecimalType, VarintType};
use crate::descriptor::scalar::float::{DoubleType, FloatType};
use crate::descriptor::scalar::temporal::{SimpleDateType, TimeType, TimestampType};
use crate::descriptor::scalar::text::{AsciiType, BytesType, Utf8Type};
use crate::descriptor::scalar::uuid::{TimeuuidType, UuidType};
use crate::descriptor::scalar::{
	BooleanType, ByteType, CounterType, EmptyType, Int32Type, LongType, ShortType,
};
use crate::value::native::{Ascii, NativeType, SimpleDate, Time, Timestamp, Timeuuid};

macro_rules! builtin {
	($static_name:ident, $accessor:ident, $descriptor:expr) => {
		static $static_name: Lazy<DataType> = Lazy::new(|| Arc::new($descriptor));

		pub fn $accessor() -> DataType {
			$static_name.clone()
		}
	};
}

builtin!(BOOLEAN, boolean_type, BooleanType);
builtin!(BYTE, byte_type, ByteType);
builtin!(SHORT, short_type, ShortType);
builtin!(INT, int_type, Int32Type);
builtin!(BIGINT, bigint_type, LongType);
builtin!(FLOAT, float_type, FloatType);
builtin!(DOUBLE, double_type, DoubleType);
builtin!(ASCII, ascii_type, AsciiType);
builtin!(UTF8, utf8_type, Utf8Type);
builtin!(BYTES, bytes_type, BytesType);
builtin!(UUID, uuid_type, UuidType);
builtin!(TIMEUUID, timeuuid_type, TimeuuidType);
builtin!(TIMESTAMP, timestamp_type, TimestampType);
builtin!(DATE, date_type, SimpleDateType);
builtin!(TIME, time_type, TimeType);
builtin!(VARINT, varint_type, VarintType);
builtin!(DECIMAL, decimal_type, DecimalType);
builtin!(COUNTER, counter_type, CounterType);
builtin!(EMPTY, empty_type, EmptyType);

/// Looks a builtin up by its written name, aliases included.
pub fn by_name(name: &str) -> Option<DataType> {
	match name {
		"boolean" => Some(boolean_type()),
		"tinyint" => Some(byte_type()),
		"smallint" => Some(short_type()),
		"int" => Some(int_type()),
		"bigint" => Some(bigint_type()),
		"float" => Some(float_type()),
		"double" => Some(double_type()),
		"ascii" => Some(ascii_type()),
		"text" | "varchar" => Some(utf8_type()),
		"blob" => Some(bytes_type()),
		"uuid" => Some(uuid_type()),
		"timeuuid" => Some(timeuuid_type()),
		"timestamp" => Some(timestamp_type()),
		"date" => Some(date_type()),
		"time" => Some(time_type()),
		"varint" => Some(varint_type()),
		"decimal" => Some(decimal_type()),
		"counter" => Some(counter_type()),
		"empty" => Some(empty_type()),
		_ => None,
	}
}

/// Native representations with one canonical builtin descriptor. The
/// untyped-to-typed conversions go through this.
pub trait HasBuiltinType: NativeType {
	fn builtin_type() -> DataType;
}

macro_rules! has_builtin {
	($($native:ty => $accessor:ident),* $(,)?) => {$(
		impl HasBuiltinType for $native {
			fn builtin_type() -> DataType {
				$accessor()
			}
		}
	)*};
}

has_builtin! {
	bool => boolean_type,
	i8 => byte_type,
	i16 => short_type,
	i32 => int_type,
	i64 => bigint_type,
	f32 => float_type,
	f64 => double_type,
	String => utf8_type,
	Vec<u8> => bytes_type,
	Uuid => uuid_type,
	Timeuuid => timeuuid_type,
	Timestamp => timestamp_type,
	SimpleDate => date_type,
	Time => time_type,
	Ascii => ascii_type,
	BigInt => varint_type,
	BigDecimal => decimal_type,
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::{DataTypeExt, Kind};

	#[test]
	fn test_singletons() {
		assert!(int_type().same_as(&int_type()));
		assert!(int_type().same_as(&by_name("int").unwrap()));
	}

	#[test]
	fn test_varchar_alias() {
		assert!(by_name("varchar").unwrap().same_as(&utf8_type()));
	}

	#[test]
	fn test_unknown_name() {
		assert!(by_name("quux").is_none());
	}

	#[test]
	fn test_names_round_trip() {
		for name in [
			"boolean",
			"tinyint",
			"smallint",
			"int",
			"bigint",
			"float",
			"double",
			"ascii",
			"text",
			"blob",
			"uuid",
			"timeuuid",
			"timestamp",
			"date",
			"time",
			"varint",
			"decimal",
			"counter",
			"empty",
		] {
			assert_eq!(by_name(name).unwrap().name(), name);
		}
	}

	#[test]
	fn test_counter_is_counter_kind() {
		assert_eq!(counter_type().kind(), Kind::Counter);
		assert!(counter_type().is_counter());
	}
}
