// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Value types for the storage and query layers.
//!
//! The crate revolves around three pieces: [`TypeDescriptor`], an
//! immutable object describing one database type (how its values
//! serialize, order, validate and render); [`TypedValue`], one native
//! value bound to its descriptor; and [`TypeRegistry`], the per-context
//! interner that keeps descriptor identity equal to type equality for
//! derived types such as `list<int>` or `reversed<timestamp>`.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod descriptor;
pub mod error;
pub mod format;
pub mod order;
pub mod registry;
pub mod util;
pub mod value;

pub use descriptor::builtin::{
	ascii_type, bigint_type, boolean_type, by_name, byte_type, bytes_type, counter_type,
	date_type, decimal_type, double_type, empty_type, float_type, int_type, short_type,
	time_type, timestamp_type, timeuuid_type, utf8_type, uuid_type, varint_type,
};
pub use descriptor::collection::{make_list_value, make_map_value, make_set_value};
pub use descriptor::tuple::{make_tuple_value, make_user_value};
pub use descriptor::{
	DataType, DataTypeExt, Kind, SerializedCompare, SerializedEqual, SerializedHash,
	SerializedTriCompare, TypeDescriptor,
};
pub use error::{Result, TypeError};
pub use format::SerializationFormat;
pub use order::Relation;
pub use registry::TypeRegistry;
pub use value::{
	Ascii, Emptyable, NativeType, NativeValue, SimpleDate, Time, Timestamp, Timeuuid, TypedValue,
	value_cast,
};
