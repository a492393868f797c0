// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! List, set and map descriptors.
//!
//! The serialized form is an entry count followed by length-prefixed
//! element serializations, maps storing key then value per entry. Field
//! widths depend on the wire generation; storage always uses the
//! internal format. Null elements are not representable inside a
//! collection.

use std::cmp::Ordering;

use xxhash_rust::xxh3::xxh3_64;

use crate::descriptor::{DataType, DataTypeExt, Kind, TypeDescriptor};
use crate::error::{Result, TypeError};
use crate::format::{
	SerializationFormat, collection_size_len, read_collection_size, read_collection_value,
	write_collection_size, write_collection_value,
};
use crate::order::lexicographical_tri_compare;
use crate::order::Relation;
use crate::registry::TypeRegistry;
use crate::value::native::NativeValue;
use crate::value::typed::TypedValue;

/// Splits a serialized collection into its element serializations. The
/// size field counts entries; maps store two components per entry.
/// Zero-length input is the empty collection.
fn read_components(
	bytes: &[u8],
	format: SerializationFormat,
	per_entry: usize,
) -> Result<Vec<&[u8]>> {
	if bytes.is_empty() {
		return Ok(Vec::new());
	}
	let mut view = bytes;
	let count = read_collection_size(&mut view, format)?;
	// Each component needs at least its length prefix.
	if count > view.len() / (collection_size_len(format) * per_entry) {
		return Err(TypeError::marshal(format!(
			"collection claims {count} entries in {} bytes",
			view.len()
		)));
	}
	let mut out = Vec::with_capacity(count * per_entry);
	for _ in 0..count * per_entry {
		out.push(read_collection_value(&mut view, format)?);
	}
	if !view.is_empty() {
		return Err(TypeError::marshal(format!(
			"{} trailing bytes after collection elements",
			view.len()
		)));
	}
	Ok(out)
}

fn serialize_elements<'a, I>(count: usize, elements: I, out: &mut Vec<u8>) -> Result<()>
where
	I: Iterator<Item = &'a TypedValue>,
{
	let format = SerializationFormat::internal();
	write_collection_size(out, count, format);
	for element in elements {
		if element.is_null() {
			return Err(TypeError::marshal("null element in collection".to_string()));
		}
		write_collection_value(out, &element.serialize()?, format);
	}
	Ok(())
}

fn check_element_type(dtype: &DataType, element: &TypedValue, what: &str) -> Result<()> {
	if element.data_type().same_as(dtype) {
		Ok(())
	} else {
		Err(TypeError::runtime(format!(
			"{what} of type {} does not match {}",
			element.data_type().name(),
			dtype.name()
		)))
	}
}

macro_rules! sequence_descriptor {
	($descriptor:ident, $variant:ident, $kind:ident, $method:ident, $label:literal, $open:literal, $close:literal) => {
		pub struct $descriptor {
			element: DataType,
			multi_cell: bool,
			name: String,
		}

		impl $descriptor {
			pub(crate) fn new(element: DataType, multi_cell: bool) -> Self {
				let name = if multi_cell {
					format!(concat!($label, "<{}>"), element.name())
				} else {
					format!(concat!("frozen<", $label, "<{}>>"), element.name())
				};
				$descriptor {
					element,
					multi_cell,
					name,
				}
			}

			pub fn element_type(&self) -> &DataType {
				&self.element
			}
		}

		impl TypeDescriptor for $descriptor {
			fn name(&self) -> &str {
				&self.name
			}

			fn kind(&self) -> Kind {
				Kind::$kind
			}

			fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
				match value {
					NativeValue::$variant(elements) => {
						for element in elements {
							check_element_type(&self.element, element, "element")?;
						}
						serialize_elements(elements.len(), elements.iter(), out)
					}
					other => Err(crate::descriptor::scalar::mismatch($label, other)),
				}
			}

			fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
				let components =
					read_components(bytes, SerializationFormat::internal(), 1)?;
				let mut elements = Vec::with_capacity(components.len());
				for component in components {
					elements.push(self.element.deserialize_value(component)?);
				}
				Ok(NativeValue::$variant(elements))
			}

			fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
				self.compare(lhs, rhs) == Ordering::Less
			}

			fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
				let format = SerializationFormat::internal();
				let (a, b) = match (
					read_components(lhs, format, 1),
					read_components(rhs, format, 1),
				) {
					(Ok(a), Ok(b)) => (a, b),
					_ => return lhs.cmp(rhs),
				};
				let types = vec![self.element.clone(); a.len().min(b.len())];
				lexicographical_tri_compare(
					&types,
					&a,
					&b,
					|t, x: &&[u8], y: &&[u8]| t.compare(x, y),
					Relation::BeforeAllPrefixed,
					Relation::BeforeAllPrefixed,
				)
			}

			fn to_string_value(&self, value: &NativeValue) -> String {
				match value {
					NativeValue::$variant(elements) => {
						let rendered: Vec<String> =
							elements.iter().map(|e| e.to_string()).collect();
						format!("{}{}{}", $open, rendered.join(", "), $close)
					}
					_ => String::new(),
				}
			}

			fn from_string(&self, text: &str) -> Result<Vec<u8>> {
				if text.is_empty() {
					return Ok(Vec::new());
				}
				let json: serde_json::Value = serde_json::from_str(text).map_err(|e| {
					TypeError::marshal(format!(concat!("invalid ", $label, " literal: {}"), e))
				})?;
				self.from_json_object(&json, SerializationFormat::internal())
			}

			fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
				let components =
					read_components(bytes, SerializationFormat::internal(), 1)?;
				let mut rendered = Vec::with_capacity(components.len());
				for component in components {
					rendered.push(self.element.to_json_string(component)?);
				}
				Ok(format!("[{}]", rendered.join(", ")))
			}

			fn from_json_object(
				&self,
				json: &serde_json::Value,
				format: SerializationFormat,
			) -> Result<Vec<u8>> {
				let items = json.as_array().ok_or_else(|| {
					TypeError::marshal(format!(concat!("expected ", $label, " array, got {}"), json))
				})?;
				let mut out = Vec::new();
				write_collection_size(&mut out, items.len(), format);
				for item in items {
					let serialized = self.element.from_json_object(item, format)?;
					write_collection_value(&mut out, &serialized, format);
				}
				Ok(out)
			}

			fn make_empty_value(&self) -> NativeValue {
				NativeValue::$variant(Vec::new())
			}

			fn validate(&self, bytes: &[u8], format: SerializationFormat) -> Result<()> {
				for component in read_components(bytes, format, 1)? {
					self.element.validate(component, format)?;
				}
				Ok(())
			}

			// Element equality can be coarser than byte identity, so
			// the hash goes element-wise through the element type.
			fn hash(&self, bytes: &[u8]) -> u64 {
				match read_components(bytes, SerializationFormat::internal(), 1) {
					Ok(components) => {
						let mut hashes = Vec::with_capacity(components.len() * 8);
						for component in components {
							hashes.extend_from_slice(
								&self.element.hash(component).to_be_bytes(),
							);
						}
						xxh3_64(&hashes)
					}
					Err(_) => xxh3_64(bytes),
				}
			}

			fn is_native(&self) -> bool {
				false
			}

			fn is_multi_cell(&self) -> bool {
				self.multi_cell
			}

			fn is_compatible_with(&self, previous: &dyn TypeDescriptor) -> bool {
				previous.kind() == Kind::$kind
					&& previous.is_multi_cell() == self.multi_cell
					&& match previous.type_parameters().as_slice() {
						[element] => self.element.is_compatible_with(element.as_ref()),
						_ => false,
					}
			}

			fn is_value_compatible_with_internal(&self, other: &dyn TypeDescriptor) -> bool {
				other.kind() == Kind::$kind
					&& match other.type_parameters().as_slice() {
						[element] => self.element.is_value_compatible_with(element),
						_ => false,
					}
			}

			fn references_user_type(&self, keyspace: &str, name: &str) -> bool {
				self.element.references_user_type(keyspace, name)
			}

			fn update_user_type(
				&self,
				registry: &mut TypeRegistry,
				updated: &DataType,
			) -> Option<DataType> {
				let element = self.element.update_user_type(registry, updated)?;
				Some(registry.$method(element, self.multi_cell))
			}

			fn type_parameters(&self) -> Vec<DataType> {
				vec![self.element.clone()]
			}
		}
	};
}

sequence_descriptor!(ListType, List, List, list, "list", "[", "]");
sequence_descriptor!(SetType, Set, Set, set, "set", "{", "}");

pub struct MapType {
	key: DataType,
	value: DataType,
	multi_cell: bool,
	name: String,
}

impl MapType {
	pub(crate) fn new(key: DataType, value: DataType, multi_cell: bool) -> Self {
		let name = if multi_cell {
			format!("map<{}, {}>", key.name(), value.name())
		} else {
			format!("frozen<map<{}, {}>>", key.name(), value.name())
		};
		MapType {
			key,
			value,
			multi_cell,
			name,
		}
	}

	pub fn key_type(&self) -> &DataType {
		&self.key
	}

	pub fn value_type(&self) -> &DataType {
		&self.value
	}

	// The size field counts entries, each entry being two components.
	fn read_entries<'a>(&self, bytes: &'a [u8], format: SerializationFormat) -> Result<Vec<(&'a [u8], &'a [u8])>> {
		let components = read_components(bytes, format, 2)?;
		Ok(components.chunks_exact(2).map(|pair| (pair[0], pair[1])).collect())
	}
}

impl TypeDescriptor for MapType {
	fn name(&self) -> &str {
		&self.name
	}

	fn kind(&self) -> Kind {
		Kind::Map
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Map(entries) => {
				let format = SerializationFormat::internal();
				write_collection_size(out, entries.len(), format);
				for (key, val) in entries {
					check_element_type(&self.key, key, "key")?;
					check_element_type(&self.value, val, "value")?;
					if key.is_null() || val.is_null() {
						return Err(TypeError::marshal(
							"null entry in map".to_string(),
						));
					}
					write_collection_value(out, &key.serialize()?, format);
					write_collection_value(out, &val.serialize()?, format);
				}
				Ok(())
			}
			other => Err(crate::descriptor::scalar::mismatch("map", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		let entries = self.read_entries(bytes, SerializationFormat::internal())?;
		let mut out = Vec::with_capacity(entries.len());
		for (key, value) in entries {
			out.push((self.key.deserialize_value(key)?, self.value.deserialize_value(value)?));
		}
		Ok(NativeValue::Map(out))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.compare(lhs, rhs) == Ordering::Less
	}

	// Entries compare in stored order, keys before values; the shorter
	// map sorts first on a tie.
	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		let format = SerializationFormat::internal();
		let (a, b) = match (self.read_entries(lhs, format), self.read_entries(rhs, format)) {
			(Ok(a), Ok(b)) => (a, b),
			_ => return lhs.cmp(rhs),
		};
		let n = a.len().min(b.len());
		for i in 0..n {
			let order = self.key.compare(a[i].0, b[i].0);
			if order != Ordering::Equal {
				return order;
			}
			let order = self.value.compare(a[i].1, b[i].1);
			if order != Ordering::Equal {
				return order;
			}
		}
		a.len().cmp(&b.len())
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Map(entries) => {
				let rendered: Vec<String> =
					entries.iter().map(|(k, v)| format!("{k}: {v}")).collect();
				format!("{{{}}}", rendered.join(", "))
			}
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		if text.is_empty() {
			return Ok(Vec::new());
		}
		let json: serde_json::Value = serde_json::from_str(text)
			.map_err(|e| TypeError::marshal(format!("invalid map literal: {e}")))?;
		self.from_json_object(&json, SerializationFormat::internal())
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		let entries = self.read_entries(bytes, SerializationFormat::internal())?;
		let mut rendered = Vec::with_capacity(entries.len());
		for (key, value) in entries {
			let key_json = self.key.to_json_string(key)?;
			// JSON object keys must be strings.
			let key_json = if key_json.starts_with('"') {
				key_json
			} else {
				format!("\"{key_json}\"")
			};
			rendered.push(format!("{key_json}: {}", self.value.to_json_string(value)?));
		}
		Ok(format!("{{{}}}", rendered.join(", ")))
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		format: SerializationFormat,
	) -> Result<Vec<u8>> {
		let object = json
			.as_object()
			.ok_or_else(|| TypeError::marshal(format!("expected map object, got {json}")))?;
		let mut out = Vec::new();
		write_collection_size(&mut out, object.len(), format);
		for (key_text, value) in object {
			// Keys arrive as strings whatever the key type is.
			let key_json = serde_json::from_str(key_text)
				.unwrap_or_else(|_| serde_json::Value::String(key_text.clone()));
			write_collection_value(&mut out, &self.key.from_json_object(&key_json, format)?, format);
			write_collection_value(&mut out, &self.value.from_json_object(value, format)?, format);
		}
		Ok(out)
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Map(Vec::new())
	}

	fn validate(&self, bytes: &[u8], format: SerializationFormat) -> Result<()> {
		for (key, value) in self.read_entries(bytes, format)? {
			self.key.validate(key, format)?;
			self.value.validate(value, format)?;
		}
		Ok(())
	}

	// Key and value equality can be coarser than byte identity, so the
	// hash goes entry-wise through the component types.
	fn hash(&self, bytes: &[u8]) -> u64 {
		match self.read_entries(bytes, SerializationFormat::internal()) {
			Ok(entries) => {
				let mut hashes = Vec::with_capacity(entries.len() * 16);
				for (key, value) in entries {
					hashes.extend_from_slice(&self.key.hash(key).to_be_bytes());
					hashes.extend_from_slice(&self.value.hash(value).to_be_bytes());
				}
				xxh3_64(&hashes)
			}
			Err(_) => xxh3_64(bytes),
		}
	}

	fn is_native(&self) -> bool {
		false
	}

	fn is_multi_cell(&self) -> bool {
		self.multi_cell
	}

	fn is_compatible_with(&self, previous: &dyn TypeDescriptor) -> bool {
		previous.kind() == Kind::Map
			&& previous.is_multi_cell() == self.multi_cell
			&& match previous.type_parameters().as_slice() {
				[key, value] => {
					self.key.is_compatible_with(key.as_ref())
						&& self.value.is_compatible_with(value.as_ref())
				}
				_ => false,
			}
	}

	fn is_value_compatible_with_internal(&self, other: &dyn TypeDescriptor) -> bool {
		other.kind() == Kind::Map
			&& match other.type_parameters().as_slice() {
				[key, value] => {
					self.key.is_value_compatible_with(key)
						&& self.value.is_value_compatible_with(value)
				}
				_ => false,
			}
	}

	fn references_user_type(&self, keyspace: &str, name: &str) -> bool {
		self.key.references_user_type(keyspace, name)
			|| self.value.references_user_type(keyspace, name)
	}

	fn update_user_type(
		&self,
		registry: &mut TypeRegistry,
		updated: &DataType,
	) -> Option<DataType> {
		let key = self.key.update_user_type(registry, updated);
		let value = self.value.update_user_type(registry, updated);
		if key.is_none() && value.is_none() {
			return None;
		}
		let key = key.unwrap_or_else(|| self.key.clone());
		let value = value.unwrap_or_else(|| self.value.clone());
		Some(registry.map(key, value, self.multi_cell))
	}

	fn type_parameters(&self) -> Vec<DataType> {
		vec![self.key.clone(), self.value.clone()]
	}
}

/// Builds a list value after checking every element against the list's
/// element type.
pub fn make_list_value(dtype: &DataType, elements: Vec<TypedValue>) -> Result<TypedValue> {
	composite_value(dtype, Kind::List, elements, NativeValue::List)
}

pub fn make_set_value(dtype: &DataType, elements: Vec<TypedValue>) -> Result<TypedValue> {
	composite_value(dtype, Kind::Set, elements, NativeValue::Set)
}

pub fn make_map_value(
	dtype: &DataType,
	entries: Vec<(TypedValue, TypedValue)>,
) -> Result<TypedValue> {
	if dtype.kind() != Kind::Map {
		return Err(TypeError::runtime(format!("{} is not a map type", dtype.name())));
	}
	let params = dtype.type_parameters();
	let [key_type, value_type] = params.as_slice() else {
		return Err(TypeError::runtime(format!("{} has no key/value types", dtype.name())));
	};
	for (key, value) in &entries {
		check_element_type(key_type, key, "key")?;
		check_element_type(value_type, value, "value")?;
	}
	Ok(TypedValue::from_parts(dtype.clone(), Some(NativeValue::Map(entries))))
}

fn composite_value(
	dtype: &DataType,
	kind: Kind,
	elements: Vec<TypedValue>,
	build: fn(Vec<TypedValue>) -> NativeValue,
) -> Result<TypedValue> {
	if dtype.kind() != kind {
		return Err(TypeError::runtime(format!("{} is not a {kind:?} type", dtype.name())));
	}
	let params = dtype.type_parameters();
	let [element_type] = params.as_slice() else {
		return Err(TypeError::runtime(format!("{} has no element type", dtype.name())));
	};
	for element in &elements {
		check_element_type(element_type, element, "element")?;
	}
	Ok(TypedValue::from_parts(dtype.clone(), Some(build(elements))))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::builtin::{int_type, utf8_type, varint_type};
	use crate::registry::TypeRegistry;

	fn int_list(registry: &mut TypeRegistry) -> DataType {
		registry.list(int_type(), true)
	}

	fn list_of(registry: &mut TypeRegistry, values: &[i32]) -> TypedValue {
		let dtype = int_list(registry);
		let elements = values.iter().map(|v| TypedValue::from(*v)).collect();
		make_list_value(&dtype, elements).unwrap()
	}

	#[test]
	fn test_list_roundtrip() {
		let mut registry = TypeRegistry::new();
		let dtype = int_list(&mut registry);
		let value = list_of(&mut registry, &[1, 2, 3]);
		let bytes = value.serialize().unwrap();
		let back = dtype.deserialize_value(&bytes).unwrap();
		assert_eq!(back, value);
		assert_eq!(back.to_string(), "[1, 2, 3]");
	}

	#[test]
	fn test_empty_bytes_decode_to_empty_list() {
		let mut registry = TypeRegistry::new();
		let dtype = int_list(&mut registry);
		assert_eq!(dtype.deserialize(&[]).unwrap(), NativeValue::List(Vec::new()));
	}

	#[test]
	fn test_list_order_is_lexicographic() {
		let mut registry = TypeRegistry::new();
		let dtype = int_list(&mut registry);
		let short = list_of(&mut registry, &[1, 2]).serialize().unwrap();
		let long = list_of(&mut registry, &[1, 2, 0]).serialize().unwrap();
		let bigger = list_of(&mut registry, &[1, 3]).serialize().unwrap();
		assert!(dtype.less(&short, &long));
		assert!(dtype.less(&long, &bigger));
	}

	#[test]
	fn test_list_rejects_null_element() {
		let mut registry = TypeRegistry::new();
		let dtype = int_list(&mut registry);
		let value =
			make_list_value(&dtype, vec![TypedValue::from(1i32), int_type().make_null()]).unwrap();
		assert!(value.serialize().is_err());
	}

	#[test]
	fn test_list_rejects_foreign_element() {
		let mut registry = TypeRegistry::new();
		let dtype = int_list(&mut registry);
		assert!(make_list_value(&dtype, vec![TypedValue::from("nope")]).is_err());
	}

	#[test]
	fn test_list_json() {
		let mut registry = TypeRegistry::new();
		let dtype = int_list(&mut registry);
		let bytes = dtype.from_string("[1, 2]").unwrap();
		assert_eq!(dtype.to_json_string(&bytes).unwrap(), "[1, 2]");
		dtype.validate(&bytes, SerializationFormat::internal()).unwrap();
	}

	#[test]
	fn test_narrow_size_format() {
		let mut registry = TypeRegistry::new();
		let dtype = int_list(&mut registry);
		let json: serde_json::Value = serde_json::from_str("[7]").unwrap();
		let narrow = dtype.from_json_object(&json, SerializationFormat::new(2)).unwrap();
		let wide = dtype.from_json_object(&json, SerializationFormat::latest()).unwrap();
		assert!(narrow.len() < wide.len());
		assert!(dtype.validate(&narrow, SerializationFormat::new(2)).is_ok());
		assert!(dtype.validate(&narrow, SerializationFormat::latest()).is_err());
	}

	#[test]
	fn test_map_roundtrip_and_order() {
		let mut registry = TypeRegistry::new();
		let dtype = registry.map(utf8_type(), int_type(), false);
		let entry = |k: &str, v: i32| (TypedValue::from(k), TypedValue::from(v));
		let a = make_map_value(&dtype, vec![entry("a", 1)]).unwrap();
		let b = make_map_value(&dtype, vec![entry("a", 2)]).unwrap();
		let c = make_map_value(&dtype, vec![entry("b", 0)]).unwrap();
		let (ab, bb, cb) =
			(a.serialize().unwrap(), b.serialize().unwrap(), c.serialize().unwrap());
		assert_eq!(dtype.deserialize_value(&ab).unwrap(), a);
		assert!(dtype.less(&ab, &bb));
		assert!(dtype.less(&bb, &cb));
	}

	#[test]
	fn test_map_json() {
		let mut registry = TypeRegistry::new();
		let dtype = registry.map(int_type(), utf8_type(), true);
		let bytes = dtype.from_string("{\"1\": \"one\"}").unwrap();
		assert_eq!(dtype.to_json_string(&bytes).unwrap(), "{\"1\": \"one\"}");
	}

	#[test]
	fn test_set_renders_with_braces() {
		let mut registry = TypeRegistry::new();
		let dtype = registry.set(int_type(), true);
		let value = make_set_value(
			&dtype,
			vec![TypedValue::from(1i32), TypedValue::from(2i32)],
		)
		.unwrap();
		assert_eq!(value.to_string(), "{1, 2}");
	}

	#[test]
	fn test_frozen_name() {
		let mut registry = TypeRegistry::new();
		assert_eq!(registry.list(int_type(), true).name(), "list<int>");
		assert_eq!(registry.list(int_type(), false).name(), "frozen<list<int>>");
		assert!(registry.list(int_type(), true).is_multi_cell());
		assert!(!registry.list(int_type(), false).is_multi_cell());
	}

	#[test]
	fn test_map_counts_entries_not_components() {
		let mut registry = TypeRegistry::new();
		let dtype = registry.map(utf8_type(), int_type(), true);
		let value = make_map_value(
			&dtype,
			vec![
				(TypedValue::from("a"), TypedValue::from(1i32)),
				(TypedValue::from("b"), TypedValue::from(2i32)),
			],
		)
		.unwrap();
		let bytes = value.serialize().unwrap();
		let mut view = bytes.as_slice();
		let count =
			read_collection_size(&mut view, SerializationFormat::internal()).unwrap();
		assert_eq!(count, 2);
		assert_eq!(dtype.deserialize_value(&bytes).unwrap(), value);
	}

	#[test]
	fn test_hash_agrees_with_element_equality() {
		let mut registry = TypeRegistry::new();
		let dtype = registry.list(varint_type(), true);
		let format = SerializationFormat::internal();
		let encode = |element: &[u8]| {
			let mut out = Vec::new();
			write_collection_size(&mut out, 1, format);
			write_collection_value(&mut out, element, format);
			out
		};
		// One value, two varint encodings.
		let minimal = encode(&[0x01]);
		let padded = encode(&[0x00, 0x00, 0x01]);
		assert_ne!(minimal, padded);
		assert!(dtype.equal(&minimal, &padded));
		assert_eq!(dtype.hash(&minimal), dtype.hash(&padded));
	}

	#[test]
	fn test_trailing_bytes_rejected() {
		let mut registry = TypeRegistry::new();
		let dtype = int_list(&mut registry);
		let mut bytes = list_of(&mut registry, &[1]).serialize().unwrap();
		bytes.push(0);
		assert!(dtype.deserialize(&bytes).is_err());
	}
}
