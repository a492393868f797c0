// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Tuple and user-defined-type descriptors.
//!
//! Both share one wire shape: each component is a four-byte signed
//! length followed by that many bytes, length -1 standing for a null
//! component. Trailing components may be absent entirely, which is how
//! a type gains fields without rewriting stored data.

use std::cmp::Ordering;

use xxhash_rust::xxh3::xxh3_64;

use crate::descriptor::{DataType, DataTypeExt, Kind, TypeDescriptor};
use crate::descriptor::scalar::mismatch;
use crate::error::{Result, TypeError};
use crate::format::SerializationFormat;
use crate::order::{Relation, lexicographical_tri_compare, tri_compare_opt};
use crate::registry::TypeRegistry;
use crate::util::encoding::{read_be_i32, read_bytes};
use crate::value::native::NativeValue;
use crate::value::typed::TypedValue;

/// Splits serialized components, `None` for null. Fails on more
/// components than fields or on truncated input.
fn read_components(bytes: &[u8], field_count: usize) -> Result<Vec<Option<&[u8]>>> {
	let mut view = bytes;
	let mut out = Vec::new();
	while !view.is_empty() {
		if out.len() == field_count {
			return Err(TypeError::marshal(format!(
				"{} trailing bytes after {field_count} components",
				view.len()
			)));
		}
		let len = read_be_i32(&mut view)?;
		if len < 0 {
			out.push(None);
		} else {
			out.push(Some(read_bytes(&mut view, len as usize)?));
		}
	}
	Ok(out)
}

fn serialize_components(
	fields: &[DataType],
	elements: &[TypedValue],
	out: &mut Vec<u8>,
) -> Result<()> {
	if elements.len() > fields.len() {
		return Err(TypeError::marshal(format!(
			"{} components for {} fields",
			elements.len(),
			fields.len()
		)));
	}
	for (field, element) in fields.iter().zip(elements) {
		if !element.data_type().same_as(field) {
			return Err(TypeError::runtime(format!(
				"component of type {} does not match field {}",
				element.data_type().name(),
				field.name()
			)));
		}
		match element.is_null() {
			true => out.extend_from_slice(&(-1i32).to_be_bytes()),
			false => {
				let bytes = element.serialize()?;
				out.extend_from_slice(&(bytes.len() as i32).to_be_bytes());
				out.extend_from_slice(&bytes);
			}
		}
	}
	Ok(())
}

fn deserialize_components(fields: &[DataType], bytes: &[u8]) -> Result<Vec<TypedValue>> {
	let components = read_components(bytes, fields.len())?;
	let mut out = Vec::with_capacity(components.len());
	for (field, component) in fields.iter().zip(components) {
		out.push(match component {
			None => field.make_null(),
			Some(bytes) => field.deserialize_value(bytes)?,
		});
	}
	Ok(out)
}

/// A strict prefix sorts before its null-extended form, which in turn
/// sorts before any present trailing component.
fn compare_components(fields: &[DataType], lhs: &[u8], rhs: &[u8]) -> Ordering {
	let (a, b) = match (read_components(lhs, fields.len()), read_components(rhs, fields.len())) {
		(Ok(a), Ok(b)) => (a, b),
		_ => return lhs.cmp(rhs),
	};
	lexicographical_tri_compare(
		fields,
		&a,
		&b,
		tri_compare_opt,
		Relation::BeforeAllStrictlyPrefixed,
		Relation::BeforeAllStrictlyPrefixed,
	)
}

// Component equality can be coarser than byte identity, so the hash
// goes component-wise; the marker keeps an explicit null distinct from
// an absent component.
fn hash_components(fields: &[DataType], bytes: &[u8]) -> u64 {
	match read_components(bytes, fields.len()) {
		Ok(components) => {
			let mut hashes = Vec::with_capacity(components.len() * 9);
			for (field, component) in fields.iter().zip(components) {
				match component {
					None => hashes.push(0),
					Some(bytes) => {
						hashes.push(1);
						hashes.extend_from_slice(&field.hash(bytes).to_be_bytes());
					}
				}
			}
			xxh3_64(&hashes)
		}
		Err(_) => xxh3_64(bytes),
	}
}

fn components_to_json(fields: &[DataType], bytes: &[u8]) -> Result<String> {
	let components = read_components(bytes, fields.len())?;
	let mut rendered = Vec::with_capacity(components.len());
	for (field, component) in fields.iter().zip(components) {
		rendered.push(match component {
			None => "null".to_string(),
			Some(bytes) => field.to_json_string(bytes)?,
		});
	}
	Ok(format!("[{}]", rendered.join(", ")))
}

fn components_from_json(
	fields: &[DataType],
	json: &serde_json::Value,
	format: SerializationFormat,
) -> Result<Vec<u8>> {
	let items = json
		.as_array()
		.ok_or_else(|| TypeError::marshal(format!("expected component array, got {json}")))?;
	if items.len() > fields.len() {
		return Err(TypeError::marshal(format!(
			"{} components for {} fields",
			items.len(),
			fields.len()
		)));
	}
	let mut out = Vec::new();
	for (field, item) in fields.iter().zip(items) {
		if item.is_null() {
			out.extend_from_slice(&(-1i32).to_be_bytes());
		} else {
			let bytes = field.from_json_object(item, format)?;
			out.extend_from_slice(&(bytes.len() as i32).to_be_bytes());
			out.extend_from_slice(&bytes);
		}
	}
	Ok(out)
}

fn validate_components(fields: &[DataType], bytes: &[u8], format: SerializationFormat) -> Result<()> {
	let components = read_components(bytes, fields.len())?;
	for (field, component) in fields.iter().zip(components) {
		if let Some(bytes) = component {
			field.validate(bytes, format)?;
		}
	}
	Ok(())
}

/// A new revision may append fields; the shared prefix must stay
/// compatible pairwise.
fn fields_compatible(
	fields: &[DataType],
	previous: &[DataType],
	compatible: impl Fn(&DataType, &DataType) -> bool,
) -> bool {
	fields.len() >= previous.len()
		&& fields.iter().zip(previous).all(|(mine, theirs)| compatible(mine, theirs))
}

pub struct TupleType {
	fields: Vec<DataType>,
	name: String,
}

impl TupleType {
	pub(crate) fn new(fields: Vec<DataType>) -> Self {
		let rendered: Vec<&str> = fields.iter().map(|f| f.name()).collect();
		let name = format!("tuple<{}>", rendered.join(", "));
		TupleType {
			fields,
			name,
		}
	}

	pub fn field_types(&self) -> &[DataType] {
		&self.fields
	}
}

impl TypeDescriptor for TupleType {
	fn name(&self) -> &str {
		&self.name
	}

	fn kind(&self) -> Kind {
		Kind::Tuple
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::Tuple(elements) => serialize_components(&self.fields, elements, out),
			other => Err(mismatch("tuple", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		Ok(NativeValue::Tuple(deserialize_components(&self.fields, bytes)?))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.compare(lhs, rhs) == Ordering::Less
	}

	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		compare_components(&self.fields, lhs, rhs)
	}

	fn hash(&self, bytes: &[u8]) -> u64 {
		hash_components(&self.fields, bytes)
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::Tuple(elements) => {
				let rendered: Vec<String> = elements.iter().map(|e| e.to_string()).collect();
				format!("({})", rendered.join(", "))
			}
			_ => String::new(),
		}
	}

	fn from_string(&self, text: &str) -> Result<Vec<u8>> {
		if text.is_empty() {
			return Ok(Vec::new());
		}
		let json: serde_json::Value = serde_json::from_str(text)
			.map_err(|e| TypeError::marshal(format!("invalid tuple literal: {e}")))?;
		self.from_json_object(&json, SerializationFormat::internal())
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		components_to_json(&self.fields, bytes)
	}

	fn from_json_object(
		&self,
		json: &serde_json::Value,
		format: SerializationFormat,
	) -> Result<Vec<u8>> {
		components_from_json(&self.fields, json, format)
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::Tuple(Vec::new())
	}

	fn validate(&self, bytes: &[u8], format: SerializationFormat) -> Result<()> {
		validate_components(&self.fields, bytes, format)
	}

	fn is_native(&self) -> bool {
		false
	}

	fn is_compatible_with(&self, previous: &dyn TypeDescriptor) -> bool {
		previous.is_tuple()
			&& fields_compatible(&self.fields, &previous.type_parameters(), |mine, theirs| {
				mine.is_compatible_with(theirs.as_ref())
			})
	}

	fn is_value_compatible_with_internal(&self, other: &dyn TypeDescriptor) -> bool {
		other.is_tuple()
			&& fields_compatible(&self.fields, &other.type_parameters(), |mine, theirs| {
				mine.is_value_compatible_with(theirs)
			})
	}

	fn references_user_type(&self, keyspace: &str, name: &str) -> bool {
		self.fields.iter().any(|f| f.references_user_type(keyspace, name))
	}

	fn update_user_type(
		&self,
		registry: &mut TypeRegistry,
		updated: &DataType,
	) -> Option<DataType> {
		let fields = update_fields(&self.fields, registry, updated)?;
		Some(registry.tuple(fields))
	}

	fn type_parameters(&self) -> Vec<DataType> {
		self.fields.clone()
	}
}

fn update_fields(
	fields: &[DataType],
	registry: &mut TypeRegistry,
	updated: &DataType,
) -> Option<Vec<DataType>> {
	let mut changed = false;
	let mut out = Vec::with_capacity(fields.len());
	for field in fields {
		match field.update_user_type(registry, updated) {
			Some(new_field) => {
				changed = true;
				out.push(new_field);
			}
			None => out.push(field.clone()),
		}
	}
	changed.then_some(out)
}

pub struct UserType {
	keyspace: String,
	type_name: String,
	field_names: Vec<String>,
	field_types: Vec<DataType>,
	multi_cell: bool,
	name: String,
}

impl UserType {
	pub(crate) fn new(
		keyspace: String,
		type_name: String,
		field_names: Vec<String>,
		field_types: Vec<DataType>,
		multi_cell: bool,
	) -> Self {
		let name = if multi_cell {
			format!("{keyspace}.{type_name}")
		} else {
			format!("frozen<{keyspace}.{type_name}>")
		};
		UserType {
			keyspace,
			type_name,
			field_names,
			field_types,
			multi_cell,
			name,
		}
	}

	pub fn keyspace(&self) -> &str {
		&self.keyspace
	}

	pub fn type_name(&self) -> &str {
		&self.type_name
	}

	pub fn field_names(&self) -> &[String] {
		&self.field_names
	}

	pub fn field_types(&self) -> &[DataType] {
		&self.field_types
	}
}

impl TypeDescriptor for UserType {
	fn name(&self) -> &str {
		&self.name
	}

	fn kind(&self) -> Kind {
		Kind::User
	}

	fn serialize(&self, value: &NativeValue, out: &mut Vec<u8>) -> Result<()> {
		match value {
			NativeValue::User(elements) => serialize_components(&self.field_types, elements, out),
			other => Err(mismatch("user type", other)),
		}
	}

	fn deserialize(&self, bytes: &[u8]) -> Result<NativeValue> {
		Ok(NativeValue::User(deserialize_components(&self.field_types, bytes)?))
	}

	fn less(&self, lhs: &[u8], rhs: &[u8]) -> bool {
		self.compare(lhs, rhs) == Ordering::Less
	}

	fn compare(&self, lhs: &[u8], rhs: &[u8]) -> Ordering {
		compare_components(&self.field_types, lhs, rhs)
	}

	fn hash(&self, bytes: &[u8]) -> u64 {
		hash_components(&self.field_types, bytes)
	}

	fn to_string_value(&self, value: &NativeValue) -> String {
		match value {
			NativeValue::User(elements) => {
				let rendered: Vec<String> = self
					.field_names
					.iter()
					.zip(elements)
					.map(|(name, element)| format!("{name}: {element}"))
					.collect();
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
			.map_err(|e| TypeError::marshal(format!("invalid user type literal: {e}")))?;
		self.from_json_object(&json, SerializationFormat::internal())
	}

	fn to_json_string(&self, bytes: &[u8]) -> Result<String> {
		let components = read_components(bytes, self.field_types.len())?;
		let mut rendered = Vec::with_capacity(components.len());
		for ((name, field), component) in
			self.field_names.iter().zip(&self.field_types).zip(components)
		{
			let value = match component {
				None => "null".to_string(),
				Some(bytes) => field.to_json_string(bytes)?,
			};
			rendered.push(format!("\"{name}\": {value}"));
		}
		Ok(format!("{{{}}}", rendered.join(", ")))
	}

	// Fields may arrive in any order; missing fields become null.
	fn from_json_object(
		&self,
		json: &serde_json::Value,
		format: SerializationFormat,
	) -> Result<Vec<u8>> {
		let object = json
			.as_object()
			.ok_or_else(|| TypeError::marshal(format!("expected field object, got {json}")))?;
		for key in object.keys() {
			if !self.field_names.iter().any(|name| name == key) {
				return Err(TypeError::marshal(format!(
					"unknown field {key:?} for {}",
					self.name
				)));
			}
		}
		let mut out = Vec::new();
		for (name, field) in self.field_names.iter().zip(&self.field_types) {
			match object.get(name) {
				None | Some(serde_json::Value::Null) => {
					out.extend_from_slice(&(-1i32).to_be_bytes());
				}
				Some(value) => {
					let bytes = field.from_json_object(value, format)?;
					out.extend_from_slice(&(bytes.len() as i32).to_be_bytes());
					out.extend_from_slice(&bytes);
				}
			}
		}
		Ok(out)
	}

	fn make_empty_value(&self) -> NativeValue {
		NativeValue::User(Vec::new())
	}

	fn validate(&self, bytes: &[u8], format: SerializationFormat) -> Result<()> {
		validate_components(&self.field_types, bytes, format)
	}

	fn is_native(&self) -> bool {
		false
	}

	fn is_multi_cell(&self) -> bool {
		self.multi_cell
	}

	fn is_compatible_with(&self, previous: &dyn TypeDescriptor) -> bool {
		previous.is_tuple()
			&& previous.is_multi_cell() == self.multi_cell
			&& fields_compatible(&self.field_types, &previous.type_parameters(), |mine, theirs| {
				mine.is_compatible_with(theirs.as_ref())
			})
	}

	fn is_value_compatible_with_internal(&self, other: &dyn TypeDescriptor) -> bool {
		other.is_tuple()
			&& fields_compatible(&self.field_types, &other.type_parameters(), |mine, theirs| {
				mine.is_value_compatible_with(theirs)
			})
	}

	fn references_user_type(&self, keyspace: &str, name: &str) -> bool {
		(self.keyspace == keyspace && self.type_name == name)
			|| self.field_types.iter().any(|f| f.references_user_type(keyspace, name))
	}

	fn update_user_type(
		&self,
		registry: &mut TypeRegistry,
		updated: &DataType,
	) -> Option<DataType> {
		if let Some((keyspace, name)) = updated.user_type_identity() {
			if keyspace == self.keyspace && name == self.type_name {
				return Some(updated.clone());
			}
		}
		let field_types = update_fields(&self.field_types, registry, updated)?;
		Some(registry.user(
			self.keyspace.clone(),
			self.type_name.clone(),
			self.field_names.clone(),
			field_types,
			self.multi_cell,
		))
	}

	fn type_parameters(&self) -> Vec<DataType> {
		self.field_types.clone()
	}

	fn user_type_identity(&self) -> Option<(&str, &str)> {
		Some((&self.keyspace, &self.type_name))
	}
}

/// Builds a tuple value. Fewer components than fields is allowed; null
/// components carry the matching field type.
pub fn make_tuple_value(dtype: &DataType, elements: Vec<TypedValue>) -> Result<TypedValue> {
	composite_tuple_value(dtype, Kind::Tuple, elements, NativeValue::Tuple)
}

pub fn make_user_value(dtype: &DataType, elements: Vec<TypedValue>) -> Result<TypedValue> {
	composite_tuple_value(dtype, Kind::User, elements, NativeValue::User)
}

fn composite_tuple_value(
	dtype: &DataType,
	kind: Kind,
	elements: Vec<TypedValue>,
	build: fn(Vec<TypedValue>) -> NativeValue,
) -> Result<TypedValue> {
	if dtype.kind() != kind {
		return Err(TypeError::runtime(format!("{} is not a {kind:?} type", dtype.name())));
	}
	let fields = dtype.type_parameters();
	if elements.len() > fields.len() {
		return Err(TypeError::runtime(format!(
			"{} components for {} fields of {}",
			elements.len(),
			fields.len(),
			dtype.name()
		)));
	}
	for (field, element) in fields.iter().zip(&elements) {
		if !element.data_type().same_as(field) {
			return Err(TypeError::runtime(format!(
				"component of type {} does not match field {}",
				element.data_type().name(),
				field.name()
			)));
		}
	}
	Ok(TypedValue::from_parts(dtype.clone(), Some(build(elements))))
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::descriptor::builtin::{int_type, utf8_type, varint_type};
	use crate::registry::TypeRegistry;

	fn pair_tuple(registry: &mut TypeRegistry) -> DataType {
		registry.tuple(vec![int_type(), utf8_type()])
	}

	#[test]
	fn test_tuple_roundtrip() {
		let mut registry = TypeRegistry::new();
		let dtype = pair_tuple(&mut registry);
		let value =
			make_tuple_value(&dtype, vec![TypedValue::from(1i32), TypedValue::from("one")])
				.unwrap();
		let bytes = value.serialize().unwrap();
		assert_eq!(dtype.deserialize_value(&bytes).unwrap(), value);
		assert_eq!(value.to_string(), "(1, one)");
	}

	#[test]
	fn test_tuple_null_component() {
		let mut registry = TypeRegistry::new();
		let dtype = pair_tuple(&mut registry);
		let value =
			make_tuple_value(&dtype, vec![int_type().make_null(), TypedValue::from("x")]).unwrap();
		let bytes = value.serialize().unwrap();
		assert_eq!(&bytes[..4], &(-1i32).to_be_bytes());
		assert_eq!(dtype.deserialize_value(&bytes).unwrap(), value);
	}

	#[test]
	fn test_tuple_missing_trailing_components() {
		let mut registry = TypeRegistry::new();
		let dtype = pair_tuple(&mut registry);
		let short = make_tuple_value(&dtype, vec![TypedValue::from(1i32)]).unwrap();
		let bytes = short.serialize().unwrap();
		match dtype.deserialize(&bytes).unwrap() {
			NativeValue::Tuple(elements) => assert_eq!(elements.len(), 1),
			other => panic!("expected tuple, got {other:?}"),
		}
	}

	#[test]
	fn test_tuple_excess_components_rejected() {
		let mut registry = TypeRegistry::new();
		let dtype = registry.tuple(vec![int_type()]);
		let mut bytes = Vec::new();
		bytes.extend_from_slice(&4i32.to_be_bytes());
		bytes.extend_from_slice(&1i32.to_be_bytes());
		bytes.extend_from_slice(&4i32.to_be_bytes());
		bytes.extend_from_slice(&2i32.to_be_bytes());
		assert!(dtype.deserialize(&bytes).is_err());
		assert!(
			make_tuple_value(&dtype, vec![TypedValue::from(1i32), TypedValue::from(2i32)])
				.is_err()
		);
	}

	#[test]
	fn test_tuple_order() {
		let mut registry = TypeRegistry::new();
		let dtype = pair_tuple(&mut registry);
		let make = |i: i32, s: &str| {
			make_tuple_value(&dtype, vec![TypedValue::from(i), TypedValue::from(s)])
				.unwrap()
				.serialize()
				.unwrap()
		};
		let a = make(1, "a");
		let b = make(1, "b");
		let c = make(2, "a");
		assert!(dtype.less(&a, &b));
		assert!(dtype.less(&b, &c));
		// An explicit trailing null sorts after its strict prefix but
		// before any present component.
		let null_second =
			make_tuple_value(&dtype, vec![TypedValue::from(1i32), utf8_type().make_null()])
				.unwrap()
				.serialize()
				.unwrap();
		let short = make_tuple_value(&dtype, vec![TypedValue::from(1i32)])
			.unwrap()
			.serialize()
			.unwrap();
		assert!(dtype.less(&short, &null_second));
		assert_eq!(dtype.compare(&null_second, &short), Ordering::Greater);
		assert!(dtype.less(&null_second, &a));
	}

	#[test]
	fn test_tuple_hash_agrees_with_component_equality() {
		let mut registry = TypeRegistry::new();
		let dtype = registry.tuple(vec![varint_type()]);
		let encode = |component: &[u8]| {
			let mut out = Vec::new();
			out.extend_from_slice(&(component.len() as i32).to_be_bytes());
			out.extend_from_slice(component);
			out
		};
		// One value, two varint encodings.
		let minimal = encode(&[0x01]);
		let padded = encode(&[0x00, 0x00, 0x01]);
		assert!(dtype.equal(&minimal, &padded));
		assert_eq!(dtype.hash(&minimal), dtype.hash(&padded));
		// The hash keeps an explicit null apart from an absent component.
		let null_component = (-1i32).to_be_bytes().to_vec();
		assert!(!dtype.equal(&null_component, &[]));
		assert_ne!(dtype.hash(&null_component), dtype.hash(&[]));
	}

	#[test]
	fn test_tuple_json() {
		let mut registry = TypeRegistry::new();
		let dtype = pair_tuple(&mut registry);
		let bytes = dtype.from_string("[1, \"one\"]").unwrap();
		assert_eq!(dtype.to_json_string(&bytes).unwrap(), "[1, \"one\"]");
		let with_null = dtype.from_string("[null, \"x\"]").unwrap();
		assert_eq!(dtype.to_json_string(&with_null).unwrap(), "[null, \"x\"]");
	}

	#[test]
	fn test_tuple_grows_compatibly() {
		let mut registry = TypeRegistry::new();
		let old = registry.tuple(vec![int_type()]);
		let new = registry.tuple(vec![int_type(), utf8_type()]);
		assert!(new.is_compatible_with(old.as_ref()));
		assert!(!old.is_compatible_with(new.as_ref()));
	}

	fn address_type(registry: &mut TypeRegistry) -> DataType {
		registry.user(
			"app".to_string(),
			"address".to_string(),
			vec!["street".to_string(), "zip".to_string()],
			vec![utf8_type(), int_type()],
			false,
		)
	}

	#[test]
	fn test_user_type_roundtrip() {
		let mut registry = TypeRegistry::new();
		let dtype = address_type(&mut registry);
		let value = make_user_value(
			&dtype,
			vec![TypedValue::from("main st"), TypedValue::from(12345i32)],
		)
		.unwrap();
		let bytes = value.serialize().unwrap();
		assert_eq!(dtype.deserialize_value(&bytes).unwrap(), value);
		assert_eq!(value.to_string(), "{street: main st, zip: 12345}");
	}

	#[test]
	fn test_user_type_json_by_field_name() {
		let mut registry = TypeRegistry::new();
		let dtype = address_type(&mut registry);
		let json: serde_json::Value =
			serde_json::from_str("{\"zip\": 7, \"street\": \"x\"}").unwrap();
		let bytes = dtype.from_json_object(&json, SerializationFormat::latest()).unwrap();
		assert_eq!(dtype.to_json_string(&bytes).unwrap(), "{\"street\": \"x\", \"zip\": 7}");
		let bad: serde_json::Value = serde_json::from_str("{\"city\": \"x\"}").unwrap();
		assert!(dtype.from_json_object(&bad, SerializationFormat::latest()).is_err());
	}

	#[test]
	fn test_user_type_references() {
		let mut registry = TypeRegistry::new();
		let address = address_type(&mut registry);
		let wrapper = registry.list(address.clone(), false);
		assert!(address.references_user_type("app", "address"));
		assert!(wrapper.references_user_type("app", "address"));
		assert!(!wrapper.references_user_type("app", "person"));
	}

	#[test]
	fn test_update_user_type_substitutes() {
		let mut registry = TypeRegistry::new();
		let address = address_type(&mut registry);
		let wrapper = registry.list(address.clone(), false);
		let updated = registry.user(
			"app".to_string(),
			"address".to_string(),
			vec!["street".to_string(), "zip".to_string(), "country".to_string()],
			vec![utf8_type(), int_type(), utf8_type()],
			false,
		);
		let new_address = address.update_user_type(&mut registry, &updated).unwrap();
		assert!(new_address.same_as(&updated));
		let new_wrapper = wrapper.update_user_type(&mut registry, &updated).unwrap();
		assert_eq!(new_wrapper.type_parameters().len(), 1);
		assert!(new_wrapper.type_parameters()[0].same_as(&updated));
		// Types not mentioning the user type are untouched.
		assert!(int_type().update_user_type(&mut registry, &updated).is_none());
	}
}
