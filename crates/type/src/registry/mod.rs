// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Per-context interning of derived descriptors.
//!
//! Descriptor equality is handle identity, so every derived type must
//! have exactly one instance per context. The registry owns that
//! guarantee; it is passed explicitly wherever derived types are built
//! rather than hiding in thread-local state.

use std::collections::HashMap;
use std::hash::Hash;
use std::sync::Arc;

use crate::descriptor::collection::{ListType, MapType, SetType};
use crate::descriptor::reversed::ReversedType;
use crate::descriptor::tuple::{TupleType, UserType};
use crate::descriptor::{DataType, DataTypeExt};
use crate::error::{Result, TypeError};

/// Identity key of a descriptor instance.
fn type_key(dtype: &DataType) -> usize {
	Arc::as_ptr(dtype) as *const () as usize
}

struct Interner<K> {
	map: HashMap<K, DataType>,
}

impl<K: Eq + Hash> Interner<K> {
	fn new() -> Self {
		Interner {
			map: HashMap::new(),
		}
	}

	fn get_or_insert(&mut self, key: K, build: impl FnOnce() -> DataType) -> DataType {
		self.map.entry(key).or_insert_with(build).clone()
	}
}

type UserKey = (String, String, Vec<String>, Vec<usize>, bool);

/// One interning context. Two registries may hand out distinct
/// instances for the same written type; descriptors from different
/// registries deliberately never compare equal.
pub struct TypeRegistry {
	reversed: Interner<usize>,
	lists: Interner<(usize, bool)>,
	sets: Interner<(usize, bool)>,
	maps: Interner<(usize, usize, bool)>,
	tuples: Interner<Vec<usize>>,
	users: Interner<UserKey>,
}

impl TypeRegistry {
	pub fn new() -> Self {
		TypeRegistry {
			reversed: Interner::new(),
			lists: Interner::new(),
			sets: Interner::new(),
			maps: Interner::new(),
			tuples: Interner::new(),
			users: Interner::new(),
		}
	}

	/// Reversing a reversed type yields the type it wraps.
	pub fn reversed(&mut self, underlying: DataType) -> DataType {
		if underlying.is_reversed() {
			return underlying.underlying().clone();
		}
		self.reversed
			.get_or_insert(type_key(&underlying), || Arc::new(ReversedType::new(underlying)))
	}

	pub fn list(&mut self, element: DataType, multi_cell: bool) -> DataType {
		self.lists.get_or_insert((type_key(&element), multi_cell), || {
			Arc::new(ListType::new(element, multi_cell))
		})
	}

	pub fn set(&mut self, element: DataType, multi_cell: bool) -> DataType {
		self.sets.get_or_insert((type_key(&element), multi_cell), || {
			Arc::new(SetType::new(element, multi_cell))
		})
	}

	pub fn map(&mut self, key: DataType, value: DataType, multi_cell: bool) -> DataType {
		self.maps.get_or_insert((type_key(&key), type_key(&value), multi_cell), || {
			Arc::new(MapType::new(key, value, multi_cell))
		})
	}

	pub fn tuple(&mut self, fields: Vec<DataType>) -> DataType {
		let key: Vec<usize> = fields.iter().map(type_key).collect();
		self.tuples.get_or_insert(key, || Arc::new(TupleType::new(fields)))
	}

	pub fn user(
		&mut self,
		keyspace: String,
		name: String,
		field_names: Vec<String>,
		field_types: Vec<DataType>,
		multi_cell: bool,
	) -> DataType {
		let key = (
			keyspace.clone(),
			name.clone(),
			field_names.clone(),
			field_types.iter().map(type_key).collect(),
			multi_cell,
		);
		self.users.get_or_insert(key, || {
			Arc::new(UserType::new(keyspace, name, field_names, field_types, multi_cell))
		})
	}

	/// Parses a written type such as `map<text, frozen<list<int>>>`
	/// into an interned descriptor.
	pub fn parse_type(&mut self, text: &str) -> Result<DataType> {
		let mut parser = Parser::new(text);
		let dtype = parser.parse(self, true)?;
		parser.skip_whitespace();
		if !parser.at_end() {
			return Err(TypeError::marshal(format!(
				"trailing input after type in {text:?}"
			)));
		}
		Ok(dtype)
	}
}

impl Default for TypeRegistry {
	fn default() -> Self {
		Self::new()
	}
}

struct Parser<'a> {
	input: &'a str,
	pos: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Parser {
			input,
			pos: 0,
		}
	}

	fn rest(&self) -> &'a str {
		&self.input[self.pos..]
	}

	fn at_end(&self) -> bool {
		self.pos == self.input.len()
	}

	fn skip_whitespace(&mut self) {
		let trimmed = self.rest().trim_start();
		self.pos = self.input.len() - trimmed.len();
	}

	fn expect(&mut self, token: char) -> Result<()> {
		self.skip_whitespace();
		if self.rest().starts_with(token) {
			self.pos += token.len_utf8();
			Ok(())
		} else {
			Err(TypeError::marshal(format!(
				"expected {token:?} at offset {} in {:?}",
				self.pos, self.input
			)))
		}
	}

	fn peek_is(&mut self, token: char) -> bool {
		self.skip_whitespace();
		self.rest().starts_with(token)
	}

	fn identifier(&mut self) -> Result<&'a str> {
		self.skip_whitespace();
		let rest = self.rest();
		let end = rest
			.find(|c: char| !c.is_ascii_alphanumeric() && c != '_')
			.unwrap_or(rest.len());
		if end == 0 {
			return Err(TypeError::marshal(format!(
				"expected type name at offset {} in {:?}",
				self.pos, self.input
			)));
		}
		self.pos += end;
		Ok(&rest[..end])
	}

	/// `multi_cell` applies to the collection this call parses; frozen
	/// clears it for its direct argument only.
	fn parse(&mut self, registry: &mut TypeRegistry, multi_cell: bool) -> Result<DataType> {
		let name = self.identifier()?;
		match name {
			"frozen" => {
				self.expect('<')?;
				let inner = self.parse(registry, false)?;
				self.expect('>')?;
				Ok(inner)
			}
			"reversed" => {
				self.expect('<')?;
				let inner = self.parse(registry, multi_cell)?;
				self.expect('>')?;
				Ok(registry.reversed(inner))
			}
			"list" => {
				self.expect('<')?;
				let element = self.parse(registry, true)?;
				self.expect('>')?;
				Ok(registry.list(element, multi_cell))
			}
			"set" => {
				self.expect('<')?;
				let element = self.parse(registry, true)?;
				self.expect('>')?;
				Ok(registry.set(element, multi_cell))
			}
			"map" => {
				self.expect('<')?;
				let key = self.parse(registry, true)?;
				self.expect(',')?;
				let value = self.parse(registry, true)?;
				self.expect('>')?;
				Ok(registry.map(key, value, multi_cell))
			}
			"tuple" => {
				self.expect('<')?;
				let mut fields = vec![self.parse(registry, true)?];
				while self.peek_is(',') {
					self.expect(',')?;
					fields.push(self.parse(registry, true)?);
				}
				self.expect('>')?;
				Ok(registry.tuple(fields))
			}
			_ => crate::descriptor::builtin::by_name(name).ok_or_else(|| {
				TypeError::marshal(format!("unknown type name {name:?} in {:?}", self.input))
			}),
		}
	}
}
