// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

use crate::error::{Result, TypeError};

/// A value that may carry an explicit zero-length "empty" state.
///
/// The wire format has a notion of empty values even for scalars such as
/// `int`. This is distinct from null, which means deleted or never set:
/// empty serializes as a zero-length byte string, null as no bytes at
/// all. Representations with a natural empty state (strings, byte
/// buffers, element vectors) skip this wrapper entirely.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Emptyable<T> {
	/// Sorts before every concrete value.
	Empty,
	Value(T),
}

impl<T> Emptyable<T> {
	pub fn is_empty(&self) -> bool {
		matches!(self, Emptyable::Empty)
	}

	/// Accesses the concrete value, failing when flagged empty.
	pub fn get(&self) -> Result<&T> {
		match self {
			Emptyable::Empty => Err(TypeError::EmptyValue),
			Emptyable::Value(v) => Ok(v),
		}
	}

	pub fn into_value(self) -> Result<T> {
		match self {
			Emptyable::Empty => Err(TypeError::EmptyValue),
			Emptyable::Value(v) => Ok(v),
		}
	}

	pub fn as_ref(&self) -> Option<&T> {
		match self {
			Emptyable::Empty => None,
			Emptyable::Value(v) => Some(v),
		}
	}
}

// Empty is the exception rather than the rule, so a default-constructed
// wrapper holds a concrete value.
impl<T: Default> Default for Emptyable<T> {
	fn default() -> Self {
		Emptyable::Value(T::default())
	}
}

impl<T> From<T> for Emptyable<T> {
	fn from(value: T) -> Self {
		Emptyable::Value(value)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_get_on_empty_fails() {
		let e: Emptyable<i32> = Emptyable::Empty;
		assert!(matches!(e.get(), Err(TypeError::EmptyValue)));
	}

	#[test]
	fn test_get_on_value() {
		let e = Emptyable::from(7);
		assert_eq!(*e.get().unwrap(), 7);
	}

	#[test]
	fn test_default_is_concrete() {
		let e: Emptyable<i64> = Emptyable::default();
		assert!(!e.is_empty());
		assert_eq!(*e.get().unwrap(), 0);
	}

	#[test]
	fn test_empty_sorts_first() {
		let empty: Emptyable<i32> = Emptyable::Empty;
		assert!(empty < Emptyable::Value(i32::MIN));
		assert!(Emptyable::Value(1) < Emptyable::Value(2));
	}

	#[test]
	fn test_equality() {
		let empty: Emptyable<i32> = Emptyable::Empty;
		assert_eq!(empty, Emptyable::Empty);
		assert_ne!(empty, Emptyable::Value(0));
		assert_eq!(Emptyable::Value(3), Emptyable::Value(3));
	}
}
