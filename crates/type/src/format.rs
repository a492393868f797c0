// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

use serde::{Deserialize, Serialize};

use crate::error::{Result, TypeError};

/// Identifies one generation of the wire encoding for composite values.
///
/// Older generations encode collection sizes and element lengths in two
/// bytes; generation 3 and later use four bytes. The format threads
/// through validate and JSON paths so both generations can be read
/// simultaneously.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct SerializationFormat(u8);

impl SerializationFormat {
	pub const fn new(version: u8) -> Self {
		SerializationFormat(version)
	}

	/// The newest supported wire generation.
	pub const fn latest() -> Self {
		SerializationFormat(3)
	}

	/// The format used for internal (storage-side) encodings.
	pub const fn internal() -> Self {
		Self::latest()
	}

	pub const fn version(self) -> u8 {
		self.0
	}

	pub const fn uses_32bit_sizes(self) -> bool {
		self.0 >= 3
	}
}

/// Width in bytes of a collection element-count field.
pub const fn collection_size_len(format: SerializationFormat) -> usize {
	if format.uses_32bit_sizes() {
		4
	} else {
		2
	}
}

/// Width in bytes of a collection element-length prefix.
pub const fn collection_value_len(format: SerializationFormat) -> usize {
	collection_size_len(format)
}

pub fn write_collection_size(out: &mut Vec<u8>, size: usize, format: SerializationFormat) {
	if format.uses_32bit_sizes() {
		out.extend_from_slice(&(size as u32).to_be_bytes());
	} else {
		out.extend_from_slice(&(size as u16).to_be_bytes());
	}
}

pub fn read_collection_size(bytes: &mut &[u8], format: SerializationFormat) -> Result<usize> {
	if format.uses_32bit_sizes() {
		Ok(crate::util::encoding::read_be_u32(bytes)? as usize)
	} else {
		Ok(crate::util::encoding::read_be_u16(bytes)? as usize)
	}
}

pub fn write_collection_value(out: &mut Vec<u8>, value: &[u8], format: SerializationFormat) {
	write_collection_size(out, value.len(), format);
	out.extend_from_slice(value);
}

pub fn read_collection_value<'a>(
	bytes: &mut &'a [u8],
	format: SerializationFormat,
) -> Result<&'a [u8]> {
	let len = read_collection_size(bytes, format)?;
	if bytes.len() < len {
		return Err(TypeError::marshal(format!(
			"collection value truncated (expected {len} bytes, got {})",
			bytes.len()
		)));
	}
	let (value, rest) = bytes.split_at(len);
	*bytes = rest;
	Ok(value)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_size_len_by_version() {
		assert_eq!(collection_size_len(SerializationFormat::new(2)), 2);
		assert_eq!(collection_size_len(SerializationFormat::latest()), 4);
	}

	#[test]
	fn test_collection_value_roundtrip() {
		for format in [SerializationFormat::new(2), SerializationFormat::latest()] {
			let mut out = Vec::new();
			write_collection_value(&mut out, b"abc", format);
			let mut view = out.as_slice();
			assert_eq!(read_collection_value(&mut view, format).unwrap(), b"abc");
			assert!(view.is_empty());
		}
	}

	#[test]
	fn test_truncated_value() {
		let mut out = Vec::new();
		write_collection_size(&mut out, 10, SerializationFormat::latest());
		out.extend_from_slice(b"abc");
		let mut view = out.as_slice();
		assert!(read_collection_value(&mut view, SerializationFormat::latest()).is_err());
	}
}
