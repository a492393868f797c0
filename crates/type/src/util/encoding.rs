// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Cursor-style reads over byte slices.
//!
//! Every reader fails with a marshal error carrying the expected and
//! actual byte counts, so corruption is diagnosable at the call site.

use crate::error::{Result, TypeError};

macro_rules! read_be {
	($fn_name:ident, $exact_name:ident, $ty:ty) => {
		/// Consumes the fixed-width prefix of `bytes`, advancing it.
		pub fn $fn_name(bytes: &mut &[u8]) -> Result<$ty> {
			const WIDTH: usize = size_of::<$ty>();
			if bytes.len() < WIDTH {
				return Err(TypeError::marshal(format!(
					concat!(stringify!($fn_name), " - not enough bytes (expected {}, got {})"),
					WIDTH,
					bytes.len()
				)));
			}
			let (head, rest) = bytes.split_at(WIDTH);
			*bytes = rest;
			Ok(<$ty>::from_be_bytes(head.try_into().expect("split width")))
		}

		/// Reads `bytes` as exactly one fixed-width value.
		pub fn $exact_name(bytes: &[u8]) -> Result<$ty> {
			const WIDTH: usize = size_of::<$ty>();
			if bytes.len() != WIDTH {
				return Err(TypeError::marshal(format!(
					concat!(stringify!($exact_name), " - size mismatch (expected {}, got {})"),
					WIDTH,
					bytes.len()
				)));
			}
			Ok(<$ty>::from_be_bytes(bytes.try_into().expect("exact width")))
		}
	};
}

read_be!(read_be_i8, read_exact_i8, i8);
read_be!(read_be_i16, read_exact_i16, i16);
read_be!(read_be_i32, read_exact_i32, i32);
read_be!(read_be_i64, read_exact_i64, i64);
read_be!(read_be_u16, read_exact_u16, u16);
read_be!(read_be_u32, read_exact_u32, u32);
read_be!(read_be_u64, read_exact_u64, u64);

/// Consumes `n` bytes from the front of `bytes`.
pub fn read_bytes<'a>(bytes: &mut &'a [u8], n: usize) -> Result<&'a [u8]> {
	if bytes.len() < n {
		return Err(TypeError::marshal(format!(
			"read_bytes - not enough bytes (requested {n}, got {})",
			bytes.len()
		)));
	}
	let (head, rest) = bytes.split_at(n);
	*bytes = rest;
	Ok(head)
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_read_be_advances() {
		let mut view: &[u8] = &[0x00, 0x00, 0x00, 0x2a, 0xff];
		assert_eq!(read_be_i32(&mut view).unwrap(), 42);
		assert_eq!(view, &[0xff]);
	}

	#[test]
	fn test_read_exact_rejects_wrong_width() {
		assert!(read_exact_i32(&[0, 0, 42]).is_err());
		assert!(read_exact_i32(&[0, 0, 0, 0, 42]).is_err());
	}

	#[test]
	fn test_read_exact_negative() {
		assert_eq!(read_exact_i64(&(-7i64).to_be_bytes()).unwrap(), -7);
	}

	#[test]
	fn test_read_bytes_truncated() {
		let mut view: &[u8] = &[1, 2];
		let err = read_bytes(&mut view, 3).unwrap_err();
		assert!(err.is_marshal());
	}

}
