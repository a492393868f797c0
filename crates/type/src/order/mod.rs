// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

//! Lexicographical comparison kernels over typed component sequences.
//!
//! Clustering prefixes make plain lexicographical order insufficient: a
//! query bound that is a strict prefix of stored keys must be placeable
//! before or after everything it prefixes. The [`Relation`] argument
//! picks that placement per operand.

use std::cmp::Ordering;

use crate::descriptor::DataType;

/// Placement of a prefix operand relative to the values it prefixes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Relation {
	/// The prefix sorts before every value it prefixes, itself included.
	BeforeAllPrefixed = 0,
	/// The prefix sorts after an equal full value but before longer ones.
	BeforeAllStrictlyPrefixed = 1,
	/// The prefix sorts after every value it prefixes.
	AfterAllPrefixed = 2,
}

/// Strict less-than over component sequences, one type per position.
///
/// Comparison stops at the shortest of the three sequences; a sequence
/// exhausted first sorts before one with components remaining.
pub fn lexicographical_compare<T, F>(types: &[DataType], lhs: &[T], rhs: &[T], less: F) -> bool
where
	F: Fn(&DataType, &T, &T) -> bool,
{
	let n = types.len().min(lhs.len()).min(rhs.len());
	for i in 0..n {
		if less(&types[i], &lhs[i], &rhs[i]) {
			return true;
		}
		if less(&types[i], &rhs[i], &lhs[i]) {
			return false;
		}
	}
	lhs.len() == n && rhs.len() > n
}

/// Three-way lexicographical comparison with prefix placement.
///
/// `relation1` governs `lhs` when it turns out to be a prefix of `rhs`,
/// `relation2` the converse. When both end together the relations
/// themselves break the tie, ordered before-all < before-strictly <
/// after-all.
pub fn lexicographical_tri_compare<T, F>(
	types: &[DataType],
	lhs: &[T],
	rhs: &[T],
	cmp: F,
	relation1: Relation,
	relation2: Relation,
) -> Ordering
where
	F: Fn(&DataType, &T, &T) -> Ordering,
{
	let n = types.len().min(lhs.len()).min(rhs.len());
	for i in 0..n {
		let order = cmp(&types[i], &lhs[i], &rhs[i]);
		if order != Ordering::Equal {
			return order;
		}
	}
	let lhs_done = lhs.len() == n;
	let rhs_done = rhs.len() == n;
	if lhs_done && rhs_done {
		(relation1 as i8).cmp(&(relation2 as i8))
	} else if rhs_done {
		match relation2 {
			Relation::AfterAllPrefixed => Ordering::Less,
			_ => Ordering::Greater,
		}
	} else if lhs_done {
		match relation1 {
			Relation::AfterAllPrefixed => Ordering::Greater,
			_ => Ordering::Less,
		}
	} else {
		Ordering::Equal
	}
}

/// Compares only the shared prefix; a strict prefix is equal to what it
/// prefixes.
pub fn prefix_equality_tri_compare<T, F>(types: &[DataType], lhs: &[T], rhs: &[T], cmp: F) -> Ordering
where
	F: Fn(&DataType, &T, &T) -> Ordering,
{
	let n = types.len().min(lhs.len()).min(rhs.len());
	for i in 0..n {
		let order = cmp(&types[i], &lhs[i], &rhs[i]);
		if order != Ordering::Equal {
			return order;
		}
	}
	Ordering::Equal
}

/// Whether `rhs` is a (possibly full-length) prefix of `lhs`.
pub fn is_prefixed_by<T, F>(types: &[DataType], lhs: &[T], rhs: &[T], eq: F) -> bool
where
	F: Fn(&DataType, &T, &T) -> bool,
{
	let n = types.len().min(lhs.len()).min(rhs.len());
	for i in 0..n {
		if !eq(&types[i], &lhs[i], &rhs[i]) {
			return false;
		}
	}
	rhs.len() == n
}

/// Per-component strict less over serialized forms.
pub fn less_compare(dtype: &DataType, lhs: &[u8], rhs: &[u8]) -> bool {
	dtype.less(lhs, rhs)
}

/// Per-component three-way comparison over serialized forms.
pub fn tri_compare(dtype: &DataType, lhs: &[u8], rhs: &[u8]) -> Ordering {
	dtype.compare(lhs, rhs)
}

pub fn equal(dtype: &DataType, lhs: &[u8], rhs: &[u8]) -> bool {
	dtype.equal(lhs, rhs)
}

/// Missing components sort before every present one.
pub fn optional_less_compare(dtype: &DataType, lhs: &Option<&[u8]>, rhs: &Option<&[u8]>) -> bool {
	match (lhs, rhs) {
		(None, None) => false,
		(None, Some(_)) => true,
		(Some(_), None) => false,
		(Some(a), Some(b)) => dtype.less(a, b),
	}
}

pub fn tri_compare_opt(dtype: &DataType, lhs: &Option<&[u8]>, rhs: &Option<&[u8]>) -> Ordering {
	match (lhs, rhs) {
		(None, None) => Ordering::Equal,
		(None, Some(_)) => Ordering::Less,
		(Some(_), None) => Ordering::Greater,
		(Some(a), Some(b)) => dtype.compare(a, b),
	}
}

pub fn optional_equal(dtype: &DataType, lhs: &Option<&[u8]>, rhs: &Option<&[u8]>) -> bool {
	match (lhs, rhs) {
		(None, None) => true,
		(Some(a), Some(b)) => dtype.equal(a, b),
		_ => false,
	}
}
