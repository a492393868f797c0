// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

/// Errors surfaced by the value-type layer.
///
/// Every failure here is a programming or data-integrity error. The layer
/// never retries or recovers locally; callers decide how to react.
#[derive(Debug, thiserror::Error)]
pub enum TypeError {
	/// Malformed bytes during deserialize/validate, or malformed
	/// text/JSON during from_string/from_json_object.
	#[error("marshal error: {0}")]
	Marshal(String),

	/// An emptyable value was accessed as a concrete value while
	/// flagged empty.
	#[error("unexpected empty value")]
	EmptyValue,

	/// A value cast requested a native type that does not match the
	/// stored one, or the value was null.
	#[error("bad cast: expected {expected}, found {actual}")]
	BadCast {
		expected: &'static str,
		actual: &'static str,
	},

	/// Operation invalid in the current state.
	#[error("runtime error: {0}")]
	Runtime(String),
}

impl TypeError {
	pub fn marshal(message: impl Into<String>) -> Self {
		TypeError::Marshal(message.into())
	}

	pub fn runtime(message: impl Into<String>) -> Self {
		TypeError::Runtime(message.into())
	}

	pub fn is_marshal(&self) -> bool {
		matches!(self, TypeError::Marshal(_))
	}
}

pub type Result<T> = std::result::Result<T, TypeError>;
