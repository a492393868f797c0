// Copyright (c) vitric.dev 2025
// This file is licensed under the MIT, see license.md file

pub mod emptyable;
pub mod native;
pub mod typed;

pub use emptyable::Emptyable;
pub use native::{Ascii, NativeType, NativeValue, SimpleDate, Time, Timestamp, Timeuuid};
pub use typed::{TypedValue, value_cast};
