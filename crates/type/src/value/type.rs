// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// All possible logical types of a column or function signature
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Type {
	/// A boolean: true or false.
	Boolean,
	/// A 4-byte signed integer
	Int4,
	/// An 8-byte signed integer
	Int8,
	/// An 8-byte floating point
	Float8,
	/// A UTF-8 encoded text
	Utf8,
	/// Wildcard accepted by polymorphic signatures; never a concrete column type
	Any,
	/// Placeholder for a type that has not been resolved yet
	Undefined,
}

impl Type {
	/// Whether the type denotes concrete data, as opposed to a placeholder or wildcard.
	pub fn is_resolved(&self) -> bool {
		!matches!(self, Type::Any | Type::Undefined)
	}

	pub fn to_u8(&self) -> u8 {
		match self {
			Type::Boolean => 0x01,
			Type::Int4 => 0x02,
			Type::Int8 => 0x03,
			Type::Float8 => 0x04,
			Type::Utf8 => 0x05,
			Type::Any => 0xFE,
			Type::Undefined => 0x00,
		}
	}

	pub fn from_u8(value: u8) -> Type {
		match value {
			0x01 => Type::Boolean,
			0x02 => Type::Int4,
			0x03 => Type::Int8,
			0x04 => Type::Float8,
			0x05 => Type::Utf8,
			0xFE => Type::Any,
			_ => Type::Undefined,
		}
	}
}

impl Display for Type {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Type::Boolean => f.write_str("Boolean"),
			Type::Int4 => f.write_str("Int4"),
			Type::Int8 => f.write_str("Int8"),
			Type::Float8 => f.write_str("Float8"),
			Type::Utf8 => f.write_str("Utf8"),
			Type::Any => f.write_str("Any"),
			Type::Undefined => f.write_str("Undefined"),
		}
	}
}
