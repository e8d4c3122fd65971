// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use serde::{Deserialize, Serialize};

/// Discriminant of a [`UnionValue`]; doubles as the type id of the matching
/// child in the dense union column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnionTag {
	Int,
	Float,
	Text,
}

impl UnionTag {
	pub const fn type_id(self) -> i8 {
		match self {
			UnionTag::Int => 0,
			UnionTag::Float => 1,
			UnionTag::Text => 2,
		}
	}

	pub const fn field_name(self) -> &'static str {
		match self {
			UnionTag::Int => "int",
			UnionTag::Float => "float",
			UnionTag::Text => "string",
		}
	}
}

/// A value captured from a column whose type was not known up front.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum UnionValue {
	Int(i64),
	Float(f64),
	Text(String),
}

impl UnionValue {
	pub fn tag(&self) -> UnionTag {
		match self {
			UnionValue::Int(_) => UnionTag::Int,
			UnionValue::Float(_) => UnionTag::Float,
			UnionValue::Text(_) => UnionTag::Text,
		}
	}
}

impl From<i64> for UnionValue {
	fn from(value: i64) -> Self {
		UnionValue::Int(value)
	}
}

impl From<f64> for UnionValue {
	fn from(value: f64) -> Self {
		UnionValue::Float(value)
	}
}

impl From<&str> for UnionValue {
	fn from(value: &str) -> Self {
		UnionValue::Text(value.to_string())
	}
}

impl From<String> for UnionValue {
	fn from(value: String) -> Self {
		UnionValue::Text(value)
	}
}
