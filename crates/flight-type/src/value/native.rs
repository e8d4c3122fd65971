// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
};

use serde::{Deserialize, Serialize};

/// The value category a driver scans a column into, reported for columns
/// whose declared type name is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NativeKind {
	Int8,
	Uint8,
	Int16,
	Uint16,
	Int32,
	Uint32,
	/// Platform sized signed integer
	Int,
	Int64,
	Uint64,
	/// Platform sized unsigned integer
	Uint,
	Float32,
	Float64,
	String,
	Bool,
	Bytes,
	Time,
	Decimal,
	List,
	Map,
	Struct,
	Interface,
}

impl Display for NativeKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		let name = match self {
			NativeKind::Int8 => "int8",
			NativeKind::Uint8 => "uint8",
			NativeKind::Int16 => "int16",
			NativeKind::Uint16 => "uint16",
			NativeKind::Int32 => "int32",
			NativeKind::Uint32 => "uint32",
			NativeKind::Int => "int",
			NativeKind::Int64 => "int64",
			NativeKind::Uint64 => "uint64",
			NativeKind::Uint => "uint",
			NativeKind::Float32 => "float32",
			NativeKind::Float64 => "float64",
			NativeKind::String => "string",
			NativeKind::Bool => "bool",
			NativeKind::Bytes => "bytes",
			NativeKind::Time => "time",
			NativeKind::Decimal => "decimal",
			NativeKind::List => "list",
			NativeKind::Map => "map",
			NativeKind::Struct => "struct",
			NativeKind::Interface => "interface",
		};
		f.write_str(name)
	}
}
