// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::{ColumnKind, Error, NativeKind, Result};

/// Canonical type of a source column together with the nullability the
/// resulting field carries.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MappedType {
	pub kind: ColumnKind,
	pub nullable: bool,
}

/// Resolves a source column onto its canonical column type.
///
/// A non-empty `declared` name is looked up case-insensitively; names outside
/// the table are rejected. An empty name falls back to the `native` scan kind,
/// and with no native kind either the column becomes a union, since the
/// source cannot tell the type before rows are materialized. Union columns
/// are always nullable.
pub fn map_type(declared: &str, nullable: bool, native: Option<NativeKind>) -> Result<MappedType> {
	let kind = if declared.is_empty() {
		match native {
			None => ColumnKind::Union,
			Some(native) => map_native(native)?,
		}
	} else {
		map_declared(declared)?
	};

	Ok(MappedType {
		kind,
		nullable: nullable || kind == ColumnKind::Union,
	})
}

fn map_declared(declared: &str) -> Result<ColumnKind> {
	let name = declared.to_ascii_lowercase();
	if name.starts_with("varchar") {
		return Ok(ColumnKind::Utf8);
	}

	let kind = match name.as_str() {
		"tinyint" => ColumnKind::Int8,
		"smallint" => ColumnKind::Int16,
		"integer" | "int" | "int32" => ColumnKind::Int32,
		"bigint" | "int64" => ColumnKind::Int64,
		"float" => ColumnKind::Float32,
		"double" => ColumnKind::Float64,
		"blob" => ColumnKind::Binary,
		"text" | "string" => ColumnKind::Utf8,
		"date" => ColumnKind::Date32,
		"time" => ColumnKind::Time32,
		"timestamp" => ColumnKind::Timestamp,
		"boolean" => ColumnKind::Boolean,
		_ => {
			return Err(Error::UnsupportedType {
				declared: declared.to_string(),
			});
		}
	};
	Ok(kind)
}

fn map_native(native: NativeKind) -> Result<ColumnKind> {
	let kind = match native {
		NativeKind::Int8 | NativeKind::Uint8 => ColumnKind::Int8,
		NativeKind::Int16 | NativeKind::Uint16 => ColumnKind::Int16,
		NativeKind::Int32 | NativeKind::Uint32 => ColumnKind::Int32,
		NativeKind::Int | NativeKind::Int64 | NativeKind::Uint64 => ColumnKind::Int64,
		NativeKind::Float32 => ColumnKind::Float32,
		NativeKind::Float64 => ColumnKind::Float64,
		NativeKind::String => ColumnKind::Utf8,
		NativeKind::Bool => ColumnKind::Boolean,
		other => {
			return Err(Error::UnsupportedNativeKind {
				kind: other,
			});
		}
	};
	Ok(kind)
}
