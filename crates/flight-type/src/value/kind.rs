// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
	sync::Arc,
};

use arrow_schema::{DataType, Field, TimeUnit, UnionFields, UnionMode};

use crate::{Error, Result, UnionTag};

/// The closed set of column types the batch reader can build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColumnKind {
	Int8,
	Int16,
	Int32,
	Int64,
	Float32,
	Float64,
	Utf8,
	Binary,
	Boolean,
	/// Days since the unix epoch
	Date32,
	/// Seconds since midnight
	Time32,
	/// Microseconds since the unix epoch, no time zone
	Timestamp,
	Null,
	/// Dense union of int64, float64 and utf8 for columns whose type is not
	/// known before the first row is materialized.
	Union,
}

impl ColumnKind {
	pub fn data_type(&self) -> DataType {
		match self {
			ColumnKind::Int8 => DataType::Int8,
			ColumnKind::Int16 => DataType::Int16,
			ColumnKind::Int32 => DataType::Int32,
			ColumnKind::Int64 => DataType::Int64,
			ColumnKind::Float32 => DataType::Float32,
			ColumnKind::Float64 => DataType::Float64,
			ColumnKind::Utf8 => DataType::Utf8,
			ColumnKind::Binary => DataType::Binary,
			ColumnKind::Boolean => DataType::Boolean,
			ColumnKind::Date32 => DataType::Date32,
			ColumnKind::Time32 => DataType::Time32(TimeUnit::Second),
			ColumnKind::Timestamp => DataType::Timestamp(TimeUnit::Microsecond, None),
			ColumnKind::Null => DataType::Null,
			ColumnKind::Union => DataType::Union(union_fields(), UnionMode::Dense),
		}
	}

	/// Inverse of [`ColumnKind::data_type`]. Union types are accepted only in
	/// the exact dense layout the reader produces.
	pub fn from_data_type(field: &str, data_type: &DataType) -> Result<Self> {
		let kind = match data_type {
			DataType::Int8 => ColumnKind::Int8,
			DataType::Int16 => ColumnKind::Int16,
			DataType::Int32 => ColumnKind::Int32,
			DataType::Int64 => ColumnKind::Int64,
			DataType::Float32 => ColumnKind::Float32,
			DataType::Float64 => ColumnKind::Float64,
			DataType::Utf8 => ColumnKind::Utf8,
			DataType::Binary => ColumnKind::Binary,
			DataType::Boolean => ColumnKind::Boolean,
			DataType::Date32 => ColumnKind::Date32,
			DataType::Time32(TimeUnit::Second) => ColumnKind::Time32,
			DataType::Timestamp(TimeUnit::Microsecond, None) => ColumnKind::Timestamp,
			DataType::Null => ColumnKind::Null,
			DataType::Union(fields, UnionMode::Dense) if *fields == union_fields() => ColumnKind::Union,
			other => {
				return Err(Error::UnsupportedArrowType {
					field: field.to_string(),
					data_type: other.clone(),
				});
			}
		};
		Ok(kind)
	}
}

impl Display for ColumnKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			ColumnKind::Int8 => f.write_str("int8"),
			ColumnKind::Int16 => f.write_str("int16"),
			ColumnKind::Int32 => f.write_str("int32"),
			ColumnKind::Int64 => f.write_str("int64"),
			ColumnKind::Float32 => f.write_str("float32"),
			ColumnKind::Float64 => f.write_str("float64"),
			ColumnKind::Utf8 => f.write_str("utf8"),
			ColumnKind::Binary => f.write_str("binary"),
			ColumnKind::Boolean => f.write_str("boolean"),
			ColumnKind::Date32 => f.write_str("date32"),
			ColumnKind::Time32 => f.write_str("time32[s]"),
			ColumnKind::Timestamp => f.write_str("timestamp[us]"),
			ColumnKind::Null => f.write_str("null"),
			ColumnKind::Union => f.write_str("union<int, float, string>"),
		}
	}
}

/// Children of the dense union used for untyped columns, keyed by
/// [`UnionTag`] type ids.
pub fn union_fields() -> UnionFields {
	UnionFields::new(
		[UnionTag::Int.type_id(), UnionTag::Float.type_id(), UnionTag::Text.type_id()],
		[
			Arc::new(Field::new(UnionTag::Int.field_name(), DataType::Int64, true)),
			Arc::new(Field::new(UnionTag::Float.field_name(), DataType::Float64, true)),
			Arc::new(Field::new(UnionTag::Text.field_name(), DataType::Utf8, true)),
		],
	)
}

#[cfg(test)]
mod tests {
	use super::*;

	const ALL: [ColumnKind; 14] = [
		ColumnKind::Int8,
		ColumnKind::Int16,
		ColumnKind::Int32,
		ColumnKind::Int64,
		ColumnKind::Float32,
		ColumnKind::Float64,
		ColumnKind::Utf8,
		ColumnKind::Binary,
		ColumnKind::Boolean,
		ColumnKind::Date32,
		ColumnKind::Time32,
		ColumnKind::Timestamp,
		ColumnKind::Null,
		ColumnKind::Union,
	];

	#[test]
	fn test_data_type_is_invertible() {
		for kind in ALL {
			assert_eq!(ColumnKind::from_data_type("f", &kind.data_type()).unwrap(), kind);
		}
	}

	#[test]
	fn test_union_layout() {
		let DataType::Union(fields, mode) = ColumnKind::Union.data_type() else {
			panic!("expected union");
		};
		assert_eq!(mode, UnionMode::Dense);

		let children: Vec<_> = fields.iter().map(|(id, f)| (id, f.name().clone(), f.data_type().clone())).collect();
		assert_eq!(
			children,
			vec![
				(0, "int".to_string(), DataType::Int64),
				(1, "float".to_string(), DataType::Float64),
				(2, "string".to_string(), DataType::Utf8),
			]
		);
	}

	#[test]
	fn test_rejects_types_outside_the_set() {
		let err = ColumnKind::from_data_type("price", &DataType::Decimal128(10, 2)).unwrap_err();
		assert!(matches!(err, Error::UnsupportedArrowType { ref field, .. } if field == "price"));

		assert!(ColumnKind::from_data_type("t", &DataType::Time32(TimeUnit::Millisecond)).is_err());
		assert!(ColumnKind::from_data_type("t", &DataType::Timestamp(TimeUnit::Microsecond, Some("UTC".into())))
			.is_err());
		assert!(ColumnKind::from_data_type("u", &DataType::Union(union_fields(), UnionMode::Sparse)).is_err());
	}
}
