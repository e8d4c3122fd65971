// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{collections::HashMap, sync::Arc};

use arrow_schema::{Field, Schema, SchemaRef};
use reifydb_flight_type::{ColumnKind, ColumnMetadataBuilder, MappedType, Result, SqlType, map_type};

use crate::ColumnMeta;

/// Name some sources report for expressions without an alias. Unnamed and
/// placeholder columns are named `?:<index>`.
const PLACEHOLDER_NAME: &str = "?";

/// Builds the batch schema from cursor metadata. Returns the schema together
/// with the per-field layout the destinations and builders are derived from.
pub fn infer_schema(columns: &[ColumnMeta]) -> Result<(SchemaRef, Vec<MappedType>)> {
	let mut fields = Vec::with_capacity(columns.len());
	let mut layout = Vec::with_capacity(columns.len());

	for (idx, column) in columns.iter().enumerate() {
		let mapped = map_type(&column.declared_type, column.nullable, column.native)?;

		let name = if column.name.is_empty() || column.name == PLACEHOLDER_NAME {
			format!("{}:{}", PLACEHOLDER_NAME, idx)
		} else {
			column.name.clone()
		};

		fields.push(
			Field::new(name, mapped.kind.data_type(), mapped.nullable).with_metadata(column_metadata(column)),
		);
		layout.push(mapped);
	}

	Ok((Arc::new(Schema::new(fields)), layout))
}

/// Layout of a caller supplied schema. Fails on any field outside the
/// canonical column types.
pub fn layout_from_schema(schema: &Schema) -> Result<Vec<MappedType>> {
	schema.fields()
		.iter()
		.map(|field| {
			Ok(MappedType {
				kind: ColumnKind::from_data_type(field.name(), field.data_type())?,
				nullable: field.is_nullable(),
			})
		})
		.collect()
}

/// Human readable rendering of a schema, attached to scan diagnostics.
pub fn describe_schema(schema: &Schema) -> String {
	if schema.fields().is_empty() {
		return "<no fields>".to_string();
	}

	schema.fields()
		.iter()
		.map(|field| {
			if field.is_nullable() {
				format!("{}: {}", field.name(), field.data_type())
			} else {
				format!("{}: {} not null", field.name(), field.data_type())
			}
		})
		.collect::<Vec<_>>()
		.join(", ")
}

fn column_metadata(column: &ColumnMeta) -> HashMap<String, String> {
	let mut builder = ColumnMetadataBuilder::new().scale(15).read_only(false).auto_increment(false);

	if let Some(table) = column.table.as_deref().filter(|table| !table.is_empty()) {
		builder = builder.table_name(table);
	}
	if let Some(sql_type) = SqlType::from_type_name(&column.declared_type) {
		builder = builder.type_name(sql_type.name());
	}

	builder.build()
}

#[cfg(test)]
mod tests {

	mod infer_schema {
		use arrow_schema::DataType;
		use reifydb_flight_type::{ColumnKind, Error, NativeKind, metadata};

		use crate::{ColumnMeta, infer_schema};

		#[test]
		fn test_fields_follow_column_order() {
			let columns = vec![
				ColumnMeta::new("id", "BIGINT"),
				ColumnMeta::new("name", "varchar(64)").nullable(true),
				ColumnMeta::new("score", "").native(NativeKind::Float64),
			];

			let (schema, layout) = infer_schema(&columns).unwrap();

			assert_eq!(schema.fields().len(), 3);
			assert_eq!(schema.field(0).name(), "id");
			assert_eq!(schema.field(0).data_type(), &DataType::Int64);
			assert!(!schema.field(0).is_nullable());
			assert_eq!(schema.field(1).data_type(), &DataType::Utf8);
			assert!(schema.field(1).is_nullable());
			assert_eq!(schema.field(2).data_type(), &DataType::Float64);

			let kinds: Vec<_> = layout.iter().map(|f| f.kind).collect();
			assert_eq!(kinds, vec![ColumnKind::Int64, ColumnKind::Utf8, ColumnKind::Float64]);
		}

		#[test]
		fn test_placeholder_names_get_position() {
			let columns = vec![
				ColumnMeta::new("?", "integer"),
				ColumnMeta::new("?", "integer"),
				ColumnMeta::new("", "integer"),
				ColumnMeta::new("", "integer"),
				ColumnMeta::new("total", "integer"),
			];

			let (schema, _) = infer_schema(&columns).unwrap();

			let names: Vec<_> = schema.fields().iter().map(|f| f.name().as_str()).collect();
			assert_eq!(names, vec!["?:0", "?:1", "?:2", "?:3", "total"]);
		}

		#[test]
		fn test_metadata_carries_type_tag() {
			let columns = vec![
				ColumnMeta::new("a", "int").table("users"),
				ColumnMeta::new("b", ""),
				ColumnMeta::new("c", "text").table(""),
			];

			let (schema, _) = infer_schema(&columns).unwrap();

			let a = schema.field(0).metadata();
			assert_eq!(a.get(metadata::TYPE_NAME).map(String::as_str), Some("INTEGER"));
			assert_eq!(a.get(metadata::TABLE_NAME).map(String::as_str), Some("users"));
			assert_eq!(a.get(metadata::SCALE).map(String::as_str), Some("15"));
			assert_eq!(a.get(metadata::IS_READ_ONLY).map(String::as_str), Some("0"));

			let b = schema.field(1).metadata();
			assert!(!b.contains_key(metadata::TYPE_NAME));

			let c = schema.field(2).metadata();
			assert_eq!(c.get(metadata::TYPE_NAME).map(String::as_str), Some("VARCHAR"));
			assert!(!c.contains_key(metadata::TABLE_NAME));
		}

		#[test]
		fn test_untyped_column_is_nullable_union() {
			let (schema, layout) = infer_schema(&[ColumnMeta::new("x", "")]).unwrap();
			assert_eq!(layout[0].kind, ColumnKind::Union);
			assert!(schema.field(0).is_nullable());
		}

		#[test]
		fn test_unsupported_type_fails() {
			let columns = vec![ColumnMeta::new("a", "integer"), ColumnMeta::new("b", "hugeint")];
			let err = infer_schema(&columns).unwrap_err();
			assert!(matches!(err, Error::UnsupportedType { ref declared } if declared == "hugeint"));
		}
	}

	mod layout_from_schema {
		use arrow_schema::{DataType, Field, Schema};
		use reifydb_flight_type::{ColumnKind, Error};

		use crate::layout_from_schema;

		#[test]
		fn test_ok() {
			let schema = Schema::new(vec![
				Field::new("a", DataType::Int16, false),
				Field::new("b", DataType::Binary, true),
			]);

			let layout = layout_from_schema(&schema).unwrap();

			assert_eq!(layout[0].kind, ColumnKind::Int16);
			assert!(!layout[0].nullable);
			assert_eq!(layout[1].kind, ColumnKind::Binary);
			assert!(layout[1].nullable);
		}

		#[test]
		fn test_unsupported() {
			let schema = Schema::new(vec![Field::new("a", DataType::UInt32, false)]);
			assert!(matches!(layout_from_schema(&schema), Err(Error::UnsupportedArrowType { .. })));
		}
	}

	mod describe_schema {
		use arrow_schema::{DataType, Field, Schema};

		use crate::describe_schema;

		#[test]
		fn test_lists_fields() {
			let schema = Schema::new(vec![
				Field::new("id", DataType::Int32, false),
				Field::new("name", DataType::Utf8, true),
			]);
			assert_eq!(describe_schema(&schema), "id: Int32 not null, name: Utf8");
		}

		#[test]
		fn test_empty() {
			assert_eq!(describe_schema(&Schema::empty()), "<no fields>");
		}
	}
}
