// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{mem, sync::Arc};

use arrow_array::{
	ArrayRef, RecordBatch, RecordBatchOptions, UnionArray,
	builder::{
		ArrayBuilder, BinaryBuilder, BooleanBuilder, Date32Builder, Float32Builder, Float64Builder, Int8Builder,
		Int16Builder, Int32Builder, Int64Builder, NullBuilder, StringBuilder, Time32SecondBuilder,
		TimestampMicrosecondBuilder,
	},
};
use arrow_buffer::ScalarBuffer;
use arrow_schema::SchemaRef;
use reifydb_flight_type::{ColumnKind, Error, MappedType, Result, UnionTag, UnionValue, union_fields};

use crate::{ReaderConfig, RowDestination, Slot};

/// Accumulates scanned rows into typed column builders and finalizes them
/// into a [`RecordBatch`] on demand.
pub struct BatchBuilder {
	schema: SchemaRef,
	columns: Vec<ColumnAppender>,
	rows: usize,
}

impl BatchBuilder {
	pub fn new(schema: SchemaRef, layout: &[MappedType], config: &ReaderConfig) -> Result<Self> {
		if schema.fields().len() != layout.len() {
			return Err(Error::internal(format!(
				"schema has {} fields but the layout describes {}",
				schema.fields().len(),
				layout.len()
			)));
		}

		let columns = layout.iter().map(|field| ColumnAppender::new(field.kind, config)).collect();

		Ok(Self {
			schema,
			columns,
			rows: 0,
		})
	}

	pub fn schema(&self) -> SchemaRef {
		self.schema.clone()
	}

	/// Number of rows appended since the last finish or reset.
	pub fn len(&self) -> usize {
		self.rows
	}

	pub fn is_empty(&self) -> bool {
		self.rows == 0
	}

	/// Appends the current row held by `row`, one destination per field.
	pub fn append(&mut self, row: &[RowDestination]) -> Result<()> {
		if row.len() != self.columns.len() {
			return Err(Error::internal(format!(
				"row has {} values but the batch has {} columns",
				row.len(),
				self.columns.len()
			)));
		}

		for (column, destination) in self.columns.iter_mut().zip(row) {
			column.append(destination)?;
		}
		self.rows += 1;
		Ok(())
	}

	/// Finalizes the appended rows into a batch and leaves the builder
	/// empty for the next one.
	pub fn finish(&mut self) -> Result<RecordBatch> {
		let rows = mem::take(&mut self.rows);
		let columns: Vec<ArrayRef> = self.columns.iter_mut().map(ColumnAppender::finish).collect::<Result<_>>()?;
		let options = RecordBatchOptions::new().with_row_count(Some(rows));

		Ok(RecordBatch::try_new_with_options(self.schema.clone(), columns, &options)?)
	}

	/// Drops any partially appended rows.
	pub fn reset(&mut self) {
		self.rows = 0;
		for column in &mut self.columns {
			column.reset();
		}
	}
}

enum ColumnAppender {
	Int8(Int8Builder),
	Int16(Int16Builder),
	Int32(Int32Builder),
	Int64(Int64Builder),
	Float32(Float32Builder),
	Float64(Float64Builder),
	Utf8(StringBuilder),
	Binary(BinaryBuilder),
	Boolean(BooleanBuilder),
	Date32(Date32Builder),
	Time32(Time32SecondBuilder),
	Timestamp(TimestampMicrosecondBuilder),
	Null(NullBuilder),
	Union(UnionAppender),
}

impl ColumnAppender {
	fn new(kind: ColumnKind, config: &ReaderConfig) -> Self {
		let rows = config.batch_size;
		match kind {
			ColumnKind::Int8 => ColumnAppender::Int8(Int8Builder::with_capacity(rows)),
			ColumnKind::Int16 => ColumnAppender::Int16(Int16Builder::with_capacity(rows)),
			ColumnKind::Int32 => ColumnAppender::Int32(Int32Builder::with_capacity(rows)),
			ColumnKind::Int64 => ColumnAppender::Int64(Int64Builder::with_capacity(rows)),
			ColumnKind::Float32 => ColumnAppender::Float32(Float32Builder::with_capacity(rows)),
			ColumnKind::Float64 => ColumnAppender::Float64(Float64Builder::with_capacity(rows)),
			ColumnKind::Utf8 => {
				ColumnAppender::Utf8(StringBuilder::with_capacity(rows, config.string_capacity))
			}
			ColumnKind::Binary => {
				ColumnAppender::Binary(BinaryBuilder::with_capacity(rows, config.binary_capacity))
			}
			ColumnKind::Boolean => ColumnAppender::Boolean(BooleanBuilder::with_capacity(rows)),
			ColumnKind::Date32 => ColumnAppender::Date32(Date32Builder::with_capacity(rows)),
			ColumnKind::Time32 => ColumnAppender::Time32(Time32SecondBuilder::with_capacity(rows)),
			ColumnKind::Timestamp => {
				ColumnAppender::Timestamp(TimestampMicrosecondBuilder::with_capacity(rows))
			}
			ColumnKind::Null => ColumnAppender::Null(NullBuilder::new()),
			ColumnKind::Union => ColumnAppender::Union(UnionAppender::with_capacity(rows, config)),
		}
	}

	fn append(&mut self, destination: &RowDestination) -> Result<()> {
		match (self, destination) {
			(ColumnAppender::Binary(builder), RowDestination::Binary(bytes)) => {
				builder.append_option(bytes.as_deref());
			}
			(ColumnAppender::Union(appender), RowDestination::Any(capture)) => {
				appender.append(capture.as_ref());
			}
			(ColumnAppender::Null(builder), RowDestination::Null) => builder.append_null(),
			(column, RowDestination::Value(slot)) => column.append_slot(slot, true)?,
			(
				column,
				RowDestination::Nullable {
					valid,
					slot,
				},
			) => column.append_slot(slot, *valid)?,
			(column, destination) => {
				return Err(Error::internal(format!(
					"destination {:?} does not fit a {} column",
					destination,
					column.name()
				)));
			}
		}
		Ok(())
	}

	fn append_slot(&mut self, slot: &Slot, valid: bool) -> Result<()> {
		match (self, slot) {
			(ColumnAppender::Int8(b), Slot::Int8(v)) => b.append_option(valid.then_some(*v)),
			(ColumnAppender::Int16(b), Slot::Int16(v)) => b.append_option(valid.then_some(*v)),
			(ColumnAppender::Int32(b), Slot::Int32(v)) => b.append_option(valid.then_some(*v)),
			(ColumnAppender::Int64(b), Slot::Int64(v)) => b.append_option(valid.then_some(*v)),
			(ColumnAppender::Float32(b), Slot::Float(v)) => b.append_option(valid.then_some(*v as f32)),
			(ColumnAppender::Float64(b), Slot::Float(v)) => b.append_option(valid.then_some(*v)),
			(ColumnAppender::Utf8(b), Slot::Utf8(v)) => b.append_option(valid.then_some(v.as_str())),
			(ColumnAppender::Boolean(b), Slot::Boolean(v)) => b.append_option(valid.then_some(*v)),
			(ColumnAppender::Date32(b), Slot::Date32(v)) => b.append_option(valid.then_some(*v)),
			(ColumnAppender::Time32(b), Slot::Time32(v)) => b.append_option(valid.then_some(*v)),
			(ColumnAppender::Timestamp(b), Slot::Timestamp(v)) => b.append_option(valid.then_some(*v)),
			(column, slot) => {
				return Err(Error::internal(format!(
					"{} slot does not fit a {} column",
					slot.name(),
					column.name()
				)));
			}
		}
		Ok(())
	}

	fn finish(&mut self) -> Result<ArrayRef> {
		let array: ArrayRef = match self {
			ColumnAppender::Int8(b) => Arc::new(b.finish()),
			ColumnAppender::Int16(b) => Arc::new(b.finish()),
			ColumnAppender::Int32(b) => Arc::new(b.finish()),
			ColumnAppender::Int64(b) => Arc::new(b.finish()),
			ColumnAppender::Float32(b) => Arc::new(b.finish()),
			ColumnAppender::Float64(b) => Arc::new(b.finish()),
			ColumnAppender::Utf8(b) => Arc::new(b.finish()),
			ColumnAppender::Binary(b) => Arc::new(b.finish()),
			ColumnAppender::Boolean(b) => Arc::new(b.finish()),
			ColumnAppender::Date32(b) => Arc::new(b.finish()),
			ColumnAppender::Time32(b) => Arc::new(b.finish()),
			ColumnAppender::Timestamp(b) => Arc::new(b.finish()),
			ColumnAppender::Null(b) => Arc::new(b.finish()),
			ColumnAppender::Union(appender) => Arc::new(appender.finish()?),
		};
		Ok(array)
	}

	fn reset(&mut self) {
		match self {
			ColumnAppender::Union(appender) => appender.reset(),
			// finishing empties the builder; the array is not needed
			column => drop(column.finish()),
		}
	}

	fn name(&self) -> &'static str {
		match self {
			ColumnAppender::Int8(_) => "int8",
			ColumnAppender::Int16(_) => "int16",
			ColumnAppender::Int32(_) => "int32",
			ColumnAppender::Int64(_) => "int64",
			ColumnAppender::Float32(_) => "float32",
			ColumnAppender::Float64(_) => "float64",
			ColumnAppender::Utf8(_) => "utf8",
			ColumnAppender::Binary(_) => "binary",
			ColumnAppender::Boolean(_) => "boolean",
			ColumnAppender::Date32(_) => "date32",
			ColumnAppender::Time32(_) => "time32",
			ColumnAppender::Timestamp(_) => "timestamp",
			ColumnAppender::Null(_) => "null",
			ColumnAppender::Union(_) => "union",
		}
	}
}

/// Dense union of int64, float64 and utf8 children. A NULL capture is
/// encoded as a null in the int child.
struct UnionAppender {
	type_ids: Vec<i8>,
	offsets: Vec<i32>,
	ints: Int64Builder,
	floats: Float64Builder,
	texts: StringBuilder,
}

impl UnionAppender {
	fn with_capacity(rows: usize, config: &ReaderConfig) -> Self {
		Self {
			type_ids: Vec::with_capacity(rows),
			offsets: Vec::with_capacity(rows),
			ints: Int64Builder::with_capacity(rows),
			floats: Float64Builder::new(),
			texts: StringBuilder::with_capacity(0, config.string_capacity),
		}
	}

	fn append(&mut self, capture: Option<&UnionValue>) {
		let (tag, offset) = match capture {
			None => {
				let offset = self.ints.len();
				self.ints.append_null();
				(UnionTag::Int, offset)
			}
			Some(UnionValue::Int(v)) => {
				let offset = self.ints.len();
				self.ints.append_value(*v);
				(UnionTag::Int, offset)
			}
			Some(UnionValue::Float(v)) => {
				let offset = self.floats.len();
				self.floats.append_value(*v);
				(UnionTag::Float, offset)
			}
			Some(UnionValue::Text(v)) => {
				let offset = self.texts.len();
				self.texts.append_value(v);
				(UnionTag::Text, offset)
			}
		};
		self.type_ids.push(tag.type_id());
		self.offsets.push(offset as i32);
	}

	fn finish(&mut self) -> Result<UnionArray> {
		let type_ids = ScalarBuffer::from(mem::take(&mut self.type_ids));
		let offsets = ScalarBuffer::from(mem::take(&mut self.offsets));
		let children: Vec<ArrayRef> = vec![
			Arc::new(self.ints.finish()),
			Arc::new(self.floats.finish()),
			Arc::new(self.texts.finish()),
		];

		Ok(UnionArray::try_new(union_fields(), type_ids, Some(offsets), children)?)
	}

	fn reset(&mut self) {
		self.type_ids.clear();
		self.offsets.clear();
		self.ints.finish();
		self.floats.finish();
		self.texts.finish();
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use arrow_schema::{Field, Schema, SchemaRef};
	use reifydb_flight_type::{ColumnKind, MappedType};

	use crate::{BatchBuilder, ReaderConfig};

	fn layout(fields: &[(ColumnKind, bool)]) -> (SchemaRef, Vec<MappedType>) {
		let layout: Vec<_> = fields
			.iter()
			.map(|(kind, nullable)| MappedType {
				kind: *kind,
				nullable: *nullable,
			})
			.collect();
		let schema = Schema::new(
			layout.iter()
				.enumerate()
				.map(|(idx, f)| Field::new(format!("c{}", idx), f.kind.data_type(), f.nullable))
				.collect::<Vec<_>>(),
		);
		(Arc::new(schema), layout)
	}

	fn builder(fields: &[(ColumnKind, bool)]) -> BatchBuilder {
		let (schema, layout) = layout(fields);
		BatchBuilder::new(schema, &layout, &ReaderConfig::default()).unwrap()
	}

	mod new {
		use reifydb_flight_type::{ColumnKind, Error};

		use super::layout;
		use crate::{BatchBuilder, ReaderConfig};

		#[test]
		fn test_shape_mismatch() {
			let (schema, mut layout) = layout(&[(ColumnKind::Int32, false), (ColumnKind::Utf8, true)]);
			layout.pop();

			let result = BatchBuilder::new(schema, &layout, &ReaderConfig::default());
			assert!(matches!(result, Err(Error::Internal { .. })));
		}
	}

	mod append {
		use arrow_array::{Array, BinaryArray, Float32Array, Int32Array, StringArray};
		use reifydb_flight_type::{ColumnKind, Error};

		use super::builder;
		use crate::{RowDestination, Slot};

		#[test]
		fn test_nullable_values() {
			let mut builder = builder(&[(ColumnKind::Int32, true)]);

			builder.append(&[RowDestination::Nullable {
				valid: false,
				slot: Slot::Int32(99),
			}])
			.unwrap();
			builder.append(&[RowDestination::Nullable {
				valid: true,
				slot: Slot::Int32(7),
			}])
			.unwrap();

			let batch = builder.finish().unwrap();
			let column = batch.column(0).as_any().downcast_ref::<Int32Array>().unwrap();
			assert!(column.is_null(0));
			assert_eq!(column.value(1), 7);
		}

		#[test]
		fn test_float32_narrowing() {
			let mut builder = builder(&[(ColumnKind::Float32, false)]);
			builder.append(&[RowDestination::Value(Slot::Float(1.1))]).unwrap();

			let batch = builder.finish().unwrap();
			let column = batch.column(0).as_any().downcast_ref::<Float32Array>().unwrap();
			assert_eq!(column.value(0), 1.1f64 as f32);
		}

		#[test]
		fn test_binary_null_and_empty() {
			let mut builder = builder(&[(ColumnKind::Binary, true)]);
			builder.append(&[RowDestination::Binary(None)]).unwrap();
			builder.append(&[RowDestination::Binary(Some(vec![]))]).unwrap();

			let batch = builder.finish().unwrap();
			let column = batch.column(0).as_any().downcast_ref::<BinaryArray>().unwrap();
			assert!(column.is_null(0));
			assert!(column.is_valid(1));
			assert!(column.value(1).is_empty());
		}

		#[test]
		fn test_utf8() {
			let mut builder = builder(&[(ColumnKind::Utf8, false)]);
			builder.append(&[RowDestination::Value(Slot::Utf8("hello".to_string()))]).unwrap();

			let batch = builder.finish().unwrap();
			let column = batch.column(0).as_any().downcast_ref::<StringArray>().unwrap();
			assert_eq!(column.value(0), "hello");
		}

		#[test]
		fn test_mismatched_destination() {
			let mut builder = builder(&[(ColumnKind::Int32, false)]);
			let result = builder.append(&[RowDestination::Value(Slot::Int64(1))]);
			assert!(matches!(result, Err(Error::Internal { .. })));
		}

		#[test]
		fn test_wrong_row_width() {
			let mut builder = builder(&[(ColumnKind::Int32, false), (ColumnKind::Int32, false)]);
			let result = builder.append(&[RowDestination::Value(Slot::Int32(1))]);
			assert!(matches!(result, Err(Error::Internal { .. })));
		}
	}

	mod scalar {
		use arrow_array::{
			Array, BooleanArray, Date32Array, Int8Array, Time32SecondArray, TimestampMicrosecondArray,
		};
		use reifydb_flight_type::ColumnKind;

		use super::builder;
		use crate::{RowDestination, Slot};

		fn nullable(valid: bool, slot: Slot) -> RowDestination {
			RowDestination::Nullable {
				valid,
				slot,
			}
		}

		#[test]
		fn test_typed_columns_with_nulls() {
			let mut builder = builder(&[
				(ColumnKind::Int8, true),
				(ColumnKind::Boolean, true),
				(ColumnKind::Date32, true),
				(ColumnKind::Time32, true),
				(ColumnKind::Timestamp, true),
			]);

			builder.append(&[
				nullable(true, Slot::Int8(-5)),
				nullable(true, Slot::Boolean(true)),
				nullable(true, Slot::Date32(19_000)),
				nullable(true, Slot::Time32(3_600)),
				nullable(true, Slot::Timestamp(1_700_000_000_000_000)),
			])
			.unwrap();
			builder.append(&[
				nullable(false, Slot::Int8(0)),
				nullable(false, Slot::Boolean(false)),
				nullable(false, Slot::Date32(0)),
				nullable(false, Slot::Time32(0)),
				nullable(false, Slot::Timestamp(0)),
			])
			.unwrap();

			let batch = builder.finish().unwrap();
			assert_eq!(batch.num_rows(), 2);

			let tiny = batch.column(0).as_any().downcast_ref::<Int8Array>().unwrap();
			assert_eq!(tiny.value(0), -5);
			assert!(tiny.is_null(1));

			let flags = batch.column(1).as_any().downcast_ref::<BooleanArray>().unwrap();
			assert!(flags.value(0));
			assert!(flags.is_null(1));

			let dates = batch.column(2).as_any().downcast_ref::<Date32Array>().unwrap();
			assert_eq!(dates.value(0), 19_000);
			assert!(dates.is_null(1));

			let times = batch.column(3).as_any().downcast_ref::<Time32SecondArray>().unwrap();
			assert_eq!(times.value(0), 3_600);
			assert!(times.is_null(1));

			let stamps = batch.column(4).as_any().downcast_ref::<TimestampMicrosecondArray>().unwrap();
			assert_eq!(stamps.value(0), 1_700_000_000_000_000);
			assert!(stamps.is_null(1));
		}
	}

	mod union {
		use arrow_array::{Array, Float64Array, Int64Array, StringArray, UnionArray};
		use reifydb_flight_type::{ColumnKind, UnionValue};

		use super::builder;
		use crate::RowDestination;

		#[test]
		fn test_dense_encoding() {
			let mut builder = builder(&[(ColumnKind::Union, true)]);
			for capture in [
				Some(UnionValue::Int(1)),
				Some(UnionValue::Text("a".to_string())),
				None,
				Some(UnionValue::Float(2.5)),
				Some(UnionValue::Int(3)),
			] {
				builder.append(&[RowDestination::Any(capture)]).unwrap();
			}

			let batch = builder.finish().unwrap();
			assert_eq!(batch.num_rows(), 5);

			let union = batch.column(0).as_any().downcast_ref::<UnionArray>().unwrap();
			assert_eq!(union.type_ids().to_vec(), vec![0, 2, 0, 1, 0]);
			assert_eq!(union.offsets().unwrap().to_vec(), vec![0, 0, 1, 0, 2]);

			let ints = union.child(0).as_any().downcast_ref::<Int64Array>().unwrap();
			assert_eq!(ints.len(), 3);
			assert_eq!(ints.value(0), 1);
			assert!(ints.is_null(1));
			assert_eq!(ints.value(2), 3);

			let floats = union.child(1).as_any().downcast_ref::<Float64Array>().unwrap();
			assert_eq!(floats.value(0), 2.5);

			let texts = union.child(2).as_any().downcast_ref::<StringArray>().unwrap();
			assert_eq!(texts.value(0), "a");
		}
	}

	mod finish {
		use reifydb_flight_type::ColumnKind;

		use super::builder;
		use crate::{RowDestination, Slot};

		#[test]
		fn test_resets_for_next_batch() {
			let mut builder = builder(&[(ColumnKind::Int64, false)]);
			builder.append(&[RowDestination::Value(Slot::Int64(1))]).unwrap();
			builder.append(&[RowDestination::Value(Slot::Int64(2))]).unwrap();
			assert_eq!(builder.len(), 2);

			assert_eq!(builder.finish().unwrap().num_rows(), 2);
			assert!(builder.is_empty());

			builder.append(&[RowDestination::Value(Slot::Int64(3))]).unwrap();
			assert_eq!(builder.finish().unwrap().num_rows(), 1);
		}

		#[test]
		fn test_zero_field_schema_keeps_row_count() {
			let mut builder = builder(&[]);
			builder.append(&[]).unwrap();
			builder.append(&[]).unwrap();

			let batch = builder.finish().unwrap();
			assert_eq!(batch.num_columns(), 0);
			assert_eq!(batch.num_rows(), 2);
		}

		#[test]
		fn test_reset_discards_rows() {
			let mut builder = builder(&[(ColumnKind::Utf8, true), (ColumnKind::Union, true)]);
			builder.append(&[RowDestination::Value(Slot::Utf8("x".to_string())), RowDestination::Any(None)])
				.unwrap();

			builder.reset();
			assert!(builder.is_empty());

			let batch = builder.finish().unwrap();
			assert_eq!(batch.num_rows(), 0);
			assert_eq!(batch.column(0).len(), 0);
			assert_eq!(batch.column(1).len(), 0);
		}
	}
}
