// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{self, Debug, Formatter},
	sync::Arc,
};

use arrow_array::RecordBatch;
use arrow_schema::SchemaRef;
use parking_lot::Mutex;
use reifydb_flight_type::{Error, MappedType, Result, error::diagnostic};
use tracing::{debug, instrument, trace, warn};

use crate::{
	BatchBuilder, BatchStream, Cursor, ReaderConfig, RowDestination, allocate, describe_schema, infer_schema,
	layout_from_schema,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReaderState {
	/// No call to [`BatchReader::next`] has been made yet
	Ready,
	/// The last call to [`BatchReader::next`] exposed a batch, possibly
	/// without rows
	HasBatch,
	/// A scan failed; no further batches are produced
	Errored,
}

/// Pulls rows from a [`Cursor`] and emits them as record batches.
///
/// Handles are cheap to clone and share one underlying reader. The cursor is
/// closed exactly once, when the last handle is dropped.
pub struct BatchReader<C: Cursor> {
	shared: Arc<Shared<C>>,
}

struct Shared<C: Cursor> {
	schema: SchemaRef,
	inner: Mutex<Inner<C>>,
}

struct Inner<C: Cursor> {
	cursor: C,
	destinations: Vec<RowDestination>,
	builder: BatchBuilder,
	batch_size: usize,
	batch: Option<RecordBatch>,
	error: Option<Error>,
	exhausted: bool,
	state: ReaderState,
}

impl<C: Cursor> BatchReader<C> {
	/// Creates a reader whose schema is inferred from the cursor's column
	/// metadata. The cursor is closed when construction fails.
	#[instrument(name = "flight::reader::new", level = "debug", skip(cursor, config))]
	pub fn new(mut cursor: C, config: ReaderConfig) -> Result<Self> {
		if let Err(err) = config.validate() {
			return Err(close_on_failure(cursor, err));
		}

		let columns = match cursor.columns() {
			Ok(columns) => columns,
			Err(err) => return Err(close_on_failure(cursor, Error::construction(err))),
		};

		let (schema, layout) = match infer_schema(&columns) {
			Ok(resolved) => resolved,
			Err(err) => return Err(close_on_failure(cursor, err)),
		};

		Self::build(cursor, schema, &layout, &config)
	}

	/// Creates a reader for a caller supplied schema. Column metadata is not
	/// consulted; the cursor must produce values in field order.
	#[instrument(name = "flight::reader::with_schema", level = "debug", skip(schema, cursor, config))]
	pub fn with_schema(schema: SchemaRef, cursor: C, config: ReaderConfig) -> Result<Self> {
		if let Err(err) = config.validate() {
			return Err(close_on_failure(cursor, err));
		}

		let layout = match layout_from_schema(&schema) {
			Ok(layout) => layout,
			Err(err) => return Err(close_on_failure(cursor, err)),
		};

		Self::build(cursor, schema, &layout, &config)
	}

	fn build(cursor: C, schema: SchemaRef, layout: &[MappedType], config: &ReaderConfig) -> Result<Self> {
		let builder = match BatchBuilder::new(schema.clone(), layout, config) {
			Ok(builder) => builder,
			Err(err) => return Err(close_on_failure(cursor, err)),
		};

		debug!(fields = schema.fields().len(), batch_size = config.batch_size, "batch reader created");

		Ok(Self {
			shared: Arc::new(Shared {
				schema,
				inner: Mutex::new(Inner {
					cursor,
					destinations: allocate(layout),
					builder,
					batch_size: config.batch_size,
					batch: None,
					error: None,
					exhausted: false,
					state: ReaderState::Ready,
				}),
			}),
		})
	}

	/// Advances to the next batch. Returns `true` when a batch with at least
	/// one row is available through [`BatchReader::batch`].
	///
	/// The previous batch is released first. Once a scan has failed the
	/// reader stays errored and the cursor is not touched again.
	#[instrument(name = "flight::reader::next", level = "trace", skip(self))]
	pub fn next(&self) -> bool {
		let mut inner = self.shared.inner.lock();
		inner.batch = None;

		if inner.state == ReaderState::Errored {
			return false;
		}

		match inner.fill(&self.shared.schema) {
			Ok(batch) => {
				let rows = batch.num_rows();
				trace!(rows, "batch produced");
				inner.batch = Some(batch);
				inner.state = ReaderState::HasBatch;
				rows > 0
			}
			Err(err) => {
				warn!(error = %err, "batch reader failed");
				inner.builder.reset();
				inner.error = Some(err);
				inner.state = ReaderState::Errored;
				false
			}
		}
	}

	pub fn schema(&self) -> SchemaRef {
		self.shared.schema.clone()
	}

	/// The batch exposed by the last successful call to
	/// [`BatchReader::next`], empty when the cursor had no rows left. Cloning
	/// a batch shares its buffers.
	pub fn batch(&self) -> Option<RecordBatch> {
		self.shared.inner.lock().batch.clone()
	}

	pub fn error(&self) -> Option<Error> {
		self.shared.inner.lock().error.clone()
	}

	pub fn state(&self) -> ReaderState {
		self.shared.inner.lock().state
	}

	/// Hands out another handle to the same reader.
	pub fn retain(&self) -> Self {
		Self {
			shared: Arc::clone(&self.shared),
		}
	}

	/// Gives up this handle. The cursor is closed when the last handle goes.
	pub fn release(self) {
		drop(self);
	}

	/// Number of live handles.
	pub fn ref_count(&self) -> usize {
		Arc::strong_count(&self.shared)
	}

	/// Iterator over the remaining batches, sharing this reader.
	pub fn stream(&self) -> BatchStream<C> {
		BatchStream::new(self.retain())
	}
}

impl<C: Cursor> Inner<C> {
	/// Scans up to `batch_size` rows into a new batch. An exhausted cursor is
	/// not advanced again and yields empty batches.
	fn fill(&mut self, schema: &SchemaRef) -> Result<RecordBatch> {
		while !self.exhausted && self.builder.len() < self.batch_size {
			let row = self.builder.len();

			match self.cursor.advance() {
				Ok(true) => {}
				Ok(false) => {
					self.exhausted = true;
					break;
				}
				Err(err) => return Err(scan_error(err, row, schema)),
			}

			if let Err(err) = self.cursor.scan(&mut self.destinations) {
				return Err(scan_error(err, row, schema));
			}
			self.builder.append(&self.destinations)?;
		}

		self.builder.finish()
	}
}

impl<C: Cursor> Clone for BatchReader<C> {
	fn clone(&self) -> Self {
		self.retain()
	}
}

impl<C: Cursor> Debug for BatchReader<C> {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.debug_struct("BatchReader")
			.field("schema", &describe_schema(&self.shared.schema))
			.field("ref_count", &self.ref_count())
			.finish()
	}
}

impl<C: Cursor> Drop for Shared<C> {
	fn drop(&mut self) {
		let inner = self.inner.get_mut();
		inner.batch = None;
		inner.builder.reset();

		if let Err(err) = inner.cursor.close() {
			warn!(error = %err, "failed to close cursor");
		}
		debug!("batch reader closed");
	}
}

fn scan_error<E>(err: E, row: usize, schema: &SchemaRef) -> Error
where
	E: std::error::Error + Send + Sync + 'static,
{
	let diagnostic = diagnostic::reader::scan_failed(&err.to_string(), row, &describe_schema(schema));
	Error::Scan {
		diagnostic: Box::new(diagnostic),
		source: Arc::new(err),
	}
}

fn close_on_failure<C: Cursor>(mut cursor: C, err: Error) -> Error {
	warn!(error = %err, "batch reader construction failed");
	if let Err(close_err) = cursor.close() {
		warn!(error = %close_err, "failed to close cursor");
	}
	err
}
