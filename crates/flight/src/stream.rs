// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use arrow_array::{RecordBatch, RecordBatchReader};
use arrow_schema::{ArrowError, SchemaRef};
use reifydb_flight_type::{Error, Result};

use crate::{BatchReader, Cursor, ReaderState};

/// Iterator over the batches of a [`BatchReader`].
///
/// Yields every non-empty batch, then the reader's error once if a scan
/// failed. The stream holds its own handle, so the reader stays open until
/// the stream and every other handle are dropped.
pub struct BatchStream<C: Cursor> {
	reader: BatchReader<C>,
	done: bool,
}

impl<C: Cursor> BatchStream<C> {
	pub fn new(reader: BatchReader<C>) -> Self {
		Self {
			reader,
			done: false,
		}
	}

	pub fn schema(&self) -> SchemaRef {
		self.reader.schema()
	}

	/// Adapts the stream to Arrow's [`RecordBatchReader`].
	pub fn into_arrow(self) -> ArrowBatchStream<C> {
		ArrowBatchStream {
			inner: self,
		}
	}
}

impl<C: Cursor> Iterator for BatchStream<C> {
	type Item = Result<RecordBatch>;

	fn next(&mut self) -> Option<Self::Item> {
		if self.done {
			return None;
		}

		if self.reader.next() {
			if let Some(batch) = self.reader.batch() {
				return Some(Ok(batch));
			}
		}

		self.done = true;
		if self.reader.state() == ReaderState::Errored {
			let err = self.reader.error().unwrap_or_else(|| Error::internal("reader errored without an error"));
			return Some(Err(err));
		}
		None
	}
}

/// [`BatchStream`] as an Arrow [`RecordBatchReader`]. Reader errors are
/// surfaced as [`ArrowError::ExternalError`].
pub struct ArrowBatchStream<C: Cursor> {
	inner: BatchStream<C>,
}

impl<C: Cursor> Iterator for ArrowBatchStream<C> {
	type Item = std::result::Result<RecordBatch, ArrowError>;

	fn next(&mut self) -> Option<Self::Item> {
		self.inner.next().map(|item| item.map_err(into_arrow_error))
	}
}

impl<C: Cursor> RecordBatchReader for ArrowBatchStream<C> {
	fn schema(&self) -> SchemaRef {
		self.inner.schema()
	}
}

fn into_arrow_error(err: Error) -> ArrowError {
	ArrowError::ExternalError(Box::new(err))
}
