// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{
	Arc,
	atomic::{AtomicBool, AtomicUsize, Ordering},
};

use reifydb_flight::{AssignError, ColumnMeta, Cursor, RowDestination};
use tracing::trace;

use crate::Datum;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MemoryCursorError {
	#[error("cursor is closed")]
	Closed,

	#[error("{0}")]
	Injected(String),

	#[error(transparent)]
	Assign(#[from] AssignError),
}

/// Counts how often a cursor has been closed. Clones share the count.
#[derive(Debug, Clone, Default)]
pub struct CloseCounter(Arc<AtomicUsize>);

impl CloseCounter {
	pub fn count(&self) -> usize {
		self.0.load(Ordering::SeqCst)
	}
}

/// Cancels a running cursor from outside the reader. Once cancelled every
/// `advance` and `scan` fails with [`MemoryCursorError::Closed`].
#[derive(Debug, Clone, Default)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
	pub fn cancel(&self) {
		self.0.store(true, Ordering::SeqCst);
	}

	pub fn is_cancelled(&self) -> bool {
		self.0.load(Ordering::SeqCst)
	}
}

/// Cursor over rows held in memory.
#[derive(Debug)]
pub struct MemoryCursor {
	columns: Vec<ColumnMeta>,
	rows: Vec<Vec<Datum>>,
	position: usize,
	current: Option<usize>,
	fail_columns: Option<String>,
	fail_scan_at: Option<usize>,
	advanced: Arc<AtomicUsize>,
	closed: CloseCounter,
	cancel: CancelHandle,
}

impl MemoryCursor {
	pub fn new(columns: Vec<ColumnMeta>) -> Self {
		Self {
			columns,
			rows: Vec::new(),
			position: 0,
			current: None,
			fail_columns: None,
			fail_scan_at: None,
			advanced: Arc::new(AtomicUsize::new(0)),
			closed: CloseCounter::default(),
			cancel: CancelHandle::default(),
		}
	}

	pub fn row<I, D>(mut self, values: I) -> Self
	where
		I: IntoIterator<Item = D>,
		D: Into<Datum>,
	{
		self.rows.push(values.into_iter().map(Into::into).collect());
		self
	}

	pub fn rows<R, I, D>(mut self, rows: R) -> Self
	where
		R: IntoIterator<Item = I>,
		I: IntoIterator<Item = D>,
		D: Into<Datum>,
	{
		for values in rows {
			self = self.row(values);
		}
		self
	}

	/// Makes `columns` fail with `message`.
	pub fn fail_columns(mut self, message: impl Into<String>) -> Self {
		self.fail_columns = Some(message.into());
		self
	}

	/// Makes the scan of the zero based row `row` fail.
	pub fn fail_scan_at(mut self, row: usize) -> Self {
		self.fail_scan_at = Some(row);
		self
	}

	pub fn close_counter(&self) -> CloseCounter {
		self.closed.clone()
	}

	pub fn cancel_handle(&self) -> CancelHandle {
		self.cancel.clone()
	}

	/// Shared count of `advance` calls.
	pub fn advance_counter(&self) -> Arc<AtomicUsize> {
		self.advanced.clone()
	}
}

impl Cursor for MemoryCursor {
	type Error = MemoryCursorError;

	fn columns(&mut self) -> Result<Vec<ColumnMeta>, Self::Error> {
		match &self.fail_columns {
			Some(message) => Err(MemoryCursorError::Injected(message.clone())),
			None => Ok(self.columns.clone()),
		}
	}

	fn advance(&mut self) -> Result<bool, Self::Error> {
		self.advanced.fetch_add(1, Ordering::SeqCst);
		if self.cancel.is_cancelled() {
			return Err(MemoryCursorError::Closed);
		}

		if self.position < self.rows.len() {
			self.current = Some(self.position);
			self.position += 1;
			Ok(true)
		} else {
			self.current = None;
			Ok(false)
		}
	}

	fn scan(&mut self, destinations: &mut [RowDestination]) -> Result<(), Self::Error> {
		if self.cancel.is_cancelled() {
			return Err(MemoryCursorError::Closed);
		}

		let idx = self.current.ok_or_else(|| MemoryCursorError::Injected("no current row".to_string()))?;
		if self.fail_scan_at == Some(idx) {
			return Err(MemoryCursorError::Injected(format!("scan failed at row {}", idx)));
		}

		let row = &self.rows[idx];
		if row.len() != destinations.len() {
			return Err(MemoryCursorError::Injected(format!(
				"row {} has {} values for {} destinations",
				idx,
				row.len(),
				destinations.len()
			)));
		}

		for (destination, value) in destinations.iter_mut().zip(row) {
			destination.assign(value.as_scan())?;
		}
		Ok(())
	}

	fn close(&mut self) -> Result<(), Self::Error> {
		let previous = self.closed.0.fetch_add(1, Ordering::SeqCst);
		trace!(previous, "memory cursor closed");
		Ok(())
	}
}
