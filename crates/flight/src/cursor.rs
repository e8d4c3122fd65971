// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_flight_type::NativeKind;

use crate::RowDestination;

/// Column description reported by a cursor before the first row is read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnMeta {
	pub name: String,
	/// Type name as declared by the source; empty when the source cannot
	/// tell yet.
	pub declared_type: String,
	pub nullable: bool,
	pub native: Option<NativeKind>,
	/// Free-form table label forwarded to the column metadata.
	pub table: Option<String>,
}

impl ColumnMeta {
	pub fn new(name: impl Into<String>, declared_type: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			declared_type: declared_type.into(),
			nullable: false,
			native: None,
			table: None,
		}
	}

	pub fn nullable(mut self, nullable: bool) -> Self {
		self.nullable = nullable;
		self
	}

	pub fn native(mut self, native: NativeKind) -> Self {
		self.native = Some(native);
		self
	}

	pub fn table(mut self, table: impl Into<String>) -> Self {
		self.table = Some(table.into());
		self
	}
}

/// A blocking, row-at-a-time source of query results.
///
/// The reader calls [`Cursor::columns`] once during construction, then
/// alternates [`Cursor::advance`] and [`Cursor::scan`] until `advance`
/// returns `false` or either call fails. [`Cursor::close`] is called exactly
/// once, when the last reader handle is released or when construction fails.
pub trait Cursor {
	type Error: std::error::Error + Send + Sync + 'static;

	fn columns(&mut self) -> Result<Vec<ColumnMeta>, Self::Error>;

	/// Moves to the next row. `Ok(false)` means the cursor is exhausted.
	fn advance(&mut self) -> Result<bool, Self::Error>;

	/// Writes the current row into `destinations`, one per column, in
	/// column order. Use [`RowDestination::assign`] to populate each slot.
	fn scan(&mut self, destinations: &mut [RowDestination]) -> Result<(), Self::Error>;

	fn close(&mut self) -> Result<(), Self::Error>;
}
