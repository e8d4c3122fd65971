// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Streams the rows of a query cursor into Arrow record batches.
//!
//! A [`BatchReader`] owns a [`Cursor`] and pulls at most
//! [`ReaderConfig::batch_size`] rows per call to [`BatchReader::next`]. Each
//! row is scanned into per-field [`RowDestination`]s that are allocated once
//! when the schema is resolved, appended into typed column builders, and
//! finalized into an immutable [`RecordBatch`](arrow_array::RecordBatch).
//!
//! Reader handles are reference counted: [`BatchReader::retain`] hands out
//! another handle and the cursor is closed when the last one is released.

pub mod builder;
pub mod config;
pub mod cursor;
pub mod destination;
pub mod reader;
pub mod schema;
pub mod stream;

pub use builder::BatchBuilder;
pub use config::{MAX_BATCH_SIZE, ReaderConfig};
pub use cursor::{ColumnMeta, Cursor};
pub use destination::{AssignError, RowDestination, ScanValue, Slot, allocate};
pub use reader::{BatchReader, ReaderState};
pub use reifydb_flight_type::{ColumnKind, Diagnostic, Error, MappedType, NativeKind, Result, UnionTag, UnionValue};
pub use schema::{describe_schema, infer_schema, layout_from_schema};
pub use stream::{ArrowBatchStream, BatchStream};
