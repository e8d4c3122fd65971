// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Test support for the batch reader: an in-memory [`Cursor`] with hooks
//! for injected failures, cancellation and close accounting.
//!
//! [`Cursor`]: reifydb_flight::Cursor

pub mod cursor;
pub mod datum;

pub use cursor::{CancelHandle, CloseCounter, MemoryCursor, MemoryCursorError};
pub use datum::Datum;

/// Installs a fmt subscriber filtered by `RUST_LOG`. Safe to call from
/// every test; only the first call takes effect.
pub fn init_tracing() {
	let _ = tracing_subscriber::fmt()
		.with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
		.with_test_writer()
		.try_init();
}
