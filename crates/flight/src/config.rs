// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_flight_type::{Error, Result};
use serde::{Deserialize, Serialize};

/// Upper bound on the number of rows in a single batch.
pub const MAX_BATCH_SIZE: usize = 1024;

/// Configuration for a [`BatchReader`](crate::BatchReader)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
	/// Maximum rows per emitted batch, at most [`MAX_BATCH_SIZE`]
	pub batch_size: usize,
	/// Initial byte capacity of utf8 column builders
	pub string_capacity: usize,
	/// Initial byte capacity of binary column builders
	pub binary_capacity: usize,
}

impl Default for ReaderConfig {
	fn default() -> Self {
		Self {
			batch_size: MAX_BATCH_SIZE,
			string_capacity: 8 * 1024,
			binary_capacity: 8 * 1024,
		}
	}
}

impl ReaderConfig {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn batch_size(mut self, batch_size: usize) -> Self {
		self.batch_size = batch_size;
		self
	}

	pub fn string_capacity(mut self, capacity: usize) -> Self {
		self.string_capacity = capacity;
		self
	}

	pub fn binary_capacity(mut self, capacity: usize) -> Self {
		self.binary_capacity = capacity;
		self
	}

	pub fn validate(&self) -> Result<()> {
		if self.batch_size == 0 {
			return Err(Error::config("batch_size must be greater than zero"));
		}
		if self.batch_size > MAX_BATCH_SIZE {
			return Err(Error::config(format!(
				"batch_size {} exceeds the maximum of {}",
				self.batch_size, MAX_BATCH_SIZE
			)));
		}
		Ok(())
	}
}
