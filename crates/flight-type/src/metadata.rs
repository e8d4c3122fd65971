// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Flight SQL column metadata.
//!
//! The reader attaches these keys to every field so the protocol layer can
//! advertise column types without looking at the data.

use std::collections::HashMap;

pub const TABLE_NAME: &str = "ARROW:FLIGHT:SQL:TABLE_NAME";
pub const TYPE_NAME: &str = "ARROW:FLIGHT:SQL:TYPE_NAME";
pub const SCALE: &str = "ARROW:FLIGHT:SQL:SCALE";
pub const IS_AUTO_INCREMENT: &str = "ARROW:FLIGHT:SQL:IS_AUTO_INCREMENT";
pub const IS_READ_ONLY: &str = "ARROW:FLIGHT:SQL:IS_READ_ONLY";

#[derive(Debug, Clone, Default)]
pub struct ColumnMetadataBuilder {
	entries: HashMap<String, String>,
}

impl ColumnMetadataBuilder {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn table_name(self, name: impl Into<String>) -> Self {
		self.with(TABLE_NAME, name.into())
	}

	pub fn type_name(self, name: impl Into<String>) -> Self {
		self.with(TYPE_NAME, name.into())
	}

	pub fn scale(self, scale: i32) -> Self {
		self.with(SCALE, scale.to_string())
	}

	pub fn auto_increment(self, value: bool) -> Self {
		self.with(IS_AUTO_INCREMENT, flag(value))
	}

	pub fn read_only(self, value: bool) -> Self {
		self.with(IS_READ_ONLY, flag(value))
	}

	pub fn build(self) -> HashMap<String, String> {
		self.entries
	}

	fn with(mut self, key: &str, value: String) -> Self {
		self.entries.insert(key.to_string(), value);
		self
	}
}

fn flag(value: bool) -> String {
	if value { "1" } else { "0" }.to_string()
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_builds_flight_sql_keys() {
		let metadata = ColumnMetadataBuilder::new()
			.type_name("INTEGER")
			.table_name("users")
			.scale(15)
			.read_only(false)
			.auto_increment(true)
			.build();

		assert_eq!(metadata.get(TYPE_NAME).map(String::as_str), Some("INTEGER"));
		assert_eq!(metadata.get(TABLE_NAME).map(String::as_str), Some("users"));
		assert_eq!(metadata.get(SCALE).map(String::as_str), Some("15"));
		assert_eq!(metadata.get(IS_READ_ONLY).map(String::as_str), Some("0"));
		assert_eq!(metadata.get(IS_AUTO_INCREMENT).map(String::as_str), Some("1"));
		assert_eq!(metadata.len(), 5);
	}
}
