// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_flight::ScanValue;

/// Owned cell value held by a [`MemoryCursor`](crate::MemoryCursor) row.
#[derive(Debug, Clone, PartialEq)]
pub enum Datum {
	Null,
	Int(i64),
	UInt(u64),
	Float(f64),
	Text(String),
	Bytes(Vec<u8>),
	Bool(bool),
	Date32(i32),
	Time32(i32),
	TimestampMicros(i64),
}

impl Datum {
	pub fn as_scan(&self) -> ScanValue<'_> {
		match self {
			Datum::Null => ScanValue::Null,
			Datum::Int(v) => ScanValue::Int(*v),
			Datum::UInt(v) => ScanValue::UInt(*v),
			Datum::Float(v) => ScanValue::Float(*v),
			Datum::Text(v) => ScanValue::Text(v),
			Datum::Bytes(v) => ScanValue::Bytes(v),
			Datum::Bool(v) => ScanValue::Bool(*v),
			Datum::Date32(v) => ScanValue::Date32(*v),
			Datum::Time32(v) => ScanValue::Time32(*v),
			Datum::TimestampMicros(v) => ScanValue::TimestampMicros(*v),
		}
	}
}

impl From<i64> for Datum {
	fn from(value: i64) -> Self {
		Datum::Int(value)
	}
}

impl From<i32> for Datum {
	fn from(value: i32) -> Self {
		Datum::Int(value as i64)
	}
}

impl From<f64> for Datum {
	fn from(value: f64) -> Self {
		Datum::Float(value)
	}
}

impl From<&str> for Datum {
	fn from(value: &str) -> Self {
		Datum::Text(value.to_string())
	}
}

impl From<bool> for Datum {
	fn from(value: bool) -> Self {
		Datum::Bool(value)
	}
}

impl From<Vec<u8>> for Datum {
	fn from(value: Vec<u8>) -> Self {
		Datum::Bytes(value)
	}
}

impl<T: Into<Datum>> From<Option<T>> for Datum {
	fn from(value: Option<T>) -> Self {
		value.map(Into::into).unwrap_or(Datum::Null)
	}
}
