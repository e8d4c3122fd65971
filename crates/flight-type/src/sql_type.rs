// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt,
	fmt::{Display, Formatter},
};

/// SQL type advertised to Flight SQL clients in the column metadata.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SqlType {
	TinyInt,
	SmallInt,
	Integer,
	BigInt,
	Float,
	Double,
	Blob,
	Varchar,
	Date,
	Time,
	Timestamp,
	Boolean,
}

impl SqlType {
	/// Normalizes a declared type name. Empty and unknown names have no SQL
	/// type; the reader rejects the latter separately.
	pub fn from_type_name(declared: &str) -> Option<Self> {
		let name = declared.to_ascii_lowercase();
		if name.starts_with("varchar") {
			return Some(SqlType::Varchar);
		}

		Some(match name.as_str() {
			"tinyint" => SqlType::TinyInt,
			"smallint" => SqlType::SmallInt,
			"integer" | "int" | "int32" => SqlType::Integer,
			"bigint" | "int64" => SqlType::BigInt,
			"float" => SqlType::Float,
			"double" => SqlType::Double,
			"blob" => SqlType::Blob,
			"text" | "string" => SqlType::Varchar,
			"date" => SqlType::Date,
			"time" => SqlType::Time,
			"timestamp" => SqlType::Timestamp,
			"boolean" => SqlType::Boolean,
			_ => return None,
		})
	}

	pub const fn name(self) -> &'static str {
		match self {
			SqlType::TinyInt => "TINYINT",
			SqlType::SmallInt => "SMALLINT",
			SqlType::Integer => "INTEGER",
			SqlType::BigInt => "BIGINT",
			SqlType::Float => "FLOAT",
			SqlType::Double => "DOUBLE",
			SqlType::Blob => "BLOB",
			SqlType::Varchar => "VARCHAR",
			SqlType::Date => "DATE",
			SqlType::Time => "TIME",
			SqlType::Timestamp => "TIMESTAMP",
			SqlType::Boolean => "BOOLEAN",
		}
	}
}

impl Display for SqlType {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		f.write_str(self.name())
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn test_normalizes_names() {
		assert_eq!(SqlType::from_type_name("INT"), Some(SqlType::Integer));
		assert_eq!(SqlType::from_type_name("Text"), Some(SqlType::Varchar));
		assert_eq!(SqlType::from_type_name("varchar(20)"), Some(SqlType::Varchar));
		assert_eq!(SqlType::from_type_name("int64"), Some(SqlType::BigInt));
	}

	#[test]
	fn test_unknown_names_have_no_type() {
		assert_eq!(SqlType::from_type_name(""), None);
		assert_eq!(SqlType::from_type_name("hugeint"), None);
	}
}
