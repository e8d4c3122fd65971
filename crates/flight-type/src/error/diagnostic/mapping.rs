// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use arrow_schema::DataType;

use crate::{NativeKind, error::diagnostic::Diagnostic};

pub fn unsupported_type(declared: &str) -> Diagnostic {
	Diagnostic {
		code: "TYPE_001".to_string(),
		message: format!("unsupported type: {}", declared),
		label: Some("this declared column type has no columnar mapping".to_string()),
		help: Some("cast the column to one of the supported types in the query".to_string()),
		notes: vec![
			"supported types: tinyint, smallint, integer, bigint, float, double, blob, text, varchar, date, time, timestamp, boolean"
				.to_string(),
		],
	}
}

pub fn unsupported_native_kind(kind: NativeKind) -> Diagnostic {
	Diagnostic {
		code: "TYPE_002".to_string(),
		message: format!("unsupported native kind: {}", kind),
		label: Some("the column declares no type and its scan kind cannot be mapped".to_string()),
		help: Some("declare an explicit type for the column in the query".to_string()),
		notes: vec![],
	}
}

pub fn unsupported_arrow_type(field: &str, data_type: &DataType) -> Diagnostic {
	Diagnostic {
		code: "TYPE_003".to_string(),
		message: format!("unsupported arrow type {} for field '{}'", data_type, field),
		label: None,
		help: Some("use a schema whose fields are limited to the canonical column types".to_string()),
		notes: vec![],
	}
}
