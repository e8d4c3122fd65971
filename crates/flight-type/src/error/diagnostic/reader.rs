// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

/// `schema` is the human readable description of the batch schema; clients
/// use it to line the failure up with the columns they asked for.
pub fn scan_failed(message: &str, row: usize, schema: &str) -> Diagnostic {
	Diagnostic {
		code: "SCAN_001".to_string(),
		message: message.to_string(),
		label: Some(format!("while scanning row {} of the current batch", row)),
		help: None,
		notes: vec![format!("batch schema: {}", schema)],
	}
}

pub fn column_metadata_unavailable(message: &str) -> Diagnostic {
	Diagnostic {
		code: "CURSOR_001".to_string(),
		message: format!("failed to read column metadata: {}", message),
		label: None,
		help: None,
		notes: vec!["the cursor was closed before the error was returned".to_string()],
	}
}

pub fn invalid_config(message: &str) -> Diagnostic {
	Diagnostic {
		code: "CONFIG_001".to_string(),
		message: format!("invalid reader configuration: {}", message),
		label: None,
		help: None,
		notes: vec![],
	}
}

pub fn batch_assembly(message: &str) -> Diagnostic {
	Diagnostic {
		code: "BATCH_001".to_string(),
		message: format!("failed to assemble batch: {}", message),
		label: None,
		help: None,
		notes: vec![],
	}
}

pub fn internal(message: &str) -> Diagnostic {
	Diagnostic {
		code: "INTERNAL_001".to_string(),
		message: message.to_string(),
		label: None,
		help: Some("this is a bug in the batch reader".to_string()),
		notes: vec![],
	}
}
