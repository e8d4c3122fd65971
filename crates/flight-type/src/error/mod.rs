// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{error::Error as StdError, sync::Arc};

use arrow_schema::{ArrowError, DataType};

pub mod diagnostic;

pub use diagnostic::{Diagnostic, IntoDiagnostic};

use crate::NativeKind;

/// Error raised by a cursor, shared so a recorded failure can be handed out
/// more than once.
pub type SourceError = Arc<dyn StdError + Send + Sync + 'static>;

#[derive(Debug, Clone, thiserror::Error)]
pub enum Error {
	#[error("unsupported type: {declared}")]
	UnsupportedType {
		declared: String,
	},

	#[error("unsupported native kind: {kind}")]
	UnsupportedNativeKind {
		kind: NativeKind,
	},

	#[error("unsupported arrow type {data_type} for field '{field}'")]
	UnsupportedArrowType {
		field: String,
		data_type: DataType,
	},

	#[error("failed to read column metadata: {source}")]
	Construction {
		#[source]
		source: SourceError,
	},

	#[error("{diagnostic}")]
	Scan {
		diagnostic: Box<Diagnostic>,
		#[source]
		source: SourceError,
	},

	#[error("invalid reader configuration: {message}")]
	Config {
		message: String,
	},

	#[error(transparent)]
	Arrow(Arc<ArrowError>),

	#[error("internal error: {message}")]
	Internal {
		message: String,
	},
}

impl Error {
	pub fn construction<E>(source: E) -> Self
	where
		E: StdError + Send + Sync + 'static,
	{
		Error::Construction {
			source: Arc::new(source),
		}
	}

	pub fn config(message: impl Into<String>) -> Self {
		Error::Config {
			message: message.into(),
		}
	}

	pub fn internal(message: impl Into<String>) -> Self {
		Error::Internal {
			message: message.into(),
		}
	}

	/// The diagnostic payload for this error. Scan errors return the
	/// diagnostic recorded when the failure happened.
	pub fn diagnostic(&self) -> Diagnostic {
		self.clone().into_diagnostic()
	}
}

impl IntoDiagnostic for Error {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			Error::UnsupportedType {
				declared,
			} => diagnostic::mapping::unsupported_type(&declared),
			Error::UnsupportedNativeKind {
				kind,
			} => diagnostic::mapping::unsupported_native_kind(kind),
			Error::UnsupportedArrowType {
				field,
				data_type,
			} => diagnostic::mapping::unsupported_arrow_type(&field, &data_type),
			Error::Construction {
				source,
			} => diagnostic::reader::column_metadata_unavailable(&source.to_string()),
			Error::Scan {
				diagnostic,
				..
			} => *diagnostic,
			Error::Config {
				message,
			} => diagnostic::reader::invalid_config(&message),
			Error::Arrow(err) => diagnostic::reader::batch_assembly(&err.to_string()),
			Error::Internal {
				message,
			} => diagnostic::reader::internal(&message),
		}
	}
}

impl From<ArrowError> for Error {
	fn from(err: ArrowError) -> Self {
		Error::Arrow(Arc::new(err))
	}
}

pub type Result<T> = std::result::Result<T, Error>;
