// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Type vocabulary shared by the Flight batch reader.
//!
//! Source columns arrive with a declared type name (and sometimes a native
//! scan kind). [`map_type`] resolves them onto the closed set of
//! [`ColumnKind`]s the reader knows how to build, once, at schema time.

pub mod error;
pub mod mapping;
pub mod metadata;
pub mod sql_type;
pub mod value;

pub use error::{Diagnostic, Error, Result};
pub use mapping::{MappedType, map_type};
pub use metadata::ColumnMetadataBuilder;
pub use sql_type::SqlType;
pub use value::{
	kind::{ColumnKind, union_fields},
	native::NativeKind,
	union::{UnionTag, UnionValue},
};
