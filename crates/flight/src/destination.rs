// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Reusable per-field scan targets.
//!
//! The shape of every destination is fixed when the schema is resolved:
//! non-nullable fields get a raw [`Slot`], nullable fields a slot behind a
//! validity flag, binary fields an optional byte buffer and union fields a
//! capture slot. A cursor writes one row at a time into them through
//! [`RowDestination::assign`]; buffers are reused across rows.

use reifydb_flight_type::{ColumnKind, MappedType, UnionValue};

/// A single value produced by a cursor for the current row.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScanValue<'a> {
	Null,
	Int(i64),
	UInt(u64),
	Float(f64),
	Text(&'a str),
	Bytes(&'a [u8]),
	Bool(bool),
	/// Days since the unix epoch
	Date32(i32),
	/// Seconds since midnight
	Time32(i32),
	/// Microseconds since the unix epoch
	TimestampMicros(i64),
}

impl ScanValue<'_> {
	pub fn type_name(&self) -> &'static str {
		match self {
			ScanValue::Null => "NULL",
			ScanValue::Int(_) => "int",
			ScanValue::UInt(_) => "uint",
			ScanValue::Float(_) => "float",
			ScanValue::Text(_) => "text",
			ScanValue::Bytes(_) => "bytes",
			ScanValue::Bool(_) => "bool",
			ScanValue::Date32(_) => "date",
			ScanValue::Time32(_) => "time",
			ScanValue::TimestampMicros(_) => "timestamp",
		}
	}
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum AssignError {
	#[error("converting NULL to {target} is unsupported")]
	NullIntoNonNullable {
		target: &'static str,
	},

	#[error("value {value} out of range for {target}")]
	OutOfRange {
		value: String,
		target: &'static str,
	},

	#[error("invalid utf8 bytes for {target}")]
	InvalidUtf8 {
		target: &'static str,
	},

	#[error("cannot scan {value_type} into {target}")]
	Mismatch {
		value_type: &'static str,
		target: &'static str,
	},
}

/// Typed value holder behind a raw or nullable destination. Float32 and
/// float64 columns share [`Slot::Float`]; the builder narrows on append.
#[derive(Debug, Clone, PartialEq)]
pub enum Slot {
	Int8(i8),
	Int16(i16),
	Int32(i32),
	Int64(i64),
	Float(f64),
	Utf8(String),
	Boolean(bool),
	Date32(i32),
	Time32(i32),
	Timestamp(i64),
}

impl Slot {
	pub fn name(&self) -> &'static str {
		match self {
			Slot::Int8(_) => "int8",
			Slot::Int16(_) => "int16",
			Slot::Int32(_) => "int32",
			Slot::Int64(_) => "int64",
			Slot::Float(_) => "float",
			Slot::Utf8(_) => "utf8",
			Slot::Boolean(_) => "boolean",
			Slot::Date32(_) => "date32",
			Slot::Time32(_) => "time32",
			Slot::Timestamp(_) => "timestamp",
		}
	}

	fn store(&mut self, value: ScanValue<'_>) -> Result<(), AssignError> {
		let target = self.name();
		match self {
			Slot::Int8(slot) => *slot = integer(value, target)?,
			Slot::Int16(slot) => *slot = integer(value, target)?,
			Slot::Int32(slot) => *slot = integer(value, target)?,
			Slot::Int64(slot) => *slot = integer(value, target)?,
			Slot::Float(slot) => {
				*slot = match value {
					ScanValue::Float(v) => v,
					ScanValue::Int(v) => v as f64,
					ScanValue::UInt(v) => v as f64,
					other => return Err(mismatch(other, target)),
				}
			}
			Slot::Utf8(slot) => match value {
				ScanValue::Text(v) => {
					slot.clear();
					slot.push_str(v);
				}
				ScanValue::Bytes(v) => {
					let v = std::str::from_utf8(v).map_err(|_| AssignError::InvalidUtf8 {
						target,
					})?;
					slot.clear();
					slot.push_str(v);
				}
				other => return Err(mismatch(other, target)),
			},
			Slot::Boolean(slot) => match value {
				ScanValue::Bool(v) => *slot = v,
				other => return Err(mismatch(other, target)),
			},
			Slot::Date32(slot) => match value {
				ScanValue::Date32(v) => *slot = v,
				other => return Err(mismatch(other, target)),
			},
			Slot::Time32(slot) => match value {
				ScanValue::Time32(v) => *slot = v,
				other => return Err(mismatch(other, target)),
			},
			Slot::Timestamp(slot) => match value {
				ScanValue::TimestampMicros(v) => *slot = v,
				other => return Err(mismatch(other, target)),
			},
		}
		Ok(())
	}
}

#[derive(Debug, Clone, PartialEq)]
pub enum RowDestination {
	/// Raw slot of a non-nullable field
	Value(Slot),
	/// Slot of a nullable field; `slot` is meaningful only while `valid`
	Nullable {
		valid: bool,
		slot: Slot,
	},
	/// Binary field; `None` is NULL, `Some(vec![])` an empty value
	Binary(Option<Vec<u8>>),
	/// Capture slot of a union field; `None` is NULL
	Any(Option<UnionValue>),
	/// Field of the null type
	Null,
}

impl RowDestination {
	pub fn for_field(field: MappedType) -> Self {
		let slot = match field.kind {
			ColumnKind::Union => return RowDestination::Any(None),
			ColumnKind::Binary => return RowDestination::Binary(None),
			ColumnKind::Null => return RowDestination::Null,
			ColumnKind::Int8 => Slot::Int8(0),
			ColumnKind::Int16 => Slot::Int16(0),
			ColumnKind::Int32 => Slot::Int32(0),
			ColumnKind::Int64 => Slot::Int64(0),
			ColumnKind::Float32 | ColumnKind::Float64 => Slot::Float(0.0),
			ColumnKind::Utf8 => Slot::Utf8(String::new()),
			ColumnKind::Boolean => Slot::Boolean(false),
			ColumnKind::Date32 => Slot::Date32(0),
			ColumnKind::Time32 => Slot::Time32(0),
			ColumnKind::Timestamp => Slot::Timestamp(0),
		};

		if field.nullable {
			RowDestination::Nullable {
				valid: false,
				slot,
			}
		} else {
			RowDestination::Value(slot)
		}
	}

	/// Stores `value` as the current row's value for this field.
	pub fn assign(&mut self, value: ScanValue<'_>) -> Result<(), AssignError> {
		match self {
			RowDestination::Value(slot) => match value {
				ScanValue::Null => Err(AssignError::NullIntoNonNullable {
					target: slot.name(),
				}),
				value => slot.store(value),
			},
			RowDestination::Nullable {
				valid,
				slot,
			} => {
				if value == ScanValue::Null {
					*valid = false;
					return Ok(());
				}
				slot.store(value)?;
				*valid = true;
				Ok(())
			}
			RowDestination::Binary(bytes) => {
				let value = match value {
					ScanValue::Null => {
						*bytes = None;
						return Ok(());
					}
					ScanValue::Bytes(v) => v,
					ScanValue::Text(v) => v.as_bytes(),
					other => return Err(mismatch(other, "binary")),
				};
				match bytes {
					Some(buffer) => {
						buffer.clear();
						buffer.extend_from_slice(value);
					}
					None => *bytes = Some(value.to_vec()),
				}
				Ok(())
			}
			RowDestination::Any(capture) => {
				*capture = match value {
					ScanValue::Null => None,
					ScanValue::Int(v) => Some(UnionValue::Int(v)),
					ScanValue::UInt(v) => Some(UnionValue::Int(integer(ScanValue::UInt(v), "union")?)),
					ScanValue::Float(v) => Some(UnionValue::Float(v)),
					ScanValue::Text(v) => Some(UnionValue::Text(v.to_string())),
					other => return Err(mismatch(other, "union")),
				};
				Ok(())
			}
			RowDestination::Null => match value {
				ScanValue::Null => Ok(()),
				other => Err(mismatch(other, "null")),
			},
		}
	}
}

/// One destination per field, in field order.
pub fn allocate(layout: &[MappedType]) -> Vec<RowDestination> {
	layout.iter().copied().map(RowDestination::for_field).collect()
}

fn integer<T>(value: ScanValue<'_>, target: &'static str) -> Result<T, AssignError>
where
	T: TryFrom<i64> + TryFrom<u64>,
{
	match value {
		ScanValue::Int(v) => T::try_from(v).map_err(|_| out_of_range(v, target)),
		ScanValue::UInt(v) => T::try_from(v).map_err(|_| out_of_range(v, target)),
		other => Err(mismatch(other, target)),
	}
}

fn out_of_range(value: impl ToString, target: &'static str) -> AssignError {
	AssignError::OutOfRange {
		value: value.to_string(),
		target,
	}
}

fn mismatch(value: ScanValue<'_>, target: &'static str) -> AssignError {
	AssignError::Mismatch {
		value_type: value.type_name(),
		target,
	}
}
