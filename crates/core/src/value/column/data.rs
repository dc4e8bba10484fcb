// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::{Type, Value, error::diagnostic::internal::internal, return_error};

use crate::value::column::container::Container;

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
	Bool(Container<bool>),
	Int4(Container<i32>),
	Int8(Container<i64>),
	Float8(Container<f64>),
	Utf8(Container<String>),
	Undefined(usize),
	/// A single value repeated for every row; never handed out across the extension boundary
	Constant {
		value: Value,
		len: usize,
	},
}

impl ColumnData {
	pub fn bool(data: impl IntoIterator<Item = bool>) -> Self {
		ColumnData::Bool(Container::from_vec(data.into_iter().collect()))
	}

	pub fn int4(data: impl IntoIterator<Item = i32>) -> Self {
		ColumnData::Int4(Container::from_vec(data.into_iter().collect()))
	}

	pub fn int8(data: impl IntoIterator<Item = i64>) -> Self {
		ColumnData::Int8(Container::from_vec(data.into_iter().collect()))
	}

	pub fn float8(data: impl IntoIterator<Item = f64>) -> Self {
		ColumnData::Float8(Container::from_vec(data.into_iter().collect()))
	}

	pub fn utf8<S: Into<String>>(data: impl IntoIterator<Item = S>) -> Self {
		ColumnData::Utf8(Container::from_vec(data.into_iter().map(Into::into).collect()))
	}

	pub fn constant(value: Value, len: usize) -> Self {
		ColumnData::Constant {
			value,
			len,
		}
	}

	pub fn undefined(len: usize) -> Self {
		ColumnData::Undefined(len)
	}

	pub fn with_capacity(ty: Type, capacity: usize) -> Self {
		match ty {
			Type::Boolean => ColumnData::Bool(Container::with_capacity(capacity)),
			Type::Int4 => ColumnData::Int4(Container::with_capacity(capacity)),
			Type::Int8 => ColumnData::Int8(Container::with_capacity(capacity)),
			Type::Float8 => ColumnData::Float8(Container::with_capacity(capacity)),
			Type::Utf8 => ColumnData::Utf8(Container::with_capacity(capacity)),
			Type::Any | Type::Undefined => ColumnData::Undefined(0),
		}
	}

	/// A typed column of `len` rows where no row is defined yet.
	pub fn undefined_typed(ty: Type, len: usize) -> Self {
		match ty {
			Type::Boolean => ColumnData::Bool(Container::undefined(len)),
			Type::Int4 => ColumnData::Int4(Container::undefined(len)),
			Type::Int8 => ColumnData::Int8(Container::undefined(len)),
			Type::Float8 => ColumnData::Float8(Container::undefined(len)),
			Type::Utf8 => ColumnData::Utf8(Container::undefined(len)),
			Type::Any | Type::Undefined => ColumnData::Undefined(len),
		}
	}

	pub fn len(&self) -> usize {
		match self {
			ColumnData::Bool(c) => c.len(),
			ColumnData::Int4(c) => c.len(),
			ColumnData::Int8(c) => c.len(),
			ColumnData::Float8(c) => c.len(),
			ColumnData::Utf8(c) => c.len(),
			ColumnData::Undefined(len) => *len,
			ColumnData::Constant {
				len,
				..
			} => *len,
		}
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub fn get_type(&self) -> Type {
		match self {
			ColumnData::Bool(_) => Type::Boolean,
			ColumnData::Int4(_) => Type::Int4,
			ColumnData::Int8(_) => Type::Int8,
			ColumnData::Float8(_) => Type::Float8,
			ColumnData::Utf8(_) => Type::Utf8,
			ColumnData::Undefined(_) => Type::Undefined,
			ColumnData::Constant {
				value,
				..
			} => value.get_type(),
		}
	}

	pub fn is_constant(&self) -> bool {
		matches!(self, ColumnData::Constant { .. })
	}

	pub fn is_defined(&self, index: usize) -> bool {
		match self {
			ColumnData::Bool(c) => c.is_defined(index),
			ColumnData::Int4(c) => c.is_defined(index),
			ColumnData::Int8(c) => c.is_defined(index),
			ColumnData::Float8(c) => c.is_defined(index),
			ColumnData::Utf8(c) => c.is_defined(index),
			ColumnData::Undefined(_) => false,
			ColumnData::Constant {
				value,
				len,
			} => index < *len && value.is_defined(),
		}
	}

	pub fn get_value(&self, index: usize) -> Value {
		match self {
			ColumnData::Bool(c) => c.get(index).map_or(Value::Undefined, |v| Value::Boolean(*v)),
			ColumnData::Int4(c) => c.get(index).map_or(Value::Undefined, |v| Value::Int4(*v)),
			ColumnData::Int8(c) => c.get(index).map_or(Value::Undefined, |v| Value::Int8(*v)),
			ColumnData::Float8(c) => c.get(index).map_or(Value::Undefined, |v| Value::Float8(*v)),
			ColumnData::Utf8(c) => c.get(index).map_or(Value::Undefined, |v| Value::Utf8(v.clone())),
			ColumnData::Undefined(_) => Value::Undefined,
			ColumnData::Constant {
				value,
				len,
			} => {
				if index < *len {
					value.clone()
				} else {
					Value::Undefined
				}
			}
		}
	}

	pub fn push_value(&mut self, value: Value) {
		match (self, value) {
			(ColumnData::Bool(c), Value::Boolean(v)) => c.push(v),
			(ColumnData::Int4(c), Value::Int4(v)) => c.push(v),
			(ColumnData::Int8(c), Value::Int8(v)) => c.push(v),
			(ColumnData::Float8(c), Value::Float8(v)) => c.push(v),
			(ColumnData::Utf8(c), Value::Utf8(v)) => c.push(v),
			(ColumnData::Bool(c), _) => c.push_undefined(),
			(ColumnData::Int4(c), _) => c.push_undefined(),
			(ColumnData::Int8(c), _) => c.push_undefined(),
			(ColumnData::Float8(c), _) => c.push_undefined(),
			(ColumnData::Utf8(c), _) => c.push_undefined(),
			(ColumnData::Undefined(len), _) => *len += 1,
			(
				ColumnData::Constant {
					len,
					..
				},
				_,
			) => *len += 1,
		}
	}

	/// Overwrites row `index` of a flat column with `value`.
	pub fn set_value(&mut self, index: usize, value: Value) -> crate::Result<()> {
		let len = self.len();
		if index >= len {
			return_error!(internal(format!("row {} out of range for column of {} rows", index, len)));
		}

		let ok = match (self, value) {
			(ColumnData::Bool(c), Value::Boolean(v)) => c.set(index, v),
			(ColumnData::Int4(c), Value::Int4(v)) => c.set(index, v),
			(ColumnData::Int8(c), Value::Int8(v)) => c.set(index, v),
			(ColumnData::Float8(c), Value::Float8(v)) => c.set(index, v),
			(ColumnData::Utf8(c), Value::Utf8(v)) => c.set(index, v),
			(ColumnData::Bool(c), Value::Undefined) => c.set_undefined(index),
			(ColumnData::Int4(c), Value::Undefined) => c.set_undefined(index),
			(ColumnData::Int8(c), Value::Undefined) => c.set_undefined(index),
			(ColumnData::Float8(c), Value::Undefined) => c.set_undefined(index),
			(ColumnData::Utf8(c), Value::Undefined) => c.set_undefined(index),
			(ColumnData::Undefined(_), Value::Undefined) => true,
			(data, value) => {
				return_error!(internal(format!(
					"cannot store {} value into {} column",
					value.get_type(),
					data.get_type()
				)));
			}
		};

		debug_assert!(ok);
		Ok(())
	}

	/// Produces a flat column holding exactly the rows at `indexes`, in order.
	///
	/// Constant columns are expanded into the flat representation of their value type.
	pub fn take(&self, indexes: &[usize]) -> ColumnData {
		match self {
			ColumnData::Bool(c) => ColumnData::Bool(c.take(indexes)),
			ColumnData::Int4(c) => ColumnData::Int4(c.take(indexes)),
			ColumnData::Int8(c) => ColumnData::Int8(c.take(indexes)),
			ColumnData::Float8(c) => ColumnData::Float8(c.take(indexes)),
			ColumnData::Utf8(c) => ColumnData::Utf8(c.take(indexes)),
			ColumnData::Undefined(_) => ColumnData::Undefined(indexes.len()),
			ColumnData::Constant {
				value,
				len,
			} => {
				let mut result = ColumnData::with_capacity(value.get_type(), indexes.len());
				if let ColumnData::Undefined(n) = &mut result {
					*n = indexes.len();
					return result;
				}
				for &index in indexes {
					if index < *len {
						result.push_value(value.clone());
					} else {
						result.push_value(Value::Undefined);
					}
				}
				result
			}
		}
	}

	/// Flat copy of all rows.
	pub fn materialize(&self) -> ColumnData {
		match self {
			ColumnData::Constant {
				len,
				..
			} => {
				let indexes: Vec<usize> = (0..*len).collect();
				self.take(&indexes)
			}
			other => other.clone(),
		}
	}
}

#[cfg(test)]
mod tests {
	use reifydb_type::{Type, Value};

	use super::ColumnData;

	#[test]
	fn test_constant_take_expands_to_flat() {
		let data = ColumnData::constant(Value::Int8(7), 4);
		let taken = data.take(&[0, 2]);
		assert_eq!(taken, ColumnData::int8([7, 7]));
		assert!(!taken.is_constant());
	}

	#[test]
	fn test_undefined_constant_take() {
		let data = ColumnData::constant(Value::Undefined, 3);
		assert_eq!(data.take(&[1, 2]), ColumnData::Undefined(2));
	}

	#[test]
	fn test_take_preserves_undefined_rows() {
		let mut data = ColumnData::with_capacity(Type::Utf8, 3);
		data.push_value(Value::from("a"));
		data.push_value(Value::Undefined);
		data.push_value(Value::from("c"));

		let taken = data.take(&[2, 1]);
		assert_eq!(taken.get_value(0), Value::from("c"));
		assert_eq!(taken.get_value(1), Value::Undefined);
	}

	#[test]
	fn test_set_value() {
		let mut data = ColumnData::undefined_typed(Type::Int8, 3);
		data.set_value(1, Value::Int8(42)).unwrap();
		assert!(!data.is_defined(0));
		assert_eq!(data.get_value(1), Value::Int8(42));
	}

	#[test]
	fn test_set_value_rejects_type_mismatch() {
		let mut data = ColumnData::undefined_typed(Type::Int8, 1);
		let err = data.set_value(0, Value::from("x")).unwrap_err();
		assert_eq!(err.code(), "INTERNAL_ERROR");
	}

	#[test]
	fn test_set_value_rejects_out_of_range() {
		let mut data = ColumnData::undefined_typed(Type::Int8, 1);
		assert!(data.set_value(1, Value::Int8(1)).is_err());
	}
}
