// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::borrow::Cow;

use reifydb_core::value::column::{ColumnData, Columns};
use reifydb_type::{Type, Value, error::diagnostic::internal::internal, return_error};

/// Argument expression of a function call
#[derive(Debug, Clone, PartialEq)]
pub enum Expression {
	Constant(Value),
	Column(ColumnExpression),
}

/// Reference to a column of the input batch by position
#[derive(Debug, Clone, PartialEq)]
pub struct ColumnExpression {
	pub index: usize,
	pub ty: Type,
}

impl Expression {
	pub fn constant(value: impl Into<Value>) -> Self {
		Self::Constant(value.into())
	}

	pub fn column(index: usize, ty: Type) -> Self {
		Self::Column(ColumnExpression {
			index,
			ty,
		})
	}

	pub fn get_type(&self) -> Type {
		match self {
			Expression::Constant(value) => value.get_type(),
			Expression::Column(column) => column.ty,
		}
	}

	/// True when the expression evaluates to the same value for every row
	pub fn is_foldable(&self) -> bool {
		matches!(self, Expression::Constant(_))
	}

	pub fn fold(&self) -> Option<&Value> {
		match self {
			Expression::Constant(value) => Some(value),
			Expression::Column(_) => None,
		}
	}

	pub fn evaluate<'a>(&'a self, columns: &'a Columns) -> reifydb_type::Result<Cow<'a, ColumnData>> {
		match self {
			Expression::Constant(value) => {
				Ok(Cow::Owned(ColumnData::constant(value.clone(), columns.row_count())))
			}
			Expression::Column(column) => match columns.get(column.index) {
				Some(c) => Ok(Cow::Borrowed(c.data())),
				None => return_error!(internal(format!(
					"column {} referenced, batch has {} columns",
					column.index,
					columns.len()
				))),
			},
		}
	}
}
