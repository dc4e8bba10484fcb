// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ops::{Deref, Index};

use crate::value::column::Column;

/// A batch of rows in columnar layout.
///
/// The optional selection lists the active rows in ascending order; every
/// operation on a batch only considers active rows.
#[derive(Debug, Clone, PartialEq)]
pub struct Columns {
	pub columns: Vec<Column>,
	row_count: usize,
	selection: Option<Vec<usize>>,
}

impl Deref for Columns {
	type Target = [Column];

	fn deref(&self) -> &Self::Target {
		&self.columns
	}
}

impl Index<usize> for Columns {
	type Output = Column;

	fn index(&self, index: usize) -> &Self::Output {
		&self.columns[index]
	}
}

impl Columns {
	pub fn new(columns: Vec<Column>) -> Self {
		let n = columns.first().map_or(0, |c| c.data().len());
		assert!(columns.iter().all(|c| c.data().len() == n));

		Self {
			columns,
			row_count: n,
			selection: None,
		}
	}

	/// A batch without columns that still carries a cardinality, e.g. the input of `count(*)`.
	pub fn empty(row_count: usize) -> Self {
		Self {
			columns: vec![],
			row_count,
			selection: None,
		}
	}

	pub fn with_selection(mut self, selection: Vec<usize>) -> Self {
		assert!(selection.windows(2).all(|w| w[0] < w[1]), "selection must be strictly ascending");
		assert!(selection.last().is_none_or(|&last| last < self.row_count), "selection out of range");
		self.selection = Some(selection);
		self
	}

	pub fn row_count(&self) -> usize {
		self.row_count
	}

	pub fn selection(&self) -> Option<&[usize]> {
		self.selection.as_deref()
	}

	pub fn active_count(&self) -> usize {
		match &self.selection {
			Some(selection) => selection.len(),
			None => self.row_count,
		}
	}

	pub fn active_rows(&self) -> Vec<usize> {
		match &self.selection {
			Some(selection) => selection.clone(),
			None => (0..self.row_count).collect(),
		}
	}

	/// Dense copy of the active rows: every column flat, no selection.
	pub fn materialize(&self) -> Columns {
		let rows = self.active_rows();
		Columns {
			columns: self.columns.iter().map(|c| Column::new(c.name.clone(), c.data.take(&rows))).collect(),
			row_count: rows.len(),
			selection: None,
		}
	}
}

#[cfg(test)]
mod tests {
	use reifydb_type::Value;

	use crate::value::column::{Column, ColumnData, Columns};

	#[test]
	fn test_materialize_applies_selection() {
		let columns = Columns::new(vec![
			Column::new("a", ColumnData::int8([1, 2, 3, 4])),
			Column::new("b", ColumnData::constant(Value::from("x"), 4)),
		])
		.with_selection(vec![1, 3]);

		let dense = columns.materialize();
		assert_eq!(dense.row_count(), 2);
		assert!(dense.selection().is_none());
		assert_eq!(dense[0].data, ColumnData::int8([2, 4]));
		assert_eq!(dense[1].data, ColumnData::utf8(["x", "x"]));
	}

	#[test]
	fn test_active_rows_without_selection() {
		let columns = Columns::new(vec![Column::new("a", ColumnData::int4([1, 2, 3]))]);
		assert_eq!(columns.active_rows(), vec![0, 1, 2]);
		assert_eq!(columns.active_count(), 3);
	}

	#[test]
	#[should_panic]
	fn test_selection_out_of_range() {
		let _ = Columns::new(vec![Column::new("a", ColumnData::int4([1]))]).with_selection(vec![1]);
	}
}
