// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

/// Flat storage of a column: one slot per row plus a defined flag per row.
#[derive(Debug, Clone, PartialEq)]
pub struct Container<T> {
	data: Vec<T>,
	defined: Vec<bool>,
}

impl<T: Clone + Default> Container<T> {
	pub fn new(data: Vec<T>, defined: Vec<bool>) -> Self {
		debug_assert_eq!(data.len(), defined.len());
		Self {
			data,
			defined,
		}
	}

	pub fn from_vec(data: Vec<T>) -> Self {
		let defined = vec![true; data.len()];
		Self {
			data,
			defined,
		}
	}

	pub fn with_capacity(capacity: usize) -> Self {
		Self {
			data: Vec::with_capacity(capacity),
			defined: Vec::with_capacity(capacity),
		}
	}

	pub fn undefined(len: usize) -> Self {
		Self {
			data: vec![T::default(); len],
			defined: vec![false; len],
		}
	}

	pub fn len(&self) -> usize {
		self.data.len()
	}

	pub fn is_empty(&self) -> bool {
		self.data.is_empty()
	}

	pub fn is_defined(&self, index: usize) -> bool {
		self.defined.get(index).copied().unwrap_or(false)
	}

	pub fn get(&self, index: usize) -> Option<&T> {
		if self.is_defined(index) {
			self.data.get(index)
		} else {
			None
		}
	}

	pub fn push(&mut self, value: T) {
		self.data.push(value);
		self.defined.push(true);
	}

	pub fn push_undefined(&mut self) {
		self.data.push(T::default());
		self.defined.push(false);
	}

	/// Overwrites slot `index`; returns false when the index is out of range.
	pub fn set(&mut self, index: usize, value: T) -> bool {
		match self.data.get_mut(index) {
			Some(slot) => {
				*slot = value;
				self.defined[index] = true;
				true
			}
			None => false,
		}
	}

	pub fn set_undefined(&mut self, index: usize) -> bool {
		match self.data.get_mut(index) {
			Some(slot) => {
				*slot = T::default();
				self.defined[index] = false;
				true
			}
			None => false,
		}
	}

	pub fn data(&self) -> &[T] {
		&self.data
	}

	pub fn iter(&self) -> impl Iterator<Item = Option<&T>> + '_ {
		self.data.iter().zip(self.defined.iter()).map(|(v, d)| if *d { Some(v) } else { None })
	}

	/// Copies the rows at `indexes`, in order, into a new container.
	pub fn take(&self, indexes: &[usize]) -> Self {
		let mut result = Self::with_capacity(indexes.len());
		for &index in indexes {
			match self.get(index) {
				Some(value) => result.push(value.clone()),
				None => result.push_undefined(),
			}
		}
		result
	}
}
