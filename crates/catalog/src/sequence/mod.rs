// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicI64, Ordering};

use parking_lot::Mutex;
use reifydb_core::{error::diagnostic::sequence::sequence_exhausted, interface::SequenceId};
use reifydb_type::return_error;

#[derive(Debug, Clone, PartialEq)]
pub struct SequenceToCreate {
	pub namespace: String,
	pub name: String,
	pub start: i64,
	pub increment: i64,
	pub min_value: i64,
	pub max_value: i64,
	pub cycle: bool,
}

impl SequenceToCreate {
	/// Defaults of `CREATE SEQUENCE`: start at 1, step by 1, no cycling.
	pub fn new(namespace: impl Into<String>, name: impl Into<String>) -> Self {
		Self {
			namespace: namespace.into(),
			name: name.into(),
			start: 1,
			increment: 1,
			min_value: 1,
			max_value: i64::MAX,
			cycle: false,
		}
	}
}

/// A user sequence.
///
/// The counter is shared by every caller of the sequence and is not
/// transactional: values handed out are never given back.
#[derive(Debug)]
pub struct Sequence {
	pub id: SequenceId,
	pub namespace: String,
	pub name: String,
	pub increment: i64,
	pub min_value: i64,
	pub max_value: i64,
	pub cycle: bool,
	counter: AtomicI64,
	// only taken on the cycling path
	lock: Mutex<()>,
}

impl Sequence {
	pub(crate) fn new(id: SequenceId, to_create: SequenceToCreate) -> Self {
		Self {
			id,
			namespace: to_create.namespace,
			name: to_create.name,
			increment: to_create.increment,
			min_value: to_create.min_value,
			max_value: to_create.max_value,
			cycle: to_create.cycle,
			counter: AtomicI64::new(to_create.start),
			lock: Mutex::new(()),
		}
	}

	/// The value the next call to [`Sequence::next_value`] starts from.
	pub fn current(&self) -> i64 {
		self.counter.load(Ordering::SeqCst)
	}

	/// Draws the next value.
	///
	/// Without `cycle` the counter advances even when the drawn value is out
	/// of bounds, so once exhausted every later call fails as well. Two
	/// racing callers may both push the counter past the bound; both fail.
	pub fn next_value(&self) -> crate::Result<i64> {
		if self.cycle {
			return Ok(self.next_cycling_value());
		}

		let result = self.counter.fetch_add(self.increment, Ordering::SeqCst);
		if result < self.min_value {
			return_error!(sequence_exhausted(&self.name, self.min_value, true));
		}
		if result > self.max_value {
			return_error!(sequence_exhausted(&self.name, self.max_value, false));
		}
		Ok(result)
	}

	// Resetting the counter is a read followed by a write, which must not
	// interleave with another cycling caller.
	fn next_cycling_value(&self) -> i64 {
		let _guard = self.lock.lock();

		let result = self.counter.fetch_add(self.increment, Ordering::SeqCst);
		if result < self.min_value {
			self.counter.store(self.max_value.wrapping_add(self.increment), Ordering::SeqCst);
			return self.max_value;
		}
		if result > self.max_value {
			self.counter.store(self.min_value.wrapping_add(self.increment), Ordering::SeqCst);
			return self.min_value;
		}

		// the add overflowed i64; continue at the far end of the range
		if result.checked_add(self.increment).is_none() {
			let restart = if self.increment > 0 {
				self.min_value
			} else {
				self.max_value
			};
			self.counter.store(restart, Ordering::SeqCst);
		}

		result
	}
}
