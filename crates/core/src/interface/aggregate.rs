// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::ptr::NonNull;

use reifydb_type::Type;

use crate::value::column::{ColumnData, Columns};

/// Address of one group's opaque state blob.
///
/// The blob is owned by the state arena that allocated it; a `StatePtr` never
/// outlives that arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StatePtr(NonNull<u8>);

// SAFETY: a state blob belongs to exactly one group; callers never hand the same
// blob to two threads at once.
unsafe impl Send for StatePtr {}
unsafe impl Sync for StatePtr {}

impl StatePtr {
	pub fn new(ptr: NonNull<u8>) -> Self {
		Self(ptr)
	}

	pub fn as_ptr(self) -> *mut u8 {
		self.0.as_ptr()
	}
}

/// Lifecycle contract of a group aggregate.
///
/// The engine allocates `state_size()` zeroed bytes per group and calls
/// `initialize` once on each. `update` and `combine` may run any number of
/// times, `finalize` at most once per state, and `destroy` exactly once per
/// allocated state, including on cancellation.
pub trait AggregateFunction: Send + Sync {
	fn name(&self) -> &str;

	fn arguments(&self) -> &[Type];

	fn return_type(&self) -> Type;

	fn state_size(&self) -> usize;

	fn initialize(&self, state: StatePtr) -> crate::Result<()>;

	/// `states[i]` is the state of active row `i` of `input`; states may repeat.
	fn update(&self, input: &Columns, states: &[StatePtr]) -> crate::Result<()>;

	/// Merges `source[i]` into `target[i]` for every pair.
	fn combine(&self, source: &[StatePtr], target: &[StatePtr]) -> crate::Result<()>;

	/// Writes the result of `states[i]` into row `offset + i` of `result`.
	fn finalize(&self, states: &[StatePtr], result: &mut ColumnData, offset: usize) -> crate::Result<()>;

	fn has_destructor(&self) -> bool;

	fn destroy(&self, states: &[StatePtr]);
}
