// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	alloc::{Layout, alloc_zeroed, dealloc},
	ptr::NonNull,
	sync::Arc,
};

use reifydb_core::interface::{AggregateFunction, StatePtr};
use reifydb_type::{error::diagnostic::internal::internal, return_error};
use tracing::trace;

mod grouped;

pub use grouped::GroupedAggregation;

/// Alignment of every state blob
pub const STATE_ALIGNMENT: usize = 16;

/// Owner of the state blobs of one aggregate.
///
/// Blobs are zeroed and initialized on allocation. Dropping the arena runs the
/// aggregate's destructor exactly once over every blob it handed out, whether
/// the aggregation finished or was abandoned half way.
pub struct AggregateStates {
	function: Arc<dyn AggregateFunction>,
	layout: Layout,
	states: Vec<StatePtr>,
}

impl AggregateStates {
	pub fn new(function: Arc<dyn AggregateFunction>) -> crate::Result<Self> {
		let size = function.state_size().max(1);
		let layout = match Layout::from_size_align(size, STATE_ALIGNMENT) {
			Ok(layout) => layout,
			Err(_) => return_error!(internal(format!("invalid aggregate state size {}", size))),
		};
		Ok(Self {
			function,
			layout,
			states: vec![],
		})
	}

	pub fn function(&self) -> &Arc<dyn AggregateFunction> {
		&self.function
	}

	pub fn len(&self) -> usize {
		self.states.len()
	}

	pub fn is_empty(&self) -> bool {
		self.states.is_empty()
	}

	pub fn states(&self) -> &[StatePtr] {
		&self.states
	}

	pub fn get(&self, index: usize) -> Option<StatePtr> {
		self.states.get(index).copied()
	}

	/// Allocates and initializes one state.
	///
	/// A state whose initializer fails still belongs to the arena and is
	/// destroyed with it.
	pub fn allocate(&mut self) -> crate::Result<StatePtr> {
		// SAFETY: the layout has a non-zero size
		let ptr = unsafe { alloc_zeroed(self.layout) };
		let Some(ptr) = NonNull::new(ptr) else {
			return_error!(internal(format!("failed to allocate {} bytes of aggregate state", self.layout.size())));
		};

		let state = StatePtr::new(ptr);
		self.states.push(state);
		self.function.initialize(state)?;
		Ok(state)
	}

	/// Allocates states until the arena holds `count` of them.
	pub fn ensure(&mut self, count: usize) -> crate::Result<()> {
		while self.states.len() < count {
			self.allocate()?;
		}
		Ok(())
	}
}

impl Drop for AggregateStates {
	fn drop(&mut self) {
		if self.states.is_empty() {
			return;
		}

		if self.function.has_destructor() {
			trace!(function = self.function.name(), states = self.states.len(), "destroying aggregate states");
			self.function.destroy(&self.states);
		}

		for state in self.states.drain(..) {
			// SAFETY: every state was allocated with `self.layout` and is freed once
			unsafe { dealloc(state.as_ptr(), self.layout) };
		}
	}
}
