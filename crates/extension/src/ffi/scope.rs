// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Per-call handle table
//!
//! Every foreign call runs inside a [`CallScope`]. Host objects the call may
//! touch are entered into a thread-local table and handed out as handles of
//! the form `generation << 32 | kind << 24 | index`. Closing the scope clears
//! the table and retires its generation, so a handle that escaped a call is
//! rejected by every later call on any thread.

use std::{
	cell::{Cell, RefCell},
	marker::PhantomData,
	sync::atomic::{AtomicU32, Ordering},
};

use reifydb_abi::{
	BatchHandleFFI, ResultHandleFFI, StateArrayHandleFFI, VectorHandleFFI,
	constants::{FFI_ERROR_INVALID_HANDLE, FFI_ERROR_OUT_OF_BOUNDS},
};
use reifydb_core::{
	interface::StatePtr,
	value::column::{ColumnData, Columns},
};

const KIND_BATCH: u64 = 1;
const KIND_VECTOR: u64 = 2;
const KIND_STATES: u64 = 3;
const KIND_RESULT: u64 = 4;

const INDEX_MASK: u64 = 0x00FF_FFFF;

// generations are process-wide so a handle never matches a scope on another thread
static NEXT_GENERATION: AtomicU32 = AtomicU32::new(1);

thread_local! {
	static CURRENT: RefCell<Option<ScopeState>> = const { RefCell::new(None) };
	static DEPTH: Cell<usize> = const { Cell::new(0) };
}

/// Result a foreign call reports through `set_error`
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
	pub success: bool,
	pub message: String,
}

impl Default for Outcome {
	fn default() -> Self {
		Self {
			success: true,
			message: String::new(),
		}
	}
}

pub(crate) enum Entry {
	Batch(*const Columns),
	Vector(*const ColumnData),
	States(*const [StatePtr]),
	Result {
		data: *mut ColumnData,
		offset: usize,
		count: usize,
	},
}

pub(crate) struct ScopeState {
	generation: u32,
	function: u64,
	entries: Vec<Entry>,
	pub(crate) outcome: Outcome,
}

impl ScopeState {
	fn handle(&self, kind: u64, index: usize) -> u64 {
		((self.generation as u64) << 32) | (kind << 24) | (index as u64 & INDEX_MASK)
	}

	fn push(&mut self, kind: u64, entry: Entry) -> u64 {
		let index = self.entries.len();
		self.entries.push(entry);
		self.handle(kind, index)
	}

	pub(crate) fn function(&self) -> u64 {
		self.function
	}

	fn resolve(&self, handle: u64, kind: u64) -> Result<&Entry, i32> {
		let generation = (handle >> 32) as u32;
		let handle_kind = (handle >> 24) & 0xFF;
		let index = (handle & INDEX_MASK) as usize;

		if generation != self.generation || handle_kind != kind {
			return Err(FFI_ERROR_INVALID_HANDLE);
		}
		self.entries.get(index).ok_or(FFI_ERROR_INVALID_HANDLE)
	}

	pub(crate) fn batch(&self, handle: BatchHandleFFI) -> Result<&Columns, i32> {
		match self.resolve(handle.0, KIND_BATCH)? {
			// SAFETY: the scope borrows the batch for its whole lifetime
			Entry::Batch(ptr) => Ok(unsafe { &**ptr }),
			_ => Err(FFI_ERROR_INVALID_HANDLE),
		}
	}

	pub(crate) fn vector(&self, handle: VectorHandleFFI) -> Result<&ColumnData, i32> {
		match self.resolve(handle.0, KIND_VECTOR)? {
			// SAFETY: vectors are columns of a batch borrowed by the scope
			Entry::Vector(ptr) => Ok(unsafe { &**ptr }),
			_ => Err(FFI_ERROR_INVALID_HANDLE),
		}
	}

	pub(crate) fn states(&self, handle: StateArrayHandleFFI) -> Result<&[StatePtr], i32> {
		match self.resolve(handle.0, KIND_STATES)? {
			// SAFETY: the scope borrows the state list for its whole lifetime
			Entry::States(ptr) => Ok(unsafe { &**ptr }),
			_ => Err(FFI_ERROR_INVALID_HANDLE),
		}
	}

	/// The result column, provided `row` lies inside the writable window
	pub(crate) fn result_row(&mut self, handle: ResultHandleFFI, row: usize) -> Result<&mut ColumnData, i32> {
		match self.resolve(handle.0, KIND_RESULT)? {
			Entry::Result {
				data,
				offset,
				count,
			} => {
				if row < *offset || row >= offset + count {
					return Err(FFI_ERROR_OUT_OF_BOUNDS);
				}
				// SAFETY: the scope holds the only borrow of the result column
				Ok(unsafe { &mut **data })
			}
			_ => Err(FFI_ERROR_INVALID_HANDLE),
		}
	}

	pub(crate) fn result_column(&self, handle: ResultHandleFFI) -> Result<&ColumnData, i32> {
		match self.resolve(handle.0, KIND_RESULT)? {
			// SAFETY: see `result_row`
			Entry::Result {
				data,
				..
			} => Ok(unsafe { &**data }),
			_ => Err(FFI_ERROR_INVALID_HANDLE),
		}
	}

	pub(crate) fn register_vector(&mut self, data: *const ColumnData) -> VectorHandleFFI {
		let existing = self.entries.iter().position(|e| matches!(e, Entry::Vector(ptr) if std::ptr::eq(*ptr, data)));
		match existing {
			Some(index) => VectorHandleFFI(self.handle(KIND_VECTOR, index)),
			None => VectorHandleFFI(self.push(KIND_VECTOR, Entry::Vector(data))),
		}
	}
}

/// Runs `f` against the scope of the call in progress on this thread
pub(crate) fn with_scope<R>(f: impl FnOnce(&mut ScopeState) -> Result<R, i32>) -> Result<R, i32> {
	CURRENT.with(|current| match current.try_borrow_mut() {
		Ok(mut current) => match current.as_mut() {
			Some(state) => f(state),
			None => Err(FFI_ERROR_INVALID_HANDLE),
		},
		Err(_) => Err(FFI_ERROR_INVALID_HANDLE),
	})
}

/// Guard of one foreign call.
///
/// Objects entered into the scope stay borrowed until the scope is finished
/// or dropped. A scope opened while another one is active on the same thread
/// shadows it and restores it when closed.
pub struct CallScope<'a> {
	previous: Option<ScopeState>,
	finished: bool,
	_borrow: PhantomData<&'a mut ()>,
}

impl<'a> CallScope<'a> {
	pub fn open(function: u64) -> Self {
		let generation = NEXT_GENERATION.fetch_add(1, Ordering::Relaxed);
		let state = ScopeState {
			generation,
			function,
			entries: Vec::new(),
			outcome: Outcome::default(),
		};
		let previous = CURRENT.with(|current| current.borrow_mut().replace(state));
		DEPTH.with(|depth| depth.set(depth.get() + 1));

		Self {
			previous,
			finished: false,
			_borrow: PhantomData,
		}
	}

	fn register(&self, kind: u64, entry: Entry) -> u64 {
		CURRENT.with(|current| match current.borrow_mut().as_mut() {
			Some(state) => state.push(kind, entry),
			None => 0,
		})
	}

	pub fn batch(&self, columns: &'a Columns) -> BatchHandleFFI {
		BatchHandleFFI(self.register(KIND_BATCH, Entry::Batch(columns)))
	}

	pub fn states(&self, states: &'a [StatePtr]) -> StateArrayHandleFFI {
		StateArrayHandleFFI(self.register(KIND_STATES, Entry::States(states)))
	}

	/// Enters `data` as the result of the call; only rows `offset..offset + count` are writable.
	pub fn result(&self, data: &'a mut ColumnData, offset: usize, count: usize) -> ResultHandleFFI {
		ResultHandleFFI(self.register(
			KIND_RESULT,
			Entry::Result {
				data,
				offset,
				count,
			},
		))
	}

	/// Closes the scope and returns what the call reported.
	pub fn finish(mut self) -> Outcome {
		self.close()
	}

	fn close(&mut self) -> Outcome {
		self.finished = true;
		DEPTH.with(|depth| depth.set(depth.get().saturating_sub(1)));
		CURRENT.with(|current| {
			let mut current = current.borrow_mut();
			let state = std::mem::replace(&mut *current, self.previous.take());
			state.map(|s| s.outcome).unwrap_or_default()
		})
	}
}

impl Drop for CallScope<'_> {
	fn drop(&mut self) {
		if !self.finished {
			self.close();
		}
	}
}

/// Number of scopes open on this thread
pub fn scope_depth() -> usize {
	DEPTH.with(|depth| depth.get())
}
