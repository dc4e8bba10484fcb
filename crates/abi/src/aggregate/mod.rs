// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use crate::{
	context::ContextFFI,
	handle::{BatchHandleFFI, ResultHandleFFI, StateArrayHandleFFI},
};

/// Releases the extra info pointer of a function once nothing refers to it anymore
pub type DeleteCallbackFFI = extern "C" fn(data: *mut c_void);

/// Size in bytes of one state blob
pub type StateSizeFnFFI = extern "C" fn(ctx: *mut ContextFFI) -> usize;

/// Initialize a freshly allocated, zeroed state blob
pub type InitializeFnFFI = extern "C" fn(ctx: *mut ContextFFI, state: *mut u8) -> i32;

/// Fold every row of `input` into its state
///
/// # Parameters
/// - `input`: Dense batch of the function arguments
/// - `states`: One state per input row
pub type UpdateFnFFI = extern "C" fn(ctx: *mut ContextFFI, input: BatchHandleFFI, states: StateArrayHandleFFI) -> i32;

/// Merge `source[i]` into `target[i]` for `i < count`
pub type CombineFnFFI = extern "C" fn(
	ctx: *mut ContextFFI,
	source: StateArrayHandleFFI,
	target: StateArrayHandleFFI,
	count: usize,
) -> i32;

/// Write the value of `states[i]` into row `offset + i` of `result`
pub type FinalizeFnFFI = extern "C" fn(
	ctx: *mut ContextFFI,
	states: StateArrayHandleFFI,
	result: ResultHandleFFI,
	count: usize,
	offset: usize,
) -> i32;

/// Release resources held by `count` states
///
/// Called exactly once per allocated state. Must not fail.
pub type DestroyFnFFI = extern "C" fn(ctx: *mut ContextFFI, states: StateArrayHandleFFI, count: usize);

/// Lifecycle callbacks of a foreign aggregate function
///
/// `update`, `combine` and `finalize` are mandatory; `state_size` and
/// `initialize` must be given together. Every call returns 0 on success and
/// a non-zero code on failure; a call may additionally report failure through
/// the `set_error` callback.
#[repr(C)]
#[derive(Clone, Copy, Default)]
pub struct AggregateVTableFFI {
	pub state_size: Option<StateSizeFnFFI>,
	pub initialize: Option<InitializeFnFFI>,
	pub update: Option<UpdateFnFFI>,
	pub combine: Option<CombineFnFFI>,
	pub finalize: Option<FinalizeFnFFI>,
	pub destroy: Option<DestroyFnFFI>,
}
