// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::handle::{BatchHandleFFI, VectorHandleFFI};

/// Read access to the input batch of an update call.
///
/// The batch is dense: row `i` belongs to state `i` of the accompanying state array.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct BatchCallbacks {
	/// Number of rows in the batch
	pub row_count: extern "C" fn(batch: BatchHandleFFI, output: *mut usize) -> i32,

	/// Number of argument columns
	pub column_count: extern "C" fn(batch: BatchHandleFFI, output: *mut usize) -> i32,

	/// Handle of argument column `index`
	///
	/// # Returns
	/// - `FFI_ERROR_OUT_OF_BOUNDS` if `index >= column_count`
	pub column: extern "C" fn(batch: BatchHandleFFI, index: usize, output: *mut VectorHandleFFI) -> i32,
}
