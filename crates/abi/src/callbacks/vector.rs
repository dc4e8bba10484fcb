// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::handle::VectorHandleFFI;

/// Typed, bounds-checked reads of one input column.
///
/// Getters return `FFI_ERROR_TYPE_MISMATCH` when the column is not of the
/// requested type. Reading an undefined row yields the zero value of the type;
/// use `is_defined` to tell the two apart.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct VectorCallbacks {
	/// Type code (`TYPE_*`) of the column
	pub get_type: extern "C" fn(vector: VectorHandleFFI, output: *mut u8) -> i32,

	/// Number of rows in the column
	pub len: extern "C" fn(vector: VectorHandleFFI, output: *mut usize) -> i32,

	/// Writes 1 if `row` holds a value, 0 if it is undefined
	pub is_defined: extern "C" fn(vector: VectorHandleFFI, row: usize, output: *mut u8) -> i32,

	pub get_bool: extern "C" fn(vector: VectorHandleFFI, row: usize, output: *mut u8) -> i32,

	pub get_i32: extern "C" fn(vector: VectorHandleFFI, row: usize, output: *mut i32) -> i32,

	pub get_i64: extern "C" fn(vector: VectorHandleFFI, row: usize, output: *mut i64) -> i32,

	pub get_f64: extern "C" fn(vector: VectorHandleFFI, row: usize, output: *mut f64) -> i32,

	/// Borrows the UTF-8 bytes of `row`
	///
	/// The bytes stay valid until the current call returns.
	pub get_utf8: extern "C" fn(
		vector: VectorHandleFFI,
		row: usize,
		output_ptr: *mut *const u8,
		output_len: *mut usize,
	) -> i32,
}
