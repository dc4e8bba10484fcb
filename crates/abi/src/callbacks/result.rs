// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::handle::ResultHandleFFI;

/// Writes into the output window of a finalize call.
///
/// Rows are addressed absolutely; only rows in `offset..offset + count` of
/// the current call are writable, anything else yields `FFI_ERROR_OUT_OF_BOUNDS`.
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ResultCallbacks {
	/// Type code (`TYPE_*`) of the result column
	pub get_type: extern "C" fn(result: ResultHandleFFI, output: *mut u8) -> i32,

	pub set_undefined: extern "C" fn(result: ResultHandleFFI, row: usize) -> i32,

	pub set_bool: extern "C" fn(result: ResultHandleFFI, row: usize, value: u8) -> i32,

	pub set_i32: extern "C" fn(result: ResultHandleFFI, row: usize, value: i32) -> i32,

	pub set_i64: extern "C" fn(result: ResultHandleFFI, row: usize, value: i64) -> i32,

	pub set_f64: extern "C" fn(result: ResultHandleFFI, row: usize, value: f64) -> i32,

	/// Copies `len` UTF-8 bytes into row `row`
	pub set_utf8: extern "C" fn(result: ResultHandleFFI, row: usize, ptr: *const u8, len: usize) -> i32,
}
