// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use core::ffi::c_void;

use crate::handle::FunctionInfoHandleFFI;

#[repr(C)]
#[derive(Clone, Copy)]
pub struct FunctionInfoCallbacks {
	/// The extra info pointer given at registration, or null
	pub extra_info: extern "C" fn(info: FunctionInfoHandleFFI, output: *mut *mut c_void) -> i32,

	/// Marks the current call as failed
	///
	/// The host turns the message into an execution error once the call
	/// returns; the call should return promptly afterwards.
	pub set_error: extern "C" fn(info: FunctionInfoHandleFFI, message_ptr: *const u8, message_len: usize) -> i32,
}
