// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Logging callbacks
#[repr(C)]
#[derive(Clone, Copy)]
pub struct LogCallbacks {
	/// Log a message through the host's logger
	///
	/// # Parameters
	/// - `level`: one of the `LOG_*` constants
	/// - `message_ptr`: UTF-8 message bytes
	/// - `message_len`: Length of the message
	pub message: extern "C" fn(level: u32, message_ptr: *const u8, message_len: usize),
}
