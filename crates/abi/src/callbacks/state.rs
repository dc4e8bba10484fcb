// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::handle::StateArrayHandleFFI;

/// Access to the state blobs of a call
#[repr(C)]
#[derive(Clone, Copy)]
pub struct StateArrayCallbacks {
	/// Number of states in the array
	pub count: extern "C" fn(states: StateArrayHandleFFI, output: *mut usize) -> i32,

	/// Address of state `index`
	///
	/// The blob is `state_size` bytes, 16-byte aligned and owned by the host.
	/// Several entries may point at the same blob when rows share a group.
	pub get: extern "C" fn(states: StateArrayHandleFFI, index: usize, output: *mut *mut u8) -> i32,
}
