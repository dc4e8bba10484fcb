// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Host callbacks available to foreign code
//!
//! Every callback returns `FFI_OK` or a negative `FFI_ERROR_*` code and writes
//! its result through the output pointer only on success.

pub mod batch;
pub mod info;
pub mod log;
pub mod result;
pub mod state;
pub mod vector;

use self::{
	batch::BatchCallbacks, info::FunctionInfoCallbacks, log::LogCallbacks, result::ResultCallbacks,
	state::StateArrayCallbacks, vector::VectorCallbacks,
};

#[repr(C)]
#[derive(Clone, Copy)]
pub struct HostCallbacksFFI {
	pub batch: BatchCallbacks,
	pub vector: VectorCallbacks,
	pub state: StateArrayCallbacks,
	pub result: ResultCallbacks,
	pub info: FunctionInfoCallbacks,
	pub log: LogCallbacks,
}
