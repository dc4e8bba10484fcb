// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{callbacks::HostCallbacksFFI, handle::FunctionInfoHandleFFI};

/// Passed to every foreign call
#[repr(C)]
#[derive(Clone, Copy)]
pub struct ContextFFI {
	/// The function being invoked
	pub function_info: FunctionInfoHandleFFI,
	/// Host services available during the call
	pub callbacks: HostCallbacksFFI,
}
