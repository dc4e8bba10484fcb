// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Context of a single foreign call

use std::{ffi::c_void, ptr};

use reifydb_abi::{
	callbacks::HostCallbacksFFI,
	constants::{LOG_DEBUG, LOG_ERROR, LOG_INFO, LOG_TRACE, LOG_WARN},
	context::ContextFFI,
	handle::{BatchHandleFFI, FunctionInfoHandleFFI, ResultHandleFFI, StateArrayHandleFFI},
};

use crate::{
	data::{Batch, ResultWriter, States},
	error::{Result, check},
};

/// Access to the host during one call into the function
///
/// A context, and everything obtained through it, is only valid until the
/// call it was created for returns.
pub struct FFIContext {
	ctx: *mut ContextFFI,
}

impl FFIContext {
	/// Create a new context from an FFI context pointer
	///
	/// # Safety
	/// `ctx` must point to the context the host passed into the current call
	/// and stay valid for the lifetime of this context.
	pub unsafe fn new(ctx: *mut ContextFFI) -> Self {
		debug_assert!(!ctx.is_null(), "ContextFFI pointer must not be null");
		Self {
			ctx,
		}
	}

	pub(crate) fn callbacks(&self) -> &HostCallbacksFFI {
		unsafe { &(*self.ctx).callbacks }
	}

	pub fn function_info(&self) -> FunctionInfoHandleFFI {
		unsafe { (*self.ctx).function_info }
	}

	/// The extra info pointer the function was registered with, or null
	pub fn extra_info_ptr(&self) -> Result<*mut c_void> {
		let mut output = ptr::null_mut::<c_void>();
		check("info.extra_info", (self.callbacks().info.extra_info)(self.function_info(), &mut output))?;
		Ok(output)
	}

	/// The extra info of the function, read as a `T`
	///
	/// # Safety
	/// The function must have been registered with a pointer to a live `T`.
	pub unsafe fn extra_info<T>(&self) -> Result<Option<&T>> {
		let ptr = self.extra_info_ptr()?;
		Ok(unsafe { (ptr as *const T).as_ref() })
	}

	/// Fails the current call with `message`
	pub fn set_error(&self, message: &str) -> Result<()> {
		check(
			"info.set_error",
			(self.callbacks().info.set_error)(self.function_info(), message.as_ptr(), message.len()),
		)
	}

	/// Log through the host's logger
	pub fn log(&self, level: u32, message: &str) {
		(self.callbacks().log.message)(level, message.as_ptr(), message.len());
	}

	pub fn trace(&self, message: &str) {
		self.log(LOG_TRACE, message)
	}

	pub fn debug(&self, message: &str) {
		self.log(LOG_DEBUG, message)
	}

	pub fn info(&self, message: &str) {
		self.log(LOG_INFO, message)
	}

	pub fn warn(&self, message: &str) {
		self.log(LOG_WARN, message)
	}

	pub fn error(&self, message: &str) {
		self.log(LOG_ERROR, message)
	}

	pub(crate) fn batch(&self, handle: BatchHandleFFI) -> Batch<'_> {
		Batch::new(self, handle)
	}

	pub(crate) fn states(&self, handle: StateArrayHandleFFI) -> States<'_> {
		States::new(self, handle)
	}

	pub(crate) fn result(&self, handle: ResultHandleFFI) -> ResultWriter<'_> {
		ResultWriter::new(self, handle)
	}
}
