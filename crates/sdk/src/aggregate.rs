// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Aggregate trait and the wrapper that bridges it to the FFI vtable
//!
//! Every wrapper function returns `FFI_OK` on success. An error or a panic
//! inside the aggregate is reported through `set_error` and answered with
//! `FFI_ERROR_INTERNAL`; no panic ever unwinds into the host.

use std::{
	any::Any,
	mem::{MaybeUninit, align_of, size_of},
	panic::{AssertUnwindSafe, catch_unwind},
};

use reifydb_abi::{
	aggregate::AggregateVTableFFI,
	constants::{FFI_ERROR_INTERNAL, FFI_ERROR_NULL_PTR, FFI_OK},
	context::ContextFFI,
	handle::{BatchHandleFFI, ResultHandleFFI, StateArrayHandleFFI},
};
use tracing::error;

use crate::{
	context::FFIContext,
	data::{Batch, ResultWriter},
	error::{FFIError, Result},
};

/// Alignment the host guarantees for every state blob
pub const MAX_STATE_ALIGNMENT: usize = 16;

/// A foreign aggregate function
///
/// The host may call `update` with several rows addressing the same state and
/// `combine` with states from independent partitions; the result must not
/// depend on the order rows or partitions arrive in.
pub trait FFIAggregate: 'static {
	/// Per group state, created with `Default` and dropped exactly once
	type State: Default;

	/// Fold row `row` of `input` into `state`
	fn update(ctx: &FFIContext, state: &mut Self::State, input: &Batch<'_>, row: usize) -> Result<()>;

	/// Merge `source` into `target`
	fn combine(ctx: &FFIContext, source: &Self::State, target: &mut Self::State) -> Result<()>;

	/// Write the value of `state` into row `row` of `result`
	fn finalize(ctx: &FFIContext, state: &Self::State, result: &ResultWriter<'_>, row: usize) -> Result<()>;
}

/// Layout of a state blob
///
/// The host hands out zeroed memory, which reads as a slot that is not live.
/// A slot whose initializer failed is therefore never dropped.
#[repr(C)]
struct Slot<S> {
	live: bool,
	value: MaybeUninit<S>,
}

impl<S> Slot<S> {
	unsafe fn from_ptr<'a>(ptr: *mut u8) -> Result<&'a mut Self> {
		match unsafe { (ptr as *mut Self).as_mut() } {
			Some(slot) => Ok(slot),
			None => Err(FFIError::message("state pointer is null")),
		}
	}

	fn get(&self) -> Result<&S> {
		if !self.live {
			return Err(FFIError::message("state was not initialized"));
		}
		Ok(unsafe { self.value.assume_init_ref() })
	}

	fn get_mut(&mut self) -> Result<&mut S> {
		if !self.live {
			return Err(FFIError::message("state was not initialized"));
		}
		Ok(unsafe { self.value.assume_init_mut() })
	}
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
	if let Some(message) = payload.downcast_ref::<&str>() {
		message.to_string()
	} else if let Some(message) = payload.downcast_ref::<String>() {
		message.clone()
	} else {
		"unknown panic".to_string()
	}
}

fn guarded(ctx: *mut ContextFFI, operation: &str, f: impl FnOnce(&FFIContext) -> Result<()>) -> i32 {
	if ctx.is_null() {
		return FFI_ERROR_NULL_PTR;
	}
	// SAFETY: the host hands a valid context to every call
	let context = unsafe { FFIContext::new(ctx) };

	let message = match catch_unwind(AssertUnwindSafe(|| f(&context))) {
		Ok(Ok(())) => return FFI_OK,
		Ok(Err(err)) => err.to_string(),
		Err(payload) => {
			let message = panic_message(&*payload);
			error!(operation, reason = %message, "panic in foreign aggregate");
			format!("{operation} panicked: {message}")
		}
	};

	// the status code alone still fails the call if the host rejects the message
	let _ = context.set_error(&message);
	FFI_ERROR_INTERNAL
}

/// FFI state size function - size of one state slot
pub extern "C" fn ffi_state_size<T: FFIAggregate>(_ctx: *mut ContextFFI) -> usize {
	size_of::<Slot<T::State>>()
}

/// FFI initialize function - construct the default state in place
pub extern "C" fn ffi_initialize<T: FFIAggregate>(ctx: *mut ContextFFI, state: *mut u8) -> i32 {
	guarded(ctx, "initialize", |_| {
		let slot = unsafe { Slot::<T::State>::from_ptr(state)? };
		if slot.live {
			return Err(FFIError::message("state initialized twice"));
		}
		slot.value.write(T::State::default());
		slot.live = true;
		Ok(())
	})
}

/// FFI update function - fold every row into its state
pub extern "C" fn ffi_update<T: FFIAggregate>(
	ctx: *mut ContextFFI,
	input: BatchHandleFFI,
	states: StateArrayHandleFFI,
) -> i32 {
	guarded(ctx, "update", |ctx| {
		let batch = ctx.batch(input);
		let states = ctx.states(states);

		for row in 0..batch.row_count()? {
			let slot = unsafe { Slot::<T::State>::from_ptr(states.get(row)?)? };
			T::update(ctx, slot.get_mut()?, &batch, row)?;
		}
		Ok(())
	})
}

/// FFI combine function - merge source states into target states pairwise
pub extern "C" fn ffi_combine<T: FFIAggregate>(
	ctx: *mut ContextFFI,
	source: StateArrayHandleFFI,
	target: StateArrayHandleFFI,
	count: usize,
) -> i32 {
	guarded(ctx, "combine", |ctx| {
		let source = ctx.states(source);
		let target = ctx.states(target);

		for index in 0..count {
			let source = source.get(index)?;
			let target = target.get(index)?;
			if source == target {
				return Err(FFIError::message("cannot combine a state with itself"));
			}
			let source = unsafe { Slot::<T::State>::from_ptr(source)? };
			let target = unsafe { Slot::<T::State>::from_ptr(target)? };
			T::combine(ctx, source.get()?, target.get_mut()?)?;
		}
		Ok(())
	})
}

/// FFI finalize function - write one result row per state
pub extern "C" fn ffi_finalize<T: FFIAggregate>(
	ctx: *mut ContextFFI,
	states: StateArrayHandleFFI,
	result: ResultHandleFFI,
	count: usize,
	offset: usize,
) -> i32 {
	guarded(ctx, "finalize", |ctx| {
		let states = ctx.states(states);
		let result = ctx.result(result);

		for index in 0..count {
			let slot = unsafe { Slot::<T::State>::from_ptr(states.get(index)?)? };
			T::finalize(ctx, slot.get()?, &result, offset + index)?;
		}
		Ok(())
	})
}

/// FFI destroy function - drop every live state
pub extern "C" fn ffi_destroy<T: FFIAggregate>(ctx: *mut ContextFFI, states: StateArrayHandleFFI, count: usize) {
	let code = guarded(ctx, "destroy", |ctx| {
		let states = ctx.states(states);

		// keep going past a failing state so the others are still released
		let mut failure = None;
		for index in 0..count {
			let dropped = states.get(index).and_then(|ptr| {
				let slot = unsafe { Slot::<T::State>::from_ptr(ptr)? };
				if slot.live {
					slot.live = false;
					unsafe { slot.value.assume_init_drop() };
				}
				Ok(())
			});
			if let Err(err) = dropped {
				failure.get_or_insert(err);
			}
		}
		failure.map_or(Ok(()), Err)
	});

	if code != FFI_OK {
		error!(code, "ffi_destroy failed");
	}
}

/// Create the vtable for an aggregate type
pub fn create_aggregate_vtable<T: FFIAggregate>() -> AggregateVTableFFI {
	assert!(
		align_of::<Slot<T::State>>() <= MAX_STATE_ALIGNMENT,
		"aggregate state alignment exceeds {MAX_STATE_ALIGNMENT} bytes"
	);

	AggregateVTableFFI {
		state_size: Some(ffi_state_size::<T>),
		initialize: Some(ffi_initialize::<T>),
		update: Some(ffi_update::<T>),
		combine: Some(ffi_combine::<T>),
		finalize: Some(ffi_finalize::<T>),
		destroy: Some(ffi_destroy::<T>),
	}
}
