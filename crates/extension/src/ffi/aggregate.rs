// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! FFI aggregate implementation that bridges foreign aggregate functions with ReifyDB

use std::sync::Arc;

use reifydb_abi::{
	CombineFnFFI, ContextFFI, DestroyFnFFI, FinalizeFnFFI, InitializeFnFFI, StateSizeFnFFI, UpdateFnFFI,
};
use reifydb_core::{
	interface::{AggregateFunction, StatePtr},
	value::column::{ColumnData, Columns},
};
use reifydb_type::{Type, error::diagnostic::internal::internal, return_error};
use tracing::{debug, instrument, warn};

use crate::{
	error::FFIError,
	ffi::{
		callbacks::create_host_callbacks,
		info::{ExtraInfo, FunctionInfoRegistration},
		scope::{CallScope, Outcome},
	},
};

/// Validated lifecycle callbacks
#[derive(Clone, Copy)]
pub(crate) struct Lifecycle {
	pub(crate) state_size: StateSizeFnFFI,
	pub(crate) initialize: InitializeFnFFI,
	pub(crate) update: UpdateFnFFI,
	pub(crate) combine: CombineFnFFI,
	pub(crate) finalize: FinalizeFnFFI,
	pub(crate) destroy: Option<DestroyFnFFI>,
}

/// Aggregate function implemented by foreign code
///
/// Every lifecycle call runs in its own [`CallScope`]: the call sees fresh
/// handles and a success outcome, and afterwards a non-zero status or a
/// `set_error` report is turned into an execution error.
///
/// The vtable entries are `extern "C"`, so a panic must not unwind out of
/// them; foreign code built with `reifydb-sdk` catches its panics and reports
/// them through `set_error`.
pub struct FFIAggregateFunction {
	name: String,
	arguments: Vec<Type>,
	return_type: Type,
	state_size: usize,
	lifecycle: Lifecycle,
	registration: FunctionInfoRegistration,
}

impl FFIAggregateFunction {
	pub(crate) fn new(
		name: &str,
		arguments: Vec<Type>,
		return_type: Type,
		lifecycle: Lifecycle,
		extra_info: Option<Arc<ExtraInfo>>,
	) -> crate::Result<Self> {
		let mut result = Self {
			name: name.to_string(),
			arguments,
			return_type,
			state_size: 0,
			lifecycle,
			registration: FunctionInfoRegistration::register(name, extra_info),
		};

		let scope = CallScope::open(result.function_id());
		let mut ctx = result.context();
		let state_size = (lifecycle.state_size)(&mut ctx);
		let outcome = scope.finish();
		result.check("state_size", 0, outcome)?;

		if state_size == 0 {
			return Err(FFIError::InvalidDefinition {
				name: name.to_string(),
				reason: "state size must be greater than zero".to_string(),
			}
			.into());
		}
		result.state_size = state_size;

		debug!(function = name, state_size, "foreign aggregate created");
		Ok(result)
	}

	fn function_id(&self) -> u64 {
		self.registration.info().id()
	}

	pub fn extra_info(&self) -> *mut std::ffi::c_void {
		self.registration.info().extra_info()
	}

	fn context(&self) -> ContextFFI {
		ContextFFI {
			function_info: self.registration.handle(),
			callbacks: create_host_callbacks(),
		}
	}

	fn check(&self, operation: &str, code: i32, outcome: Outcome) -> crate::Result<()> {
		if code == 0 && outcome.success {
			return Ok(());
		}

		let message = if outcome.success || outcome.message.is_empty() {
			format!("{} returned status {}", operation, code)
		} else {
			outcome.message
		};
		warn!(function = %self.name, operation, code, "foreign aggregate failed: {}", message);
		Err(FFIError::ExecutionFailed {
			name: self.name.clone(),
			message,
		}
		.into())
	}
}

impl AggregateFunction for FFIAggregateFunction {
	fn name(&self) -> &str {
		&self.name
	}

	fn arguments(&self) -> &[Type] {
		&self.arguments
	}

	fn return_type(&self) -> Type {
		self.return_type
	}

	fn state_size(&self) -> usize {
		self.state_size
	}

	#[instrument(name = "extension::ffi::initialize", level = "trace", skip_all, fields(function = %self.name))]
	fn initialize(&self, state: StatePtr) -> crate::Result<()> {
		let scope = CallScope::open(self.function_id());
		let mut ctx = self.context();
		let code = (self.lifecycle.initialize)(&mut ctx, state.as_ptr());
		let outcome = scope.finish();
		self.check("initialize", code, outcome)
	}

	#[instrument(name = "extension::ffi::update", level = "trace", skip_all, fields(function = %self.name, rows = states.len()))]
	fn update(&self, input: &Columns, states: &[StatePtr]) -> crate::Result<()> {
		if states.len() != input.active_count() {
			return_error!(internal(format!("{} states for {} active rows", states.len(), input.active_count())));
		}
		if states.is_empty() {
			return Ok(());
		}

		let dense = input.materialize();

		let scope = CallScope::open(self.function_id());
		let batch = scope.batch(&dense);
		let states = scope.states(states);
		let mut ctx = self.context();
		let code = (self.lifecycle.update)(&mut ctx, batch, states);
		let outcome = scope.finish();
		self.check("update", code, outcome)
	}

	#[instrument(name = "extension::ffi::combine", level = "trace", skip_all, fields(function = %self.name, count = source.len()))]
	fn combine(&self, source: &[StatePtr], target: &[StatePtr]) -> crate::Result<()> {
		if source.len() != target.len() {
			return_error!(internal(format!("combining {} states into {}", source.len(), target.len())));
		}
		if source.is_empty() {
			return Ok(());
		}

		let scope = CallScope::open(self.function_id());
		let source_handle = scope.states(source);
		let target_handle = scope.states(target);
		let mut ctx = self.context();
		let code = (self.lifecycle.combine)(&mut ctx, source_handle, target_handle, source.len());
		let outcome = scope.finish();
		self.check("combine", code, outcome)
	}

	#[instrument(name = "extension::ffi::finalize", level = "trace", skip_all, fields(function = %self.name, count = states.len(), offset = offset))]
	fn finalize(&self, states: &[StatePtr], result: &mut ColumnData, offset: usize) -> crate::Result<()> {
		if offset + states.len() > result.len() {
			return_error!(internal(format!(
				"finalizing {} states at offset {} into {} rows",
				states.len(),
				offset,
				result.len()
			)));
		}
		if states.is_empty() {
			return Ok(());
		}

		let count = states.len();
		let scope = CallScope::open(self.function_id());
		let states_handle = scope.states(states);
		let result_handle = scope.result(result, offset, count);
		let mut ctx = self.context();
		let code = (self.lifecycle.finalize)(&mut ctx, states_handle, result_handle, count, offset);
		let outcome = scope.finish();
		self.check("finalize", code, outcome)
	}

	fn has_destructor(&self) -> bool {
		self.lifecycle.destroy.is_some()
	}

	#[instrument(name = "extension::ffi::destroy", level = "trace", skip_all, fields(function = %self.name, count = states.len()))]
	fn destroy(&self, states: &[StatePtr]) {
		let Some(destroy) = self.lifecycle.destroy else {
			return;
		};
		if states.is_empty() {
			return;
		}

		let scope = CallScope::open(self.function_id());
		let handle = scope.states(states);
		let mut ctx = self.context();
		destroy(&mut ctx, handle, states.len());
		let outcome = scope.finish();
		if let Err(err) = self.check("destroy", 0, outcome) {
			warn!(function = %self.name, "ignoring failed destroy: {}", err);
		}
	}
}
