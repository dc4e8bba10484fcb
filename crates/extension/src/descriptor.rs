// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{ffi::c_void, sync::Arc};

use reifydb_abi::{
	AggregateVTableFFI, CombineFnFFI, DeleteCallbackFFI, DestroyFnFFI, FinalizeFnFFI, InitializeFnFFI,
	StateSizeFnFFI, UpdateFnFFI,
};
use reifydb_type::Type;

use crate::{
	error::FFIError,
	ffi::{ExtraInfo, FFIAggregateFunction, aggregate::Lifecycle},
};

/// Definition of a foreign aggregate function, assembled before registration
#[derive(Clone)]
pub struct AggregateFunctionDescriptor {
	name: String,
	arguments: Vec<Type>,
	return_type: Option<Type>,
	vtable: AggregateVTableFFI,
	extra_info: Option<Arc<ExtraInfo>>,
}

impl Default for AggregateFunctionDescriptor {
	fn default() -> Self {
		Self::new()
	}
}

impl AggregateFunctionDescriptor {
	pub fn new() -> Self {
		Self {
			name: String::new(),
			arguments: vec![],
			return_type: None,
			vtable: AggregateVTableFFI::default(),
			extra_info: None,
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn arguments(&self) -> &[Type] {
		&self.arguments
	}

	pub fn return_type(&self) -> Option<Type> {
		self.return_type
	}

	pub fn set_name(&mut self, name: impl Into<String>) -> &mut Self {
		self.name = name.into();
		self
	}

	pub fn add_parameter(&mut self, ty: Type) -> &mut Self {
		self.arguments.push(ty);
		self
	}

	pub fn set_return_type(&mut self, ty: Type) -> &mut Self {
		self.return_type = Some(ty);
		self
	}

	pub fn set_functions(
		&mut self,
		state_size: Option<StateSizeFnFFI>,
		initialize: Option<InitializeFnFFI>,
		update: Option<UpdateFnFFI>,
		combine: Option<CombineFnFFI>,
		finalize: Option<FinalizeFnFFI>,
	) -> &mut Self {
		self.vtable.state_size = state_size;
		self.vtable.initialize = initialize;
		self.vtable.update = update;
		self.vtable.combine = combine;
		self.vtable.finalize = finalize;
		self
	}

	pub fn set_destructor(&mut self, destroy: Option<DestroyFnFFI>) -> &mut Self {
		self.vtable.destroy = destroy;
		self
	}

	/// Sets every lifecycle callback, including the destructor, from one vtable
	pub fn set_vtable(&mut self, vtable: AggregateVTableFFI) -> &mut Self {
		self.vtable = vtable;
		self
	}

	/// Attaches a foreign context pointer, readable from every call.
	///
	/// `delete` runs once when neither this descriptor nor any function built
	/// from it refers to `data` anymore.
	pub fn set_extra_info(&mut self, data: *mut c_void, delete: Option<DeleteCallbackFFI>) -> &mut Self {
		self.extra_info = Some(Arc::new(ExtraInfo::new(data, delete)));
		self
	}

	/// Checks that the descriptor is complete enough to be registered.
	pub fn validate(&self) -> crate::Result<()> {
		self.checked().map(|_| ())
	}

	fn invalid(&self, reason: &str) -> reifydb_type::Error {
		FFIError::InvalidDefinition {
			name: self.name.clone(),
			reason: reason.to_string(),
		}
		.into()
	}

	fn checked(&self) -> crate::Result<(Type, Lifecycle)> {
		if self.name.is_empty() {
			return Err(self.invalid("name must not be empty"));
		}

		let Some(return_type) = self.return_type else {
			return Err(self.invalid("return type is not set"));
		};
		if !return_type.is_resolved() {
			return Err(self.invalid(&format!("return type {} is not a concrete type", return_type)));
		}
		if let Some((index, ty)) = self.arguments.iter().enumerate().find(|(_, ty)| !ty.is_resolved()) {
			return Err(self.invalid(&format!("parameter {} has type {}, which is not a concrete type", index + 1, ty)));
		}

		let (state_size, initialize) = match (self.vtable.state_size, self.vtable.initialize) {
			(Some(state_size), Some(initialize)) => (state_size, initialize),
			(None, None) => return Err(self.invalid("state_size and initialize are not set")),
			_ => return Err(self.invalid("state_size and initialize must be set together")),
		};
		let Some(update) = self.vtable.update else {
			return Err(self.invalid("update is not set"));
		};
		let Some(combine) = self.vtable.combine else {
			return Err(self.invalid("combine is not set"));
		};
		let Some(finalize) = self.vtable.finalize else {
			return Err(self.invalid("finalize is not set"));
		};

		Ok((
			return_type,
			Lifecycle {
				state_size,
				initialize,
				update,
				combine,
				finalize,
				destroy: self.vtable.destroy,
			},
		))
	}

	/// Validates the descriptor and instantiates the function it describes.
	///
	/// Only the registrar builds functions, so a foreign aggregate is reachable
	/// once it has been published.
	pub(crate) fn build(&self) -> crate::Result<FFIAggregateFunction> {
		let (return_type, lifecycle) = self.checked()?;
		FFIAggregateFunction::new(&self.name, self.arguments.clone(), return_type, lifecycle, self.extra_info.clone())
	}
}
