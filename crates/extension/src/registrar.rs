// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use reifydb_catalog::{
	Catalog, CatalogTransaction,
	function::{FunctionDef, FunctionToCreate},
};
use reifydb_core::interface::FunctionId;
use tracing::{debug, instrument, warn};

use crate::{descriptor::AggregateFunctionDescriptor, error::FFIError, ffi::FFIAggregateFunction};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RegistrationState {
	Unregistered,
	Validated,
	Published(FunctionId),
}

/// Publishes one foreign aggregate into the catalog.
///
/// Publishing happens inside the caller's transaction: the function becomes
/// visible to others when the caller commits, and a rollback discards it. A
/// failed validation or a publish conflict leaves the registrar unregistered,
/// so the descriptor can be fixed and registered again.
pub struct CatalogRegistrar<'a> {
	catalog: &'a Catalog,
	descriptor: AggregateFunctionDescriptor,
	state: RegistrationState,
	validated: Option<Arc<FFIAggregateFunction>>,
	published: Option<Arc<FunctionDef>>,
}

impl<'a> CatalogRegistrar<'a> {
	pub fn new(catalog: &'a Catalog, descriptor: AggregateFunctionDescriptor) -> Self {
		Self {
			catalog,
			descriptor,
			state: RegistrationState::Unregistered,
			validated: None,
			published: None,
		}
	}

	pub fn state(&self) -> RegistrationState {
		self.state
	}

	pub fn descriptor(&self) -> &AggregateFunctionDescriptor {
		&self.descriptor
	}

	/// Gives access to the descriptor while the function is not yet published.
	///
	/// Changing a validated descriptor sends it back to unregistered.
	pub fn descriptor_mut(&mut self) -> Option<&mut AggregateFunctionDescriptor> {
		if let RegistrationState::Published(_) = self.state {
			return None;
		}
		self.state = RegistrationState::Unregistered;
		self.validated = None;
		Some(&mut self.descriptor)
	}

	#[instrument(name = "extension::registrar::validate", level = "debug", skip(self), fields(function = %self.descriptor.name()))]
	pub fn validate(&mut self) -> crate::Result<()> {
		match self.state {
			RegistrationState::Validated | RegistrationState::Published(_) => return Ok(()),
			RegistrationState::Unregistered => {}
		}

		let function = self.descriptor.build()?;
		self.validated = Some(Arc::new(function));
		self.state = RegistrationState::Validated;
		debug!("foreign aggregate validated");
		Ok(())
	}

	#[instrument(name = "extension::registrar::publish", level = "debug", skip(self, txn), fields(function = %self.descriptor.name(), txn = txn.id()))]
	fn publish(&mut self, txn: &mut CatalogTransaction) -> crate::Result<Arc<FunctionDef>> {
		let Some(function) = self.validated.clone() else {
			return Err(FFIError::Other("publishing a function that was not validated".to_string()).into());
		};

		match self.catalog.create_function(txn, FunctionToCreate::aggregate(function)) {
			Ok(def) => {
				self.state = RegistrationState::Published(def.id);
				self.published = Some(def.clone());
				debug!(id = %def.id, "foreign aggregate published");
				Ok(def)
			}
			Err(err) => {
				self.state = RegistrationState::Unregistered;
				self.validated = None;
				self.published = None;
				warn!(code = err.code(), "foreign aggregate could not be published");
				Err(FFIError::RegistrationConflict {
					name: self.descriptor.name().to_string(),
					cause: err.diagnostic(),
				}
				.into())
			}
		}
	}

	/// Validates the function and publishes it in `txn`.
	///
	/// Registering again returns the published definition while it is visible
	/// to `txn`. If the transaction it was published in was rolled back, the
	/// function is published again in `txn`.
	pub fn register(&mut self, txn: &mut CatalogTransaction) -> crate::Result<Arc<FunctionDef>> {
		if let Some(def) = &self.published {
			if self.catalog.find_function(txn, &def.name).is_some_and(|found| found.id == def.id) {
				return Ok(def.clone());
			}
		}
		self.validate()?;
		self.publish(txn)
	}
}
