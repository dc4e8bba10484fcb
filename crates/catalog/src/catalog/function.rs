// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, atomic::Ordering};

use reifydb_core::interface::FunctionId;
use tracing::{debug, instrument};

use crate::{
	catalog::Catalog,
	error::CatalogError,
	function::{FunctionDef, FunctionToCreate},
	transaction::CatalogTransaction,
};

impl Catalog {
	#[instrument(name = "catalog::function::find", level = "trace", skip(self, txn))]
	pub fn find_function(&self, txn: &CatalogTransaction, name: &str) -> Option<Arc<FunctionDef>> {
		if let Some(function) = txn.changes.functions.get(name) {
			return Some(function.clone());
		}
		self.materialized.read().find_function(name)
	}

	/// Every function visible to `txn`, committed ones first.
	pub fn list_functions(&self, txn: &CatalogTransaction) -> Vec<Arc<FunctionDef>> {
		let mut result: Vec<Arc<FunctionDef>> = self
			.materialized
			.read()
			.list_functions()
			.into_iter()
			.filter(|f| !txn.changes.functions.contains_key(&f.name))
			.collect();
		result.extend(txn.changes.functions.values().cloned());
		result
	}

	#[instrument(name = "catalog::function::create", level = "debug", skip(self, txn, to_create), fields(name = %to_create.name))]
	pub fn create_function(
		&self,
		txn: &mut CatalogTransaction,
		to_create: FunctionToCreate,
	) -> crate::Result<Arc<FunctionDef>> {
		if self.find_function(txn, &to_create.name).is_some() {
			return Err(CatalogError::FunctionAlreadyExists {
				name: to_create.name,
			}
			.into());
		}

		let id = FunctionId(self.next_function_id.fetch_add(1, Ordering::Relaxed));
		let def = Arc::new(FunctionDef {
			id,
			name: to_create.name,
			arguments: to_create.arguments,
			return_type: to_create.return_type,
			aggregate: to_create.aggregate,
		});

		txn.changes.functions.insert(def.name.clone(), def.clone());
		debug!(%id, "function created");
		Ok(def)
	}
}

#[cfg(test)]
mod tests {
	use std::sync::Arc;

	use reifydb_core::{
		interface::{AggregateFunction, StatePtr},
		value::column::{ColumnData, Columns},
	};
	use reifydb_type::Type;

	use crate::{function::FunctionToCreate, test_utils::create_test_catalog};

	struct Noop;

	impl AggregateFunction for Noop {
		fn name(&self) -> &str {
			"noop"
		}

		fn arguments(&self) -> &[Type] {
			&[Type::Int8]
		}

		fn return_type(&self) -> Type {
			Type::Int8
		}

		fn state_size(&self) -> usize {
			8
		}

		fn initialize(&self, _state: StatePtr) -> crate::Result<()> {
			Ok(())
		}

		fn update(&self, _input: &Columns, _states: &[StatePtr]) -> crate::Result<()> {
			Ok(())
		}

		fn combine(&self, _source: &[StatePtr], _target: &[StatePtr]) -> crate::Result<()> {
			Ok(())
		}

		fn finalize(&self, _states: &[StatePtr], _result: &mut ColumnData, _offset: usize) -> crate::Result<()> {
			Ok(())
		}

		fn has_destructor(&self) -> bool {
			false
		}

		fn destroy(&self, _states: &[StatePtr]) {}
	}

	#[test]
	fn test_create_function() {
		let catalog = create_test_catalog();
		let mut txn = catalog.begin();
		let def = catalog.create_function(&mut txn, FunctionToCreate::aggregate(Arc::new(Noop))).unwrap();
		assert_eq!(def.name, "noop");
		assert_eq!(def.arguments, vec![Type::Int8]);
		catalog.commit(txn).unwrap();

		let txn = catalog.begin();
		assert!(catalog.find_function(&txn, "noop").is_some());
		assert_eq!(catalog.list_functions(&txn).len(), 1);
	}

	#[test]
	fn test_pending_function_invisible_to_other_transactions() {
		let catalog = create_test_catalog();
		let mut txn = catalog.begin();
		catalog.create_function(&mut txn, FunctionToCreate::aggregate(Arc::new(Noop))).unwrap();
		assert_eq!(catalog.list_functions(&txn).len(), 1);

		let other = catalog.begin();
		assert!(catalog.find_function(&other, "noop").is_none());
		assert!(catalog.list_functions(&other).is_empty());

		catalog.rollback(txn);
		assert!(catalog.find_function(&catalog.begin(), "noop").is_none());
	}

	#[test]
	fn test_create_duplicate_function() {
		let catalog = create_test_catalog();
		let mut txn = catalog.begin();
		catalog.create_function(&mut txn, FunctionToCreate::aggregate(Arc::new(Noop))).unwrap();
		catalog.commit(txn).unwrap();

		let mut txn = catalog.begin();
		let err = catalog.create_function(&mut txn, FunctionToCreate::aggregate(Arc::new(Noop))).unwrap_err();
		assert_eq!(err.code(), "CA_003");
	}
}
