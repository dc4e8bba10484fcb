// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tracing::{debug, instrument};

use crate::{
	DEFAULT_NAMESPACE, error::CatalogError, materialized::MaterializedCatalog, transaction::CatalogTransaction,
};

mod function;
mod sequence;

#[derive(Debug, Clone, PartialEq)]
pub struct CatalogConfig {
	/// Namespace used when an object name carries no schema
	pub default_namespace: String,
}

impl Default for CatalogConfig {
	fn default() -> Self {
		Self {
			default_namespace: DEFAULT_NAMESPACE.to_string(),
		}
	}
}

#[derive(Debug)]
pub struct Catalog {
	config: CatalogConfig,
	pub(crate) materialized: RwLock<MaterializedCatalog>,
	next_txn_id: AtomicU64,
	pub(crate) next_sequence_id: AtomicU64,
	pub(crate) next_function_id: AtomicU64,
}

impl Default for Catalog {
	fn default() -> Self {
		Self::new(CatalogConfig::default())
	}
}

impl Catalog {
	pub fn new(config: CatalogConfig) -> Self {
		Self {
			config,
			materialized: RwLock::new(MaterializedCatalog::new()),
			next_txn_id: AtomicU64::new(1),
			next_sequence_id: AtomicU64::new(1),
			next_function_id: AtomicU64::new(1),
		}
	}

	pub fn config(&self) -> &CatalogConfig {
		&self.config
	}

	pub fn default_namespace(&self) -> &str {
		&self.config.default_namespace
	}

	pub fn begin(&self) -> CatalogTransaction {
		CatalogTransaction::new(self.next_txn_id.fetch_add(1, Ordering::Relaxed))
	}

	/// Publishes every change of `txn`.
	///
	/// Fails with a transaction conflict when another transaction committed an
	/// object under one of the same names in the meantime; nothing of `txn`
	/// becomes visible in that case.
	#[instrument(name = "catalog::commit", level = "debug", skip_all, fields(txn = txn.id))]
	pub fn commit(&self, mut txn: CatalogTransaction) -> crate::Result<()> {
		txn.finished = true;
		let changes = std::mem::take(&mut txn.changes);

		let mut materialized = self.materialized.write();

		for key in changes.sequences.keys() {
			if materialized.sequences.contains_key(key) && !changes.dropped_sequences.contains(key) {
				return Err(CatalogError::TransactionConflict.into());
			}
		}
		for name in changes.functions.keys() {
			if materialized.functions.contains_key(name) {
				return Err(CatalogError::TransactionConflict.into());
			}
		}

		for key in &changes.dropped_sequences {
			materialized.sequences.shift_remove(key);
		}
		let sequences = changes.sequences.len();
		let functions = changes.functions.len();
		materialized.sequences.extend(changes.sequences);
		materialized.functions.extend(changes.functions);

		debug!(sequences, functions, dropped = changes.dropped_sequences.len(), "catalog transaction committed");
		Ok(())
	}

	#[instrument(name = "catalog::rollback", level = "debug", skip_all, fields(txn = txn.id))]
	pub fn rollback(&self, mut txn: CatalogTransaction) {
		txn.finished = true;
		txn.changes = Default::default();
		txn.dependencies.clear();
	}
}
