// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::{Arc, atomic::Ordering};

use reifydb_core::interface::SequenceId;
use tracing::{debug, instrument};

use crate::{
	catalog::Catalog,
	error::CatalogError,
	sequence::{Sequence, SequenceToCreate},
	transaction::{CatalogTransaction, Dependency},
};

impl Catalog {
	#[instrument(name = "catalog::sequence::find", level = "trace", skip(self, txn))]
	pub fn find_sequence(&self, txn: &CatalogTransaction, namespace: &str, name: &str) -> Option<Arc<Sequence>> {
		let key = (namespace.to_string(), name.to_string());

		// 1. Check transactional changes first
		if let Some(sequence) = txn.changes.sequences.get(&key) {
			return Some(sequence.clone());
		}

		// 2. Check if deleted
		if txn.changes.dropped_sequences.contains(&key) {
			return None;
		}

		// 3. Check MaterializedCatalog
		self.materialized.read().find_sequence(namespace, name)
	}

	pub fn get_sequence(&self, txn: &CatalogTransaction, namespace: &str, name: &str) -> crate::Result<Arc<Sequence>> {
		self.find_sequence(txn, namespace, name).ok_or_else(|| {
			CatalogError::SequenceNotFound {
				namespace: namespace.to_string(),
				name: name.to_string(),
			}
			.into()
		})
	}

	#[instrument(name = "catalog::sequence::create", level = "debug", skip(self, txn, to_create), fields(namespace = %to_create.namespace, name = %to_create.name))]
	pub fn create_sequence(
		&self,
		txn: &mut CatalogTransaction,
		to_create: SequenceToCreate,
	) -> crate::Result<Arc<Sequence>> {
		if self.find_sequence(txn, &to_create.namespace, &to_create.name).is_some() {
			return Err(CatalogError::SequenceAlreadyExists {
				namespace: to_create.namespace,
				name: to_create.name,
			}
			.into());
		}
		if let Some(reason) = invalid_options(&to_create) {
			return Err(CatalogError::InvalidSequence {
				namespace: to_create.namespace,
				name: to_create.name,
				reason,
			}
			.into());
		}

		let id = SequenceId(self.next_sequence_id.fetch_add(1, Ordering::Relaxed));
		let key = (to_create.namespace.clone(), to_create.name.clone());
		let sequence = Arc::new(Sequence::new(id, to_create));

		txn.changes.sequences.insert(key, sequence.clone());
		debug!(%id, "sequence created");
		Ok(sequence)
	}

	/// Drops a sequence unless an expression bound in this transaction still depends on it.
	#[instrument(name = "catalog::sequence::drop", level = "debug", skip(self, txn))]
	pub fn drop_sequence(&self, txn: &mut CatalogTransaction, namespace: &str, name: &str) -> crate::Result<()> {
		let sequence = self.get_sequence(txn, namespace, name)?;

		let dependents = txn.dependencies.iter().filter(|d| **d == Dependency::Sequence(sequence.id)).count();
		if dependents > 0 {
			return Err(CatalogError::SequenceInUse {
				namespace: namespace.to_string(),
				name: name.to_string(),
				dependents,
			}
			.into());
		}

		let key = (namespace.to_string(), name.to_string());
		txn.changes.sequences.shift_remove(&key);
		if self.materialized.read().sequences.contains_key(&key) {
			txn.changes.dropped_sequences.push(key);
		}
		Ok(())
	}
}

fn invalid_options(to_create: &SequenceToCreate) -> Option<String> {
	if to_create.increment == 0 {
		return Some("increment must not be zero".to_string());
	}
	if to_create.min_value > to_create.max_value {
		return Some(format!(
			"minimum {} is greater than maximum {}",
			to_create.min_value, to_create.max_value
		));
	}
	if to_create.start < to_create.min_value || to_create.start > to_create.max_value {
		return Some(format!(
			"start {} is outside of [{}, {}]",
			to_create.start, to_create.min_value, to_create.max_value
		));
	}
	None
}

#[cfg(test)]
mod tests {
	use crate::{
		Catalog,
		sequence::SequenceToCreate,
		transaction::Dependency,
	};

	#[test]
	fn test_get_sequence_not_found() {
		let catalog = Catalog::default();
		let txn = catalog.begin();
		let err = catalog.get_sequence(&txn, "main", "missing").unwrap_err();
		assert_eq!(err.code(), "CA_002");
	}

	#[test]
	fn test_create_sequence_visible_in_own_transaction_only() {
		let catalog = Catalog::default();

		let mut txn = catalog.begin();
		catalog.create_sequence(&mut txn, SequenceToCreate::new("main", "seq")).unwrap();
		assert!(catalog.find_sequence(&txn, "main", "seq").is_some());

		let other = catalog.begin();
		assert!(catalog.find_sequence(&other, "main", "seq").is_none());

		catalog.commit(txn).unwrap();
		assert!(catalog.find_sequence(&other, "main", "seq").is_some());
	}

	#[test]
	fn test_create_duplicate_sequence() {
		let catalog = Catalog::default();
		let mut txn = catalog.begin();
		catalog.create_sequence(&mut txn, SequenceToCreate::new("main", "seq")).unwrap();

		let err = catalog.create_sequence(&mut txn, SequenceToCreate::new("main", "seq")).unwrap_err();
		assert_eq!(err.code(), "CA_001");

		// same name in another namespace is fine
		catalog.create_sequence(&mut txn, SequenceToCreate::new("other", "seq")).unwrap();
	}

	#[test]
	fn test_rollback_discards_sequence() {
		let catalog = Catalog::default();
		let mut txn = catalog.begin();
		catalog.create_sequence(&mut txn, SequenceToCreate::new("main", "seq")).unwrap();
		catalog.rollback(txn);

		let txn = catalog.begin();
		assert!(catalog.find_sequence(&txn, "main", "seq").is_none());
	}

	#[test]
	fn test_drop_sequence_with_dependency_fails() {
		let catalog = Catalog::default();
		let mut txn = catalog.begin();
		let seq = catalog.create_sequence(&mut txn, SequenceToCreate::new("main", "seq")).unwrap();
		catalog.commit(txn).unwrap();

		let mut txn = catalog.begin();
		txn.track_dependency(Dependency::Sequence(seq.id));
		let err = catalog.drop_sequence(&mut txn, "main", "seq").unwrap_err();
		assert_eq!(err.code(), "CA_004");

		let mut txn = catalog.begin();
		catalog.drop_sequence(&mut txn, "main", "seq").unwrap();
		assert!(catalog.find_sequence(&txn, "main", "seq").is_none());
		catalog.commit(txn).unwrap();

		let txn = catalog.begin();
		assert!(catalog.find_sequence(&txn, "main", "seq").is_none());
	}

	#[test]
	fn test_drop_and_recreate_in_same_transaction() {
		let catalog = Catalog::default();
		let mut txn = catalog.begin();
		let first = catalog.create_sequence(&mut txn, SequenceToCreate::new("main", "seq")).unwrap();
		catalog.commit(txn).unwrap();

		let mut txn = catalog.begin();
		catalog.drop_sequence(&mut txn, "main", "seq").unwrap();
		let second = catalog.create_sequence(&mut txn, SequenceToCreate::new("main", "seq")).unwrap();
		catalog.commit(txn).unwrap();

		let txn = catalog.begin();
		let found = catalog.get_sequence(&txn, "main", "seq").unwrap();
		assert_ne!(found.id, first.id);
		assert_eq!(found.id, second.id);
	}

	#[test]
	fn test_create_sequence_rejects_invalid_options() {
		let catalog = Catalog::default();
		let mut txn = catalog.begin();

		let cases: Vec<(&str, SequenceToCreate)> = vec![
			("minimum 10 is greater than maximum 5", {
				let mut to_create = SequenceToCreate::new("main", "seq");
				to_create.min_value = 10;
				to_create.max_value = 5;
				to_create.cycle = true;
				to_create
			}),
			("start 0 is outside of [1, 9223372036854775807]", {
				let mut to_create = SequenceToCreate::new("main", "seq");
				to_create.start = 0;
				to_create
			}),
			("start 11 is outside of [1, 10]", {
				let mut to_create = SequenceToCreate::new("main", "seq");
				to_create.start = 11;
				to_create.max_value = 10;
				to_create
			}),
			("increment must not be zero", {
				let mut to_create = SequenceToCreate::new("main", "seq");
				to_create.increment = 0;
				to_create
			}),
		];

		for (reason, to_create) in cases {
			let err = catalog.create_sequence(&mut txn, to_create).unwrap_err();
			assert_eq!(err.code(), "CA_005", "{reason}");
			let message = err.diagnostic().message;
			assert!(message.contains(reason), "expected `{reason}` in `{message}`");
		}
		assert!(catalog.find_sequence(&txn, "main", "seq").is_none());

		// a single-value range is fine
		let mut to_create = SequenceToCreate::new("main", "seq");
		to_create.min_value = 5;
		to_create.max_value = 5;
		to_create.start = 5;
		to_create.cycle = true;
		let seq = catalog.create_sequence(&mut txn, to_create).unwrap();
		assert_eq!(seq.next_value().unwrap(), 5);
		assert_eq!(seq.next_value().unwrap(), 5);
	}
}
