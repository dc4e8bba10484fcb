// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use crate::{
	Catalog, CatalogConfig,
	sequence::{Sequence, SequenceToCreate},
};

pub fn create_test_catalog() -> Catalog {
	Catalog::new(CatalogConfig::default())
}

/// Creates and commits a sequence in the default namespace
pub fn create_sequence(catalog: &Catalog, name: &str) -> Arc<Sequence> {
	create_sequence_with(catalog, SequenceToCreate::new(catalog.default_namespace(), name))
}

pub fn create_sequence_with(catalog: &Catalog, to_create: SequenceToCreate) -> Arc<Sequence> {
	let mut txn = catalog.begin();
	let result = catalog.create_sequence(&mut txn, to_create).unwrap();
	catalog.commit(txn).unwrap();
	result
}
