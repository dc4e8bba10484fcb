// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use indexmap::IndexMap;
use reifydb_core::interface::SequenceId;
use tracing::trace;

use crate::{function::FunctionDef, sequence::Sequence};

/// Catalog changes made inside a transaction but not yet committed
#[derive(Debug, Default)]
pub(crate) struct TransactionalChanges {
	pub(crate) sequences: IndexMap<(String, String), Arc<Sequence>>,
	pub(crate) dropped_sequences: Vec<(String, String)>,
	pub(crate) functions: IndexMap<String, Arc<FunctionDef>>,
}

/// A catalog object a bound expression relies on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Dependency {
	Sequence(SequenceId),
}

/// Unit of work against the catalog.
///
/// Changes and bind-time dependencies stay local until
/// [`Catalog::commit`](crate::Catalog::commit); dropping an uncommitted
/// transaction discards them.
#[derive(Debug)]
pub struct CatalogTransaction {
	pub(crate) id: u64,
	pub(crate) changes: TransactionalChanges,
	pub(crate) dependencies: Vec<Dependency>,
	pub(crate) finished: bool,
}

impl CatalogTransaction {
	pub(crate) fn new(id: u64) -> Self {
		Self {
			id,
			changes: TransactionalChanges::default(),
			dependencies: vec![],
			finished: false,
		}
	}

	pub fn id(&self) -> u64 {
		self.id
	}

	pub fn track_dependency(&mut self, dependency: Dependency) {
		if !self.dependencies.contains(&dependency) {
			self.dependencies.push(dependency);
		}
	}

	pub fn dependencies(&self) -> &[Dependency] {
		&self.dependencies
	}

	pub fn has_changes(&self) -> bool {
		!self.changes.sequences.is_empty()
			|| !self.changes.dropped_sequences.is_empty()
			|| !self.changes.functions.is_empty()
	}
}

impl Drop for CatalogTransaction {
	fn drop(&mut self) {
		if !self.finished && (self.has_changes() || !self.dependencies.is_empty()) {
			trace!(txn = self.id, "discarding uncommitted catalog transaction");
		}
	}
}
