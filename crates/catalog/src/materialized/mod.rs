// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::sync::Arc;

use indexmap::IndexMap;

use crate::{function::FunctionDef, sequence::Sequence};

/// Committed catalog state
#[derive(Debug, Default)]
pub struct MaterializedCatalog {
	pub(crate) sequences: IndexMap<(String, String), Arc<Sequence>>,
	pub(crate) functions: IndexMap<String, Arc<FunctionDef>>,
}

impl MaterializedCatalog {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn find_sequence(&self, namespace: &str, name: &str) -> Option<Arc<Sequence>> {
		self.sequences.get(&(namespace.to_string(), name.to_string())).cloned()
	}

	pub fn find_function(&self, name: &str) -> Option<Arc<FunctionDef>> {
		self.functions.get(name).cloned()
	}

	pub fn list_functions(&self) -> Vec<Arc<FunctionDef>> {
		self.functions.values().cloned().collect()
	}
}
