// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{
	fmt::{Debug, Formatter},
	sync::Arc,
};

use reifydb_core::interface::{AggregateFunction, FunctionId};
use reifydb_type::Type;

#[derive(Clone)]
pub struct FunctionToCreate {
	pub name: String,
	pub arguments: Vec<Type>,
	pub return_type: Type,
	pub aggregate: Arc<dyn AggregateFunction>,
}

impl FunctionToCreate {
	pub fn aggregate(aggregate: Arc<dyn AggregateFunction>) -> Self {
		Self {
			name: aggregate.name().to_string(),
			arguments: aggregate.arguments().to_vec(),
			return_type: aggregate.return_type(),
			aggregate,
		}
	}
}

/// A published function entry
#[derive(Clone)]
pub struct FunctionDef {
	pub id: FunctionId,
	pub name: String,
	pub arguments: Vec<Type>,
	pub return_type: Type,
	pub aggregate: Arc<dyn AggregateFunction>,
}

impl Debug for FunctionDef {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("FunctionDef")
			.field("id", &self.id)
			.field("name", &self.name)
			.field("arguments", &self.arguments)
			.field("return_type", &self.return_type)
			.finish_non_exhaustive()
	}
}
