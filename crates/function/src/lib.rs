// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

use std::{any::Any, fmt::Debug};

use reifydb_catalog::{Catalog, CatalogTransaction, transaction::Dependency};
use reifydb_core::value::column::{ColumnData, Columns};
use reifydb_type::Type;

pub mod aggregate;
pub mod binder;
pub mod error;
pub mod expression;
pub mod registry;
pub mod sequence;

pub use binder::{BoundScalarFunction, FunctionBinder};
pub use expression::Expression;
pub use registry::{Functions, FunctionsBuilder};
pub use reifydb_type::Result;

/// Argument and return types a function accepts
#[derive(Debug, Clone, PartialEq)]
pub struct Signature {
	pub arguments: Vec<Type>,
	pub return_type: Type,
}

/// Call-site specific state computed once at bind time
pub trait FunctionBindData: Debug + Send + Sync {
	/// Catalog objects the bound expression relies on
	fn dependencies(&self) -> Vec<Dependency> {
		vec![]
	}

	fn as_any(&self) -> &dyn Any;
}

pub struct BindContext<'a> {
	pub catalog: &'a Catalog,
	pub txn: &'a CatalogTransaction,
	pub arguments: &'a [Expression],
}

pub struct ScalarFunctionContext<'a> {
	/// One column per argument, sharing row count and selection with the input batch
	pub columns: &'a Columns,
	pub row_count: usize,
	pub bind_data: Option<&'a dyn FunctionBindData>,
	pub catalog: &'a Catalog,
	pub txn: &'a CatalogTransaction,
}

pub trait ScalarFunction: Send + Sync {
	fn name(&self) -> &str;

	fn signature(&self) -> Signature;

	fn bind(&self, _ctx: BindContext) -> Result<Option<Box<dyn FunctionBindData>>> {
		Ok(None)
	}

	/// Produces `row_count` rows; rows outside the selection stay undefined.
	fn scalar(&self, ctx: ScalarFunctionContext) -> Result<ColumnData>;
}
