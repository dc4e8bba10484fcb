// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![allow(dead_code)]

use std::sync::Arc;

use reifydb_catalog::Catalog;
use reifydb_core::{
	interface::AggregateFunction,
	value::column::{Column, ColumnData, Columns},
};
use reifydb_extension::{AggregateFunctionDescriptor, CatalogRegistrar};
use reifydb_sdk::{Batch, FFIAggregate, FFIContext, ResultWriter, create_aggregate_vtable};
use reifydb_type::Type;

/// Sums an Int8 argument, skipping undefined rows
pub struct SumInt8;

impl FFIAggregate for SumInt8 {
	type State = i64;

	fn update(_ctx: &FFIContext, state: &mut i64, input: &Batch<'_>, row: usize) -> reifydb_sdk::Result<()> {
		if let Some(value) = input.column(0)?.get_i64(row)? {
			*state += value;
		}
		Ok(())
	}

	fn combine(_ctx: &FFIContext, source: &i64, target: &mut i64) -> reifydb_sdk::Result<()> {
		*target += *source;
		Ok(())
	}

	fn finalize(_ctx: &FFIContext, state: &i64, result: &ResultWriter<'_>, row: usize) -> reifydb_sdk::Result<()> {
		result.set_i64(row, *state)
	}
}

/// A complete descriptor for `T` taking one Int8 argument and returning Int8
pub fn descriptor<T: FFIAggregate>(name: &str) -> AggregateFunctionDescriptor {
	let mut descriptor = AggregateFunctionDescriptor::new();
	descriptor
		.set_name(name)
		.add_parameter(Type::Int8)
		.set_return_type(Type::Int8)
		.set_vtable(create_aggregate_vtable::<T>());
	descriptor
}

/// Registers `descriptor` in a fresh catalog and returns the published aggregate
pub fn publish(descriptor: AggregateFunctionDescriptor) -> Arc<dyn AggregateFunction> {
	let catalog = Catalog::default();
	let mut txn = catalog.begin();
	let def = CatalogRegistrar::new(&catalog, descriptor).register(&mut txn).unwrap();
	catalog.commit(txn).unwrap();
	def.aggregate.clone()
}

pub fn build<T: FFIAggregate>(name: &str) -> Arc<dyn AggregateFunction> {
	publish(descriptor::<T>(name))
}

pub fn input(values: &[i64]) -> Columns {
	Columns::new(vec![Column::new("value", ColumnData::int8(values.iter().copied()))])
}
