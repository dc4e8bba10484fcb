// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use std::{any::Any, sync::Arc};

use reifydb_catalog::{sequence::Sequence, transaction::Dependency};
use reifydb_core::value::column::{ColumnData, Container};
use reifydb_type::{Type, Value};
use tracing::{instrument, trace};

use crate::{
	BindContext, FunctionBindData, ScalarFunction, ScalarFunctionContext, Signature, error::FunctionError,
	sequence::parse_sequence_name,
};

/// `nextval(name)`: draws the next value of a sequence for every active row
pub struct NextVal;

impl NextVal {
	pub fn new() -> Self {
		Self
	}
}

/// The sequence a constant `nextval` argument names; absent when the
/// name is only known per row
#[derive(Debug)]
pub struct NextValBindData {
	pub sequence: Option<Arc<Sequence>>,
}

impl FunctionBindData for NextValBindData {
	fn dependencies(&self) -> Vec<Dependency> {
		self.sequence.iter().map(|s| Dependency::Sequence(s.id)).collect()
	}

	fn as_any(&self) -> &dyn Any {
		self
	}
}

impl ScalarFunction for NextVal {
	fn name(&self) -> &str {
		"nextval"
	}

	fn signature(&self) -> Signature {
		Signature {
			arguments: vec![Type::Utf8],
			return_type: Type::Int8,
		}
	}

	#[instrument(name = "function::nextval::bind", level = "trace", skip_all)]
	fn bind(&self, ctx: BindContext) -> crate::Result<Option<Box<dyn FunctionBindData>>> {
		let sequence = match ctx.arguments.first().and_then(|arg| arg.fold()) {
			Some(Value::Utf8(input)) => {
				let name = parse_sequence_name(input, ctx.catalog.default_namespace())?;
				let sequence = ctx.catalog.get_sequence(ctx.txn, &name.namespace, &name.name)?;
				trace!(id = %sequence.id, "nextval bound to sequence");
				Some(sequence)
			}
			_ => None,
		};

		Ok(Some(Box::new(NextValBindData {
			sequence,
		})))
	}

	#[instrument(name = "function::nextval::scalar", level = "trace", skip_all, fields(rows = ctx.row_count))]
	fn scalar(&self, ctx: ScalarFunctionContext) -> crate::Result<ColumnData> {
		let resolved = ctx
			.bind_data
			.and_then(|data| data.as_any().downcast_ref::<NextValBindData>())
			.and_then(|data| data.sequence.as_ref());

		let mut result = Container::<i64>::undefined(ctx.row_count);
		let rows = ctx.columns.active_rows();

		if let Some(sequence) = resolved {
			for row in rows {
				result.set(row, sequence.next_value()?);
			}
			return Ok(ColumnData::Int8(result));
		}

		let argument = ctx.columns[0].data();
		for row in rows {
			match argument.get_value(row) {
				Value::Utf8(input) => {
					let name = parse_sequence_name(&input, ctx.catalog.default_namespace())?;
					let sequence = ctx.catalog.get_sequence(ctx.txn, &name.namespace, &name.name)?;
					result.set(row, sequence.next_value()?);
				}
				Value::Undefined => {}
				other => {
					return Err(FunctionError::InvalidArgumentType {
						name: self.name().to_string(),
						index: 0,
						expected: vec![Type::Utf8],
						actual: other.get_type(),
					}
					.into());
				}
			}
		}

		Ok(ColumnData::Int8(result))
	}
}
