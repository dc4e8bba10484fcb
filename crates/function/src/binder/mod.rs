// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_catalog::{Catalog, CatalogTransaction};
use reifydb_core::value::column::{Column, Columns};
use reifydb_type::{Type, error::diagnostic::internal::internal, return_error};
use tracing::{debug, instrument};

use crate::{
	BindContext, FunctionBindData, ScalarFunction, ScalarFunctionContext, error::FunctionError,
	expression::Expression, registry::Functions,
};

/// Resolves function calls against the registry and the catalog
pub struct FunctionBinder<'a> {
	functions: &'a Functions,
	catalog: &'a Catalog,
}

impl<'a> FunctionBinder<'a> {
	pub fn new(functions: &'a Functions, catalog: &'a Catalog) -> Self {
		Self {
			functions,
			catalog,
		}
	}

	/// Binds `name(arguments)`.
	///
	/// Every catalog object the bound call depends on is recorded in `txn`, so
	/// it cannot be dropped while the transaction holds the expression.
	#[instrument(name = "function::bind_scalar", level = "trace", skip(self, arguments, txn))]
	pub fn bind_scalar(
		&self,
		name: &str,
		arguments: Vec<Expression>,
		txn: &mut CatalogTransaction,
	) -> crate::Result<BoundScalarFunction> {
		let function = self.functions.get_scalar(name).ok_or_else(|| FunctionError::UnknownFunction {
			name: name.to_string(),
		})?;

		let signature = function.signature();
		if signature.arguments.len() != arguments.len() {
			return Err(FunctionError::ArityMismatch {
				name: name.to_string(),
				expected: signature.arguments.len(),
				actual: arguments.len(),
			}
			.into());
		}

		for (index, (argument, expected)) in arguments.iter().zip(&signature.arguments).enumerate() {
			let actual = argument.get_type();
			// an undefined constant fits any parameter
			if actual != *expected && actual != Type::Undefined {
				return Err(FunctionError::InvalidArgumentType {
					name: name.to_string(),
					index,
					expected: vec![*expected],
					actual,
				}
				.into());
			}
		}

		let bind_data = function.bind(BindContext {
			catalog: self.catalog,
			txn: &*txn,
			arguments: &arguments,
		})?;

		if let Some(data) = &bind_data {
			for dependency in data.dependencies() {
				txn.track_dependency(dependency);
			}
		}

		debug!(function = name, resolved = bind_data.is_some(), "scalar function bound");
		Ok(BoundScalarFunction {
			function,
			arguments,
			bind_data,
			return_type: signature.return_type,
		})
	}
}

/// A function call specialized for one call site
pub struct BoundScalarFunction {
	function: Box<dyn ScalarFunction>,
	arguments: Vec<Expression>,
	bind_data: Option<Box<dyn FunctionBindData>>,
	return_type: Type,
}

impl BoundScalarFunction {
	pub fn name(&self) -> &str {
		self.function.name()
	}

	pub fn arguments(&self) -> &[Expression] {
		&self.arguments
	}

	pub fn return_type(&self) -> Type {
		self.return_type
	}

	pub fn bind_data(&self) -> Option<&dyn FunctionBindData> {
		self.bind_data.as_deref()
	}

	/// Evaluates the call over `batch`.
	///
	/// The result has one row per input row and is aligned with the batch
	/// selection; rows outside the selection are undefined.
	#[instrument(name = "function::execute", level = "trace", skip_all, fields(function = self.name(), rows = batch.row_count()))]
	pub fn execute(&self, batch: &Columns, catalog: &Catalog, txn: &CatalogTransaction) -> crate::Result<Column> {
		let mut columns = Vec::with_capacity(self.arguments.len());
		for (index, argument) in self.arguments.iter().enumerate() {
			let data = argument.evaluate(batch)?.into_owned();
			columns.push(Column::new(format!("arg{}", index), data));
		}

		let mut arguments = if columns.is_empty() {
			Columns::empty(batch.row_count())
		} else {
			Columns::new(columns)
		};
		if let Some(selection) = batch.selection() {
			arguments = arguments.with_selection(selection.to_vec());
		}

		let data = self.function.scalar(ScalarFunctionContext {
			columns: &arguments,
			row_count: batch.row_count(),
			bind_data: self.bind_data(),
			catalog,
			txn,
		})?;

		if data.len() != batch.row_count() {
			return_error!(internal(format!(
				"function {} returned {} rows for a batch of {}",
				self.name(),
				data.len(),
				batch.row_count()
			)));
		}

		Ok(Column::new(self.name(), data))
	}
}

#[cfg(test)]
mod tests {
	use reifydb_catalog::{
		sequence::SequenceToCreate,
		test_utils::{create_sequence, create_sequence_with, create_test_catalog},
		transaction::Dependency,
	};
	use reifydb_core::value::column::{Column, ColumnData, Columns};
	use reifydb_type::{Type, Value};

	use crate::{Expression, FunctionBinder, Functions, sequence::nextval::NextValBindData};

	fn batch(rows: usize) -> Columns {
		Columns::new(vec![Column::new("id", ColumnData::int4(0..rows as i32))])
	}

	fn int8_values(column: &Column) -> Vec<Option<i64>> {
		(0..column.data().len())
			.map(|i| match column.data().get_value(i) {
				Value::Int8(v) => Some(v),
				_ => None,
			})
			.collect()
	}

	#[test]
	fn test_unknown_function() {
		let catalog = create_test_catalog();
		let functions = Functions::builtin();
		let mut txn = catalog.begin();
		let err = FunctionBinder::new(&functions, &catalog).bind_scalar("currval", vec![], &mut txn).err().unwrap();
		assert_eq!(err.code(), "FUNCTION_001");
	}

	#[test]
	fn test_nextval_arity_and_type() {
		let catalog = create_test_catalog();
		let functions = Functions::builtin();
		let binder = FunctionBinder::new(&functions, &catalog);
		let mut txn = catalog.begin();

		let err = binder.bind_scalar("nextval", vec![], &mut txn).err().unwrap();
		assert_eq!(err.code(), "FUNCTION_002");

		let err = binder.bind_scalar("nextval", vec![Expression::constant(1i64)], &mut txn).err().unwrap();
		assert_eq!(err.code(), "FUNCTION_004");
	}

	#[test]
	fn test_nextval_constant_resolves_at_bind() {
		let catalog = create_test_catalog();
		let seq = create_sequence(&catalog, "seq");
		let functions = Functions::builtin();
		let mut txn = catalog.begin();

		let bound = FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::constant("seq")], &mut txn)
			.unwrap();
		assert_eq!(bound.return_type(), Type::Int8);

		let data = bound.bind_data().unwrap().as_any().downcast_ref::<NextValBindData>().unwrap();
		assert_eq!(data.sequence.as_ref().unwrap().id, seq.id);
		assert_eq!(txn.dependencies(), &[Dependency::Sequence(seq.id)]);

		let result = bound.execute(&batch(3), &catalog, &txn).unwrap();
		assert_eq!(result.get_type(), Type::Int8);
		assert_eq!(int8_values(&result), vec![Some(1), Some(2), Some(3)]);

		let result = bound.execute(&batch(2), &catalog, &txn).unwrap();
		assert_eq!(int8_values(&result), vec![Some(4), Some(5)]);
	}

	#[test]
	fn test_nextval_constant_missing_sequence_fails_at_bind() {
		let catalog = create_test_catalog();
		let functions = Functions::builtin();
		let mut txn = catalog.begin();

		let err = FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::constant("other.seq")], &mut txn)
			.err()
			.unwrap();
		assert_eq!(err.code(), "CA_002");
		assert!(txn.dependencies().is_empty());
	}

	#[test]
	fn test_nextval_constant_syntax_error_at_bind() {
		let catalog = create_test_catalog();
		let functions = Functions::builtin();
		let mut txn = catalog.begin();

		let err = FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::constant("a.b.c")], &mut txn)
			.err()
			.unwrap();
		assert_eq!(err.code(), "SEQUENCE_002");
	}

	#[test]
	fn test_nextval_per_row_names() {
		let catalog = create_test_catalog();
		create_sequence(&catalog, "a");
		create_sequence_with(&catalog, {
			let mut to_create = SequenceToCreate::new("other", "b");
			to_create.start = 100;
			to_create.min_value = 100;
			to_create
		});

		let functions = Functions::builtin();
		let mut txn = catalog.begin();
		let bound = FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::column(0, Type::Utf8)], &mut txn)
			.unwrap();
		assert!(txn.dependencies().is_empty());

		let mut names = ColumnData::utf8(["a", "other.b", "main.a"]);
		names.push_value(Value::Undefined);
		let batch = Columns::new(vec![Column::new("name", names)]);

		let result = bound.execute(&batch, &catalog, &txn).unwrap();
		assert_eq!(int8_values(&result), vec![Some(1), Some(100), Some(2), None]);
	}

	#[test]
	fn test_nextval_per_row_errors() {
		let catalog = create_test_catalog();
		create_sequence(&catalog, "a");
		let functions = Functions::builtin();
		let mut txn = catalog.begin();
		let bound = FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::column(0, Type::Utf8)], &mut txn)
			.unwrap();

		let batch = Columns::new(vec![Column::new("name", ColumnData::utf8(["a", "missing"]))]);
		let err = bound.execute(&batch, &catalog, &txn).unwrap_err();
		assert_eq!(err.code(), "CA_002");

		let batch = Columns::new(vec![Column::new("name", ColumnData::utf8([".a"]))]);
		let err = bound.execute(&batch, &catalog, &txn).unwrap_err();
		assert_eq!(err.code(), "SEQUENCE_002");
	}

	#[test]
	fn test_nextval_respects_selection() {
		let catalog = create_test_catalog();
		create_sequence(&catalog, "seq");
		let functions = Functions::builtin();
		let mut txn = catalog.begin();
		let bound = FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::constant("seq")], &mut txn)
			.unwrap();

		let result = bound.execute(&batch(4).with_selection(vec![1, 3]), &catalog, &txn).unwrap();
		assert_eq!(int8_values(&result), vec![None, Some(1), None, Some(2)]);
	}

	#[test]
	fn test_nextval_exhaustion() {
		let catalog = create_test_catalog();
		create_sequence_with(&catalog, {
			let mut to_create = SequenceToCreate::new("main", "small");
			to_create.max_value = 3;
			to_create
		});
		let functions = Functions::builtin();
		let mut txn = catalog.begin();
		let bound = FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::constant("small")], &mut txn)
			.unwrap();

		let err = bound.execute(&batch(4), &catalog, &txn).unwrap_err();
		assert_eq!(err.code(), "SEQUENCE_001");
		assert!(err.message.contains("maximum"));

		let err = bound.execute(&batch(1), &catalog, &txn).unwrap_err();
		assert_eq!(err.code(), "SEQUENCE_001");
	}

	#[test]
	fn test_undefined_constant_yields_undefined_rows() {
		let catalog = create_test_catalog();
		let functions = Functions::builtin();
		let mut txn = catalog.begin();
		let bound = FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::Constant(Value::Undefined)], &mut txn)
			.unwrap();

		let result = bound.execute(&batch(2), &catalog, &txn).unwrap();
		assert_eq!(int8_values(&result), vec![None, None]);
	}

	#[test]
	fn test_bound_dependency_blocks_drop() {
		let catalog = create_test_catalog();
		create_sequence(&catalog, "seq");
		let functions = Functions::builtin();
		let mut txn = catalog.begin();
		FunctionBinder::new(&functions, &catalog)
			.bind_scalar("nextval", vec![Expression::constant("main.seq")], &mut txn)
			.unwrap();

		let err = catalog.drop_sequence(&mut txn, "main", "seq").unwrap_err();
		assert_eq!(err.code(), "CA_004");
	}
}
