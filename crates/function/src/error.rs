// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_core::error::diagnostic::sequence::invalid_sequence_name;
use reifydb_type::{
	Type,
	error::{
		Diagnostic, Error, IntoDiagnostic,
		diagnostic::function::{arity_mismatch, invalid_argument_type, unknown_function},
	},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FunctionError {
	#[error("unknown function `{name}`")]
	UnknownFunction {
		name: String,
	},

	#[error("function `{name}` expects {expected} arguments, got {actual}")]
	ArityMismatch {
		name: String,
		expected: usize,
		actual: usize,
	},

	#[error("function `{name}` argument {index} has type {actual}")]
	InvalidArgumentType {
		name: String,
		index: usize,
		expected: Vec<Type>,
		actual: Type,
	},

	#[error("invalid name syntax: `{input}`")]
	InvalidSequenceName {
		input: String,
	},
}

impl IntoDiagnostic for FunctionError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			FunctionError::UnknownFunction {
				name,
			} => unknown_function(&name),
			FunctionError::ArityMismatch {
				name,
				expected,
				actual,
			} => arity_mismatch(&name, expected, actual),
			FunctionError::InvalidArgumentType {
				name,
				index,
				expected,
				actual,
			} => invalid_argument_type(&name, index, expected, actual),
			FunctionError::InvalidSequenceName {
				input,
			} => invalid_sequence_name(&input),
		}
	}
}

impl From<FunctionError> for Error {
	fn from(err: FunctionError) -> Self {
		Error::new(err.into_diagnostic())
	}
}
