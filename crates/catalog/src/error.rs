// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_core::error::diagnostic::{
	catalog::{
		function_already_exists, sequence_already_exists, sequence_in_use, sequence_invalid, sequence_not_found,
	},
	transaction::transaction_conflict,
};
use reifydb_type::error::{Diagnostic, Error, IntoDiagnostic};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
	#[error("sequence `{namespace}.{name}` already exists")]
	SequenceAlreadyExists {
		namespace: String,
		name: String,
	},

	#[error("sequence `{namespace}.{name}` not found")]
	SequenceNotFound {
		namespace: String,
		name: String,
	},

	#[error("sequence `{namespace}.{name}` is referenced by {dependents} bound expression(s)")]
	SequenceInUse {
		namespace: String,
		name: String,
		dependents: usize,
	},

	#[error("invalid sequence `{namespace}.{name}`: {reason}")]
	InvalidSequence {
		namespace: String,
		name: String,
		reason: String,
	},

	#[error("function `{name}` already exists")]
	FunctionAlreadyExists {
		name: String,
	},

	#[error("transaction conflict")]
	TransactionConflict,
}

impl IntoDiagnostic for CatalogError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			CatalogError::SequenceAlreadyExists {
				namespace,
				name,
			} => sequence_already_exists(&namespace, &name),
			CatalogError::SequenceNotFound {
				namespace,
				name,
			} => sequence_not_found(&namespace, &name),
			CatalogError::SequenceInUse {
				namespace,
				name,
				dependents,
			} => sequence_in_use(&namespace, &name, dependents),
			CatalogError::InvalidSequence {
				namespace,
				name,
				reason,
			} => sequence_invalid(&namespace, &name, &reason),
			CatalogError::FunctionAlreadyExists {
				name,
			} => function_already_exists(&name),
			CatalogError::TransactionConflict => transaction_conflict(),
		}
	}
}

impl From<CatalogError> for Error {
	fn from(err: CatalogError) -> Self {
		Error::new(err.into_diagnostic())
	}
}
