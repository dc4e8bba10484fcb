// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::error::{
	Diagnostic, Error, IntoDiagnostic,
	diagnostic::{
		function::{execution_failed, invalid_function_definition, registration_conflict},
		internal::internal,
	},
};

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FFIError {
	#[error("function `{name}` cannot be registered: {reason}")]
	InvalidDefinition {
		name: String,
		reason: String,
	},

	#[error("function `{name}` could not be published")]
	RegistrationConflict {
		name: String,
		cause: Diagnostic,
	},

	#[error("function `{name}` execution failed: {message}")]
	ExecutionFailed {
		name: String,
		message: String,
	},

	#[error("{0}")]
	Other(String),
}

impl IntoDiagnostic for FFIError {
	fn into_diagnostic(self) -> Diagnostic {
		match self {
			FFIError::InvalidDefinition {
				name,
				reason,
			} => invalid_function_definition(&name, &reason),
			FFIError::RegistrationConflict {
				name,
				cause,
			} => registration_conflict(&name, cause),
			FFIError::ExecutionFailed {
				name,
				message,
			} => execution_failed(&name, &message),
			FFIError::Other(reason) => internal(reason),
		}
	}
}

impl From<FFIError> for Error {
	fn from(err: FFIError) -> Self {
		Error::new(err.into_diagnostic())
	}
}
