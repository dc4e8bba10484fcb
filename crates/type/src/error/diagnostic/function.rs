// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::{error::diagnostic::Diagnostic, value::r#type::Type};

/// Function is not recognized or does not exist
pub fn unknown_function(name: &str) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_001".to_string(),
		message: format!("Unknown function: {}", name),
		label: Some("unknown function".to_string()),
		help: Some("Check the function name and available functions".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Function called with wrong number of arguments
pub fn arity_mismatch(name: &str, expected: usize, actual: usize) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_002".to_string(),
		message: format!("Function {} expects {} arguments, got {}", name, expected, actual),
		label: Some("wrong number of arguments".to_string()),
		help: Some(format!("Provide exactly {} arguments to function {}", expected, name)),
		notes: vec![],
		cause: None,
	}
}

/// Argument has invalid type for function
pub fn invalid_argument_type(name: &str, index: usize, expected_one_of: Vec<Type>, actual: Type) -> Diagnostic {
	let expected_types = expected_one_of.iter().map(|t| t.to_string()).collect::<Vec<_>>().join(", ");

	Diagnostic {
		code: "FUNCTION_004".to_string(),
		message: format!(
			"Function {} argument {} has invalid type: expected one of [{}], got {}",
			name,
			index + 1,
			expected_types,
			actual
		),
		label: Some("invalid argument type".to_string()),
		help: Some(format!("Provide an argument of type: {}", expected_types)),
		notes: vec![],
		cause: None,
	}
}

/// Function execution failed with a specific reason
pub fn execution_failed(name: &str, reason: &str) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_007".to_string(),
		message: format!("Function {} execution failed: {}", name, reason),
		label: Some("execution failed".to_string()),
		help: Some("Check function arguments and data".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Function descriptor is incomplete or ill-typed and cannot be registered
pub fn invalid_function_definition(name: &str, reason: &str) -> Diagnostic {
	let name = if name.is_empty() {
		"<unnamed>"
	} else {
		name
	};
	Diagnostic {
		code: "FUNCTION_010".to_string(),
		message: format!("Function {} cannot be registered: {}", name, reason),
		label: Some("invalid function definition".to_string()),
		help: Some("Provide a name, fully resolved types and all required callbacks".to_string()),
		notes: vec![],
		cause: None,
	}
}

/// Publishing a function into the catalog conflicted with another definition
pub fn registration_conflict(name: &str, cause: Diagnostic) -> Diagnostic {
	Diagnostic {
		code: "FUNCTION_011".to_string(),
		message: format!("Function {} could not be published", name),
		label: Some("registration conflict".to_string()),
		help: Some("Choose a different name or retry the registration".to_string()),
		notes: vec![],
		cause: Some(Box::new(cause)),
	}
}
