// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::error::Diagnostic;

pub fn sequence_already_exists(namespace: &str, name: &str) -> Diagnostic {
	Diagnostic {
		code: "CA_001".to_string(),
		message: format!("sequence `{}.{}` already exists", namespace, name),
		label: Some("duplicate sequence definition".to_string()),
		help: Some("choose a different name or drop the existing sequence first".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn sequence_not_found(namespace: &str, name: &str) -> Diagnostic {
	Diagnostic {
		code: "CA_002".to_string(),
		message: format!("sequence `{}.{}` not found", namespace, name),
		label: Some("unknown sequence".to_string()),
		help: Some("make sure the sequence exists in the given namespace".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn function_already_exists(name: &str) -> Diagnostic {
	Diagnostic {
		code: "CA_003".to_string(),
		message: format!("function `{}` already exists", name),
		label: Some("duplicate function definition".to_string()),
		help: Some("choose a different name for the function".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn sequence_in_use(namespace: &str, name: &str, dependents: usize) -> Diagnostic {
	Diagnostic {
		code: "CA_004".to_string(),
		message: format!("cannot drop sequence `{}.{}` because {} bound expression(s) depend on it", namespace, name, dependents),
		label: Some("sequence is referenced".to_string()),
		help: Some("finish or abort the statements using the sequence first".to_string()),
		notes: vec![],
		cause: None,
	}
}

pub fn sequence_invalid(namespace: &str, name: &str, reason: &str) -> Diagnostic {
	Diagnostic {
		code: "CA_005".to_string(),
		message: format!("invalid definition of sequence `{}.{}`: {}", namespace, name, reason),
		label: Some("invalid sequence options".to_string()),
		help: Some("the range must not be empty, start must lie inside it and increment must not be zero".to_string()),
		notes: vec![],
		cause: None,
	}
}
