// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::error::Diagnostic;

/// A non-cycling sequence stepped outside of its bounds
pub fn sequence_exhausted(name: &str, bound: i64, at_minimum: bool) -> Diagnostic {
	let which = if at_minimum {
		"minimum"
	} else {
		"maximum"
	};
	Diagnostic {
		code: "SEQUENCE_001".to_string(),
		message: format!("nextval: reached {} value of sequence `{}` ({})", which, name, bound),
		label: Some("no more values can be generated".to_string()),
		help: Some(format!("declare the sequence with CYCLE or widen its {} value", which)),
		notes: vec![],
		cause: None,
	}
}

/// A sequence name does not follow the `[schema.]name` grammar
pub fn invalid_sequence_name(input: &str) -> Diagnostic {
	Diagnostic {
		code: "SEQUENCE_002".to_string(),
		message: format!("invalid name syntax: `{}`", input),
		label: Some("expected `name` or `schema.name`".to_string()),
		help: Some("a sequence name consists of an optional schema, a single dot and a name".to_string()),
		notes: vec![],
		cause: None,
	}
}
