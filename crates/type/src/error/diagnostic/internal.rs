// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

use crate::error::diagnostic::Diagnostic;

/// An invariant of the engine itself was violated
pub fn internal(reason: impl Into<String>) -> Diagnostic {
	let reason = reason.into();
	Diagnostic {
		code: "INTERNAL_ERROR".to_string(),
		message: format!("Internal error: {}", reason),
		label: None,
		help: Some("This is a bug in ReifyDB - please report it".to_string()),
		notes: vec![],
		cause: None,
	}
}
