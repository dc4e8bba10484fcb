// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_type::error::Diagnostic;

/// Transaction conflict occurred due to concurrent modifications
pub fn transaction_conflict() -> Diagnostic {
	Diagnostic {
		code: "TXN_001".to_string(),
		message: "Transaction conflict detected - another transaction modified the same data".to_string(),
		label: None,
		help: Some("Retry the transaction".to_string()),
		notes: vec![],
		cause: None,
	}
}
