// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use crate::error::FunctionError;

/// A `[schema.]name` reference to a sequence
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SequenceName {
	pub namespace: String,
	pub name: String,
}

/// Splits `input` at its only dot; without a dot the name lives in `default_namespace`.
pub fn parse_sequence_name(input: &str, default_namespace: &str) -> crate::Result<SequenceName> {
	let invalid = || FunctionError::InvalidSequenceName {
		input: input.to_string(),
	};

	match input.split_once('.') {
		None if input.is_empty() => Err(invalid().into()),
		None => Ok(SequenceName {
			namespace: default_namespace.to_string(),
			name: input.to_string(),
		}),
		Some((namespace, name)) => {
			if namespace.is_empty() || name.is_empty() || name.contains('.') {
				return Err(invalid().into());
			}
			Ok(SequenceName {
				namespace: namespace.to_string(),
				name: name.to_string(),
			})
		}
	}
}
