// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

use reifydb_abi::constants::{
	FFI_ERROR_INTERNAL, FFI_ERROR_INVALID_HANDLE, FFI_ERROR_INVALID_UTF8, FFI_ERROR_NULL_PTR,
	FFI_ERROR_OUT_OF_BOUNDS, FFI_ERROR_TYPE_MISMATCH,
};

pub type Result<T> = std::result::Result<T, FFIError>;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FFIError {
	#[error("{operation}: {}", describe(*code))]
	Host {
		operation: &'static str,
		code: i32,
	},

	#[error("{0}")]
	Message(String),
}

impl FFIError {
	pub fn message(message: impl Into<String>) -> Self {
		FFIError::Message(message.into())
	}

	/// The host status behind this error, if it came from a callback
	pub fn code(&self) -> Option<i32> {
		match self {
			FFIError::Host {
				code,
				..
			} => Some(*code),
			FFIError::Message(_) => None,
		}
	}
}

fn describe(code: i32) -> String {
	match code {
		FFI_ERROR_INVALID_HANDLE => "invalid handle".to_string(),
		FFI_ERROR_OUT_OF_BOUNDS => "index out of bounds".to_string(),
		FFI_ERROR_TYPE_MISMATCH => "type mismatch".to_string(),
		FFI_ERROR_NULL_PTR => "null pointer".to_string(),
		FFI_ERROR_INVALID_UTF8 => "invalid utf-8".to_string(),
		FFI_ERROR_INTERNAL => "internal error".to_string(),
		other => format!("status {other}"),
	}
}

pub(crate) fn check(operation: &'static str, code: i32) -> Result<()> {
	if code == 0 {
		Ok(())
	} else {
		Err(FFIError::Host {
			operation,
			code,
		})
	}
}
