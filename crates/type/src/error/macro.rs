// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

/// Wraps a diagnostic into an [`Error`](crate::error::Error)
#[macro_export]
macro_rules! error {
	($diagnostic:expr) => {
		$crate::error::Error::new($diagnostic)
	};
}

/// Creates an `Err` from a diagnostic
#[macro_export]
macro_rules! err {
	($diagnostic:expr) => {
		Err($crate::error!($diagnostic))
	};
}

/// Returns early with an `Err` built from a diagnostic
#[macro_export]
macro_rules! return_error {
	($diagnostic:expr) => {
		return $crate::err!($diagnostic)
	};
}

#[cfg(test)]
mod tests {
	use crate::error::{Diagnostic, Error, diagnostic::function::unknown_function};

	fn fails() -> crate::Result<()> {
		return_error!(unknown_function("foo"));
	}

	#[test]
	fn test_return_error() {
		let err = fails().unwrap_err();
		assert_eq!(err.code(), "FUNCTION_001");
	}

	#[test]
	fn test_error_macro() {
		let err: Error = error!(Diagnostic::new("TEST_001", "something"));
		assert_eq!(err.diagnostic().message, "something");
	}
}
