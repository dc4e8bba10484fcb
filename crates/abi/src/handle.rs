// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Opaque handles to host objects
//!
//! A handle is an identifier, never an address. The host resolves it through
//! a table that only lives as long as the call it was issued for, so a handle
//! kept past its call is rejected instead of dangling.

macro_rules! handle {
	($(#[$meta:meta])* $name:ident) => {
		$(#[$meta])*
		#[repr(transparent)]
		#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
		pub struct $name(pub u64);

		impl $name {
			pub const NULL: $name = $name(0);

			pub fn is_null(&self) -> bool {
				self.0 == 0
			}
		}
	};
}

handle!(
	/// Input batch of an update call
	BatchHandleFFI
);

handle!(
	/// One column of an input batch
	VectorHandleFFI
);

handle!(
	/// Ordered list of state blobs
	StateArrayHandleFFI
);

handle!(
	/// Registered function, carrying its extra info and error slot
	FunctionInfoHandleFFI
);

handle!(
	/// Output window of a finalize call
	ResultHandleFFI
);
