// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub(crate) mod aggregate;
mod callbacks;
mod info;
mod scope;

pub use aggregate::FFIAggregateFunction;
pub use callbacks::create_host_callbacks;
pub use info::{ExtraInfo, FunctionInfo, FunctionInfoRegistration};
pub use scope::{CallScope, Outcome, scope_depth};
