// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod aggregate;
pub mod id;

pub use aggregate::{AggregateFunction, StatePtr};
pub use id::{FunctionId, SequenceId};
