// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! ReifyDB Aggregate SDK
//!
//! Implement [`FFIAggregate`] for a type and hand the table returned by
//! [`create_aggregate_vtable`] to the host. The SDK owns the state layout,
//! initialization and destruction, and turns both errors and panics into
//! failed calls.

// #![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod aggregate;
pub mod context;
pub mod data;
pub mod error;

pub use aggregate::{FFIAggregate, create_aggregate_vtable};
pub use context::FFIContext;
pub use data::{Batch, FFIType, ResultWriter, States, Vector};
pub use error::{FFIError, Result};
