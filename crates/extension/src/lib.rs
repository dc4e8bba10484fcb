// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host side of foreign aggregate functions
//!
//! A foreign aggregate is described with an [`AggregateFunctionDescriptor`],
//! validated and published into the catalog by a [`CatalogRegistrar`], and
//! invoked through [`ffi::FFIAggregateFunction`], which implements the
//! engine's aggregate lifecycle on top of the C vtable.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod descriptor;
pub mod error;
pub mod ffi;
pub mod registrar;

pub use descriptor::AggregateFunctionDescriptor;
pub use error::FFIError;
pub use registrar::{CatalogRegistrar, RegistrationState};
pub use reifydb_type::Result;
