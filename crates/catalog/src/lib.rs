// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod catalog;
pub mod error;
pub mod function;
pub mod materialized;
pub mod sequence;
pub mod test_utils;
pub mod transaction;

pub use catalog::{Catalog, CatalogConfig};
pub use reifydb_type::Result;
pub use transaction::CatalogTransaction;

/// Namespace used when a name carries no explicit schema
pub const DEFAULT_NAMESPACE: &str = "main";
