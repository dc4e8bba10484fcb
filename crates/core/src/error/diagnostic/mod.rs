// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Database-level diagnostic error modules.
//!
//! These diagnostics deal with database constructs like catalogs, sequences and
//! transactions. Type-level diagnostics remain in reifydb-type.

pub mod catalog;
pub mod sequence;
pub mod transaction;
