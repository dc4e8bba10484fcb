// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

pub mod error;
pub mod interface;
pub mod value;

pub use reifydb_type::{Error, Result};
