// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

mod name;
pub mod nextval;

pub use name::{SequenceName, parse_sequence_name};
