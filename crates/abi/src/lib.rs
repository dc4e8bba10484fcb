// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! C ABI definitions for ReifyDB foreign functions
//!
//! This crate provides the stable C ABI that foreign aggregate functions
//! implement and the host callbacks they use to read input batches, reach their
//! state blobs and write results. Every engine object crosses the boundary as
//! an opaque 64-bit handle; only state blobs are handed out as raw memory.

#![cfg_attr(not(debug_assertions), deny(warnings))]

pub mod aggregate;
pub mod callbacks;
pub mod constants;
pub mod context;
pub mod handle;

pub use aggregate::{
	AggregateVTableFFI, CombineFnFFI, DeleteCallbackFFI, DestroyFnFFI, FinalizeFnFFI, InitializeFnFFI, StateSizeFnFFI,
	UpdateFnFFI,
};
pub use callbacks::HostCallbacksFFI;
pub use context::ContextFFI;
pub use handle::{BatchHandleFFI, FunctionInfoHandleFFI, ResultHandleFFI, StateArrayHandleFFI, VectorHandleFFI};
