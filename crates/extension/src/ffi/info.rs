// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Process-wide registry of function info handles

use std::{
	ffi::c_void,
	sync::{
		Arc,
		atomic::{AtomicU64, Ordering},
	},
};

use dashmap::DashMap;
use once_cell::sync::Lazy;
use reifydb_abi::{DeleteCallbackFFI, FunctionInfoHandleFFI};
use tracing::trace;

static REGISTRY: Lazy<DashMap<u64, Arc<FunctionInfo>>> = Lazy::new(DashMap::new);

static NEXT_ID: AtomicU64 = AtomicU64::new(1);

/// Foreign context pointer attached to a function.
///
/// The delete callback runs once, when the last owner lets go.
pub struct ExtraInfo {
	data: *mut c_void,
	delete: Option<DeleteCallbackFFI>,
}

// SAFETY: the pointer is only handed back to foreign code, which owns its thread safety
unsafe impl Send for ExtraInfo {}
unsafe impl Sync for ExtraInfo {}

impl ExtraInfo {
	pub fn new(data: *mut c_void, delete: Option<DeleteCallbackFFI>) -> Self {
		Self {
			data,
			delete,
		}
	}

	pub fn data(&self) -> *mut c_void {
		self.data
	}
}

impl Drop for ExtraInfo {
	fn drop(&mut self) {
		let Some(delete) = self.delete else {
			return;
		};
		trace!("releasing function extra info");
		delete(self.data);
	}
}

pub struct FunctionInfo {
	id: u64,
	name: String,
	extra_info: Option<Arc<ExtraInfo>>,
}

impl FunctionInfo {
	pub fn id(&self) -> u64 {
		self.id
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	pub fn extra_info(&self) -> *mut c_void {
		self.extra_info.as_ref().map_or(std::ptr::null_mut(), |info| info.data())
	}
}

/// Keeps a function info resolvable through its handle; dropping it retires the handle.
pub struct FunctionInfoRegistration {
	info: Arc<FunctionInfo>,
}

impl FunctionInfoRegistration {
	pub fn register(name: &str, extra_info: Option<Arc<ExtraInfo>>) -> Self {
		let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
		let info = Arc::new(FunctionInfo {
			id,
			name: name.to_string(),
			extra_info,
		});
		REGISTRY.insert(id, info.clone());
		trace!(id, name, "function info registered");
		Self {
			info,
		}
	}

	pub fn handle(&self) -> FunctionInfoHandleFFI {
		FunctionInfoHandleFFI(self.info.id)
	}

	pub fn info(&self) -> &FunctionInfo {
		&self.info
	}
}

impl Drop for FunctionInfoRegistration {
	fn drop(&mut self) {
		REGISTRY.remove(&self.info.id);
		trace!(id = self.info.id, "function info retired");
	}
}

pub(crate) fn lookup(handle: FunctionInfoHandleFFI) -> Option<Arc<FunctionInfo>> {
	REGISTRY.get(&handle.0).map(|entry| entry.value().clone())
}
