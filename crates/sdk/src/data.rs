// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Safe views over the host objects of a call

use std::{ptr, slice, str};

use reifydb_abi::{
	constants::{
		FFI_ERROR_INVALID_UTF8, FFI_ERROR_TYPE_MISMATCH, TYPE_BOOLEAN, TYPE_FLOAT8, TYPE_INT4, TYPE_INT8,
		TYPE_UNDEFINED, TYPE_UTF8,
	},
	handle::{BatchHandleFFI, ResultHandleFFI, StateArrayHandleFFI, VectorHandleFFI},
};

use crate::{
	context::FFIContext,
	error::{FFIError, Result, check},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FFIType {
	Undefined,
	Boolean,
	Int4,
	Int8,
	Float8,
	Utf8,
}

impl FFIType {
	pub fn from_code(code: u8) -> Option<Self> {
		match code {
			TYPE_UNDEFINED => Some(FFIType::Undefined),
			TYPE_BOOLEAN => Some(FFIType::Boolean),
			TYPE_INT4 => Some(FFIType::Int4),
			TYPE_INT8 => Some(FFIType::Int8),
			TYPE_FLOAT8 => Some(FFIType::Float8),
			TYPE_UTF8 => Some(FFIType::Utf8),
			_ => None,
		}
	}

	pub fn code(&self) -> u8 {
		match self {
			FFIType::Undefined => TYPE_UNDEFINED,
			FFIType::Boolean => TYPE_BOOLEAN,
			FFIType::Int4 => TYPE_INT4,
			FFIType::Int8 => TYPE_INT8,
			FFIType::Float8 => TYPE_FLOAT8,
			FFIType::Utf8 => TYPE_UTF8,
		}
	}
}

fn decode_type(operation: &'static str, code: u8) -> Result<FFIType> {
	FFIType::from_code(code).ok_or(FFIError::Host {
		operation,
		code: FFI_ERROR_TYPE_MISMATCH,
	})
}

/// Input batch of an update call
pub struct Batch<'a> {
	ctx: &'a FFIContext,
	handle: BatchHandleFFI,
}

impl<'a> Batch<'a> {
	pub(crate) fn new(ctx: &'a FFIContext, handle: BatchHandleFFI) -> Self {
		Self {
			ctx,
			handle,
		}
	}

	pub fn handle(&self) -> BatchHandleFFI {
		self.handle
	}

	pub fn row_count(&self) -> Result<usize> {
		let mut output = 0usize;
		check("batch.row_count", (self.ctx.callbacks().batch.row_count)(self.handle, &mut output))?;
		Ok(output)
	}

	pub fn column_count(&self) -> Result<usize> {
		let mut output = 0usize;
		check("batch.column_count", (self.ctx.callbacks().batch.column_count)(self.handle, &mut output))?;
		Ok(output)
	}

	pub fn column(&self, index: usize) -> Result<Vector<'a>> {
		let mut output = VectorHandleFFI::NULL;
		check("batch.column", (self.ctx.callbacks().batch.column)(self.handle, index, &mut output))?;
		Ok(Vector {
			ctx: self.ctx,
			handle: output,
		})
	}
}

/// One argument column of a batch
///
/// Typed getters return `None` for undefined rows.
pub struct Vector<'a> {
	ctx: &'a FFIContext,
	handle: VectorHandleFFI,
}

impl<'a> Vector<'a> {
	pub fn handle(&self) -> VectorHandleFFI {
		self.handle
	}

	pub fn ty(&self) -> Result<FFIType> {
		let mut output = 0u8;
		check("vector.get_type", (self.ctx.callbacks().vector.get_type)(self.handle, &mut output))?;
		decode_type("vector.get_type", output)
	}

	pub fn len(&self) -> Result<usize> {
		let mut output = 0usize;
		check("vector.len", (self.ctx.callbacks().vector.len)(self.handle, &mut output))?;
		Ok(output)
	}

	pub fn is_defined(&self, row: usize) -> Result<bool> {
		let mut output = 0u8;
		check("vector.is_defined", (self.ctx.callbacks().vector.is_defined)(self.handle, row, &mut output))?;
		Ok(output != 0)
	}

	pub fn get_bool(&self, row: usize) -> Result<Option<bool>> {
		if !self.is_defined(row)? {
			return Ok(None);
		}
		let mut output = 0u8;
		check("vector.get_bool", (self.ctx.callbacks().vector.get_bool)(self.handle, row, &mut output))?;
		Ok(Some(output != 0))
	}

	pub fn get_i32(&self, row: usize) -> Result<Option<i32>> {
		if !self.is_defined(row)? {
			return Ok(None);
		}
		let mut output = 0i32;
		check("vector.get_i32", (self.ctx.callbacks().vector.get_i32)(self.handle, row, &mut output))?;
		Ok(Some(output))
	}

	pub fn get_i64(&self, row: usize) -> Result<Option<i64>> {
		if !self.is_defined(row)? {
			return Ok(None);
		}
		let mut output = 0i64;
		check("vector.get_i64", (self.ctx.callbacks().vector.get_i64)(self.handle, row, &mut output))?;
		Ok(Some(output))
	}

	pub fn get_f64(&self, row: usize) -> Result<Option<f64>> {
		if !self.is_defined(row)? {
			return Ok(None);
		}
		let mut output = 0.0f64;
		check("vector.get_f64", (self.ctx.callbacks().vector.get_f64)(self.handle, row, &mut output))?;
		Ok(Some(output))
	}

	/// Borrows the text of `row`; it stays valid until the call returns.
	pub fn get_utf8(&self, row: usize) -> Result<Option<&'a str>> {
		if !self.is_defined(row)? {
			return Ok(None);
		}
		let mut data = ptr::null::<u8>();
		let mut len = 0usize;
		check("vector.get_utf8", (self.ctx.callbacks().vector.get_utf8)(self.handle, row, &mut data, &mut len))?;
		if len == 0 {
			return Ok(Some(""));
		}
		let bytes = unsafe { slice::from_raw_parts(data, len) };
		str::from_utf8(bytes).map(Some).map_err(|_| FFIError::Host {
			operation: "vector.get_utf8",
			code: FFI_ERROR_INVALID_UTF8,
		})
	}
}

/// Ordered state blobs of a call
pub struct States<'a> {
	ctx: &'a FFIContext,
	handle: StateArrayHandleFFI,
}

impl<'a> States<'a> {
	pub(crate) fn new(ctx: &'a FFIContext, handle: StateArrayHandleFFI) -> Self {
		Self {
			ctx,
			handle,
		}
	}

	pub fn handle(&self) -> StateArrayHandleFFI {
		self.handle
	}

	pub fn count(&self) -> Result<usize> {
		let mut output = 0usize;
		check("state.count", (self.ctx.callbacks().state.count)(self.handle, &mut output))?;
		Ok(output)
	}

	/// Address of state `index`
	pub fn get(&self, index: usize) -> Result<*mut u8> {
		let mut output = ptr::null_mut::<u8>();
		check("state.get", (self.ctx.callbacks().state.get)(self.handle, index, &mut output))?;
		Ok(output)
	}
}

/// Output window of a finalize call
pub struct ResultWriter<'a> {
	ctx: &'a FFIContext,
	handle: ResultHandleFFI,
}

impl<'a> ResultWriter<'a> {
	pub(crate) fn new(ctx: &'a FFIContext, handle: ResultHandleFFI) -> Self {
		Self {
			ctx,
			handle,
		}
	}

	pub fn handle(&self) -> ResultHandleFFI {
		self.handle
	}

	pub fn ty(&self) -> Result<FFIType> {
		let mut output = 0u8;
		check("result.get_type", (self.ctx.callbacks().result.get_type)(self.handle, &mut output))?;
		decode_type("result.get_type", output)
	}

	pub fn set_undefined(&self, row: usize) -> Result<()> {
		check("result.set_undefined", (self.ctx.callbacks().result.set_undefined)(self.handle, row))
	}

	pub fn set_bool(&self, row: usize, value: bool) -> Result<()> {
		check("result.set_bool", (self.ctx.callbacks().result.set_bool)(self.handle, row, value as u8))
	}

	pub fn set_i32(&self, row: usize, value: i32) -> Result<()> {
		check("result.set_i32", (self.ctx.callbacks().result.set_i32)(self.handle, row, value))
	}

	pub fn set_i64(&self, row: usize, value: i64) -> Result<()> {
		check("result.set_i64", (self.ctx.callbacks().result.set_i64)(self.handle, row, value))
	}

	pub fn set_f64(&self, row: usize, value: f64) -> Result<()> {
		check("result.set_f64", (self.ctx.callbacks().result.set_f64)(self.handle, row, value))
	}

	pub fn set_utf8(&self, row: usize, value: &str) -> Result<()> {
		check("result.set_utf8", (self.ctx.callbacks().result.set_utf8)(self.handle, row, value.as_ptr(), value.len()))
	}

	pub fn set_option_i64(&self, row: usize, value: Option<i64>) -> Result<()> {
		match value {
			Some(value) => self.set_i64(row, value),
			None => self.set_undefined(row),
		}
	}
}
