// SPDX-License-Identifier: AGPL-3.0-or-later
// Copyright (c) 2025 ReifyDB

//! Host callbacks handed to foreign aggregate functions

use std::ffi::c_void;

use reifydb_abi::{
	BatchHandleFFI, FunctionInfoHandleFFI, HostCallbacksFFI, ResultHandleFFI, StateArrayHandleFFI,
	VectorHandleFFI,
	callbacks::{
		batch::BatchCallbacks, info::FunctionInfoCallbacks, log::LogCallbacks, result::ResultCallbacks,
		state::StateArrayCallbacks, vector::VectorCallbacks,
	},
	constants::{
		FFI_ERROR_INVALID_HANDLE, FFI_ERROR_INVALID_UTF8, FFI_ERROR_NULL_PTR, FFI_ERROR_OUT_OF_BOUNDS,
		FFI_ERROR_TYPE_MISMATCH, FFI_OK, LOG_DEBUG, LOG_ERROR, LOG_INFO, LOG_TRACE, LOG_WARN,
	},
};
use reifydb_core::value::column::{ColumnData, Container};
use reifydb_type::Value;
use tracing::{debug, error, info, trace, warn};

use crate::ffi::{info::lookup, scope::with_scope};

pub fn create_host_callbacks() -> HostCallbacksFFI {
	HostCallbacksFFI {
		batch: BatchCallbacks {
			row_count: host_batch_row_count,
			column_count: host_batch_column_count,
			column: host_batch_column,
		},
		vector: VectorCallbacks {
			get_type: host_vector_get_type,
			len: host_vector_len,
			is_defined: host_vector_is_defined,
			get_bool: host_vector_get_bool,
			get_i32: host_vector_get_i32,
			get_i64: host_vector_get_i64,
			get_f64: host_vector_get_f64,
			get_utf8: host_vector_get_utf8,
		},
		state: StateArrayCallbacks {
			count: host_states_count,
			get: host_states_get,
		},
		result: ResultCallbacks {
			get_type: host_result_get_type,
			set_undefined: host_result_set_undefined,
			set_bool: host_result_set_bool,
			set_i32: host_result_set_i32,
			set_i64: host_result_set_i64,
			set_f64: host_result_set_f64,
			set_utf8: host_result_set_utf8,
		},
		info: FunctionInfoCallbacks {
			extra_info: host_info_extra_info,
			set_error: host_info_set_error,
		},
		log: LogCallbacks {
			message: host_log_message,
		},
	}
}

fn write<T>(output: *mut T, value: T) -> i32 {
	if output.is_null() {
		return FFI_ERROR_NULL_PTR;
	}
	// SAFETY: non-null output pointers are provided by the caller for exactly this write
	unsafe { *output = value };
	FFI_OK
}

fn status(result: Result<(), i32>) -> i32 {
	match result {
		Ok(()) => FFI_OK,
		Err(code) => code,
	}
}

// ==================== Batch ====================

extern "C" fn host_batch_row_count(batch: BatchHandleFFI, output: *mut usize) -> i32 {
	status(with_scope(|scope| scope.batch(batch).map(|b| b.row_count())).map(|n| write(output, n)).and_then(code))
}

extern "C" fn host_batch_column_count(batch: BatchHandleFFI, output: *mut usize) -> i32 {
	status(with_scope(|scope| scope.batch(batch).map(|b| b.len())).map(|n| write(output, n)).and_then(code))
}

extern "C" fn host_batch_column(batch: BatchHandleFFI, index: usize, output: *mut VectorHandleFFI) -> i32 {
	let result = with_scope(|scope| {
		let data = {
			let columns = scope.batch(batch)?;
			let column = columns.get(index).ok_or(FFI_ERROR_OUT_OF_BOUNDS)?;
			column.data() as *const ColumnData
		};
		Ok(scope.register_vector(data))
	});
	status(result.map(|handle| write(output, handle)).and_then(code))
}

// ==================== Vector ====================

fn with_vector<R>(vector: VectorHandleFFI, f: impl FnOnce(&ColumnData) -> Result<R, i32>) -> Result<R, i32> {
	with_scope(|scope| f(scope.vector(vector)?))
}

fn read<T: Copy + Default, R>(
	vector: VectorHandleFFI,
	row: usize,
	output: *mut R,
	select: impl FnOnce(&ColumnData) -> Option<&Container<T>>,
	convert: impl FnOnce(T) -> R,
) -> i32 {
	let result = with_vector(vector, |data| {
		let container = select(data).ok_or(FFI_ERROR_TYPE_MISMATCH)?;
		if row >= container.len() {
			return Err(FFI_ERROR_OUT_OF_BOUNDS);
		}
		Ok(container.data()[row])
	});
	status(result.map(|value| write(output, convert(value))).and_then(code))
}

extern "C" fn host_vector_get_type(vector: VectorHandleFFI, output: *mut u8) -> i32 {
	status(with_vector(vector, |data| Ok(data.get_type().to_u8())).map(|t| write(output, t)).and_then(code))
}

extern "C" fn host_vector_len(vector: VectorHandleFFI, output: *mut usize) -> i32 {
	status(with_vector(vector, |data| Ok(data.len())).map(|n| write(output, n)).and_then(code))
}

extern "C" fn host_vector_is_defined(vector: VectorHandleFFI, row: usize, output: *mut u8) -> i32 {
	let result = with_vector(vector, |data| {
		if row >= data.len() {
			return Err(FFI_ERROR_OUT_OF_BOUNDS);
		}
		Ok(data.is_defined(row) as u8)
	});
	status(result.map(|defined| write(output, defined)).and_then(code))
}

extern "C" fn host_vector_get_bool(vector: VectorHandleFFI, row: usize, output: *mut u8) -> i32 {
	read(
		vector,
		row,
		output,
		|data| match data {
			ColumnData::Bool(c) => Some(c),
			_ => None,
		},
		|v| v as u8,
	)
}

extern "C" fn host_vector_get_i32(vector: VectorHandleFFI, row: usize, output: *mut i32) -> i32 {
	read(
		vector,
		row,
		output,
		|data| match data {
			ColumnData::Int4(c) => Some(c),
			_ => None,
		},
		|v| v,
	)
}

extern "C" fn host_vector_get_i64(vector: VectorHandleFFI, row: usize, output: *mut i64) -> i32 {
	read(
		vector,
		row,
		output,
		|data| match data {
			ColumnData::Int8(c) => Some(c),
			_ => None,
		},
		|v| v,
	)
}

extern "C" fn host_vector_get_f64(vector: VectorHandleFFI, row: usize, output: *mut f64) -> i32 {
	read(
		vector,
		row,
		output,
		|data| match data {
			ColumnData::Float8(c) => Some(c),
			_ => None,
		},
		|v| v,
	)
}

extern "C" fn host_vector_get_utf8(
	vector: VectorHandleFFI,
	row: usize,
	output_ptr: *mut *const u8,
	output_len: *mut usize,
) -> i32 {
	if output_ptr.is_null() || output_len.is_null() {
		return FFI_ERROR_NULL_PTR;
	}
	let result = with_vector(vector, |data| {
		let ColumnData::Utf8(container) = data else {
			return Err(FFI_ERROR_TYPE_MISMATCH);
		};
		let value = container.data().get(row).ok_or(FFI_ERROR_OUT_OF_BOUNDS)?;
		Ok((value.as_ptr(), value.len()))
	});
	match result {
		Ok((ptr, len)) => {
			write(output_ptr, ptr);
			write(output_len, len)
		}
		Err(code) => code,
	}
}

// ==================== State array ====================

extern "C" fn host_states_count(states: StateArrayHandleFFI, output: *mut usize) -> i32 {
	status(with_scope(|scope| scope.states(states).map(|s| s.len())).map(|n| write(output, n)).and_then(code))
}

extern "C" fn host_states_get(states: StateArrayHandleFFI, index: usize, output: *mut *mut u8) -> i32 {
	let result = with_scope(|scope| {
		let states = scope.states(states)?;
		states.get(index).map(|s| s.as_ptr()).ok_or(FFI_ERROR_OUT_OF_BOUNDS)
	});
	status(result.map(|ptr| write(output, ptr)).and_then(code))
}

// ==================== Result ====================

extern "C" fn host_result_get_type(result: ResultHandleFFI, output: *mut u8) -> i32 {
	let ty = with_scope(|scope| scope.result_column(result).map(|data| data.get_type().to_u8()));
	status(ty.map(|t| write(output, t)).and_then(code))
}

fn store(result: ResultHandleFFI, row: usize, value: Value) -> i32 {
	status(with_scope(|scope| {
		let data = scope.result_row(result, row)?;
		let ty = data.get_type();
		if value.is_defined() && value.get_type() != ty {
			return Err(FFI_ERROR_TYPE_MISMATCH);
		}
		data.set_value(row, value).map_err(|_| FFI_ERROR_TYPE_MISMATCH)
	}))
}

extern "C" fn host_result_set_undefined(result: ResultHandleFFI, row: usize) -> i32 {
	store(result, row, Value::Undefined)
}

extern "C" fn host_result_set_bool(result: ResultHandleFFI, row: usize, value: u8) -> i32 {
	store(result, row, Value::Boolean(value != 0))
}

extern "C" fn host_result_set_i32(result: ResultHandleFFI, row: usize, value: i32) -> i32 {
	store(result, row, Value::Int4(value))
}

extern "C" fn host_result_set_i64(result: ResultHandleFFI, row: usize, value: i64) -> i32 {
	store(result, row, Value::Int8(value))
}

extern "C" fn host_result_set_f64(result: ResultHandleFFI, row: usize, value: f64) -> i32 {
	store(result, row, Value::Float8(value))
}

extern "C" fn host_result_set_utf8(result: ResultHandleFFI, row: usize, ptr: *const u8, len: usize) -> i32 {
	let text = match read_utf8(ptr, len) {
		Ok(text) => text,
		Err(code) => return code,
	};
	store(result, row, Value::Utf8(text.to_string()))
}

// ==================== Function info ====================

extern "C" fn host_info_extra_info(info: FunctionInfoHandleFFI, output: *mut *mut c_void) -> i32 {
	match lookup(info) {
		Some(info) => write(output, info.extra_info()),
		None => FFI_ERROR_INVALID_HANDLE,
	}
}

extern "C" fn host_info_set_error(info: FunctionInfoHandleFFI, message_ptr: *const u8, message_len: usize) -> i32 {
	let message = match read_utf8(message_ptr, message_len) {
		Ok(message) => message.to_string(),
		Err(FFI_ERROR_INVALID_UTF8) => "<invalid utf-8 error message>".to_string(),
		Err(code) => return code,
	};
	if lookup(info).is_none() {
		return FFI_ERROR_INVALID_HANDLE;
	}

	status(with_scope(|scope| {
		if scope.function() != info.0 {
			return Err(FFI_ERROR_INVALID_HANDLE);
		}
		scope.outcome.success = false;
		scope.outcome.message = message;
		Ok(())
	}))
}

// ==================== Logging ====================

extern "C" fn host_log_message(level: u32, message_ptr: *const u8, message_len: usize) {
	let Ok(message) = read_utf8(message_ptr, message_len) else {
		return;
	};
	match level {
		LOG_TRACE => trace!(target: "reifydb_extension::foreign", "{}", message),
		LOG_DEBUG => debug!(target: "reifydb_extension::foreign", "{}", message),
		LOG_INFO => info!(target: "reifydb_extension::foreign", "{}", message),
		LOG_WARN => warn!(target: "reifydb_extension::foreign", "{}", message),
		LOG_ERROR => error!(target: "reifydb_extension::foreign", "{}", message),
		_ => info!(target: "reifydb_extension::foreign", level = level, "{}", message),
	}
}

fn read_utf8<'a>(ptr: *const u8, len: usize) -> Result<&'a str, i32> {
	if len == 0 {
		return Ok("");
	}
	if ptr.is_null() {
		return Err(FFI_ERROR_NULL_PTR);
	}
	// SAFETY: the caller passes `len` readable bytes at `ptr` for the duration of the call
	let bytes = unsafe { std::slice::from_raw_parts(ptr, len) };
	std::str::from_utf8(bytes).map_err(|_| FFI_ERROR_INVALID_UTF8)
}

fn code(status: i32) -> Result<(), i32> {
	if status == FFI_OK {
		Ok(())
	} else {
		Err(status)
	}
}

#[cfg(test)]
mod tests {
	use std::ptr;

	use reifydb_abi::{
		StateArrayHandleFFI, VectorHandleFFI,
		constants::{
			FFI_ERROR_INVALID_HANDLE, FFI_ERROR_NULL_PTR, FFI_ERROR_OUT_OF_BOUNDS, FFI_ERROR_TYPE_MISMATCH,
			FFI_OK, TYPE_INT8, TYPE_UTF8,
		},
	};
	use reifydb_core::value::column::{Column, ColumnData, Columns};
	use reifydb_type::Value;

	use super::create_host_callbacks;
	use crate::ffi::scope::CallScope;

	#[test]
	fn test_vector_accessors() {
		let callbacks = create_host_callbacks();
		let mut names = ColumnData::utf8(["a", "bc"]);
		names.push_value(Value::Undefined);
		let columns = Columns::new(vec![Column::new("n", ColumnData::int8([1, 2, 3])), Column::new("s", names)]);

		let scope = CallScope::open(1);
		let batch = scope.batch(&columns);

		let mut count = 0usize;
		assert_eq!((callbacks.batch.column_count)(batch, &mut count), FFI_OK);
		assert_eq!(count, 2);
		assert_eq!((callbacks.batch.row_count)(batch, &mut count), FFI_OK);
		assert_eq!(count, 3);

		let mut numbers = VectorHandleFFI::NULL;
		assert_eq!((callbacks.batch.column)(batch, 0, &mut numbers), FFI_OK);
		let mut again = VectorHandleFFI::NULL;
		assert_eq!((callbacks.batch.column)(batch, 0, &mut again), FFI_OK);
		assert_eq!(numbers, again);
		assert_eq!((callbacks.batch.column)(batch, 2, &mut again), FFI_ERROR_OUT_OF_BOUNDS);

		let mut ty = 0u8;
		assert_eq!((callbacks.vector.get_type)(numbers, &mut ty), FFI_OK);
		assert_eq!(ty, TYPE_INT8);

		let mut value = 0i64;
		assert_eq!((callbacks.vector.get_i64)(numbers, 2, &mut value), FFI_OK);
		assert_eq!(value, 3);
		assert_eq!((callbacks.vector.get_i64)(numbers, 3, &mut value), FFI_ERROR_OUT_OF_BOUNDS);
		let mut float = 0f64;
		assert_eq!((callbacks.vector.get_f64)(numbers, 0, &mut float), FFI_ERROR_TYPE_MISMATCH);
		assert_eq!((callbacks.vector.get_i64)(numbers, 0, ptr::null_mut()), FFI_ERROR_NULL_PTR);

		let mut text = VectorHandleFFI::NULL;
		assert_eq!((callbacks.batch.column)(batch, 1, &mut text), FFI_OK);
		assert_eq!((callbacks.vector.get_type)(text, &mut ty), FFI_OK);
		assert_eq!(ty, TYPE_UTF8);

		let mut text_ptr = ptr::null();
		let mut text_len = 0usize;
		assert_eq!((callbacks.vector.get_utf8)(text, 1, &mut text_ptr, &mut text_len), FFI_OK);
		let bytes = unsafe { std::slice::from_raw_parts(text_ptr, text_len) };
		assert_eq!(bytes, b"bc");

		let mut defined = 1u8;
		assert_eq!((callbacks.vector.is_defined)(text, 2, &mut defined), FFI_OK);
		assert_eq!(defined, 0);

		scope.finish();
		assert_eq!((callbacks.vector.get_i64)(numbers, 0, &mut value), FFI_ERROR_INVALID_HANDLE);
	}

	#[test]
	fn test_result_accessors() {
		let callbacks = create_host_callbacks();
		let mut data = ColumnData::undefined_typed(reifydb_type::Type::Int8, 3);

		let scope = CallScope::open(1);
		let result = scope.result(&mut data, 1, 2);
		assert_eq!((callbacks.result.set_i64)(result, 1, 10), FFI_OK);
		assert_eq!((callbacks.result.set_undefined)(result, 2), FFI_OK);
		assert_eq!((callbacks.result.set_i64)(result, 0, 10), FFI_ERROR_OUT_OF_BOUNDS);
		assert_eq!((callbacks.result.set_f64)(result, 1, 1.5), FFI_ERROR_TYPE_MISMATCH);
		assert_eq!((callbacks.result.set_utf8)(result, 1, b"x".as_ptr(), 1), FFI_ERROR_TYPE_MISMATCH);
		scope.finish();

		assert_eq!(data.get_value(0), Value::Undefined);
		assert_eq!(data.get_value(1), Value::Int8(10));
		assert_eq!(data.get_value(2), Value::Undefined);
	}

	#[test]
	fn test_states_accessors() {
		let callbacks = create_host_callbacks();
		let mut blob = [0u64; 2];
		let state = reifydb_core::interface::StatePtr::new(ptr::NonNull::from(&mut blob).cast());
		let states = vec![state, state];

		let scope = CallScope::open(1);
		let handle = scope.states(&states);
		let mut count = 0usize;
		assert_eq!((callbacks.state.count)(handle, &mut count), FFI_OK);
		assert_eq!(count, 2);

		let mut out = ptr::null_mut();
		assert_eq!((callbacks.state.get)(handle, 1, &mut out), FFI_OK);
		assert_eq!(out, state.as_ptr());
		assert_eq!((callbacks.state.get)(handle, 2, &mut out), FFI_ERROR_OUT_OF_BOUNDS);
		assert_eq!((callbacks.state.get)(StateArrayHandleFFI(handle.0 + 1), 0, &mut out), FFI_ERROR_INVALID_HANDLE);
		scope.finish();
	}
}
