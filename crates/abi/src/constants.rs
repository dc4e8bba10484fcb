// SPDX-License-Identifier: MIT
// Copyright (c) 2025 ReifyDB

//! Constants and version information for the foreign function ABI

/// Current API version
///
/// This version must be incremented when making breaking changes to the FFI interface.
pub const CURRENT_API_VERSION: u32 = 1;

// ==================== Return Codes ====================

/// The call succeeded
pub const FFI_OK: i32 = 0;

/// The handle is unknown, of the wrong kind, or belongs to a finished call
pub const FFI_ERROR_INVALID_HANDLE: i32 = -1;

/// A row, column or state index lies outside of the object it addresses
pub const FFI_ERROR_OUT_OF_BOUNDS: i32 = -2;

/// The value type does not match the type of the vector or result
pub const FFI_ERROR_TYPE_MISMATCH: i32 = -3;

/// A required output pointer was null
pub const FFI_ERROR_NULL_PTR: i32 = -4;

/// Text passed to the host was not valid UTF-8
pub const FFI_ERROR_INVALID_UTF8: i32 = -5;

/// Generic failure reported by foreign code
pub const FFI_ERROR_INTERNAL: i32 = -99;

// ==================== Type Codes ====================

pub const TYPE_UNDEFINED: u8 = 0x00;
pub const TYPE_BOOLEAN: u8 = 0x01;
pub const TYPE_INT4: u8 = 0x02;
pub const TYPE_INT8: u8 = 0x03;
pub const TYPE_FLOAT8: u8 = 0x04;
pub const TYPE_UTF8: u8 = 0x05;

// ==================== Log Levels ====================

/// Trace level logging
pub const LOG_TRACE: u32 = 0;

/// Debug level logging
pub const LOG_DEBUG: u32 = 1;

/// Info level logging
pub const LOG_INFO: u32 = 2;

/// Warning level logging
pub const LOG_WARN: u32 = 3;

/// Error level logging
pub const LOG_ERROR: u32 = 4;
