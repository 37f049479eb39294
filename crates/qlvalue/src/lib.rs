// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! # qlvalue - typed values for a CQL query layer
//!
//! The value runtime shared by query execution, indexes and the client
//! protocol: a dynamically typed [`Value`], its ordering, its CQL cell
//! encoding and its diagnostic text form.
//!
//! ## Quick Start
//!
//! ```rust
//! use qlvalue::{decode_cell, encode_cell, TypeDescriptor, Value};
//!
//! let desc = TypeDescriptor::list(TypeDescriptor::int32());
//! let value = Value::list([Value::from(1i32), Value::from(2i32)]);
//!
//! let bytes = encode_cell(&desc, &value);
//! assert_eq!(&bytes[..4], &[0, 0, 0, 20]);
//!
//! let decoded = decode_cell(&desc, &bytes).expect("well-formed cell");
//! assert_eq!(decoded, value);
//! assert_eq!(decoded.to_string(), "list:[int32:1, int32:2]");
//! ```
//!
//! ## Key Types
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Value`] | Tagged payload: null, scalar, or collection of values |
//! | [`TypeDescriptor`] | Data type tree driving the codec |
//! | [`Decimal`] | Arbitrary precision decimal with comparable and big-decimal encodings |
//! | [`Timestamp`] | Microseconds since the Unix epoch |
//! | [`CodecConfig`] | Decoder limits |
//!
//! ## Modules Overview
//!
//! - [`value`] - value container, comparison and text rendering
//! - [`codec`] - CQL protocol cells
//! - [`types`] - data type identifiers and descriptors
//! - [`decimal`] - decimal encodings
//! - [`timestamp`] - timestamp precision and formatting
//! - [`config`] - precision constants and codec limits

/// CQL protocol cell encoding and decoding.
pub mod codec;
/// Precision constants and decoder limits.
pub mod config;
/// Arbitrary precision decimals.
pub mod decimal;
/// Timestamps and precision adjustment.
pub mod timestamp;
/// Data types and type descriptors.
pub mod types;
/// The dynamically typed value container.
pub mod value;

pub use codec::{
    decode_cell, deserialize, deserialize_with, encode_cell, serialize, CellWriter, Cursor,
    DecodeError,
};
pub use config::CodecConfig;
pub use decimal::{Decimal, DecimalError};
pub use timestamp::Timestamp;
pub use types::{DataType, TypeDescriptor};
pub use value::{MapValue, Value, ValueKind};
