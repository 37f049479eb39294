// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! CQL protocol cells for [`Value`].
//!
//! Every value is a cell: a 4-byte signed big-endian length and that many
//! content bytes, or length `-1` and no content for null. The type
//! descriptor drives both directions; collections recurse into their
//! parameter types.
//!
//! ```text
//! int32 -1        00 00 00 04 | FF FF FF FF
//! list<int> [1,2] 00 00 00 14 | 00 00 00 02 | 00 00 00 04 00 00 00 01 | 00 00 00 04 00 00 00 02
//! null            FF FF FF FF
//! ```
//!
//! Decoding untrusted bytes returns [`DecodeError`]. Encoding a value whose
//! kind does not match the descriptor, or a kind this codec does not
//! implement, panics: both are caller defects.

pub mod cursor;

use crate::config::{CodecConfig, INTERNAL_PRECISION, WIRE_PRECISION};
use crate::decimal::{Decimal, DecimalError};
use crate::timestamp::{adjust_precision, Timestamp};
use crate::types::{DataType, TypeDescriptor};
use crate::value::{MapValue, Value};
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};
use uuid::Uuid;

pub use cursor::{CellWriter, Cursor, LengthSlot};

/// Extract a `Copy` payload or panic on a kind mismatch.
macro_rules! payload {
    ($desc:expr, $value:expr, $variant:ident) => {
        match $value {
            Value::$variant(v) => *v,
            other => mismatch($desc, other),
        }
    };
}

/// Borrow a payload or panic on a kind mismatch.
macro_rules! payload_ref {
    ($desc:expr, $value:expr, $variant:ident) => {
        match $value {
            Value::$variant(v) => v,
            other => mismatch($desc, other),
        }
    };
}

/// Length field value marking a null cell.
pub const NULL_LENGTH: i32 = -1;

/// Errors for cell decoding.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("truncated input at offset {offset}: need {need} bytes, have {have}")]
    Truncated {
        offset: usize,
        need: usize,
        have: usize,
    },
    #[error("invalid {kind} cell length {len} at offset {offset}")]
    InvalidLength {
        offset: usize,
        kind: DataType,
        len: i32,
    },
    #[error("invalid UTF-8 in text cell at offset {offset}")]
    InvalidUtf8 { offset: usize },
    #[error("uuid at offset {offset} is not time-based (version {version})")]
    NotTimeUuid { offset: usize, version: usize },
    #[error("invalid decimal at offset {offset}: {source}")]
    InvalidDecimal {
        offset: usize,
        source: DecimalError,
    },
    #[error("decimal cell of {len} bytes at offset {offset} exceeds the {max}-byte limit")]
    DecimalTooLarge { offset: usize, len: usize, max: usize },
    #[error("negative element count {count} at offset {offset}")]
    NegativeCount { offset: usize, count: i32 },
    #[error("collection nesting exceeds {max} levels")]
    TooDeep { max: usize },
    #[error("collection cell at offset {offset} declares {declared} bytes but elements use {consumed}")]
    LengthMismatch {
        offset: usize,
        declared: usize,
        consumed: usize,
    },
    #[error("{0} trailing bytes after cell")]
    TrailingBytes(usize),
}

/// Encode `value` as one cell of type `desc`.
///
/// # Panics
///
/// If the value's kind does not match `desc`, if `desc` is a kind without
/// codec support, or if a time UUID is not version 1.
pub fn serialize(desc: &TypeDescriptor, value: &Value, writer: &mut CellWriter) {
    if value.is_null() {
        writer.write_i32(NULL_LENGTH);
        return;
    }

    match desc.kind {
        DataType::Int8 => {
            writer.write_length(1);
            writer.write_i8(payload!(desc, value, Int8));
        }
        DataType::Int16 => {
            writer.write_length(2);
            writer.write_i16(payload!(desc, value, Int16));
        }
        DataType::Int32 => {
            writer.write_length(4);
            writer.write_i32(payload!(desc, value, Int32));
        }
        DataType::Int64 => {
            writer.write_length(8);
            writer.write_i64(payload!(desc, value, Int64));
        }
        DataType::Float => {
            writer.write_length(4);
            writer.write_f32(payload!(desc, value, Float));
        }
        DataType::Double => {
            writer.write_length(8);
            writer.write_f64(payload!(desc, value, Double));
        }
        DataType::Decimal => {
            let comparable = payload_ref!(desc, value, Decimal);
            let decimal = Decimal::decode_comparable(comparable)
                .unwrap_or_else(|e| panic!("internal error: corrupt decimal payload: {}", e));
            let (bytes, out_of_range) = decimal.encode_serialized_big_decimal();
            if out_of_range {
                log::warn!(
                    "decimal {} exceeds the big-decimal scale range, encoding a clamped value",
                    decimal
                );
            }
            write_content(writer, &bytes);
        }
        DataType::String => write_content(writer, payload_ref!(desc, value, String).as_bytes()),
        DataType::Binary => write_content(writer, payload_ref!(desc, value, Binary)),
        DataType::Bool => {
            writer.write_length(1);
            writer.write_u8(u8::from(payload!(desc, value, Bool)));
        }
        DataType::Timestamp => {
            let ts: Timestamp = payload!(desc, value, Timestamp);
            writer.write_length(8);
            writer.write_i64(adjust_precision(
                ts.micros(),
                INTERNAL_PRECISION,
                WIRE_PRECISION,
            ));
        }
        DataType::Inet => match payload!(desc, value, Inet) {
            IpAddr::V4(addr) => write_content(writer, &addr.octets()),
            IpAddr::V6(addr) => write_content(writer, &addr.octets()),
        },
        DataType::Uuid => write_content(writer, payload!(desc, value, Uuid).as_bytes()),
        DataType::TimeUuid => {
            let uuid: Uuid = payload!(desc, value, TimeUuid);
            assert!(
                is_time_uuid(&uuid),
                "internal error: {} is not a time uuid",
                uuid
            );
            write_content(writer, uuid.as_bytes());
        }
        DataType::Map => {
            let map: &MapValue = payload_ref!(desc, value, Map);
            let (keys_type, values_type) = (desc.param(0), desc.param(1));
            let slot = writer.reserve_length();
            writer.write_length(map.len());
            for (k, v) in map.iter() {
                serialize(keys_type, k, writer);
                serialize(values_type, v, writer);
            }
            writer.finish_length(slot);
        }
        DataType::Set => {
            let elems = payload_ref!(desc, value, Set);
            serialize_sequence(desc.param(0), elems, writer);
        }
        DataType::List => {
            let elems = payload_ref!(desc, value, List);
            serialize_sequence(desc.param(0), elems, writer);
        }
        DataType::Varint
        | DataType::Tuple
        | DataType::TypeArgs
        | DataType::Null
        | DataType::Unknown
        | DataType::Uint8
        | DataType::Uint16
        | DataType::Uint32
        | DataType::Uint64 => unsupported(desc),
    }
}

/// Decode one cell of type `desc` with the default [`CodecConfig`].
pub fn deserialize(desc: &TypeDescriptor, cursor: &mut Cursor<'_>) -> Result<Value, DecodeError> {
    deserialize_with(&CodecConfig::default(), desc, cursor)
}

/// Decode one cell of type `desc`.
///
/// On error the cursor position is unspecified.
///
/// # Panics
///
/// If `desc` is a kind without codec support.
pub fn deserialize_with(
    config: &CodecConfig,
    desc: &TypeDescriptor,
    cursor: &mut Cursor<'_>,
) -> Result<Value, DecodeError> {
    decode_value(config, desc, cursor, 0)
}

/// Encode `value` into a fresh buffer.
pub fn encode_cell(desc: &TypeDescriptor, value: &Value) -> Vec<u8> {
    let mut writer = CellWriter::new();
    serialize(desc, value, &mut writer);
    writer.into_bytes()
}

/// Decode a buffer holding exactly one cell.
pub fn decode_cell(desc: &TypeDescriptor, bytes: &[u8]) -> Result<Value, DecodeError> {
    let mut cursor = Cursor::new(bytes);
    let value = deserialize(desc, &mut cursor)?;
    match cursor.remaining() {
        0 => Ok(value),
        extra => Err(DecodeError::TrailingBytes(extra)),
    }
}

impl Value {
    /// See [`serialize`].
    pub fn serialize(&self, desc: &TypeDescriptor, writer: &mut CellWriter) {
        serialize(desc, self, writer);
    }

    /// See [`deserialize`].
    pub fn deserialize(desc: &TypeDescriptor, cursor: &mut Cursor<'_>) -> Result<Self, DecodeError> {
        deserialize(desc, cursor)
    }
}

/// Version-1 UUIDs carry a creation timestamp.
pub fn is_time_uuid(uuid: &Uuid) -> bool {
    uuid.get_version_num() == 1
}

// Encoding helpers

#[track_caller]
fn mismatch(desc: &TypeDescriptor, value: &Value) -> ! {
    panic!(
        "internal error: cannot encode {} value as {}",
        value.kind().name(),
        desc
    )
}

#[track_caller]
fn unsupported(desc: &TypeDescriptor) -> ! {
    panic!("internal error: unsupported type {}", desc)
}

fn write_content(writer: &mut CellWriter, content: &[u8]) {
    writer.write_length(content.len());
    writer.write_bytes(content);
}

fn serialize_sequence(elem_type: &TypeDescriptor, elems: &[Value], writer: &mut CellWriter) {
    let slot = writer.reserve_length();
    writer.write_length(elems.len());
    for elem in elems {
        serialize(elem_type, elem, writer);
    }
    writer.finish_length(slot);
}

// Decoding helpers

fn decode_value(
    config: &CodecConfig,
    desc: &TypeDescriptor,
    cursor: &mut Cursor<'_>,
    depth: usize,
) -> Result<Value, DecodeError> {
    let len_offset = cursor.offset();
    let len = cursor.read_i32()?;
    if len == NULL_LENGTH {
        return Ok(Value::Null);
    }
    if len < 0 {
        return Err(DecodeError::InvalidLength {
            offset: len_offset,
            kind: desc.kind,
            len,
        });
    }
    let len = len as usize;
    let offset = cursor.offset();
    let kind = desc.kind;
    if let Some(width) = kind.fixed_width() {
        if len != width {
            return Err(DecodeError::InvalidLength {
                offset: len_offset,
                kind,
                len: len as i32,
            });
        }
    }

    let value = match kind {
        DataType::Int8 => Value::Int8(cursor.read_i8()?),
        DataType::Int16 => Value::Int16(cursor.read_i16()?),
        DataType::Int32 => Value::Int32(cursor.read_i32()?),
        DataType::Int64 => Value::Int64(cursor.read_i64()?),
        DataType::Float => Value::Float(cursor.read_f32()?),
        DataType::Double => Value::Double(cursor.read_f64()?),
        DataType::Decimal => {
            if len > config.max_decimal_bytes {
                return Err(DecodeError::DecimalTooLarge {
                    offset: len_offset,
                    len,
                    max: config.max_decimal_bytes,
                });
            }
            let bytes = cursor.read_bytes(len)?;
            let decimal = Decimal::decode_serialized_big_decimal(bytes)
                .map_err(|source| DecodeError::InvalidDecimal { offset, source })?;
            Value::Decimal(decimal.encode_comparable())
        }
        DataType::String => {
            let bytes = cursor.read_bytes(len)?;
            let text = String::from_utf8(bytes.to_vec())
                .map_err(|_| DecodeError::InvalidUtf8 { offset })?;
            Value::String(text)
        }
        DataType::Binary => Value::Binary(cursor.read_bytes(len)?.to_vec()),
        DataType::Bool => Value::Bool(cursor.read_u8()? != 0),
        DataType::Timestamp => {
            let wire = cursor.read_i64()?;
            Value::Timestamp(Timestamp::from_micros(adjust_precision(
                wire,
                WIRE_PRECISION,
                INTERNAL_PRECISION,
            )))
        }
        DataType::Inet => {
            let bytes = cursor.read_bytes(len)?;
            let addr = if let Ok(octets) = <[u8; 4]>::try_from(bytes) {
                IpAddr::V4(Ipv4Addr::from(octets))
            } else if let Ok(octets) = <[u8; 16]>::try_from(bytes) {
                IpAddr::V6(Ipv6Addr::from(octets))
            } else {
                return Err(DecodeError::InvalidLength {
                    offset: len_offset,
                    kind,
                    len: len as i32,
                });
            };
            Value::Inet(addr)
        }
        DataType::Uuid => Value::Uuid(read_uuid(cursor)?),
        DataType::TimeUuid => {
            let uuid = read_uuid(cursor)?;
            if !is_time_uuid(&uuid) {
                return Err(DecodeError::NotTimeUuid {
                    offset,
                    version: uuid.get_version_num(),
                });
            }
            Value::TimeUuid(uuid)
        }
        DataType::Map | DataType::Set | DataType::List => {
            if depth >= config.max_depth {
                return Err(DecodeError::TooDeep {
                    max: config.max_depth,
                });
            }
            let mut content = cursor.sub_cursor(len)?;
            let value = decode_collection(config, desc, &mut content, depth + 1)?;
            if !content.is_eof() {
                return Err(DecodeError::LengthMismatch {
                    offset: len_offset,
                    declared: len,
                    consumed: len - content.remaining(),
                });
            }
            value
        }
        DataType::Varint
        | DataType::Tuple
        | DataType::TypeArgs
        | DataType::Null
        | DataType::Unknown
        | DataType::Uint8
        | DataType::Uint16
        | DataType::Uint32
        | DataType::Uint64 => unsupported(desc),
    };
    Ok(value)
}

fn read_uuid(cursor: &mut Cursor<'_>) -> Result<Uuid, DecodeError> {
    let bytes = cursor.read_bytes(16)?;
    let mut raw = [0u8; 16];
    raw.copy_from_slice(bytes);
    Ok(Uuid::from_bytes(raw))
}

fn decode_collection(
    config: &CodecConfig,
    desc: &TypeDescriptor,
    cursor: &mut Cursor<'_>,
    depth: usize,
) -> Result<Value, DecodeError> {
    let count_offset = cursor.offset();
    let count = cursor.read_i32()?;
    if count < 0 {
        return Err(DecodeError::NegativeCount {
            offset: count_offset,
            count,
        });
    }
    let count = count as usize;
    // Every element cell is at least its 4-byte length.
    let capacity = count.min(cursor.remaining() / 4);

    let mut value = Value::Null;
    match desc.kind {
        DataType::Map => {
            let (keys_type, values_type) = (desc.param(0), desc.param(1));
            value.set_map_value();
            for _ in 0..count {
                let key = decode_value(config, keys_type, cursor, depth)?;
                value.add_map_key(key);
                let val = decode_value(config, values_type, cursor, depth)?;
                value.add_map_value(val);
            }
        }
        DataType::Set => {
            let elem_type = desc.param(0);
            let mut elems = Vec::with_capacity(capacity);
            for _ in 0..count {
                elems.push(decode_value(config, elem_type, cursor, depth)?);
            }
            value = Value::Set(elems);
        }
        DataType::List => {
            let elem_type = desc.param(0);
            let mut elems = Vec::with_capacity(capacity);
            for _ in 0..count {
                elems.push(decode_value(config, elem_type, cursor, depth)?);
            }
            value = Value::List(elems);
        }
        _ => unreachable!("decode_collection called for {}", desc),
    }
    Ok(value)
}
