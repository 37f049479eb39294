// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Diagnostic rendering: `<kind>:<value>`, collections recursively.

use super::Value;
use crate::decimal::Decimal;
use std::fmt;

fn write_hex(f: &mut fmt::Formatter<'_>, bytes: &[u8]) -> fmt::Result {
    for b in bytes {
        write!(f, "{:02x}", b)?;
    }
    Ok(())
}

fn write_elems(f: &mut fmt::Formatter<'_>, elems: &[Value]) -> fmt::Result {
    for (i, elem) in elems.iter().enumerate() {
        if i > 0 {
            f.write_str(", ")?;
        }
        write!(f, "{}", elem)?;
    }
    Ok(())
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = self.kind().name();
        match self {
            Self::Null => f.write_str("null"),
            Self::Int8(v) => write!(f, "{}:{}", name, v),
            Self::Int16(v) => write!(f, "{}:{}", name, v),
            Self::Int32(v) => write!(f, "{}:{}", name, v),
            Self::Int64(v) => write!(f, "{}:{}", name, v),
            Self::Float(v) => write!(f, "{}:{}", name, v),
            Self::Double(v) => write!(f, "{}:{}", name, v),
            Self::Decimal(bytes) => match Decimal::decode_comparable(bytes) {
                Ok(d) => write!(f, "{}:{}", name, d),
                // Diagnostics must not fail on a corrupt payload.
                Err(_) => {
                    write!(f, "{}:<invalid 0x", name)?;
                    write_hex(f, bytes)?;
                    f.write_str(">")
                }
            },
            Self::String(s) => write!(f, "{}:{:?}", name, s),
            Self::Bool(v) => write!(f, "{}:{}", name, v),
            Self::Timestamp(ts) => write!(f, "{}:{}", name, ts),
            Self::Binary(bytes) => {
                write!(f, "{}:0x", name)?;
                write_hex(f, bytes)
            }
            Self::Inet(addr) => write!(f, "{}:{}", name, addr),
            Self::Uuid(u) | Self::TimeUuid(u) => write!(f, "{}:{}", name, u.hyphenated()),
            Self::Map(map) => {
                write!(f, "{}:{{", name)?;
                for (i, (k, v)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{} -> {}", k, v)?;
                }
                f.write_str("}")
            }
            Self::Set(elems) => {
                write!(f, "{}:{{", name)?;
                write_elems(f, elems)?;
                f.write_str("}")
            }
            Self::List(elems) => {
                write!(f, "{}:[", name)?;
                write_elems(f, elems)?;
                f.write_str("]")
            }
        }
    }
}
