// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Type descriptors supplied by the query layer.
//!
//! A descriptor is an immutable tree: a [`DataType`] plus the ordered
//! parameter descriptors of parametric kinds (`list<T>`, `set<T>`,
//! `map<K, V>`). The codec walks it recursively; this crate never mutates
//! one.

use std::fmt;
use std::sync::Arc;

/// Nominal type kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    Decimal,
    String,
    Bool,
    Timestamp,
    Binary,
    Inet,
    Uuid,
    TimeUuid,
    Map,
    Set,
    List,

    // Known to the query layer, no value support yet.
    Varint,
    Tuple,
    TypeArgs,
    Null,
    Unknown,

    // Storage-only kinds, never valid on the query protocol.
    Uint8,
    Uint16,
    Uint32,
    Uint64,
}

impl DataType {
    /// CQL spelling of the kind.
    pub fn cql_name(self) -> &'static str {
        match self {
            Self::Int8 => "tinyint",
            Self::Int16 => "smallint",
            Self::Int32 => "int",
            Self::Int64 => "bigint",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::String => "text",
            Self::Bool => "boolean",
            Self::Timestamp => "timestamp",
            Self::Binary => "blob",
            Self::Inet => "inet",
            Self::Uuid => "uuid",
            Self::TimeUuid => "timeuuid",
            Self::Map => "map",
            Self::Set => "set",
            Self::List => "list",
            Self::Varint => "varint",
            Self::Tuple => "tuple",
            Self::TypeArgs => "typeargs",
            Self::Null => "null",
            Self::Unknown => "unknown",
            Self::Uint8 => "uint8",
            Self::Uint16 => "uint16",
            Self::Uint32 => "uint32",
            Self::Uint64 => "uint64",
        }
    }

    /// Number of parameter descriptors the kind carries.
    pub fn param_count(self) -> usize {
        match self {
            Self::Map => 2,
            Self::Set | Self::List => 1,
            _ => 0,
        }
    }

    /// Content width in bytes for fixed-width kinds.
    pub fn fixed_width(self) -> Option<usize> {
        match self {
            Self::Int8 | Self::Bool => Some(1),
            Self::Int16 => Some(2),
            Self::Int32 | Self::Float => Some(4),
            Self::Int64 | Self::Double | Self::Timestamp => Some(8),
            Self::Uuid | Self::TimeUuid => Some(16),
            _ => None,
        }
    }
}

impl fmt::Display for DataType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cql_name())
    }
}

/// A complete type descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeDescriptor {
    /// Type kind.
    pub kind: DataType,
    /// Parameter types (list/set: element, map: key then value).
    pub params: Vec<Arc<TypeDescriptor>>,
}

impl TypeDescriptor {
    /// Create a non-parametric descriptor.
    pub fn new(kind: DataType) -> Self {
        Self {
            kind,
            params: Vec::new(),
        }
    }

    /// Create a descriptor with explicit parameters.
    ///
    /// # Panics
    ///
    /// If the parameter count does not match the kind.
    pub fn with_params(kind: DataType, params: Vec<Arc<TypeDescriptor>>) -> Self {
        assert_eq!(
            params.len(),
            kind.param_count(),
            "internal error: {} takes {} type parameter(s)",
            kind,
            kind.param_count()
        );
        Self { kind, params }
    }

    pub fn int8() -> Arc<Self> {
        Arc::new(Self::new(DataType::Int8))
    }

    pub fn int16() -> Arc<Self> {
        Arc::new(Self::new(DataType::Int16))
    }

    pub fn int32() -> Arc<Self> {
        Arc::new(Self::new(DataType::Int32))
    }

    pub fn int64() -> Arc<Self> {
        Arc::new(Self::new(DataType::Int64))
    }

    pub fn float() -> Arc<Self> {
        Arc::new(Self::new(DataType::Float))
    }

    pub fn double() -> Arc<Self> {
        Arc::new(Self::new(DataType::Double))
    }

    pub fn decimal() -> Arc<Self> {
        Arc::new(Self::new(DataType::Decimal))
    }

    pub fn string() -> Arc<Self> {
        Arc::new(Self::new(DataType::String))
    }

    pub fn bool() -> Arc<Self> {
        Arc::new(Self::new(DataType::Bool))
    }

    pub fn timestamp() -> Arc<Self> {
        Arc::new(Self::new(DataType::Timestamp))
    }

    pub fn binary() -> Arc<Self> {
        Arc::new(Self::new(DataType::Binary))
    }

    pub fn inet() -> Arc<Self> {
        Arc::new(Self::new(DataType::Inet))
    }

    pub fn uuid() -> Arc<Self> {
        Arc::new(Self::new(DataType::Uuid))
    }

    pub fn timeuuid() -> Arc<Self> {
        Arc::new(Self::new(DataType::TimeUuid))
    }

    /// `map<key, value>`.
    pub fn map(key: Arc<Self>, value: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::with_params(DataType::Map, vec![key, value]))
    }

    /// `set<elem>`.
    pub fn set(elem: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::with_params(DataType::Set, vec![elem]))
    }

    /// `list<elem>`.
    pub fn list(elem: Arc<Self>) -> Arc<Self> {
        Arc::new(Self::with_params(DataType::List, vec![elem]))
    }

    /// Get the n-th parameter.
    ///
    /// # Panics
    ///
    /// If the descriptor has fewer parameters; a malformed descriptor tree
    /// is a query-layer defect.
    pub fn param(&self, index: usize) -> &Arc<TypeDescriptor> {
        self.params.get(index).unwrap_or_else(|| {
            panic!(
                "internal error: type {} has no parameter #{}",
                self, index
            )
        })
    }
}

impl fmt::Display for TypeDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.kind.cql_name())?;
        if self.params.is_empty() {
            return Ok(());
        }
        f.write_str("<")?;
        for (i, param) in self.params.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}", param)?;
        }
        f.write_str(">")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_width() {
        assert_eq!(DataType::Int8.fixed_width(), Some(1));
        assert_eq!(DataType::Int32.fixed_width(), Some(4));
        assert_eq!(DataType::Double.fixed_width(), Some(8));
        assert_eq!(DataType::Uuid.fixed_width(), Some(16));
        assert_eq!(DataType::String.fixed_width(), None);
        assert_eq!(DataType::Inet.fixed_width(), None);
    }

    #[test]
    fn test_display_nested() {
        let desc = TypeDescriptor::map(
            TypeDescriptor::int32(),
            TypeDescriptor::list(TypeDescriptor::string()),
        );
        assert_eq!(desc.to_string(), "map<int, list<text>>");
        assert_eq!(desc.param(0).kind, DataType::Int32);
    }

    #[test]
    #[should_panic(expected = "takes 2 type parameter(s)")]
    fn test_map_requires_two_params() {
        let _ = TypeDescriptor::with_params(DataType::Map, vec![TypeDescriptor::int32()]);
    }

    #[test]
    #[should_panic(expected = "has no parameter")]
    fn test_missing_param() {
        let desc = TypeDescriptor::new(DataType::List);
        let _ = desc.param(0);
    }
}
