// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Dynamically typed query values.
//!
//! [`Value`] holds exactly one payload (or none, for null). Typed getters
//! panic when another kind is active: reading the wrong kind is a caller
//! defect, not a data error, and returning a zeroed value would hide it.
//!
//! ```rust
//! use qlvalue::{Value, ValueKind};
//!
//! let mut v = Value::Null;
//! v.set_map_value();
//! v.add_map_key(Value::from(1i32));
//! v.add_map_value(Value::from("one"));
//! assert_eq!(v.kind(), ValueKind::Map);
//! assert_eq!(v.to_string(), "map:{int32:1 -> string:\"one\"}");
//! ```

mod compare;
mod format;

use crate::decimal::{Decimal, DecimalError};
use crate::timestamp::Timestamp;
use std::net::IpAddr;
use uuid::Uuid;

/// Active payload tag of a [`Value`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueKind {
    Null,
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
}

impl ValueKind {
    /// Name used by the text formatter.
    pub fn name(self) -> &'static str {
        match self {
            Self::Null => "null",
            Self::Int8 => "int8",
            Self::Int16 => "int16",
            Self::Int32 => "int32",
            Self::Int64 => "int64",
            Self::Float => "float",
            Self::Double => "double",
            Self::Decimal => "decimal",
            Self::String => "string",
            Self::Bool => "bool",
            Self::Timestamp => "timestamp",
            Self::Binary => "binary",
            Self::Inet => "inetaddress",
            Self::Uuid => "uuid",
            Self::TimeUuid => "timeuuid",
            Self::Map => "map",
            Self::Set => "set",
            Self::List => "list",
        }
    }
}

/// Map payload: keys and values in insertion order.
///
/// Builders append keys and values separately, so the two sides may
/// briefly differ in length; they must match by the time the map is
/// encoded or formatted.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MapValue {
    keys: Vec<Value>,
    values: Vec<Value>,
}

impl MapValue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a key/value pair.
    pub fn insert(&mut self, key: Value, value: Value) {
        self.keys.push(key);
        self.values.push(value);
    }

    pub fn keys(&self) -> &[Value] {
        &self.keys
    }

    pub fn values(&self) -> &[Value] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }

    /// Iterate over pairs in insertion order.
    ///
    /// # Panics
    ///
    /// If keys and values differ in count.
    pub fn iter(&self) -> impl Iterator<Item = (&Value, &Value)> {
        assert_eq!(
            self.keys.len(),
            self.values.len(),
            "internal error: map has {} keys but {} values",
            self.keys.len(),
            self.values.len()
        );
        self.keys.iter().zip(self.values.iter())
    }
}

impl FromIterator<(Value, Value)> for MapValue {
    fn from_iter<I: IntoIterator<Item = (Value, Value)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (k, v) in iter {
            map.insert(k, v);
        }
        map
    }
}

/// A query value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,

    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    /// Canonical comparable encoding, see [`crate::decimal`].
    Decimal(Vec<u8>),
    String(String),
    Bool(bool),
    Timestamp(Timestamp),
    Binary(Vec<u8>),
    Inet(IpAddr),
    Uuid(Uuid),
    /// Version-1 (time-based) UUID.
    TimeUuid(Uuid),

    Map(MapValue),
    Set(Vec<Value>),
    List(Vec<Value>),
}

/// Generate a panicking getter and a setter for a `Copy` scalar payload.
macro_rules! impl_scalar_access {
    ($get:ident, $set:ident, $variant:ident, $ty:ty) => {
        #[doc = concat!("Get the `", stringify!($variant), "` payload.")]
        ///
        /// # Panics
        ///
        /// If another kind is active.
        pub fn $get(&self) -> $ty {
            match self {
                Self::$variant(v) => *v,
                other => other.wrong_kind(ValueKind::$variant),
            }
        }

        #[doc = concat!("Make `", stringify!($variant), "` the active payload.")]
        pub fn $set(&mut self, v: $ty) {
            *self = Self::$variant(v);
        }
    };
}

/// Generate a panicking borrow getter and a setter for an owned payload.
macro_rules! impl_owned_access {
    ($get:ident, $set:ident, $variant:ident, $ref_ty:ty, $ty:ty) => {
        #[doc = concat!("Borrow the `", stringify!($variant), "` payload.")]
        ///
        /// # Panics
        ///
        /// If another kind is active.
        pub fn $get(&self) -> &$ref_ty {
            match self {
                Self::$variant(v) => v,
                other => other.wrong_kind(ValueKind::$variant),
            }
        }

        #[doc = concat!("Make `", stringify!($variant), "` the active payload.")]
        pub fn $set(&mut self, v: impl Into<$ty>) {
            *self = Self::$variant(v.into());
        }
    };
}

impl Value {
    /// Active payload tag.
    pub fn kind(&self) -> ValueKind {
        match self {
            Self::Null => ValueKind::Null,
            Self::Int8(_) => ValueKind::Int8,
            Self::Int16(_) => ValueKind::Int16,
            Self::Int32(_) => ValueKind::Int32,
            Self::Int64(_) => ValueKind::Int64,
            Self::Float(_) => ValueKind::Float,
            Self::Double(_) => ValueKind::Double,
            Self::Decimal(_) => ValueKind::Decimal,
            Self::String(_) => ValueKind::String,
            Self::Bool(_) => ValueKind::Bool,
            Self::Timestamp(_) => ValueKind::Timestamp,
            Self::Binary(_) => ValueKind::Binary,
            Self::Inet(_) => ValueKind::Inet,
            Self::Uuid(_) => ValueKind::Uuid,
            Self::TimeUuid(_) => ValueKind::TimeUuid,
            Self::Map(_) => ValueKind::Map,
            Self::Set(_) => ValueKind::Set,
            Self::List(_) => ValueKind::List,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Clear the active payload.
    pub fn set_null(&mut self) {
        *self = Self::Null;
    }

    #[track_caller]
    fn wrong_kind(&self, wanted: ValueKind) -> ! {
        panic!(
            "internal error: requested {} value but {} is active",
            wanted.name(),
            self.kind().name()
        )
    }

    impl_scalar_access!(int8_value, set_int8_value, Int8, i8);
    impl_scalar_access!(int16_value, set_int16_value, Int16, i16);
    impl_scalar_access!(int32_value, set_int32_value, Int32, i32);
    impl_scalar_access!(int64_value, set_int64_value, Int64, i64);
    impl_scalar_access!(float_value, set_float_value, Float, f32);
    impl_scalar_access!(double_value, set_double_value, Double, f64);
    impl_scalar_access!(bool_value, set_bool_value, Bool, bool);
    impl_scalar_access!(timestamp_value, set_timestamp_value, Timestamp, Timestamp);
    impl_scalar_access!(inetaddress_value, set_inetaddress_value, Inet, IpAddr);
    impl_scalar_access!(uuid_value, set_uuid_value, Uuid, Uuid);
    impl_scalar_access!(timeuuid_value, set_timeuuid_value, TimeUuid, Uuid);

    impl_owned_access!(string_value, set_string_value, String, str, String);
    impl_owned_access!(binary_value, set_binary_value, Binary, [u8], Vec<u8>);
    impl_owned_access!(decimal_value, set_decimal_value, Decimal, [u8], Vec<u8>);

    /// Store `decimal` in its comparable form.
    pub fn set_decimal(&mut self, decimal: &Decimal) {
        *self = Self::Decimal(decimal.encode_comparable());
    }

    /// Parse a decimal literal and store it.
    pub fn set_decimal_from_str(&mut self, text: &str) -> Result<(), DecimalError> {
        let decimal: Decimal = text.parse()?;
        self.set_decimal(&decimal);
        Ok(())
    }

    /// Decode the active decimal payload.
    ///
    /// # Panics
    ///
    /// If another kind is active.
    pub fn decimal(&self) -> Result<Decimal, DecimalError> {
        Decimal::decode_comparable(self.decimal_value())
    }

    // Collections

    /// Borrow the map payload.
    ///
    /// # Panics
    ///
    /// If another kind is active.
    pub fn map_value(&self) -> &MapValue {
        match self {
            Self::Map(m) => m,
            other => other.wrong_kind(ValueKind::Map),
        }
    }

    /// Borrow the set payload.
    ///
    /// # Panics
    ///
    /// If another kind is active.
    pub fn set_value(&self) -> &[Value] {
        match self {
            Self::Set(s) => s,
            other => other.wrong_kind(ValueKind::Set),
        }
    }

    /// Borrow the list payload.
    ///
    /// # Panics
    ///
    /// If another kind is active.
    pub fn list_value(&self) -> &[Value] {
        match self {
            Self::List(l) => l,
            other => other.wrong_kind(ValueKind::List),
        }
    }

    /// Begin an empty map.
    pub fn set_map_value(&mut self) {
        *self = Self::Map(MapValue::new());
    }

    /// Begin an empty set.
    pub fn set_set_value(&mut self) {
        *self = Self::Set(Vec::new());
    }

    /// Begin an empty list.
    pub fn set_list_value(&mut self) {
        *self = Self::List(Vec::new());
    }

    fn map_mut(&mut self) -> &mut MapValue {
        if !matches!(self, Self::Map(_)) {
            self.set_map_value();
        }
        match self {
            Self::Map(m) => m,
            _ => unreachable!(),
        }
    }

    /// Append a map key, switching to an empty map first if needed.
    pub fn add_map_key(&mut self, key: Value) {
        self.map_mut().keys.push(key);
    }

    /// Append a map value, switching to an empty map first if needed.
    pub fn add_map_value(&mut self, value: Value) {
        self.map_mut().values.push(value);
    }

    /// Append a set element, switching to an empty set first if needed.
    pub fn add_set_elem(&mut self, elem: Value) {
        match self {
            Self::Set(s) => s.push(elem),
            _ => *self = Self::Set(vec![elem]),
        }
    }

    /// Append a list element, switching to an empty list first if needed.
    pub fn add_list_elem(&mut self, elem: Value) {
        match self {
            Self::List(l) => l.push(elem),
            _ => *self = Self::List(vec![elem]),
        }
    }

    /// Map from pairs.
    pub fn map<I: IntoIterator<Item = (Value, Value)>>(pairs: I) -> Self {
        Self::Map(pairs.into_iter().collect())
    }

    /// Set from elements (kept in the given order).
    pub fn set<I: IntoIterator<Item = Value>>(elems: I) -> Self {
        Self::Set(elems.into_iter().collect())
    }

    /// List from elements.
    pub fn list<I: IntoIterator<Item = Value>>(elems: I) -> Self {
        Self::List(elems.into_iter().collect())
    }
}

// Conversion traits
macro_rules! impl_from_scalar {
    ($ty:ty, $variant:ident) => {
        impl From<$ty> for Value {
            fn from(v: $ty) -> Self {
                Self::$variant(v)
            }
        }
    };
}

impl_from_scalar!(i8, Int8);
impl_from_scalar!(i16, Int16);
impl_from_scalar!(i32, Int32);
impl_from_scalar!(i64, Int64);
impl_from_scalar!(f32, Float);
impl_from_scalar!(f64, Double);
impl_from_scalar!(bool, Bool);
impl_from_scalar!(String, String);
impl_from_scalar!(Vec<u8>, Binary);
impl_from_scalar!(Timestamp, Timestamp);
impl_from_scalar!(IpAddr, Inet);
impl_from_scalar!(Uuid, Uuid);

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<&[u8]> for Value {
    fn from(v: &[u8]) -> Self {
        Self::Binary(v.to_vec())
    }
}

impl From<&Decimal> for Value {
    fn from(v: &Decimal) -> Self {
        Self::Decimal(v.encode_comparable())
    }
}

impl From<Decimal> for Value {
    fn from(v: Decimal) -> Self {
        Self::from(&v)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        v.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::net::Ipv4Addr;

    #[test]
    fn test_scalar_access() {
        let mut v = Value::Null;
        assert!(v.is_null());
        assert_eq!(v.kind(), ValueKind::Null);

        v.set_int32_value(42);
        assert_eq!(v.kind(), ValueKind::Int32);
        assert_eq!(v.int32_value(), 42);

        v.set_string_value("hello");
        assert_eq!(v.string_value(), "hello");

        v.set_binary_value(vec![1u8, 2]);
        assert_eq!(v.binary_value(), &[1, 2]);

        v.set_inetaddress_value(IpAddr::V4(Ipv4Addr::LOCALHOST));
        assert_eq!(v.inetaddress_value(), IpAddr::V4(Ipv4Addr::LOCALHOST));

        v.set_null();
        assert!(v.is_null());
    }

    #[test]
    #[should_panic(expected = "requested int64 value but int32 is active")]
    fn test_getter_wrong_kind_panics() {
        let v = Value::from(1i32);
        let _ = v.int64_value();
    }

    #[test]
    #[should_panic(expected = "requested string value but null is active")]
    fn test_getter_on_null_panics() {
        let _ = Value::Null.string_value();
    }

    #[test]
    fn test_decimal_helpers() {
        let mut v = Value::Null;
        v.set_decimal_from_str("-12.50").expect("parse");
        assert_eq!(v.kind(), ValueKind::Decimal);
        assert_eq!(v.decimal().expect("decode").to_string(), "-12.5");
        assert!(v.set_decimal_from_str("twelve").is_err());
    }

    #[test]
    fn test_map_builders() {
        let mut v = Value::from(7i64);
        v.add_map_key(Value::from(1i32));
        v.add_map_value(Value::from("a"));
        v.add_map_key(Value::from(2i32));
        v.add_map_value(Value::from("b"));

        let map = v.map_value();
        assert_eq!(map.len(), 2);
        let pairs: Vec<_> = map.iter().map(|(k, v)| (k.int32_value(), v.string_value())).collect();
        assert_eq!(pairs, vec![(1, "a"), (2, "b")]);
    }

    #[test]
    fn test_set_and_list_builders() {
        let mut s = Value::Null;
        s.set_set_value();
        assert!(s.set_value().is_empty());
        s.add_set_elem(Value::from(3i32));
        s.add_set_elem(Value::from(1i32));
        assert_eq!(s.set_value(), &[Value::from(3i32), Value::from(1i32)]);

        let mut l = Value::from("x");
        l.add_list_elem(Value::Null);
        assert_eq!(l.kind(), ValueKind::List);
        assert_eq!(l.list_value().len(), 1);
    }

    #[test]
    #[should_panic(expected = "map has 2 keys but 1 values")]
    fn test_unbalanced_map_iteration_panics() {
        let mut v = Value::Null;
        v.add_map_key(Value::from(1i32));
        v.add_map_key(Value::from(2i32));
        v.add_map_value(Value::from(1i32));
        let _ = v.map_value().iter().count();
    }

    #[test]
    fn test_conversions() {
        assert_eq!(Value::from(Some(5i8)), Value::Int8(5));
        assert_eq!(Value::from(None::<i8>), Value::Null);
        assert_eq!(Value::from(&b"ab"[..]), Value::Binary(vec![b'a', b'b']));
        assert_eq!(
            Value::list([1i32, 2].map(Value::from)),
            Value::List(vec![Value::Int32(1), Value::Int32(2)])
        );
    }
}
