// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Ordering between values of the same kind.
//!
//! [`Value::compare_to`] is the total order used by execution, indexes and
//! key encoding. Booleans and collections have no order at this layer;
//! asking for one is a caller defect and panics.
//!
//! The `sql_*` predicates follow SQL null semantics: any comparison with a
//! null operand is `false`.

use super::{Value, ValueKind};
use std::cmp::Ordering;
use uuid::Uuid;

fn generic_compare<T: PartialOrd>(lhs: &T, rhs: &T) -> Ordering {
    if lhs < rhs {
        Ordering::Less
    } else if lhs > rhs {
        Ordering::Greater
    } else {
        Ordering::Equal
    }
}

/// 60-bit creation time of a version-1 UUID.
fn timeuuid_ticks(uuid: &Uuid) -> u64 {
    let b = uuid.as_bytes();
    let time_low = u64::from(u32::from_be_bytes([b[0], b[1], b[2], b[3]]));
    let time_mid = u64::from(u16::from_be_bytes([b[4], b[5]]));
    let time_hi = u64::from(u16::from_be_bytes([b[6], b[7]]) & 0x0FFF);
    (time_hi << 48) | (time_mid << 32) | time_low
}

/// Order time UUIDs by creation time, then by their bytes.
fn compare_timeuuid(lhs: &Uuid, rhs: &Uuid) -> Ordering {
    timeuuid_ticks(lhs)
        .cmp(&timeuuid_ticks(rhs))
        .then_with(|| lhs.as_bytes().cmp(rhs.as_bytes()))
}

impl Value {
    /// Compare two non-null values of the same kind.
    ///
    /// Floats compare numerically; a pair involving NaN is neither less nor
    /// greater and yields `Equal`.
    ///
    /// # Panics
    ///
    /// If the kinds differ, either side is null, or the kind is not
    /// orderable (bool, map, set, list).
    pub fn compare_to(&self, other: &Value) -> Ordering {
        assert_eq!(
            self.kind(),
            other.kind(),
            "internal error: cannot compare {} with {}",
            self.kind().name(),
            other.kind().name()
        );
        match (self, other) {
            (Self::Int8(a), Self::Int8(b)) => a.cmp(b),
            (Self::Int16(a), Self::Int16(b)) => a.cmp(b),
            (Self::Int32(a), Self::Int32(b)) => a.cmp(b),
            (Self::Int64(a), Self::Int64(b)) => a.cmp(b),
            (Self::Float(a), Self::Float(b)) => generic_compare(a, b),
            (Self::Double(a), Self::Double(b)) => generic_compare(a, b),
            // Comparable decimal encoding sorts bytewise.
            (Self::Decimal(a), Self::Decimal(b)) => a.as_slice().cmp(b.as_slice()),
            (Self::String(a), Self::String(b)) => a.as_bytes().cmp(b.as_bytes()),
            (Self::Binary(a), Self::Binary(b)) => a.as_slice().cmp(b.as_slice()),
            (Self::Timestamp(a), Self::Timestamp(b)) => a.cmp(b),
            (Self::Inet(a), Self::Inet(b)) => a.cmp(b),
            (Self::Uuid(a), Self::Uuid(b)) => a.cmp(b),
            (Self::TimeUuid(a), Self::TimeUuid(b)) => compare_timeuuid(a, b),
            (Self::Bool(_), _) => panic!("internal error: bool type not comparable"),
            (Self::Map(_), _) | (Self::Set(_), _) | (Self::List(_), _) => {
                panic!("internal error: collection types are not comparable")
            }
            (Self::Null, _) => panic!("internal error: value should not be null"),
            _ => unreachable!("kinds checked above"),
        }
    }

    /// Check if both operands are non-null.
    pub fn both_not_null(lhs: &Value, rhs: &Value) -> bool {
        !lhs.is_null() && !rhs.is_null()
    }

    /// Check if the kinds can be passed to [`Value::compare_to`].
    pub fn comparable(lhs: &Value, rhs: &Value) -> bool {
        lhs.kind() == rhs.kind()
            && !matches!(
                lhs.kind(),
                ValueKind::Null | ValueKind::Bool | ValueKind::Map | ValueKind::Set | ValueKind::List
            )
    }

    fn sql_compare(&self, other: &Value, accept: fn(Ordering) -> bool) -> bool {
        Self::both_not_null(self, other) && accept(self.compare_to(other))
    }

    /// `self < other`, `false` if either side is null.
    pub fn sql_lt(&self, other: &Value) -> bool {
        self.sql_compare(other, Ordering::is_lt)
    }

    /// `self > other`, `false` if either side is null.
    pub fn sql_gt(&self, other: &Value) -> bool {
        self.sql_compare(other, Ordering::is_gt)
    }

    /// `self <= other`, `false` if either side is null.
    pub fn sql_le(&self, other: &Value) -> bool {
        self.sql_compare(other, Ordering::is_le)
    }

    /// `self >= other`, `false` if either side is null.
    pub fn sql_ge(&self, other: &Value) -> bool {
        self.sql_compare(other, Ordering::is_ge)
    }

    /// `self == other`, `false` if either side is null.
    pub fn sql_eq(&self, other: &Value) -> bool {
        self.sql_compare(other, Ordering::is_eq)
    }

    /// `self != other`, `false` if either side is null.
    pub fn sql_ne(&self, other: &Value) -> bool {
        self.sql_compare(other, Ordering::is_ne)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decimal::Decimal;
    use crate::timestamp::Timestamp;
    use std::net::{IpAddr, Ipv4Addr, Ipv6Addr};

    fn time_uuid(ticks: u64, tail: u8) -> Uuid {
        let mut b = [tail; 16];
        b[0..4].copy_from_slice(&(ticks as u32).to_be_bytes());
        b[4..6].copy_from_slice(&((ticks >> 32) as u16).to_be_bytes());
        b[6..8].copy_from_slice(&((((ticks >> 48) as u16) & 0x0FFF) | 0x1000).to_be_bytes());
        b[8] = 0x80 | (tail & 0x3F);
        Uuid::from_bytes(b)
    }

    #[test]
    fn test_numeric_order() {
        assert_eq!(Value::from(-1i8).compare_to(&Value::from(1i8)), Ordering::Less);
        assert_eq!(Value::from(300i16).compare_to(&Value::from(300i16)), Ordering::Equal);
        assert_eq!(Value::from(i64::MAX).compare_to(&Value::from(0i64)), Ordering::Greater);
        assert_eq!(Value::from(-0.5f32).compare_to(&Value::from(0.25f32)), Ordering::Less);
        assert_eq!(Value::from(0.0f64).compare_to(&Value::from(-0.0f64)), Ordering::Equal);
        assert_eq!(Value::from(f64::NAN).compare_to(&Value::from(1.0f64)), Ordering::Equal);
    }

    #[test]
    fn test_bytewise_kinds() {
        assert_eq!(Value::from("abc").compare_to(&Value::from("abd")), Ordering::Less);
        assert_eq!(Value::from("ab").compare_to(&Value::from("abc")), Ordering::Less);
        assert_eq!(Value::from("b").compare_to(&Value::from("abc")), Ordering::Greater);
        assert_eq!(
            Value::from(vec![0xFFu8]).compare_to(&Value::from(vec![0x00u8, 0x01])),
            Ordering::Greater
        );

        let small = Value::from("-2.5".parse::<Decimal>().expect("decimal"));
        let large = Value::from("10".parse::<Decimal>().expect("decimal"));
        assert_eq!(small.compare_to(&large), Ordering::Less);
    }

    #[test]
    fn test_fixed_width_kinds() {
        assert_eq!(
            Value::from(Timestamp::from_micros(5)).compare_to(&Value::from(Timestamp::from_micros(-5))),
            Ordering::Greater
        );
        let a = Value::from(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 1)));
        let b = Value::from(IpAddr::V4(Ipv4Addr::new(10, 0, 0, 2)));
        let c = Value::from(IpAddr::V6(Ipv6Addr::LOCALHOST));
        assert_eq!(a.compare_to(&b), Ordering::Less);
        assert_eq!(b.compare_to(&c), Ordering::Less);
        assert_eq!(
            Value::from(Uuid::from_u128(1)).compare_to(&Value::from(Uuid::from_u128(2))),
            Ordering::Less
        );
    }

    #[test]
    fn test_timeuuid_orders_by_time_first() {
        // later tick, smaller trailing bytes
        let early = Value::TimeUuid(time_uuid(1_000, 0xFF));
        let late = Value::TimeUuid(time_uuid(2_000, 0x00));
        assert_eq!(early.compare_to(&late), Ordering::Less);
        // high time bits dominate the low word
        let hi = Value::TimeUuid(time_uuid(1 << 48, 0));
        let lo = Value::TimeUuid(time_uuid(u64::from(u32::MAX), 0));
        assert_eq!(hi.compare_to(&lo), Ordering::Greater);
    }

    #[test]
    #[should_panic(expected = "bool type not comparable")]
    fn test_bool_not_comparable() {
        let _ = Value::from(true).compare_to(&Value::from(false));
    }

    #[test]
    #[should_panic(expected = "collection types are not comparable")]
    fn test_list_not_comparable() {
        let _ = Value::list([]).compare_to(&Value::list([]));
    }

    #[test]
    #[should_panic(expected = "cannot compare int32 with int64")]
    fn test_kind_mismatch_panics() {
        let _ = Value::from(1i32).compare_to(&Value::from(1i64));
    }

    #[test]
    #[should_panic(expected = "value should not be null")]
    fn test_null_compare_panics() {
        let _ = Value::Null.compare_to(&Value::Null);
    }

    #[test]
    fn test_sql_predicates() {
        let one = Value::from(1i32);
        let two = Value::from(2i32);
        assert!(one.sql_lt(&two));
        assert!(one.sql_le(&two));
        assert!(two.sql_gt(&one));
        assert!(two.sql_ge(&two));
        assert!(one.sql_eq(&one));
        assert!(one.sql_ne(&two));
        assert!(!one.sql_eq(&two));
    }

    #[test]
    fn test_sql_predicates_with_null_are_false() {
        let one = Value::from(1i32);
        let null = Value::Null;
        for (a, b) in [(&one, &null), (&null, &one), (&null, &null)] {
            assert!(!a.sql_lt(b));
            assert!(!a.sql_gt(b));
            assert!(!a.sql_le(b));
            assert!(!a.sql_ge(b));
            assert!(!a.sql_eq(b));
            assert!(!a.sql_ne(b));
        }
    }

    #[test]
    fn test_comparable() {
        assert!(Value::comparable(&Value::from(1i32), &Value::from(2i32)));
        assert!(!Value::comparable(&Value::from(1i32), &Value::from(2i64)));
        assert!(!Value::comparable(&Value::from(true), &Value::from(false)));
        assert!(!Value::comparable(&Value::Null, &Value::Null));
    }
}
