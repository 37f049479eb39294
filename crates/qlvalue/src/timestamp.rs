// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Timestamps and precision adjustment.

use crate::config::{INTERNAL_PRECISION, WIRE_PRECISION};
use chrono::DateTime;
use std::fmt;

/// Point in time, microseconds since the Unix epoch (UTC).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    pub const fn from_micros(micros: i64) -> Self {
        Self(micros)
    }

    pub fn from_millis(millis: i64) -> Self {
        Self(adjust_precision(millis, WIRE_PRECISION, INTERNAL_PRECISION))
    }

    pub const fn micros(self) -> i64 {
        self.0
    }

    /// `YYYY-MM-DD HH:MM:SS.ffffff+0000`, or the raw microsecond count when
    /// the instant is outside the calendar range.
    pub fn to_formatted_string(self) -> String {
        match DateTime::from_timestamp_micros(self.0) {
            Some(dt) => dt.format("%Y-%m-%d %H:%M:%S%.6f%z").to_string(),
            None => self.0.to_string(),
        }
    }
}

impl From<i64> for Timestamp {
    fn from(micros: i64) -> Self {
        Self(micros)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_formatted_string())
    }
}

/// Convert `value` from `from` to `to` decimal digits of sub-second precision.
///
/// Going coarser truncates toward zero; going finer saturates at the `i64`
/// bounds.
pub fn adjust_precision(value: i64, from: u32, to: u32) -> i64 {
    if from < to {
        value.saturating_mul(10i64.pow(to - from))
    } else {
        value / 10i64.pow(from - to)
    }
}
