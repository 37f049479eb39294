// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright (c) 2025-2026 naskel.com

//! Codec configuration.
//!
//! - **Static**: precision constants shared by the codec and the formatter.
//!   Never hardcode them elsewhere.
//! - **Dynamic**: [`CodecConfig`], limits applied while decoding untrusted
//!   bytes.
//!
//! With feature `config-loaders`, a host can read the config from YAML:
//!
//! ```yaml
//! max_depth: 16
//! max_decimal_bytes: 1024
//! ```

/// Decimal digits of sub-second precision kept in memory (microseconds).
pub const INTERNAL_PRECISION: u32 = 6;

/// Decimal digits of sub-second precision on the wire (milliseconds).
pub const WIRE_PRECISION: u32 = 3;

/// Default bound on collection nesting while decoding.
///
/// Descriptors from the query layer are far shallower; the bound only
/// matters for hostile input.
pub const DEFAULT_MAX_DEPTH: usize = 64;

/// Default bound on a decimal cell's content (scale plus unscaled bytes).
///
/// Converting the unscaled value to decimal digits is superlinear in its
/// length, so oversized cells are rejected before conversion.
pub const DEFAULT_MAX_DECIMAL_BYTES: usize = 8 * 1024;

/// Runtime limits for the protocol codec.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "config-loaders", derive(serde::Deserialize))]
#[cfg_attr(feature = "config-loaders", serde(default))]
pub struct CodecConfig {
    /// Maximum collection nesting accepted by `deserialize`.
    pub max_depth: usize,
    /// Maximum decimal cell content length accepted by `deserialize`.
    pub max_decimal_bytes: usize,
}

impl Default for CodecConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
            max_decimal_bytes: DEFAULT_MAX_DECIMAL_BYTES,
        }
    }
}

impl CodecConfig {
    /// Set the nesting bound.
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Set the decimal cell size bound.
    pub fn with_max_decimal_bytes(mut self, max_decimal_bytes: usize) -> Self {
        self.max_decimal_bytes = max_decimal_bytes;
        self
    }

    /// Parse a config from YAML content.
    #[cfg(feature = "config-loaders")]
    pub fn from_yaml_str(yaml_content: &str) -> Result<Self, String> {
        serde_yaml::from_str(yaml_content).map_err(|e| format!("Failed to parse YAML: {}", e))
    }

    /// Load a config from a YAML file.
    #[cfg(feature = "config-loaders")]
    pub fn load_from_file<P: AsRef<std::path::Path>>(path: P) -> Result<Self, String> {
        let yaml_content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read YAML file: {}", e))?;
        Self::from_yaml_str(&yaml_content)
    }
}
