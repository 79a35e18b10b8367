// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Pipeline configuration.

use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Tunable settings for the scanning pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanConfig {
    /// Neighbourhood radius for the adaptive-threshold enhancement filter.
    pub threshold_block_radius: u32,
    /// Constant subtracted from the local mean when thresholding.
    pub threshold_offset: i32,
    /// Contrast boost applied before binarization (1.0 is a no-op).
    pub contrast_factor: f32,
    /// Whether new scan results default to preferring the enhanced image.
    pub prefer_enhanced_default: bool,
}

impl Default for ScanConfig {
    fn default() -> Self {
        Self {
            threshold_block_radius: 15,
            threshold_offset: 10,
            contrast_factor: 1.4,
            prefer_enhanced_default: false,
        }
    }
}

impl ScanConfig {
    /// Parse a configuration from a JSON string.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serialize the configuration to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
