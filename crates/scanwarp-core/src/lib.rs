// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanwarp — Core error and configuration types shared across all crates.

pub mod config;
pub mod error;

pub use config::ScanConfig;
pub use error::{Result, ScanError};
