// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Scanwarp.

use thiserror::Error;

/// Top-level error type for all Scanwarp operations.
///
/// Only `ImageDecoding` is fatal to a scan attempt: the source pixel buffer
/// cannot be interpreted, so the whole rectification pipeline aborts with no
/// partial result. An unavailable enhanced image is not an error at all —
/// it is represented by an absent image in the scan result.
#[derive(Debug, Error)]
pub enum ScanError {
    /// The source image bytes could not be decoded into a pixel buffer.
    #[error("failed to decode source image: {0}")]
    ImageDecoding(String),

    /// An image operation other than the initial decode failed.
    #[error("image processing failed: {0}")]
    Image(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanError>;
