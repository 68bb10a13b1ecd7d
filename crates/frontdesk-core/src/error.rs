// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for the front desk.

use thiserror::Error;

/// Top-level error type for all front desk operations.
#[derive(Debug, Error)]
pub enum FrontDeskError {
    // -- Scanning --
    #[error("OCR failed: {0}")]
    OcrError(String),

    #[error("image processing failed: {0}")]
    ImageError(String),

    #[error("a scan is already in progress")]
    ScanInProgress,

    // -- Check-in workflow --
    #[error("check-in rejected: {0}")]
    Validation(#[from] ValidationError),

    #[error("cannot {action} while {phase}")]
    InvalidTransition { action: &'static str, phase: String },

    // -- Documents --
    #[error("PDF operation failed: {0}")]
    PdfError(String),

    // -- Storage / persistence --
    #[error("database error: {0}")]
    Database(String),

    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    // -- Platform bridge --
    #[error("platform bridge error: {0}")]
    Bridge(String),

    #[error("feature not available on this platform")]
    PlatformUnavailable,
}

/// Why a check-in was refused. Checked in declaration order; the first
/// failing rule wins.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("no guest record loaded")]
    MissingGuest,

    #[error("room number is empty")]
    MissingRoom,

    #[error("amount is not a number")]
    InvalidAmount,
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, FrontDeskError>;
