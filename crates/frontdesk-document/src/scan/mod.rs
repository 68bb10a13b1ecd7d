// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning — extraction of guest fields from ID card images via a remote
// recognition service.

pub mod ocr;

pub use ocr::{GeminiRecognizer, IdCardRecognizer};
