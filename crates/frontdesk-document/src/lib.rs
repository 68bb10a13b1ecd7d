// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// frontdesk-document — Scanning and paperwork for the hotel front desk.
//
// Provides ID-card image preparation, the client for the remote recognition
// service, the three fixed document templates (registration form, deposit
// receipt, tax invoice), and PDF output for printing.

pub mod image;
pub mod pdf;
pub mod render;
pub mod scan;

// Re-export the primary structs so callers can use `frontdesk_document::PdfWriter` etc.
pub use image::processor::ImageProcessor;
pub use pdf::writer::PdfWriter;
pub use render::document::{Block, RenderedDocument};
pub use render::templates::DocumentRenderer;
pub use scan::ocr::{GeminiRecognizer, IdCardRecognizer};
