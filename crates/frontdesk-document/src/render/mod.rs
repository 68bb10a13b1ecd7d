// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document rendering — fixed layouts for the registration form, deposit
// receipt, and tax invoice.

pub mod document;
pub mod format;
pub mod templates;

pub use document::{Block, RenderedDocument};
pub use templates::DocumentRenderer;
