// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Phases of one check-in session.

use std::fmt;

use frontdesk_core::DocumentKind;

/// Where the desk is in the current check-in.
///
/// ```text
/// Empty ──scan──▶ Scanning ──ok──▶ Reviewing ◀──▶ Previewing(kind)
///   │                └─fail─▶ Empty (or back to Reviewing)
///   └─manual entry──────────────▶ Reviewing ──check-in/cancel──▶ Empty
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DeskPhase {
    /// No guest loaded.
    #[default]
    Empty,
    /// A recognition request is outstanding.
    Scanning,
    /// A guest record is loaded and editable.
    Reviewing,
    /// A document preview is open over the review form.
    Previewing(DocumentKind),
}

impl DeskPhase {
    /// Capture and upload controls are live when a scan may start.
    pub fn scan_controls_enabled(&self) -> bool {
        matches!(self, Self::Empty | Self::Reviewing)
    }

    /// Phases in which a guest record is guaranteed to be loaded.
    pub fn has_guest(&self) -> bool {
        matches!(self, Self::Reviewing | Self::Previewing(_))
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::Scanning => "scanning",
            Self::Reviewing => "reviewing",
            Self::Previewing(_) => "previewing",
        }
    }
}

impl fmt::Display for DeskPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scan_controls_follow_phase() {
        assert!(DeskPhase::Empty.scan_controls_enabled());
        assert!(!DeskPhase::Scanning.scan_controls_enabled());
        assert!(DeskPhase::Reviewing.scan_controls_enabled());
        assert!(!DeskPhase::Previewing(DocumentKind::TaxInvoice).scan_controls_enabled());
    }

    #[test]
    fn display_uses_phase_name() {
        assert_eq!(DeskPhase::default().to_string(), "empty");
        assert_eq!(
            DeskPhase::Previewing(DocumentKind::DepositReceipt).to_string(),
            "previewing"
        );
    }
}
