// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// frontdesk-checkin — The check-in workflow.
//
// `GuestEditor` holds the record under review and the charge form,
// `DeskPhase` is the explicit state machine of one check-in session, and
// `FrontDesk` coordinates scanning, previews and the final hand-off to the
// host's `CheckInHandler`.

pub mod coordinator;
pub mod editor;
pub mod session;

pub use coordinator::{CheckInHandler, FrontDesk, ScanTicket};
pub use editor::{FormDefaults, GuestEditor};
pub use session::DeskPhase;
