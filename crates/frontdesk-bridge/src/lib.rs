// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// frontdesk-bridge — Native capabilities behind small traits.
//
// The desk needs three things from the host platform: a camera for ID cards,
// a file picker for uploaded photos, and a print dialog for documents.

pub mod desktop;
pub mod traits;

pub use desktop::DesktopBridge;
pub use traits::{NativeCamera, NativeFilePicker, NativePrint, PlatformBridge};

/// Bridge implementation for the running platform.
pub fn platform_bridge() -> Box<dyn PlatformBridge> {
    Box::new(DesktopBridge)
}
