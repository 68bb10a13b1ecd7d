// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global application state — reactive signals for the Dioxus UI.

use frontdesk_checkin::FrontDesk;
use frontdesk_core::AppConfig;

use crate::services::app_services::AppServices;

/// Shared state accessible to all pages via `use_context`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Settings as edited on the settings page; saved explicitly.
    pub config: AppConfig,
    /// The check-in in progress.
    pub desk: FrontDesk,
    /// Result of the last print or save, for the preview dialog.
    pub print_message: Option<String>,
}

impl AppState {
    pub fn new(svc: &AppServices) -> Self {
        let config = svc.config();
        Self {
            desk: FrontDesk::from_config(&config),
            config,
            print_message: None,
        }
    }
}
