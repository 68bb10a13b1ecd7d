// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Front Desk — hotel check-in desktop app.
//
// Entry point. Initialises logging, backend services, app state, and launches
// the Dioxus UI.

mod pages;
mod services;
mod state;

use dioxus::prelude::*;

use pages::check_in::CheckIn;
use pages::ledger::Ledger;
use pages::settings::Settings;

use services::app_services::AppServices;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    tracing::info!("Front Desk starting");

    dioxus::launch(app);
}

/// Top-level route enum.
#[derive(Debug, Clone, Routable, PartialEq)]
enum Route {
    #[layout(TabLayout)]
    #[route("/")]
    CheckIn {},
    #[route("/ledger")]
    Ledger {},
    #[route("/settings")]
    Settings {},
}

/// Root component.
fn app() -> Element {
    let services = use_hook(|| {
        AppServices::init()
            .or_else(|e| {
                tracing::error!(error = %e, "persistent storage failed — using in-memory fallback");
                AppServices::fallback()
            })
            .map_err(|e| e.to_string())
    });

    let svc = match services {
        Ok(svc) => svc,
        Err(e) => {
            tracing::error!(error = %e, "app services unavailable");
            return rsx! {
                div { style: "padding: 32px; font-family: system-ui, sans-serif;",
                    h1 { "เริ่มต้นระบบไม่สำเร็จ" }
                    p { style: "color: #666;", "{e}" }
                }
            };
        }
    };

    use_context_provider(|| svc.clone());
    use_context_provider(|| Signal::new(state::AppState::new(&svc)));

    rsx! {
        Router::<Route> {}
    }
}

/// Persistent bottom tab layout wrapping all pages.
#[component]
fn TabLayout() -> Element {
    rsx! {
        div { class: "app-container",
            style: "display: flex; flex-direction: column; height: 100vh; font-family: system-ui, -apple-system, 'Sarabun', sans-serif;",

            div { class: "page-content",
                style: "flex: 1; overflow-y: auto; padding: 16px;",
                Outlet::<Route> {}
            }

            nav { class: "tab-bar",
                style: "display: flex; justify-content: space-around; padding: 8px 0; border-top: 1px solid #e0e0e0; background: #fafafa;",
                TabButton { to: Route::CheckIn {}, label: "เช็คอิน", icon: "C" }
                TabButton { to: Route::Ledger {}, label: "บัญชี", icon: "L" }
                TabButton { to: Route::Settings {}, label: "ตั้งค่า", icon: "S" }
            }
        }
    }
}

#[component]
fn TabButton(to: Route, label: &'static str, icon: &'static str) -> Element {
    rsx! {
        Link { to: to,
            style: "display: flex; flex-direction: column; align-items: center; text-decoration: none; color: #333; font-size: 12px;",
            span { style: "font-size: 20px;", "{icon}" }
            span { "{label}" }
        }
    }
}
