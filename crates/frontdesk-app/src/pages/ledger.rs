// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Ledger page — recorded check-in revenue and the audit trail.

use dioxus::prelude::*;

use frontdesk_core::{Transaction, TransactionKind};
use frontdesk_document::render::format::format_baht;
use frontdesk_ledger::{AuditEntry, LedgerSummary};

use crate::services::app_services::AppServices;

#[component]
pub fn Ledger() -> Element {
    let svc = use_context::<AppServices>();
    let mut transactions = use_signal(Vec::<Transaction>::new);
    let mut summary = use_signal(LedgerSummary::default);
    let mut audit_entries = use_signal(Vec::<AuditEntry>::new);
    let mut audit_total = use_signal(|| 0u64);

    // Load on mount and refresh periodically
    let svc_load = svc.clone();
    let _loader = use_resource(move || {
        let svc = svc_load.clone();
        async move {
            loop {
                match svc.recent_transactions(100) {
                    Ok(recent) => transactions.set(recent),
                    Err(e) => tracing::warn!(error = %e, "could not load transactions"),
                }
                if let Ok(totals) = svc.ledger_summary() {
                    summary.set(totals);
                }
                if let Ok(recent) = svc.recent_audit_entries(50) {
                    audit_entries.set(recent);
                }
                if let Ok(count) = svc.audit_count() {
                    audit_total.set(count);
                }
                tokio::time::sleep(std::time::Duration::from_secs(5)).await;
            }
        }
    });

    let totals = *summary.read();
    let income = format_baht(totals.income);
    let net = format_baht(totals.net());

    rsx! {
        div {
            h1 { "บัญชีรายรับ" }

            div { style: "display: flex; gap: 8px; margin: 16px 0;",
                SummaryCard { label: "รายการ", value: totals.count.to_string() }
                SummaryCard { label: "รายรับ (บาท)", value: income }
                SummaryCard { label: "สุทธิ (บาท)", value: net }
            }

            if transactions.read().is_empty() {
                p { style: "text-align: center; color: #aaa; margin: 48px 0;",
                    "ยังไม่มีรายการ"
                }
            } else {
                div { style: "margin-top: 16px;",
                    for tx in transactions.read().iter() {
                        {
                            let sign = match tx.kind {
                                TransactionKind::Income => "+",
                                TransactionKind::Expense => "-",
                            };
                            let amount = format!("{sign}{}", format_baht(tx.amount));
                            let when = tx.recorded_at.format("%Y-%m-%d %H:%M").to_string();
                            rsx! {
                                div { style: "padding: 10px; margin: 4px 0; border: 1px solid #f0f0f0; border-radius: 6px; font-size: 14px;",
                                    div { style: "display: flex; justify-content: space-between; align-items: center;",
                                        strong { "{tx.description}" }
                                        span { style: "color: #34c759;", "{amount}" }
                                    }
                                    p { style: "color: #888; font-size: 12px; margin: 2px 0 0;",
                                        "{tx.guest_name} · {when}"
                                    }
                                }
                            }
                        }
                    }
                }
            }

            section { style: "margin: 24px 0;",
                div { style: "display: flex; justify-content: space-between; align-items: center;",
                    h3 { "ประวัติการทำงาน" }
                    {
                        let count = *audit_total.read();
                        rsx! {
                            span { style: "color: #666; font-size: 14px;", "{count} รายการ" }
                        }
                    }
                }
                for entry in audit_entries.read().iter() {
                    {
                        let success_icon = if entry.success { "\u{2705}" } else { "\u{274C}" };
                        let subject_short: String = entry.subject.chars().take(12).collect();
                        rsx! {
                            div { style: "padding: 8px; margin: 4px 0; border: 1px solid #f0f0f0; border-radius: 6px; font-size: 13px;",
                                div { style: "display: flex; justify-content: space-between;",
                                    span {
                                        "{success_icon} "
                                        strong { "{entry.action}" }
                                    }
                                    span { style: "color: #999; font-size: 12px;", "{entry.timestamp}" }
                                }
                                p { style: "color: #888; font-size: 12px; margin: 2px 0 0; font-family: monospace;",
                                    "{subject_short}"
                                }
                                if let Some(ref details) = entry.details {
                                    p { style: "color: #666; font-size: 12px; margin: 2px 0 0;",
                                        "{details}"
                                    }
                                }
                            }
                        }
                    }
                }
            }
        }
    }
}

#[component]
fn SummaryCard(label: &'static str, value: String) -> Element {
    rsx! {
        div { style: "flex: 1; padding: 12px; border-radius: 8px; background: #f5f7fa; text-align: center;",
            div { style: "color: #666; font-size: 12px;", "{label}" }
            div { style: "font-size: 20px; font-weight: 600; margin-top: 4px;", "{value}" }
        }
    }
}
