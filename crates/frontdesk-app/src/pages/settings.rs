// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Settings page — hotel profile, check-in defaults, document output and the
// recognition service.

use std::path::PathBuf;

use dioxus::prelude::*;

use frontdesk_checkin::{DeskPhase, FrontDesk};
use frontdesk_core::PaperSize;

use crate::services::app_services::{API_KEY_ENV, AppServices, thai_font_warning};
use crate::state::AppState;

#[component]
pub fn Settings() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let mut save_msg = use_signal(|| Option::<String>::None);

    let config = state.read().config.clone();
    let font_path = config
        .thai_font_path
        .as_ref()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let data_dir = svc.data_dir().display().to_string();
    let font_warning = thai_font_warning(&config);

    rsx! {
        div {
            h1 { "ตั้งค่า" }

            section { style: "margin: 16px 0;",
                h3 { "ข้อมูลโรงแรม" }
                TextRow {
                    label: "ชื่อโรงแรม",
                    value: config.hotel.name.clone(),
                    on_change: move |v: String| state.write().config.hotel.name = v,
                }
                TextRow {
                    label: "ที่อยู่",
                    value: config.hotel.address.clone(),
                    on_change: move |v: String| state.write().config.hotel.address = v,
                }
                TextRow {
                    label: "เลขประจำตัวผู้เสียภาษี",
                    value: config.hotel.tax_id.clone(),
                    on_change: move |v: String| state.write().config.hotel.tax_id = v,
                }
                TextRow {
                    label: "โทรศัพท์",
                    value: config.hotel.phone.clone(),
                    on_change: move |v: String| state.write().config.hotel.phone = v,
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "ค่าเริ่มต้นการเช็คอิน" }
                TextRow {
                    label: "ราคาห้องพัก (บาท)",
                    value: config.default_room_rate.clone(),
                    on_change: move |v: String| state.write().config.default_room_rate = v,
                }
                TextRow {
                    label: "รายละเอียด",
                    value: config.default_description.clone(),
                    on_change: move |v: String| state.write().config.default_description = v,
                }
                TextRow {
                    label: "ภาษีมูลค่าเพิ่ม (%)",
                    value: config.vat_rate_percent.to_string(),
                    on_change: move |v: String| {
                        if let Ok(rate) = v.trim().parse::<f64>()
                            && (0.0..100.0).contains(&rate)
                        {
                            state.write().config.vat_rate_percent = rate;
                        }
                    },
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "เอกสาร" }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "ขนาดกระดาษ" }
                    select {
                        style: "padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: paper_size_label(&config.paper_size),
                        onchange: move |evt| {
                            if let Some(ps) = paper_size_from_label(&evt.value()) {
                                state.write().config.paper_size = ps;
                            }
                        },
                        option { value: "A4", "A4" }
                        option { value: "A5", "A5" }
                        option { value: "Letter", "Letter" }
                    }
                }
                TextRow {
                    label: "ฟอนต์ภาษาไทย (.ttf)",
                    value: font_path,
                    on_change: move |v: String| {
                        let v = v.trim().to_string();
                        state.write().config.thai_font_path =
                            if v.is_empty() { None } else { Some(PathBuf::from(v)) };
                    },
                }
                if let Some(warning) = font_warning {
                    p { style: "color: #ff9500; font-size: 12px;", "{warning}" }
                }
            }

            section { style: "margin: 16px 0;",
                h3 { "บริการอ่านบัตร (AI)" }
                TextRow {
                    label: "Endpoint",
                    value: config.ocr.endpoint.clone(),
                    on_change: move |v: String| state.write().config.ocr.endpoint = v,
                }
                TextRow {
                    label: "Model",
                    value: config.ocr.model.clone(),
                    on_change: move |v: String| state.write().config.ocr.model = v,
                }
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
                    span { "API key" }
                    input {
                        r#type: "password",
                        style: "width: 60%; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                        value: config.ocr.api_key.clone().unwrap_or_default(),
                        onchange: move |evt| {
                            let key = evt.value().trim().to_string();
                            state.write().config.ocr.api_key = if key.is_empty() { None } else { Some(key) };
                        },
                    }
                }
                TextRow {
                    label: "ขนาดภาพสูงสุด (px)",
                    value: config.ocr.max_image_edge.to_string(),
                    on_change: move |v: String| {
                        if let Ok(edge) = v.trim().parse::<u32>()
                            && edge >= 256
                        {
                            state.write().config.ocr.max_image_edge = edge;
                        }
                    },
                }
                TextRow {
                    label: "หมดเวลา (วินาที)",
                    value: config.ocr.timeout_secs.to_string(),
                    on_change: move |v: String| {
                        if let Ok(secs) = v.trim().parse::<u64>()
                            && secs > 0
                        {
                            state.write().config.ocr.timeout_secs = secs;
                        }
                    },
                }
                p { style: "color: #888; font-size: 12px;",
                    "ตัวแปร {API_KEY_ENV} จะใช้แทนค่าที่บันทึกไว้"
                }
            }

            button {
                style: "width: 100%; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white; font-size: 16px; margin-top: 8px;",
                onclick: {
                    let svc = svc.clone();
                    move |_| {
                        let config = state.read().config.clone();
                        match svc.save_config(&config) {
                            Ok(()) => {
                                tracing::info!("settings saved");
                                // New defaults apply to the next guest only.
                                let mut app = state.write();
                                if app.desk.phase() == DeskPhase::Empty {
                                    app.desk = FrontDesk::from_config(&config);
                                }
                                save_msg.set(Some("บันทึกการตั้งค่าแล้ว".into()));
                            }
                            Err(e) => {
                                tracing::error!(error = %e, "failed to save settings");
                                save_msg.set(Some(format!("บันทึกไม่สำเร็จ: {e}")));
                            }
                        }
                    }
                },
                "บันทึกการตั้งค่า"
            }
            if let Some(ref msg) = *save_msg.read() {
                p { style: "color: #34c759; font-size: 14px; text-align: center; margin-top: 8px;",
                    "{msg}"
                }
            }

            section { style: "margin: 24px 0;",
                h3 { "เกี่ยวกับ" }
                p { style: "color: #666; font-size: 14px;",
                    "Front Desk v{env!(\"CARGO_PKG_VERSION\")}"
                    br {}
                    "ข้อมูลเก็บไว้ที่ {data_dir}"
                    br {}
                    "PMPL-1.0-or-later"
                }
            }
        }
    }
}

#[component]
fn TextRow(label: &'static str, value: String, on_change: EventHandler<String>) -> Element {
    rsx! {
        div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px 0; border-bottom: 1px solid #f0f0f0;",
            span { "{label}" }
            input {
                style: "width: 60%; padding: 4px 8px; border: 1px solid #ccc; border-radius: 4px;",
                value: "{value}",
                onchange: move |evt| on_change.call(evt.value()),
            }
        }
    }
}

fn paper_size_label(ps: &PaperSize) -> &'static str {
    match ps {
        PaperSize::A4 => "A4",
        PaperSize::A5 => "A5",
        PaperSize::Letter => "Letter",
    }
}

fn paper_size_from_label(label: &str) -> Option<PaperSize> {
    match label {
        "A4" => Some(PaperSize::A4),
        "A5" => Some(PaperSize::A5),
        "Letter" => Some(PaperSize::Letter),
        _ => None,
    }
}
