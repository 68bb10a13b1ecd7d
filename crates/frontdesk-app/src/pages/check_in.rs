// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Check-in page — scan an ID card, review the record, preview and print
// documents, then confirm the check-in.
//
// On desktop the camera button falls back to a file dialog.

use dioxus::prelude::*;

use frontdesk_checkin::DeskPhase;
use frontdesk_core::human_errors::humanize_error;
use frontdesk_core::{DocumentKind, GuestField};
use frontdesk_document::IdCardRecognizer;

use crate::services::app_services::{AppServices, PrintOutcome, thai_font_warning};
use crate::state::AppState;

/// Review controls, top to bottom. The Thai name is edited as one
/// "title + first name" control.
const REVIEW_FIELDS: [GuestField; 9] = [
    GuestField::IdNumber,
    GuestField::FullNameTh,
    GuestField::LastNameTh,
    GuestField::FirstNameEn,
    GuestField::LastNameEn,
    GuestField::DateOfBirth,
    GuestField::Address,
    GuestField::IssueDate,
    GuestField::ExpiryDate,
];

const INPUT_STYLE: &str =
    "width: 100%; padding: 8px; border: 1px solid #ccc; border-radius: 6px; font-size: 15px; box-sizing: border-box;";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ImageSource {
    Camera,
    Upload,
}

#[component]
pub fn CheckIn() -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let status_msg = use_signal(|| Option::<String>::None);

    let phase = state.read().desk.phase();
    let controls_enabled = state.read().desk.scan_controls_enabled();
    let notice = state.read().desk.notice().map(str::to_string);
    // Hidden while scanning; the scan result replaces the record.
    let has_guest = phase.has_guest();

    rsx! {
        div {
            h1 { "เช็คอินผู้เข้าพัก" }
            p { style: "color: #666;", "สแกนบัตรประชาชนเพื่อกรอกข้อมูลอัตโนมัติ หรือกรอกข้อมูลเอง" }

            if let Some(msg) = notice {
                div { style: "display: flex; justify-content: space-between; align-items: center; padding: 12px; margin: 12px 0; border-radius: 8px; background: #fff8e1; border: 1px solid #ffe082;",
                    span { "{msg}" }
                    button {
                        style: "border: none; background: none; color: #888; font-size: 14px;",
                        onclick: move |_| {
                            state.write().desk.take_notice();
                        },
                        "ปิด"
                    }
                }
            }

            // Scan controls
            div { style: "display: flex; gap: 8px; margin: 16px 0;",
                button {
                    style: "flex: 1; padding: 16px; border-radius: 12px; border: 2px dashed #007aff; color: #007aff; background: white; font-size: 16px;",
                    disabled: !controls_enabled,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let svc = svc.clone();
                            spawn(run_scan(svc, state, status_msg, ImageSource::Camera));
                        }
                    },
                    "\u{1F4F7} ถ่ายรูปบัตร"
                }
                button {
                    style: "flex: 1; padding: 16px; border-radius: 12px; border: 1px solid #ccc; background: white; font-size: 16px;",
                    disabled: !controls_enabled,
                    onclick: {
                        let svc = svc.clone();
                        move |_| {
                            let svc = svc.clone();
                            spawn(run_scan(svc, state, status_msg, ImageSource::Upload));
                        }
                    },
                    "อัปโหลดรูปบัตร"
                }
            }

            if phase == DeskPhase::Scanning {
                p { style: "text-align: center; color: #007aff; margin: 24px 0;",
                    "กำลังอ่านข้อมูลจากบัตร..."
                }
            }

            if phase == DeskPhase::Empty {
                button {
                    style: "width: 100%; padding: 10px; border-radius: 8px; border: 1px solid #ccc; background: #fafafa; font-size: 14px;",
                    onclick: move |_| {
                        if let Err(e) = state.write().desk.start_manual_entry() {
                            tracing::warn!(error = %e, "manual entry refused");
                        }
                    },
                    "กรอกข้อมูลเอง"
                }
            }

            if has_guest {
                ReviewForm { status: status_msg }
            } else if phase == DeskPhase::Empty {
                p { style: "text-align: center; color: #aaa; margin: 48px 0;",
                    "ยังไม่มีข้อมูลผู้เข้าพัก"
                }
            }

            if let Some(ref msg) = *status_msg.read() {
                p { style: "margin-top: 12px; color: #666; font-size: 14px; text-align: center;",
                    "{msg}"
                }
            }

            if let DeskPhase::Previewing(kind) = phase {
                PreviewDialog { kind }
            }
        }
    }
}

/// Obtain a photo, then run it through the recogniser without holding the
/// state signal across the request.
async fn run_scan(
    svc: AppServices,
    mut state: Signal<AppState>,
    mut status: Signal<Option<String>>,
    source: ImageSource,
) {
    let picked = match source {
        ImageSource::Camera => svc.capture_id_card(),
        ImageSource::Upload => svc.pick_id_card(),
    };
    let image = match picked {
        Ok(Some(bytes)) => bytes,
        Ok(None) => return,
        Err(e) => {
            tracing::warn!(error = %e, "no ID card image");
            status.set(Some(humanize_error(&e).message));
            return;
        }
    };
    status.set(None);

    let ticket = match state.write().desk.begin_scan() {
        Ok(ticket) => ticket,
        Err(e) => {
            status.set(Some(humanize_error(&e).message));
            return;
        }
    };

    let result = match svc.recognizer() {
        Ok(recognizer) => recognizer.recognize(&image).await,
        Err(e) => Err(e),
    };

    if let Err(e) = state.write().desk.finish_scan(ticket, result) {
        tracing::warn!(error = %e, "scan did not produce a guest record");
    }
}

#[component]
fn ReviewForm(status: Signal<Option<String>>) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();
    let desk = state.read().desk.clone();
    let editor = desk.editor();

    rsx! {
        section { style: "margin: 16px 0;",
            h3 { "ข้อมูลผู้เข้าพัก" }
            for field in REVIEW_FIELDS {
                {
                    let value = editor.field_value(field).unwrap_or_default();
                    rsx! {
                        div { style: "margin: 8px 0;",
                            label { style: "display: block; font-size: 13px; color: #555; margin-bottom: 2px;",
                                "{field.label()}"
                            }
                            input {
                                style: INPUT_STYLE,
                                value: "{value}",
                                // Committed on change so the composed name
                                // control is not re-split mid-typing.
                                onchange: move |evt| {
                                    state.write().desk.update_field(field, &evt.value());
                                },
                            }
                        }
                    }
                }
            }
        }

        section { style: "margin: 16px 0;",
            h3 { "ค่าห้องพัก" }
            div { style: "display: flex; gap: 8px;",
                div { style: "flex: 1;",
                    label { style: "display: block; font-size: 13px; color: #555;", "หมายเลขห้อง" }
                    input {
                        style: INPUT_STYLE,
                        value: "{editor.room()}",
                        oninput: move |evt| {
                            state.write().desk.set_room(evt.value());
                        },
                    }
                }
                div { style: "flex: 1;",
                    label { style: "display: block; font-size: 13px; color: #555;", "จำนวนเงิน (บาท)" }
                    input {
                        style: INPUT_STYLE,
                        value: "{editor.amount()}",
                        oninput: move |evt| {
                            state.write().desk.set_amount(evt.value());
                        },
                    }
                }
            }
            div { style: "margin: 8px 0;",
                label { style: "display: block; font-size: 13px; color: #555;", "รายละเอียด" }
                input {
                    style: INPUT_STYLE,
                    value: "{editor.description()}",
                    oninput: move |evt| {
                        state.write().desk.set_description(evt.value());
                    },
                }
            }
        }

        section { style: "margin: 16px 0;",
            h3 { "เอกสาร" }
            div { style: "display: flex; gap: 8px;",
                for kind in DocumentKind::ALL {
                    button {
                        style: "flex: 1; padding: 10px; border-radius: 8px; border: 1px solid #007aff; color: #007aff; background: white;",
                        onclick: move |_| {
                            if let Err(e) = state.write().desk.open_preview(kind) {
                                tracing::warn!(error = %e, "preview refused");
                            }
                        },
                        "{kind.label()}"
                    }
                }
            }
        }

        div { style: "display: flex; gap: 8px; margin-top: 16px;",
            button {
                style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ff3b30; color: #ff3b30; background: white;",
                onclick: move |_| {
                    if let Err(e) = state.write().desk.cancel() {
                        tracing::warn!(error = %e, "cancel refused");
                    }
                },
                "ยกเลิก"
            }
            button {
                style: "flex: 2; padding: 12px; border-radius: 8px; border: none; background: #34c759; color: white; font-size: 16px;",
                onclick: {
                    let svc = svc.clone();
                    let mut status = status;
                    move |_| {
                        let mut app = state.write();
                        match svc.check_in(&mut app.desk) {
                            Ok(request) => {
                                tracing::info!(room = %request.room, "check-in recorded");
                                status.set(None);
                            }
                            Err(e) => tracing::warn!(error = %e, "check-in not completed"),
                        }
                    }
                },
                "ยืนยันเช็คอิน"
            }
        }
    }
}

#[component]
fn PreviewDialog(kind: DocumentKind) -> Element {
    let mut state = use_context::<Signal<AppState>>();
    let svc = use_context::<AppServices>();

    let Some(document) = state.read().desk.render_preview(&svc.renderer()) else {
        return rsx! {};
    };
    let text = document.to_plain_text();
    let print_message = state.read().print_message.clone();
    let font_warning = thai_font_warning(&svc.config());

    rsx! {
        div { style: "position: fixed; inset: 0; background: rgba(0, 0, 0, 0.4); display: flex; align-items: center; justify-content: center;",
            div { style: "background: white; border-radius: 12px; padding: 16px; width: 90%; max-width: 640px; max-height: 90vh; overflow-y: auto;",
                h2 { style: "margin-top: 0;", "{kind.label()}" }
                pre { style: "white-space: pre-wrap; font-family: 'Sarabun', system-ui, sans-serif; font-size: 14px; border: 1px solid #eee; padding: 12px; border-radius: 8px;",
                    "{text}"
                }

                if let Some(warning) = font_warning {
                    p { style: "color: #ff9500; font-size: 13px; text-align: center;", "{warning}" }
                }

                if let Some(msg) = print_message {
                    p { style: "color: #666; font-size: 14px; text-align: center;", "{msg}" }
                }

                div { style: "display: flex; gap: 8px; margin-top: 12px;",
                    button {
                        style: "flex: 1; padding: 12px; border-radius: 8px; border: 1px solid #ccc; background: white;",
                        onclick: move |_| {
                            let mut app = state.write();
                            app.desk.close_preview();
                            app.print_message = None;
                        },
                        "ปิด"
                    }
                    button {
                        style: "flex: 1; padding: 12px; border-radius: 8px; border: none; background: #007aff; color: white;",
                        onclick: {
                            let svc = svc.clone();
                            let document = document.clone();
                            move |_| {
                                let message = match svc.print_document(&document) {
                                    Ok(PrintOutcome::DialogShown) => "ส่งเอกสารไปยังเครื่องพิมพ์แล้ว".to_string(),
                                    Ok(PrintOutcome::Saved(path)) => {
                                        format!("บันทึก PDF ไว้ที่ {}", path.display())
                                    }
                                    Err(e) => {
                                        tracing::error!(error = %e, "document output failed");
                                        humanize_error(&e).message
                                    }
                                };
                                state.write().print_message = Some(message);
                            }
                        },
                        "พิมพ์"
                    }
                }
            }
        }
    }
}
