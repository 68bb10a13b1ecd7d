// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed document templates: hotel registration form (ร.ร. 3), deposit
// receipt, and full tax invoice.
//
// Rendering is a pure function of the guest, the charge fields, the hotel
// profile and the issue date. Nothing is stored and nothing is printed here.

use chrono::NaiveDate;
use frontdesk_core::config::HotelProfile;
use frontdesk_core::{AppConfig, DocumentKind, GuestData, charge_description};
use tracing::debug;

use super::document::{Block, RenderedDocument};
use super::format::{format_baht, split_vat_inclusive, thai_date};

/// Shown in place of fields the guest record leaves blank.
const BLANK: &str = "-";

/// Renders the three front-desk documents for a fixed hotel and date.
#[derive(Debug, Clone)]
pub struct DocumentRenderer {
    hotel: HotelProfile,
    vat_rate_percent: f64,
    issued_on: NaiveDate,
}

impl DocumentRenderer {
    pub fn new(hotel: HotelProfile, vat_rate_percent: f64, issued_on: NaiveDate) -> Self {
        Self {
            hotel,
            vat_rate_percent,
            issued_on,
        }
    }

    /// Renderer using the configured hotel profile and VAT rate.
    pub fn from_config(config: &AppConfig, issued_on: NaiveDate) -> Self {
        Self::new(config.hotel.clone(), config.vat_rate_percent, issued_on)
    }

    /// Render one document. The caller guarantees a guest record exists.
    pub fn render(
        &self,
        guest: &GuestData,
        kind: DocumentKind,
        amount: f64,
        room: &str,
        description: &str,
    ) -> RenderedDocument {
        debug!(?kind, "rendering document");
        let (title, subtitle, blocks) = match kind {
            DocumentKind::RegistrationForm => (
                "ใบลงทะเบียนผู้เข้าพัก (ร.ร. 3)",
                "Hotel Guest Registration Form",
                self.registration_form(guest, amount, room),
            ),
            DocumentKind::DepositReceipt => (
                "ใบรับเงินมัดจำ",
                "Deposit Receipt",
                self.deposit_receipt(guest, amount, room, description),
            ),
            DocumentKind::TaxInvoice => (
                "ใบกำกับภาษี / ใบเสร็จรับเงิน",
                "Tax Invoice / Receipt",
                self.tax_invoice(guest, amount, room, description),
            ),
        };

        RenderedDocument {
            kind,
            title: title.to_string(),
            subtitle: subtitle.to_string(),
            number: self.document_number(kind, room),
            issued_on: self.issued_on,
            header: self.header_lines(kind),
            blocks,
        }
    }

    fn document_number(&self, kind: DocumentKind, room: &str) -> String {
        let room = room.trim();
        let room = if room.is_empty() { "000" } else { room };
        format!(
            "{}-{}-{}",
            kind.number_prefix(),
            self.issued_on.format("%Y%m%d"),
            room
        )
    }

    fn header_lines(&self, kind: DocumentKind) -> Vec<String> {
        let mut lines = vec![self.hotel.name.clone()];
        if !self.hotel.address.is_empty() {
            lines.push(self.hotel.address.clone());
        }
        if !self.hotel.phone.is_empty() {
            lines.push(format!("โทร {}", self.hotel.phone));
        }
        // The seller tax ID is a legal requirement on tax invoices only.
        if kind == DocumentKind::TaxInvoice {
            lines.push(format!(
                "เลขประจำตัวผู้เสียภาษี {}",
                or_blank(&self.hotel.tax_id)
            ));
        }
        lines
    }

    fn registration_form(&self, guest: &GuestData, amount: f64, room: &str) -> Vec<Block> {
        vec![
            Block::Heading("ข้อมูลผู้เข้าพัก / Guest".into()),
            field("ชื่อ-นามสกุล", &guest.display_name_th()),
            field("Name", &guest.display_name_en()),
            field("สัญชาติ / Nationality", "ไทย"),
            field("เลขประจำตัวประชาชน", &guest.id_number),
            field("วันเกิด", &guest.date_of_birth),
            field("ที่อยู่ตามบัตร", &guest.address),
            Block::Heading("การเข้าพัก / Stay".into()),
            field("ห้องพัก", room),
            field("วันที่เข้าพัก", &thai_date(self.issued_on)),
            field("อัตราค่าห้องพัก (บาท/คืน)", &format_baht(amount)),
            field("มาจาก", ""),
            field("จะไปที่", ""),
            Block::Note(
                "ข้าพเจ้าขอรับรองว่าข้อความข้างต้นเป็นความจริง (พ.ร.บ. โรงแรม พ.ศ. 2547)".into(),
            ),
            Block::Signature("ผู้เข้าพัก".into()),
            Block::Signature("ผู้จัดการ / พนักงานต้อนรับ".into()),
        ]
    }

    fn deposit_receipt(
        &self,
        guest: &GuestData,
        amount: f64,
        room: &str,
        description: &str,
    ) -> Vec<Block> {
        vec![
            field("วันที่", &thai_date(self.issued_on)),
            field("ได้รับเงินจาก", &guest.display_name_th()),
            field("เลขประจำตัวประชาชน", &guest.id_number),
            field("ห้องพัก", room),
            Block::Spacer,
            Block::LineItem {
                description: format!("เงินมัดจำ: {}", charge_description(description, room)),
                amount: format_baht(amount),
            },
            Block::Total {
                label: "รวมเงินมัดจำ (บาท)".into(),
                amount: format_baht(amount),
                grand: true,
            },
            Block::Note("เงินมัดจำจะคืนให้เมื่อเช็คเอาท์ หักค่าเสียหาย (ถ้ามี)".into()),
            Block::Signature("ผู้รับเงิน".into()),
        ]
    }

    fn tax_invoice(
        &self,
        guest: &GuestData,
        amount: f64,
        room: &str,
        description: &str,
    ) -> Vec<Block> {
        let (net, vat) = split_vat_inclusive(amount, self.vat_rate_percent);
        vec![
            field("วันที่", &thai_date(self.issued_on)),
            Block::Heading("ผู้ซื้อ / Customer".into()),
            field("ชื่อ", &guest.display_name_th()),
            field("เลขประจำตัวผู้เสียภาษี", &guest.id_number),
            field("ที่อยู่", &guest.address),
            Block::Heading("รายการ / Items".into()),
            Block::LineItem {
                description: charge_description(description, room),
                amount: format_baht(amount),
            },
            Block::Total {
                label: "มูลค่าสินค้า/บริการ (ก่อนภาษี)".into(),
                amount: format_baht(net),
                grand: false,
            },
            Block::Total {
                label: format!("ภาษีมูลค่าเพิ่ม {}%", trim_rate(self.vat_rate_percent)),
                amount: format_baht(vat),
                grand: false,
            },
            Block::Total {
                label: "จำนวนเงินรวมทั้งสิ้น (บาท)".into(),
                amount: format_baht(net + vat),
                grand: true,
            },
            Block::Signature("ผู้รับเงิน / ผู้ออกใบกำกับภาษี".into()),
        ]
    }
}

fn field(label: &str, value: &str) -> Block {
    Block::Field {
        label: label.to_string(),
        value: or_blank(value).to_string(),
    }
}

fn or_blank(value: &str) -> &str {
    if value.trim().is_empty() { BLANK } else { value }
}

/// `7.0` → `"7"`, `7.5` → `"7.5"`.
fn trim_rate(rate: f64) -> String {
    if rate.fract() == 0.0 {
        format!("{}", rate as i64)
    } else {
        format!("{rate}")
    }
}
