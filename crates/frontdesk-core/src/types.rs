// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the front desk: guest records, check-in events,
// document kinds and ledger transactions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Fields read off a Thai national ID card.
///
/// Every field is a plain string; nothing is validated beyond presence.
/// Serialized names follow the OCR service payload (`idNumber`,
/// `firstNameTH`, ...). Missing keys deserialize as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GuestData {
    #[serde(rename = "idNumber")]
    pub id_number: String,
    pub title: String,
    #[serde(rename = "firstNameTH")]
    pub first_name_th: String,
    #[serde(rename = "lastNameTH")]
    pub last_name_th: String,
    #[serde(rename = "firstNameEN")]
    pub first_name_en: String,
    #[serde(rename = "lastNameEN")]
    pub last_name_en: String,
    #[serde(rename = "dateOfBirth")]
    pub date_of_birth: String,
    pub address: String,
    #[serde(rename = "issueDate")]
    pub issue_date: String,
    #[serde(rename = "expiryDate")]
    pub expiry_date: String,
}

impl GuestData {
    /// `"<title> <first name>"` as shown in the Thai name control.
    pub fn full_name_th(&self) -> String {
        join_non_empty(&[&self.title, &self.first_name_th])
    }

    /// Title, Thai first name and Thai last name, for documents.
    pub fn display_name_th(&self) -> String {
        join_non_empty(&[&self.title, &self.first_name_th, &self.last_name_th])
    }

    /// English first and last name, for documents.
    pub fn display_name_en(&self) -> String {
        join_non_empty(&[&self.first_name_en, &self.last_name_en])
    }

    /// Read one stored field. Composed views are handled by the editor.
    pub fn field(&self, field: GuestField) -> String {
        match field {
            GuestField::IdNumber => self.id_number.clone(),
            GuestField::Title => self.title.clone(),
            GuestField::FirstNameTh => self.first_name_th.clone(),
            GuestField::LastNameTh => self.last_name_th.clone(),
            GuestField::FirstNameEn => self.first_name_en.clone(),
            GuestField::LastNameEn => self.last_name_en.clone(),
            GuestField::DateOfBirth => self.date_of_birth.clone(),
            GuestField::Address => self.address.clone(),
            GuestField::IssueDate => self.issue_date.clone(),
            GuestField::ExpiryDate => self.expiry_date.clone(),
            GuestField::FullNameTh => self.full_name_th(),
        }
    }

    /// Number of non-empty fields; used for log lines that must not carry
    /// personal data.
    pub fn filled_field_count(&self) -> usize {
        [
            &self.id_number,
            &self.title,
            &self.first_name_th,
            &self.last_name_th,
            &self.first_name_en,
            &self.last_name_en,
            &self.date_of_birth,
            &self.address,
            &self.issue_date,
            &self.expiry_date,
        ]
        .iter()
        .filter(|v| !v.trim().is_empty())
        .count()
    }
}

fn join_non_empty(parts: &[&str]) -> String {
    parts
        .iter()
        .map(|p| p.trim())
        .filter(|p| !p.is_empty())
        .collect::<Vec<_>>()
        .join(" ")
}

/// An editable control on the review screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GuestField {
    IdNumber,
    Title,
    FirstNameTh,
    LastNameTh,
    FirstNameEn,
    LastNameEn,
    DateOfBirth,
    Address,
    IssueDate,
    ExpiryDate,
    /// Composed view of title + Thai first name.
    FullNameTh,
}

impl GuestField {
    /// Thai label shown next to the control.
    pub fn label(&self) -> &'static str {
        match self {
            Self::IdNumber => "เลขประจำตัวประชาชน",
            Self::Title => "คำนำหน้า",
            Self::FirstNameTh => "ชื่อ",
            Self::LastNameTh => "นามสกุล (ไทย)",
            Self::FirstNameEn => "ชื่อ (อังกฤษ)",
            Self::LastNameEn => "นามสกุล (อังกฤษ)",
            Self::DateOfBirth => "วันเกิด",
            Self::Address => "ที่อยู่ตามบัตร",
            Self::IssueDate => "วันออกบัตร",
            Self::ExpiryDate => "วันบัตรหมดอายุ",
            Self::FullNameTh => "ชื่อ (ไทย)",
        }
    }
}

/// The event handed to the host application when a check-in is confirmed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckInRequest {
    pub guest: GuestData,
    pub amount: f64,
    pub room: String,
    pub description: String,
}

/// Charge line used for the ledger and on documents:
/// `"<description> - ห้อง <room>"`, or the bare description when no room
/// has been entered yet.
pub fn charge_description(description: &str, room: &str) -> String {
    let room = room.trim();
    if room.is_empty() {
        description.to_string()
    } else {
        format!("{description} - ห้อง {room}")
    }
}

/// Printable documents available for the current guest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DocumentKind {
    /// Hotel guest registration form (ใบ ร.ร. 3).
    RegistrationForm,
    /// Deposit receipt (ใบมัดจำ).
    DepositReceipt,
    /// Full tax invoice (ใบกำกับภาษี).
    TaxInvoice,
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 3] = [
        DocumentKind::RegistrationForm,
        DocumentKind::DepositReceipt,
        DocumentKind::TaxInvoice,
    ];

    /// Short Thai label used on buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Self::RegistrationForm => "ใบ ร.ร. 3",
            Self::DepositReceipt => "ใบมัดจำ",
            Self::TaxInvoice => "ใบกำกับภาษี",
        }
    }

    /// Prefix for generated document numbers.
    pub fn number_prefix(&self) -> &'static str {
        match self {
            Self::RegistrationForm => "RR3",
            Self::DepositReceipt => "DEP",
            Self::TaxInvoice => "INV",
        }
    }

    /// Stable lowercase name, used in file names and audit entries.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::RegistrationForm => "registration-form",
            Self::DepositReceipt => "deposit-receipt",
            Self::TaxInvoice => "tax-invoice",
        }
    }
}

/// Standard paper sizes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaperSize {
    A4,
    A5,
    Letter,
}

impl PaperSize {
    /// Dimensions in millimetres (width, height).
    pub fn dimensions_mm(&self) -> (u32, u32) {
        match self {
            Self::A4 => (210, 297),
            Self::A5 => (148, 210),
            Self::Letter => (216, 279),
        }
    }
}

/// Unique identifier for a ledger transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TransactionId(pub Uuid);

impl TransactionId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for TransactionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for TransactionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Direction of money in the ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    Income,
    Expense,
}

/// Ledger category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionCategory {
    /// Nightly room charge taken at check-in.
    RoomRevenue,
    /// Deposit held against damages or extras.
    Deposit,
    Other,
}

/// A financial record produced by a check-in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: TransactionId,
    pub recorded_at: DateTime<Utc>,
    pub kind: TransactionKind,
    pub category: TransactionCategory,
    pub amount: f64,
    pub description: String,
    pub room: String,
    pub guest_id_number: String,
    pub guest_name: String,
}

impl Transaction {
    /// Income transaction for a confirmed check-in.
    pub fn from_check_in(request: &CheckInRequest) -> Self {
        Self {
            id: TransactionId::new(),
            recorded_at: Utc::now(),
            kind: TransactionKind::Income,
            category: TransactionCategory::RoomRevenue,
            amount: request.amount,
            description: request.description.clone(),
            room: request.room.clone(),
            guest_id_number: request.guest.id_number.clone(),
            guest_name: request.guest.display_name_th(),
        }
    }
}
