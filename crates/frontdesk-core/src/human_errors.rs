// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for front desk staff.
//
// Every technical error is mapped to a short Thai message with a clear
// suggestion. Nothing here is fatal: each error leaves the desk in a state
// the user can act on.

use crate::error::{FrontDeskError, ValidationError};

/// Shown when the OCR service cannot produce a guest record.
pub const SCAN_FAILED_MESSAGE: &str = "สแกนไม่สำเร็จ กรุณาลองใหม่หรือพิมพ์ข้อมูลเอง";

/// Shown for every check-in validation failure.
pub const INCOMPLETE_FORM_MESSAGE: &str = "กรุณากรอกข้อมูลให้ครบถ้วนก่อนเช็คอิน";

/// Shown after a check-in has been handed to the ledger.
pub const CHECK_IN_SUCCESS_MESSAGE: &str = "เช็คอินสำเร็จ! ระบบบันทึกรายได้เข้าสู่หน้าบัญชีแล้ว";

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Network blip or flaky recognition; trying again may work.
    Transient,
    /// The user must fill something in or change something.
    ActionRequired,
    /// Retrying will not help (unsupported platform, bad file).
    Permanent,
}

/// A human-readable error with a message and an actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Summary shown as the alert heading.
    pub message: String,
    /// What the user should try next.
    pub suggestion: String,
    /// Whether offering a "try again" button makes sense.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `FrontDeskError` into a `HumanError` for the alert banner.
pub fn humanize_error(err: &FrontDeskError) -> HumanError {
    match err {
        // -- Scanning --
        FrontDeskError::OcrError(_) => HumanError {
            message: SCAN_FAILED_MESSAGE.into(),
            suggestion: "ถ่ายรูปบัตรใหม่ให้เห็นตัวอักษรชัดเจน หรือกด \"กรอกข้อมูลเอง\"".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FrontDeskError::ImageError(_) => HumanError {
            message: "ไม่สามารถอ่านไฟล์รูปภาพนี้ได้".into(),
            suggestion: "ลองบันทึกรูปเป็น JPEG หรือ PNG แล้วอัปโหลดใหม่".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FrontDeskError::ScanInProgress => HumanError {
            message: "กำลังสแกนบัตรอยู่".into(),
            suggestion: "รอให้การสแกนปัจจุบันเสร็จก่อน".into(),
            retriable: false,
            severity: Severity::Transient,
        },

        // -- Check-in --
        FrontDeskError::Validation(reason) => HumanError {
            message: INCOMPLETE_FORM_MESSAGE.into(),
            suggestion: validation_hint(*reason).into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        FrontDeskError::InvalidTransition { .. } => HumanError {
            message: "ไม่สามารถทำรายการนี้ได้ในขณะนี้".into(),
            suggestion: "สแกนหรือกรอกข้อมูลผู้เข้าพักก่อน".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Documents --
        FrontDeskError::PdfError(_) => HumanError {
            message: "สร้างเอกสารสำหรับพิมพ์ไม่สำเร็จ".into(),
            suggestion: "ลองอีกครั้ง หรือตรวจสอบฟอนต์ภาษาไทยในหน้าตั้งค่า".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        // -- Storage --
        FrontDeskError::Database(_) => HumanError {
            message: "บันทึกข้อมูลบัญชีไม่สำเร็จ".into(),
            suggestion: "ข้อมูลเช็คอินยังอยู่ในฟอร์ม ลองกดยืนยันอีกครั้ง".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FrontDeskError::Io(io_err) => {
            if io_err.kind() == std::io::ErrorKind::NotFound {
                HumanError {
                    message: "ไม่พบไฟล์".into(),
                    suggestion: "ไฟล์อาจถูกย้ายหรือลบ ลองเลือกไฟล์ใหม่".into(),
                    retriable: false,
                    severity: Severity::ActionRequired,
                }
            } else {
                HumanError {
                    message: "อ่านหรือเขียนไฟล์ไม่สำเร็จ".into(),
                    suggestion: "ลองอีกครั้ง หากยังไม่ได้ พื้นที่เก็บข้อมูลอาจเต็ม".into(),
                    retriable: true,
                    severity: Severity::Transient,
                }
            }
        }

        FrontDeskError::Serialization(_) | FrontDeskError::Config(_) => HumanError {
            message: "การตั้งค่าของโปรแกรมมีปัญหา".into(),
            suggestion: "ตรวจสอบหน้าตั้งค่าแล้วบันทึกใหม่".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        // -- Platform --
        FrontDeskError::Bridge(_) => HumanError {
            message: "อุปกรณ์ไม่ตอบสนอง".into(),
            suggestion: "ลองเปิดโปรแกรมใหม่ หรือใช้การอัปโหลดรูปแทน".into(),
            retriable: true,
            severity: Severity::Transient,
        },

        FrontDeskError::PlatformUnavailable => HumanError {
            message: "อุปกรณ์นี้ไม่รองรับฟังก์ชันนี้".into(),
            suggestion: "ใช้การอัปโหลดรูปหรือบันทึกเป็น PDF แทน".into(),
            retriable: false,
            severity: Severity::Permanent,
        },
    }
}

fn validation_hint(reason: ValidationError) -> &'static str {
    match reason {
        ValidationError::MissingGuest => "สแกนบัตรประชาชนหรือกรอกข้อมูลผู้เข้าพักก่อน",
        ValidationError::MissingRoom => "ระบุเลขห้องพัก",
        ValidationError::InvalidAmount => "ระบุราคาห้องพักเป็นตัวเลข",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_validation_failure_shares_one_message() {
        for reason in [
            ValidationError::MissingGuest,
            ValidationError::MissingRoom,
            ValidationError::InvalidAmount,
        ] {
            let human = humanize_error(&FrontDeskError::Validation(reason));
            assert_eq!(human.message, INCOMPLETE_FORM_MESSAGE);
            assert_eq!(human.severity, Severity::ActionRequired);
            assert!(!human.retriable);
        }
    }

    #[test]
    fn ocr_failure_offers_retry_or_manual_entry() {
        let human = humanize_error(&FrontDeskError::OcrError("HTTP 503".into()));
        assert_eq!(human.message, SCAN_FAILED_MESSAGE);
        assert!(human.retriable);
    }

    #[test]
    fn missing_file_is_action_required() {
        let err = FrontDeskError::Io(std::io::Error::new(std::io::ErrorKind::NotFound, "gone"));
        assert_eq!(humanize_error(&err).severity, Severity::ActionRequired);
    }

    #[test]
    fn unsupported_platform_is_permanent() {
        let human = humanize_error(&FrontDeskError::PlatformUnavailable);
        assert_eq!(human.severity, Severity::Permanent);
    }
}
