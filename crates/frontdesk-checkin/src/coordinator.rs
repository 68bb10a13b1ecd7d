// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Check-in coordinator — ties the editor, the recogniser and the document
// renderer together and hands confirmed check-ins to the host.
//
// A scan is split into `begin_scan` and `finish_scan` so a UI can release its
// state lock while the recognition request is in flight. Only one scan may be
// outstanding; the `ScanTicket` returned by `begin_scan` is the proof of it.

use frontdesk_core::error::Result;
use frontdesk_core::human_errors::{CHECK_IN_SUCCESS_MESSAGE, humanize_error};
use frontdesk_core::{
    AppConfig, CheckInRequest, DocumentKind, FrontDeskError, GuestData, GuestField,
    ValidationError, charge_description,
};
use frontdesk_document::{DocumentRenderer, IdCardRecognizer, RenderedDocument};
use tracing::{debug, info, warn};

use crate::editor::{FormDefaults, GuestEditor};
use crate::session::DeskPhase;

/// Receives confirmed check-ins, typically to record revenue.
pub trait CheckInHandler {
    fn on_check_in(&self, request: &CheckInRequest) -> Result<()>;
}

impl<F> CheckInHandler for F
where
    F: Fn(&CheckInRequest) -> Result<()>,
{
    fn on_check_in(&self, request: &CheckInRequest) -> Result<()> {
        self(request)
    }
}

/// Proof that a scan was started. Consumed by [`FrontDesk::finish_scan`].
#[derive(Debug)]
#[must_use = "a started scan must be finished"]
pub struct ScanTicket {
    _private: (),
}

/// One front-desk check-in session.
#[derive(Debug, Clone)]
pub struct FrontDesk {
    phase: DeskPhase,
    editor: GuestEditor,
    /// Last message for the operator, cleared by `take_notice`.
    notice: Option<String>,
}

impl Default for FrontDesk {
    fn default() -> Self {
        Self::new(FormDefaults::default())
    }
}

impl FrontDesk {
    pub fn new(defaults: FormDefaults) -> Self {
        Self {
            phase: DeskPhase::Empty,
            editor: GuestEditor::new(defaults),
            notice: None,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(FormDefaults::from_config(config))
    }

    pub fn phase(&self) -> DeskPhase {
        self.phase
    }

    pub fn editor(&self) -> &GuestEditor {
        &self.editor
    }

    pub fn guest(&self) -> Option<&GuestData> {
        self.editor.guest()
    }

    pub fn scan_controls_enabled(&self) -> bool {
        self.phase.scan_controls_enabled()
    }

    pub fn notice(&self) -> Option<&str> {
        self.notice.as_deref()
    }

    pub fn take_notice(&mut self) -> Option<String> {
        self.notice.take()
    }

    // -- Scanning --

    /// Enter `Scanning` from `Empty` or `Reviewing`. Fails while another
    /// scan is outstanding.
    pub fn begin_scan(&mut self) -> Result<ScanTicket> {
        match self.phase {
            DeskPhase::Empty | DeskPhase::Reviewing => {}
            DeskPhase::Scanning => {
                warn!("scan requested while another scan is in flight");
                return Err(FrontDeskError::ScanInProgress);
            }
            DeskPhase::Previewing(_) => return Err(self.refuse("scan")),
        }
        self.phase = DeskPhase::Scanning;
        info!("scan started");
        Ok(ScanTicket { _private: () })
    }

    /// Apply the outcome of the scan started by `ticket`.
    ///
    /// On success the result replaces the guest record. On failure the
    /// previous record (if any) is kept, a notice is raised and the error is
    /// returned.
    pub fn finish_scan(&mut self, ticket: ScanTicket, result: Result<GuestData>) -> Result<()> {
        let ScanTicket { .. } = ticket;
        match result {
            Ok(data) => {
                self.editor.set_from_ocr(data);
                self.phase = DeskPhase::Reviewing;
                info!("scan finished");
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "scan failed");
                self.phase = if self.editor.guest().is_some() {
                    DeskPhase::Reviewing
                } else {
                    DeskPhase::Empty
                };
                self.notice = Some(humanize_error(&err).message);
                Err(err)
            }
        }
    }

    /// Begin a scan, run `recognizer` on `image` and apply the result.
    ///
    /// Holds `&mut self` across the request; UIs that share the desk should
    /// use `begin_scan`/`finish_scan` directly.
    pub async fn scan(&mut self, recognizer: &dyn IdCardRecognizer, image: &[u8]) -> Result<()> {
        let ticket = self.begin_scan()?;
        let result = recognizer.recognize(image).await;
        self.finish_scan(ticket, result)
    }

    // -- Editing --

    /// Load an empty record for typing details by hand.
    pub fn start_manual_entry(&mut self) -> Result<()> {
        if self.phase != DeskPhase::Empty {
            return Err(self.refuse("enter details manually"));
        }
        self.editor.start_manual_entry();
        self.phase = DeskPhase::Reviewing;
        Ok(())
    }

    /// Forward an edit to the record. Returns `false` when no guest is
    /// loaded or a scan is in flight, since its result would replace the
    /// record.
    pub fn update_field(&mut self, field: GuestField, value: &str) -> bool {
        if self.phase == DeskPhase::Scanning {
            debug!(?field, "edit ignored while scanning");
            return false;
        }
        self.editor.update_field(field, value)
    }

    /// Returns `false` while scanning.
    pub fn set_room(&mut self, room: impl Into<String>) -> bool {
        if !self.form_editable() {
            return false;
        }
        self.editor.set_room(room);
        true
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) -> bool {
        if !self.form_editable() {
            return false;
        }
        self.editor.set_amount(amount);
        true
    }

    pub fn set_description(&mut self, description: impl Into<String>) -> bool {
        if !self.form_editable() {
            return false;
        }
        self.editor.set_description(description);
        true
    }

    fn form_editable(&self) -> bool {
        self.phase != DeskPhase::Scanning
    }

    /// Drop the guest and return to `Empty`. The charge form is kept.
    pub fn cancel(&mut self) -> Result<()> {
        if self.phase == DeskPhase::Scanning {
            return Err(self.refuse("cancel"));
        }
        self.editor.discard_guest();
        self.phase = DeskPhase::Empty;
        info!("check-in cancelled");
        Ok(())
    }

    // -- Documents --

    /// Open (or switch) the document preview.
    pub fn open_preview(&mut self, kind: DocumentKind) -> Result<()> {
        if !self.phase.has_guest() {
            return Err(self.refuse("open a document preview"));
        }
        self.phase = DeskPhase::Previewing(kind);
        Ok(())
    }

    pub fn close_preview(&mut self) {
        if let DeskPhase::Previewing(_) = self.phase {
            self.phase = DeskPhase::Reviewing;
        }
    }

    /// Document for `kind` from the current record and charge form.
    pub fn render(&self, renderer: &DocumentRenderer, kind: DocumentKind) -> Option<RenderedDocument> {
        let guest = self.editor.guest()?;
        Some(renderer.render(
            guest,
            kind,
            self.editor.preview_amount(),
            self.editor.room(),
            self.editor.description(),
        ))
    }

    /// The document currently being previewed, if a preview is open.
    pub fn render_preview(&self, renderer: &DocumentRenderer) -> Option<RenderedDocument> {
        match self.phase {
            DeskPhase::Previewing(kind) => self.render(renderer, kind),
            _ => None,
        }
    }

    // -- Check-in --

    /// Validate the form and build the request without touching state.
    pub fn validate(&self) -> std::result::Result<CheckInRequest, ValidationError> {
        let guest = self.editor.guest().ok_or(ValidationError::MissingGuest)?;
        // Emitted as typed; only the emptiness check ignores whitespace.
        let room = self.editor.room();
        if room.trim().is_empty() {
            return Err(ValidationError::MissingRoom);
        }
        let amount = self
            .editor
            .parsed_amount()
            .ok_or(ValidationError::InvalidAmount)?;
        Ok(CheckInRequest {
            guest: guest.clone(),
            amount,
            room: room.to_string(),
            description: charge_description(self.editor.description(), room),
        })
    }

    /// Confirm the check-in and hand it to `handler`.
    ///
    /// Refused while scanning or while a preview is open; close the preview
    /// first.
    ///
    /// On success the desk is reset for the next guest. When validation or
    /// the handler fails, the form is left untouched so the operator can
    /// correct it and retry.
    pub fn complete_check_in(&mut self, handler: &dyn CheckInHandler) -> Result<CheckInRequest> {
        if matches!(self.phase, DeskPhase::Scanning | DeskPhase::Previewing(_)) {
            let err = self.refuse("check in");
            warn!(error = %err, "check-in refused");
            self.notice = Some(humanize_error(&err).message);
            return Err(err);
        }
        let request = match self.validate() {
            Ok(request) => request,
            Err(reason) => {
                let err = FrontDeskError::from(reason);
                warn!(%reason, "check-in rejected");
                self.notice = Some(humanize_error(&err).message);
                return Err(err);
            }
        };

        if let Err(err) = handler.on_check_in(&request) {
            warn!(error = %err, "check-in handler failed");
            self.notice = Some(humanize_error(&err).message);
            return Err(err);
        }

        info!(room = %request.room, amount = request.amount, "guest checked in");
        self.editor.clear();
        self.phase = DeskPhase::Empty;
        self.notice = Some(CHECK_IN_SUCCESS_MESSAGE.to_string());
        Ok(request)
    }

    fn refuse(&self, action: &'static str) -> FrontDeskError {
        FrontDeskError::InvalidTransition {
            action,
            phase: self.phase.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use async_trait::async_trait;
    use chrono::NaiveDate;
    use frontdesk_core::config::HotelProfile;
    use frontdesk_core::human_errors::{INCOMPLETE_FORM_MESSAGE, SCAN_FAILED_MESSAGE};

    use super::*;

    struct FakeRecognizer {
        calls: AtomicUsize,
        result: Option<GuestData>,
    }

    impl FakeRecognizer {
        fn returning(data: GuestData) -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: Some(data),
            }
        }

        fn failing() -> Self {
            Self {
                calls: AtomicUsize::new(0),
                result: None,
            }
        }

        fn calls(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl IdCardRecognizer for FakeRecognizer {
        async fn recognize(&self, _image: &[u8]) -> Result<GuestData> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.result
                .clone()
                .ok_or_else(|| FrontDeskError::OcrError("unreadable card".into()))
        }
    }

    #[derive(Default)]
    struct Recorder {
        requests: RefCell<Vec<CheckInRequest>>,
    }

    impl CheckInHandler for Recorder {
        fn on_check_in(&self, request: &CheckInRequest) -> Result<()> {
            self.requests.borrow_mut().push(request.clone());
            Ok(())
        }
    }

    fn somchai() -> GuestData {
        GuestData {
            id_number: "1-2345-67890-1".into(),
            title: "นาย".into(),
            first_name_th: "สมชาย".into(),
            last_name_th: "ใจดี".into(),
            ..Default::default()
        }
    }

    fn reviewing() -> FrontDesk {
        let mut desk = FrontDesk::default();
        let ticket = desk.begin_scan().expect("begin");
        desk.finish_scan(ticket, Ok(somchai())).expect("finish");
        desk
    }

    #[tokio::test]
    async fn scan_loads_result_verbatim() {
        let mut desk = FrontDesk::default();
        let recognizer = FakeRecognizer::returning(somchai());
        desk.scan(&recognizer, b"jpeg").await.expect("scan");

        assert_eq!(desk.phase(), DeskPhase::Reviewing);
        assert_eq!(desk.guest(), Some(&somchai()));
        assert_eq!(recognizer.calls(), 1);
    }

    #[tokio::test]
    async fn second_scan_is_rejected_without_calling_the_service() {
        let mut desk = FrontDesk::default();
        let recognizer = FakeRecognizer::returning(somchai());
        let ticket = desk.begin_scan().expect("first scan");
        assert!(!desk.scan_controls_enabled());

        let err = desk.scan(&recognizer, b"jpeg").await.unwrap_err();
        assert!(matches!(err, FrontDeskError::ScanInProgress));
        assert_eq!(recognizer.calls(), 0);

        desk.finish_scan(ticket, Ok(somchai())).expect("finish");
        assert!(desk.scan_controls_enabled());
    }

    #[tokio::test]
    async fn failed_scan_returns_to_empty_with_notice() {
        let mut desk = FrontDesk::default();
        let err = desk
            .scan(&FakeRecognizer::failing(), b"jpeg")
            .await
            .unwrap_err();

        assert!(matches!(err, FrontDeskError::OcrError(_)));
        assert_eq!(desk.phase(), DeskPhase::Empty);
        assert!(desk.guest().is_none());
        assert_eq!(desk.take_notice().as_deref(), Some(SCAN_FAILED_MESSAGE));
        assert!(desk.scan_controls_enabled());
    }

    #[tokio::test]
    async fn failed_rescan_keeps_previous_guest() {
        let mut desk = reviewing();
        let _ = desk.scan(&FakeRecognizer::failing(), b"jpeg").await;
        assert_eq!(desk.phase(), DeskPhase::Reviewing);
        assert_eq!(desk.guest(), Some(&somchai()));
    }

    #[test]
    fn check_in_emits_request_and_resets() {
        let mut desk = reviewing();
        desk.set_room("101");
        let recorder = Recorder::default();

        let request = desk.complete_check_in(&recorder).expect("check in");
        assert_eq!(request.amount, 1500.0);
        assert_eq!(request.room, "101");
        assert_eq!(request.description, "ค่าบริการห้องพัก Standard - ห้อง 101");
        assert_eq!(request.guest, somchai());
        assert_eq!(recorder.requests.borrow().as_slice(), &[request]);

        assert_eq!(desk.phase(), DeskPhase::Empty);
        assert!(desk.guest().is_none());
        assert_eq!(desk.editor().room(), "");
        assert_eq!(desk.editor().amount(), "1500");
        assert_eq!(desk.editor().description(), "ค่าบริการห้องพัก Standard");
        assert_eq!(desk.take_notice().as_deref(), Some(CHECK_IN_SUCCESS_MESSAGE));
    }

    #[test]
    fn check_in_rejects_missing_room() {
        for room in ["", "  "] {
            let mut desk = reviewing();
            desk.set_room(room);
            let recorder = Recorder::default();

            let err = desk.complete_check_in(&recorder).unwrap_err();
            assert!(matches!(
                err,
                FrontDeskError::Validation(ValidationError::MissingRoom)
            ));
            assert!(recorder.requests.borrow().is_empty());
            assert_eq!(desk.phase(), DeskPhase::Reviewing);
            assert_eq!(desk.guest(), Some(&somchai()));
            assert_eq!(desk.notice(), Some(INCOMPLETE_FORM_MESSAGE));
        }
    }

    #[test]
    fn room_is_emitted_as_typed() {
        let mut desk = reviewing();
        desk.set_room(" 101 ");
        let request = desk.complete_check_in(&Recorder::default()).expect("check in");
        assert_eq!(request.room, " 101 ");
        assert_eq!(request.description, "ค่าบริการห้องพัก Standard - ห้อง  101 ");
    }

    #[test]
    fn form_is_locked_while_scanning() {
        let mut desk = reviewing();
        desk.set_room("101");
        let ticket = desk.begin_scan().expect("rescan");

        assert!(!desk.update_field(GuestField::Address, "typed during scan"));
        assert!(!desk.set_room("999"));
        assert!(!desk.set_amount("1"));
        assert!(!desk.set_description("typed during scan"));
        assert_eq!(desk.editor().room(), "101");
        assert_eq!(desk.guest().expect("guest").address, "");

        desk.finish_scan(ticket, Ok(somchai())).expect("finish");
        assert!(desk.update_field(GuestField::Address, "99 ถนนสุขุมวิท"));
        assert!(desk.set_room("102"));
    }

    #[test]
    fn check_in_refused_while_busy_raises_notice() {
        let mut desk = reviewing();
        desk.set_room("101");
        desk.open_preview(DocumentKind::TaxInvoice).expect("open");
        let recorder = Recorder::default();

        let err = desk.complete_check_in(&recorder).unwrap_err();
        assert!(matches!(err, FrontDeskError::InvalidTransition { .. }));
        assert!(desk.notice().is_some());
        assert!(recorder.requests.borrow().is_empty());
        assert!(matches!(desk.phase(), DeskPhase::Previewing(_)));

        desk.close_preview();
        desk.take_notice();
        let ticket = desk.begin_scan().expect("rescan");
        assert!(desk.complete_check_in(&recorder).is_err());
        assert!(desk.notice().is_some());
        desk.finish_scan(ticket, Ok(somchai())).expect("finish");

        desk.complete_check_in(&recorder).expect("check in");
        assert_eq!(recorder.requests.borrow().len(), 1);
    }

    #[test]
    fn check_in_rejects_unparseable_amounts() {
        for amount in ["", "abc"] {
            let mut desk = reviewing();
            desk.set_room("101");
            desk.set_amount(amount);
            let recorder = Recorder::default();

            let err = desk.complete_check_in(&recorder).unwrap_err();
            assert!(matches!(
                err,
                FrontDeskError::Validation(ValidationError::InvalidAmount)
            ));
            assert!(recorder.requests.borrow().is_empty());
            assert_eq!(desk.editor().amount(), amount);
        }
    }

    #[test]
    fn check_in_without_guest_is_rejected() {
        let mut desk = FrontDesk::default();
        desk.set_room("101");
        let err = desk.complete_check_in(&Recorder::default()).unwrap_err();
        assert!(matches!(
            err,
            FrontDeskError::Validation(ValidationError::MissingGuest)
        ));
    }

    #[test]
    fn handler_failure_keeps_the_form() {
        let mut desk = reviewing();
        desk.set_room("101");
        let failing = |_: &CheckInRequest| -> Result<()> {
            Err(FrontDeskError::Database("disk full".into()))
        };

        let err = desk.complete_check_in(&failing).unwrap_err();
        assert!(matches!(err, FrontDeskError::Database(_)));
        assert_eq!(desk.phase(), DeskPhase::Reviewing);
        assert_eq!(desk.editor().room(), "101");
        assert!(desk.guest().is_some());
    }

    #[test]
    fn manual_entry_starts_blank_record() {
        let mut desk = FrontDesk::default();
        desk.start_manual_entry().expect("manual");
        assert_eq!(desk.phase(), DeskPhase::Reviewing);
        assert_eq!(desk.guest(), Some(&GuestData::default()));
        assert!(desk.start_manual_entry().is_err());
    }

    #[test]
    fn cancel_drops_guest_but_keeps_form() {
        let mut desk = reviewing();
        desk.set_room("202");
        desk.cancel().expect("cancel");
        assert_eq!(desk.phase(), DeskPhase::Empty);
        assert!(desk.guest().is_none());
        assert_eq!(desk.editor().room(), "202");
    }

    #[test]
    fn preview_requires_guest_and_renders_current_form() {
        let mut desk = FrontDesk::default();
        assert!(matches!(
            desk.open_preview(DocumentKind::TaxInvoice),
            Err(FrontDeskError::InvalidTransition { .. })
        ));

        let mut desk = reviewing();
        desk.set_room("305");
        desk.set_amount("oops");
        desk.open_preview(DocumentKind::DepositReceipt).expect("open");

        let renderer = DocumentRenderer::new(
            HotelProfile::default(),
            7.0,
            NaiveDate::from_ymd_opt(2026, 10, 19).expect("date"),
        );
        let doc = desk.render_preview(&renderer).expect("preview");
        assert_eq!(doc.kind, DocumentKind::DepositReceipt);
        assert_eq!(doc.field("ห้องพัก"), Some("305"));
        assert!(doc.to_plain_text().contains("0.00"));

        desk.close_preview();
        assert_eq!(desk.phase(), DeskPhase::Reviewing);
        assert!(desk.render_preview(&renderer).is_none());
    }

    #[test]
    fn edits_flow_through_to_request() {
        let mut desk = reviewing();
        assert!(desk.update_field(GuestField::FullNameTh, "นาง สมศรี"));
        desk.set_room("9");
        desk.set_description("ค่าบริการห้องพัก Deluxe");
        desk.set_amount("2500");

        let request = desk.validate().expect("valid");
        assert_eq!(request.guest.title, "นาง");
        assert_eq!(request.guest.first_name_th, "สมศรี");
        assert_eq!(request.description, "ค่าบริการห้องพัก Deluxe - ห้อง 9");
        assert_eq!(request.amount, 2500.0);
    }
}
