// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Guest record editor — the record under review plus the charge form.
//
// Purely in-memory. Values are stored exactly as typed or as returned by the
// recognition service; nothing is trimmed or normalised on the way in.

use frontdesk_core::AppConfig;
use frontdesk_core::config::{DEFAULT_DESCRIPTION, DEFAULT_ROOM_RATE};
use frontdesk_core::{GuestData, GuestField};
use tracing::debug;

/// Honorifics recognised at the start of the composed Thai name control.
pub const KNOWN_TITLES: &[&str] = &[
    "นาย",
    "นาง",
    "นางสาว",
    "น.ส.",
    "ด.ช.",
    "ด.ญ.",
    "เด็กชาย",
    "เด็กหญิง",
    "Mr.",
    "Mrs.",
    "Ms.",
    "Miss",
];

/// Values the charge form resets to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormDefaults {
    pub amount: String,
    pub description: String,
}

impl Default for FormDefaults {
    fn default() -> Self {
        Self {
            amount: DEFAULT_ROOM_RATE.to_string(),
            description: DEFAULT_DESCRIPTION.to_string(),
        }
    }
}

impl FormDefaults {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            amount: config.default_room_rate.clone(),
            description: config.default_description.clone(),
        }
    }
}

/// At most one guest record plus the room, amount and description fields.
#[derive(Debug, Clone, PartialEq)]
pub struct GuestEditor {
    guest: Option<GuestData>,
    room: String,
    /// Kept as typed; parsed only at check-in.
    amount: String,
    description: String,
    defaults: FormDefaults,
}

impl Default for GuestEditor {
    fn default() -> Self {
        Self::new(FormDefaults::default())
    }
}

impl GuestEditor {
    pub fn new(defaults: FormDefaults) -> Self {
        Self {
            guest: None,
            room: String::new(),
            amount: defaults.amount.clone(),
            description: defaults.description.clone(),
            defaults,
        }
    }

    pub fn guest(&self) -> Option<&GuestData> {
        self.guest.as_ref()
    }

    pub fn room(&self) -> &str {
        &self.room
    }

    pub fn amount(&self) -> &str {
        &self.amount
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    /// Replace the whole record with a recognition result.
    pub fn set_from_ocr(&mut self, data: GuestData) {
        debug!(fields = data.filled_field_count(), "guest record replaced from scan");
        self.guest = Some(data);
    }

    /// Start an empty record for typing details by hand.
    pub fn start_manual_entry(&mut self) {
        self.guest = Some(GuestData::default());
    }

    /// Current text of a review control, `None` when no guest is loaded.
    pub fn field_value(&self, field: GuestField) -> Option<String> {
        self.guest.as_ref().map(|g| g.field(field))
    }

    /// Write one control back into the record.
    ///
    /// Returns `false` (and changes nothing) when no guest is loaded. The
    /// composed `FullNameTh` control is split by [`split_title`].
    pub fn update_field(&mut self, field: GuestField, value: &str) -> bool {
        let Some(guest) = self.guest.as_mut() else {
            return false;
        };
        let value = value.to_string();
        match field {
            GuestField::IdNumber => guest.id_number = value,
            GuestField::Title => guest.title = value,
            GuestField::FirstNameTh => guest.first_name_th = value,
            GuestField::LastNameTh => guest.last_name_th = value,
            GuestField::FirstNameEn => guest.first_name_en = value,
            GuestField::LastNameEn => guest.last_name_en = value,
            GuestField::DateOfBirth => guest.date_of_birth = value,
            GuestField::Address => guest.address = value,
            GuestField::IssueDate => guest.issue_date = value,
            GuestField::ExpiryDate => guest.expiry_date = value,
            GuestField::FullNameTh => {
                let (title, first) = split_title(&value, &guest.title);
                guest.title = title;
                guest.first_name_th = first;
            }
        }
        true
    }

    pub fn set_room(&mut self, room: impl Into<String>) {
        self.room = room.into();
    }

    pub fn set_amount(&mut self, amount: impl Into<String>) {
        self.amount = amount.into();
    }

    pub fn set_description(&mut self, description: impl Into<String>) {
        self.description = description.into();
    }

    /// Amount as a finite number, `None` when empty or unparseable.
    pub fn parsed_amount(&self) -> Option<f64> {
        parse_amount(&self.amount)
    }

    /// Amount for document previews; unparseable input previews as zero.
    pub fn preview_amount(&self) -> f64 {
        self.parsed_amount().unwrap_or(0.0)
    }

    /// Drop the guest; room, amount and description keep their values.
    pub fn discard_guest(&mut self) {
        self.guest = None;
    }

    /// Reset everything: no guest, empty room, default amount and description.
    pub fn clear(&mut self) {
        self.guest = None;
        self.room.clear();
        self.amount = self.defaults.amount.clone();
        self.description = self.defaults.description.clone();
    }
}

fn parse_amount(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Split the composed `"<title> <first name>"` control into its parts.
///
/// A value that still starts with `current_title` keeps it, so rank titles
/// such as `ร.ต.อ.` survive an unchanged write-back. Otherwise a leading token
/// that is one of [`KNOWN_TITLES`] becomes the title and the rest the first
/// name, and failing that the title is cleared and the whole trimmed value is
/// the first name.
pub fn split_title(value: &str, current_title: &str) -> (String, String) {
    let trimmed = value.trim();
    let current = current_title.trim();
    if !current.is_empty()
        && let Some(rest) = trimmed.strip_prefix(current)
        && (rest.is_empty() || rest.starts_with(char::is_whitespace))
    {
        return (current.to_string(), rest.trim_start().to_string());
    }
    if let Some((head, rest)) = trimmed.split_once(char::is_whitespace)
        && KNOWN_TITLES.contains(&head)
    {
        return (head.to_string(), rest.trim_start().to_string());
    }
    if KNOWN_TITLES.contains(&trimmed) {
        return (trimmed.to_string(), String::new());
    }
    (String::new(), trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanned() -> GuestData {
        GuestData {
            id_number: "1-2345-67890-1".into(),
            title: "นาย".into(),
            first_name_th: "สมชาย".into(),
            last_name_th: "ใจดี".into(),
            address: "99 ถนนสุขุมวิท".into(),
            ..Default::default()
        }
    }

    #[test]
    fn fresh_editor_has_defaults() {
        let editor = GuestEditor::default();
        assert!(editor.guest().is_none());
        assert_eq!(editor.room(), "");
        assert_eq!(editor.amount(), "1500");
        assert_eq!(editor.description(), "ค่าบริการห้องพัก Standard");
    }

    #[test]
    fn ocr_result_is_stored_verbatim() {
        let mut editor = GuestEditor::default();
        let data = GuestData {
            address: "  12/3 ซอย 4  ".into(),
            ..scanned()
        };
        editor.set_from_ocr(data.clone());
        assert_eq!(editor.guest(), Some(&data));
    }

    #[test]
    fn update_without_guest_is_ignored() {
        let mut editor = GuestEditor::default();
        assert!(!editor.update_field(GuestField::Address, "x"));
        assert!(editor.guest().is_none());
    }

    #[test]
    fn update_touches_only_the_named_field() {
        let mut editor = GuestEditor::default();
        editor.set_from_ocr(scanned());
        assert!(editor.update_field(GuestField::LastNameTh, "ใจงาม"));
        let guest = editor.guest().expect("guest");
        assert_eq!(guest.last_name_th, "ใจงาม");
        assert_eq!(guest.first_name_th, "สมชาย");
        assert_eq!(guest.title, "นาย");
    }

    #[test]
    fn composed_name_writes_title_and_first_name() {
        let mut editor = GuestEditor::default();
        editor.set_from_ocr(scanned());
        assert_eq!(
            editor.field_value(GuestField::FullNameTh).as_deref(),
            Some("นาย สมชาย")
        );

        editor.update_field(GuestField::FullNameTh, "นางสาว สมศรี");
        let guest = editor.guest().expect("guest");
        assert_eq!(guest.title, "นางสาว");
        assert_eq!(guest.first_name_th, "สมศรี");
    }

    #[test]
    fn composed_name_without_title_clears_title() {
        let mut editor = GuestEditor::default();
        editor.set_from_ocr(scanned());
        editor.update_field(GuestField::FullNameTh, "สมชาย");
        let guest = editor.guest().expect("guest");
        assert_eq!(guest.title, "");
        assert_eq!(guest.first_name_th, "สมชาย");
    }

    #[test]
    fn split_title_keeps_unknown_first_token_in_name() {
        assert_eq!(
            split_title("สมชาย ใจดี", ""),
            (String::new(), "สมชาย ใจดี".to_string())
        );
        assert_eq!(split_title("Mr. John", ""), ("Mr.".to_string(), "John".to_string()));
        assert_eq!(split_title("นาย", ""), ("นาย".to_string(), String::new()));
        assert_eq!(split_title("   ", ""), (String::new(), String::new()));
    }

    #[test]
    fn unlisted_title_survives_unchanged_write_back() {
        let mut editor = GuestEditor::default();
        editor.set_from_ocr(GuestData {
            title: "ร.ต.อ.".into(),
            ..scanned()
        });
        let shown = editor.field_value(GuestField::FullNameTh).expect("shown");
        assert_eq!(shown, "ร.ต.อ. สมชาย");
        editor.update_field(GuestField::FullNameTh, &shown);
        let guest = editor.guest().expect("guest");
        assert_eq!(guest.title, "ร.ต.อ.");
        assert_eq!(guest.first_name_th, "สมชาย");

        editor.update_field(GuestField::FullNameTh, "ร.ต.อ. สมศักดิ์");
        assert_eq!(editor.guest().expect("guest").first_name_th, "สมศักดิ์");
    }

    #[test]
    fn split_title_prefers_current_title() {
        assert_eq!(
            split_title("ว่าที่ ร.ต. สมหญิง", "ว่าที่ ร.ต."),
            ("ว่าที่ ร.ต.".to_string(), "สมหญิง".to_string())
        );
        assert_eq!(split_title("Dr. Ann", "Dr."), ("Dr.".to_string(), "Ann".to_string()));
        // Title glued to the name is not a prefix match.
        assert_eq!(
            split_title("Dr.Ann", "Dr."),
            (String::new(), "Dr.Ann".to_string())
        );
        // A different honorific replaces the stored one.
        assert_eq!(
            split_title("นาง สมศรี", "Dr."),
            ("นาง".to_string(), "สมศรี".to_string())
        );
    }

    #[test]
    fn amount_parsing() {
        let mut editor = GuestEditor::default();
        assert_eq!(editor.parsed_amount(), Some(1500.0));
        editor.set_amount("");
        assert_eq!(editor.parsed_amount(), None);
        editor.set_amount("abc");
        assert_eq!(editor.parsed_amount(), None);
        assert_eq!(editor.preview_amount(), 0.0);
        editor.set_amount("NaN");
        assert_eq!(editor.parsed_amount(), None);
        editor.set_amount(" 1250.50 ");
        assert_eq!(editor.parsed_amount(), Some(1250.5));
    }

    #[test]
    fn clear_resets_everything() {
        let mut editor = GuestEditor::default();
        editor.set_from_ocr(scanned());
        editor.set_room("101");
        editor.set_amount("900");
        editor.set_description("Deluxe");
        editor.clear();
        assert_eq!(editor, GuestEditor::default());
    }

    #[test]
    fn discard_guest_keeps_form() {
        let mut editor = GuestEditor::default();
        editor.set_from_ocr(scanned());
        editor.set_room("101");
        editor.discard_guest();
        assert!(editor.guest().is_none());
        assert_eq!(editor.room(), "101");
    }

    #[test]
    fn defaults_follow_config() {
        let config = AppConfig {
            default_room_rate: "2200".into(),
            default_description: "ค่าบริการห้องพัก Deluxe".into(),
            ..AppConfig::default()
        };
        let mut editor = GuestEditor::new(FormDefaults::from_config(&config));
        editor.set_amount("1");
        editor.clear();
        assert_eq!(editor.amount(), "2200");
        assert_eq!(editor.description(), "ค่าบริการห้องพัก Deluxe");
    }
}
