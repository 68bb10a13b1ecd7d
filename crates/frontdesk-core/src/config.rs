// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Application configuration.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default nightly rate pre-filled in the amount field.
pub const DEFAULT_ROOM_RATE: &str = "1500";

/// Default charge description pre-filled in the description field.
pub const DEFAULT_DESCRIPTION: &str = "ค่าบริการห้องพัก Standard";

/// Persistent application settings.
///
/// Unknown or missing keys fall back to [`Default`], so a partial
/// `config.json` written by an older build still loads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Seller details printed on every document.
    pub hotel: HotelProfile,
    /// Amount pre-filled for a new check-in, as typed text.
    pub default_room_rate: String,
    /// Description pre-filled for a new check-in.
    pub default_description: String,
    /// VAT percentage included in tax-invoice totals.
    pub vat_rate_percent: f64,
    /// Paper size for printed documents.
    pub paper_size: crate::PaperSize,
    /// TrueType font with Thai glyphs embedded into PDFs. Builtin Helvetica
    /// is used when unset or unreadable.
    pub thai_font_path: Option<PathBuf>,
    /// Remote ID-card recognition service.
    pub ocr: OcrSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            hotel: HotelProfile::default(),
            default_room_rate: DEFAULT_ROOM_RATE.to_string(),
            default_description: DEFAULT_DESCRIPTION.to_string(),
            vat_rate_percent: 7.0,
            paper_size: crate::PaperSize::A4,
            thai_font_path: None,
            ocr: OcrSettings::default(),
        }
    }
}

/// Seller identity shown in document headers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HotelProfile {
    pub name: String,
    pub address: String,
    /// 13-digit taxpayer identification number.
    pub tax_id: String,
    pub phone: String,
}

impl Default for HotelProfile {
    fn default() -> Self {
        Self {
            name: "Front Desk Hotel".into(),
            address: String::new(),
            tax_id: String::new(),
            phone: String::new(),
        }
    }
}

/// Connection settings for the ID-card recognition service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OcrSettings {
    /// Base URL of the generative-language API.
    pub endpoint: String,
    /// Vision model used for extraction.
    pub model: String,
    /// API key; the app also accepts `FRONTDESK_OCR_API_KEY`.
    pub api_key: Option<String>,
    /// Longest image edge, in pixels, sent to the service.
    pub max_image_edge: u32,
    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for OcrSettings {
    fn default() -> Self {
        Self {
            endpoint: "https://generativelanguage.googleapis.com/v1beta".into(),
            model: "gemini-2.0-flash".into(),
            api_key: None,
            max_image_edge: 1600,
            timeout_secs: 60,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_json_falls_back_to_defaults() {
        let config: AppConfig =
            serde_json::from_str(r#"{ "hotel": { "name": "Baan Suan" } }"#).expect("parse");
        assert_eq!(config.hotel.name, "Baan Suan");
        assert_eq!(config.default_room_rate, "1500");
        assert_eq!(config.default_description, DEFAULT_DESCRIPTION);
        assert_eq!(config.ocr.max_image_edge, 1600);
    }
}
