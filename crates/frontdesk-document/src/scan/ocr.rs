// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// ID card recognition client.
//
// The recognition itself is done by a remote vision model; this module only
// prepares the image, sends it, and turns the reply into a `GuestData`. Every
// failure (network, HTTP status, empty or malformed reply, unreadable card)
// comes back as `FrontDeskError::OcrError` so the desk can offer a re-scan or
// manual entry.
//
// # Wire format
//
// Requests go to `{endpoint}/models/{model}:generateContent` with the API key
// in the `x-goog-api-key` header. The body carries the extraction prompt and
// the base64 JPEG as `inlineData`, and asks for `application/json` output.
// The model's reply text is a single JSON object using the `GuestData` field
// names (`idNumber`, `firstNameTH`, ...), sometimes wrapped in a ```json fence.

use std::time::Duration;

use async_trait::async_trait;
use base64::{Engine, engine::general_purpose::STANDARD};
use frontdesk_core::GuestData;
use frontdesk_core::config::OcrSettings;
use frontdesk_core::error::{FrontDeskError, Result};
use reqwest::Client;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::image::prepare_id_card_image;

/// Instructions sent alongside the card image.
pub const EXTRACTION_PROMPT: &str = "\
You are reading a Thai national ID card. Return ONLY a JSON object with these \
string keys: idNumber, title, firstNameTH, lastNameTH, firstNameEN, lastNameEN, \
dateOfBirth, address, issueDate, expiryDate. Copy text exactly as printed, \
keep the Thai script for Thai fields, and use an empty string for anything \
you cannot read.";

/// Anything that can turn an ID card image into guest fields.
///
/// The check-in coordinator depends only on this trait so tests can supply a
/// canned recognizer instead of calling the network.
#[async_trait]
pub trait IdCardRecognizer: Send + Sync {
    /// Extract guest fields from raw image bytes (camera frame or upload).
    async fn recognize(&self, image: &[u8]) -> Result<GuestData>;
}

/// Recognizer backed by a Gemini `generateContent` endpoint.
pub struct GeminiRecognizer {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
    max_image_edge: u32,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text {
        text: &'a str,
    },
    #[serde(rename_all = "camelCase")]
    Image {
        inline_data: InlineData,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct InlineData {
    mime_type: &'static str,
    data: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f32,
}

impl GeminiRecognizer {
    /// Build a recognizer from settings and an explicit API key.
    pub fn new(settings: &OcrSettings, api_key: impl Into<String>) -> Result<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(FrontDeskError::Config("OCR API key is empty".into()));
        }
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| FrontDeskError::Config(format!("HTTP client: {e}")))?;

        Ok(Self {
            client,
            endpoint: settings.endpoint.trim_end_matches('/').to_string(),
            model: settings.model.clone(),
            api_key,
            max_image_edge: settings.max_image_edge,
        })
    }

    /// Build a recognizer using the key stored in `settings`.
    pub fn from_settings(settings: &OcrSettings) -> Result<Self> {
        let key = settings
            .api_key
            .clone()
            .ok_or_else(|| FrontDeskError::Config("no OCR API key configured".into()))?;
        Self::new(settings, key)
    }

    fn url(&self) -> String {
        format!("{}/models/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl IdCardRecognizer for GeminiRecognizer {
    #[instrument(skip_all, fields(model = %self.model, image_len = image.len()))]
    async fn recognize(&self, image: &[u8]) -> Result<GuestData> {
        let jpeg = prepare_id_card_image(image, self.max_image_edge)
            .map_err(|e| FrontDeskError::OcrError(format!("image preparation failed: {e}")))?;

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text {
                        text: EXTRACTION_PROMPT,
                    },
                    Part::Image {
                        inline_data: InlineData {
                            mime_type: "image/jpeg",
                            data: STANDARD.encode(&jpeg),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: 0.0,
            },
        };

        info!(jpeg_len = jpeg.len(), "Sending ID card to recognition service");

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| FrontDeskError::OcrError(format!("request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            warn!(%status, "recognition service returned an error");
            return Err(FrontDeskError::OcrError(format!("service returned {status}: {detail}")));
        }

        let json: serde_json::Value = response
            .json()
            .await
            .map_err(|e| FrontDeskError::OcrError(format!("unreadable response body: {e}")))?;

        let text = candidate_text(&json)?;
        let guest = parse_guest_response(text)?;
        info!(fields = guest.filled_field_count(), "ID card recognised");
        Ok(guest)
    }
}

/// Pull the first candidate's text out of a `generateContent` reply.
fn candidate_text(json: &serde_json::Value) -> Result<&str> {
    json["candidates"][0]["content"]["parts"][0]["text"]
        .as_str()
        .filter(|t| !t.trim().is_empty())
        .ok_or_else(|| FrontDeskError::OcrError("response contained no text".into()))
}

/// Parse the model's reply text into a guest record.
///
/// Accepts a bare JSON object or one wrapped in a Markdown code fence. Null
/// values are treated as missing. Field values are kept exactly as returned.
/// A reply with no ID number and no Thai name is rejected as unreadable.
pub fn parse_guest_response(text: &str) -> Result<GuestData> {
    let body = strip_code_fence(text);

    let mut value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| FrontDeskError::OcrError(format!("malformed JSON from service: {e}")))?;

    let object = value
        .as_object_mut()
        .ok_or_else(|| FrontDeskError::OcrError("expected a JSON object".into()))?;
    object.retain(|_, v| !v.is_null());

    let guest: GuestData = serde_json::from_value(value)
        .map_err(|e| FrontDeskError::OcrError(format!("unexpected field types: {e}")))?;

    if !is_confident(&guest) {
        debug!(fields = guest.filled_field_count(), "recognition below confidence floor");
        return Err(FrontDeskError::OcrError(
            "card could not be read (no ID number or name found)".into(),
        ));
    }
    Ok(guest)
}

fn is_confident(guest: &GuestData) -> bool {
    !guest.id_number.trim().is_empty()
        || !guest.first_name_th.trim().is_empty()
        || !guest.last_name_th.trim().is_empty()
}

fn strip_code_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    // Drop the optional language tag on the opening line.
    let rest = match rest.find('\n') {
        Some(idx) => &rest[idx + 1..],
        None => rest,
    };
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}

#[cfg(test)]
mod tests {
    use super::*;

    const CARD_JSON: &str = r#"{
        "idNumber": "1 2345 67890 12 3",
        "title": "นางสาว",
        "firstNameTH": "สมหญิง",
        "lastNameTH": "รักไทย",
        "firstNameEN": "Somying",
        "lastNameEN": "Rakthai",
        "dateOfBirth": "12 มี.ค. 2535",
        "address": "123/4 หมู่ 5 ต.ในเมือง อ.เมือง จ.เชียงใหม่",
        "issueDate": null,
        "expiryDate": "11 มี.ค. 2575"
    }"#;

    #[test]
    fn parses_bare_json_verbatim() {
        let guest = parse_guest_response(CARD_JSON).expect("parse");
        assert_eq!(guest.id_number, "1 2345 67890 12 3");
        assert_eq!(guest.title, "นางสาว");
        assert_eq!(guest.address, "123/4 หมู่ 5 ต.ในเมือง อ.เมือง จ.เชียงใหม่");
        assert_eq!(guest.issue_date, "");
    }

    #[test]
    fn parses_fenced_json() {
        let fenced = format!("```json\n{CARD_JSON}\n```");
        let guest = parse_guest_response(&fenced).expect("parse fenced");
        assert_eq!(guest.first_name_en, "Somying");
    }

    #[test]
    fn malformed_reply_is_ocr_error() {
        let result = parse_guest_response("Sorry, I can't read this card.");
        assert!(matches!(result, Err(FrontDeskError::OcrError(_))));
    }

    #[test]
    fn non_object_reply_is_ocr_error() {
        let result = parse_guest_response(r#"["idNumber"]"#);
        assert!(matches!(result, Err(FrontDeskError::OcrError(_))));
    }

    #[test]
    fn empty_card_is_low_confidence() {
        let result = parse_guest_response(r#"{ "address": "กรุงเทพฯ", "idNumber": " " }"#);
        assert!(matches!(result, Err(FrontDeskError::OcrError(_))));
    }

    #[test]
    fn candidate_text_requires_text_part() {
        let reply = serde_json::json!({ "candidates": [] });
        assert!(candidate_text(&reply).is_err());

        let reply = serde_json::json!({
            "candidates": [{ "content": { "parts": [{ "text": "{}" }] } }]
        });
        assert_eq!(candidate_text(&reply).expect("text"), "{}");
    }

    #[test]
    fn request_body_matches_service_shape() {
        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![
                    Part::Text { text: "prompt" },
                    Part::Image {
                        inline_data: InlineData {
                            mime_type: "image/jpeg",
                            data: "AAAA".into(),
                        },
                    },
                ],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: 0.0,
            },
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt");
        assert_eq!(json["contents"][0]["parts"][1]["inlineData"]["mimeType"], "image/jpeg");
        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
    }

    #[test]
    fn empty_api_key_is_rejected() {
        let result = GeminiRecognizer::new(&OcrSettings::default(), "  ");
        assert!(matches!(result, Err(FrontDeskError::Config(_))));
        assert!(GeminiRecognizer::from_settings(&OcrSettings::default()).is_err());
    }

    #[tokio::test]
    async fn undecodable_image_fails_before_any_request() {
        let settings = OcrSettings {
            endpoint: "http://127.0.0.1:9".into(),
            ..OcrSettings::default()
        };
        let recognizer = GeminiRecognizer::new(&settings, "test-key").expect("build");
        let result = recognizer.recognize(b"not an image").await;
        match result {
            Err(FrontDeskError::OcrError(msg)) => assert!(msg.contains("image preparation")),
            other => panic!("unexpected result: {other:?}"),
        }
    }
}
