// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Central service layer — opens the ledger and audit databases, owns the
// configuration and the platform bridge, and gives the Dioxus pages
// convenient entry points for scanning, printing and checking in.
//
// The rusqlite stores are `Send` but not `Sync`, so they sit behind
// `Arc<Mutex<>>` like every other shared backend object.

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Local;
use frontdesk_bridge::{PlatformBridge, platform_bridge};
use frontdesk_checkin::FrontDesk;
use frontdesk_core::error::{FrontDeskError, Result};
use frontdesk_core::{AppConfig, CheckInRequest, Transaction};
use frontdesk_document::{DocumentRenderer, GeminiRecognizer, PdfWriter, RenderedDocument};
use frontdesk_ledger::{AuditEntry, AuditLog, LedgerStore, LedgerSummary, hash_bytes};
use tracing::{error, info, warn};

use super::data_dir;

/// Environment variable that overrides the configured OCR API key.
pub const API_KEY_ENV: &str = "FRONTDESK_OCR_API_KEY";

const CONFIG_FILE: &str = "config.json";

/// Image types offered when uploading an ID card photo.
const ID_CARD_MIME_TYPES: &[&str] = &["image/jpeg", "image/png", "image/webp"];

/// Shown while PDFs would fall back to a builtin font without Thai glyphs.
pub const THAI_FONT_MISSING_MESSAGE: &str =
    "ยังไม่ได้ตั้งค่าฟอนต์ภาษาไทย (.ttf) เอกสาร PDF จะไม่แสดงตัวอักษรไทย";

/// What happened to a document sent for printing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrintOutcome {
    /// The platform print dialog was shown.
    DialogShown,
    /// No print dialog on this platform; the PDF was saved here instead.
    Saved(PathBuf),
}

/// Shared services, available to all components via
/// `use_context::<AppServices>()`. Cheap to clone.
#[derive(Clone)]
pub struct AppServices {
    ledger: Arc<Mutex<LedgerStore>>,
    audit_log: Arc<Mutex<AuditLog>>,
    bridge: Arc<dyn PlatformBridge>,
    data_dir: PathBuf,
    config: Arc<Mutex<AppConfig>>,
}

impl AppServices {
    /// Open persistent storage in the data directory. Call once at startup.
    pub fn init() -> Result<Self> {
        let dir = data_dir::data_dir();
        info!(path = %dir.display(), "initialising app services");

        let ledger = LedgerStore::open(dir.join("ledger.db"))?;
        let audit_log = AuditLog::open(dir.join("audit.db"))?;
        let config = load_config(&dir).unwrap_or_default();

        Ok(Self::assemble(ledger, audit_log, dir, config))
    }

    /// In-memory databases, used when the data directory is unusable.
    pub fn fallback() -> Result<Self> {
        let dir = std::env::temp_dir().join("frontdesk");
        std::fs::create_dir_all(&dir)?;
        Ok(Self::assemble(
            LedgerStore::open_in_memory()?,
            AuditLog::open_in_memory()?,
            dir,
            AppConfig::default(),
        ))
    }

    fn assemble(ledger: LedgerStore, audit_log: AuditLog, dir: PathBuf, config: AppConfig) -> Self {
        let bridge: Arc<dyn PlatformBridge> = Arc::from(platform_bridge());
        info!(platform = bridge.platform_name(), "app services initialised");
        Self {
            ledger: Arc::new(Mutex::new(ledger)),
            audit_log: Arc::new(Mutex::new(audit_log)),
            bridge,
            data_dir: dir,
            config: Arc::new(Mutex::new(config)),
        }
    }

    // -- Scanning ------------------------------------------------------------

    /// Recognizer for the configured service. The environment key wins over
    /// the stored one.
    pub fn recognizer(&self) -> Result<GeminiRecognizer> {
        let config = self.config();
        let key = resolve_api_key(std::env::var(API_KEY_ENV).ok(), config.ocr.api_key.as_deref())
            .ok_or_else(|| {
                FrontDeskError::Config(format!("set {API_KEY_ENV} or an API key in settings"))
            })?;
        GeminiRecognizer::new(&config.ocr, key)
    }

    /// Photo of an ID card from the camera, or from a file where there is no
    /// camera. `None` when the operator cancelled.
    pub fn capture_id_card(&self) -> Result<Option<Vec<u8>>> {
        match self.bridge.capture_image() {
            Err(FrontDeskError::PlatformUnavailable) => self.pick_id_card(),
            other => other,
        }
    }

    /// ID card photo chosen from disk.
    pub fn pick_id_card(&self) -> Result<Option<Vec<u8>>> {
        match self.bridge.pick_file(ID_CARD_MIME_TYPES)? {
            Some(path) => self.bridge.read_picked_file(&path).map(Some),
            None => Ok(None),
        }
    }

    // -- Documents -----------------------------------------------------------

    /// Renderer for today's documents.
    pub fn renderer(&self) -> DocumentRenderer {
        DocumentRenderer::from_config(&self.config(), Local::now().date_naive())
    }

    fn pdf_writer(&self) -> PdfWriter {
        let config = self.config();
        let paper = config.paper_size;
        match &config.thai_font_path {
            Some(path) => PdfWriter::new(paper).with_font_file(path).unwrap_or_else(|e| {
                warn!(path = %path.display(), error = %e, "Thai font unavailable, using builtin font");
                PdfWriter::new(paper)
            }),
            None => PdfWriter::new(paper),
        }
    }

    /// Print through the platform dialog, or save the PDF when the platform
    /// has none.
    pub fn print_document(&self, document: &RenderedDocument) -> Result<PrintOutcome> {
        let bytes = self.pdf_writer().render_document(document)?;
        let hash = hash_bytes(&bytes);

        match self.bridge.show_print_dialog(&bytes, "application/pdf") {
            Ok(()) => {
                self.audit("print", &hash, true, Some(&document.number));
                Ok(PrintOutcome::DialogShown)
            }
            Err(FrontDeskError::PlatformUnavailable) => {
                let path = self.save_document(document, &bytes)?;
                self.audit("save_document", &hash, true, Some(&document.number));
                Ok(PrintOutcome::Saved(path))
            }
            Err(e) => {
                self.audit("print", &hash, false, Some(&e.to_string()));
                Err(e)
            }
        }
    }

    fn save_document(&self, document: &RenderedDocument, bytes: &[u8]) -> Result<PathBuf> {
        let dir = data_dir::subdir(&self.data_dir, "documents")?;
        let path = dir.join(document_file_name(document));
        std::fs::write(&path, bytes)?;
        info!(path = %path.display(), "document saved");
        Ok(path)
    }

    // -- Check-in ------------------------------------------------------------

    /// Complete the desk's check-in, recording revenue in the ledger.
    pub fn check_in(&self, desk: &mut FrontDesk) -> Result<CheckInRequest> {
        let ledger = lock(&self.ledger)?;
        let record = |request: &CheckInRequest| -> Result<()> {
            let tx = ledger.record_check_in(request)?;
            self.audit(
                "check_in",
                &tx.id.to_string(),
                true,
                Some(&format!("room {}", tx.room)),
            );
            Ok(())
        };
        desk.complete_check_in(&record)
    }

    pub fn recent_transactions(&self, limit: u32) -> Result<Vec<Transaction>> {
        lock(&self.ledger)?.recent(limit)
    }

    pub fn ledger_summary(&self) -> Result<LedgerSummary> {
        lock(&self.ledger)?.summary()
    }

    // -- Audit trail ---------------------------------------------------------

    /// Record an audit entry; failures are logged, not returned.
    pub fn audit(&self, action: &str, subject: &str, success: bool, details: Option<&str>) {
        if let Ok(log) = self.audit_log.lock()
            && let Err(e) = log.record(action, subject, success, details)
        {
            error!(error = %e, "failed to record audit entry");
        }
    }

    pub fn recent_audit_entries(&self, limit: u32) -> Result<Vec<AuditEntry>> {
        lock(&self.audit_log)?.recent_entries(limit)
    }

    pub fn audit_count(&self) -> Result<u64> {
        lock(&self.audit_log)?.count()
    }

    // -- Config persistence --------------------------------------------------

    pub fn config(&self) -> AppConfig {
        match self.config.lock() {
            Ok(config) => config.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Update and persist the config.
    pub fn save_config(&self, config: &AppConfig) -> Result<()> {
        *lock(&self.config)? = config.clone();
        persist_config(&self.data_dir, config)
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex
        .lock()
        .map_err(|_| FrontDeskError::Database("service lock poisoned".into()))
}

/// Non-blank key from the environment, else from the config.
fn resolve_api_key(env: Option<String>, configured: Option<&str>) -> Option<String> {
    env.filter(|k| !k.trim().is_empty())
        .or_else(|| configured.filter(|k| !k.trim().is_empty()).map(str::to_string))
}

/// Warning for the operator when printed documents cannot show Thai text.
pub fn thai_font_warning(config: &AppConfig) -> Option<&'static str> {
    match &config.thai_font_path {
        Some(path) if path.is_file() => None,
        _ => Some(THAI_FONT_MISSING_MESSAGE),
    }
}

fn document_file_name(document: &RenderedDocument) -> String {
    format!("{}-{}.pdf", document.number, document.kind.slug())
}

// -- Config file persistence -------------------------------------------------

fn load_config(data_dir: &Path) -> Option<AppConfig> {
    let path = data_dir.join(CONFIG_FILE);
    let data = std::fs::read_to_string(&path).ok()?;
    match serde_json::from_str(&data) {
        Ok(config) => Some(config),
        Err(e) => {
            warn!(error = %e, "config.json unreadable, using defaults");
            None
        }
    }
}

fn persist_config(data_dir: &Path, config: &AppConfig) -> Result<()> {
    let path = data_dir.join(CONFIG_FILE);
    let json = serde_json::to_string_pretty(config)?;
    std::fs::write(&path, json)?;
    Ok(())
}
