// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Desktop bridge.
//
// File picking goes through the native dialog (`rfd`). There is no camera or
// print dialog to drive from here, so those report `PlatformUnavailable` and
// the app falls back to photo upload and saving PDFs to disk.

use frontdesk_core::error::{FrontDeskError, Result};
use tracing::{debug, warn};

use crate::traits::*;

pub struct DesktopBridge;

impl PlatformBridge for DesktopBridge {
    fn platform_name(&self) -> &str {
        "Desktop"
    }
}

impl NativePrint for DesktopBridge {
    fn show_print_dialog(&self, _document: &[u8], _mime_type: &str) -> Result<()> {
        warn!("NativePrint::show_print_dialog called on desktop bridge");
        Err(FrontDeskError::PlatformUnavailable)
    }
}

impl NativeCamera for DesktopBridge {
    fn capture_image(&self) -> Result<Option<Vec<u8>>> {
        warn!("NativeCamera::capture_image called on desktop bridge");
        Err(FrontDeskError::PlatformUnavailable)
    }
}

impl NativeFilePicker for DesktopBridge {
    fn pick_file(&self, mime_types: &[&str]) -> Result<Option<String>> {
        let extensions = extensions_for(mime_types);
        let mut dialog = rfd::FileDialog::new();
        if !extensions.is_empty() {
            dialog = dialog.add_filter("Images", &extensions);
        }
        let picked = dialog
            .pick_file()
            .map(|path| path.to_string_lossy().into_owned());
        debug!(picked = picked.is_some(), "file dialog closed");
        Ok(picked)
    }

    fn read_picked_file(&self, path: &str) -> Result<Vec<u8>> {
        let bytes = std::fs::read(path)?;
        debug!(bytes = bytes.len(), "picked file read");
        Ok(bytes)
    }
}

/// File extensions the dialog should offer for `mime_types`.
fn extensions_for(mime_types: &[&str]) -> Vec<&'static str> {
    let mut out = Vec::new();
    for mime in mime_types {
        let exts: &[&'static str] = match *mime {
            "image/jpeg" => &["jpg", "jpeg"],
            "image/png" => &["png"],
            "image/webp" => &["webp"],
            "image/bmp" => &["bmp"],
            "image/tiff" => &["tif", "tiff"],
            "image/*" => &["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff"],
            "application/pdf" => &["pdf"],
            _ => &[],
        };
        for ext in exts {
            if !out.contains(ext) {
                out.push(*ext);
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn camera_and_print_are_unavailable() {
        let bridge = DesktopBridge;
        assert!(matches!(
            bridge.capture_image(),
            Err(FrontDeskError::PlatformUnavailable)
        ));
        assert!(matches!(
            bridge.show_print_dialog(b"%PDF", "application/pdf"),
            Err(FrontDeskError::PlatformUnavailable)
        ));
    }

    #[test]
    fn reads_picked_file() {
        let mut file = tempfile::NamedTempFile::new().expect("tempfile");
        file.write_all(b"card photo").expect("write");
        let path = file.path().to_string_lossy().into_owned();

        let bytes = DesktopBridge.read_picked_file(&path).expect("read");
        assert_eq!(bytes, b"card photo");
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = DesktopBridge
            .read_picked_file("/definitely/not/here.jpg")
            .unwrap_err();
        assert!(matches!(err, FrontDeskError::Io(_)));
    }

    #[test]
    fn mime_types_map_to_unique_extensions() {
        assert_eq!(
            extensions_for(&["image/jpeg", "image/png", "image/*"]),
            vec!["jpg", "jpeg", "png", "webp", "bmp", "tif", "tiff"]
        );
        assert!(extensions_for(&["text/plain"]).is_empty());
    }
}
