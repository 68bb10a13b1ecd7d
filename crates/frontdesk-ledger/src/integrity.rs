// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document fingerprints for the audit trail.

use sha2::{Digest, Sha256};

/// Lowercase hex SHA-256 of `data`.
///
/// Printed and saved PDFs are logged by this digest, never by content.
pub fn hash_bytes(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}
