// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// frontdesk-ledger — Where confirmed check-ins end up.
//
// `LedgerStore` keeps income transactions in SQLite and is the host's
// `CheckInHandler`. `AuditLog` is an append-only trail of check-ins and
// printed documents, fingerprinted with `hash_bytes`.

pub mod audit;
pub mod integrity;
pub mod ledger;

pub use audit::{AuditEntry, AuditLog};
pub use integrity::hash_bytes;
pub use ledger::{LedgerStore, LedgerSummary};
