// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Income ledger backed by SQLite.
//
// One row per transaction. Enum columns hold their serde JSON form so the
// stored values match what the rest of the application serialises.

use std::path::Path;

use chrono::{DateTime, Utc};
use rusqlite::{Connection, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

use frontdesk_checkin::CheckInHandler;
use frontdesk_core::error::{FrontDeskError, Result};
use frontdesk_core::types::{
    CheckInRequest, Transaction, TransactionCategory, TransactionId, TransactionKind,
};

const CREATE_TABLE_SQL: &str = r#"
    CREATE TABLE IF NOT EXISTS transactions (
        id TEXT PRIMARY KEY,
        recorded_at TEXT NOT NULL,
        kind TEXT NOT NULL,
        category TEXT NOT NULL,
        amount REAL NOT NULL,
        description TEXT NOT NULL,
        room TEXT NOT NULL,
        guest_id_number TEXT NOT NULL,
        guest_name TEXT NOT NULL
    )
"#;

const SELECT_COLUMNS: &str = "SELECT id, recorded_at, kind, category, amount, description, \
     room, guest_id_number, guest_name FROM transactions";

/// Totals over every recorded transaction.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LedgerSummary {
    pub count: u64,
    pub income: f64,
    pub expense: f64,
}

impl LedgerSummary {
    pub fn net(&self) -> f64 {
        self.income - self.expense
    }
}

fn db_err(context: &str, e: rusqlite::Error) -> FrontDeskError {
    FrontDeskError::Database(format!("{context}: {e}"))
}

/// Persistent ledger of check-in revenue.
///
/// Synchronous like all `rusqlite` access; the app keeps it behind a mutex.
pub struct LedgerStore {
    conn: Connection,
}

impl LedgerStore {
    /// Open (or create) the ledger database at `path`.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref()).map_err(|e| db_err("open", e))?;
        conn.pragma_update(None, "journal_mode", "WAL")
            .map_err(|e| db_err("WAL pragma", e))?;
        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| db_err("create table", e))?;

        info!("ledger database opened");
        Ok(Self { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| db_err("open in-memory", e))?;
        conn.execute_batch(CREATE_TABLE_SQL)
            .map_err(|e| db_err("create table", e))?;

        debug!("in-memory ledger opened");
        Ok(Self { conn })
    }

    /// Append a transaction.
    #[instrument(skip(self, tx), fields(tx_id = %tx.id))]
    pub fn record(&self, tx: &Transaction) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO transactions (id, recorded_at, kind, category, amount,
                 description, room, guest_id_number, guest_name)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
                params![
                    tx.id.to_string(),
                    tx.recorded_at.to_rfc3339(),
                    serde_json::to_string(&tx.kind)?,
                    serde_json::to_string(&tx.category)?,
                    tx.amount,
                    tx.description,
                    tx.room,
                    tx.guest_id_number,
                    tx.guest_name,
                ],
            )
            .map_err(|e| db_err("insert transaction", e))?;

        info!(amount = tx.amount, room = %tx.room, "transaction recorded");
        Ok(())
    }

    /// Record a confirmed check-in as room revenue and return the stored row.
    pub fn record_check_in(&self, request: &CheckInRequest) -> Result<Transaction> {
        let tx = Transaction::from_check_in(request);
        self.record(&tx)?;
        Ok(tx)
    }

    #[instrument(skip(self), fields(tx_id = %id))]
    pub fn get(&self, id: &TransactionId) -> Result<Option<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} WHERE id = ?1"))
            .map_err(|e| db_err("prepare get", e))?;

        let mut rows = stmt
            .query_map(params![id.to_string()], row_to_transaction)
            .map_err(|e| db_err("query get", e))?;

        match rows.next() {
            Some(Ok(tx)) => Ok(Some(tx)),
            Some(Err(e)) => Err(db_err("row parse", e)),
            None => Ok(None),
        }
    }

    /// The newest `limit` transactions, newest first.
    pub fn recent(&self, limit: u32) -> Result<Vec<Transaction>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY rowid DESC LIMIT ?1"))
            .map_err(|e| db_err("prepare recent", e))?;

        let txs = stmt
            .query_map(params![limit], row_to_transaction)
            .map_err(|e| db_err("query recent", e))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| db_err("collect rows", e))?;

        debug!(count = txs.len(), "retrieved recent transactions");
        Ok(txs)
    }

    pub fn summary(&self) -> Result<LedgerSummary> {
        let income_json = serde_json::to_string(&TransactionKind::Income)?;
        let expense_json = serde_json::to_string(&TransactionKind::Expense)?;
        self.conn
            .query_row(
                "SELECT COUNT(*),
                        COALESCE(SUM(CASE WHEN kind = ?1 THEN amount END), 0.0),
                        COALESCE(SUM(CASE WHEN kind = ?2 THEN amount END), 0.0)
                 FROM transactions",
                params![income_json, expense_json],
                |row| {
                    Ok(LedgerSummary {
                        count: row.get::<_, i64>(0)? as u64,
                        income: row.get(1)?,
                        expense: row.get(2)?,
                    })
                },
            )
            .map_err(|e| db_err("summary", e))
    }
}

impl CheckInHandler for LedgerStore {
    fn on_check_in(&self, request: &CheckInRequest) -> Result<()> {
        self.record_check_in(request).map(|_| ())
    }
}

/// Column order must match `SELECT_COLUMNS`.
fn row_to_transaction(row: &rusqlite::Row<'_>) -> rusqlite::Result<Transaction> {
    let id_str: String = row.get(0)?;
    let recorded_at_str: String = row.get(1)?;
    let kind_json: String = row.get(2)?;
    let category_json: String = row.get(3)?;

    let uuid = uuid::Uuid::parse_str(&id_str).map_err(|e| conversion_err(0, e))?;
    let recorded_at: DateTime<Utc> = DateTime::parse_from_rfc3339(&recorded_at_str)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| conversion_err(1, e))?;
    let kind: TransactionKind =
        serde_json::from_str(&kind_json).map_err(|e| conversion_err(2, e))?;
    let category: TransactionCategory =
        serde_json::from_str(&category_json).map_err(|e| conversion_err(3, e))?;

    Ok(Transaction {
        id: TransactionId(uuid),
        recorded_at,
        kind,
        category,
        amount: row.get(4)?,
        description: row.get(5)?,
        room: row.get(6)?,
        guest_id_number: row.get(7)?,
        guest_name: row.get(8)?,
    })
}

fn conversion_err(
    column: usize,
    e: impl std::error::Error + Send + Sync + 'static,
) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(column, rusqlite::types::Type::Text, Box::new(e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk_core::GuestData;

    fn request(room: &str, amount: f64) -> CheckInRequest {
        CheckInRequest {
            guest: GuestData {
                id_number: "1-2345-67890-1".into(),
                title: "นาง".into(),
                first_name_th: "สมศรี".into(),
                last_name_th: "มีสุข".into(),
                ..Default::default()
            },
            amount,
            room: room.into(),
            description: format!("ค่าบริการห้องพัก Standard - ห้อง {room}"),
        }
    }

    #[test]
    fn check_in_round_trip() {
        let ledger = LedgerStore::open_in_memory().expect("open in-memory db");
        ledger
            .on_check_in(&request("101", 1500.0))
            .expect("check in");

        let recent = ledger.recent(10).expect("recent");
        assert_eq!(recent.len(), 1);
        let tx = &recent[0];
        assert_eq!(tx.kind, TransactionKind::Income);
        assert_eq!(tx.category, TransactionCategory::RoomRevenue);
        assert_eq!(tx.amount, 1500.0);
        assert_eq!(tx.room, "101");
        assert_eq!(tx.description, "ค่าบริการห้องพัก Standard - ห้อง 101");
        assert_eq!(tx.guest_name, "นาง สมศรี มีสุข");

        let fetched = ledger.get(&tx.id).expect("get").expect("found");
        assert_eq!(&fetched, tx);
    }

    #[test]
    fn recent_is_newest_first_and_limited() {
        let ledger = LedgerStore::open_in_memory().expect("open in-memory db");
        for room in ["101", "102", "103"] {
            ledger.record_check_in(&request(room, 1000.0)).expect("record");
        }

        let recent = ledger.recent(2).expect("recent");
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].room, "103");
        assert_eq!(recent[1].room, "102");
    }

    #[test]
    fn summary_totals_by_kind() {
        let ledger = LedgerStore::open_in_memory().expect("open in-memory db");
        assert_eq!(ledger.summary().expect("summary"), LedgerSummary::default());

        ledger.record_check_in(&request("101", 1500.0)).expect("record");
        ledger.record_check_in(&request("102", 900.5)).expect("record");
        let mut refund = Transaction::from_check_in(&request("101", 200.0));
        refund.kind = TransactionKind::Expense;
        refund.category = TransactionCategory::Other;
        ledger.record(&refund).expect("record");

        let summary = ledger.summary().expect("summary");
        assert_eq!(summary.count, 3);
        assert_eq!(summary.income, 2400.5);
        assert_eq!(summary.expense, 200.0);
        assert_eq!(summary.net(), 2200.5);
    }

    #[test]
    fn missing_transaction_is_none() {
        let ledger = LedgerStore::open_in_memory().expect("open in-memory db");
        assert!(ledger.get(&TransactionId::new()).expect("get").is_none());
    }

    #[test]
    fn ledger_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("ledger.db");
        {
            let ledger = LedgerStore::open(&path).expect("open");
            ledger.record_check_in(&request("7", 1200.0)).expect("record");
        }
        let ledger = LedgerStore::open(&path).expect("reopen");
        assert_eq!(ledger.summary().expect("summary").count, 1);
    }
}
