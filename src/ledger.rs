// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Durable record store. Rows are only ever appended; reads come back in
//! insertion (id) order.

use crate::error::{FinError, Result};
use crate::models::{NewTransaction, Transaction, TxType};
use chrono::NaiveDateTime;
use rusqlite::types::Type;
use rusqlite::{Connection, Row, params};
use rust_decimal::Decimal;

pub const DEFAULT_LIMIT: i64 = 100;

const SELECT_COLUMNS: &str = "SELECT id, amount, category, description, type, date FROM transactions";

pub fn append(conn: &Connection, new: NewTransaction) -> Result<Transaction> {
    conn.execute(
        "INSERT INTO transactions(amount, category, description, type, date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![
            new.amount.to_string(),
            new.category,
            new.description,
            new.r#type.as_str(),
            new.date
        ],
    )?;
    let id = conn.last_insert_rowid();
    tracing::debug!(id, kind = %new.r#type, amount = %new.amount, "transaction stored");
    Ok(Transaction::from_new(id, new))
}

/// Rejects types other than income/expense. Only applied when the server
/// runs with strict types enabled.
pub fn validate_type(new: &NewTransaction) -> Result<()> {
    match &new.r#type {
        TxType::Other(s) => Err(FinError::InvalidType(s.clone())),
        _ => Ok(()),
    }
}

/// A negative `limit` means no limit; a negative `skip` is treated as zero.
pub fn list(conn: &Connection, skip: i64, limit: i64) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS} ORDER BY id LIMIT ?1 OFFSET ?2"
    ))?;
    let rows = stmt.query_map(params![limit, skip.max(0)], map_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

/// Records whose stored date has exactly this year and month.
pub fn in_period(conn: &Connection, year: i32, month: i32) -> Result<Vec<Transaction>> {
    let mut stmt = conn.prepare(&format!(
        "{SELECT_COLUMNS}
         WHERE CAST(substr(date,1,4) AS INTEGER)=?1 AND CAST(substr(date,6,2) AS INTEGER)=?2
         ORDER BY id"
    ))?;
    let rows = stmt.query_map(params![year, month], map_row)?;
    Ok(rows.collect::<rusqlite::Result<Vec<_>>>()?)
}

pub fn count(conn: &Connection) -> Result<i64> {
    Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |r| r.get(0))?)
}

fn map_row(r: &Row<'_>) -> rusqlite::Result<Transaction> {
    let amount_raw: String = r.get(1)?;
    let amount = amount_raw
        .parse::<Decimal>()
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    let kind: String = r.get(4)?;
    let date: NaiveDateTime = r.get(5)?;
    Ok(Transaction {
        id: r.get(0)?,
        amount,
        category: r.get(2)?,
        description: r.get(3)?,
        r#type: TxType::from(kind),
        date,
    })
}
