// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::Result;
use crate::ledger;
use crate::models::{MonthlyReport, Transaction, TxType};
use rusqlite::Connection;
use rust_decimal::Decimal;

/// Monthly totals straight from the store. An empty or impossible period
/// (month 0, month 13, a negative month) yields zero totals rather than an
/// error.
pub fn aggregate(conn: &Connection, year: i32, month: i32) -> Result<MonthlyReport> {
    let transactions = if (1..=12).contains(&month) {
        ledger::in_period(conn, year, month)?
    } else {
        Vec::new()
    };
    let report = summarize(year, month, transactions);
    tracing::debug!(
        year,
        month,
        records = report.transactions.len(),
        balance = %report.balance,
        "monthly report computed"
    );
    Ok(report)
}

/// Records typed neither income nor expense stay in the list but are left
/// out of both totals. Totals saturate at `Decimal::MAX`/`Decimal::MIN`.
pub fn summarize(year: i32, month: i32, transactions: Vec<Transaction>) -> MonthlyReport {
    let mut total_income = Decimal::ZERO;
    let mut total_expense = Decimal::ZERO;
    for t in &transactions {
        match t.r#type {
            TxType::Income => total_income = total_income.saturating_add(t.amount),
            TxType::Expense => total_expense = total_expense.saturating_add(t.amount),
            TxType::Other(_) => {}
        }
    }
    MonthlyReport {
        year,
        month,
        total_income,
        total_expense,
        balance: total_income.saturating_sub(total_expense),
        transactions,
    }
}
