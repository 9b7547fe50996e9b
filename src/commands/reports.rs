// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::export::{self, ExportFormat};
use crate::report;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;
use std::path::PathBuf;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("monthly", sub)) => monthly(conn, sub)?,
        Some(("export", sub)) => {
            export_report(conn, sub)?;
        }
        _ => {}
    }
    Ok(())
}

fn period(sub: &clap::ArgMatches) -> Result<(i32, i32)> {
    let year = *sub.get_one::<i32>("year").context("year missing")?;
    let month = *sub.get_one::<i32>("month").context("month missing")?;
    Ok((year, month))
}

fn monthly(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let (year, month) = period(sub)?;
    let r = report::aggregate(conn, year, month)?;
    if !maybe_print_json(sub.get_flag("json"), &r)? {
        println!(
            "{}",
            pretty_table(
                &["Period", "Income", "Expense", "Balance", "Records"],
                vec![vec![
                    format!("{}-{:02}", year, month),
                    fmt_money(&r.total_income),
                    fmt_money(&r.total_expense),
                    fmt_money(&r.balance),
                    r.transactions.len().to_string(),
                ]],
            )
        );
    }
    Ok(())
}

/// Writes the rendered report and returns where it went.
pub fn export_report(conn: &Connection, sub: &clap::ArgMatches) -> Result<PathBuf> {
    let (year, month) = period(sub)?;
    let format = sub
        .get_one::<String>("format")
        .map(|s| s.parse::<ExportFormat>())
        .transpose()?
        .unwrap_or_default();
    let r = report::aggregate(conn, year, month)?;
    let file = export::render(&r, format)?;
    let out = sub
        .get_one::<String>("out")
        .map(|s| PathBuf::from(s.trim()))
        .unwrap_or_else(|| PathBuf::from(&file.filename));
    std::fs::write(&out, &file.bytes).with_context(|| format!("Write {}", out.display()))?;
    println!("Exported {} records to {}", r.transactions.len(), out.display());
    Ok(out)
}
