// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::ledger;
use crate::models::{NewTransaction, TxType};
use crate::utils::{fmt_money, maybe_print_json, parse_datetime, parse_decimal, pretty_table};
use anyhow::{Context, Result};
use rusqlite::Connection;

pub fn handle(conn: &Connection, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("add", sub)) => add(conn, sub)?,
        Some(("list", sub)) => list(conn, sub)?,
        _ => {}
    }
    Ok(())
}

pub fn new_from_matches(sub: &clap::ArgMatches) -> Result<NewTransaction> {
    let date_raw = sub.get_one::<String>("date").context("date missing")?;
    let kind = sub.get_one::<String>("type").context("type missing")?;
    let category = sub.get_one::<String>("category").context("category missing")?;
    let amount = parse_decimal(sub.get_one::<String>("amount").context("amount missing")?)?;
    let description = sub
        .get_one::<String>("description")
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string());
    Ok(NewTransaction {
        amount,
        category: category.trim().to_string(),
        description,
        r#type: TxType::from(kind.trim().to_lowercase()),
        date: parse_datetime(date_raw)?,
    })
}

fn add(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let new = new_from_matches(sub)?;
    if !new.r#type.is_known() {
        tracing::warn!(kind = %new.r#type, "type is neither income nor expense; it will not count toward totals");
    }
    let t = ledger::append(conn, new)?;
    println!(
        "Recorded #{} {} {} on {} ({})",
        t.id,
        t.r#type,
        t.amount,
        t.date.date(),
        t.category
    );
    Ok(())
}

fn list(conn: &Connection, sub: &clap::ArgMatches) -> Result<()> {
    let skip = *sub.get_one::<i64>("skip").unwrap_or(&0);
    let limit = *sub
        .get_one::<i64>("limit")
        .unwrap_or(&ledger::DEFAULT_LIMIT);
    let data = ledger::list(conn, skip, limit)?;
    if !maybe_print_json(sub.get_flag("json"), &data)? {
        let rows: Vec<Vec<String>> = data
            .iter()
            .map(|t| {
                vec![
                    t.id.to_string(),
                    t.date.date().to_string(),
                    t.r#type.to_string(),
                    t.category.clone(),
                    t.description.clone().unwrap_or_default(),
                    fmt_money(&t.amount),
                ]
            })
            .collect();
        println!(
            "{}",
            pretty_table(
                &["ID", "Date", "Type", "Category", "Description", "Amount"],
                rows,
            )
        );
    }
    Ok(())
}
