// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::error::{FinError, Result};
use anyhow::Context;
use chrono::{DateTime, NaiveDate, NaiveDateTime};
use comfy_table::{Cell, Table, presets::UTF8_FULL};
use rust_decimal::Decimal;
use std::sync::Once;

static TRACING_INIT: Once = Once::new();

/// Installs the global tracing subscriber. `RUST_LOG` overrides the default
/// `fintrack=info` directive.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{EnvFilter, fmt};

        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("fintrack=info,tower_http=info"));

        fmt().with_env_filter(filter).init();
    });
}

/// Accepts RFC 3339, a naive ISO datetime (`T` or space separated) or a bare
/// calendar date, which is taken as midnight.
pub fn parse_datetime(s: &str) -> Result<NaiveDateTime> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.naive_utc());
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .ok_or_else(|| FinError::InvalidDate(s.to_string()))
}

pub fn parse_decimal(s: &str) -> anyhow::Result<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .with_context(|| format!("Invalid decimal '{}'", s))
}

pub fn fmt_money(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp(2))
}

pub fn pretty_table(headers: &[&str], rows: Vec<Vec<String>>) -> Table {
    let mut t = Table::new();
    t.load_preset(UTF8_FULL);
    t.set_header(headers.iter().map(|h| Cell::new(*h)));
    for r in rows {
        t.add_row(r.into_iter().map(Cell::new));
    }
    t
}

pub fn maybe_print_json<T: serde::Serialize>(json_flag: bool, v: &T) -> anyhow::Result<bool> {
    if json_flag {
        println!("{}", serde_json::to_string_pretty(v)?);
        return Ok(true);
    }
    Ok(false)
}
