// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::net::SocketAddr;
use std::path::PathBuf;

pub const DEFAULT_PORT: u16 = 8000;
pub const DEFAULT_ORIGINS: [&str; 2] = ["http://localhost:5173", "http://localhost:3000"];

/// Runtime settings. Built from defaults, then `.env`/environment, then CLI
/// flags; clap resolves the env fallbacks so callers only see final values.
#[derive(Debug, Clone)]
pub struct Settings {
    pub db_path: PathBuf,
    pub bind: SocketAddr,
    pub allowed_origins: Vec<String>,
    /// Reject transaction types other than income/expense at creation.
    pub strict_types: bool,
}

impl Settings {
    pub fn new(db_path: PathBuf) -> Self {
        Settings {
            db_path,
            bind: SocketAddr::from(([127, 0, 0, 1], DEFAULT_PORT)),
            allowed_origins: DEFAULT_ORIGINS.iter().map(|s| s.to_string()).collect(),
            strict_types: false,
        }
    }

    pub fn from_matches(db_path: PathBuf, m: &clap::ArgMatches) -> Result<Self> {
        let mut s = Settings::new(db_path);
        if let Some(bind) = m.get_one::<String>("bind") {
            s.bind = bind
                .parse()
                .with_context(|| format!("Invalid bind address '{}'", bind))?;
        }
        if let Some(origins) = m.get_many::<String>("origin") {
            let list = split_origins(origins.map(|s| s.as_str()));
            if !list.is_empty() {
                s.allowed_origins = list;
            }
        }
        s.strict_types = m.get_flag("strict-types");
        Ok(s)
    }
}

/// Loads `.env` if present. A missing file is not an error.
pub fn load_dotenv() {
    match dotenvy::dotenv() {
        Ok(path) => tracing::debug!(path = %path.display(), "loaded .env"),
        Err(e) if e.not_found() => {}
        Err(e) => tracing::warn!(error = %e, "ignoring unreadable .env"),
    }
}

/// Origins may arrive as repeated flags or one comma-separated env value.
pub fn split_origins<'a>(raw: impl Iterator<Item = &'a str>) -> Vec<String> {
    raw.flat_map(|s| s.split(','))
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.trim_end_matches('/').to_string())
        .collect()
}
