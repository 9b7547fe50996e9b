// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::api;
use crate::config::Settings;
use anyhow::{Context, Result};
use std::path::Path;

pub fn handle(db_path: &Path, m: &clap::ArgMatches) -> Result<()> {
    let settings = Settings::from_matches(db_path.to_path_buf(), m)?;
    let rt = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .context("Start async runtime")?;
    rt.block_on(api::serve(settings))
}
