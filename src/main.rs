// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::{Context, Result};
use std::path::PathBuf;

use fintrack::{cli, commands, config, db, ledger, utils};

fn main() -> Result<()> {
    config::load_dotenv();
    utils::init_tracing();

    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let db_path = match matches.get_one::<String>("db") {
        Some(p) => PathBuf::from(p),
        None => db::default_db_path()?,
    };

    if let Some(("serve", sub)) = matches.subcommand() {
        return commands::serve::handle(&db_path, sub);
    }

    let store = db::Store::open(&db_path)
        .with_context(|| format!("Open DB at {}", db_path.display()))?;
    let conn = store.session()?;

    match matches.subcommand() {
        Some(("init", _)) => {
            println!(
                "Database initialized at {} ({} transactions)",
                store.path().display(),
                ledger::count(&conn)?
            );
        }
        Some(("tx", sub)) => commands::transactions::handle(&conn, sub)?,
        Some(("report", sub)) => commands::reports::handle(&conn, sub)?,
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
