// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum FinError {
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Spreadsheet error: {0}")]
    Xlsx(#[from] rust_xlsxwriter::XlsxError),

    #[error("Unknown format: {0} (use csv|xlsx)")]
    UnknownFormat(String),

    #[error("Unknown transaction type: {0} (use income|expense)")]
    InvalidType(String),

    #[error("Invalid date '{0}', expected YYYY-MM-DD or an ISO datetime")]
    InvalidDate(String),

    #[error("Background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, FinError>;
