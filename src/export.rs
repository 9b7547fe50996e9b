// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Renders a monthly report as a downloadable CSV or xlsx file.

use crate::error::{FinError, Result};
use crate::models::{MonthlyReport, Transaction};
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use rust_xlsxwriter::{Format, Workbook};
use std::fmt;
use std::str::FromStr;

pub const HEADERS: [&str; 5] = ["Date", "Type", "Category", "Description", "Amount"];
pub const SHEET_NAME: &str = "Report";
/// Extra character widths added to the longest cell of each column.
pub const WIDTH_PADDING: usize = 2;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    Csv,
    #[default]
    Xlsx,
}

impl ExportFormat {
    pub fn extension(self) -> &'static str {
        match self {
            ExportFormat::Csv => "csv",
            ExportFormat::Xlsx => "xlsx",
        }
    }

    pub fn content_type(self) -> &'static str {
        match self {
            ExportFormat::Csv => "text/csv",
            ExportFormat::Xlsx => {
                "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
            }
        }
    }
}

impl FromStr for ExportFormat {
    type Err = FinError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "csv" => Ok(ExportFormat::Csv),
            "xlsx" => Ok(ExportFormat::Xlsx),
            other => Err(FinError::UnknownFormat(other.to_string())),
        }
    }
}

impl fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

#[derive(Debug, Clone)]
pub struct Export {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

impl Export {
    pub fn content_disposition(&self) -> String {
        format!("attachment; filename={}", self.filename)
    }
}

pub fn filename(year: i32, month: i32, format: ExportFormat) -> String {
    format!("report_{}_{}.{}", year, month, format.extension())
}

pub fn render(report: &MonthlyReport, format: ExportFormat) -> Result<Export> {
    let bytes = match format {
        ExportFormat::Csv => to_csv(&report.transactions)?,
        ExportFormat::Xlsx => to_xlsx(&report.transactions)?,
    };
    tracing::info!(
        year = report.year,
        month = report.month,
        %format,
        rows = report.transactions.len(),
        bytes = bytes.len(),
        "report rendered"
    );
    Ok(Export {
        bytes,
        filename: filename(report.year, report.month, format),
        content_type: format.content_type(),
    })
}

/// One spreadsheet cell before it is written out.
#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Text(String),
    Number(Decimal),
    Empty,
}

impl CellValue {
    /// Character width of the cell as a spreadsheet would display it.
    /// `None` means the cell adds nothing to its column's width.
    pub fn rendered_len(&self) -> Option<usize> {
        match self {
            CellValue::Text(s) => Some(s.chars().count()),
            CellValue::Number(d) => d.to_f64().map(|f| f.to_string().chars().count()),
            CellValue::Empty => None,
        }
    }

    fn as_csv_field(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(d) => d.to_string(),
            CellValue::Empty => String::new(),
        }
    }
}

pub fn row_cells(t: &Transaction) -> [CellValue; 5] {
    [
        CellValue::Text(t.date.date().format("%Y-%m-%d").to_string()),
        CellValue::Text(t.r#type.to_string()),
        CellValue::Text(t.category.clone()),
        t.description
            .clone()
            .map(CellValue::Text)
            .unwrap_or(CellValue::Empty),
        CellValue::Number(t.amount),
    ]
}

/// Width per column: longest rendered cell (header included) plus padding.
pub fn column_widths(rows: &[[CellValue; 5]]) -> [usize; 5] {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (col, cell) in row.iter().enumerate() {
            if let Some(len) = cell.rendered_len() {
                widths[col] = widths[col].max(len);
            }
        }
    }
    widths.map(|w| w + WIDTH_PADDING)
}

fn to_csv(records: &[Transaction]) -> Result<Vec<u8>> {
    let mut wtr = csv::Writer::from_writer(Vec::new());
    wtr.write_record(HEADERS)?;
    for t in records {
        wtr.write_record(row_cells(t).iter().map(CellValue::as_csv_field))?;
    }
    wtr.flush()?;
    wtr.into_inner().map_err(|e| FinError::Io(e.into_error()))
}

fn to_xlsx(records: &[Transaction]) -> Result<Vec<u8>> {
    let rows: Vec<[CellValue; 5]> = records.iter().map(row_cells).collect();
    let mut workbook = Workbook::new();
    let header_format = Format::new().set_bold();
    let sheet = workbook.add_worksheet();
    sheet.set_name(SHEET_NAME)?;

    for (col, h) in HEADERS.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *h, &header_format)?;
    }
    for (i, row) in rows.iter().enumerate() {
        let r = (i + 1) as u32;
        for (col, cell) in row.iter().enumerate() {
            let c = col as u16;
            match cell {
                CellValue::Text(s) => {
                    sheet.write_string(r, c, s)?;
                }
                CellValue::Number(d) => match d.to_f64() {
                    Some(f) => {
                        sheet.write_number(r, c, f)?;
                    }
                    None => {
                        sheet.write_string(r, c, d.to_string())?;
                    }
                },
                CellValue::Empty => {}
            }
        }
    }
    for (col, width) in column_widths(&rows).iter().enumerate() {
        sheet.set_column_width(col as u16, *width as f64)?;
    }
    Ok(workbook.save_to_buffer()?)
}
