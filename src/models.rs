// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDateTime;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Direction of a transaction. Anything other than `income`/`expense` is
/// kept verbatim so it round-trips through storage unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum TxType {
    Income,
    Expense,
    Other(String),
}

impl TxType {
    pub fn as_str(&self) -> &str {
        match self {
            TxType::Income => "income",
            TxType::Expense => "expense",
            TxType::Other(s) => s,
        }
    }

    pub fn is_known(&self) -> bool {
        !matches!(self, TxType::Other(_))
    }
}

impl From<String> for TxType {
    fn from(s: String) -> Self {
        match s.as_str() {
            "income" => TxType::Income,
            "expense" => TxType::Expense,
            _ => TxType::Other(s),
        }
    }
}

impl From<&str> for TxType {
    fn from(s: &str) -> Self {
        TxType::from(s.to_string())
    }
}

impl From<TxType> for String {
    fn from(t: TxType) -> Self {
        t.as_str().to_string()
    }
}

impl fmt::Display for TxType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewTransaction {
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub category: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: TxType,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub date: NaiveDateTime,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub category: String,
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub r#type: TxType,
    #[serde(deserialize_with = "deserialize_datetime")]
    pub date: NaiveDateTime,
}

impl Transaction {
    pub fn from_new(id: i64, new: NewTransaction) -> Self {
        Transaction {
            id,
            amount: new.amount,
            category: new.category,
            description: new.description,
            r#type: new.r#type,
            date: new.date,
        }
    }
}

/// Totals for one calendar month plus the records they were computed from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyReport {
    pub year: i32,
    pub month: i32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_income: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub total_expense: Decimal,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub balance: Decimal,
    pub transactions: Vec<Transaction>,
}

fn deserialize_datetime<'de, D>(d: D) -> std::result::Result<NaiveDateTime, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = String::deserialize(d)?;
    crate::utils::parse_datetime(&raw).map_err(serde::de::Error::custom)
}
