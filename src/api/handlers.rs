// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use super::AppState;
use super::error::ApiError;
use crate::db::Store;
use crate::export::{self, ExportFormat};
use crate::ledger;
use crate::models::{MonthlyReport, NewTransaction, Transaction};
use crate::report;
use axum::extract::{Json, Path, Query, State};
use axum::http::header;
use axum::response::{IntoResponse, Response};
use rusqlite::Connection;
use serde::Deserialize;

/// Runs blocking store work on its own connection, which is dropped when
/// the closure returns on both the success and the error path.
async fn with_session<T, F>(store: &Store, f: F) -> Result<T, ApiError>
where
    F: FnOnce(&Connection) -> crate::error::Result<T> + Send + 'static,
    T: Send + 'static,
{
    let store = store.clone();
    let out = tokio::task::spawn_blocking(move || {
        let conn = store.session()?;
        f(&conn)
    })
    .await
    .map_err(|e| crate::error::FinError::Task(e.to_string()))?;
    Ok(out?)
}

pub async fn create_transaction(
    State(state): State<AppState>,
    Json(req): Json<NewTransaction>,
) -> Result<Json<Transaction>, ApiError> {
    if state.strict_types {
        ledger::validate_type(&req)?;
    }
    let created = with_session(&state.store, move |conn| ledger::append(conn, req)).await?;
    tracing::info!(id = created.id, kind = %created.r#type, "transaction created");
    Ok(Json(created))
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
}

pub async fn list_transactions(
    State(state): State<AppState>,
    Query(q): Query<ListQuery>,
) -> Result<Json<Vec<Transaction>>, ApiError> {
    let skip = q.skip.unwrap_or(0);
    let limit = q.limit.unwrap_or(ledger::DEFAULT_LIMIT);
    let rows = with_session(&state.store, move |conn| ledger::list(conn, skip, limit)).await?;
    Ok(Json(rows))
}

pub async fn monthly_report(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i32)>,
) -> Result<Json<MonthlyReport>, ApiError> {
    let report =
        with_session(&state.store, move |conn| report::aggregate(conn, year, month)).await?;
    Ok(Json(report))
}

#[derive(Debug, Deserialize)]
pub struct DownloadQuery {
    pub format: Option<String>,
}

pub async fn download_report(
    State(state): State<AppState>,
    Path((year, month)): Path<(i32, i32)>,
    Query(q): Query<DownloadQuery>,
) -> Result<Response, ApiError> {
    let format = match q.format.as_deref() {
        Some(f) => f.parse::<ExportFormat>()?,
        None => ExportFormat::default(),
    };
    let file = with_session(&state.store, move |conn| {
        let report = report::aggregate(conn, year, month)?;
        export::render(&report, format)
    })
    .await?;
    let disposition = file.content_disposition();
    Ok((
        [
            (header::CONTENT_TYPE, file.content_type.to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        file.bytes,
    )
        .into_response())
}
