//! Reports API endpoints - JSON API and HTMX partial responses

use crate::error::log_core_error;
use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use cashweb_core::{Book, CoreError, ReportKind, ReportResult};
use serde::Deserialize;

use super::render::{render_chart_reset, render_notice, render_report, CHART_CANVAS_ID};

/// Placeholder answer of the export button
pub const EXPORT_NOTICE: &str = "سيتم تطوير ميزة التصدير إلى PDF في الإصدارات القادمة";

#[derive(Debug, Default, Deserialize)]
pub struct ReportQuery {
    pub kind: Option<String>,
    pub period: Option<String>,
}

fn compute(book: &Book, query: &ReportQuery, default_kind: ReportKind) -> Result<ReportResult, CoreError> {
    if !book.is_loaded() {
        return Err(CoreError::NotLoaded);
    }

    let kind = match query.kind.as_deref().map(str::trim).filter(|k| !k.is_empty()) {
        Some(kind) => kind.to_string(),
        None => default_kind.to_string(),
    };

    book.compute_report(&kind, query.period.as_deref().unwrap_or(""))
}

/// JSON report
pub async fn api_report(
    State(state): State<AppState>,
    Query(query): Query<ReportQuery>,
) -> Result<Json<ReportResult>, ApiError> {
    let book = state.book.read().await;
    let result = compute(&book, &query, state.config.reports.default_kind)?;
    Ok(Json(result))
}

/// Months with at least one transaction, newest first
pub async fn api_report_months(State(state): State<AppState>) -> Json<Vec<String>> {
    let book = state.book.read().await;
    Json(book.available_months().iter().map(|m| m.to_string()).collect())
}

/// Summary, table and chart for the selected kind and period
pub async fn htmx_report_view(State(state): State<AppState>, Query(query): Query<ReportQuery>) -> Html<String> {
    let book = state.book.read().await;
    match compute(&book, &query, state.config.reports.default_kind) {
        Ok(result) => Html(render_report(&result, &state.config)),
        Err(e) => {
            log_core_error("Report view rejected", &e);
            // The previous report's chart must not stay drawn next to the notice
            Html(format!("{}{}", render_notice(&e.to_string()), render_chart_reset(CHART_CANVAS_ID)))
        }
    }
}

pub async fn htmx_report_export() -> Html<String> {
    Html(render_notice(EXPORT_NOTICE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashweb_core::ErrorCode;
    use cashweb_store::{MemoryStore, TransactionRecord};
    use std::sync::Arc;

    async fn loaded_book() -> Book {
        let store = MemoryStore::new(vec![TransactionRecord::new("2024-03-05", "income", 100.0, "salary")], vec![]);
        let mut book = Book::new(Arc::new(store));
        book.load().await.unwrap();
        book
    }

    fn query(kind: Option<&str>, period: Option<&str>) -> ReportQuery {
        ReportQuery {
            kind: kind.map(String::from),
            period: period.map(String::from),
        }
    }

    #[tokio::test]
    async fn test_compute_requires_loaded_book() {
        let book = Book::new(Arc::new(MemoryStore::default()));
        let err = compute(&book, &query(None, Some("2024-03")), ReportKind::Monthly).unwrap_err();
        assert_eq!(err.code(), ErrorCode::NotLoaded);
    }

    #[tokio::test]
    async fn test_compute_uses_default_kind() {
        let book = loaded_book().await;
        let result = compute(&book, &query(Some(" "), None), ReportKind::Yearly).unwrap();
        assert_eq!(result.kind, ReportKind::Yearly);
        assert_eq!(result.summary.income, 100.0);
    }

    #[tokio::test]
    async fn test_compute_rejects_unknown_kind() {
        let book = loaded_book().await;
        let err = compute(&book, &query(Some("weekly"), None), ReportKind::Monthly).unwrap_err();
        assert_eq!(err.code(), ErrorCode::InvalidParameter);
    }
}
