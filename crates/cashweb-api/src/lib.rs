//! HTTP API server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::reports: Monthly, category and yearly reports

pub mod error;
pub mod routes;

use axum::{
    extract::State,
    http::HeaderMap,
    routing::{get, post},
    Json, Router,
};
use cashweb_config::Config;
use cashweb_core::{Book, BookOperations, BookSummary};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::RwLock;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub book: Arc<RwLock<Book>>,
    pub config: Config,
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::reports::{api_report, api_report_months, htmx_report_export, htmx_report_view, page_reports};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/summary", get(api_summary))
        .route("/api/reports", get(api_report))
        .route("/api/reports/months", get(api_report_months))
        .route("/api/reload", post(api_reload))
        // HTMX page routes
        .route("/", get(page_reports))
        .route("/reports", get(page_reports))
        // HTMX partial routes
        .route("/reports/view", get(htmx_report_view))
        .route("/reports/export", post(htmx_report_export))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

/// Collection summary (JSON API)
async fn api_summary(State(state): State<AppState>) -> Json<BookSummary> {
    let book = state.book.read().await;
    Json(book.summary())
}

/// Reload both collections from the store
async fn api_reload(State(state): State<AppState>) -> Result<Json<serde_json::Value>, ApiError> {
    let mut book = state.book.write().await;
    book.reload().await?;
    Ok(Json(serde_json::json!({ "success": true, "message": "تم إعادة تحميل البيانات" })))
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str, config: &Config) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="ar" dir="rtl">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - Cashweb</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.jsdelivr.net/npm/chart.js@4.4.1/dist/chart.umd.min.js"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        :root {{ --income-color: rgb({}); --expense-color: rgb({}); }}
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        title, config.charts.income_color, config.charts.expense_color, content
    )
}

/// Check if request is from HTMX (partial page update)
fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Wrap content for full page or HTMX partial
pub fn page_response(headers: &HeaderMap, title: &str, inner_content: &str, config: &Config) -> String {
    if is_htmx_request(headers) {
        format!(r#"<main class='max-w-6xl mx-auto p-6'>{}</main>"#, inner_content)
    } else {
        base_html(
            title,
            &format!(
                r#"<header class='bg-white border-b'><div class='max-w-6xl mx-auto p-4'><h1 class='text-xl font-bold text-indigo-600'>Cashweb</h1></div></header>
<main class='max-w-6xl mx-auto p-6'>{}</main>"#,
                inner_content
            ),
            config,
        )
    }
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until the listener fails.
pub async fn start_server(config: Config, book: Arc<RwLock<Book>>) -> std::io::Result<()> {
    let addr = format!("{}:{}", config.server.host, config.server.port);
    let state = AppState { book, config };

    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting Cashweb server on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - /reports (Financial reports)");
    log::info!("  - /api/* (JSON API endpoints)");

    axum::serve(listener, router).await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

// ==================== Tests ====================
