//! Report routes - monthly, category and yearly reports
//!
//! Structure:
//! - api.rs: JSON API and HTMX endpoints
//! - page.rs: Full page rendering
//! - render.rs: Summary, table and chart widgets

pub mod api;
pub mod page;
pub mod render;

pub use api::{api_report, api_report_months, htmx_report_export, htmx_report_view};

pub use page::page_reports;
