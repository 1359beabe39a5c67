//! Reports page rendering - Full page endpoints

use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use cashweb_core::ReportKind;

use super::render::CHART_CANVAS_ID;

const KIND_OPTIONS: [(ReportKind, &str); 3] = [
    (ReportKind::Monthly, "تقرير شهري"),
    (ReportKind::Category, "حسب الفئة"),
    (ReportKind::Yearly, "تقرير سنوي"),
];

fn kind_select(selected: ReportKind) -> String {
    let mut html = String::from(
        r#"<select id='report-type' name='kind' class='px-3 py-2 border rounded-lg bg-white'>"#,
    );
    for (kind, label) in &KIND_OPTIONS {
        html.push_str(&format!(
            r#"<option value='{}' {}>{}</option>"#,
            kind,
            if *kind == selected { "selected" } else { "" },
            label
        ));
    }
    html.push_str("</select>");
    html
}

/// Report controls, the chart surface and the swapped report region.
///
/// The canvas sits outside `#report-content` so every redraw targets the
/// same element.
pub fn render_reports_page(default_kind: ReportKind, current_month: &str) -> String {
    format!(
        r#"<div class='mb-6 flex justify-between items-center'>
            <h2 class='text-2xl font-bold'>التقارير</h2>
            <button hx-post='/reports/export' hx-target='#report-notice' class='px-4 py-2 border rounded-lg hover:bg-gray-50'>تصدير PDF</button>
        </div>
        <div id='report-notice'></div>
        <form id='report-filters' hx-get='/reports/view' hx-trigger='load, change' hx-target='#report-content' class='mb-6 flex flex-wrap gap-4 items-center'>
            <label class='flex items-center gap-2'><span class='text-sm text-gray-600'>نوع التقرير</span>{}</label>
            <label class='flex items-center gap-2'><span class='text-sm text-gray-600'>الشهر</span><input type='month' id='report-month' name='period' value='{}' class='px-3 py-2 border rounded-lg'></label>
        </form>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <div class='relative h-80'><canvas id='{}'></canvas></div>
        </div>
        <div id='report-content'>
            <p class='text-gray-500 text-center'>جاري التحميل...</p>
        </div>"#,
        kind_select(default_kind),
        current_month,
        CHART_CANVAS_ID,
    )
}

pub async fn page_reports(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let current_month = chrono::Local::now().format("%Y-%m").to_string();
    let inner_content = render_reports_page(state.config.reports.default_kind, &current_month);
    Html(crate::page_response(&headers, "التقارير", &inner_content, &state.config))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_defaults() {
        let html = render_reports_page(ReportKind::Category, "2024-03");
        assert!(html.contains("<option value='category' selected>"));
        assert!(html.contains("<option value='monthly' >"));
        assert!(html.contains("name='period' value='2024-03'"));
        assert!(html.contains("hx-get='/reports/view'"));
    }

    #[test]
    fn test_canvas_outside_swapped_region() {
        let html = render_reports_page(ReportKind::Monthly, "2024-03");
        let canvas = html.find("<canvas id='reportChart'>").unwrap();
        let content = html.find("id='report-content'").unwrap();
        assert!(canvas < content);
    }
}
