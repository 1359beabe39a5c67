//! Report widgets: summary figures, table and bar chart
//!
//! Each renderer returns an HTML fragment that fully replaces what it
//! rendered before.

use cashweb_config::{ChartConfig, Config, CurrencyConfig};
use cashweb_core::format::{format_currency, format_percentage};
use cashweb_core::labels::{EXPENSE_SERIES, INCOME_SERIES};
use cashweb_core::{BalanceTone, ChartSeries, ReportResult, ReportRow, ReportSummary};
use cashweb_utils::escape_html;

/// Canvas the report chart is bound to
pub const CHART_CANVAS_ID: &str = "reportChart";

/// JSON that can sit inside a `<script>` element
fn script_json(value: &serde_json::Value) -> String {
    value.to_string().replace("</", "<\\/")
}

fn js_string(text: &str) -> String {
    script_json(&serde_json::Value::String(text.to_string()))
}

/// Income, expense and balance figures.
///
/// The balance takes the income color when it is zero or positive and the
/// expense color otherwise.
pub fn render_summary(summary: &ReportSummary, currency: &CurrencyConfig) -> String {
    let balance_color = match summary.balance_tone() {
        BalanceTone::Income => "var(--income-color)",
        BalanceTone::Expense => "var(--expense-color)",
    };

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>المدخول</p><p id='report-income' class='text-2xl font-bold' style='color: var(--income-color)'>{}</p></div>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>المصروف</p><p id='report-expense' class='text-2xl font-bold' style='color: var(--expense-color)'>{}</p></div>
            <div class='bg-white p-4 rounded-lg border'><p class='text-sm text-gray-500'>صافي الرصيد</p><p id='report-balance' class='text-2xl font-bold' style='color: {}'>{}</p></div>
        </div>"#,
        escape_html(&format_currency(summary.income, currency)),
        escape_html(&format_currency(summary.expense, currency)),
        balance_color,
        escape_html(&format_currency(summary.balance, currency)),
    )
}

/// Report table; the body holds exactly the given rows
pub fn render_table(rows: &[ReportRow], currency: &CurrencyConfig) -> String {
    let mut html = String::from(
        r#"<table id='report-table' class='w-full'><thead class='bg-gray-50'><tr><th class='px-4 py-2 text-right'>البند</th><th class='px-4 py-2 text-right'>المبلغ</th><th class='px-4 py-2 text-right'>النسبة</th></tr></thead><tbody>"#,
    );

    for row in rows {
        html.push_str(&format!(
            r#"<tr class='border-b'><td class='px-4 py-2'>{}</td><td class='px-4 py-2 font-medium'>{}</td><td class='px-4 py-2'>{}</td></tr>"#,
            escape_html(&row.label),
            escape_html(&format_currency(row.amount, currency)),
            format_percentage(row.percentage),
        ));
    }

    if rows.is_empty() {
        html.push_str(r#"<tr><td class='px-4 py-6 text-center text-gray-500' colspan='3'>لا توجد بيانات</td></tr>"#);
    }

    html.push_str("</tbody></table>");
    html
}

/// Script drawing the two-series bar chart on the canvas `canvas_id`.
///
/// Any chart already bound to that canvas is destroyed first, so the
/// surface never holds more than one live chart.
pub fn render_chart(series: &ChartSeries, canvas_id: &str, currency: &CurrencyConfig, charts: &ChartConfig) -> String {
    let data = serde_json::json!({
        "labels": series.labels,
        "datasets": [
            {
                "label": INCOME_SERIES,
                "data": series.income_values,
                "backgroundColor": format!("rgba({}, 0.7)", charts.income_color),
                "borderColor": format!("rgba({}, 1)", charts.income_color),
                "borderWidth": 1
            },
            {
                "label": EXPENSE_SERIES,
                "data": series.expense_values,
                "backgroundColor": format!("rgba({}, 0.7)", charts.expense_color),
                "borderColor": format!("rgba({}, 1)", charts.expense_color),
                "borderWidth": 1
            }
        ]
    });

    format!(
        r#"<script>
(function() {{
    const canvas = document.getElementById({canvas});
    if (!canvas || typeof Chart === 'undefined') return;
    const previous = Chart.getChart(canvas);
    if (previous) previous.destroy();
    new Chart(canvas.getContext('2d'), {{
        type: 'bar',
        data: {data},
        options: {{
            responsive: true,
            maintainAspectRatio: false,
            plugins: {{
                legend: {{ display: {legend}, position: 'top', rtl: {rtl} }},
                tooltip: {{
                    callbacks: {{
                        label: function(context) {{
                            return context.dataset.label + ': ' + context.raw.toFixed({places}) + ' ' + {suffix};
                        }}
                    }}
                }}
            }},
            scales: {{
                x: {{ title: {{ display: true, text: {axis} }} }},
                y: {{
                    beginAtZero: true,
                    ticks: {{
                        callback: function(value) {{
                            return value + ' ' + {short_suffix};
                        }}
                    }}
                }}
            }}
        }}
    }});
}})();
</script>"#,
        canvas = js_string(canvas_id),
        data = script_json(&data),
        legend = charts.show_legend,
        rtl = charts.rtl_legend,
        places = currency.decimal_places,
        suffix = js_string(&currency.suffix),
        axis = js_string(series.axis.label()),
        short_suffix = js_string(&currency.short_suffix),
    )
}

/// Script clearing whatever chart is bound to the canvas `canvas_id`
pub fn render_chart_reset(canvas_id: &str) -> String {
    format!(
        r#"<script>
(function() {{
    const canvas = document.getElementById({});
    if (!canvas || typeof Chart === 'undefined') return;
    const previous = Chart.getChart(canvas);
    if (previous) previous.destroy();
}})();
</script>"#,
        js_string(canvas_id)
    )
}

/// Summary, table and chart script of one report
pub fn render_report(result: &ReportResult, config: &Config) -> String {
    let json_link = format!(
        "/api/reports?kind={}&period={}",
        result.kind,
        urlencoding::encode(&result.period.map(|p| p.to_string()).unwrap_or_default())
    );

    format!(
        r#"{summary}
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <div class='flex justify-between items-center mb-4'>
                <h3 class='text-lg font-semibold'>تفاصيل التقرير</h3>
                <a href='{json_link}' class='text-xs text-indigo-600 hover:underline'>JSON</a>
            </div>
            {table}
        </div>
        {chart}"#,
        summary = render_summary(&result.summary, &config.currency),
        json_link = escape_html(&json_link),
        table = render_table(&result.rows, &config.currency),
        chart = render_chart(&result.series, CHART_CANVAS_ID, &config.currency, &config.charts),
    )
}

/// Inline notice, used for rejected parameters and the export placeholder
pub fn render_notice(message: &str) -> String {
    format!(
        r#"<div class='p-4 mb-4 rounded-lg border border-yellow-200 bg-yellow-50 text-yellow-800'>{}</div>"#,
        escape_html(message)
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use cashweb_core::{AxisLabel, ReportKind};

    fn series() -> ChartSeries {
        ChartSeries {
            labels: vec!["راتب".to_string(), "طعام".to_string()],
            income_values: vec![100.0, 0.0],
            expense_values: vec![0.0, 40.0],
            axis: AxisLabel::Category,
        }
    }

    #[test]
    fn test_summary_balance_colors() {
        let currency = CurrencyConfig::default();
        let positive = render_summary(&ReportSummary::new(100.0, 40.0), &currency);
        assert!(positive.contains("60.00 جنيه"));
        assert!(positive.contains("style='color: var(--income-color)'>60.00"));

        let negative = render_summary(&ReportSummary::new(40.0, 100.0), &currency);
        assert!(negative.contains("style='color: var(--expense-color)'>-60.00 جنيه"));
    }

    #[test]
    fn test_table_rows() {
        let currency = CurrencyConfig::default();
        let rows = vec![
            ReportRow::new("راتب", 100.0, 100.0 * 100.0 / 140.0),
            ReportRow::new("<b>", 40.0, 40.0 / 140.0 * 100.0),
        ];
        let html = render_table(&rows, &currency);
        assert_eq!(html.matches("<tr class='border-b'>").count(), 2);
        assert!(html.contains("<td class='px-4 py-2'>راتب</td>"));
        assert!(html.contains("100.00 جنيه"));
        assert!(html.contains("71.4%"));
        assert!(html.contains("28.6%"));
        assert!(html.contains("&lt;b&gt;"));
    }

    #[test]
    fn test_empty_table() {
        let html = render_table(&[], &CurrencyConfig::default());
        assert!(html.contains("لا توجد بيانات"));
    }

    #[test]
    fn test_chart_destroys_previous_instance() {
        let html = render_chart(&series(), CHART_CANVAS_ID, &CurrencyConfig::default(), &ChartConfig::default());
        let destroy = html.find("previous.destroy()").unwrap();
        let create = html.find("new Chart(").unwrap();
        assert!(destroy < create);
        assert!(html.contains("document.getElementById(\"reportChart\")"));
        assert!(html.contains("\"labels\":[\"راتب\",\"طعام\"]"));
        assert!(html.contains("rgba(76, 201, 240, 0.7)"));
        assert!(html.contains("rgba(247, 37, 133, 1)"));
        assert!(html.contains("toFixed(2)"));
        assert!(html.contains("\"فئة\""));
    }

    #[test]
    fn test_chart_script_cannot_close_early() {
        let mut hostile = series();
        hostile.labels[0] = "</script><script>alert(1)".to_string();
        let html = render_chart(&hostile, CHART_CANVAS_ID, &CurrencyConfig::default(), &ChartConfig::default());
        assert_eq!(html.matches("</script>").count(), 1);
    }

    #[test]
    fn test_render_report_links_json() {
        let result = ReportResult {
            kind: ReportKind::Monthly,
            period: Some("2024-03".parse().unwrap()),
            summary: ReportSummary::new(1.0, 0.0),
            series: series(),
            rows: vec![],
        };
        let html = render_report(&result, &Config::default());
        assert!(html.contains("/api/reports?kind=monthly&amp;period=2024-03"));
        assert!(html.contains("id='report-table'"));
        assert!(html.contains("Chart.getChart"));
    }

    #[test]
    fn test_chart_reset_only_destroys() {
        let html = render_chart_reset(CHART_CANVAS_ID);
        assert!(html.contains("document.getElementById(\"reportChart\")"));
        assert!(html.contains("previous.destroy()"));
        assert!(!html.contains("new Chart("));
    }

    #[test]
    fn test_notice_escapes() {
        assert!(render_notice("<x>").contains("&lt;x&gt;"));
    }
}
