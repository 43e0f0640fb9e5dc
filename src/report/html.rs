//! Self-contained HTML dashboard page.

use super::charts::{self, escape_xml, ChartStyle};
use super::Report;
use crate::analysis::format_count;
use crate::config::ReportConfig;

/// Render the report as a single HTML document with inline SVG charts.
pub fn generate_html_report(report: &Report, config: &ReportConfig) -> String {
    let style = ChartStyle::from(config);
    let view = &report.view;
    let meta = &report.metadata;

    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", escape_xml(&meta.title)));
    body.push_str(&format!(
        "<p class=\"meta\">{} | {} of {} records | generated {}</p>\n",
        escape_xml(&meta.source),
        format_count(meta.filtered_records),
        format_count(meta.total_records),
        meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    body.push_str(&format!(
        "<p class=\"filters\">{}</p>\n",
        escape_xml(&view.filter.describe())
    ));

    body.push_str("<div class=\"kpis\">\n");
    for (label, value) in [
        ("Total Records", view.kpis.total_display()),
        ("Mean QA Score", view.kpis.qa_display()),
        ("Mean Satisfaction", view.kpis.satisfaction_display()),
        ("Mean Error Rate", view.kpis.error_rate_display()),
    ] {
        body.push_str(&format!(
            "  <div class=\"kpi\"><div class=\"label\">{}</div><div class=\"value\">{}</div></div>\n",
            label,
            escape_xml(&value)
        ));
    }
    body.push_str("</div>\n");

    for (title, svg) in [
        (
            "QA Score by Agent",
            charts::agent_quality_svg(&view.agent_ranking, &style),
        ),
        (
            "Error Rate vs QA Score",
            charts::error_vs_quality_svg(&view.error_vs_quality, &style),
        ),
        (
            "Monthly Call Volume",
            charts::monthly_volume_svg(&view.monthly_volume, &style),
        ),
        (
            "Satisfaction by Shift and Category",
            charts::satisfaction_heatmap_svg(&view.satisfaction_heatmap, &style),
        ),
        (
            "QA Score Distribution by Weekday",
            charts::weekday_box_svg(&view.weekday_distribution, &style),
        ),
    ] {
        body.push_str(&format!(
            "<section>\n<h2>{}</h2>\n{}\n</section>\n",
            title, svg
        ));
    }

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<title>{title}</title>
<style>
body {{ background: {bg}; color: {fg}; font-family: sans-serif; margin: 2rem auto; max-width: {max}px; }}
h1 {{ font-size: 1.6rem; }}
h2 {{ font-size: 1.1rem; margin-top: 2rem; }}
.meta, .filters {{ opacity: 0.75; font-size: 0.9rem; }}
.kpis {{ display: flex; gap: 1rem; flex-wrap: wrap; }}
.kpi {{ flex: 1; min-width: 150px; border: 1px solid #31333f; border-radius: 6px; padding: 0.8rem; }}
.kpi .label {{ font-size: 0.8rem; opacity: 0.75; }}
.kpi .value {{ font-size: 1.5rem; margin-top: 0.3rem; }}
</style>
</head>
<body>
{body}<footer><p class="meta">Report generated by qadash</p></footer>
</body>
</html>
"##,
        title = escape_xml(&meta.title),
        bg = style.background,
        fg = style.foreground,
        max = style.width + 40,
        body = body,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::data::generator::{generate, GeneratorSettings};
    use crate::filter::Filter;
    use crate::report::ReportMetadata;
    use chrono::{NaiveDate, Utc};

    fn create_test_report(filter: &Filter) -> Report {
        let dashboard = Dashboard::new(generate(&GeneratorSettings::default()).unwrap()).unwrap();
        let view = dashboard.view(filter).unwrap();
        Report {
            metadata: ReportMetadata {
                title: "Ops <Weekly>".to_string(),
                generated_at: Utc::now(),
                source: "calls.csv".to_string(),
                total_records: dashboard.records().len(),
                filtered_records: view.kpis.total_records,
                duration_seconds: 0.0,
            },
            view,
        }
    }

    #[test]
    fn test_generate_html_report() {
        let html = generate_html_report(&create_test_report(&Filter::default()), &ReportConfig::default());

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Ops &lt;Weekly&gt;</title>"));
        assert_eq!(html.matches("<svg").count(), 5);
        assert_eq!(html.matches("class=\"kpi\"").count(), 4);
        assert!(html.contains("background: #0e1117"));
    }

    #[test]
    fn test_html_report_empty_selection() {
        let filter = Filter {
            from: NaiveDate::from_ymd_opt(2030, 6, 1),
            to: NaiveDate::from_ymd_opt(2030, 6, 2),
            ..Filter::default()
        };
        let html = generate_html_report(&create_test_report(&filter), &ReportConfig::default());

        assert_eq!(html.matches("No records match the current filters").count(), 5);
        assert!(html.contains(">n/a<"));
    }
}
