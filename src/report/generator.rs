//! Markdown and JSON report generation.

use super::{Report, ReportMetadata};
use crate::analysis::{
    format_count, AgentPerformance, AgentQuality, Kpis, MonthlyVolume, SatisfactionHeatmap,
    WeekdayDistribution,
};
use crate::filter::ResolvedFilter;
use anyhow::Result;

/// Generate a complete Markdown report.
pub fn generate_markdown_report(report: &Report) -> String {
    let view = &report.view;
    let mut output = String::new();

    output.push_str(&format!("# {}\n\n", report.metadata.title));
    output.push_str(&generate_metadata_section(&report.metadata));
    output.push_str(&generate_filters_section(&view.filter));
    output.push_str(&generate_kpi_section(&view.kpis));

    if view.kpis.total_records == 0 {
        output.push_str("> No records match the current filters.\n\n");
    } else {
        output.push_str(&generate_ranking_section(&view.agent_ranking));
        output.push_str(&generate_scatter_section(&view.error_vs_quality));
        output.push_str(&generate_volume_section(&view.monthly_volume));
        output.push_str(&generate_heatmap_section(&view.satisfaction_heatmap));
        output.push_str(&generate_weekday_section(&view.weekday_distribution));
    }

    output.push_str(&generate_footer());
    output
}

fn generate_metadata_section(metadata: &ReportMetadata) -> String {
    let mut section = String::new();

    section.push_str("## Metadata\n\n");
    section.push_str(&format!("- **Source:** {}\n", metadata.source));
    section.push_str(&format!(
        "- **Generated:** {}\n",
        metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    section.push_str(&format!(
        "- **Records:** {} of {}\n",
        format_count(metadata.filtered_records),
        format_count(metadata.total_records)
    ));
    section.push_str(&format!(
        "- **Duration:** {:.2}s\n\n",
        metadata.duration_seconds
    ));

    section
}

fn generate_filters_section(filter: &ResolvedFilter) -> String {
    let mut section = String::new();

    section.push_str("## Filters\n\n");
    section.push_str("| Filter | Value |\n");
    section.push_str("|:---|:---|\n");
    section.push_str(&format!("| Date range | {} to {} |\n", filter.from, filter.to));
    section.push_str(&format!(
        "| Shift | {} |\n",
        filter.shift.map_or("All".to_string(), |s| s.to_string())
    ));
    section.push_str(&format!(
        "| Category | {} |\n",
        filter.category.map_or("All".to_string(), |c| c.to_string())
    ));
    section.push_str(&format!(
        "| Agent | {} |\n\n",
        filter
            .agent
            .as_ref()
            .map_or("All".to_string(), |a| {
                format!("{} ({})", escape_cell(&a.name), escape_cell(&a.id))
            })
    ));

    section
}

fn generate_kpi_section(kpis: &Kpis) -> String {
    let mut section = String::new();

    section.push_str("## Key Metrics\n\n");
    section.push_str("| Total Records | Mean QA Score | Mean Satisfaction | Mean Error Rate |\n");
    section.push_str("|:---:|:---:|:---:|:---:|\n");
    section.push_str(&format!(
        "| {} | {} | {} | {} |\n\n",
        kpis.total_display(),
        kpis.qa_display(),
        kpis.satisfaction_display(),
        kpis.error_rate_display()
    ));

    section
}

fn generate_ranking_section(ranking: &[AgentQuality]) -> String {
    let mut section = String::new();

    section.push_str("## QA Score by Agent\n\n");
    section.push_str("| Rank | Agent | QA Score |\n");
    section.push_str("|:---:|:---|---:|\n");
    for (i, agent) in ranking.iter().enumerate() {
        section.push_str(&format!(
            "| {} | {} | {:.1} |\n",
            i + 1,
            escape_cell(&agent.agent_name),
            agent.qa_score
        ));
    }
    section.push('\n');

    section
}

fn generate_scatter_section(points: &[AgentPerformance]) -> String {
    let mut section = String::new();

    section.push_str("## Error Rate vs QA Score\n\n");
    section.push_str("| Agent | QA Score | Error Rate (%) | Calls |\n");
    section.push_str("|:---|---:|---:|---:|\n");
    for point in points {
        section.push_str(&format!(
            "| {} | {:.1} | {:.1} | {} |\n",
            escape_cell(&point.agent_name),
            point.qa_score,
            point.error_rate,
            format_count(point.calls as usize)
        ));
    }
    section.push('\n');

    section
}

fn generate_volume_section(volume: &[MonthlyVolume]) -> String {
    let mut section = String::new();

    section.push_str("## Monthly Call Volume\n\n");
    section.push_str("| Month | Calls |\n");
    section.push_str("|:---|---:|\n");
    for month in volume {
        section.push_str(&format!(
            "| {} | {} |\n",
            month.label,
            format_count(month.calls as usize)
        ));
    }
    section.push('\n');

    section
}

/// Shift rows against category columns; empty cells print as `-`.
fn generate_heatmap_section(heatmap: &SatisfactionHeatmap) -> String {
    let mut section = String::new();

    section.push_str("## Satisfaction by Shift and Category\n\n");
    section.push_str("| Shift |");
    for category in &heatmap.categories {
        section.push_str(&format!(" {} |", category));
    }
    section.push_str("\n|:---|");
    section.push_str(&"---:|".repeat(heatmap.categories.len()));
    section.push('\n');

    for &shift in &heatmap.shifts {
        section.push_str(&format!("| {} |", shift));
        for &category in &heatmap.categories {
            match heatmap.cell(shift, category) {
                Some(v) => section.push_str(&format!(" {:.1} |", v)),
                None => section.push_str(" - |"),
            }
        }
        section.push('\n');
    }
    section.push('\n');

    section
}

fn generate_weekday_section(distribution: &[WeekdayDistribution]) -> String {
    let mut section = String::new();

    section.push_str("## QA Score Distribution by Weekday\n\n");
    section.push_str("| Day | Count | Min | Q1 | Median | Q3 | Max | Mean | Outliers |\n");
    section.push_str("|:---|---:|---:|---:|---:|---:|---:|---:|---:|\n");
    for day in distribution {
        let s = &day.stats;
        section.push_str(&format!(
            "| {} | {} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {:.1} | {} |\n",
            day.weekday,
            s.count,
            s.min,
            s.q1,
            s.median,
            s.q3,
            s.max,
            s.mean,
            s.outliers.len()
        ));
    }
    section.push('\n');

    section
}

/// Escape text for a Markdown table cell.
fn escape_cell(text: &str) -> String {
    text.replace('|', "\\|").replace(['\n', '\r'], " ")
}

fn generate_footer() -> String {
    "---\n\n*Report generated by qadash*\n".to_string()
}

/// Generate a JSON report.
pub fn generate_json_report(report: &Report) -> Result<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dashboard::Dashboard;
    use crate::data::generator::{generate, GeneratorSettings};
    use crate::filter::Filter;
    use crate::models::Shift;
    use chrono::{NaiveDate, Utc};

    fn create_test_report(filter: &Filter) -> Report {
        let dashboard = Dashboard::new(generate(&GeneratorSettings::default()).unwrap()).unwrap();
        let view = dashboard.view(filter).unwrap();

        Report {
            metadata: ReportMetadata {
                title: "QA Call Center Performance Dashboard".to_string(),
                generated_at: Utc::now(),
                source: "synthetic (600 rows, seed 42)".to_string(),
                total_records: dashboard.records().len(),
                filtered_records: view.kpis.total_records,
                duration_seconds: 0.12,
            },
            view,
        }
    }

    #[test]
    fn test_generate_markdown_report() {
        let report = create_test_report(&Filter::default());
        let markdown = generate_markdown_report(&report);

        assert!(markdown.starts_with("# QA Call Center Performance Dashboard"));
        for heading in [
            "## Metadata",
            "## Filters",
            "## Key Metrics",
            "## QA Score by Agent",
            "## Error Rate vs QA Score",
            "## Monthly Call Volume",
            "## Satisfaction by Shift and Category",
            "## QA Score Distribution by Weekday",
        ] {
            assert!(markdown.contains(heading), "missing {}", heading);
        }
        assert!(markdown.contains("- **Records:** 600 of 600"));
        assert!(markdown.contains("Valentina Cruz"));
    }

    #[test]
    fn test_markdown_report_with_no_matches() {
        let filter = Filter {
            from: NaiveDate::from_ymd_opt(2030, 1, 1),
            to: NaiveDate::from_ymd_opt(2030, 1, 31),
            ..Filter::default()
        };
        let markdown = generate_markdown_report(&create_test_report(&filter));

        assert!(markdown.contains("No records match the current filters"));
        assert!(markdown.contains("| 0 | n/a | n/a | n/a |"));
        assert!(!markdown.contains("## QA Score by Agent"));
    }

    #[test]
    fn test_generate_filters_section() {
        let report = create_test_report(&Filter {
            shift: Some(Shift::Night),
            agent: Some("ag04".to_string()),
            ..Filter::default()
        });
        let section = generate_filters_section(&report.view.filter);

        assert!(section.contains("| Shift | Night |"));
        assert!(section.contains("| Category | All |"));
        assert!(section.contains("| Agent | Valentina Cruz (AG04) |"));
    }

    #[test]
    fn test_heatmap_section_marks_missing_cells() {
        let heatmap = SatisfactionHeatmap {
            shifts: vec![Shift::Morning],
            categories: vec![
                crate::models::CallCategory::NewSale,
                crate::models::CallCategory::Complaint,
            ],
            cells: vec![vec![Some(8.5), None]],
        };
        let section = generate_heatmap_section(&heatmap);

        assert!(section.contains("| Shift | New Sale | Complaint |"));
        assert!(section.contains("| Morning | 8.5 | - |"));
    }

    #[test]
    fn test_agent_names_escaped_in_tables() {
        let ranking = vec![AgentQuality {
            agent_id: "X1".to_string(),
            agent_name: "Lopez | Night Lead".to_string(),
            qa_score: 77.5,
        }];
        let section = generate_ranking_section(&ranking);
        assert!(section.contains("| 1 | Lopez \\| Night Lead | 77.5 |"));

        let points = vec![AgentPerformance {
            agent_id: "X1".to_string(),
            agent_name: "Lopez | Night Lead".to_string(),
            qa_score: 77.5,
            error_rate: 12.0,
            calls: 1200,
        }];
        let section = generate_scatter_section(&points);
        assert!(section.contains("| Lopez \\| Night Lead | 77.5 | 12.0 | 1,200 |"));
    }

    #[test]
    fn test_escape_cell() {
        assert_eq!(escape_cell("a|b"), "a\\|b");
        assert_eq!(escape_cell("two\nlines"), "two lines");
        assert_eq!(escape_cell("plain"), "plain");
    }

    #[test]
    fn test_generate_json_report() {
        let report = create_test_report(&Filter::default());
        let json = generate_json_report(&report).unwrap();

        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["metadata"]["total_records"], 600);
        assert_eq!(value["view"]["kpis"]["total_records"], 600);
        assert!(value["view"]["agent_ranking"].as_array().unwrap().len() <= 8);
        assert!(json.contains("\"satisfaction_heatmap\""));
    }
}
