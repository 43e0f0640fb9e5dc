//! KPI and chart aggregations over a filtered set of call records.
//!
//! Every function here takes the filtered rows and nothing else, so a
//! fixed filter always produces the same figures.

use super::stats::{mean, round_to, BoxStats};
use crate::models::{month_label, weekday_label, CallCategory, CallRecord, Shift, WEEKDAYS};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Headline figures for the filtered rows.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Kpis {
    pub total_records: usize,
    /// `None` when no rows match.
    pub mean_qa_score: Option<f64>,
    pub mean_satisfaction: Option<f64>,
    pub mean_error_rate: Option<f64>,
}

impl Kpis {
    pub fn total_display(&self) -> String {
        format_count(self.total_records)
    }

    pub fn qa_display(&self) -> String {
        format_mean(self.mean_qa_score, " / 100")
    }

    pub fn satisfaction_display(&self) -> String {
        format_mean(self.mean_satisfaction, " / 10")
    }

    pub fn error_rate_display(&self) -> String {
        format_mean(self.mean_error_rate, "%")
    }
}

/// Mean QA score for one agent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentQuality {
    pub agent_id: String,
    pub agent_name: String,
    pub qa_score: f64,
}

/// Per-agent point for the error-vs-quality scatter.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AgentPerformance {
    pub agent_id: String,
    pub agent_name: String,
    pub qa_score: f64,
    pub error_rate: f64,
    /// Total calls handled; drives bubble size.
    pub calls: u64,
}

/// Calls handled in one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyVolume {
    pub year: i32,
    pub month: u32,
    pub label: String,
    pub calls: u64,
}

/// Mean satisfaction per shift (rows) and category (columns).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SatisfactionHeatmap {
    pub shifts: Vec<Shift>,
    pub categories: Vec<CallCategory>,
    /// `cells[row][col]`, rounded to one decimal; `None` where no rows fall.
    pub cells: Vec<Vec<Option<f64>>>,
}

impl SatisfactionHeatmap {
    pub fn is_empty(&self) -> bool {
        self.shifts.is_empty()
    }

    pub fn cell(&self, shift: Shift, category: CallCategory) -> Option<f64> {
        let row = self.shifts.iter().position(|s| *s == shift)?;
        let col = self.categories.iter().position(|c| *c == category)?;
        self.cells[row][col]
    }
}

/// QA score distribution for one weekday.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekdayDistribution {
    pub weekday: &'static str,
    pub stats: BoxStats,
}

/// Record count and headline means.
pub fn compute_kpis(rows: &[&CallRecord]) -> Kpis {
    Kpis {
        total_records: rows.len(),
        mean_qa_score: mean(rows.iter().map(|r| r.qa_score)),
        mean_satisfaction: mean(rows.iter().map(|r| r.satisfaction)),
        mean_error_rate: mean(rows.iter().map(|r| r.error_rate_pct)),
    }
}

#[derive(Default)]
struct AgentTotals {
    count: usize,
    qa_sum: f64,
    error_sum: f64,
    calls: u64,
}

/// Group rows by agent, keyed by (name, id) so iteration is name-ordered.
fn totals_by_agent<'a>(rows: &[&'a CallRecord]) -> BTreeMap<(&'a str, &'a str), AgentTotals> {
    let mut grouped: BTreeMap<(&str, &str), AgentTotals> = BTreeMap::new();

    for record in rows {
        let totals = grouped
            .entry((record.agent_name.as_str(), record.agent_id.as_str()))
            .or_default();
        totals.count += 1;
        totals.qa_sum += record.qa_score;
        totals.error_sum += record.error_rate_pct;
        totals.calls += u64::from(record.calls_handled);
    }

    grouped
}

/// Mean QA per agent, best first. One entry per distinct agent.
pub fn agent_quality_ranking(rows: &[&CallRecord]) -> Vec<AgentQuality> {
    let mut ranking: Vec<AgentQuality> = totals_by_agent(rows)
        .into_iter()
        .map(|((name, id), totals)| AgentQuality {
            agent_id: id.to_string(),
            agent_name: name.to_string(),
            qa_score: totals.qa_sum / totals.count as f64,
        })
        .collect();

    // Stable sort keeps name order among ties.
    ranking.sort_by(|a, b| b.qa_score.total_cmp(&a.qa_score));
    ranking
}

/// Mean QA, mean error rate and total calls per agent, by name.
pub fn error_vs_quality(rows: &[&CallRecord]) -> Vec<AgentPerformance> {
    totals_by_agent(rows)
        .into_iter()
        .map(|((name, id), totals)| AgentPerformance {
            agent_id: id.to_string(),
            agent_name: name.to_string(),
            qa_score: totals.qa_sum / totals.count as f64,
            error_rate: totals.error_sum / totals.count as f64,
            calls: totals.calls,
        })
        .collect()
}

/// Total calls per calendar month, oldest first.
///
/// Labels carry the year only when the rows span more than one year.
pub fn monthly_volume(rows: &[&CallRecord]) -> Vec<MonthlyVolume> {
    use chrono::Datelike;

    let mut totals: BTreeMap<(i32, u32), u64> = BTreeMap::new();
    for record in rows {
        *totals.entry((record.date.year(), record.month)).or_default() +=
            u64::from(record.calls_handled);
    }

    let years: BTreeSet<i32> = totals.keys().map(|(year, _)| *year).collect();
    let multi_year = years.len() > 1;

    totals
        .into_iter()
        .map(|((year, month), calls)| MonthlyVolume {
            year,
            month,
            label: if multi_year {
                format!("{} {}", month_label(month), year)
            } else {
                month_label(month).to_string()
            },
            calls,
        })
        .collect()
}

/// Pivot of mean satisfaction by shift and category.
pub fn satisfaction_heatmap(rows: &[&CallRecord]) -> SatisfactionHeatmap {
    let mut sums: HashMap<(Shift, CallCategory), (f64, usize)> = HashMap::new();
    for record in rows {
        let entry = sums.entry((record.shift, record.category)).or_default();
        entry.0 += record.satisfaction;
        entry.1 += 1;
    }

    let shifts: Vec<Shift> = rows
        .iter()
        .map(|r| r.shift)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();
    let categories: Vec<CallCategory> = rows
        .iter()
        .map(|r| r.category)
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect();

    let cells = shifts
        .iter()
        .map(|shift| {
            categories
                .iter()
                .map(|category| {
                    sums.get(&(*shift, *category))
                        .map(|(sum, count)| round_to(sum / *count as f64, 1))
                })
                .collect()
        })
        .collect();

    SatisfactionHeatmap {
        shifts,
        categories,
        cells,
    }
}

/// QA box statistics per weekday present, Monday first.
pub fn weekday_distribution(rows: &[&CallRecord]) -> Vec<WeekdayDistribution> {
    WEEKDAYS
        .iter()
        .filter_map(|day| {
            let scores: Vec<f64> = rows
                .iter()
                .filter(|r| r.weekday == *day)
                .map(|r| r.qa_score)
                .collect();
            BoxStats::from_values(&scores).map(|stats| WeekdayDistribution {
                weekday: weekday_label(*day),
                stats,
            })
        })
        .collect()
}

/// Thousands-separated integer, e.g. `12,345`.
pub fn format_count(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// One-decimal mean with a unit suffix, or `n/a` when undefined.
pub fn format_mean(value: Option<f64>, suffix: &str) -> String {
    match value {
        Some(v) => format!("{:.1}{}", v, suffix),
        None => "n/a".to_string(),
    }
}

/// Generate a plain-text summary of the KPIs.
pub fn kpi_summary_text(kpis: &Kpis) -> String {
    [
        format!("Records: {}", kpis.total_display()),
        format!("Mean QA score: {}", kpis.qa_display()),
        format!("Mean satisfaction: {}", kpis.satisfaction_display()),
        format!("Mean error rate: {}", kpis.error_rate_display()),
    ]
    .join("\n")
}
