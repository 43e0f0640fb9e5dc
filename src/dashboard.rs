//! The dashboard: an immutable table plus per-interaction views.

use crate::analysis::{
    agent_quality_ranking, compute_kpis, error_vs_quality, monthly_volume, satisfaction_heatmap,
    weekday_distribution, AgentPerformance, AgentQuality, Kpis, MonthlyVolume,
    SatisfactionHeatmap, WeekdayDistribution,
};
use crate::error::{DataError, FilterError};
use crate::filter::{Filter, FilterOptions, ResolvedFilter};
use crate::models::CallRecord;
use serde::Serialize;
use tracing::debug;

/// Everything shown for one filter selection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub filter: ResolvedFilter,
    pub kpis: Kpis,
    pub agent_ranking: Vec<AgentQuality>,
    pub error_vs_quality: Vec<AgentPerformance>,
    pub monthly_volume: Vec<MonthlyVolume>,
    pub satisfaction_heatmap: SatisfactionHeatmap,
    pub weekday_distribution: Vec<WeekdayDistribution>,
}

/// The session's source table, built once and never mutated.
#[derive(Debug)]
pub struct Dashboard {
    records: Vec<CallRecord>,
    options: FilterOptions,
}

impl Dashboard {
    /// Take ownership of a non-empty table.
    pub fn new(records: Vec<CallRecord>) -> Result<Self, DataError> {
        let options = FilterOptions::from_records(&records).ok_or(DataError::Empty)?;
        Ok(Self { records, options })
    }

    pub fn records(&self) -> &[CallRecord] {
        &self.records
    }

    /// Values available to the filter selectors.
    pub fn options(&self) -> &FilterOptions {
        &self.options
    }

    /// Filter the table and compute every aggregate for the result.
    pub fn view(&self, filter: &Filter) -> Result<DashboardView, FilterError> {
        let resolved = filter.resolve(&self.options)?;
        let rows = resolved.apply(&self.records);
        debug!(
            "Filter [{}] kept {} of {} records",
            resolved.describe(),
            rows.len(),
            self.records.len()
        );

        Ok(DashboardView {
            kpis: compute_kpis(&rows),
            agent_ranking: agent_quality_ranking(&rows),
            error_vs_quality: error_vs_quality(&rows),
            monthly_volume: monthly_volume(&rows),
            satisfaction_heatmap: satisfaction_heatmap(&rows),
            weekday_distribution: weekday_distribution(&rows),
            filter: resolved,
        })
    }
}
