//! Seeded synthetic call record generation.
//!
//! The generated table carries a few deliberate patterns for the
//! dashboard to surface: Monday/Friday and December volume spikes, a
//! satisfaction dip for overloaded shifts and cancellations, a night-shift
//! slump in March, and one agent with an inflated error rate.

use super::roster::{Agent, HIGH_ERROR_AGENT, ROSTER};
use crate::analysis::stats::round_to;
use crate::error::DataError;
use crate::models::{CallCategory, CallRecord, Shift};
use chrono::{Duration, NaiveDate, Weekday};
use rand::distributions::{Distribution, WeightedIndex};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::Normal;
use tracing::debug;

const SHIFT_WEIGHTS: [f64; 3] = [0.45, 0.40, 0.15];
const CATEGORY_WEIGHTS: [f64; 5] = [0.30, 0.25, 0.15, 0.20, 0.10];

/// Calls per shift above which an agent counts as overloaded.
const OVERLOAD_CALLS: u32 = 25;

/// Upper bound on rows reserved up front; larger tables grow as they fill.
const MAX_PREALLOCATED_ROWS: usize = 100_000;

/// Parameters for a synthetic table.
#[derive(Debug, Clone, PartialEq)]
pub struct GeneratorSettings {
    pub seed: u64,
    pub rows: usize,
    pub start_date: NaiveDate,
    /// Dates are drawn from `[start_date, start_date + span_days)`.
    pub span_days: u32,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: 42,
            rows: 600,
            start_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap_or(NaiveDate::MIN),
            span_days: 365,
        }
    }
}

impl From<&crate::config::DataConfig> for GeneratorSettings {
    fn from(config: &crate::config::DataConfig) -> Self {
        Self {
            seed: config.seed,
            rows: config.rows,
            start_date: config.start_date,
            span_days: config.span_days,
        }
    }
}

/// Generate a synthetic table. The same settings always yield the same rows.
pub fn generate(settings: &GeneratorSettings) -> Result<Vec<CallRecord>, DataError> {
    if settings.rows == 0 {
        return Err(DataError::InvalidSettings("rows must be at least 1".to_string()));
    }
    if settings.span_days == 0 {
        return Err(DataError::InvalidSettings(
            "span_days must be at least 1".to_string(),
        ));
    }
    if Duration::try_days(i64::from(settings.span_days))
        .and_then(|span| settings.start_date.checked_add_signed(span))
        .is_none()
    {
        return Err(DataError::InvalidSettings(format!(
            "{} + {} days is past the last representable date",
            settings.start_date, settings.span_days
        )));
    }

    let invalid = |e: &dyn std::fmt::Display| DataError::InvalidSettings(e.to_string());
    let shift_dist = WeightedIndex::new(SHIFT_WEIGHTS).map_err(|e| invalid(&e))?;
    let category_dist = WeightedIndex::new(CATEGORY_WEIGHTS).map_err(|e| invalid(&e))?;
    let duration_noise = Normal::<f64>::new(8.0, 2.0).map_err(|e| invalid(&e))?;
    let satisfaction_noise = Normal::<f64>::new(0.0, 0.8).map_err(|e| invalid(&e))?;
    let qa_noise = Normal::<f64>::new(0.0, 8.0).map_err(|e| invalid(&e))?;
    let error_noise = Normal::<f64>::new(0.0, 3.0).map_err(|e| invalid(&e))?;

    let mut rng = StdRng::seed_from_u64(settings.seed);
    let mut records = Vec::with_capacity(settings.rows.min(MAX_PREALLOCATED_ROWS));

    for _ in 0..settings.rows {
        let offset = rng.gen_range(0..settings.span_days);
        let date = Duration::try_days(i64::from(offset))
            .and_then(|days| settings.start_date.checked_add_signed(days))
            .ok_or_else(|| DataError::InvalidSettings(format!("day offset {} overflows", offset)))?;
        let (month, weekday) = CallRecord::derive_calendar(date);

        let agent: &Agent = &ROSTER[rng.gen_range(0..ROSTER.len())];
        let tenure = f64::from(agent.tenure_months);
        let shift = Shift::ALL[shift_dist.sample(&mut rng)];
        let category = CallCategory::ALL[category_dist.sample(&mut rng)];

        let mut calls: u32 = rng.gen_range(10..30);
        if matches!(weekday, Weekday::Mon | Weekday::Fri) {
            calls += rng.gen_range(4..9);
        }
        if month == 12 {
            calls += rng.gen_range(3..7);
        }
        let overloaded = calls > OVERLOAD_CALLS;
        let cancellation = category == CallCategory::Cancellation;

        let mut duration = duration_noise.sample(&mut rng);
        if cancellation {
            duration += rng.gen_range(5.0..10.0);
        }
        let duration = round_to(duration.clamp(3.0, 25.0), 1);

        let mut satisfaction =
            5.0 + duration * 0.15 + tenure * 0.03 + satisfaction_noise.sample(&mut rng);
        if overloaded {
            satisfaction -= 1.2;
        }
        if cancellation {
            satisfaction -= 1.5;
        }
        if shift == Shift::Night && month == 3 {
            satisfaction -= 2.0;
        }
        let satisfaction = round_to(satisfaction.clamp(1.0, 10.0), 1);

        let mut qa = 60.0 + tenure * 0.5 + qa_noise.sample(&mut rng);
        if overloaded {
            qa -= 8.0;
        }
        let qa = round_to(qa.clamp(40.0, 100.0), 1);

        let mut error_rate = (20.0 - tenure * 0.2 + error_noise.sample(&mut rng)).clamp(2.0, 40.0);
        if agent.id == HIGH_ERROR_AGENT {
            error_rate *= 1.8;
        }
        let error_rate = round_to(error_rate, 1);

        let resolve_probability = (0.4 + tenure * 0.01).clamp(0.4, 0.85);
        let first_call_resolution = rng.gen_bool(resolve_probability);

        records.push(CallRecord {
            date,
            month,
            weekday,
            agent_id: agent.id.to_string(),
            agent_name: agent.name.to_string(),
            tenure_months: agent.tenure_months,
            shift,
            category,
            calls_handled: calls,
            avg_duration_min: duration,
            satisfaction,
            qa_score: qa,
            error_rate_pct: error_rate,
            first_call_resolution,
        });
    }

    debug!(
        "Generated {} synthetic records (seed {})",
        records.len(),
        settings.seed
    );
    Ok(records)
}
