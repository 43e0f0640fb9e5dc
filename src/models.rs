//! Data models for the QA dashboard.
//!
//! This module contains the call record entity and the small closed
//! vocabularies (shift, call category, weekday, month) it is built from.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::Serialize;
use std::fmt;
use std::str::FromStr;

/// Daily work period a sample was recorded in.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, clap::ValueEnum,
)]
pub enum Shift {
    Morning,
    Afternoon,
    Night,
}

impl Shift {
    /// All shifts in day order.
    pub const ALL: [Shift; 3] = [Shift::Morning, Shift::Afternoon, Shift::Night];

    /// Display label, also used in the CSV file.
    pub fn label(&self) -> &'static str {
        match self {
            Shift::Morning => "Morning",
            Shift::Afternoon => "Afternoon",
            Shift::Night => "Night",
        }
    }
}

impl fmt::Display for Shift {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Shift {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "morning" | "manana" | "mañana" => Ok(Shift::Morning),
            "afternoon" | "tarde" => Ok(Shift::Afternoon),
            "night" | "noche" => Ok(Shift::Night),
            _ => Err(format!("unknown shift '{}'", s)),
        }
    }
}

/// Reason the customer called.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, clap::ValueEnum,
)]
pub enum CallCategory {
    #[serde(rename = "New Sale")]
    NewSale,
    Renewal,
    Complaint,
    #[serde(rename = "Tech Support")]
    TechSupport,
    Cancellation,
}

impl CallCategory {
    pub const ALL: [CallCategory; 5] = [
        CallCategory::NewSale,
        CallCategory::Renewal,
        CallCategory::Complaint,
        CallCategory::TechSupport,
        CallCategory::Cancellation,
    ];

    /// Display label, also used in the CSV file.
    pub fn label(&self) -> &'static str {
        match self {
            CallCategory::NewSale => "New Sale",
            CallCategory::Renewal => "Renewal",
            CallCategory::Complaint => "Complaint",
            CallCategory::TechSupport => "Tech Support",
            CallCategory::Cancellation => "Cancellation",
        }
    }
}

impl fmt::Display for CallCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CallCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match normalize_label(s).as_str() {
            "new sale" | "newsale" | "venta nueva" => Ok(CallCategory::NewSale),
            "renewal" | "renovacion" | "renovación" => Ok(CallCategory::Renewal),
            "complaint" | "queja" => Ok(CallCategory::Complaint),
            "tech support" | "techsupport" | "soporte tecnico" | "soporte técnico" => Ok(CallCategory::TechSupport),
            "cancellation" | "cancelacion" | "cancelación" => Ok(CallCategory::Cancellation),
            _ => Err(format!("unknown call category '{}'", s)),
        }
    }
}

/// Lowercase, trim, and fold `-`/`_` into spaces so `tech-support`,
/// `Tech_Support` and `Tech Support` compare equal.
fn normalize_label(s: &str) -> String {
    s.trim()
        .to_lowercase()
        .replace(['-', '_'], " ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// Weekday order used for display (Monday first).
pub const WEEKDAYS: [Weekday; 7] = [
    Weekday::Mon,
    Weekday::Tue,
    Weekday::Wed,
    Weekday::Thu,
    Weekday::Fri,
    Weekday::Sat,
    Weekday::Sun,
];

/// Three-letter weekday label used in the CSV file and charts.
pub fn weekday_label(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
        Weekday::Sun => "Sun",
    }
}

/// Parse a weekday label (English or Spanish, short or long).
pub fn parse_weekday(s: &str) -> Option<Weekday> {
    match normalize_label(s).as_str() {
        "mon" | "monday" | "lun" | "lunes" => Some(Weekday::Mon),
        "tue" | "tuesday" | "mar" | "martes" => Some(Weekday::Tue),
        "wed" | "wednesday" | "mie" | "miercoles" => Some(Weekday::Wed),
        "thu" | "thursday" | "jue" | "jueves" => Some(Weekday::Thu),
        "fri" | "friday" | "vie" | "viernes" => Some(Weekday::Fri),
        "sat" | "saturday" | "sab" | "sabado" => Some(Weekday::Sat),
        "sun" | "sunday" | "dom" | "domingo" => Some(Weekday::Sun),
        _ => None,
    }
}

/// Three-letter month label for a 1-based month number.
pub fn month_label(month: u32) -> &'static str {
    match month {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        12 => "Dec",
        _ => "?",
    }
}

/// One sampled (date, agent, shift, category) observation.
///
/// `month` and `weekday` are always derived from `date`; construct records
/// through [`CallRecord::derive_calendar`] or the loaders so they cannot drift.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    pub date: NaiveDate,
    pub month: u32,
    pub weekday: Weekday,
    pub agent_id: String,
    pub agent_name: String,
    pub tenure_months: u32,
    pub shift: Shift,
    pub category: CallCategory,
    pub calls_handled: u32,
    pub avg_duration_min: f64,
    pub satisfaction: f64,
    pub qa_score: f64,
    pub error_rate_pct: f64,
    pub first_call_resolution: bool,
}

impl CallRecord {
    /// Month and weekday for a date, as stored on a record.
    pub fn derive_calendar(date: NaiveDate) -> (u32, Weekday) {
        (date.month(), date.weekday())
    }
}

/// Documented closed ranges for the numeric measures.
pub mod ranges {
    pub const SATISFACTION: (f64, f64) = (1.0, 10.0);
    pub const QA_SCORE: (f64, f64) = (0.0, 100.0);
    pub const ERROR_RATE: (f64, f64) = (0.0, 100.0);
    pub const DURATION: (f64, f64) = (0.0, 60.0);
}
