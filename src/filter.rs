//! Record filtering.
//!
//! A [`Filter`] is what the user asked for; resolving it against the
//! table's [`FilterOptions`] fills in the default date bounds, matches the
//! agent selection to a known agent, and yields a [`ResolvedFilter`] that can
//! only narrow the table.

use crate::error::FilterError;
use crate::models::{CallCategory, CallRecord, Shift};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::BTreeSet;

/// A user's filter selection. `None` means "all".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Filter {
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
    pub shift: Option<Shift>,
    pub category: Option<CallCategory>,
    /// Agent display name or agent id.
    pub agent: Option<String>,
}

/// An agent as offered by the agent selector.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AgentRef {
    pub id: String,
    pub name: String,
}

/// Values available to each selector, derived from the full table.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FilterOptions {
    pub date_min: NaiveDate,
    pub date_max: NaiveDate,
    pub shifts: Vec<Shift>,
    pub categories: Vec<CallCategory>,
    /// Sorted by display name.
    pub agents: Vec<AgentRef>,
}

impl FilterOptions {
    /// Collect selector values; `None` for an empty table.
    pub fn from_records(records: &[CallRecord]) -> Option<Self> {
        let date_min = records.iter().map(|r| r.date).min()?;
        let date_max = records.iter().map(|r| r.date).max()?;

        let shifts: BTreeSet<Shift> = records.iter().map(|r| r.shift).collect();
        let categories: BTreeSet<CallCategory> = records.iter().map(|r| r.category).collect();
        let agents: BTreeSet<(&str, &str)> = records
            .iter()
            .map(|r| (r.agent_name.as_str(), r.agent_id.as_str()))
            .collect();

        Some(Self {
            date_min,
            date_max,
            shifts: shifts.into_iter().collect(),
            categories: categories.into_iter().collect(),
            agents: agents
                .into_iter()
                .map(|(name, id)| AgentRef {
                    id: id.to_string(),
                    name: name.to_string(),
                })
                .collect(),
        })
    }

    /// Find an agent by display name or id (case-insensitive).
    pub fn find_agent(&self, query: &str) -> Option<&AgentRef> {
        let query = query.trim();
        self.agents
            .iter()
            .find(|a| a.name.eq_ignore_ascii_case(query) || a.id.eq_ignore_ascii_case(query))
    }
}

/// A filter with every predicate pinned down.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedFilter {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub shift: Option<Shift>,
    pub category: Option<CallCategory>,
    pub agent: Option<AgentRef>,
}

impl Filter {
    /// Resolve against the table's options.
    pub fn resolve(&self, options: &FilterOptions) -> Result<ResolvedFilter, FilterError> {
        let from = self.from.unwrap_or(options.date_min);
        let to = self.to.unwrap_or(options.date_max);
        if from > to {
            return Err(FilterError::InvertedRange { from, to });
        }

        let agent = match self.agent.as_deref() {
            Some(query) => Some(options.find_agent(query).cloned().ok_or_else(|| {
                FilterError::UnknownAgent {
                    name: query.to_string(),
                    available: options
                        .agents
                        .iter()
                        .map(|a| a.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", "),
                }
            })?),
            None => None,
        };

        Ok(ResolvedFilter {
            from,
            to,
            shift: self.shift,
            category: self.category,
            agent,
        })
    }
}

impl ResolvedFilter {
    /// Whether a record satisfies every active predicate.
    pub fn matches(&self, record: &CallRecord) -> bool {
        record.date >= self.from
            && record.date <= self.to
            && self.shift.map_or(true, |s| record.shift == s)
            && self.category.map_or(true, |c| record.category == c)
            && self
                .agent
                .as_ref()
                .map_or(true, |a| record.agent_id == a.id)
    }

    /// Narrow the table, preserving row order.
    pub fn apply<'a>(&self, records: &'a [CallRecord]) -> Vec<&'a CallRecord> {
        records.iter().filter(|r| self.matches(r)).collect()
    }

    /// One-line human description of the active predicates.
    pub fn describe(&self) -> String {
        format!(
            "{} to {} | shift: {} | category: {} | agent: {}",
            self.from,
            self.to,
            self.shift.map_or("All".to_string(), |s| s.to_string()),
            self.category.map_or("All".to_string(), |c| c.to_string()),
            self.agent.as_ref().map_or("All", |a| a.name.as_str()),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::generator::{generate, GeneratorSettings};

    fn table() -> Vec<CallRecord> {
        generate(&GeneratorSettings::default()).unwrap()
    }

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_options_from_records() {
        let records = table();
        let options = FilterOptions::from_records(&records).unwrap();

        assert!(options.date_min <= options.date_max);
        assert!(options.date_min >= date(2024, 1, 1));
        assert_eq!(options.shifts, Shift::ALL.to_vec());
        assert_eq!(options.agents.len(), 8);
        let names: Vec<_> = options.agents.iter().map(|a| a.name.clone()).collect();
        let mut sorted = names.clone();
        sorted.sort();
        assert_eq!(names, sorted);
        assert!(FilterOptions::from_records(&[]).is_none());
    }

    #[test]
    fn test_default_filter_keeps_everything() {
        let records = table();
        let options = FilterOptions::from_records(&records).unwrap();
        let resolved = Filter::default().resolve(&options).unwrap();

        assert_eq!(resolved.apply(&records).len(), records.len());
    }

    #[test]
    fn test_filtering_is_a_narrowing() {
        let records = table();
        let options = FilterOptions::from_records(&records).unwrap();
        let filter = Filter {
            from: Some(date(2024, 3, 1)),
            to: Some(date(2024, 5, 31)),
            shift: Some(Shift::Morning),
            category: None,
            agent: Some("Laura Rios".to_string()),
        };
        let resolved = filter.resolve(&options).unwrap();
        let narrowed = resolved.apply(&records);

        assert!(narrowed.len() < records.len());
        for record in &narrowed {
            assert!(records.iter().any(|r| std::ptr::eq(r, *record)));
            assert!(record.date >= date(2024, 3, 1) && record.date <= date(2024, 5, 31));
            assert_eq!(record.shift, Shift::Morning);
            assert_eq!(record.agent_name, "Laura Rios");
        }

        // Empty iff nothing satisfies every predicate.
        let expected = records.iter().filter(|r| resolved.matches(r)).count();
        assert_eq!(narrowed.len(), expected);
    }

    #[test]
    fn test_range_outside_data_yields_empty() {
        let records = table();
        let options = FilterOptions::from_records(&records).unwrap();
        let filter = Filter {
            from: Some(date(2030, 1, 1)),
            to: Some(date(2030, 12, 31)),
            ..Filter::default()
        };
        assert!(filter.resolve(&options).unwrap().apply(&records).is_empty());
    }

    #[test]
    fn test_agent_matched_by_id_or_name() {
        let records = table();
        let options = FilterOptions::from_records(&records).unwrap();

        let by_id = Filter {
            agent: Some("ag05".to_string()),
            ..Filter::default()
        };
        let by_name = Filter {
            agent: Some("andres morales".to_string()),
            ..Filter::default()
        };
        let a = by_id.resolve(&options).unwrap();
        let b = by_name.resolve(&options).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.agent.as_ref().map(|a| a.name.as_str()), Some("Andres Morales"));
    }

    #[test]
    fn test_unknown_agent_rejected() {
        let records = table();
        let options = FilterOptions::from_records(&records).unwrap();
        let filter = Filter {
            agent: Some("Nobody".to_string()),
            ..Filter::default()
        };
        let err = filter.resolve(&options).unwrap_err();
        assert!(matches!(err, FilterError::UnknownAgent { ref name, .. } if name == "Nobody"));
        assert!(err.to_string().contains("Laura Rios"));
    }

    #[test]
    fn test_inverted_range_rejected() {
        let records = table();
        let options = FilterOptions::from_records(&records).unwrap();
        let filter = Filter {
            from: Some(date(2024, 6, 1)),
            to: Some(date(2024, 5, 1)),
            ..Filter::default()
        };
        assert_eq!(
            filter.resolve(&options),
            Err(FilterError::InvertedRange {
                from: date(2024, 6, 1),
                to: date(2024, 5, 1),
            })
        );
    }

    #[test]
    fn test_describe() {
        let resolved = ResolvedFilter {
            from: date(2024, 1, 1),
            to: date(2024, 1, 31),
            shift: Some(Shift::Night),
            category: None,
            agent: None,
        };
        assert_eq!(
            resolved.describe(),
            "2024-01-01 to 2024-01-31 | shift: Night | category: All | agent: All"
        );
    }
}
