//! Static agent roster used by the synthetic generator.

/// One agent on the team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Agent {
    pub id: &'static str,
    pub name: &'static str,
    pub tenure_months: u32,
}

/// The default team, in id order.
pub const ROSTER: [Agent; 8] = [
    Agent { id: "AG01", name: "Carlos Mendez", tenure_months: 36 },
    Agent { id: "AG02", name: "Laura Rios", tenure_months: 24 },
    Agent { id: "AG03", name: "Jorge Castillo", tenure_months: 6 },
    Agent { id: "AG04", name: "Valentina Cruz", tenure_months: 18 },
    Agent { id: "AG05", name: "Andres Morales", tenure_months: 48 },
    Agent { id: "AG06", name: "Sofia Herrera", tenure_months: 12 },
    Agent { id: "AG07", name: "Miguel Torres", tenure_months: 30 },
    Agent { id: "AG08", name: "Daniela Vargas", tenure_months: 3 },
];

/// Agent whose error rate is inflated in generated data.
pub const HIGH_ERROR_AGENT: &str = "AG04";
