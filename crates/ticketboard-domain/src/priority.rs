use serde::{Deserialize, Serialize};

/// Ticket priority. A ticket with no priority carries `None`, which is
/// distinct from every variant here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TicketPriority {
    Low,
    Medium,
    High,
}

impl TicketPriority {
    pub const ALL: [TicketPriority; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn icon(self) -> &'static str {
        match self {
            Self::Low => "🌱",
            Self::Medium => "⚡",
            Self::High => "🔥",
        }
    }
}

/// Describe an optional priority for display, covering the unset case.
pub fn describe(priority: Option<TicketPriority>) -> (&'static str, &'static str) {
    match priority {
        Some(p) => (p.label(), p.icon()),
        None => ("None", "📋"),
    }
}

impl std::fmt::Display for TicketPriority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
