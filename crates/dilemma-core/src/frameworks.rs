//! The framework registry.
//!
//! A fixed, ordered catalog. Analyses always report one score per entry, in
//! this order.

use serde::Serialize;

/// Descriptor for one ethical framework.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Framework {
    /// Stable identifier used in scores and exports
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
}

pub const UTILITARIAN: &str = "utilitarian";
pub const DEONTOLOGICAL: &str = "deontological";
pub const VIRTUE: &str = "virtue";
pub const CARE: &str = "care";
pub const JUSTICE: &str = "justice";

/// All frameworks, in registry order.
pub static FRAMEWORKS: [Framework; 5] = [
    Framework {
        id: UTILITARIAN,
        name: "Utilitarian",
        description: "Maximizes overall happiness and well-being for the greatest number of people",
    },
    Framework {
        id: DEONTOLOGICAL,
        name: "Deontological",
        description: "Focuses on moral rules, duties, and rights regardless of consequences",
    },
    Framework {
        id: VIRTUE,
        name: "Virtue Ethics",
        description: "Emphasizes character traits and moral virtues of the decision maker",
    },
    Framework {
        id: CARE,
        name: "Care Ethics",
        description: "Prioritizes relationships, empathy, and care for individuals",
    },
    Framework {
        id: JUSTICE,
        name: "Justice Ethics",
        description: "Focuses on fairness, equality, and distribution of benefits and burdens",
    },
];

/// All frameworks, in registry order.
pub fn frameworks() -> &'static [Framework] {
    &FRAMEWORKS
}

/// Find a framework by identifier.
pub fn framework_by_id(id: &str) -> Option<&'static Framework> {
    FRAMEWORKS.iter().find(|f| f.id == id)
}

/// Display name for an identifier, falling back to the identifier itself.
pub fn display_name(id: &str) -> &str {
    framework_by_id(id).map(|f| f.name).unwrap_or(id)
}
