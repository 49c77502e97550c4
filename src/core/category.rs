//! Macro asset categories and the keyword classifier.

use serde::{Deserialize, Serialize};
use std::fmt::Display;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MacroCategory {
    Bonds,
    Equity,
    Commodities,
    RealEstate,
}

impl MacroCategory {
    pub const ALL: [MacroCategory; 4] = [
        MacroCategory::Bonds,
        MacroCategory::Equity,
        MacroCategory::Commodities,
        MacroCategory::RealEstate,
    ];

    pub fn display_name(&self) -> &'static str {
        match self {
            MacroCategory::Bonds => "Bonds",
            MacroCategory::Equity => "Equity",
            MacroCategory::Commodities => "Commodities",
            MacroCategory::RealEstate => "Real Estate",
        }
    }

    /// Position in the canonical category order, used for per-category tables.
    pub fn index(&self) -> usize {
        match self {
            MacroCategory::Bonds => 0,
            MacroCategory::Equity => 1,
            MacroCategory::Commodities => 2,
            MacroCategory::RealEstate => 3,
        }
    }
}

impl Display for MacroCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// Assigns a fund to exactly one macro category from its free-text category
/// label and the secondary benchmark taxonomy label.
///
/// Categories are checked in a fixed priority order; within each category's
/// turn the primary label's keywords are tried before the benchmark's. A fund
/// matching nothing falls back to `Equity`, a permissive default rather than
/// an error, so catalogues with exotic labels still load fully.
pub fn classify(category: &str, benchmark: &str) -> MacroCategory {
    let category = category.to_lowercase();
    let benchmark = benchmark.to_lowercase();

    if category.contains("obbl") || category.contains("bond") || benchmark.contains("bond") {
        MacroCategory::Bonds
    } else if category.contains("azion")
        || category.contains("equity")
        || benchmark.contains("equity")
    {
        MacroCategory::Equity
    } else if category.contains("mater")
        || category.contains("commod")
        || benchmark.contains("commodity")
    {
        MacroCategory::Commodities
    } else if category.contains("immobil")
        || category.contains("real estate")
        || benchmark.contains("property")
    {
        MacroCategory::RealEstate
    } else {
        MacroCategory::Equity
    }
}
