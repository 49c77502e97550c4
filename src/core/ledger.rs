//! The two-level weighting hierarchy: macro-category allocation percentages
//! and per-fund weights within each category.
//!
//! Intra-category weights are deliberately not normalized to sum to 100;
//! "complete" is a derived predicate, never an enforced constraint.

use crate::core::category::MacroCategory;
use std::collections::{HashMap, HashSet};

/// A selected fund inside one category. Weight 0 means selected but
/// contributing nothing, an allowed transient state rather than an error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFund {
    pub id: String,
    pub weight: u8,
}

#[derive(Debug, Clone, Default)]
pub struct AllocationLedger {
    allocations: HashMap<MacroCategory, u8>,
    /// Per-category selections in selection order; presence means selected.
    selections: HashMap<MacroCategory, Vec<SelectedFund>>,
    /// Independent of selection and allocation; cleared only on reload.
    starred: HashSet<String>,
}

/// All user-supplied percentages are clamped here, at the mutation boundary.
fn clamp_pct(value: i64) -> u8 {
    value.clamp(0, 100) as u8
}

impl AllocationLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn allocation(&self, category: MacroCategory) -> u8 {
        self.allocations.get(&category).copied().unwrap_or(0)
    }

    /// Sets a category's allocation percentage. Dropping a nonzero
    /// allocation to 0 clears that category's fund selections; they are not
    /// recoverable afterwards.
    pub fn set_allocation(&mut self, category: MacroCategory, value: i64) {
        let value = clamp_pct(value);
        if value == 0 && self.allocation(category) > 0 {
            self.selections.remove(&category);
        }
        self.allocations.insert(category, value);
    }

    pub fn total_allocation(&self) -> u32 {
        MacroCategory::ALL
            .iter()
            .map(|category| u32::from(self.allocation(*category)))
            .sum()
    }

    pub fn selected(&self, category: MacroCategory) -> &[SelectedFund] {
        self.selections
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn is_selected(&self, category: MacroCategory, id: &str) -> bool {
        self.selected(category).iter().any(|fund| fund.id == id)
    }

    pub fn weight(&self, category: MacroCategory, id: &str) -> Option<u8> {
        self.selected(category)
            .iter()
            .find(|fund| fund.id == id)
            .map(|fund| fund.weight)
    }

    /// Selects an unselected fund at weight 0, or removes a selected one
    /// entirely (its weight is discarded).
    pub fn toggle_selection(&mut self, category: MacroCategory, id: &str) {
        let entries = self.selections.entry(category).or_default();
        if let Some(position) = entries.iter().position(|fund| fund.id == id) {
            entries.remove(position);
        } else {
            entries.push(SelectedFund {
                id: id.to_string(),
                weight: 0,
            });
        }
    }

    /// Sets a selected fund's weight, clamped to [0,100]. An unselected fund
    /// is selected implicitly; there is no separate existence check.
    pub fn set_weight(&mut self, category: MacroCategory, id: &str, value: i64) {
        let weight = clamp_pct(value);
        let entries = self.selections.entry(category).or_default();
        match entries.iter_mut().find(|fund| fund.id == id) {
            Some(fund) => fund.weight = weight,
            None => entries.push(SelectedFund {
                id: id.to_string(),
                weight,
            }),
        }
    }

    pub fn category_weight_sum(&self, category: MacroCategory) -> u32 {
        self.selected(category)
            .iter()
            .map(|fund| u32::from(fund.weight))
            .sum()
    }

    /// Exactly 100, not at-least and not approximately.
    pub fn is_category_complete(&self, category: MacroCategory) -> bool {
        self.category_weight_sum(category) == 100
    }

    pub fn toggle_star(&mut self, id: &str) {
        if !self.starred.remove(id) {
            self.starred.insert(id.to_string());
        }
    }

    pub fn is_starred(&self, id: &str) -> bool {
        self.starred.contains(id)
    }
}
