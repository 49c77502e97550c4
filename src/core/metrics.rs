//! Pure portfolio-wide derivations over catalogue and ledger state.
//!
//! Everything here is recomputed on demand from current state; nothing is
//! cached as authoritative.

use crate::core::catalogue::Catalogue;
use crate::core::category::MacroCategory;
use crate::core::ledger::AllocationLedger;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AllocationStatus {
    Perfect,
    Under,
    Over,
}

/// Categories below this allocation are inactive: their selections count for
/// nothing in the aggregates.
const ACTIVE_THRESHOLD: u8 = 1;

pub struct Metrics<'a> {
    catalogue: &'a Catalogue,
    ledger: &'a AllocationLedger,
}

impl<'a> Metrics<'a> {
    pub fn new(catalogue: &'a Catalogue, ledger: &'a AllocationLedger) -> Self {
        Metrics { catalogue, ledger }
    }

    /// Sum of all category allocations. May exceed or fall short of 100;
    /// a distinct concept from per-category completeness.
    pub fn total_allocation(&self) -> u32 {
        self.ledger.total_allocation()
    }

    pub fn allocation_status(&self) -> AllocationStatus {
        match self.total_allocation() {
            100 => AllocationStatus::Perfect,
            total if total < 100 => AllocationStatus::Under,
            _ => AllocationStatus::Over,
        }
    }

    /// Weighted average expense ratio over every active category's selected
    /// funds with weight > 0. A fund whose TER is unresolvable contributes 0
    /// to the numerator but stays in the denominator; this is the one place
    /// "not available" collapses to zero.
    pub fn weighted_expense_ratio(&self) -> f64 {
        let mut total_weight = 0.0;
        let mut weighted_ter = 0.0;

        for category in MacroCategory::ALL {
            let allocation = self.ledger.allocation(category);
            if allocation < ACTIVE_THRESHOLD {
                continue;
            }
            let category_allocation = f64::from(allocation) / 100.0;

            for fund in self.ledger.selected(category) {
                if fund.weight == 0 {
                    continue;
                }
                // Dangling selection: skipped, never a crash.
                let Some(record) = self.catalogue.by_id(&fund.id) else {
                    continue;
                };
                let effective_weight = f64::from(fund.weight) / 100.0 * category_allocation;
                let ter = record.ter_value().unwrap_or(0.0);
                total_weight += effective_weight;
                weighted_ter += effective_weight * ter;
            }
        }

        if total_weight > 0.0 {
            weighted_ter / total_weight
        } else {
            0.0
        }
    }

    /// Selected funds across active categories, weight-0 entries included.
    pub fn selected_fund_count(&self) -> usize {
        MacroCategory::ALL
            .iter()
            .filter(|category| self.ledger.allocation(**category) >= ACTIVE_THRESHOLD)
            .map(|category| self.ledger.selected(*category).len())
            .sum()
    }

    /// Portion of the target allocation backed by a fully weight-reconciled
    /// category. An active but incomplete category contributes 0, not its
    /// partial weight.
    pub fn portfolio_coverage(&self) -> u32 {
        MacroCategory::ALL
            .iter()
            .filter(|category| {
                self.ledger.allocation(**category) >= ACTIVE_THRESHOLD
                    && self.ledger.is_category_complete(**category)
            })
            .map(|category| u32::from(self.ledger.allocation(*category)))
            .sum()
    }

    pub fn is_portfolio_complete(&self) -> bool {
        self.portfolio_coverage() == 100
            && self.selected_fund_count() > 0
            && self.total_allocation() == 100
    }
}
