//! Flattened reporting view of a reconciled allocation.

use crate::core::catalogue::{Catalogue, FundRecord};
use crate::core::category::MacroCategory;
use crate::core::ledger::AllocationLedger;
use crate::core::metrics::Metrics;

/// Fixed reference amounts for the annual-cost projection, in currency units.
pub const REFERENCE_AMOUNTS: [f64; 3] = [10_000.0, 50_000.0, 100_000.0];

/// One selected fund in the export table. `effective_weight` is the fund's
/// share of the whole portfolio, already on the 0–100 scale.
#[derive(Debug, Clone)]
pub struct ExportRow<'a> {
    pub category: MacroCategory,
    pub record: &'a FundRecord,
    pub effective_weight: f64,
}

#[derive(Debug, Clone, Copy)]
pub struct CostProjection {
    pub amount: f64,
    pub annual_cost: f64,
}

#[derive(Debug, Clone)]
pub struct ExportView<'a> {
    pub rows: Vec<ExportRow<'a>>,
    pub weighted_expense_ratio: f64,
    pub costs: [CostProjection; 3],
}

impl ExportView<'_> {
    /// Identifier codes of all export rows, newline-joined, in row order.
    /// Rows whose record carries no ISIN (surrogate ids) are left out.
    pub fn isin_list(&self) -> String {
        self.rows
            .iter()
            .map(|row| row.record.isin.as_str())
            .filter(|isin| !isin.is_empty())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Projects the current allocation into the denormalized export view: one
/// row per selected, weight-bearing fund in an active category, in canonical
/// category order then selection order.
pub fn project<'a>(catalogue: &'a Catalogue, ledger: &'a AllocationLedger) -> ExportView<'a> {
    let mut rows = Vec::new();

    for category in MacroCategory::ALL {
        let allocation = ledger.allocation(category);
        if allocation < 1 {
            continue;
        }
        for fund in ledger.selected(category) {
            if fund.weight == 0 {
                continue;
            }
            let Some(record) = catalogue.by_id(&fund.id) else {
                continue;
            };
            rows.push(ExportRow {
                category,
                record,
                effective_weight: f64::from(fund.weight) / 100.0 * f64::from(allocation),
            });
        }
    }

    let weighted_expense_ratio = Metrics::new(catalogue, ledger).weighted_expense_ratio();
    let costs = REFERENCE_AMOUNTS.map(|amount| CostProjection {
        amount,
        annual_cost: amount * weighted_expense_ratio / 100.0,
    });

    ExportView {
        rows,
        weighted_expense_ratio,
        costs,
    }
}
