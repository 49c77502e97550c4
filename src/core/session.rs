//! Process-wide session state: catalogue, ledger, and view filters held in
//! one explicit object. Ingestion performs a single whole-object replacement
//! so no partial-reset state is ever observable.

use crate::core::catalogue::{Catalogue, FundRecord, RawRecord};
use crate::core::category::MacroCategory;
use crate::core::export::{self, ExportView};
use crate::core::ledger::AllocationLedger;
use crate::core::metrics::Metrics;
use crate::core::view::{self, FilterSet};
use tracing::debug;

#[derive(Debug, Clone, Default)]
pub struct Session {
    catalogue: Catalogue,
    ledger: AllocationLedger,
    filters: FilterSet,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the whole session with a fresh one built from `rows`.
    /// Selections, allocations, filters, and stars from the previous
    /// catalogue are all discarded together.
    pub fn ingest(&mut self, rows: Vec<RawRecord>) {
        *self = Session {
            catalogue: Catalogue::ingest(rows),
            ledger: AllocationLedger::new(),
            filters: FilterSet::default(),
        };
        debug!(funds = self.catalogue.len(), "Session reset with new catalogue");
    }

    pub fn catalogue(&self) -> &Catalogue {
        &self.catalogue
    }

    pub fn ledger(&self) -> &AllocationLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut AllocationLedger {
        &mut self.ledger
    }

    pub fn filters(&self) -> &FilterSet {
        &self.filters
    }

    pub fn filters_mut(&mut self) -> &mut FilterSet {
        &mut self.filters
    }

    /// The filtered, sorted records shown for one category.
    pub fn view(&self, category: MacroCategory) -> Vec<&FundRecord> {
        view::category_view(&self.catalogue, category, self.filters.get(category))
    }

    pub fn metrics(&self) -> Metrics<'_> {
        Metrics::new(&self.catalogue, &self.ledger)
    }

    pub fn export(&self) -> ExportView<'_> {
        export::project(&self.catalogue, &self.ledger)
    }
}
