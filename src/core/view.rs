//! Read-side projection of the catalogue: per-category filters and sorting.
//!
//! Purely a view parameter set; never touches allocation state.

use crate::core::catalogue::{Catalogue, FundRecord};
use crate::core::category::MacroCategory;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DistributionFilter {
    #[default]
    All,
    Accumulating,
    Distributing,
}

impl DistributionFilter {
    /// A record passes when its distribution policy matches either the short
    /// or the long form of the requested token. Records without a policy
    /// fail any non-`All` filter.
    fn passes(&self, policy: Option<&str>) -> bool {
        match self {
            DistributionFilter::All => true,
            DistributionFilter::Accumulating => {
                matches!(policy, Some("Acc") | Some("Accumulazione"))
            }
            DistributionFilter::Distributing => {
                matches!(policy, Some("Dist") | Some("Distribuzione"))
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Descending by fund size; unresolvable AuM sorts last.
    #[default]
    Aum,
    /// Ascending by expense ratio.
    Ter,
    /// Lexicographic ascending by name.
    Name,
}

/// Per-category view parameters.
#[derive(Debug, Clone, Default)]
pub struct FilterState {
    pub distribution: DistributionFilter,
    /// `None` = all; otherwise exact string equality (e.g. `Fisica`).
    pub replication: Option<String>,
    /// `None` = all; otherwise exact string equality (e.g. `EUR`).
    pub currency: Option<String>,
    pub sort_by: SortKey,
}

impl FilterState {
    pub fn is_filtering(&self) -> bool {
        self.distribution != DistributionFilter::All
            || self.replication.is_some()
            || self.currency.is_some()
    }

    fn passes(&self, record: &FundRecord) -> bool {
        if !self.distribution.passes(record.distribution.as_deref()) {
            return false;
        }
        if let Some(want) = self.replication.as_deref()
            && record.replication.as_deref() != Some(want)
        {
            return false;
        }
        if let Some(want) = self.currency.as_deref()
            && record.currency.as_deref() != Some(want)
        {
            return false;
        }
        true
    }
}

/// One `FilterState` per macro category, the whole set replaced on ingest.
#[derive(Debug, Clone, Default)]
pub struct FilterSet {
    states: [FilterState; 4],
}

impl FilterSet {
    pub fn get(&self, category: MacroCategory) -> &FilterState {
        &self.states[category.index()]
    }

    pub fn get_mut(&mut self, category: MacroCategory) -> &mut FilterState {
        &mut self.states[category.index()]
    }
}

/// Filters and sorts one category's slice of the catalogue. Sorting is
/// stable: ties keep the filtered (source) order.
pub fn category_view<'a>(
    catalogue: &'a Catalogue,
    category: MacroCategory,
    filter: &FilterState,
) -> Vec<&'a FundRecord> {
    let mut records: Vec<&FundRecord> = catalogue
        .in_category(category)
        .filter(|record| filter.passes(record))
        .collect();

    match filter.sort_by {
        SortKey::Aum => {
            records.sort_by(|a, b| b.aum_numeric().total_cmp(&a.aum_numeric()));
        }
        SortKey::Ter => {
            records.sort_by(|a, b| a.ter_numeric().total_cmp(&b.ter_numeric()));
        }
        SortKey::Name => {
            records.sort_by(|a, b| a.name.cmp(&b.name));
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::catalogue::RawRecord;

    fn fund(name: &str, isin: &str, extra: &[(&str, &str)]) -> RawRecord {
        let mut pairs = vec![
            ("Nome".to_string(), name.to_string()),
            ("ISIN".to_string(), isin.to_string()),
            ("Categoria".to_string(), "Azionario".to_string()),
        ];
        for (k, v) in extra {
            pairs.push((k.to_string(), v.to_string()));
        }
        RawRecord::from_pairs(pairs)
    }

    fn names(records: &[&FundRecord]) -> Vec<String> {
        records.iter().map(|r| r.name.clone()).collect()
    }

    #[test]
    fn test_distribution_filter_matches_short_and_long_forms() {
        let catalogue = Catalogue::ingest(vec![
            fund("Short", "I1", &[("Distribuzione", "Acc")]),
            fund("Long", "I2", &[("Distribuzione", "Accumulazione")]),
            fund("Dist", "I3", &[("Distribuzione", "Dist")]),
            fund("NoPolicy", "I4", &[]),
        ]);
        let filter = FilterState {
            distribution: DistributionFilter::Accumulating,
            sort_by: SortKey::Name,
            ..Default::default()
        };
        let view = category_view(&catalogue, MacroCategory::Equity, &filter);
        assert_eq!(names(&view), vec!["Long", "Short"]);
    }

    #[test]
    fn test_replication_and_currency_are_exact_matches() {
        let catalogue = Catalogue::ingest(vec![
            fund("Phys", "I1", &[("Replica", "Fisica"), ("Valuta", "EUR")]),
            fund("Synth", "I2", &[("Replica", "Sintetica"), ("Valuta", "EUR")]),
            fund("Usd", "I3", &[("Replica", "Fisica"), ("Valuta", "USD")]),
            fund("Bare", "I4", &[]),
        ]);
        let filter = FilterState {
            replication: Some("Fisica".to_string()),
            currency: Some("EUR".to_string()),
            sort_by: SortKey::Name,
            ..Default::default()
        };
        let view = category_view(&catalogue, MacroCategory::Equity, &filter);
        assert_eq!(names(&view), vec!["Phys"]);
    }

    #[test]
    fn test_sort_by_aum_descending_with_unresolvable_as_zero() {
        let catalogue = Catalogue::ingest(vec![
            fund("Small", "I1", &[("AuM (Mln EUR)", "100")]),
            fund("NoAum", "I2", &[]),
            fund("Big", "I3", &[("AuM (Mln EUR)", "2500,5")]),
            fund("Garbled", "I4", &[("AuM (Mln EUR)", "n.d.")]),
        ]);
        let view = category_view(&catalogue, MacroCategory::Equity, &FilterState::default());
        // Unresolvable values sort as 0, tied, in source order.
        assert_eq!(names(&view), vec!["Big", "Small", "NoAum", "Garbled"]);
    }

    #[test]
    fn test_sort_by_ter_ascending_is_stable_under_ties() {
        let catalogue = Catalogue::ingest(vec![
            fund("B-tied", "I1", &[("TER", "0,20")]),
            fund("A-tied", "I2", &[("TER", "0.20")]),
            fund("Cheap", "I3", &[("TER", "0,05")]),
        ]);
        let filter = FilterState {
            sort_by: SortKey::Ter,
            ..Default::default()
        };
        let view = category_view(&catalogue, MacroCategory::Equity, &filter);
        assert_eq!(names(&view), vec!["Cheap", "B-tied", "A-tied"]);
    }

    #[test]
    fn test_sort_by_name_is_total_lexicographic() {
        let catalogue = Catalogue::ingest(vec![
            fund("Gamma", "I1", &[]),
            fund("Alpha", "I2", &[]),
            fund("Beta", "I3", &[]),
        ]);
        let filter = FilterState {
            sort_by: SortKey::Name,
            ..Default::default()
        };
        let view = category_view(&catalogue, MacroCategory::Equity, &filter);
        assert_eq!(names(&view), vec!["Alpha", "Beta", "Gamma"]);
    }

    #[test]
    fn test_view_never_crosses_categories() {
        let catalogue = Catalogue::ingest(vec![
            fund("EquityFund", "I1", &[]),
            RawRecord::from_pairs(vec![
                ("Nome".to_string(), "BondFund".to_string()),
                ("ISIN".to_string(), "I2".to_string()),
                ("Categoria".to_string(), "Obbligazionario".to_string()),
            ]),
        ]);
        let view = category_view(&catalogue, MacroCategory::Bonds, &FilterState::default());
        assert_eq!(names(&view), vec!["BondFund"]);
    }
}
