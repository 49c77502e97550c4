//! The authoritative set of normalized fund records for a session.

use crate::core::category::{self, MacroCategory};
use crate::core::fields::{self, AumValue, Field};
use std::hash::{DefaultHasher, Hash, Hasher};
use tracing::debug;

/// One row as delivered by the CSV boundary: normalized column names paired
/// with raw string values, in source column order. Order matters: the
/// substring fallback in field resolution scans it front to back.
#[derive(Debug, Clone, Default)]
pub struct RawRecord {
    columns: Vec<(String, String)>,
}

impl RawRecord {
    pub fn from_pairs(columns: Vec<(String, String)>) -> Self {
        RawRecord { columns }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.columns
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }

    pub fn columns(&self) -> &[(String, String)] {
        &self.columns
    }

    pub fn resolve(&self, field: Field) -> Option<&str> {
        fields::resolve(&self.columns, field)
    }

    fn trimmed(&self) -> RawRecord {
        RawRecord {
            columns: self
                .columns
                .iter()
                .map(|(key, value)| (key.clone(), value.trim().to_string()))
                .collect(),
        }
    }
}

/// A normalized, classified catalogue entry.
#[derive(Debug, Clone)]
pub struct FundRecord {
    /// Stable identity within the catalogue: the ISIN when present, otherwise
    /// a deterministic surrogate. Two blank-identifier rows never merge.
    pub id: String,
    pub name: String,
    pub isin: String,
    pub ticker: Option<String>,
    pub category: Option<String>,
    pub benchmark_category: Option<String>,
    /// Raw decimal string, locale-ambiguous (comma or dot separator).
    pub expense_ratio: Option<String>,
    pub currency: Option<String>,
    pub assets_under_management: Option<String>,
    pub distribution: Option<String>,
    pub replication: Option<String>,
    pub macro_category: MacroCategory,
    /// Full trimmed row, kept for columns not otherwise modeled.
    pub raw: RawRecord,
}

impl FundRecord {
    /// TER as a number, or `None` when absent or unparseable.
    pub fn ter_value(&self) -> Option<f64> {
        self.expense_ratio.as_deref().and_then(fields::parse_decimal)
    }

    /// AuM after numeric coercion; unparseable values surface verbatim.
    pub fn aum(&self) -> Option<AumValue> {
        self.assets_under_management
            .as_deref()
            .map(fields::parse_aum)
    }

    /// AuM as a sort key. Missing or unparseable values rank lowest.
    pub fn aum_numeric(&self) -> f64 {
        match self.aum() {
            Some(AumValue::Amount(amount)) => amount,
            _ => 0.0,
        }
    }

    /// TER as a sort key. Missing or unparseable values rank as zero.
    pub fn ter_numeric(&self) -> f64 {
        self.ter_value().unwrap_or(0.0)
    }
}

/// Ordered, classified fund records for the current session. Rebuilt whole on
/// every ingestion; never mutated in place.
#[derive(Debug, Clone, Default)]
pub struct Catalogue {
    records: Vec<FundRecord>,
}

impl Catalogue {
    /// Builds a catalogue from raw rows. Rows without both a name and an
    /// identifier value are dropped silently, a permissive import policy
    /// where only the resulting total count is visible. All values are
    /// trimmed; identifiers that trim down to empty get a surrogate id.
    pub fn ingest(rows: Vec<RawRecord>) -> Catalogue {
        let total = rows.len();
        let mut records = Vec::new();

        for (row_index, row) in rows.into_iter().enumerate() {
            if row.resolve(Field::Name).is_none() || row.resolve(Field::Isin).is_none() {
                continue;
            }

            let raw = row.trimmed();
            let name = raw.resolve(Field::Name).unwrap_or_default().to_string();
            let isin = raw.resolve(Field::Isin).unwrap_or_default().to_string();
            let category = raw.resolve(Field::Category).map(str::to_string);
            let benchmark = raw.resolve(Field::BenchmarkCategory).map(str::to_string);

            let macro_category = category::classify(
                category.as_deref().unwrap_or(""),
                benchmark.as_deref().unwrap_or(""),
            );
            let id = if isin.is_empty() {
                surrogate_id(&name, row_index)
            } else {
                isin.clone()
            };

            records.push(FundRecord {
                id,
                name,
                isin,
                ticker: raw.resolve(Field::Ticker).map(str::to_string),
                category,
                benchmark_category: benchmark,
                expense_ratio: raw.resolve(Field::ExpenseRatio).map(str::to_string),
                currency: raw.resolve(Field::Currency).map(str::to_string),
                assets_under_management: raw.resolve(Field::Aum).map(str::to_string),
                distribution: raw.resolve(Field::Distribution).map(str::to_string),
                replication: raw.resolve(Field::Replication).map(str::to_string),
                macro_category,
                raw,
            });
        }

        debug!(
            kept = records.len(),
            dropped = total - records.len(),
            "Ingested catalogue"
        );
        Catalogue { records }
    }

    /// Full ordered sequence, insertion order = source row order.
    pub fn all(&self) -> &[FundRecord] {
        &self.records
    }

    /// Resolves a fund id back to its record. Callers treat a miss
    /// defensively: a dangling selection is skipped, never a crash.
    pub fn by_id(&self, id: &str) -> Option<&FundRecord> {
        self.records.iter().find(|record| record.id == id)
    }

    pub fn in_category(&self, category: MacroCategory) -> impl Iterator<Item = &FundRecord> {
        self.records
            .iter()
            .filter(move |record| record.macro_category == category)
    }

    pub fn category_count(&self, category: MacroCategory) -> usize {
        self.in_category(category).count()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

/// Deterministic surrogate key for rows whose identifier is blank, derived
/// from the trimmed name and source row index so fixtures reproduce.
fn surrogate_id(name: &str, row_index: usize) -> String {
    let mut hasher = DefaultHasher::new();
    name.hash(&mut hasher);
    row_index.hash(&mut hasher);
    format!("row{row_index}-{:08x}", hasher.finish() as u32)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> RawRecord {
        RawRecord::from_pairs(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    fn full_row(name: &str, isin: &str, category: &str) -> RawRecord {
        row(&[
            ("Nome", name),
            ("ISIN", isin),
            ("Ticker", "TKR"),
            ("Categoria", category),
            ("Categoria Morningstar", ""),
            ("TER", "0,20"),
            ("Valuta", "EUR"),
            ("AuM (Mln EUR)", "500"),
            ("Distribuzione", "Acc"),
            ("Replica", "Fisica"),
        ])
    }

    #[test]
    fn test_ingest_drops_rows_missing_name_or_identifier() {
        let catalogue = Catalogue::ingest(vec![
            full_row("Fund A", "IE000AAAA001", "Azionario"),
            row(&[("Nome", "No ISIN column")]),
            row(&[("ISIN", "IE000AAAA002")]),
            row(&[("Nome", ""), ("ISIN", "IE000AAAA003")]),
        ]);
        assert_eq!(catalogue.len(), 1);
        assert_eq!(catalogue.all()[0].name, "Fund A");
    }

    #[test]
    fn test_ingest_trims_values_and_classifies_once() {
        let catalogue = Catalogue::ingest(vec![full_row(
            "  Fund B  ",
            " IE000BBBB001 ",
            " Obbligazionario ",
        )]);
        let record = &catalogue.all()[0];
        assert_eq!(record.name, "Fund B");
        assert_eq!(record.isin, "IE000BBBB001");
        assert_eq!(record.id, "IE000BBBB001");
        assert_eq!(record.macro_category, MacroCategory::Bonds);
    }

    #[test]
    fn test_blank_identifiers_get_distinct_surrogate_ids() {
        // Whitespace-only ISINs pass the presence check but trim to empty.
        let catalogue = Catalogue::ingest(vec![
            full_row("Fund C", " ", "Azionario"),
            full_row("Fund C", " ", "Azionario"),
        ]);
        assert_eq!(catalogue.len(), 2);
        let ids: Vec<_> = catalogue.all().iter().map(|r| r.id.clone()).collect();
        assert_ne!(ids[0], ids[1], "blank-identifier rows must never merge");
        assert!(catalogue.by_id(&ids[0]).is_some());
        assert!(catalogue.by_id(&ids[1]).is_some());
    }

    #[test]
    fn test_surrogate_ids_are_deterministic() {
        assert_eq!(surrogate_id("Fund C", 3), surrogate_id("Fund C", 3));
        assert_ne!(surrogate_id("Fund C", 3), surrogate_id("Fund C", 4));
    }

    #[test]
    fn test_by_id_miss_is_none() {
        let catalogue = Catalogue::ingest(vec![full_row("Fund A", "IE000AAAA001", "Azionario")]);
        assert!(catalogue.by_id("IE000MISSING").is_none());
    }

    #[test]
    fn test_insertion_order_matches_source_rows() {
        let catalogue = Catalogue::ingest(vec![
            full_row("Second alphabetically", "IE000AAAA002", "Azionario"),
            full_row("First alphabetically", "IE000AAAA001", "Azionario"),
        ]);
        let names: Vec<_> = catalogue.all().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, vec!["Second alphabetically", "First alphabetically"]);
    }

    #[test]
    fn test_category_counts() {
        let catalogue = Catalogue::ingest(vec![
            full_row("A", "I1", "Azionario"),
            full_row("B", "I2", "Obbligazionario"),
            full_row("C", "I3", "Materie Prime"),
            full_row("D", "I4", "Senza categoria nota"),
        ]);
        assert_eq!(catalogue.category_count(MacroCategory::Bonds), 1);
        // The unclassifiable row falls back to equity.
        assert_eq!(catalogue.category_count(MacroCategory::Equity), 2);
        assert_eq!(catalogue.category_count(MacroCategory::Commodities), 1);
        assert_eq!(catalogue.category_count(MacroCategory::RealEstate), 0);
    }
}
