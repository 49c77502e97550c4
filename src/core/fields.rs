//! Semantic field resolution over raw catalogue columns.
//!
//! Uploaded catalogues spell the same column many ways (`AuM (Mln EUR)`,
//! `AuM(Mln EUR)`, `aum`, ...). Resolution is two-phase: an ordered list of
//! known exact spellings is tried first, then a case-insensitive substring
//! scan over all column names in the record's natural order. A field that
//! matches nothing is `None`, distinct from "present but unparseable".

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Isin,
    Ticker,
    Category,
    BenchmarkCategory,
    ExpenseRatio,
    Currency,
    Aum,
    Distribution,
    Replication,
}

impl Field {
    /// Known exact column spellings, in priority order. The first present,
    /// non-empty value wins.
    fn exact_names(&self) -> &'static [&'static str] {
        match self {
            Field::Name => &["Nome", "Name"],
            Field::Isin => &["ISIN", "Isin"],
            Field::Ticker => &["Ticker", "Symbol"],
            Field::Category => &["Categoria", "Category"],
            Field::BenchmarkCategory => &["Categoria Morningstar", "Morningstar Category"],
            Field::ExpenseRatio => &["TER", "Ter", "TER (%)"],
            Field::Currency => &["Valuta", "Currency"],
            Field::Aum => &[
                "AuM (Mln EUR)",
                "AuM\u{a0}(Mln\u{a0}EUR)",
                "AuM(Mln EUR)",
                "AUM (MLN EUR)",
                "AuM",
                "AUM",
                "Assets under Management",
                "AuM (Mln €)",
                "AuM Mln EUR",
                "AuM Mln €",
                "aum",
                "Aum",
            ],
            Field::Distribution => &["Distribuzione", "Distribution"],
            Field::Replication => &["Replica", "Replication"],
        }
    }

    /// Substring fallback against a lowercased column name.
    fn matches_column(&self, key: &str) -> bool {
        match self {
            Field::Name => key.contains("nome") || key.contains("name"),
            Field::Isin => key.contains("isin"),
            Field::Ticker => key.contains("ticker"),
            Field::Category => key.contains("categoria") || key.contains("category"),
            Field::BenchmarkCategory => key.contains("morningstar"),
            Field::ExpenseRatio => key.contains("ter") || key.contains("expense"),
            Field::Currency => key.contains("valuta") || key.contains("currency"),
            Field::Aum => {
                key.contains("aum")
                    || key.contains("assets")
                    || (key.contains("mln") && key.contains("eur"))
            }
            Field::Distribution => key.contains("distribuzione") || key.contains("distribution"),
            Field::Replication => key.contains("replica"),
        }
    }
}

/// Returns the best-matching value for `field` from an ordered column list,
/// or `None` when nothing matches. Exact spellings are tried case-sensitive
/// and whitespace-preserved before the fallback scan runs.
pub fn resolve<'a>(columns: &'a [(String, String)], field: Field) -> Option<&'a str> {
    for name in field.exact_names() {
        if let Some((_, value)) = columns.iter().find(|(key, _)| key == name)
            && !value.is_empty()
        {
            return Some(value);
        }
    }

    for (key, value) in columns {
        if field.matches_column(&key.to_lowercase()) && !value.is_empty() {
            return Some(value);
        }
    }

    None
}

/// A resolved AuM value. Values that survive numeric coercion become
/// `Amount`; anything else is surfaced verbatim rather than hidden.
#[derive(Debug, Clone, PartialEq)]
pub enum AumValue {
    Amount(f64),
    Raw(String),
}

/// Coerces an AuM string to a number: strip everything that is not a digit,
/// comma, dot, or minus; convert the decimal comma; parse.
pub fn parse_aum(raw: &str) -> AumValue {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || matches!(c, '.' | ',' | '-'))
        .collect();
    match cleaned.replace(',', ".").parse::<f64>() {
        Ok(amount) => AumValue::Amount(amount),
        Err(_) => AumValue::Raw(raw.to_string()),
    }
}

/// Coerces a percentage-like string (TER) to a number. Parse failure is
/// "not available", never zero; zero and not-available stay distinguishable
/// until aggregate cost math deliberately collapses them.
pub fn parse_decimal(raw: &str) -> Option<f64> {
    raw.replace(',', ".").parse::<f64>().ok()
}
