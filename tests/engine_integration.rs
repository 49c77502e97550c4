use std::fs;
use tracing::info;

mod test_utils {
    use std::path::{Path, PathBuf};

    pub const CATALOGUE_CSV: &str = "\
Nome;ISIN;Ticker;Categoria;Categoria Morningstar;TER;Valuta;AuM (Mln EUR);Distribuzione;Replica
Global Aggregate Bond;IE000BOND0001;AGGH;Obbligazionario Globale;Global Bond;0,10;EUR;4500;Acc;Fisica
World Equity Core;IE000EQTY0001;SWDA;Azionario Globale;Global Large-Cap Blend Equity;0,20;EUR;55000;Acc;Fisica
Emerging Markets Equity;IE000EQTY0002;EIMI;Azionario Emergenti;Global Emerging Markets Equity;0,18;USD;16000;Acc;Campionamento
Broad Commodities;IE000COMM0001;CMOD;Materie Prime;Commodity - Broad Basket;0,19;USD;1200;Acc;Sintetica
European Property;IE000PROP0001;IPRP;Immobiliare Europa;Property - Indirect Europe;0,40;EUR;800;Dist;Fisica
";

    pub fn write_catalogue(dir: &Path) -> PathBuf {
        let path = dir.join("etfs.csv");
        std::fs::write(&path, CATALOGUE_CSV).expect("Failed to write catalogue CSV");
        path
    }
}

#[test_log::test]
fn test_summary_command_with_complete_plan() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let catalogue_path = test_utils::write_catalogue(dir.path());

    let plan_path = dir.path().join("plan.yaml");
    let plan_content = format!(
        r#"
catalogue: "{}"
allocations:
  bonds: 60
  equity: 40
selections:
  bonds:
    - id: "IE000BOND0001"
      weight: 100
  equity:
    - id: "IE000EQTY0001"
      weight: 50
    - id: "IE000EQTY0002"
      weight: 50
starred:
  - "IE000EQTY0001"
"#,
        catalogue_path.display()
    );
    fs::write(&plan_path, &plan_content).expect("Failed to write plan file");

    info!("Running summary against complete plan");
    let result = etfolio::run_command(
        etfolio::AppCommand::Summary,
        Some(plan_path.to_str().unwrap()),
    );
    assert!(
        result.is_ok(),
        "Summary command failed with: {:?}",
        result.err()
    );
}

#[test_log::test]
fn test_export_command_with_partial_plan() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let catalogue_path = test_utils::write_catalogue(dir.path());

    let plan_path = dir.path().join("plan.yaml");
    let plan_content = format!(
        r#"
catalogue: "{}"
allocations:
  bonds: 70
selections:
  bonds:
    - id: "IE000BOND0001"
      weight: 40
"#,
        catalogue_path.display()
    );
    fs::write(&plan_path, &plan_content).expect("Failed to write plan file");

    let result = etfolio::run_command(
        etfolio::AppCommand::Export,
        Some(plan_path.to_str().unwrap()),
    );
    assert!(
        result.is_ok(),
        "Export command failed with: {:?}",
        result.err()
    );
}

#[test_log::test]
fn test_funds_command_with_filters() {
    use etfolio::core::view::{DistributionFilter, FilterState, SortKey};

    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let catalogue_path = test_utils::write_catalogue(dir.path());

    let plan_path = dir.path().join("plan.yaml");
    fs::write(
        &plan_path,
        format!("catalogue: \"{}\"\n", catalogue_path.display()),
    )
    .expect("Failed to write plan file");

    let result = etfolio::run_command(
        etfolio::AppCommand::Funds {
            category: Some(etfolio::core::MacroCategory::Equity),
            filter: FilterState {
                distribution: DistributionFilter::Accumulating,
                replication: Some("Fisica".to_string()),
                currency: Some("EUR".to_string()),
                sort_by: SortKey::Ter,
            },
        },
        Some(plan_path.to_str().unwrap()),
    );
    assert!(
        result.is_ok(),
        "Funds command failed with: {:?}",
        result.err()
    );
}

#[test_log::test]
fn test_missing_plan_file_is_an_error() {
    let result = etfolio::run_command(etfolio::AppCommand::Summary, Some("/nonexistent/plan.yaml"));
    assert!(result.is_err());
}

#[test_log::test]
fn test_missing_catalogue_file_is_an_error() {
    let dir = tempfile::tempdir().expect("Failed to create temp dir");
    let plan_path = dir.path().join("plan.yaml");
    fs::write(&plan_path, "catalogue: \"/nonexistent/etfs.csv\"\n")
        .expect("Failed to write plan file");

    let result = etfolio::run_command(
        etfolio::AppCommand::Summary,
        Some(plan_path.to_str().unwrap()),
    );
    assert!(result.is_err());
}

// Drives the engine end to end through library types, the same way the CLI
// commands do, and checks the derived numbers.
#[test_log::test]
fn test_end_to_end_session_pipeline() {
    use etfolio::core::{loader, MacroCategory, Session};

    let rows = loader::parse_catalogue(test_utils::CATALOGUE_CSV).expect("Failed to parse CSV");
    let mut session = Session::new();
    session.ingest(rows);

    assert_eq!(session.catalogue().len(), 5);
    assert_eq!(session.catalogue().category_count(MacroCategory::Bonds), 1);
    assert_eq!(session.catalogue().category_count(MacroCategory::Equity), 2);
    assert_eq!(
        session.catalogue().category_count(MacroCategory::Commodities),
        1
    );
    assert_eq!(
        session.catalogue().category_count(MacroCategory::RealEstate),
        1
    );

    let ledger = session.ledger_mut();
    ledger.set_allocation(MacroCategory::Bonds, 60);
    ledger.set_allocation(MacroCategory::Equity, 40);
    ledger.set_weight(MacroCategory::Bonds, "IE000BOND0001", 100);
    ledger.set_weight(MacroCategory::Equity, "IE000EQTY0001", 50);
    ledger.set_weight(MacroCategory::Equity, "IE000EQTY0002", 50);

    let metrics = session.metrics();
    assert_eq!(metrics.total_allocation(), 100);
    assert_eq!(metrics.portfolio_coverage(), 100);
    assert_eq!(metrics.selected_fund_count(), 3);
    assert!(metrics.is_portfolio_complete());

    // (0.6*0.10 + 0.2*0.20 + 0.2*0.18) / 1.0 = 0.136
    assert_eq!(format!("{:.4}", metrics.weighted_expense_ratio()), "0.1360");

    let view = session.export();
    assert_eq!(view.rows.len(), 3);
    assert_eq!(
        view.isin_list(),
        "IE000BOND0001\nIE000EQTY0001\nIE000EQTY0002"
    );
    assert_eq!(format!("{:.2}", view.costs[0].annual_cost), "13.60");
}
