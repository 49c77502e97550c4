use super::ui;
use crate::core::session::Session;
use crate::core::{AllocationStatus, MacroCategory};
use anyhow::Result;
use comfy_table::Cell;

pub fn run(session: &Session) -> Result<()> {
    display_catalogue_info(session);
    display_allocation_table(session);
    display_portfolio_metrics(session);
    Ok(())
}

fn display_catalogue_info(session: &Session) {
    let catalogue = session.catalogue();
    println!(
        "\n{}: {} funds",
        ui::style_text("Catalogue", ui::StyleType::Title),
        catalogue.len()
    );
    let counts: Vec<String> = MacroCategory::ALL
        .iter()
        .map(|category| {
            format!(
                "{}: {}",
                category.display_name(),
                catalogue.category_count(*category)
            )
        })
        .collect();
    println!("{}", ui::style_text(&counts.join("  |  "), ui::StyleType::Subtle));
}

fn display_allocation_table(session: &Session) {
    let ledger = session.ledger();

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Allocation (%)"),
        ui::header_cell("Selected"),
        ui::header_cell("Weight Sum (%)"),
        ui::header_cell("Status"),
    ]);

    for category in MacroCategory::ALL {
        let allocation = ledger.allocation(category);
        if allocation < 1 {
            table.add_row(vec![
                Cell::new(category.display_name()),
                Cell::new("0"),
                Cell::new(ui::style_text("inactive", ui::StyleType::Subtle)),
                Cell::new(""),
                Cell::new(""),
            ]);
            continue;
        }
        table.add_row(vec![
            Cell::new(category.display_name()),
            Cell::new(allocation.to_string()),
            Cell::new(ledger.selected(category).len().to_string()),
            Cell::new(ledger.category_weight_sum(category).to_string()),
            ui::completeness_cell(ledger.is_category_complete(category)),
        ]);
    }

    println!("\n{table}");
}

fn display_portfolio_metrics(session: &Session) {
    let metrics = session.metrics();

    let status = match metrics.allocation_status() {
        AllocationStatus::Perfect => ui::style_text("perfect", ui::StyleType::TotalValue),
        AllocationStatus::Under => ui::style_text("under target", ui::StyleType::Warning),
        AllocationStatus::Over => ui::style_text("over target", ui::StyleType::Error),
    };

    println!(
        "\nTotal allocation: {}% ({status})",
        ui::style_text(&metrics.total_allocation().to_string(), ui::StyleType::TotalLabel)
    );
    println!(
        "Coverage: {}%  |  Selected funds: {}  |  Weighted TER: {}%",
        metrics.portfolio_coverage(),
        metrics.selected_fund_count(),
        format!("{:.4}", metrics.weighted_expense_ratio())
    );

    if metrics.is_portfolio_complete() {
        println!(
            "\n{}",
            ui::style_text("Portfolio is complete and ready to export.", ui::StyleType::TotalValue)
        );
    } else {
        println!(
            "\n{}",
            ui::style_text(
                "Portfolio is not complete yet: every active category must sum to 100% and the total allocation must reach 100%.",
                ui::StyleType::Warning
            )
        );
    }
}
