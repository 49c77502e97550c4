use super::ui;
use crate::core::session::Session;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

pub fn run(session: &Session) -> Result<()> {
    let metrics = session.metrics();
    let view = session.export();

    println!(
        "\n{}\n",
        ui::style_text("Portfolio Export", ui::StyleType::Title)
    );

    if view.rows.is_empty() {
        println!("No funds with weight in any active category yet.");
        return Ok(());
    }

    // Component table
    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell("Category"),
        ui::header_cell("Name"),
        ui::header_cell("ISIN"),
        ui::header_cell("Ticker"),
        ui::header_cell("TER (%)"),
        ui::header_cell("Portfolio (%)"),
    ]);
    for row in &view.rows {
        table.add_row(vec![
            Cell::new(row.category.display_name()),
            Cell::new(&row.record.name),
            Cell::new(&row.record.isin),
            ui::format_optional_cell(row.record.ticker.clone(), |t| t),
            ui::format_optional_cell(row.record.ter_value(), |v| format!("{v:.2}")),
            ui::format_percentage_cell(row.effective_weight, |w| format!("{w:.2}")),
        ]);
    }
    println!("{table}");

    // Cost analysis
    println!(
        "\nWeighted TER: {}%  (annual cost of holding the portfolio)",
        ui::style_text(
            &format!("{:.4}", view.weighted_expense_ratio),
            ui::StyleType::TotalValue
        )
    );
    let mut cost_table = ui::new_styled_table();
    cost_table.set_header(vec![
        ui::header_cell("Invested"),
        ui::header_cell("Annual Cost"),
    ]);
    for cost in &view.costs {
        cost_table.add_row(vec![
            Cell::new(format!("{:.0}", cost.amount)).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", cost.annual_cost)).set_alignment(CellAlignment::Right),
        ]);
    }
    println!("{cost_table}");

    // ISIN list for copy-out
    let isin_list = view.isin_list();
    if !isin_list.is_empty() {
        println!(
            "\n{}",
            ui::style_text("ISIN list:", ui::StyleType::TotalLabel)
        );
        println!("{isin_list}");
    }

    if !metrics.is_portfolio_complete() {
        println!(
            "\n{}",
            ui::style_text(
                "Note: the allocation is not complete. Bring coverage and total allocation to 100% before using this export.",
                ui::StyleType::Warning
            )
        );
    }

    Ok(())
}
