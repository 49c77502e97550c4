use super::ui;
use crate::core::fields::AumValue;
use crate::core::session::Session;
use crate::core::view::FilterState;
use crate::core::MacroCategory;
use anyhow::Result;
use comfy_table::{Cell, CellAlignment};

pub fn run(
    session: &mut Session,
    category: Option<MacroCategory>,
    filter: FilterState,
) -> Result<()> {
    if session.catalogue().is_empty() {
        println!("The catalogue is empty. Check the CSV referenced by the plan file.");
        return Ok(());
    }

    let categories: Vec<MacroCategory> = match category {
        Some(category) => vec![category],
        None => MacroCategory::ALL.to_vec(),
    };

    for category in &categories {
        *session.filters_mut().get_mut(*category) = filter.clone();
    }

    for (i, category) in categories.iter().enumerate() {
        display_category(session, *category);
        if i < categories.len() - 1 {
            ui::print_separator();
        }
    }

    Ok(())
}

fn display_category(session: &Session, category: MacroCategory) {
    let total = session.catalogue().category_count(category);
    let records = session.view(category);
    let filter = session.filters().get(category);

    // "12 of 30" only when filters actually hide funds.
    let count_label = if filter.is_filtering() && records.len() != total {
        format!("{} of {} funds", records.len(), total)
    } else {
        format!("{} funds", records.len())
    };

    let allocation = session.ledger().allocation(category);
    println!(
        "\n{} ({count_label}, {allocation}% allocated)\n",
        ui::style_text(category.display_name(), ui::StyleType::Title)
    );

    if records.is_empty() {
        println!("No funds match the selected filters.");
        return;
    }

    let mut table = ui::new_styled_table();
    table.set_header(vec![
        ui::header_cell(""),
        ui::header_cell("Name"),
        ui::header_cell("ISIN"),
        ui::header_cell("Ticker"),
        ui::header_cell("TER (%)"),
        ui::header_cell("AuM (M)"),
        ui::header_cell("Dist"),
        ui::header_cell("Curr"),
        ui::header_cell("Weight (%)"),
    ]);

    for record in records {
        let ledger = session.ledger();
        let marker = if ledger.is_starred(&record.id) { "★" } else { "" };

        let aum_cell = match record.aum() {
            Some(AumValue::Amount(amount)) => {
                Cell::new(format!("{amount:.0}")).set_alignment(CellAlignment::Right)
            }
            // Present but unparseable: show the original value verbatim.
            Some(AumValue::Raw(raw)) => Cell::new(raw).set_alignment(CellAlignment::Right),
            None => ui::format_optional_cell(None::<f64>, |_| String::new()),
        };

        let weight_cell = match ledger.weight(category, &record.id) {
            Some(weight) => ui::format_percentage_cell(f64::from(weight), |w| format!("{w:.0}")),
            None => Cell::new("").set_alignment(CellAlignment::Right),
        };

        table.add_row(vec![
            Cell::new(marker),
            Cell::new(&record.name),
            Cell::new(ui::style_text(&record.isin, ui::StyleType::Subtle)),
            ui::format_optional_cell(record.ticker.clone(), |t| t),
            ui::format_optional_cell(record.ter_value(), |v| format!("{v:.2}")),
            aum_cell,
            ui::format_optional_cell(record.distribution.clone(), |d| d),
            ui::format_optional_cell(record.currency.clone(), |c| c),
            weight_cell,
        ]);
    }

    println!("{table}");
}
