pub mod cli;
pub mod core;

use crate::core::plan::PlanConfig;
use crate::core::session::Session;
use crate::core::view::FilterState;
use crate::core::MacroCategory;
use anyhow::Result;
use std::path::Path;
use tracing::{debug, info};

pub enum AppCommand {
    Funds {
        category: Option<MacroCategory>,
        filter: FilterState,
    },
    Summary,
    Export,
}

pub fn run_command(command: AppCommand, plan_path: Option<&str>) -> Result<()> {
    let plan = match plan_path {
        Some(path) => PlanConfig::load_from_path(path)?,
        None => PlanConfig::load()?,
    };
    debug!("Loaded plan: {plan:#?}");

    let rows = core::loader::load_catalogue(Path::new(&plan.catalogue))?;
    let mut session = Session::new();
    session.ingest(rows);
    info!(funds = session.catalogue().len(), "Catalogue ingested");

    plan.apply(&mut session);

    match command {
        AppCommand::Funds { category, filter } => cli::funds::run(&mut session, category, filter),
        AppCommand::Summary => cli::summary::run(&session),
        AppCommand::Export => cli::export::run(&session),
    }
}
