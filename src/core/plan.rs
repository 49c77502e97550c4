//! The portfolio plan file: which catalogue to load, category allocations,
//! fund selections with weights, and starred funds.

use crate::core::category::MacroCategory;
use crate::core::session::Session;
use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlanFund {
    pub id: String,
    #[serde(default)]
    pub weight: i64,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct PlanConfig {
    /// Path to the CSV catalogue to ingest.
    pub catalogue: String,
    #[serde(default)]
    pub allocations: HashMap<MacroCategory, i64>,
    #[serde(default)]
    pub selections: HashMap<MacroCategory, Vec<PlanFund>>,
    #[serde(default)]
    pub starred: Vec<String>,
}

impl PlanConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default plan");
        let plan_path = Self::default_plan_path()?;
        Self::load_from_path(&plan_path)
    }

    pub fn default_plan_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("dev", "etfolio", "etfolio")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("plan.yaml"))
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let plan_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read plan file: {}", path.as_ref().display()))?;

        let plan: Self = serde_yaml::from_str(&plan_str)
            .with_context(|| format!("Failed to parse plan file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded plan");
        Ok(plan)
    }

    /// Replays the plan into the session ledger through the ordinary
    /// mutation calls, so clamping and the zero-allocation clearing rule
    /// apply exactly as they would interactively. Allocations go first:
    /// selections listed under a category keep their file order.
    pub fn apply(&self, session: &mut Session) {
        let ledger = session.ledger_mut();
        for (category, value) in &self.allocations {
            ledger.set_allocation(*category, *value);
        }
        for (category, funds) in &self.selections {
            for fund in funds {
                ledger.set_weight(*category, &fund.id, fund.weight);
            }
        }
        for id in &self.starred {
            if !ledger.is_starred(id) {
                ledger.toggle_star(id);
            }
        }
    }
}

/// Starter plan written by `setup`.
pub const STARTER_PLAN: &str = r#"---
# Path to the ETF catalogue CSV (Nome, ISIN, Ticker, Categoria,
# Categoria Morningstar, TER, Valuta, AuM (Mln EUR), Distribuzione, Replica)
catalogue: "etfs.csv"

# Target percentage per macro category; drives toward a total of 100.
allocations:
  bonds: 0
  equity: 0
  commodities: 0
  real_estate: 0

# Selected funds per category, weighted within the category.
selections: {}

# Fund ids to mark with a star in listings.
starred: []
"#;
