//! The portfolio allocation and reconciliation engine.

pub mod catalogue;
pub mod category;
pub mod export;
pub mod fields;
pub mod ledger;
pub mod loader;
pub mod log;
pub mod metrics;
pub mod plan;
pub mod session;
pub mod view;

// Re-export main types for cleaner imports
pub use catalogue::{Catalogue, FundRecord, RawRecord};
pub use category::MacroCategory;
pub use ledger::AllocationLedger;
pub use metrics::{AllocationStatus, Metrics};
pub use session::Session;
pub use view::{DistributionFilter, FilterState, SortKey};
