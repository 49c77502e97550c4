//! Presentation layer: renders engine state as terminal tables.

pub mod export;
pub mod funds;
pub mod summary;
pub mod ui;
