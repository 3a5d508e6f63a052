//! Core domain types and logic.

pub mod trade;
pub mod pnl;
pub mod store;
pub mod metrics;
pub mod query;
pub mod validation;
pub mod session;
pub mod error;
