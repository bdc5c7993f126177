//! Core business logic - framework-agnostic ledger, product, transaction,
//! and reporting operations.
//!
//! Nothing in this module holds state of its own: every function takes the
//! database connection (or plain slices) as input, so the ledger stays
//! recomputable from stored data alone.

pub mod ledger;
pub mod product;
pub mod report;
pub mod transaction;
