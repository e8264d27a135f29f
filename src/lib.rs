#![doc(test(attr(deny(warnings))))]

//! Paperwork Core classifies PDF receipts and bank statements, gives them
//! deterministic names, files expenses into monthly folders and reconciles
//! them against a ledger spreadsheet.

pub mod batch;
pub mod classifier;
pub mod cli;
pub mod config;
pub mod document;
pub mod errors;
pub mod extract;
pub mod ledger;
pub mod naming;
pub mod processor;
pub mod storage;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup debug log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::debug!("Paperwork Core tracing initialized.");
    });
}
