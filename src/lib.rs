#![doc(test(attr(deny(warnings))))]

//! cashpilot keeps a household or small-business cash flow in memory, turns it
//! into monthly aggregates, budget variance and trends, and raises alerts when
//! the numbers drift.
//!
//! The heavy lifting lives in the member crates; this crate owns the
//! [`AppState`] aggregate that ties them together.

pub mod errors;
pub mod state;
pub mod utils;

use std::sync::Once;

pub use cashpilot_config as config;
pub use cashpilot_core as engine;
pub use cashpilot_domain as domain;

pub use errors::AppError;
pub use state::{AppState, DataSnapshot, ImportSummary};

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("cashpilot tracing initialized.");
    });
}
