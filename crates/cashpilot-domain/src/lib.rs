//! cashpilot-domain
//!
//! Pure domain models (Transaction, Category, BudgetPlan, Alert, etc.).
//! No I/O, no storage. Only data types and core enums.

pub mod alert;
pub mod budget;
pub mod category;
pub mod common;
pub mod transaction;

pub use alert::*;
pub use budget::*;
pub use category::*;
pub use common::*;
pub use transaction::*;
