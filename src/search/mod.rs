//! Search orchestration module
//!
//! Fans a query out to one branch per result category, joins the branches
//! under a shared cancellation token and assembles the aggregate.

mod executor;
mod models;
mod runner;

pub use executor::Search;
pub use models::*;
pub use runner::run_branch;
