pub mod ledger;
pub mod solver;
pub mod split;

pub use ledger::{LedgerBuilder, compute_balances};
pub use solver::{SettlementSolver, apply_settlements};
pub use split::split_equally;
