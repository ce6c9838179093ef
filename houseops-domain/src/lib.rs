#![warn(clippy::uninlined_format_args)]

pub mod error;
pub mod model;
pub mod services;

pub use error::ExpenseValidationError;
pub use model::{
    Expense, ExpenseId, Money, Participant, ParticipantBalances, ParticipantId, RemainderPolicy,
    Settlement, Split, SplitId, SplitStatus,
};
pub use services::{
    LedgerBuilder, SettlementSolver, apply_settlements, compute_balances, split_equally,
};
