use thiserror::Error;

use crate::model::{ExpenseId, Money, SplitId};

/// Shape violations an expense-creation collaborator can check before a
/// record enters the ledger. The ledger and solver themselves treat these
/// as caller preconditions and never fail on them.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExpenseValidationError {
    #[error("expense amount must be positive (found {found})")]
    NonPositiveAmount { found: Money },
    #[error("split {split_id:?} has a negative amount ({found})")]
    NegativeSplitAmount { split_id: SplitId, found: Money },
    #[error("split amounts sum to {actual}, expected the expense amount {expected}")]
    SplitSumMismatch { expected: Money, actual: Money },
    #[error("split {split_id:?} belongs to expense {found:?}, not {expected:?}")]
    ForeignSplit {
        split_id: SplitId,
        expected: ExpenseId,
        found: ExpenseId,
    },
}
