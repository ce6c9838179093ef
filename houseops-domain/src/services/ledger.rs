use fxhash::FxHashSet;

use crate::model::{Expense, Money, Participant, ParticipantBalances, ParticipantId};

/// Accumulates net balances from a snapshot of expenses.
///
/// Every known participant starts at zero. Each outstanding split debits
/// the split's participant and credits the expense's payer; paid splits
/// contribute nothing, since the debt was already settled through some
/// other channel. Ids outside the known participant set are skipped
/// leniently, one leg at a time, so money owed by an unknown participant
/// simply disappears from the ledger.
pub struct LedgerBuilder {
    balances: ParticipantBalances,
    known: FxHashSet<ParticipantId>,
}

impl LedgerBuilder {
    pub fn new(participants: &[Participant]) -> Self {
        let known: FxHashSet<ParticipantId> = participants.iter().map(|p| p.id).collect();
        let balances: ParticipantBalances = participants
            .iter()
            .map(|participant| (participant.id, Money::ZERO))
            .collect();

        Self { balances, known }
    }

    pub fn apply(&mut self, expense: &Expense) {
        let payer_known = self.known.contains(&expense.paid_by);
        let mut skipped_legs = 0_usize;

        for split in &expense.splits {
            if split.is_paid() {
                continue;
            }

            if self.known.contains(&split.participant_id) {
                *self
                    .balances
                    .entry(split.participant_id)
                    .or_insert(Money::ZERO) -= split.amount;
            } else {
                skipped_legs += 1;
            }

            if payer_known {
                *self.balances.entry(expense.paid_by).or_insert(Money::ZERO) += split.amount;
            } else {
                skipped_legs += 1;
            }
        }

        if skipped_legs > 0 {
            tracing::trace!(
                expense_id = expense.id.0,
                skipped_legs,
                "Skipped balance legs referencing unknown participants"
            );
        }
    }

    pub fn balances(&self) -> &ParticipantBalances {
        &self.balances
    }

    pub fn into_balances(self) -> ParticipantBalances {
        self.balances
    }
}

/// Derives each participant's net balance from a snapshot of expenses.
///
/// Pure and total: never mutates its inputs, never fails. The sum of the
/// returned balances is exactly zero whenever every split and payer
/// references a known participant.
pub fn compute_balances(
    expenses: &[Expense],
    participants: &[Participant],
) -> ParticipantBalances {
    let mut builder = LedgerBuilder::new(participants);
    for expense in expenses {
        builder.apply(expense);
    }

    let balances = builder.into_balances();
    tracing::debug!(
        expense_count = expenses.len(),
        participant_count = participants.len(),
        "Computed participant balances"
    );
    balances
}
