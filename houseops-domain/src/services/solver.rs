use std::collections::BTreeMap;

use houseops_settlement::{EPSILON, PersonBalance, simplify_debts};

use crate::model::{Money, Participant, ParticipantBalances, ParticipantId, Settlement};

/// Turns net balances into a short list of who-pays-whom directives.
pub struct SettlementSolver;

impl SettlementSolver {
    /// Produces settlements that clear all balances resolvable through the
    /// participant directory.
    ///
    /// Balances whose id is missing from `participants` are dropped before
    /// matching, so an unresolvable party never appears on either side of a
    /// transfer. Balances within the epsilon threshold (0.01) of zero are
    /// treated as settled and produce nothing.
    ///
    /// Invariant for the deterministic tie-break among equal amounts:
    /// `ParticipantBalances` is a BTreeMap keyed by `ParticipantId`, so the
    /// input iteration order is stable.
    pub fn solve(
        &self,
        balances: &ParticipantBalances,
        participants: &BTreeMap<ParticipantId, Participant>,
    ) -> Vec<Settlement> {
        let people = balances
            .iter()
            .filter(|(id, _)| participants.contains_key(id))
            .map(|(id, balance)| PersonBalance {
                id: *id,
                balance: balance.as_decimal(),
            });

        let payments = simplify_debts(people, EPSILON);

        let settlements: Vec<Settlement> = payments
            .into_iter()
            .filter_map(|payment| {
                let from = participants.get(&payment.from)?.clone();
                let to = participants.get(&payment.to)?.clone();
                Some(Settlement {
                    from,
                    to,
                    amount: Money::from_decimal(payment.amount),
                })
            })
            .collect();

        tracing::debug!(
            balance_count = balances.len(),
            settlement_count = settlements.len(),
            "Constructed settlement transfers"
        );

        settlements
    }
}

/// Applies settlements to a balance mapping, returning the post-transfer
/// state. Each payment moves both parties toward zero: the payer's debt
/// shrinks, the receiver's credit shrinks.
///
/// Callers use this to preview a settle-up before writing anything back;
/// the write-back itself belongs to the storage collaborator.
pub fn apply_settlements(
    balances: &ParticipantBalances,
    settlements: &[Settlement],
) -> ParticipantBalances {
    let mut new_balances = balances.clone();
    for settlement in settlements {
        if let Some(balance) = new_balances.get_mut(&settlement.from.id) {
            *balance += settlement.amount;
        }
        if let Some(balance) = new_balances.get_mut(&settlement.to.id) {
            *balance -= settlement.amount;
        }
    }
    new_balances
}
