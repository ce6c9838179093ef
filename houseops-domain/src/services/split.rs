use chrono::{DateTime, Utc};

use crate::model::{ExpenseId, Money, ParticipantId, RemainderPolicy, Split, SplitId};

/// Carves an expense amount into one equal split per participant.
///
/// Shares come from [`Money::split_even`] with front-loaded remainder
/// pennies, so they always sum exactly to the expense amount. The payer's
/// own split is created already paid (they fronted the money), stamped
/// with `created_at`. Split ids come from the caller's id source, since id
/// generation belongs to the storage collaborator.
pub fn split_equally<F>(
    expense_id: ExpenseId,
    amount: Money,
    participant_ids: &[ParticipantId],
    paid_by: ParticipantId,
    created_at: DateTime<Utc>,
    mut next_id: F,
) -> Vec<Split>
where
    F: FnMut() -> SplitId,
{
    amount
        .split_even(participant_ids.len(), RemainderPolicy::FrontLoad)
        .zip(participant_ids)
        .map(|(share, participant_id)| {
            let mut split = Split::outstanding(next_id(), expense_id, *participant_id, share);
            if *participant_id == paid_by {
                split.mark_paid(created_at);
            }
            split
        })
        .collect()
}
