use rust_decimal::Decimal;

/// Net position of one person entering settlement.
/// Positive: the group owes them. Negative: they owe the group.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PersonBalance<Id = u64> {
    pub id: Id,
    pub balance: Decimal,
}

/// One proposed transfer: `from` pays `to` the given amount.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Payment<Id = u64> {
    pub from: Id,
    pub to: Id,
    pub amount: Decimal,
}
