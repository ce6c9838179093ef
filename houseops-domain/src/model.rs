use std::{
    collections::BTreeMap,
    fmt,
    iter::Sum,
    ops::{Add, AddAssign, Neg, Sub, SubAssign},
};

use chrono::{DateTime, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::ExpenseValidationError;

/// Identifies a person who can owe or be owed money.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ParticipantId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct ExpenseId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct SplitId(pub u64);

/// A person participating in shared expenses. Immutable once referenced by
/// a balance computation.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Participant {
    pub id: ParticipantId,
    pub name: String,
}

/// How sub-unit remainder pennies are distributed by [`Money::split_even`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RemainderPolicy {
    /// Earlier shares absorb the remainder, one cent each.
    FrontLoad,
}

/// Currency-agnostic money amount backed by exact decimal arithmetic.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Money(Decimal);

impl Money {
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Builds an amount from integer units at the given decimal scale,
    /// e.g. `Money::new(1250, 2)` is 12.50.
    pub fn new(units: i64, scale: u32) -> Self {
        Self(Decimal::new(units, scale))
    }

    pub fn from_i64(value: i64) -> Self {
        Self(Decimal::from(value))
    }

    pub fn from_decimal(value: Decimal) -> Self {
        Self(value)
    }

    pub fn as_decimal(self) -> Decimal {
        self.0
    }

    pub fn abs(self) -> Self {
        Self(self.0.abs())
    }

    pub fn is_zero(self) -> bool {
        self.0.is_zero()
    }

    pub fn is_sign_negative(self) -> bool {
        self.0.is_sign_negative() && !self.0.is_zero()
    }

    /// Rounds to `scale` decimal places, half away from zero.
    pub fn round_dp(self, scale: u32) -> Self {
        Self(
            self.0
                .round_dp_with_strategy(scale, RoundingStrategy::MidpointAwayFromZero),
        )
    }

    /// Splits the amount into `n` shares that sum exactly to the original.
    ///
    /// Each share is the amount divided by `n`, floored to two decimal
    /// places; the remainder is then distributed per `policy`. Zero `n`
    /// yields no shares.
    pub fn split_even(self, n: usize, policy: RemainderPolicy) -> impl Iterator<Item = Money> {
        let mut shares = Vec::new();
        if n > 0 {
            let count = Decimal::from(n as u64);
            let base = (self.0 / count).round_dp_with_strategy(2, RoundingStrategy::ToZero);
            shares = vec![base; n];

            let mut remainder = self.0 - base * count;
            let step = Decimal::new(1, 2);
            match policy {
                RemainderPolicy::FrontLoad => {
                    let mut idx = 0;
                    while remainder.abs() >= step && idx < n {
                        let cent = if remainder.is_sign_negative() {
                            -step
                        } else {
                            step
                        };
                        shares[idx] += cent;
                        remainder -= cent;
                        idx += 1;
                    }
                    // Sub-cent leftover (non-cent-grid input) lands on the
                    // first share so the sum stays exact.
                    if !remainder.is_zero() {
                        shares[0] += remainder;
                    }
                }
            }
        }
        shares.into_iter().map(Money)
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Add for Money {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl AddAssign for Money {
    fn add_assign(&mut self, rhs: Self) {
        self.0 += rhs.0;
    }
}

impl Sub for Money {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self(self.0 - rhs.0)
    }
}

impl SubAssign for Money {
    fn sub_assign(&mut self, rhs: Self) {
        self.0 -= rhs.0;
    }
}

impl Neg for Money {
    type Output = Self;

    fn neg(self) -> Self::Output {
        Self(-self.0)
    }
}

impl Sum for Money {
    fn sum<I: Iterator<Item = Money>>(iter: I) -> Self {
        iter.fold(Money::ZERO, Add::add)
    }
}

/// Whether a split's share has been settled outside the ledger.
///
/// The paid timestamp exists exactly when the split is paid, and the
/// transition is one-way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SplitStatus {
    Outstanding,
    Paid { at: DateTime<Utc> },
}

/// One participant's share of an expense.
///
/// Its expense and participant associations never change after creation;
/// only the payment status moves, once, from outstanding to paid.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Split {
    pub id: SplitId,
    pub expense_id: ExpenseId,
    pub participant_id: ParticipantId,
    pub amount: Money,
    pub status: SplitStatus,
}

impl Split {
    pub fn outstanding(
        id: SplitId,
        expense_id: ExpenseId,
        participant_id: ParticipantId,
        amount: Money,
    ) -> Self {
        Self {
            id,
            expense_id,
            participant_id,
            amount,
            status: SplitStatus::Outstanding,
        }
    }

    pub fn is_paid(&self) -> bool {
        matches!(self.status, SplitStatus::Paid { .. })
    }

    pub fn paid_at(&self) -> Option<DateTime<Utc>> {
        match self.status {
            SplitStatus::Outstanding => None,
            SplitStatus::Paid { at } => Some(at),
        }
    }

    /// Marks the split paid. A second call keeps the original timestamp.
    pub fn mark_paid(&mut self, at: DateTime<Utc>) {
        if let SplitStatus::Outstanding = self.status {
            self.status = SplitStatus::Paid { at };
        }
    }
}

/// A single payment made on behalf of the group, carved into splits.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Expense {
    pub id: ExpenseId,
    pub amount: Money,
    pub paid_by: ParticipantId,
    pub splits: Vec<Split>,
}

impl Expense {
    pub fn new(id: ExpenseId, amount: Money, paid_by: ParticipantId, splits: Vec<Split>) -> Self {
        Self {
            id,
            amount,
            paid_by,
            splits,
        }
    }

    /// Boundary check for the expense-creation collaborator.
    ///
    /// The ledger and solver never call this; they stay total and lenient
    /// over whatever records they are handed.
    pub fn validate(&self) -> Result<(), ExpenseValidationError> {
        if self.amount <= Money::ZERO {
            return Err(ExpenseValidationError::NonPositiveAmount {
                found: self.amount,
            });
        }

        for split in &self.splits {
            if split.amount.is_sign_negative() {
                return Err(ExpenseValidationError::NegativeSplitAmount {
                    split_id: split.id,
                    found: split.amount,
                });
            }
            if split.expense_id != self.id {
                return Err(ExpenseValidationError::ForeignSplit {
                    split_id: split.id,
                    expected: self.id,
                    found: split.expense_id,
                });
            }
        }

        let split_sum: Money = self.splits.iter().map(|split| split.amount).sum();
        if split_sum != self.amount {
            return Err(ExpenseValidationError::SplitSumMismatch {
                expected: self.amount,
                actual: split_sum,
            });
        }

        Ok(())
    }
}

/// Net position per participant, derived from a snapshot of expenses.
///
/// Positive: the group owes them. Negative: they owe the group. Keyed by a
/// BTreeMap so iteration order is stable, which fixes the solver's
/// tie-break among equal amounts.
pub type ParticipantBalances = BTreeMap<ParticipantId, Money>;

/// A computed transfer directive: `from` owes, `to` is owed.
///
/// Never stored; recomputed from balances on demand.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Settlement {
    pub from: Participant,
    pub to: Participant,
    pub amount: Money,
}
