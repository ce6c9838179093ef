#![warn(clippy::uninlined_format_args)]

mod model;

use rust_decimal::{Decimal, RoundingStrategy};

pub use model::{Payment, PersonBalance};

/// Threshold below which a balance or a candidate transfer is treated as
/// zero (0.01 currency units).
pub const EPSILON: Decimal = Decimal::from_parts(1, 0, 0, false, 2);

const EMIT_SCALE: u32 = 2;

/// Reduces a set of net balances to a short list of peer-to-peer payments.
///
/// Balances with magnitude at or below `epsilon` are dropped up front and
/// produce no payment. The remaining people are split into creditors and
/// debtors, both sorted descending by magnitude (stable, so equal amounts
/// keep their input order), then matched greedily: the largest debtor pays
/// the largest creditor `min` of their remaining amounts until one side is
/// exhausted. Emitted amounts are rounded to two decimal places at the
/// point of emission, never earlier.
///
/// The result zeroes every balance exactly when total credits equal total
/// debits going in. When they do not, the function still terminates and
/// leaves the residual unmatched; that residual is the caller's data error,
/// not a failure here.
///
/// At most `creditors + debtors - 1` payments are emitted.
pub fn simplify_debts<Id: Copy>(
    people: impl IntoIterator<Item = PersonBalance<Id>>,
    epsilon: Decimal,
) -> Vec<Payment<Id>> {
    let mut creditors: Vec<(Id, Decimal)> = Vec::new();
    let mut debtors: Vec<(Id, Decimal)> = Vec::new();

    for person in people {
        if person.balance > epsilon {
            creditors.push((person.id, person.balance));
        } else if person.balance < -epsilon {
            debtors.push((person.id, -person.balance));
        }
    }

    // Stable sorts: equal magnitudes keep their input iteration order.
    creditors.sort_by(|(_, a), (_, b)| b.cmp(a));
    debtors.sort_by(|(_, a), (_, b)| b.cmp(a));

    let mut payments = Vec::with_capacity(creditors.len() + debtors.len());
    let mut i = 0;
    let mut j = 0;
    while i < debtors.len() && j < creditors.len() {
        let transfer = debtors[i].1.min(creditors[j].1);

        if transfer > epsilon {
            payments.push(Payment {
                from: debtors[i].0,
                to: creditors[j].0,
                amount: transfer
                    .round_dp_with_strategy(EMIT_SCALE, RoundingStrategy::MidpointAwayFromZero),
            });
        }

        debtors[i].1 -= transfer;
        creditors[j].1 -= transfer;

        // `transfer` is the min of the two, so at least one side hits zero
        // and advances; the loop cannot stall.
        if debtors[i].1 < epsilon {
            i += 1;
        }
        if creditors[j].1 < epsilon {
            j += 1;
        }
    }

    let residual_debt: Decimal = debtors[i..].iter().map(|(_, amount)| *amount).sum();
    let residual_credit: Decimal = creditors[j..].iter().map(|(_, amount)| *amount).sum();
    if residual_debt > epsilon || residual_credit > epsilon {
        tracing::warn!(
            %residual_debt,
            %residual_credit,
            payment_count = payments.len(),
            "Balances did not net to zero; residual left unmatched"
        );
    }

    payments
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(value: &str) -> Decimal {
        Decimal::from_str(value).expect("valid decimal")
    }

    fn person(id: u64, balance: &str) -> PersonBalance {
        PersonBalance {
            id,
            balance: dec(balance),
        }
    }

    #[test]
    fn two_person_debt_produces_one_payment() {
        let payments = simplify_debts([person(1, "100"), person(2, "-100")], EPSILON);

        assert_eq!(
            payments,
            vec![Payment {
                from: 2,
                to: 1,
                amount: dec("100"),
            }]
        );
    }

    #[test]
    fn one_debtor_pays_two_creditors() {
        // A owes 50; B is owed 30, C is owed 20. Exactly two payments.
        let payments = simplify_debts(
            [person(1, "-50"), person(2, "30"), person(3, "20")],
            EPSILON,
        );

        assert_eq!(
            payments,
            vec![
                Payment {
                    from: 1,
                    to: 2,
                    amount: dec("30"),
                },
                Payment {
                    from: 1,
                    to: 3,
                    amount: dec("20"),
                },
            ]
        );
    }

    #[test]
    fn all_zero_balances_produce_no_payments() {
        let payments = simplify_debts([person(1, "0"), person(2, "0")], EPSILON);
        assert!(payments.is_empty());
    }

    #[test]
    fn near_zero_balances_are_dropped() {
        // 0.01 is at the threshold, not over it, on both sides.
        let payments = simplify_debts([person(1, "0.01"), person(2, "-0.01")], EPSILON);
        assert!(payments.is_empty());
    }

    #[test]
    fn emitted_amount_is_rounded_half_away_from_zero() {
        let payments = simplify_debts([person(1, "10.005"), person(2, "-10.005")], EPSILON);

        assert_eq!(payments.len(), 1);
        assert_eq!(payments[0].amount, dec("10.01"));
    }

    #[test]
    fn amounts_are_rounded_at_emission_not_before() {
        // Sub-cent balances survive the merge untouched; only the emitted
        // payment is quantized.
        let payments = simplify_debts(
            [person(1, "10.004"), person(2, "-5.002"), person(3, "-5.002")],
            EPSILON,
        );

        assert_eq!(payments.len(), 2);
        assert_eq!(payments[0].amount, dec("5.00"));
        assert_eq!(payments[1].amount, dec("5.00"));
    }

    #[test]
    fn imbalanced_input_terminates_with_residual() {
        let payments = simplify_debts([person(1, "100"), person(2, "-30")], EPSILON);

        assert_eq!(
            payments,
            vec![Payment {
                from: 2,
                to: 1,
                amount: dec("30"),
            }]
        );
    }

    #[test]
    fn lone_creditor_produces_no_payments() {
        let payments = simplify_debts([person(1, "100")], EPSILON);
        assert!(payments.is_empty());
    }

    #[test]
    fn largest_debtor_matches_largest_creditor_first() {
        let payments = simplify_debts(
            [
                person(1, "-70"),
                person(2, "-30"),
                person(3, "60"),
                person(4, "40"),
            ],
            EPSILON,
        );

        assert_eq!(
            payments,
            vec![
                Payment {
                    from: 1,
                    to: 3,
                    amount: dec("60"),
                },
                Payment {
                    from: 1,
                    to: 4,
                    amount: dec("10"),
                },
                Payment {
                    from: 2,
                    to: 4,
                    amount: dec("30"),
                },
            ]
        );
    }

    #[test]
    fn equal_amounts_keep_input_order() {
        let first = simplify_debts(
            [person(1, "50"), person(2, "50"), person(3, "-100")],
            EPSILON,
        );
        let second = simplify_debts(
            [person(1, "50"), person(2, "50"), person(3, "-100")],
            EPSILON,
        );

        assert_eq!(first, second);
        assert_eq!(first[0].to, 1);
        assert_eq!(first[1].to, 2);
    }

    #[test]
    fn payment_count_stays_under_party_count() {
        let people = [
            person(1, "-10"),
            person(2, "-20"),
            person(3, "-30"),
            person(4, "25"),
            person(5, "35"),
        ];
        let payments = simplify_debts(people, EPSILON);

        let total_paid: Decimal = payments.iter().map(|p| p.amount).sum();
        assert_eq!(total_paid, dec("60"));
        assert!(payments.len() <= 4);
    }
}
