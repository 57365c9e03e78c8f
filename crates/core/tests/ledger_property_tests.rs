//! Property tests for balance derivation and completion signalling.

use chrono::{Duration, NaiveDate, TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;

use piggybank_core::goals::{compute_progress, CelebrationPolicy, CompletionTracker, Goal};
use piggybank_core::ledger::{compute_balance, sort_newest_first, Transaction, TransactionKind};

fn kind_strategy() -> impl Strategy<Value = TransactionKind> {
    prop_oneof![
        Just(TransactionKind::Deposit),
        Just(TransactionKind::Withdrawal),
    ]
}

/// Positive amounts with two decimal places, up to one million.
fn amount_strategy() -> impl Strategy<Value = Decimal> {
    (1i64..100_000_000).prop_map(|cents| Decimal::new(cents, 2))
}

fn transactions_strategy() -> impl Strategy<Value = Vec<Transaction>> {
    prop::collection::vec((kind_strategy(), amount_strategy(), 0i64..50), 0..40).prop_map(
        |entries| {
            entries
                .into_iter()
                .enumerate()
                .map(|(i, (kind, amount, offset))| Transaction {
                    id: format!("tx-{:03}", i),
                    goal_id: Some("goal".to_string()),
                    amount,
                    kind,
                    description: "generated".to_string(),
                    created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap()
                        + Duration::minutes(offset),
                })
                .collect()
        },
    )
}

fn goal(target_amount: Decimal) -> Goal {
    Goal {
        id: "goal".to_string(),
        title: "Goal".to_string(),
        target_amount,
        target_date: NaiveDate::from_ymd_opt(2027, 1, 1).unwrap(),
        description: None,
        image_url: None,
        is_active: true,
        created_at: Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap(),
        cached_balance: Decimal::ZERO,
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_balance_is_deposits_minus_withdrawals(txs in transactions_strategy()) {
        let deposits: Decimal = txs
            .iter()
            .filter(|t| t.kind == TransactionKind::Deposit)
            .map(|t| t.amount)
            .sum();
        let withdrawals: Decimal = txs
            .iter()
            .filter(|t| t.kind == TransactionKind::Withdrawal)
            .map(|t| t.amount)
            .sum();
        prop_assert_eq!(compute_balance(&txs).unwrap(), deposits - withdrawals);
    }

    #[test]
    fn prop_balance_ignores_order(txs in transactions_strategy()) {
        let mut shuffled = txs.clone();
        shuffled.reverse();
        sort_newest_first(&mut shuffled);
        prop_assert_eq!(compute_balance(&shuffled).unwrap(), compute_balance(&txs).unwrap());
    }

    #[test]
    fn prop_newest_first_is_total_order(txs in transactions_strategy()) {
        let mut sorted = txs;
        sort_newest_first(&mut sorted);
        for pair in sorted.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(
                a.created_at > b.created_at || (a.created_at == b.created_at && a.id > b.id)
            );
        }
    }

    #[test]
    fn prop_percentage_stays_in_range(
        txs in transactions_strategy(),
        target in amount_strategy(),
    ) {
        let progress = compute_progress(&goal(target), compute_balance(&txs).unwrap());
        prop_assert!(progress.percentage >= Decimal::ZERO);
        prop_assert!(progress.percentage <= Decimal::ONE_HUNDRED);
        prop_assert_eq!(progress.is_complete, progress.balance >= target);
    }

    #[test]
    fn prop_monotone_deposits_signal_once(
        deposits in prop::collection::vec(amount_strategy(), 1..30),
        target in amount_strategy(),
        first_only in any::<bool>(),
    ) {
        let policy = if first_only {
            CelebrationPolicy::FirstCrossingOnly
        } else {
            CelebrationPolicy::EveryCrossing
        };
        let goal = goal(target);
        let mut tracker = CompletionTracker::new(policy);
        tracker.observe(&goal.id, &compute_progress(&goal, Decimal::ZERO));

        let mut balance = Decimal::ZERO;
        let mut signals = 0;
        for amount in deposits {
            balance += amount;
            if tracker.observe(&goal.id, &compute_progress(&goal, balance)).is_some() {
                signals += 1;
            }
        }

        let expected = if balance >= target { 1 } else { 0 };
        prop_assert_eq!(signals, expected);
    }
}
