use std::{
    sync::atomic::{AtomicBool, Ordering},
    thread,
};

use lockstep_ledger::{account::Account, error::LedgerError};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

const N: usize = 2_000;

#[test]
fn opposite_transfers_do_not_deadlock() {
    let a = Account::new("A", "Alice", dec!(10000), dec!(0)).unwrap();
    let b = Account::new("B", "Bob", dec!(10000), dec!(0)).unwrap();

    thread::scope(|s| {
        for _ in 0..2 {
            s.spawn(|| {
                for _ in 0..N {
                    a.transfer(dec!(1), &b).unwrap();
                }
            });
            s.spawn(|| {
                for _ in 0..N {
                    b.transfer(dec!(1), &a).unwrap();
                }
            });
        }
    });

    assert_eq!(Account::balances(&a, &b), (dec!(10000), dec!(10000)));
}

#[test]
fn observers_never_see_half_a_transfer() {
    let a = Account::new("A", "Alice", dec!(100), dec!(10)).unwrap();
    let b = Account::new("B", "Bob", dec!(100), dec!(10)).unwrap();
    let total = dec!(200);
    let done = AtomicBool::new(false);

    thread::scope(|s| {
        let observer = s.spawn(|| {
            let mut reads = 0u64;
            loop {
                let (balance_b, balance_a) = Account::balances(&b, &a);
                assert_eq!(balance_a + balance_b, total);
                assert!(balance_a >= dec!(10) && balance_b >= dec!(10));
                reads += 1;
                if done.load(Ordering::Acquire) {
                    break reads;
                }
            }
        });

        let writers: Vec<_> = [(&a, &b), (&b, &a)]
            .into_iter()
            .map(|(from, to)| {
                s.spawn(move || {
                    let mut rejected = 0usize;
                    for i in 0..N {
                        // large amounts regularly hit the floor and must release both locks
                        let amount = Decimal::from(i % 120);
                        match from.transfer(amount, to) {
                            Ok(()) => {}
                            Err(LedgerError::InsufficientFunds(_)) => rejected += 1,
                            Err(err) => panic!("unexpected error: {err}"),
                        }
                    }
                    rejected
                })
            })
            .collect();

        for writer in writers {
            writer.join().unwrap();
        }
        done.store(true, Ordering::Release);
        assert!(observer.join().unwrap() > 0);
    });

    let (balance_a, balance_b) = Account::balances(&a, &b);
    assert_eq!(balance_a + balance_b, total);
}

#[test]
fn concurrent_withdrawals_respect_floor() {
    let acc = Account::new("A", "Alice", dec!(1000), dec!(100)).unwrap();

    let succeeded: usize = thread::scope(|s| {
        let handles: Vec<_> = (0..8)
            .map(|_| {
                s.spawn(|| {
                    (0..100)
                        .filter(|_| acc.withdraw(dec!(3)).is_ok())
                        .count()
                })
            })
            .collect();
        handles.into_iter().map(|h| h.join().unwrap()).sum()
    });

    // 900 above the floor allows exactly 300 withdrawals of 3
    assert_eq!(succeeded, 300);
    assert_eq!(acc.balance(), dec!(100));
}

#[test]
fn transfers_across_a_ring_conserve_funds() {
    let accounts: Vec<Account> = ["w", "x", "y", "z"]
        .into_iter()
        .map(|id| Account::new(id, id, dec!(500), dec!(20)).unwrap())
        .collect();

    thread::scope(|s| {
        for (i, from) in accounts.iter().enumerate() {
            let to = &accounts[(i + 1) % accounts.len()];
            let back = &accounts[(i + accounts.len() - 1) % accounts.len()];
            s.spawn(move || {
                for step in 0..N {
                    let amount = Decimal::new((step % 700) as i64, 0);
                    for target in [to, back] {
                        match from.transfer(amount, target) {
                            Ok(()) | Err(LedgerError::InsufficientFunds(_)) => {}
                            Err(err) => panic!("unexpected error: {err}"),
                        }
                    }
                }
            });
        }
    });

    let total: Decimal = accounts.iter().map(Account::balance).sum();
    assert_eq!(total, dec!(2000));
    assert!(accounts.iter().all(|acc| acc.balance() >= acc.min_balance()));
}
