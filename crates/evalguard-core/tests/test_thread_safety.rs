use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use evalguard::{check, expect, RuleSet};

#[test]
fn expect_from_many_threads() {
    thread::scope(|scope| {
        let workers: Vec<_> = (0..10)
            .map(|thread_id| {
                scope.spawn(move || {
                    for i in 0..100 {
                        let value = format!("test_{}_{}", thread_id, i);
                        expect(value)
                            .contains("test")
                            .and_then(|e| e.not_contains("invalid"))?;
                    }
                    Ok::<_, evalguard::ValidationError>(())
                })
            })
            .collect();

        for worker in workers {
            assert!(worker.join().unwrap().is_ok());
        }
    });
}

#[test]
fn checked_function_shared_across_threads() {
    let calls = AtomicUsize::new(0);
    let safe_func = check(RuleSet::new().contains("result").not_contains("error")).wrap(
        |(thread_id, call_id): (usize, usize)| {
            calls.fetch_add(1, Ordering::SeqCst);
            format!("result_{}_{}", thread_id, call_id)
        },
    );

    thread::scope(|scope| {
        for thread_id in 0..10 {
            let safe_func = &safe_func;
            scope.spawn(move || {
                for call_id in 0..50 {
                    assert!(safe_func.call((thread_id, call_id)).is_ok());
                }
            });
        }
    });

    assert_eq!(calls.load(Ordering::SeqCst), 500);
}
