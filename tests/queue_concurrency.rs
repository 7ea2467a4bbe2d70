// ==============================================
// BLOCKING PRIORITY QUEUE CONCURRENCY TESTS (integration)
// ==============================================
//
// Multi-threaded producer/consumer and cancellation behavior. These need
// real parallel execution and cannot live inline.

use std::sync::{Arc, Barrier, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use synckit::error::Cancelled;
use synckit::queue::{BlockingPriorityQueue, CancellationSource};

// ==============================================
// Exactly-once delivery under contention
// ==============================================
//
// P producers each add M distinct items; C consumers take until they hit a
// sentinel. Every produced item must be taken exactly once; nothing is
// duplicated or fabricated.

mod producer_consumer {
    use super::*;

    const PRODUCERS: usize = 4;
    const ITEMS_PER_PRODUCER: usize = 250;
    const CONSUMERS: usize = 3;
    // All real items are positive, so sentinels have the lowest priority
    // and drain only after everything else.
    const SENTINEL: u64 = 0;

    #[test]
    fn every_item_taken_exactly_once() {
        let queue: BlockingPriorityQueue<u64> = BlockingPriorityQueue::new();
        let barrier = Arc::new(Barrier::new(PRODUCERS + CONSUMERS));
        let taken = Arc::new(Mutex::new(Vec::new()));

        let consumers: Vec<_> = (0..CONSUMERS)
            .map(|_| {
                let queue = queue.clone();
                let barrier = barrier.clone();
                let taken = taken.clone();
                thread::spawn(move || {
                    barrier.wait();
                    let mut local = Vec::new();
                    loop {
                        let item = queue.take();
                        if item == SENTINEL {
                            break;
                        }
                        local.push(item);
                    }
                    taken.lock().unwrap().extend(local);
                })
            })
            .collect();

        let producers: Vec<_> = (0..PRODUCERS)
            .map(|producer| {
                let queue = queue.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..ITEMS_PER_PRODUCER {
                        queue.add((producer * ITEMS_PER_PRODUCER + i + 1) as u64);
                    }
                })
            })
            .collect();

        for handle in producers {
            handle.join().unwrap();
        }
        // One sentinel per consumer, added only after production finished.
        queue.add_many(std::iter::repeat(SENTINEL).take(CONSUMERS));
        for handle in consumers {
            handle.join().unwrap();
        }

        let mut seen = taken.lock().unwrap().clone();
        seen.sort_unstable();
        let expected: Vec<u64> = (1..=(PRODUCERS * ITEMS_PER_PRODUCER) as u64).collect();
        assert_eq!(seen, expected, "items lost, duplicated, or fabricated");
        assert!(queue.is_empty());
    }
}

// ==============================================
// Broadcast wake
// ==============================================

mod broadcast_wake {
    use super::*;

    #[test]
    fn every_parked_consumer_is_eventually_served() {
        const WAITERS: usize = 4;

        let queue: BlockingPriorityQueue<u32> = BlockingPriorityQueue::new();
        let barrier = Arc::new(Barrier::new(WAITERS + 1));

        let handles: Vec<_> = (0..WAITERS)
            .map(|_| {
                let queue = queue.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    queue.take()
                })
            })
            .collect();

        barrier.wait();
        // Give the waiters a moment to park before feeding them.
        thread::sleep(Duration::from_millis(50));
        queue.add_many([1, 2, 3, 4]);

        let mut served: Vec<u32> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap())
            .collect();
        served.sort_unstable();
        assert_eq!(served, vec![1, 2, 3, 4]);
    }
}

// ==============================================
// Cancellation liveness
// ==============================================
//
// A consumer parked on take_with must observe a cancel signal promptly,
// without waiting out the queue's internal 30-second safety wake.

mod cancellation {
    use super::*;

    #[test]
    fn parked_consumer_unblocks_promptly_on_cancel() {
        let queue: BlockingPriorityQueue<u32> = BlockingPriorityQueue::new();
        let source = CancellationSource::new();
        let token = source.token();

        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || {
                let started = Instant::now();
                let result = queue.take_with(&token);
                (result, started.elapsed())
            })
        };

        // Let the consumer reach the parked wait before signalling.
        thread::sleep(Duration::from_millis(100));
        source.cancel();

        let (result, elapsed) = consumer.join().unwrap();
        assert_eq!(result, Err(Cancelled));
        assert!(
            elapsed < Duration::from_secs(10),
            "cancel took {:?}, waiter must not sleep out the safety period",
            elapsed
        );
    }

    #[test]
    fn cancel_releases_multiple_waiters() {
        const WAITERS: usize = 3;

        let queue: BlockingPriorityQueue<u32> = BlockingPriorityQueue::new();
        let source = CancellationSource::new();
        let barrier = Arc::new(Barrier::new(WAITERS + 1));

        let handles: Vec<_> = (0..WAITERS)
            .map(|_| {
                let queue = queue.clone();
                let token = source.token();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    queue.take_with(&token)
                })
            })
            .collect();

        barrier.wait();
        thread::sleep(Duration::from_millis(100));
        source.cancel();

        for handle in handles {
            assert_eq!(handle.join().unwrap(), Err(Cancelled));
        }
    }

    #[test]
    fn cancelled_waiter_leaves_elements_for_others() {
        let queue: BlockingPriorityQueue<u32> = BlockingPriorityQueue::new();
        let source = CancellationSource::new();
        let token = source.token();

        let consumer = {
            let queue = queue.clone();
            thread::spawn(move || queue.take_with(&token))
        };

        thread::sleep(Duration::from_millis(100));
        source.cancel();
        assert_eq!(consumer.join().unwrap(), Err(Cancelled));

        // The queue still works for everyone else.
        queue.add(7);
        assert_eq!(queue.take(), 7);
    }

    #[test]
    fn signal_racing_the_wait_window_is_never_lost() {
        // Cancel as close as possible to the consumer's park; the consumer
        // must return promptly whichever side of the window the signal hits.
        for _ in 0..50 {
            let queue: BlockingPriorityQueue<u32> = BlockingPriorityQueue::new();
            let source = CancellationSource::new();
            let token = source.token();
            let barrier = Arc::new(Barrier::new(2));

            let consumer = {
                let queue = queue.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    queue.take_with(&token)
                })
            };

            barrier.wait();
            source.cancel();

            assert_eq!(consumer.join().unwrap(), Err(Cancelled));
        }
    }
}

// ==============================================
// Mixed add / take ordering
// ==============================================

mod mixed_load {
    use super::*;

    #[test]
    fn concurrent_adds_preserve_priority_on_drain() {
        let queue: BlockingPriorityQueue<u64> = BlockingPriorityQueue::new();
        let barrier = Arc::new(Barrier::new(4));

        let handles: Vec<_> = (0..4u64)
            .map(|producer| {
                let queue = queue.clone();
                let barrier = barrier.clone();
                thread::spawn(move || {
                    barrier.wait();
                    for i in 0..100 {
                        queue.add(producer * 1_000 + i);
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        // Single-threaded drain must be non-increasing.
        let mut previous = u64::MAX;
        while let Some(item) = queue.try_take() {
            assert!(item <= previous, "drain order regressed");
            previous = item;
        }
    }
}
