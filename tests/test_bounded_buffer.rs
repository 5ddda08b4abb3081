// SPDX-License-Identifier: MIT
// SPDX-FileCopyrightText: 2025-2026 natyamatsya contributors
//
// Tests for BoundedBuffer: FIFO order, blocking at both ends, wraparound,
// and the snack-line stress scenario.

use std::sync::atomic::{AtomicBool, AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use confsync::{dispose_item, make_item, BoundedBuffer, SyncError, WorkItem};

#[test]
fn zero_capacity_is_rejected() {
    let res = BoundedBuffer::<u32>::new(0);
    assert!(matches!(res, Err(SyncError::InvalidCapacity(0))));
}

#[test]
fn starts_empty() {
    let buf = BoundedBuffer::<u32>::new(4).expect("new");
    assert_eq!(buf.capacity(), 4);
    assert_eq!(buf.len(), 0);
    assert!(buf.is_empty());
    assert!(!buf.is_full());
}

#[test]
fn single_slot_round_trip() {
    let buf = BoundedBuffer::new(1).expect("new");
    buf.put(42);
    assert!(buf.is_full());
    assert_eq!(buf.take(), 42);
    assert!(buf.is_empty());
}

#[test]
fn fifo_across_wraparound() {
    let buf = BoundedBuffer::new(5).expect("new");
    for i in 1..=3 {
        buf.put(i);
    }
    assert_eq!(buf.take(), 1);
    assert_eq!(buf.take(), 2);
    // tail wraps past the end of the ring here
    for i in 4..=7 {
        buf.put(i);
    }
    assert_eq!(buf.len(), 5);
    assert!(buf.is_full());
    let out: Vec<_> = (0..5).map(|_| buf.take()).collect();
    assert_eq!(out, vec![3, 4, 5, 6, 7]);
    assert!(buf.is_empty());
}

#[test]
fn many_laps_keep_order() {
    let buf = BoundedBuffer::new(3).expect("new");
    let mut next_out = 0;
    for i in 0..100 {
        buf.put(i);
        if buf.is_full() {
            assert_eq!(buf.take(), next_out);
            next_out += 1;
        }
    }
    while !buf.is_empty() {
        assert_eq!(buf.take(), next_out);
        next_out += 1;
    }
    assert_eq!(next_out, 100);
}

#[test]
fn try_put_and_try_take() {
    let buf = BoundedBuffer::new(2).expect("new");
    assert_eq!(buf.try_take(), None);
    assert_eq!(buf.try_put("a"), Ok(()));
    assert_eq!(buf.try_put("b"), Ok(()));
    assert_eq!(buf.try_put("c"), Err("c"), "full buffer hands the item back");
    assert_eq!(buf.try_take(), Some("a"));
    assert_eq!(buf.try_put("c"), Ok(()));
    assert_eq!(buf.try_take(), Some("b"));
    assert_eq!(buf.try_take(), Some("c"));
    assert_eq!(buf.try_take(), None);
}

#[test]
fn destroy_drains_in_order() {
    let buf = BoundedBuffer::new(4).expect("new");
    buf.put(String::from("x"));
    buf.put(String::from("y"));
    buf.put(String::from("z"));
    let _ = buf.take();
    assert_eq!(buf.destroy(), vec!["y".to_string(), "z".to_string()]);
}

#[test]
fn destroy_empty() {
    let buf = BoundedBuffer::<u8>::new(2).expect("new");
    assert!(buf.destroy().is_empty());
}

#[test]
fn put_blocks_when_full() {
    let buf = Arc::new(BoundedBuffer::new(3).expect("new"));
    for i in 1..=3 {
        buf.put(i);
    }

    let placed = Arc::new(AtomicBool::new(false));
    let producer = {
        let buf = Arc::clone(&buf);
        let placed = Arc::clone(&placed);
        thread::spawn(move || {
            buf.put(4);
            placed.store(true, Ordering::SeqCst);
        })
    };

    thread::sleep(Duration::from_millis(50));
    assert!(!placed.load(Ordering::SeqCst), "4th put must wait for a slot");
    assert_eq!(buf.len(), 3);

    assert_eq!(buf.take(), 1);
    producer.join().unwrap();
    assert!(placed.load(Ordering::SeqCst));

    let rest: Vec<_> = (0..3).map(|_| buf.take()).collect();
    assert_eq!(rest, vec![2, 3, 4]);
}

#[test]
fn take_blocks_when_empty() {
    let buf = Arc::new(BoundedBuffer::new(2).expect("new"));
    let got = Arc::new(AtomicU64::new(0));

    let consumer = {
        let buf = Arc::clone(&buf);
        let got = Arc::clone(&got);
        thread::spawn(move || {
            got.store(buf.take(), Ordering::SeqCst);
        })
    };

    thread::sleep(Duration::from_millis(50));
    assert_eq!(got.load(Ordering::SeqCst), 0, "take must wait for an item");

    buf.put(9);
    consumer.join().unwrap();
    assert_eq!(got.load(Ordering::SeqCst), 9);
}

// P1 P2 C1 C2 in strict sequence.
#[test]
fn produce_produce_consume_consume() {
    let buf = Arc::new(BoundedBuffer::new(2).expect("new"));
    for id in 1..=2 {
        let b = Arc::clone(&buf);
        thread::spawn(move || b.put(make_item(id, "Burger", 0)))
            .join()
            .unwrap();
    }
    let mut ids = Vec::new();
    for _ in 0..2 {
        let b = Arc::clone(&buf);
        let item = thread::spawn(move || b.take()).join().unwrap();
        ids.push(item.id());
        dispose_item(item);
    }
    assert_eq!(ids, vec![1, 2]);
    assert!(buf.is_empty());
}

// C1 starts first and waits; P1 then satisfies it.
#[test]
fn consumer_before_producer() {
    let buf = Arc::new(BoundedBuffer::new(1).expect("new"));

    let consumer = {
        let buf = Arc::clone(&buf);
        thread::spawn(move || buf.take())
    };
    thread::sleep(Duration::from_millis(20));

    let b = Arc::clone(&buf);
    thread::spawn(move || b.put(make_item(7, "Wrap", 1)))
        .join()
        .unwrap();

    let item = consumer.join().unwrap();
    assert_eq!(item.id(), 7);
    assert_eq!(item.payload(), "Wrap");
    assert_eq!(item.origin(), 1);
}

#[test]
fn slow_producer_single_consumer() {
    let buf = Arc::new(BoundedBuffer::new(2).expect("new"));
    let count = 20u64;

    let producer = {
        let buf = Arc::clone(&buf);
        thread::spawn(move || {
            for i in 0..count {
                thread::sleep(Duration::from_micros(300));
                buf.put(i);
            }
        })
    };

    let received: Vec<_> = (0..count).map(|_| buf.take()).collect();
    producer.join().unwrap();

    assert_eq!(received, (0..count).collect::<Vec<_>>());
}

#[test]
fn fast_producer_slow_consumer() {
    let buf = Arc::new(BoundedBuffer::new(3).expect("new"));
    let count = 20u64;

    let producer = {
        let buf = Arc::clone(&buf);
        thread::spawn(move || {
            for i in 0..count {
                buf.put(i);
                assert!(buf.occupied() <= 3);
            }
        })
    };

    let mut received = Vec::new();
    for _ in 0..count {
        thread::sleep(Duration::from_micros(300));
        received.push(buf.take());
    }
    producer.join().unwrap();

    assert_eq!(received, (0..count).collect::<Vec<_>>());
}

// Snack line: 40 producers x 20 trays, 60 consumers, capacity 10.
#[test]
fn many_producers_many_consumers() {
    let producers = 40u64;
    let per_producer = 20u64;
    let consumers = 60u64;
    let capacity = 10;
    let total = producers * per_producer;

    let buf = Arc::new(BoundedBuffer::<WorkItem>::new(capacity).expect("new"));
    let produced_sum = Arc::new(AtomicU64::new(0));
    let consumed_sum = Arc::new(AtomicU64::new(0));
    let consumed = Arc::new(AtomicU64::new(0));
    let over_capacity = Arc::new(AtomicUsize::new(0));

    let mut handles = Vec::new();
    for p in 0..producers {
        let buf = Arc::clone(&buf);
        let produced_sum = Arc::clone(&produced_sum);
        let over = Arc::clone(&over_capacity);
        handles.push(thread::spawn(move || {
            for i in 0..per_producer {
                let id = p * per_producer + i + 1;
                produced_sum.fetch_add(id, Ordering::Relaxed);
                buf.put(make_item(id, "Sushi Roll", p as u32));
                if buf.occupied() > capacity {
                    over.fetch_add(1, Ordering::Relaxed);
                }
            }
        }));
    }

    // Split `total` as evenly as possible over the consumers.
    for c in 0..consumers {
        let quota = total / consumers + u64::from(c < total % consumers);
        let buf = Arc::clone(&buf);
        let consumed_sum = Arc::clone(&consumed_sum);
        let consumed = Arc::clone(&consumed);
        let over = Arc::clone(&over_capacity);
        handles.push(thread::spawn(move || {
            for _ in 0..quota {
                let item = buf.take();
                if buf.occupied() > capacity {
                    over.fetch_add(1, Ordering::Relaxed);
                }
                consumed_sum.fetch_add(item.id(), Ordering::Relaxed);
                consumed.fetch_add(1, Ordering::Relaxed);
                dispose_item(item);
            }
        }));
    }

    for h in handles {
        h.join().unwrap();
    }

    assert_eq!(consumed.load(Ordering::Relaxed), total);
    assert_eq!(
        produced_sum.load(Ordering::Relaxed),
        consumed_sum.load(Ordering::Relaxed)
    );
    assert_eq!(produced_sum.load(Ordering::Relaxed), total * (total + 1) / 2);
    assert_eq!(over_capacity.load(Ordering::Relaxed), 0);
    assert!(buf.is_empty());
    assert_eq!(buf.occupied(), 0);
}

#[test]
fn work_item_accessors_and_display() {
    let item = make_item(3, "Pizza Slice", 2);
    assert_eq!(item.id(), 3);
    assert_eq!(item.payload(), "Pizza Slice");
    assert_eq!(item.origin(), 2);
    assert_eq!(item.to_string(), "tray #3 (Pizza Slice, by cook 2)");
    assert_eq!(item, WorkItem::new(3, "Pizza Slice", 2));
    dispose_item(item);
}

#[test]
fn debug_reports_capacity_and_len() {
    let buf = BoundedBuffer::new(4).expect("new");
    buf.put(1u8);
    let s = format!("{buf:?}");
    assert!(s.contains("capacity: 4"));
    assert!(s.contains("len: 1"));
}
