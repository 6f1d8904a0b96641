// Concurrency tests for levelbloom
// A shared configuration and shared filter blobs are read from many threads
// without locking.

use levelbloom::{BloomFilterPolicy, FilterConfig, FilterPolicy};
use std::sync::{Arc, Barrier};
use std::thread;

fn keys_for(thread_id: usize, count: usize) -> Vec<Vec<u8>> {
    (0..count)
        .map(|i| format!("thread_{}_key_{}", thread_id, i).into_bytes())
        .collect()
}

/// Test concurrent filter builds against one shared policy
#[test]
fn test_concurrent_builds() {
    let policy = Arc::new(BloomFilterPolicy::new(FilterConfig::new(vec![10, 8, 6])));
    let num_threads = 8;
    let barrier = Arc::new(Barrier::new(num_threads));

    let mut handles = vec![];

    for thread_id in 0..num_threads {
        let policy_clone = Arc::clone(&policy);
        let barrier_clone = Arc::clone(&barrier);
        let handle = thread::spawn(move || {
            barrier_clone.wait(); // Synchronize start

            let keys = keys_for(thread_id, 1000);
            let refs: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();
            let level = thread_id % 3;

            let mut filter = Vec::new();
            policy_clone.create_filter(&refs, level, &mut filter).unwrap();

            for key in &keys {
                assert!(
                    policy_clone.key_may_match(key, &filter),
                    "Thread {} lost key {:?}",
                    thread_id,
                    String::from_utf8_lossy(key)
                );
            }
            (level, filter)
        });
        handles.push(handle);
    }

    // Concurrent builds must match a sequential build byte for byte
    for (thread_id, handle) in handles.into_iter().enumerate() {
        let (level, filter) = handle.join().unwrap();

        let keys = keys_for(thread_id, 1000);
        let refs: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();
        let mut expected = Vec::new();
        policy.create_filter(&refs, level, &mut expected).unwrap();

        assert_eq!(filter, expected);
    }
}

/// Test concurrent queries against one shared filter
#[test]
fn test_concurrent_queries_same_filter() {
    let policy = BloomFilterPolicy::new(FilterConfig::default());
    let keys = keys_for(0, 5000);
    let refs: Vec<&[u8]> = keys.iter().map(|k| k.as_slice()).collect();

    let mut filter = Vec::new();
    policy.create_filter(&refs, 0, &mut filter).unwrap();

    let absent_keys: Vec<String> = (0..5000).map(|i| format!("absent_key_{}", i)).collect();
    let expected_misses = absent_keys
        .iter()
        .filter(|key| !levelbloom::key_may_match(key.as_bytes(), &filter))
        .count();
    assert!(expected_misses > 0);

    let filter = Arc::new(filter);
    let keys = Arc::new(keys);
    let absent_keys = Arc::new(absent_keys);
    let num_threads = 16;

    let mut handles = vec![];

    for _ in 0..num_threads {
        let filter_clone = Arc::clone(&filter);
        let keys_clone = Arc::clone(&keys);
        let absent_clone = Arc::clone(&absent_keys);
        let handle = thread::spawn(move || {
            let mut misses = 0;
            for key in keys_clone.iter() {
                assert!(levelbloom::key_may_match(key, &filter_clone));
            }
            for key in absent_clone.iter() {
                if !levelbloom::key_may_match(key.as_bytes(), &filter_clone) {
                    misses += 1;
                }
            }
            misses
        });
        handles.push(handle);
    }

    // Every thread sees the same answers as a single-threaded pass
    for (thread_id, handle) in handles.into_iter().enumerate() {
        let misses = handle.join().unwrap();
        assert_eq!(misses, expected_misses, "Thread {} disagrees", thread_id);
    }
}
