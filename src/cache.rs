//! Shared, memoizing registry of fault class descriptors.
//!
//! Many call sites across many threads need the same [`BasicFault`] for a
//! given [`ErrorCode`]. [`BasicFaultsCache`] keeps one descriptor per code
//! and hands out cheap clones of it.
//!
//! # Concurrency
//!
//! - Hits take a shared read lock, so readers never serialize each other.
//! - Appends and misses take the exclusive write lock, one writer at a time.
//! - A miss re-checks under the write lock, so two threads missing on the
//!   same code agree on a single minted descriptor.
//!
//! A poisoned lock is recovered rather than propagated: every write leaves
//! the map in a consistent state, so a panicking writer cannot corrupt it.
//!
//! # Failure Semantics
//!
//! Lookups never fail. An unknown code yields a freshly minted descriptor
//! with component and response type unset. Nothing is ever evicted; the
//! code space is a small, bounded catalog.
//!
//! # Example
//!
//! ```rust
//! use faultline::{BasicFault, BasicFaultsCache, Classified, ErrorCode};
//!
//! const ERR_X: ErrorCode = ErrorCode::from_static("X");
//!
//! let cache = BasicFaultsCache::default();
//! cache.append_basic_faults([(ERR_X, BasicFault::new(ERR_X).with_component("svc"))]);
//!
//! assert_eq!(cache.get_basic_fault(&ERR_X).component().as_str(), "svc");
//!
//! let minted = cache.get_basic_fault(&ErrorCode::from_static("Z"));
//! assert_eq!(minted.code().as_str(), "Z");
//! assert!(minted.component().is_unset());
//! ```

use crate::{BasicFault, Classified, ErrComponent, ErrorCode};
use std::collections::HashMap;
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

/// A component's declared set of fault classes.
///
/// Usually implemented through [`define_fault_codes!`](crate::define_fault_codes),
/// then registered explicitly against a cache instance at start-up.
pub trait FaultCatalog {
    /// Component owning every class in this catalog.
    fn component(&self) -> ErrComponent;

    /// Fully configured descriptors, one per code.
    fn basic_faults(&self) -> Vec<BasicFault>;
}

/// Thread-safe code → descriptor registry.
///
/// Share it by reference (or inside an `Arc`) with everything that produces
/// faults; it is `Send + Sync`.
#[derive(Debug, Default)]
pub struct BasicFaultsCache {
    basic_faults: RwLock<HashMap<ErrorCode, BasicFault>>,
}

impl BasicFaultsCache {
    /// Cache pre-populated with `seed`.
    pub fn new(seed: HashMap<ErrorCode, BasicFault>) -> Self {
        Self {
            basic_faults: RwLock::new(seed),
        }
    }

    #[inline]
    fn read_map(&self) -> RwLockReadGuard<'_, HashMap<ErrorCode, BasicFault>> {
        match self.basic_faults.read() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    #[inline]
    fn write_map(&self) -> RwLockWriteGuard<'_, HashMap<ErrorCode, BasicFault>> {
        match self.basic_faults.write() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }

    /// Merge `basic_faults` into the cache. Existing codes are overwritten.
    pub fn append_basic_faults<I>(&self, basic_faults: I)
    where
        I: IntoIterator<Item = (ErrorCode, BasicFault)>,
    {
        let mut map = self.write_map();
        let before = map.len();
        map.extend(basic_faults);
        tracing::trace!(
            added = map.len() - before,
            total = map.len(),
            "appended basic faults"
        );
    }

    /// Append every descriptor of `catalog`, keyed by its own code.
    pub fn register<C: FaultCatalog + ?Sized>(&self, catalog: &C) {
        let component = catalog.component();
        let classes = catalog.basic_faults();
        tracing::debug!(%component, count = classes.len(), "registering fault catalog");
        self.append_basic_faults(
            classes
                .into_iter()
                .map(|class| (class.code().clone(), class)),
        );
    }

    /// Descriptor for `code`, minting and memoizing a bare one on a miss.
    pub fn get_basic_fault(&self, code: &ErrorCode) -> BasicFault {
        if let Some(class) = self.read_map().get(code) {
            return class.clone();
        }

        let mut map = self.write_map();
        map.entry(code.clone())
            .or_insert_with(|| {
                tracing::debug!(%code, "minting basic fault for unregistered code");
                BasicFault::new(code.clone())
            })
            .clone()
    }

    /// Whether `code` currently has a descriptor.
    pub fn contains(&self, code: &ErrorCode) -> bool {
        self.read_map().contains_key(code)
    }

    /// Number of memoized descriptors.
    pub fn len(&self) -> usize {
        self.read_map().len()
    }

    /// Whether nothing has been registered or minted yet.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::CapturedOutput;
    use std::sync::{Arc, Barrier};
    use std::thread;

    const ERR_X: ErrorCode = ErrorCode::from_static("X");
    const ERR_Y: ErrorCode = ErrorCode::from_static("Y");
    const ERR_Z: ErrorCode = ErrorCode::from_static("Z");

    #[test]
    fn seeded_entries_are_returned() {
        let class = BasicFault::new(ERR_X).with_component("seeded");
        let cache = BasicFaultsCache::new(HashMap::from([(ERR_X, class)]));

        assert_eq!(
            cache.get_basic_fault(&ERR_X).component().as_str(),
            "seeded"
        );
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn append_then_lookup_and_mint() {
        let cache = BasicFaultsCache::default();
        let bf_x = BasicFault::new(ERR_X)
            .with_component("cx")
            .with_response_type("rx");
        let bf_y = BasicFault::new(ERR_Y).with_component("cy");
        cache.append_basic_faults([(ERR_X, bf_x.clone()), (ERR_Y, bf_y)]);

        assert_eq!(cache.get_basic_fault(&ERR_X), bf_x);

        let minted = cache.get_basic_fault(&ERR_Z);
        assert_eq!(minted.code(), &ERR_Z);
        assert_eq!(minted.component().as_str(), "");
        assert!(minted.response_type().is_unset());
        assert!(cache.contains(&ERR_Z));
        assert_eq!(cache.len(), 3);
    }

    #[test]
    fn append_overwrites_existing_codes() {
        let cache = BasicFaultsCache::default();
        cache.append_basic_faults([(ERR_X, BasicFault::new(ERR_X).with_component("old"))]);
        cache.append_basic_faults([(ERR_X, BasicFault::new(ERR_X).with_component("new"))]);

        assert_eq!(cache.get_basic_fault(&ERR_X).component().as_str(), "new");
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn append_overwrites_minted_descriptor() {
        let cache = BasicFaultsCache::default();
        assert!(cache.get_basic_fault(&ERR_X).component().is_unset());

        cache.append_basic_faults([(ERR_X, BasicFault::new(ERR_X).with_component("late"))]);
        assert_eq!(cache.get_basic_fault(&ERR_X).component().as_str(), "late");
    }

    #[test]
    fn repeated_lookups_are_memoized() {
        let cache = BasicFaultsCache::default();
        let first = cache.get_basic_fault(&ERR_Z);
        let second = cache.get_basic_fault(&ERR_Z);

        assert_eq!(first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn key_is_authoritative_over_descriptor_code() {
        // The map key decides the lookup, even if it disagrees with the descriptor.
        let cache = BasicFaultsCache::default();
        cache.append_basic_faults([(ERR_X, BasicFault::new(ERR_Y))]);
        assert_eq!(cache.get_basic_fault(&ERR_X).code(), &ERR_Y);
    }

    #[test]
    fn concurrent_misses_agree_on_one_entry() {
        let cache = Arc::new(BasicFaultsCache::default());
        let barrier = Arc::new(Barrier::new(8));
        let mut handles = vec![];

        for _ in 0..8 {
            let cache = Arc::clone(&cache);
            let barrier = Arc::clone(&barrier);
            handles.push(thread::spawn(move || {
                barrier.wait();
                (0..100)
                    .map(|i| ErrorCode::from(format!("CODE{:03}", i % 10)))
                    .map(|code| cache.get_basic_fault(&code))
                    .collect::<Vec<_>>()
            }));
        }

        for handle in handles {
            let classes = handle.join().unwrap();
            assert_eq!(classes.len(), 100);
            for (i, class) in classes.iter().enumerate() {
                assert_eq!(class.code().as_str(), format!("CODE{:03}", i % 10));
            }
        }

        assert_eq!(cache.len(), 10);
    }

    #[test]
    fn concurrent_readers_and_writers() {
        let cache = BasicFaultsCache::default();
        cache.append_basic_faults([(ERR_X, BasicFault::new(ERR_X).with_component("v0"))]);

        thread::scope(|scope| {
            scope.spawn(|| {
                for round in 1..=50 {
                    let class = BasicFault::new(ERR_X).with_component(format!("v{round}"));
                    cache.append_basic_faults([(ERR_X, class)]);
                }
            });
            for _ in 0..4 {
                scope.spawn(|| {
                    for _ in 0..200 {
                        let class = cache.get_basic_fault(&ERR_X);
                        assert_eq!(class.code(), &ERR_X);
                        assert!(class.component().as_str().starts_with('v'));
                    }
                });
            }
        });

        assert_eq!(cache.get_basic_fault(&ERR_X).component().as_str(), "v50");
    }

    #[test]
    fn logs_appends_at_trace_and_mints_at_debug() {
        let output = CapturedOutput::default();
        let subscriber = tracing_subscriber::fmt()
            .with_writer(output.clone())
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            let cache = BasicFaultsCache::default();
            cache.append_basic_faults([(ERR_X, BasicFault::new(ERR_X))]);
            let _ = cache.get_basic_fault(&ERR_X);
            let _ = cache.get_basic_fault(&ERR_Z);
            let _ = cache.get_basic_fault(&ERR_Z);
        });

        let text = output.contents();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2, "{text}");

        assert!(lines[0].contains("TRACE"), "{}", lines[0]);
        assert!(lines[0].contains("appended basic faults"), "{}", lines[0]);
        assert!(lines[0].contains("added=1"), "{}", lines[0]);

        assert!(lines[1].contains("DEBUG"), "{}", lines[1]);
        assert!(lines[1].contains("minting basic fault"), "{}", lines[1]);
        assert!(lines[1].contains("code=Z"), "{}", lines[1]);
    }

    #[test]
    fn recovers_from_poisoned_lock() {
        let cache = Arc::new(BasicFaultsCache::default());
        cache.append_basic_faults([(ERR_X, BasicFault::new(ERR_X))]);

        let poisoner = Arc::clone(&cache);
        let _ = thread::spawn(move || {
            let _guard = poisoner.write_map();
            panic!("poison the cache lock");
        })
        .join();

        assert!(cache.contains(&ERR_X));
        assert_eq!(cache.get_basic_fault(&ERR_Y).code(), &ERR_Y);
    }
}
