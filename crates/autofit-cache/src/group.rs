#![forbid(unsafe_code)]

//! Shared group result cache.
//!
//! Elements tagged with the same [`GroupKey`] converge on one font size: the
//! first element to finish a search records its size, and every other member
//! of the group adopts it instead of searching.
//!
//! # Thread Safety
//!
//! [`ResultCache`] keeps its entries behind an internal `RwLock`. Recording a
//! size is a single write-locked check-and-insert, so two elements racing on
//! an empty group can never leave two entries behind.
//!
//! # Example
//! ```
//! use autofit_cache::{ElementId, GroupKey, RecordOutcome, ResultCache};
//!
//! let cache = ResultCache::new();
//! let (a, b) = (ElementId::next(), ElementId::next());
//! let totals = GroupKey::from("totals");
//!
//! assert_eq!(cache.record(totals.clone(), a, 12), RecordOutcome::Inserted);
//! assert_eq!(cache.adoptable(&totals, b), Some(12));
//! assert_eq!(cache.adoptable(&totals, a), None);
//! ```

use std::collections::HashMap;
use std::fmt;
use std::num::NonZeroU64;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

/// Tag shared by elements that must render at the same size.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GroupKey(pub String);

impl GroupKey {
    /// Create a new key.
    #[inline]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Get the name as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for GroupKey {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for GroupKey {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl AsRef<str> for GroupKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Process-unique identity of a sizing element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(NonZeroU64);

impl ElementId {
    /// Allocate a fresh id.
    pub fn next() -> Self {
        static NEXT_ID: AtomicU64 = AtomicU64::new(1);
        let raw = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        Self(NonZeroU64::new(raw).unwrap_or(NonZeroU64::MIN))
    }

    /// Raw numeric value.
    #[inline]
    pub const fn get(self) -> u64 {
        self.0.get()
    }
}

impl fmt::Display for ElementId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// A settled group size and the element that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GroupEntry {
    pub owner: ElementId,
    pub size: u32,
}

/// What [`ResultCache::record`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordOutcome {
    /// The group had no entry; this element now owns it.
    Inserted,
    /// This element already owned the entry; its size was replaced.
    Updated,
    /// Another element owns the entry; nothing changed.
    Settled { owner: ElementId, size: u32 },
}

/// Counters for cache activity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResultCacheStats {
    pub adoptions: u64,
    pub inserts: u64,
    pub updates: u64,
    pub settled: u64,
    pub clears: u64,
    pub entries: usize,
}

/// Group key -> settled size map shared by every element of a scope.
#[derive(Debug, Default)]
pub struct ResultCache {
    entries: RwLock<HashMap<GroupKey, GroupEntry>>,
    tearing_down: AtomicBool,
    adoptions: AtomicU64,
    inserts: AtomicU64,
    updates: AtomicU64,
    settled: AtomicU64,
    clears: AtomicU64,
}

impl ResultCache {
    /// Create an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Size `id` should adopt for `group`, if any.
    ///
    /// Only elements that own no entry adopt; an element that already
    /// recorded a size keeps searching for itself.
    pub fn adoptable(&self, group: &GroupKey, id: ElementId) -> Option<u32> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        if entries.values().any(|entry| entry.owner == id) {
            return None;
        }
        let size = entries.get(group).map(|entry| entry.size)?;
        self.adoptions.fetch_add(1, Ordering::Relaxed);
        Some(size)
    }

    /// Current entry for `group`.
    pub fn lookup(&self, group: &GroupKey) -> Option<GroupEntry> {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(group)
            .copied()
    }

    /// Check whether `id` owns any entry.
    pub fn owns_entry(&self, id: ElementId) -> bool {
        self.entries
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .values()
            .any(|entry| entry.owner == id)
    }

    /// Record a searched size for `group`.
    ///
    /// The first writer wins: an entry owned by another element is left
    /// as it is.
    pub fn record(&self, group: GroupKey, id: ElementId, size: u32) -> RecordOutcome {
        use std::collections::hash_map::Entry;

        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        match entries.entry(group) {
            Entry::Vacant(slot) => {
                slot.insert(GroupEntry { owner: id, size });
                self.inserts.fetch_add(1, Ordering::Relaxed);
                RecordOutcome::Inserted
            }
            Entry::Occupied(mut slot) if slot.get().owner == id => {
                slot.get_mut().size = size;
                self.updates.fetch_add(1, Ordering::Relaxed);
                RecordOutcome::Updated
            }
            Entry::Occupied(slot) => {
                let GroupEntry { owner, size } = *slot.get();
                self.settled.fetch_add(1, Ordering::Relaxed);
                RecordOutcome::Settled { owner, size }
            }
        }
    }

    /// Remove a single group, returning its entry.
    pub fn remove_group(&self, group: &GroupKey) -> Option<GroupEntry> {
        self.entries
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .remove(group)
    }

    /// Remove every entry, returning how many there were.
    pub fn clear(&self) -> usize {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        let removed = entries.len();
        entries.clear();
        self.clears.fetch_add(1, Ordering::Relaxed);
        removed
    }

    /// Number of settled groups.
    pub fn len(&self) -> usize {
        self.entries.read().unwrap_or_else(|e| e.into_inner()).len()
    }

    /// Check whether no group is settled.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Mark the owning scope as tearing down. Every adjustment clears the
    /// cache until [`end_teardown`](Self::end_teardown) is called.
    pub fn begin_teardown(&self) {
        self.tearing_down.store(true, Ordering::Release);
    }

    /// Leave teardown mode.
    pub fn end_teardown(&self) {
        self.tearing_down.store(false, Ordering::Release);
    }

    /// Check whether the owning scope is tearing down.
    pub fn is_tearing_down(&self) -> bool {
        self.tearing_down.load(Ordering::Acquire)
    }

    /// Snapshot of the activity counters.
    pub fn stats(&self) -> ResultCacheStats {
        ResultCacheStats {
            adoptions: self.adoptions.load(Ordering::Relaxed),
            inserts: self.inserts.load(Ordering::Relaxed),
            updates: self.updates.load(Ordering::Relaxed),
            settled: self.settled.load(Ordering::Relaxed),
            clears: self.clears.load(Ordering::Relaxed),
            entries: self.len(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    fn key(name: &str) -> GroupKey {
        GroupKey::from(name)
    }

    #[test]
    fn element_ids_are_unique_and_increasing() {
        let a = ElementId::next();
        let b = ElementId::next();
        assert_ne!(a, b);
        assert!(b > a);
        assert!(a.get() > 0);
    }

    #[test]
    fn group_key_conversions() {
        assert_eq!(GroupKey::new("x"), GroupKey::from("x"));
        assert_eq!(GroupKey::from(String::from("x")).as_str(), "x");
        assert_eq!(key("totals").to_string(), "totals");
    }

    #[test]
    fn first_record_inserts() {
        let cache = ResultCache::new();
        let a = ElementId::next();
        assert_eq!(cache.record(key("g"), a, 12), RecordOutcome::Inserted);
        assert_eq!(cache.lookup(&key("g")), Some(GroupEntry { owner: a, size: 12 }));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn owner_updates_its_entry() {
        let cache = ResultCache::new();
        let a = ElementId::next();
        cache.record(key("g"), a, 12);
        assert_eq!(cache.record(key("g"), a, 10), RecordOutcome::Updated);
        assert_eq!(cache.lookup(&key("g")).map(|e| e.size), Some(10));
    }

    #[test]
    fn second_writer_leaves_entry_settled() {
        let cache = ResultCache::new();
        let (a, b) = (ElementId::next(), ElementId::next());
        cache.record(key("g"), a, 12);
        assert_eq!(
            cache.record(key("g"), b, 9),
            RecordOutcome::Settled { owner: a, size: 12 }
        );
        assert_eq!(cache.lookup(&key("g")), Some(GroupEntry { owner: a, size: 12 }));
    }

    #[test]
    fn adoptable_requires_foreign_entry_and_no_ownership() {
        let cache = ResultCache::new();
        let (a, b) = (ElementId::next(), ElementId::next());
        assert_eq!(cache.adoptable(&key("g"), b), None);

        cache.record(key("g"), a, 12);
        assert_eq!(cache.adoptable(&key("g"), a), None);
        assert_eq!(cache.adoptable(&key("g"), b), Some(12));

        // b owns another group, so it no longer adopts.
        cache.record(key("h"), b, 8);
        assert_eq!(cache.adoptable(&key("g"), b), None);
        assert!(cache.owns_entry(b));
    }

    #[test]
    fn remove_group_and_clear() {
        let cache = ResultCache::new();
        let a = ElementId::next();
        cache.record(key("g"), a, 12);
        cache.record(key("h"), a, 14);
        assert_eq!(cache.remove_group(&key("g")).map(|e| e.size), Some(12));
        assert_eq!(cache.remove_group(&key("g")), None);
        assert_eq!(cache.clear(), 1);
        assert!(cache.is_empty());
        assert!(!cache.owns_entry(a));
    }

    #[test]
    fn teardown_flag_toggles() {
        let cache = ResultCache::new();
        assert!(!cache.is_tearing_down());
        cache.begin_teardown();
        assert!(cache.is_tearing_down());
        cache.end_teardown();
        assert!(!cache.is_tearing_down());
    }

    #[test]
    fn stats_count_activity() {
        let cache = ResultCache::new();
        let (a, b) = (ElementId::next(), ElementId::next());
        cache.record(key("g"), a, 12);
        cache.record(key("g"), a, 11);
        cache.record(key("g"), b, 9);
        cache.adoptable(&key("g"), b);
        cache.clear();

        let stats = cache.stats();
        assert_eq!(stats.inserts, 1);
        assert_eq!(stats.updates, 1);
        assert_eq!(stats.settled, 1);
        assert_eq!(stats.adoptions, 1);
        assert_eq!(stats.clears, 1);
        assert_eq!(stats.entries, 0);
    }

    #[test]
    fn concurrent_writers_leave_one_entry() {
        let cache = Arc::new(ResultCache::new());
        let handles: Vec<_> = (0..8u32)
            .map(|i| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || cache.record(key("race"), ElementId::next(), 10 + i))
            })
            .collect();
        let outcomes: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();

        assert_eq!(
            outcomes
                .iter()
                .filter(|o| **o == RecordOutcome::Inserted)
                .count(),
            1
        );
        assert_eq!(cache.len(), 1);
        let entry = cache.lookup(&key("race")).unwrap();
        for outcome in outcomes {
            if let RecordOutcome::Settled { owner, size } = outcome {
                assert_eq!(GroupEntry { owner, size }, entry);
            }
        }
    }

    #[test]
    fn cache_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ResultCache>();
    }
}
