use std::fmt;
use std::ops::{Deref, DerefMut};
use std::sync::Arc;

use cskl_common::kv::Entry;
use cskl_traits::default::{DEFAULT_MAX_LEVEL, DEFAULT_PROBABILITY, MAX_LEVEL_LIMIT};
use log::{debug, error};
use parking_lot::Mutex;
use rand::{rngs::StdRng, RngCore, SeedableRng};

use crate::arena::{Arena, NodeOffset};
use crate::error::CsklSkipListError;
use crate::iter::SkipListIter;
use crate::level::LevelGenerator;
use crate::Result;

///0 <head> --> [1] --> [2] --> [3] --> [4] --> [5] --> [6] --> [7] --> [8] --> [9] --> [10] ->
///1 <head> ----------> [2] ----------> [4] ------------------> [7] ----------> [9] --> [10] ->
///2 <head> ----------> [2] ------------------------------------[7] ----------> [9] ---------->
///3 <head> ----------> [2] --------------------------------------------------> [9] ---------->
///
/// A sorted map shared between threads.
///
/// Every operation takes the same lock for its whole duration, so concurrent
/// callers observe one sequential history. Cloning the handle shares the list.
pub struct SkipList<K, V> {
    pub(crate) inner: Arc<SkipListInner<K, V>>,
}
impl<K, V> Clone for SkipList<K, V> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}
pub(crate) struct SkipListInner<K, V> {
    pub(crate) core: Mutex<SkipListCore<K, V>>,
}
impl<K: Ord + Clone, V: Clone> SkipList<K, V> {
    /// An empty list with the default configuration.
    pub fn new() -> Self {
        Self::from_core(SkipListCore::new(LevelGenerator::from_entropy(
            DEFAULT_MAX_LEVEL,
            DEFAULT_PROBABILITY,
        )))
    }
    fn from_core(core: SkipListCore<K, V>) -> Self {
        Self {
            inner: Arc::new(SkipListInner {
                core: Mutex::new(core),
            }),
        }
    }
    /// Inserts `key`, or overwrites the value when `key` is already present.
    pub fn insert(&self, key: K, value: V) -> Entry<K, V> {
        self.inner.core.lock().insert(key, value)
    }
    pub fn remove(&self, key: &K) -> Option<Entry<K, V>> {
        self.inner.core.lock().remove(key)
    }
    pub fn search(&self, key: &K) -> Option<Entry<K, V>> {
        self.inner.core.lock().search(key).and_then(Node::entry)
    }
    pub fn contains(&self, key: &K) -> bool {
        self.inner.core.lock().search(key).is_some()
    }
    /// Overwrites the value of an existing key. Absent keys are left absent.
    pub fn update(&self, key: K, value: V) -> Option<Entry<K, V>> {
        let mut core = self.inner.core.lock();
        core.search(&key)?;
        Some(core.insert(key, value))
    }
    pub fn first(&self) -> Option<Entry<K, V>> {
        self.inner.core.lock().first().and_then(Node::entry)
    }
    pub fn remove_first(&self) -> Option<Entry<K, V>> {
        self.inner.core.lock().remove_first()
    }
    pub fn remove_all(&self) {
        let mut core = self.inner.core.lock();
        let dropped = core.len;
        core.clear();
        debug!("skip list cleared, {} entries dropped", dropped);
    }
    /// Entries accepted by `predicate`, in ascending key order.
    ///
    /// The lock is held for the whole walk; `predicate` must not call back into
    /// this list.
    pub fn filter<F>(&self, mut predicate: F) -> Vec<Entry<K, V>>
    where
        F: FnMut(&K, &V) -> bool,
    {
        let core = self.inner.core.lock();
        core.iter()
            .filter(|(k, v)| predicate(k, v))
            .map(|(k, v)| Entry::new(k.clone(), v.clone()))
            .collect()
    }
    /// Every entry, in ascending key order.
    pub fn to_vec(&self) -> Vec<Entry<K, V>> {
        let core = self.inner.core.lock();
        let mut entries = Vec::with_capacity(core.len);
        entries.extend(core.iter().map(|(k, v)| Entry::new(k.clone(), v.clone())));
        entries
    }
    pub fn len(&self) -> usize {
        self.inner.core.lock().len
    }
    pub fn is_empty(&self) -> bool {
        self.inner.core.lock().is_empty()
    }
    /// Number of levels used by at least one entry, 0 when empty.
    pub fn height(&self) -> usize {
        self.inner.core.lock().height()
    }
    pub fn max_level(&self) -> usize {
        self.inner.core.lock().max_level()
    }
    pub fn probability(&self) -> f64 {
        self.inner.core.lock().level_gen.probability()
    }
}
impl<K: Ord + Clone, V: Clone> Default for SkipList<K, V> {
    fn default() -> Self {
        Self::new()
    }
}
impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for SkipList<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let core = self.inner.core.lock();
        f.debug_map().entries(core.iter()).finish()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SkipListBuilder {
    max_level: usize,
    probability: f64,
    seed: Option<u64>,
}
impl Default for SkipListBuilder {
    fn default() -> Self {
        Self {
            max_level: DEFAULT_MAX_LEVEL,
            probability: DEFAULT_PROBABILITY,
            seed: None,
        }
    }
}
impl SkipListBuilder {
    /// Upper bound on the index height, `0 < max_level < 64`.
    pub fn set_max_level(&mut self, max_level: usize) -> &mut Self {
        self.max_level = max_level;
        self
    }
    /// Chance that a node is promoted one more level, in `(0, 1]`.
    pub fn set_probability(&mut self, probability: f64) -> &mut Self {
        self.probability = probability;
        self
    }
    /// Seeds level assignment so node heights are reproducible.
    pub fn set_seed(&mut self, seed: u64) -> &mut Self {
        self.seed = Some(seed);
        self
    }
    pub fn max_level(&self) -> usize {
        self.max_level
    }
    pub fn probability(&self) -> f64 {
        self.probability
    }
    pub fn build<K: Ord + Clone, V: Clone>(&self) -> Result<SkipList<K, V>> {
        match self.seed {
            Some(seed) => self.build_with_rng(StdRng::seed_from_u64(seed)),
            None => self.build_with_rng(StdRng::from_entropy()),
        }
    }
    /// Builds a list whose levels are drawn from `rng`.
    pub fn build_with_rng<K, V, R>(&self, rng: R) -> Result<SkipList<K, V>>
    where
        K: Ord + Clone,
        V: Clone,
        R: RngCore + Send + 'static,
    {
        self.check().inspect_err(|e| error!("rejected skip list config: {}", e))?;
        debug!(
            "skip list created: max_level={} probability={}",
            self.max_level, self.probability
        );
        let level_gen = LevelGenerator::new(self.max_level, self.probability, Box::new(rng));
        Ok(SkipList::from_core(SkipListCore::new(level_gen)))
    }
    fn check(&self) -> Result<()> {
        if self.max_level == 0 || self.max_level >= MAX_LEVEL_LIMIT {
            return Err(CsklSkipListError::InvalidMaxLevel(self.max_level));
        }
        // NaN fails both comparisons
        if !(self.probability > 0.0 && self.probability <= 1.0) {
            return Err(CsklSkipListError::InvalidProbability(self.probability));
        }
        Ok(())
    }
}

pub(crate) struct SkipListCore<K, V> {
    ///slot 0 is the head
    pub(crate) arena: Arena<Node<K, V>>,
    ///number of live entries
    pub(crate) len: usize,
    ///predecessor frontier of the last traversal, one slot per level
    pub(crate) prev_cache: Vec<NodeOffset>,
    level_gen: LevelGenerator,
}
impl<K, V> SkipListCore<K, V> {
    fn new(level_gen: LevelGenerator) -> Self {
        let max_level = level_gen.max_level();
        let mut arena = Arena::new();
        let head = arena.alloc(Node::head(max_level));
        debug_assert_eq!(head, NodeOffset::HEAD);
        Self {
            arena,
            len: 0,
            prev_cache: vec![NodeOffset::HEAD; max_level],
            level_gen,
        }
    }
    pub(crate) fn max_level(&self) -> usize {
        self.prev_cache.len()
    }
    pub(crate) fn head(&self) -> &Node<K, V> {
        &self.arena[NodeOffset::HEAD]
    }
    pub(crate) fn first(&self) -> Option<&Node<K, V>> {
        self.head().next(0).map(|n| &self.arena[n])
    }
    pub(crate) fn is_empty(&self) -> bool {
        self.head().next(0).is_none()
    }
    pub(crate) fn height(&self) -> usize {
        self.head()
            .tower
            .iter()
            .rposition(Option::is_some)
            .map_or(0, |level| level + 1)
    }
    pub(crate) fn iter(&self) -> SkipListIter<'_, K, V> {
        SkipListIter::new(self)
    }
    pub(crate) fn clear(&mut self) {
        let max_level = self.max_level();
        self.arena = Arena::new();
        self.arena.alloc(Node::head(max_level));
        self.prev_cache = vec![NodeOffset::HEAD; max_level];
        self.len = 0;
    }
}
impl<K: Ord, V> SkipListCore<K, V> {
    ///fill `prev_cache` with the last node before `key` on every level
    pub(crate) fn find_prevs(&mut self, key: &K) {
        let arena = &self.arena;
        let mut prev = NodeOffset::HEAD;
        for level in (0..self.prev_cache.len()).rev() {
            while let Some(next) = arena[prev]
                .next(level)
                .filter(|next| arena[*next].key() < Some(key))
            {
                prev = next;
            }
            self.prev_cache[level] = prev;
        }
    }
    pub(crate) fn search(&self, key: &K) -> Option<&Node<K, V>> {
        let mut prev = NodeOffset::HEAD;
        let mut next = None;
        for level in (0..self.max_level()).rev() {
            next = self.arena[prev].next(level);
            while let Some(n) = next.filter(|n| self.arena[*n].key() < Some(key)) {
                prev = n;
                next = self.arena[n].next(level);
            }
        }
        next.map(|n| &self.arena[n])
            .filter(|node| node.key() == Some(key))
    }
    pub(crate) fn remove(&mut self, key: &K) -> Option<Entry<K, V>> {
        self.find_prevs(key);
        let target = self.arena[self.prev_cache[0]].next(0)?;
        let target_key = self.arena[target].key();
        if target_key > Some(key) {
            return None;
        }
        debug_assert!(
            target_key == Some(key),
            "frontier successor sorts before the removed key"
        );
        for level in 0..self.arena[target].level() {
            let next = self.arena[target].next(level);
            let prev = self.prev_cache[level];
            debug_assert_eq!(self.arena[prev].next(level), Some(target));
            self.arena[prev].tower[level] = next;
        }
        self.len -= 1;
        let removed = self.arena.free(target).and_then(Node::into_entry);
        debug_assert_eq!(self.arena.len(), self.len + 1);
        removed
    }
    pub(crate) fn remove_first(&mut self) -> Option<Entry<K, V>> {
        let first = self.head().next(0)?;
        // the smallest key is preceded by the head on every level it occupies
        for level in 0..self.arena[first].level() {
            let next = self.arena[first].next(level);
            let head = &mut self.arena[NodeOffset::HEAD];
            debug_assert_eq!(head.next(level), Some(first));
            head.tower[level] = next;
        }
        self.len -= 1;
        self.arena.free(first).and_then(Node::into_entry)
    }
}
impl<K: Ord + Clone, V: Clone> SkipListCore<K, V> {
    pub(crate) fn insert(&mut self, key: K, value: V) -> Entry<K, V> {
        self.find_prevs(&key);
        if let Some(next) = self.arena[self.prev_cache[0]].next(0) {
            if let Some((next_key, next_value)) = self.arena[next].key_value.as_mut() {
                if *next_key <= key {
                    debug_assert!(
                        *next_key == key,
                        "frontier successor sorts before the inserted key"
                    );
                    *next_value = value.clone();
                    return Entry::new(next_key.clone(), value);
                }
            }
        }

        let level = self.level_gen.random_level();
        let entry = Entry::new(key.clone(), value.clone());
        let node = self.arena.alloc(Node::new(key, value, level));
        for h in 0..level {
            let prev = self.prev_cache[h];
            self.arena[node].tower[h] = self.arena[prev].next(h);
            self.arena[prev].tower[h] = Some(node);
        }
        self.len += 1;
        debug_assert_eq!(self.arena.len(), self.len + 1);
        entry
    }
}

#[derive(Debug, Default, Clone)]
pub(crate) struct Tower(Vec<Option<NodeOffset>>);
impl Deref for Tower {
    type Target = Vec<Option<NodeOffset>>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}
impl DerefMut for Tower {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}
#[derive(Debug)]
pub(crate) struct Node<K, V> {
    ///`None` only for the head
    key_value: Option<(K, V)>,
    ///the forward links, one per level this node occupies
    pub(crate) tower: Tower,
}
impl<K, V> Node<K, V> {
    fn new(key: K, value: V, level: usize) -> Self {
        Self {
            key_value: Some((key, value)),
            tower: Tower(vec![None; level]),
        }
    }
    fn head(max_level: usize) -> Self {
        Self {
            key_value: None,
            tower: Tower(vec![None; max_level]),
        }
    }
    /// The head has no key and orders before every `Some` key.
    #[inline]
    pub(crate) fn key(&self) -> Option<&K> {
        self.key_value.as_ref().map(|(k, _)| k)
    }
    #[inline]
    pub(crate) fn key_value(&self) -> Option<(&K, &V)> {
        self.key_value.as_ref().map(|(k, v)| (k, v))
    }
    #[inline]
    pub(crate) fn next(&self, level: usize) -> Option<NodeOffset> {
        self.tower.get(level).copied().flatten()
    }
    #[inline]
    pub(crate) fn level(&self) -> usize {
        self.tower.len()
    }
    fn into_entry(self) -> Option<Entry<K, V>> {
        self.key_value.map(Entry::from)
    }
}
impl<K: Clone, V: Clone> Node<K, V> {
    fn entry(&self) -> Option<Entry<K, V>> {
        self.key_value().map(|(k, v)| Entry::new(k.clone(), v.clone()))
    }
}
