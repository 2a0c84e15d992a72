use std::error::Error;
use std::fmt::Display;

use cskl_common::kv::Entry;
use thiserror::Error;

//需满足并发安全
pub trait SkipListTrait<K: Ord, V>: Send + Sync + 'static {
    type ErrorType: Into<SkipListError>;
    fn new(max_level: usize, probability: f64) -> Result<Self, SkipListError>
    where
        Self: Sized;
    fn with_defaults() -> Self
    where
        Self: Sized;
    fn insert(&self, key: K, value: V) -> Entry<K, V>;
    fn remove(&self, key: &K) -> Option<Entry<K, V>>;
    fn search(&self, key: &K) -> Option<Entry<K, V>>;
    fn len(&self) -> usize;
    fn is_empty(&self) -> bool;
    fn height(&self) -> usize;
    fn to_vec(&self) -> Vec<Entry<K, V>>;

    fn contains(&self, key: &K) -> bool {
        self.search(key).is_some()
    }
}
#[derive(Error, Debug)]
pub struct SkipListError(Box<dyn Error + Send + Sync>);
impl SkipListError {
    pub fn new<E: Error + Send + Sync + 'static>(error: E) -> Self {
        SkipListError(Box::new(error))
    }
    pub fn downcast_ref<E: Error + 'static>(&self) -> Option<&E> {
        self.0.downcast_ref::<E>()
    }
}
impl Display for SkipListError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SkipList Error: {}", self.0)
    }
}
