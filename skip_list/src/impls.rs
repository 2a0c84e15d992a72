use cskl_common::kv::Entry;
use cskl_traits::skip_list::{SkipListError, SkipListTrait};

use crate::{
    error::CsklSkipListError,
    skip_list::{SkipList, SkipListBuilder},
};

type Result<T> = std::result::Result<T, SkipListError>;

impl<K, V> SkipListTrait<K, V> for SkipList<K, V>
where
    K: Ord + Clone + Send + 'static,
    V: Clone + Send + 'static,
{
    type ErrorType = CsklSkipListError;

    fn new(max_level: usize, probability: f64) -> Result<Self>
    where
        Self: Sized,
    {
        Ok(SkipListBuilder::default()
            .set_max_level(max_level)
            .set_probability(probability)
            .build()?)
    }

    fn with_defaults() -> Self {
        SkipList::new()
    }

    fn insert(&self, key: K, value: V) -> Entry<K, V> {
        SkipList::insert(self, key, value)
    }

    fn remove(&self, key: &K) -> Option<Entry<K, V>> {
        SkipList::remove(self, key)
    }

    fn search(&self, key: &K) -> Option<Entry<K, V>> {
        SkipList::search(self, key)
    }

    fn len(&self) -> usize {
        SkipList::len(self)
    }

    fn is_empty(&self) -> bool {
        SkipList::is_empty(self)
    }

    fn height(&self) -> usize {
        SkipList::height(self)
    }

    fn to_vec(&self) -> Vec<Entry<K, V>> {
        SkipList::to_vec(self)
    }

    fn contains(&self, key: &K) -> bool {
        SkipList::contains(self, key)
    }
}
impl From<CsklSkipListError> for SkipListError {
    fn from(val: CsklSkipListError) -> Self {
        SkipListError::new(val)
    }
}
