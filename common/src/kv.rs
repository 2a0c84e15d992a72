/// A key-value snapshot taken from a skip list while its lock was held.
///
/// Entries are owned copies: changing the list afterwards does not change an
/// entry that was already handed out.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Entry<K, V> {
    key: K,
    value: V,
}

impl<K, V> Entry<K, V> {
    pub fn new(key: K, value: V) -> Self {
        Self { key, value }
    }
    pub fn key(&self) -> &K {
        &self.key
    }
    pub fn value(&self) -> &V {
        &self.value
    }
    pub fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }
    pub fn into_inner(self) -> (K, V) {
        (self.key, self.value)
    }
}
impl<K, V> From<(K, V)> for Entry<K, V> {
    fn from((key, value): (K, V)) -> Self {
        Self::new(key, value)
    }
}
impl<K, V> From<Entry<K, V>> for (K, V) {
    fn from(entry: Entry<K, V>) -> Self {
        entry.into_inner()
    }
}
