use crate::arena::NodeOffset;
use crate::skip_list::SkipListCore;

/// Walks level 0 from the head, yielding entries in ascending key order.
///
/// Borrows the core, so it only exists while the list lock is held.
pub(crate) struct SkipListIter<'a, K, V> {
    inner: &'a SkipListCore<K, V>,
    node: Option<NodeOffset>,
}
impl<'a, K, V> SkipListIter<'a, K, V> {
    pub(crate) fn new(inner: &'a SkipListCore<K, V>) -> Self {
        SkipListIter {
            inner,
            node: inner.head().next(0),
        }
    }
}
impl<'a, K, V> Iterator for SkipListIter<'a, K, V> {
    type Item = (&'a K, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let inner = self.inner;
        let node = inner.arena.get(self.node?)?;
        self.node = node.next(0);
        node.key_value()
    }
    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.node {
            Some(_) => (1, Some(self.inner.len)),
            None => (0, Some(0)),
        }
    }
}
impl<K, V> std::iter::FusedIterator for SkipListIter<'_, K, V> {}
