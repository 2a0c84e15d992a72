use std::ops::{Index, IndexMut};

/// Stable address of a node inside an [`Arena`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub(crate) struct NodeOffset(usize);
impl NodeOffset {
    pub(crate) const HEAD: NodeOffset = NodeOffset(0);
}

/// Slot storage for skip list nodes.
///
/// A freed slot goes on the free list and is handed out again by the next
/// [`Arena::alloc`], so offsets stay small under insert/remove churn.
#[derive(Debug)]
pub(crate) struct Arena<T> {
    slots: Vec<Option<T>>,
    free: Vec<NodeOffset>,
    len: usize,
}
impl<T> Arena<T> {
    pub(crate) fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            len: 0,
        }
    }
    pub(crate) fn alloc(&mut self, value: T) -> NodeOffset {
        self.len += 1;
        match self.free.pop() {
            Some(offset) => {
                debug_assert!(self.slots[offset.0].is_none());
                self.slots[offset.0] = Some(value);
                offset
            }
            None => {
                self.slots.push(Some(value));
                NodeOffset(self.slots.len() - 1)
            }
        }
    }
    /// Releases the slot and returns what it held.
    ///
    /// Returns `None` when the slot was already free.
    pub(crate) fn free(&mut self, offset: NodeOffset) -> Option<T> {
        let value = self.slots.get_mut(offset.0)?.take()?;
        self.free.push(offset);
        self.len -= 1;
        Some(value)
    }
    pub(crate) fn get(&self, offset: NodeOffset) -> Option<&T> {
        self.slots.get(offset.0)?.as_ref()
    }
    /// Number of occupied slots.
    pub(crate) fn len(&self) -> usize {
        self.len
    }
    #[cfg(test)]
    pub(crate) fn capacity(&self) -> usize {
        self.slots.len()
    }
}
impl<T> Index<NodeOffset> for Arena<T> {
    type Output = T;

    #[inline]
    fn index(&self, offset: NodeOffset) -> &T {
        match self.slots.get(offset.0) {
            Some(Some(value)) => value,
            _ => panic!("dangling node offset {}", offset.0),
        }
    }
}
impl<T> IndexMut<NodeOffset> for Arena<T> {
    #[inline]
    fn index_mut(&mut self, offset: NodeOffset) -> &mut T {
        match self.slots.get_mut(offset.0) {
            Some(Some(value)) => value,
            _ => panic!("dangling node offset {}", offset.0),
        }
    }
}
