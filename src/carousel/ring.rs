//! Fixed-size circular buffer with a rotating head.
//!
//! Rotation moves the head index instead of shifting elements, so every
//! element keeps its storage slot (and identity) for the lifetime of the
//! ring. Only the mapping from ring position to storage slot changes.

/// A non-empty ring of `T` addressed by position, where position 0 is the
/// front.
#[derive(Debug, Clone)]
pub struct Ring<T> {
    slots: Vec<T>,
    /// Storage index currently at ring position 0.
    head: usize,
}

impl<T> Ring<T> {
    /// Build a ring in the given order. Returns `None` for an empty input.
    pub fn new(items: Vec<T>) -> Option<Self> {
        if items.is_empty() {
            return None;
        }
        Some(Self {
            slots: items,
            head: 0,
        })
    }

    /// Number of elements. Never zero.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Always `false`; present for API symmetry with collections.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn storage_index(&self, position: usize) -> usize {
        (self.head + position) % self.slots.len()
    }

    /// Element at ring position `position` (wraps around).
    pub fn get(&self, position: usize) -> &T {
        &self.slots[self.storage_index(position)]
    }

    /// Mutable element at ring position `position` (wraps around).
    pub fn get_mut(&mut self, position: usize) -> &mut T {
        let index = self.storage_index(position);
        &mut self.slots[index]
    }

    /// Element at position 0.
    pub fn front(&self) -> &T {
        self.get(0)
    }

    /// Move the front element to the back: `[A,B,C]` → `[B,C,A]`.
    pub fn rotate_forward(&mut self) {
        self.head = (self.head + 1) % self.slots.len();
    }

    /// Move the back element to the front: `[A,B,C]` → `[C,A,B]`.
    pub fn rotate_backward(&mut self) {
        self.head = (self.head + self.slots.len() - 1) % self.slots.len();
    }

    /// Elements in ring order, front first.
    pub fn iter(&self) -> impl Iterator<Item = &T> + '_ {
        (0..self.slots.len()).map(move |position| self.get(position))
    }

    /// Elements in ring order with their positions, front first.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (usize, &mut T)> {
        let (tail, front) = self.slots.split_at_mut(self.head);
        front.iter_mut().chain(tail.iter_mut()).enumerate()
    }

    /// Elements in storage order (construction order, independent of
    /// rotation).
    pub fn storage(&self) -> &[T] {
        &self.slots
    }

    /// Mutable elements in storage order.
    pub fn storage_mut(&mut self) -> &mut [T] {
        &mut self.slots
    }

    /// Ring position of the first element matching `pred`.
    pub fn position_of(&self, mut pred: impl FnMut(&T) -> bool) -> Option<usize> {
        self.iter().position(|item| pred(item))
    }
}
