//! `Fifo<T>` — an explicit pop-front queue.
//!
//! Stops and external checkpoints are both consumed strictly front-to-back
//! as the simulated day advances.  Wrapping `VecDeque` in a named type keeps
//! the pop-front semantics explicit at every call site instead of leaving
//! them implied by `Vec::remove(0)`-style usage.

use std::collections::VecDeque;

#[derive(Clone, Debug, Default)]
pub struct Fifo<T> {
    inner: VecDeque<T>,
}

impl<T> Fifo<T> {
    pub fn new() -> Self {
        Self { inner: VecDeque::new() }
    }

    pub fn push_back(&mut self, item: T) {
        self.inner.push_back(item);
    }

    /// The next item to be consumed, without removing it.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.inner.front()
    }

    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.inner.pop_front()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.inner.iter()
    }
}

impl<T> From<Vec<T>> for Fifo<T> {
    /// Build a queue that pops items in the order of the vec.
    fn from(items: Vec<T>) -> Self {
        Self { inner: items.into() }
    }
}

impl<T> FromIterator<T> for Fifo<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self { inner: iter.into_iter().collect() }
    }
}
