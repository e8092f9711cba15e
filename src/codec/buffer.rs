//! Growable FIFO buffer used as the exchange medium between encoder and decoder.

use std::collections::VecDeque;

/// Ordered sequence supporting append-at-tail and remove-at-head
///
/// Removing from an empty buffer yields `None`; callers map that to a decode
/// error instead of fabricating data.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Buffer<T> {
    items: VecDeque<T>,
}

/// The buffer readings are encoded into
pub type ByteBuffer = Buffer<u8>;

impl<T: Copy> Buffer<T> {
    pub fn new() -> Self {
        Buffer {
            items: VecDeque::new(),
        }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Buffer {
            items: VecDeque::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn append(&mut self, item: T) {
        self.items.push_back(item);
    }

    #[inline]
    pub fn append_n(&mut self, items: &[T]) {
        self.items.extend(items.iter().copied());
    }

    /// Move every item of `other` to the tail, preserving order
    pub fn append_buffer(&mut self, mut other: Buffer<T>) {
        self.items.append(&mut other.items);
    }

    #[inline]
    pub fn remove_front(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    #[inline]
    pub fn peek_front(&self) -> Option<T> {
        self.items.front().copied()
    }

    /// Remove exactly `N` items from the head, or nothing if fewer are buffered
    pub fn remove_array<const N: usize>(&mut self) -> Option<[T; N]>
    where
        T: Default,
    {
        if self.items.len() < N {
            return None;
        }
        let mut out = [T::default(); N];
        for (slot, item) in out.iter_mut().zip(self.items.drain(..N)) {
            *slot = item;
        }
        Some(out)
    }

    /// Index of the first item matching `pred`, counted from the head
    pub fn position<F: FnMut(&T) -> bool>(&self, pred: F) -> Option<usize> {
        self.items.iter().position(pred)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn to_vec(&self) -> Vec<T> {
        self.items.iter().copied().collect()
    }
}

impl<T: Copy> From<Vec<T>> for Buffer<T> {
    fn from(items: Vec<T>) -> Self {
        Buffer {
            items: VecDeque::from(items),
        }
    }
}

impl<T: Copy> From<&[T]> for Buffer<T> {
    fn from(items: &[T]) -> Self {
        Buffer {
            items: items.iter().copied().collect(),
        }
    }
}

impl<T: Copy> From<Buffer<T>> for Vec<T> {
    fn from(buf: Buffer<T>) -> Self {
        buf.items.into()
    }
}
