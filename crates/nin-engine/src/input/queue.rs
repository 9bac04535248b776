use std::collections::VecDeque;

/// Default number of events kept per queue.
pub const DEFAULT_QUEUE_CAPACITY: usize = 16;

/// Bounded FIFO of input events.
///
/// When full, the oldest event is dropped to make room.
#[derive(Debug, Clone)]
pub struct EventQueue<T> {
    items: VecDeque<T>,
    capacity: usize,
}

impl<T> EventQueue<T> {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            items: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends `item`; returns `true` if an older event had to be dropped.
    pub fn push(&mut self, item: T) -> bool {
        let dropped = self.items.len() >= self.capacity;
        if dropped {
            self.items.pop_front();
        }
        self.items.push_back(item);
        dropped
    }

    /// Removes and returns the oldest event.
    pub fn pop(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    /// Removes all events in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = T> + '_ {
        self.items.drain(..)
    }

    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.items.iter()
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl<T> Default for EventQueue<T> {
    fn default() -> Self {
        Self::with_capacity(DEFAULT_QUEUE_CAPACITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn preserves_arrival_order() {
        let mut q = EventQueue::default();
        for c in ['a', 'b', 'c'] {
            q.push(c);
        }
        assert_eq!(q.drain().collect::<String>(), "abc");
        assert!(q.is_empty());
    }

    #[test]
    fn full_queue_drops_oldest() {
        let mut q = EventQueue::with_capacity(2);
        assert!(!q.push(1));
        assert!(!q.push(2));
        assert!(q.push(3));
        assert_eq!(q.iter().copied().collect::<Vec<_>>(), vec![2, 3]);
        assert_eq!(q.pop(), Some(2));
    }

    #[test]
    fn zero_capacity_is_raised_to_one() {
        let mut q = EventQueue::with_capacity(0);
        q.push(1);
        q.push(2);
        assert_eq!(q.capacity(), 1);
        assert_eq!(q.pop(), Some(2));
    }
}
