//! Input module - buffered player intents
//!
//! Input collaborators push intents asynchronously; the session drains the
//! queue right before stepping the simulation. Pushing never blocks. The
//! queue is bounded so a stalled simulation cannot grow it without limit;
//! when full, the newest intent is dropped.

use std::collections::VecDeque;

use crate::types::Intent;

/// Maximum number of intents buffered between ticks.
pub const MAX_PENDING_INTENTS: usize = 64;

/// FIFO buffer of player intents.
#[derive(Debug, Clone, Default)]
pub struct InputQueue {
    queue: VecDeque<Intent>,
}

impl InputQueue {
    pub fn new() -> Self {
        Self {
            queue: VecDeque::with_capacity(MAX_PENDING_INTENTS),
        }
    }

    /// Buffer an intent. Returns false if the queue was full and the intent
    /// was dropped.
    pub fn push(&mut self, intent: Intent) -> bool {
        if self.queue.len() >= MAX_PENDING_INTENTS {
            log::trace!("input queue full, dropping intent {:?}", intent);
            return false;
        }
        self.queue.push_back(intent);
        true
    }

    /// Remove and return all buffered intents in arrival order.
    pub fn drain(&mut self) -> impl Iterator<Item = Intent> + '_ {
        self.queue.drain(..)
    }

    pub fn len(&self) -> usize {
        self.queue.len()
    }

    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    pub fn clear(&mut self) {
        self.queue.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_push_and_drain_in_order() {
        let mut q = InputQueue::new();
        assert!(q.push(Intent::Flap));
        assert!(q.push(Intent::Rotate));
        let drained: Vec<_> = q.drain().collect();
        assert_eq!(drained, vec![Intent::Flap, Intent::Rotate]);
        assert!(q.is_empty());
    }

    #[test]
    fn test_bounded_queue_drops_newest() {
        let mut q = InputQueue::new();
        for _ in 0..MAX_PENDING_INTENTS {
            assert!(q.push(Intent::Flap));
        }
        assert!(!q.push(Intent::Rotate));
        assert_eq!(q.len(), MAX_PENDING_INTENTS);
    }

    #[test]
    fn test_clear() {
        let mut q = InputQueue::new();
        q.push(Intent::Flap);
        q.clear();
        assert!(q.is_empty());
    }
}
