//! Queue of constants waiting to be pushed.
//!
//! Constant pushes are not encoded when requested. They wait here so the
//! assembler can either fold them into a direct opcode as inline operands
//! or pack consecutive small values into one byte-push instruction.

use std::collections::VecDeque;

use pcode_core::is_byte_range;

/// FIFO of queued constants.
#[derive(Debug, Default)]
pub struct ImmediateQueue {
    values: VecDeque<i32>,
}

impl ImmediateQueue {
    /// Create an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a constant.
    pub fn enqueue(&mut self, value: i32) {
        self.values.push_back(value);
    }

    /// Remove the oldest constant.
    ///
    /// # Panics
    ///
    /// Panics if the queue is empty.
    pub fn dequeue(&mut self) -> i32 {
        self.values
            .pop_front()
            .expect("immediate queue underflow")
    }

    /// Number of queued constants.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing is queued.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Length of the run of byte-range values at the head, up to `limit`.
    pub fn leading_byte_run(&self, limit: usize) -> usize {
        self.values
            .iter()
            .take(limit)
            .take_while(|&&value| is_byte_range(value))
            .count()
    }

    /// Whether the newest `count` values are all byte-range.
    pub fn tail_is_byte_range(&self, count: usize) -> bool {
        assert!(
            count <= self.values.len(),
            "checking {} immediates with only {} queued",
            count,
            self.values.len()
        );
        self.values
            .iter()
            .skip(self.values.len() - count)
            .all(|&value| is_byte_range(value))
    }

    /// Iterate the queued values, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = i32> + '_ {
        self.values.iter().copied()
    }

    /// Drop every queued value, keeping the allocation.
    pub fn clear(&mut self) {
        self.values.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue(values: &[i32]) -> ImmediateQueue {
        let mut queue = ImmediateQueue::new();
        for &value in values {
            queue.enqueue(value);
        }
        queue
    }

    #[test]
    fn fifo_order() {
        let mut queue = queue(&[1, 2, 3]);
        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue(), 1);
        assert_eq!(queue.dequeue(), 2);
        assert_eq!(queue.iter().collect::<Vec<_>>(), vec![3]);
    }

    #[test]
    #[should_panic(expected = "immediate queue underflow")]
    fn dequeue_empty_panics() {
        ImmediateQueue::new().dequeue();
    }

    #[test]
    fn leading_run() {
        assert_eq!(queue(&[200_000, 1]).leading_byte_run(10), 0);

        let mixed = queue(&[5, -128, 127, 128, 3]);
        assert_eq!(mixed.leading_byte_run(10), 3);
        assert_eq!(mixed.leading_byte_run(2), 2);
        assert_eq!(mixed.leading_byte_run(0), 0);
    }

    #[test]
    fn tail_range() {
        let queue = queue(&[200_000, 4, -7]);
        assert!(queue.tail_is_byte_range(2));
        assert!(!queue.tail_is_byte_range(3));
        assert!(queue.tail_is_byte_range(0));
    }
}
