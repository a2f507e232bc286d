//! Removal and buffer compaction

use crate::queue::capacity;
use crate::queue::element::BoxedElement;
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::state::QueueState;

impl<T: Send + 'static> QueueState<T> {
    /// Remove the next element and split it into content and priority
    pub fn remove(&mut self) -> QueueResult<(T, f64)> {
        let elem = self.remove_element()?;
        let priority = elem.priority();
        Ok((elem.into_content(), priority))
    }

    /// Remove the next element, keeping its element wrapper
    pub fn remove_element(&mut self) -> QueueResult<BoxedElement<T>> {
        self.remove_at(0)
    }

    /// Remove the element `offset` positions away from the tail
    pub fn remove_at(&mut self, offset: usize) -> QueueResult<BoxedElement<T>> {
        let index = self.index_from_tail(offset)?;
        self.remove_index(index)
    }

    /// Detach the element at buffer `index`, then let the capacity policy
    /// decide whether the buffer should shrink
    pub(super) fn remove_index(&mut self, index: usize) -> QueueResult<BoxedElement<T>> {
        let elem = self.detach(index)?;
        self.handle_shrink();
        Ok(elem)
    }

    /// Detach the element at buffer `index` without touching the allocation
    pub(super) fn detach(&mut self, index: usize) -> QueueResult<BoxedElement<T>> {
        let len = self.buffer.len();
        if len == 0 {
            return Err(QueueError::EmptyQueue);
        }
        let elem = if index == len - 1 {
            self.buffer.pop_back()
        } else if index == 0 {
            self.buffer.pop_front()
        } else {
            self.buffer.remove(index)
        };
        elem.ok_or(QueueError::IndexOutOfBounds { index, len })
    }

    fn handle_shrink(&mut self) {
        let len = self.buffer.len();
        let capacity = self.buffer.capacity();
        if let Some(target) = capacity::shrink_target(len, capacity) {
            self.buffer.shrink_to(target);
            log::debug!(
                "shrunk queue buffer from {} to {} slots ({} live)",
                capacity,
                self.buffer.capacity(),
                len
            );
        }
    }
}
