//! Insertion strategies, one per order discipline
//!
//! Each strategy leaves the buffer so that the tail is the next element to be
//! removed. For the priority disciplines the buffer stays sorted, with the
//! oldest element of a priority tie closest to the tail.

use crate::queue::element::BoxedElement;
use crate::queue::error::QueueResult;
use crate::queue::order::{same_priority, OrderDiscipline};
use crate::queue::state::QueueState;

impl<T: Send + 'static> QueueState<T> {
    /// Insert an element according to the queue's discipline
    pub fn insert(&mut self, elem: impl Into<BoxedElement<T>>) -> QueueResult<()> {
        let elem = elem.into();
        match self.order {
            OrderDiscipline::Fifo => self.insert_fifo(elem),
            OrderDiscipline::Lifo => self.insert_lifo(elem),
            OrderDiscipline::PriorityHigh | OrderDiscipline::PriorityLow => {
                self.insert_by_priority(elem)
            }
            OrderDiscipline::FifoLimited => return self.insert_fifo_limited(elem),
        }
        Ok(())
    }

    fn insert_fifo(&mut self, elem: BoxedElement<T>) {
        self.buffer.push_front(elem);
    }

    fn insert_lifo(&mut self, elem: BoxedElement<T>) {
        self.buffer.push_back(elem);
    }

    /// Sorted insertion for `PriorityHigh` / `PriorityLow`
    pub(super) fn insert_by_priority(&mut self, elem: BoxedElement<T>) {
        let priority = elem.priority();
        let tail_priority = match self.buffer.back() {
            Some(tail) => tail.priority(),
            None => {
                self.buffer.push_back(elem);
                return;
            }
        };

        // New element goes out before the current tail: append
        if self.order.removes_before(priority, tail_priority) {
            log::trace!("priority {} extends the tail", priority);
            self.buffer.push_back(elem);
            return;
        }

        // Tie with the tail: only the tie run needs scanning. The new element
        // is the youngest of the run, so it goes in front of it.
        if same_priority(priority, tail_priority) {
            let run_start = self
                .buffer
                .iter()
                .rposition(|e| !same_priority(e.priority(), priority))
                .map_or(0, |i| i + 1);
            log::trace!("priority {} joins tie run at index {}", priority, run_start);
            self.buffer.insert(run_start, elem);
            return;
        }

        // Somewhere in the middle: first element not removed after the new one.
        // Equal priorities count as "not after", so the new element lands in
        // front of its existing ties.
        let order = self.order;
        let position = self
            .buffer
            .partition_point(|e| order.removes_before(priority, e.priority()));
        log::trace!("priority {} inserted at index {}", priority, position);
        self.buffer.insert(position, elem);
    }

    fn insert_fifo_limited(&mut self, elem: BoxedElement<T>) -> QueueResult<()> {
        if self.limit != 0 {
            while self.buffer.len() >= self.limit {
                let tail = self.buffer.len() - 1;
                self.remove_index(tail)
                    .map_err(|e| e.context("popping element because of overflow"))?;
                log::debug!("evicted oldest element of full queue (limit: {})", self.limit);
            }
        }
        self.insert_fifo(elem);
        Ok(())
    }
}
