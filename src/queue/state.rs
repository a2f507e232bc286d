//! Queue state without synchronisation
//!
//! `QueueState` owns the buffer, the discipline and the limit. All structural
//! work happens here; [`Queue`](crate::queue::Queue) only wraps it in a mutex.
//! Holding a `&mut QueueState` is proof that the caller holds the queue lock
//! (or owns the state outright), so the methods below are the composition seam
//! for running several operations under one lock acquisition:
//!
//! ```rust
//! use orderq::queue::{OrderDiscipline, PriorityElement, Queue};
//!
//! let queue = Queue::new(OrderDiscipline::PriorityHigh);
//! {
//!     let mut state = queue.lock();
//!     state.insert(PriorityElement::new("low", 1.0)).unwrap();
//!     state.insert(PriorityElement::new("high", 9.0)).unwrap();
//!     state.filter_in_place(|c| Ok::<_, &str>(*c != "low")).unwrap();
//! }
//! assert_eq!(queue.len(), 1);
//! ```
//!
//! Buffer layout: index `len - 1` (the tail) is always the element the next
//! removal returns. Offsets used by `peek_element_at` / `remove_at` count from
//! the tail, so offset 0 is the next element to be removed.

use crate::queue::element::{BoxedElement, Element};
use crate::queue::error::{QueueError, QueueResult};
use crate::queue::order::{same_priority, OrderDiscipline};
use std::collections::VecDeque;

pub struct QueueState<T> {
    pub(super) order: OrderDiscipline,
    pub(super) buffer: VecDeque<BoxedElement<T>>,
    /// Maximum length for `FifoLimited`; 0 means unbounded
    pub(super) limit: usize,
}

impl<T: Send + 'static> QueueState<T> {
    pub fn new(order: OrderDiscipline) -> Self {
        Self {
            order,
            buffer: VecDeque::new(),
            limit: 0,
        }
    }

    pub fn order(&self) -> OrderDiscipline {
        self.order
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Set the maximum length. Only `FifoLimited` queues enforce it.
    ///
    /// Lowering the limit below the current length does not drop anything;
    /// the next insert evicts until the queue fits.
    pub fn set_limit(&mut self, limit: i64) -> QueueResult<()> {
        let limit = usize::try_from(limit).map_err(|_| QueueError::InvalidQueueLimit { limit })?;
        self.limit = limit;
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Allocated slots of the backing buffer
    pub fn capacity(&self) -> usize {
        self.buffer.capacity()
    }

    /// Append at the tail without any ordering work.
    ///
    /// This bypasses the discipline: the appended element becomes the next one
    /// removed regardless of its priority. Use `insert` to keep the ordering.
    pub fn append(&mut self, elem: impl Into<BoxedElement<T>>) {
        self.buffer.push_back(elem.into());
    }

    /// Translate an offset from the tail into a buffer index
    pub(super) fn index_from_tail(&self, offset: usize) -> QueueResult<usize> {
        let len = self.buffer.len();
        if len == 0 {
            return Err(QueueError::EmptyQueue);
        }
        if offset >= len {
            return Err(QueueError::IndexOutOfBounds { index: offset, len });
        }
        Ok(len - 1 - offset)
    }

    /// The element the next removal returns
    pub fn peek_element(&self) -> QueueResult<&dyn Element<T>> {
        self.peek_element_at(0)
    }

    /// The element `offset` positions away from the tail
    pub fn peek_element_at(&self, offset: usize) -> QueueResult<&dyn Element<T>> {
        let index = self.index_from_tail(offset)?;
        Ok(as_element(&self.buffer[index]))
    }

    /// Iterate elements in buffer order (head first, tail last)
    pub fn elements(&self) -> impl Iterator<Item = &dyn Element<T>> + '_ {
        self.buffer.iter().map(as_element)
    }

    /// Iterate contents in buffer order (head first, tail last)
    pub fn contents(&self) -> impl Iterator<Item = &T> + '_ {
        self.buffer.iter().map(|elem| elem.content())
    }

    /// Change every element with priority `old` to priority `new`
    ///
    /// Unsorted disciplines are updated in place. For the priority disciplines
    /// the affected elements are pulled out and inserted again: by default
    /// oldest first, which keeps their relative order; with `fast_mode` they
    /// are inserted in buffer order, which reverses it.
    ///
    /// Returns the number of elements whose priority changed. Elements that
    /// ignore priority updates (base elements) are left untouched.
    pub fn update_priority(&mut self, old: f64, new: f64, fast_mode: bool) -> usize {
        if !self.order.is_priority_ordered() {
            let mut updated = 0;
            for elem in self.buffer.iter_mut() {
                if same_priority(elem.priority(), old) {
                    elem.set_priority(new);
                    if same_priority(elem.priority(), new) {
                        updated += 1;
                    }
                }
            }
            log::debug!(
                "updated priority {} -> {} on {} element(s) of {} queue",
                old,
                new,
                updated,
                self.order
            );
            return updated;
        }

        if same_priority(old, new) {
            return self
                .buffer
                .iter()
                .filter(|elem| same_priority(elem.priority(), old))
                .count();
        }

        // Pull matching elements out in buffer order (newest of a tie first)
        let mut kept = VecDeque::with_capacity(self.buffer.capacity());
        let mut moved = Vec::new();
        for mut elem in self.buffer.drain(..) {
            if same_priority(elem.priority(), old) {
                elem.set_priority(new);
                if same_priority(elem.priority(), new) {
                    moved.push(elem);
                    continue;
                }
            }
            kept.push_back(elem);
        }
        self.buffer = kept;

        let updated = moved.len();
        if fast_mode {
            for elem in moved {
                self.insert_by_priority(elem);
            }
        } else {
            for elem in moved.into_iter().rev() {
                self.insert_by_priority(elem);
            }
        }

        log::debug!(
            "updated priority {} -> {} on {} element(s) of {} queue (fast_mode: {})",
            old,
            new,
            updated,
            self.order,
            fast_mode
        );
        updated
    }
}

fn as_element<T>(elem: &BoxedElement<T>) -> &dyn Element<T> {
    elem.as_ref()
}

impl<T: Clone + Send + 'static> QueueState<T> {
    /// Snapshot of all contents in buffer order (head first, tail last)
    ///
    /// Buffer order is not removal order for every discipline; use `remove`
    /// or `fold` when removal order matters.
    pub fn all_elements(&self) -> Vec<T> {
        self.contents().cloned().collect()
    }
}

impl<T: Clone + Send + 'static> Clone for QueueState<T> {
    /// Structural copy with independent storage. Contents are copied with
    /// `T::clone`, so shared-ownership content (`Arc`, `Rc`) is still shared.
    fn clone(&self) -> Self {
        let mut buffer = VecDeque::with_capacity(self.buffer.len());
        buffer.extend(self.buffer.iter().map(|elem| elem.boxed_clone()));
        Self {
            order: self.order,
            buffer,
            limit: self.limit,
        }
    }
}
