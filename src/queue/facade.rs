//! Thread-safe queue facade
//!
//! `Queue` wraps a [`QueueState`] in a single mutex. Every public method takes
//! the lock for the duration of the call and never suspends while holding it.
//! Use [`Queue::lock`] to run several operations under one acquisition.

use crate::queue::element::{BoxedElement, Element};
use crate::queue::error::{CallbackError, FoldError, QueueResult};
use crate::queue::order::OrderDiscipline;
use crate::queue::state::QueueState;
use std::fmt;
use std::sync::{Mutex, MutexGuard, PoisonError, TryLockError};

/// Queue with a fixed order discipline
///
/// # Thread Safety
///
/// `Queue` is `Send + Sync` and is meant to be shared through `Arc<Queue<T>>`.
/// Structural operations are serialised behind one mutex.
///
/// # Example
///
/// ```rust
/// use orderq::queue::{BaseElement, OrderDiscipline, PriorityElement, Queue};
///
/// let queue = Queue::new(OrderDiscipline::PriorityHigh);
/// queue.insert(PriorityElement::new("later", 1.0)).unwrap();
/// queue.insert(PriorityElement::new("first", 5.0)).unwrap();
/// queue.insert(BaseElement::new("last")).unwrap();
///
/// assert_eq!(queue.remove().unwrap(), ("first", 5.0));
/// assert_eq!(queue.remove().unwrap(), ("later", 1.0));
/// assert_eq!(queue.remove().unwrap(), ("last", 0.0));
/// assert!(queue.remove().unwrap_err().is_empty_queue());
/// ```
pub struct Queue<T> {
    state: Mutex<QueueState<T>>,
}

impl<T: Send + 'static> Queue<T> {
    pub fn new(order: OrderDiscipline) -> Self {
        Self::from_state(QueueState::new(order))
    }

    /// Build a queue from a numeric discipline code
    pub fn from_code(code: i64) -> QueueResult<Self> {
        Ok(Self::new(OrderDiscipline::try_from(code)?))
    }

    /// Build a queue with a length limit (enforced by `FifoLimited`)
    pub fn with_limit(order: OrderDiscipline, limit: i64) -> QueueResult<Self> {
        let mut state = QueueState::new(order);
        state.set_limit(limit)?;
        Ok(Self::from_state(state))
    }

    pub fn from_state(state: QueueState<T>) -> Self {
        Self {
            state: Mutex::new(state),
        }
    }

    pub fn into_state(self) -> QueueState<T> {
        self.state.into_inner().unwrap_or_else(PoisonError::into_inner)
    }

    /// Acquire the queue lock
    ///
    /// Structural operations restore the queue invariants before running any
    /// caller code, so a lock poisoned by a panicking closure is still
    /// consistent and is recovered here.
    pub fn lock(&self) -> MutexGuard<'_, QueueState<T>> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn order(&self) -> OrderDiscipline {
        self.lock().order()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    pub fn limit(&self) -> usize {
        self.lock().limit()
    }

    /// Allocated slots of the backing buffer
    pub fn capacity(&self) -> usize {
        self.lock().capacity()
    }

    /// Set the maximum length; fails with `InvalidQueueLimit` for negative values
    pub fn set_limit(&self, limit: i64) -> QueueResult<()> {
        self.lock().set_limit(limit)
    }

    /// Insert according to the queue's discipline
    ///
    /// Among equal priorities the oldest element is removed first.
    pub fn insert(&self, elem: impl Into<BoxedElement<T>>) -> QueueResult<()> {
        self.lock().insert(elem)
    }

    /// Append at the tail without upholding the discipline
    pub fn append(&self, elem: impl Into<BoxedElement<T>>) {
        self.lock().append(elem)
    }

    /// Remove the next element as `(content, priority)`
    pub fn remove(&self) -> QueueResult<(T, f64)> {
        self.lock().remove()
    }

    /// Remove the next element, keeping the element wrapper
    pub fn remove_element(&self) -> QueueResult<BoxedElement<T>> {
        self.lock().remove_element()
    }

    /// Remove the element `offset` positions away from the tail
    pub fn remove_at(&self, offset: usize) -> QueueResult<BoxedElement<T>> {
        self.lock().remove_at(offset)
    }

    /// See [`QueueState::update_priority`]
    pub fn update_priority(&self, old: f64, new: f64, fast_mode: bool) -> usize {
        self.lock().update_priority(old, new, fast_mode)
    }

    /// Replace every content with `f(content)` under the lock
    pub fn map_in_place<F, E>(&self, f: F) -> QueueResult<()>
    where
        F: FnMut(&T) -> Result<T, E>,
        E: Into<CallbackError>,
    {
        self.lock().map_in_place(f)
    }

    /// Remove every element for which `f` returns false, under the lock
    pub fn filter_in_place<F, E>(&self, f: F) -> QueueResult<()>
    where
        F: FnMut(&T) -> Result<bool, E>,
        E: Into<CallbackError>,
    {
        self.lock().filter_in_place(f)
    }

    /// Left-to-right reduction in buffer order, under the lock
    pub fn fold<A, F, E>(&self, initial: A, f: F) -> Result<A, FoldError<A>>
    where
        F: FnMut(A, &dyn Element<T>) -> Result<A, (A, E)>,
        E: Into<CallbackError>,
    {
        self.lock().fold(initial, f)
    }

    /// Project into a new queue with the same discipline and limit, under the lock
    pub fn map<U, F, E>(&self, f: F) -> QueueResult<Queue<U>>
    where
        U: Send + 'static,
        F: FnMut(&dyn Element<T>) -> Result<Option<BoxedElement<U>>, E>,
        E: Into<CallbackError>,
    {
        let mapped = self.lock().map(f)?;
        Ok(Queue::from_state(mapped))
    }
}

impl<T: Clone + Send + 'static> Queue<T> {
    /// Copy of the next element as `(priority, content)`
    pub fn peek(&self) -> QueueResult<(f64, T)> {
        self.peek_at(0)
    }

    /// Copy of the element `offset` positions away from the tail
    pub fn peek_at(&self, offset: usize) -> QueueResult<(f64, T)> {
        let state = self.lock();
        let elem = state.peek_element_at(offset)?;
        Ok((elem.priority(), elem.content().clone()))
    }

    /// Snapshot of all contents in buffer order
    pub fn all_elements(&self) -> Vec<T> {
        self.lock().all_elements()
    }
}

impl<T: Clone + Send + 'static> Clone for Queue<T> {
    fn clone(&self) -> Self {
        Self::from_state(self.lock().clone())
    }
}

impl<T> fmt::Debug for QueueState<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QueueState")
            .field("order", &self.order)
            .field("len", &self.buffer.len())
            .field("capacity", &self.buffer.capacity())
            .field("limit", &self.limit)
            .finish()
    }
}

impl<T> fmt::Debug for Queue<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state.try_lock() {
            Ok(state) => f.debug_tuple("Queue").field(&*state).finish(),
            Err(TryLockError::Poisoned(poisoned)) => {
                f.debug_tuple("Queue").field(&*poisoned.into_inner()).finish()
            }
            Err(TryLockError::WouldBlock) => f.write_str("Queue { <locked> }"),
        }
    }
}
